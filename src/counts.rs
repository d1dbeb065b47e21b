// Cornerstones – A word search game
// Copyright (C) 2024  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use super::grid::N_CELLS;

#[derive(Debug, Clone)]
pub struct CellCounts {
    values: [TileCounts; N_CELLS],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileCounts {
    pub starts: u16,
    pub visits: u16,
}

impl CellCounts {
    pub fn new() -> CellCounts {
        CellCounts {
            values: [TileCounts::default(); N_CELLS],
        }
    }

    pub fn at(&self, pos: usize) -> &TileCounts {
        &self.values[pos]
    }

    pub fn at_mut(&mut self, pos: usize) -> &mut TileCounts {
        &mut self.values[pos]
    }
}

impl Default for CellCounts {
    fn default() -> CellCounts {
        CellCounts::new()
    }
}
