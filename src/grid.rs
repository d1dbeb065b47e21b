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

//! The cross-shaped 4×4 letter grid.
//!
//! Cells are numbered row by row from 0 to 15. The four corners are
//! never used so a puzzle only has letters in the twelve cells that
//! make up the cross.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const WIDTH: usize = 4;
pub const N_CELLS: usize = WIDTH * WIDTH;
pub const N_ACTIVE: usize = 12;

pub const CORNERS: [usize; 4] = [0, 3, 12, 15];

pub const ACTIVE_POSITIONS: [usize; N_ACTIVE] = [
    1, 2,
    4, 5, 6, 7,
    8, 9, 10, 11,
    13, 14,
];

/// Character used for an empty cell in the textual form of a grid
pub const EMPTY_CELL: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Grid {
    cells: [Option<char>; N_CELLS],
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("grid has {0} cells but should have {n}", n = N_CELLS)]
    WrongSize(usize),
    #[error("invalid character “{0}” in grid")]
    InvalidCharacter(char),
}

pub fn is_active(pos: usize) -> bool {
    pos < N_CELLS && !CORNERS.contains(&pos)
}

impl Grid {
    pub fn empty() -> Grid {
        Grid {
            cells: [None; N_CELLS],
        }
    }

    /// Lays the letters of `word` out along `path`. Any letters
    /// beyond the end of the path are dropped.
    pub fn from_path(word: &str, path: &[usize]) -> Grid {
        let mut grid = Grid::empty();

        for (letter, &pos) in word.chars().zip(path.iter()) {
            if pos < N_CELLS {
                grid.cells[pos] = Some(letter.to_ascii_uppercase());
            }
        }

        grid
    }

    pub fn at(&self, pos: usize) -> Option<char> {
        self.cells.get(pos).copied().flatten()
    }

    pub fn set(&mut self, pos: usize, letter: Option<char>) {
        assert!(pos < N_CELLS);

        self.cells[pos] = letter;
    }

    /// Iterator over the positions of every cell that has a letter
    pub fn filled(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter()
            .enumerate()
            .filter_map(|(pos, cell)| cell.map(|_| pos))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// The letters read by walking `path` through the grid. Empty
    /// cells are skipped.
    pub fn spell(&self, path: &[usize]) -> String {
        path.iter().filter_map(|&pos| self.at(pos)).collect()
    }

    /// The cells joined into a string. Two grids have the same
    /// signature only if they have the same letters in the same
    /// places.
    pub fn signature(&self) -> String {
        self.cells.iter()
            .map(|cell| cell.unwrap_or(EMPTY_CELL))
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.signature())
    }
}

impl FromStr for Grid {
    type Err = Error;

    /// Parses the signature form of a grid. Whitespace is ignored so
    /// the grid can also be written as four lines.
    fn from_str(s: &str) -> Result<Grid, Error> {
        let mut grid = Grid::empty();
        let mut n_cells = 0;

        for ch in s.chars().filter(|ch| !ch.is_whitespace()) {
            let cell = match ch {
                EMPTY_CELL => None,
                ch if ch.is_alphabetic() => Some(ch.to_ascii_uppercase()),
                ch => return Err(Error::InvalidCharacter(ch)),
            };

            if n_cells < N_CELLS {
                grid.cells[n_cells] = cell;
            }

            n_cells += 1;
        }

        if n_cells != N_CELLS {
            return Err(Error::WrongSize(n_cells));
        }

        Ok(grid)
    }
}

impl From<Grid> for String {
    fn from(grid: Grid) -> String {
        grid.signature()
    }
}

impl TryFrom<String> for Grid {
    type Error = Error;

    fn try_from(s: String) -> Result<Grid, Error> {
        s.parse()
    }
}
