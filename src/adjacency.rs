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

// Every cell that is a king’s move away, restricted to the cells of
// the cross. The corners have no neighbours and are never neighbours
// of anything else.
static NEIGHBOURS: [&[usize]; N_CELLS] = [
    &[],
    &[2, 4, 5, 6],
    &[1, 5, 6, 7],
    &[],
    &[1, 5, 8, 9],
    &[1, 2, 4, 6, 8, 9, 10],
    &[1, 2, 5, 7, 9, 10, 11],
    &[2, 6, 10, 11],
    &[4, 5, 9, 13],
    &[4, 5, 6, 8, 10, 13, 14],
    &[5, 6, 7, 9, 11, 13, 14],
    &[6, 7, 10, 14],
    &[],
    &[8, 9, 10, 14],
    &[9, 10, 11, 13],
    &[],
];

pub fn neighbours(pos: usize) -> &'static [usize] {
    NEIGHBOURS.get(pos).copied().unwrap_or(&[])
}

/// Returns the `direction`th neighbour of `pos`, or `None` once all
/// of the neighbours have been visited. This lets a search keep a
/// small counter per stack entry instead of an iterator.
pub fn step(pos: usize, direction: usize) -> Option<usize> {
    neighbours(pos).get(direction).copied()
}

pub fn is_adjacent(a: usize, b: usize) -> bool {
    neighbours(a).contains(&b)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::{self, ACTIVE_POSITIONS};

    #[test]
    fn symmetric() {
        for a in 0..N_CELLS {
            for &b in neighbours(a) {
                assert!(is_adjacent(b, a), "{} -> {} is one-way", a, b);
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn only_active_cells() {
        for pos in 0..N_CELLS {
            if grid::is_active(pos) {
                assert!(!neighbours(pos).is_empty());
            } else {
                assert!(neighbours(pos).is_empty());
            }

            for &neighbour in neighbours(pos) {
                assert!(ACTIVE_POSITIONS.contains(&neighbour));
            }
        }

        assert!(neighbours(N_CELLS).is_empty());
    }

    #[test]
    fn kings_moves() {
        for &a in ACTIVE_POSITIONS.iter() {
            for &b in ACTIVE_POSITIONS.iter() {
                let dx = (a % 4).abs_diff(b % 4);
                let dy = (a / 4).abs_diff(b / 4);

                assert_eq!(
                    is_adjacent(a, b),
                    a != b && dx <= 1 && dy <= 1,
                    "{} {}",
                    a,
                    b,
                );
            }
        }
    }

    #[test]
    fn step_all_directions() {
        assert_eq!(step(1, 0), Some(2));
        assert_eq!(step(1, 3), Some(6));
        assert_eq!(step(1, 4), None);
        assert_eq!(step(0, 0), None);

        let max = (0..N_CELLS).map(|pos| neighbours(pos).len()).max();
        assert_eq!(max, Some(7));
    }
}
