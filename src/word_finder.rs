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

use super::grid::{Grid, N_CELLS, ACTIVE_POSITIONS};
use super::adjacency;

struct StackEntry {
    pos: usize,
    next_direction: usize,
}

/// Finds a route through the grid that spells a single given word.
/// The buffers are kept between searches so that checking a long
/// list of words doesn’t keep allocating.
pub struct Finder {
    stack: Vec<StackEntry>,
    route: Vec<usize>,
    letters: Vec<char>,
    visited: [bool; N_CELLS],
}

impl Finder {
    pub fn new() -> Finder {
        Finder {
            stack: Vec::new(),
            route: Vec::new(),
            letters: Vec::new(),
            visited: [false; N_CELLS],
        }
    }

    fn find_from_position(&mut self, grid: &Grid, start: usize) -> bool {
        if grid.at(start) != self.letters.first().copied() {
            return false;
        }

        self.stack.clear();
        self.stack.push(StackEntry { pos: start, next_direction: 0 });

        self.visited = [false; N_CELLS];
        self.visited[start] = true;

        while self.stack.len() < self.letters.len() {
            let Some(entry) = self.stack.last_mut()
            else {
                return false;
            };

            let Some(next_pos) =
                adjacency::step(entry.pos, entry.next_direction)
            else {
                // Backtrack
                self.visited[entry.pos] = false;
                self.stack.pop();
                continue;
            };

            entry.next_direction += 1;

            let letter = self.letters[self.stack.len()];

            if self.visited[next_pos] || grid.at(next_pos) != Some(letter) {
                continue;
            }

            self.visited[next_pos] = true;
            self.stack.push(StackEntry { pos: next_pos, next_direction: 0 });
        }

        self.route.clear();
        self.route.extend(self.stack.iter().map(|entry| entry.pos));

        true
    }

    /// Returns the cells of the first route found that spells `word`,
    /// or `None` if the word can’t be made.
    pub fn find(&mut self, grid: &Grid, word: &str) -> Option<&[usize]> {
        self.letters.clear();
        self.letters.extend(word.chars().map(|ch| ch.to_ascii_uppercase()));

        if self.letters.is_empty() {
            return None;
        }

        for &start in ACTIVE_POSITIONS.iter() {
            if self.find_from_position(grid, start) {
                return Some(&self.route);
            }
        }

        None
    }
}

impl Default for Finder {
    fn default() -> Finder {
        Finder::new()
    }
}
