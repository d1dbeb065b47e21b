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

//! Finding every word hidden in a grid.

use std::collections::{BTreeMap, HashSet};
use super::grid::{self, Grid, N_CELLS, N_ACTIVE};
use super::dictionary::{Dictionary, Walker};
use super::adjacency;
use super::counts::CellCounts;
use super::word_finder;

pub const MIN_WORD_LENGTH: usize = 4;
pub const MAX_WORD_LENGTH: usize = N_ACTIVE;

/// The cells visited to spell a word, in order
pub type Route = Vec<usize>;

struct StackEntry<'a> {
    pos: usize,
    // Walker positioned after this entry’s letter
    walker: Walker<'a>,
    next_direction: usize,
}

// Depth-first search of every route starting from `start`. `found` is
// called with the route each time the letters along it make a word
// of an allowed length.
fn search_from_pos<F>(
    grid: &Grid,
    dictionary: &Dictionary,
    start: usize,
    found: &mut F,
)
    where F: FnMut(&[usize])
{
    let Some(walker) = grid.at(start)
        .filter(|_| grid::is_active(start))
        .and_then(|letter| Walker::new(dictionary)?.step(letter))
    else {
        return;
    };

    let mut visited = [false; N_CELLS];
    let mut route = vec![start];
    let mut stack = vec![StackEntry {
        pos: start,
        walker,
        next_direction: 0,
    }];

    visited[start] = true;

    while let Some(entry) = stack.last_mut() {
        let Some(next_pos) = adjacency::step(entry.pos, entry.next_direction)
        else {
            // Backtrack
            visited[entry.pos] = false;
            stack.pop();
            route.pop();
            continue;
        };

        entry.next_direction += 1;

        if visited[next_pos] || route.len() >= MAX_WORD_LENGTH {
            continue;
        }

        // Skip the branch if no word continues with this letter
        let Some(next_walker) = grid.at(next_pos)
            .and_then(|letter| entry.walker.step(letter))
        else {
            continue;
        };

        visited[next_pos] = true;
        route.push(next_pos);
        stack.push(StackEntry {
            pos: next_pos,
            walker: next_walker,
            next_direction: 0,
        });

        if route.len() >= MIN_WORD_LENGTH && next_walker.is_end() {
            found(&route);
        }
    }
}

/// Every dictionary word that can be spelled by walking between
/// adjacent cells without using a cell twice. A word is only listed
/// once however many routes spell it.
pub fn search_words(
    grid: &Grid,
    dictionary: &Dictionary,
) -> HashSet<String> {
    let mut word_list = HashSet::new();

    for pos in grid.filled() {
        search_from_pos(grid, dictionary, pos, &mut |route| {
            word_list.insert(grid.spell(route));
        });
    }

    word_list
}

/// Like [`search_words`] but also keeps every distinct route that
/// spells each word. Used to diagnose grids where a word can be
/// found in more ways than expected.
pub fn discover_routes(
    grid: &Grid,
    dictionary: &Dictionary,
) -> BTreeMap<String, Vec<Route>> {
    let mut routes = BTreeMap::<String, Vec<Route>>::new();

    for pos in grid.filled() {
        search_from_pos(grid, dictionary, pos, &mut |route| {
            routes.entry(grid.spell(route))
                .or_default()
                .push(route.to_vec());
        });
    }

    routes
}

/// Counts how many of the words start on each cell and how many pass
/// through it. Words that can’t be found in the grid are ignored.
pub fn count_visits<I, T>(
    grid: &Grid,
    words: I,
) -> CellCounts
    where I: IntoIterator<Item = T>,
          T: AsRef<str>
{
    let mut counts = CellCounts::new();
    let mut finder = word_finder::Finder::new();

    for word in words {
        let Some(route) = finder.find(grid, word.as_ref())
        else {
            continue;
        };

        if let Some(&start) = route.first() {
            counts.at_mut(start).starts += 1;
        }

        for &pos in route.iter() {
            counts.at_mut(pos).visits += 1;
        }
    }

    counts
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::word_finder::Finder;

    const CORNERSTONES_PATH: [usize; 12] =
        [1, 5, 4, 8, 9, 13, 14, 10, 6, 2, 7, 11];

    fn make_dictionary() -> Dictionary {
        Dictionary::from_words([
            "CORE", "CORN", "CORNS", "CORNER", "CORNERS", "STONE",
            "STONES", "NOTE", "TONE", "SNORE", "SONNET", "RESTORE",
            "CORNERSTONE", "CORNERSTONES", "ONE", "ZEBRA", "ROTE",
        ])
    }

    fn search(grid: &Grid) -> Vec<String> {
        let mut words = search_words(grid, &make_dictionary())
            .into_iter()
            .collect::<Vec<_>>();

        words.sort_unstable();

        words
    }

    #[test]
    fn cornerstones() {
        let grid = Grid::from_path("CORNERSTONES", &CORNERSTONES_PATH);

        assert_eq!(
            &search(&grid),
            &[
                "CORE", "CORN", "CORNER", "CORNERS", "CORNERSTONE",
                "CORNERSTONES", "NOTE", "ROTE", "STONE", "STONES", "TONE",
            ],
        );
    }

    #[test]
    fn minimum_length() {
        // “ONE” is in the dictionary and in the grid but is too short
        let grid = Grid::from_path("ONEX", &[5, 6, 7, 11]);

        assert!(search(&grid).is_empty());
    }

    #[test]
    fn too_few_letters() {
        let grid = Grid::from_path("COR", &[1, 5, 4]);

        assert!(search(&grid).is_empty());
        assert!(search(&Grid::empty()).is_empty());
    }

    #[test]
    fn empty_dictionary() {
        let grid = Grid::from_path("CORNERSTONES", &CORNERSTONES_PATH);

        assert!(search_words(&grid, &Dictionary::new()).is_empty());
    }

    #[test]
    fn planted_word() {
        // Every cell apart from the planted word has a letter that
        // doesn’t appear in any dictionary word
        for (i, path) in crate::catalog::Catalog::builtin()
            .paths()
            .iter()
            .enumerate()
        {
            let mut grid = Grid::from_path("QQQQQQQQQQQQ", path);

            let offset = i % (path.len() - 4);

            for (letter, &pos) in "ZEBRA".chars().zip(path[offset..].iter()) {
                grid.set(pos, Some(letter));
            }

            assert_eq!(&search(&grid), &["ZEBRA"], "path {}", i);
        }
    }

    #[test]
    fn corners_are_ignored() {
        let mut grid = Grid::from_path("ORE", &[5, 4, 9]);

        // The corner is a king’s move away from the O but it must
        // never be visited
        grid.set(0, Some('C'));

        assert!(search(&grid).is_empty());
    }

    #[test]
    fn idempotent() {
        let grid = Grid::from_path(
            "CORNERSTONES",
            &[2, 1, 5, 4, 8, 13, 9, 6, 7, 11, 14, 10],
        );
        let dictionary = make_dictionary();

        assert_eq!(
            search_words(&grid, &dictionary),
            search_words(&grid, &dictionary),
        );
    }

    #[test]
    fn sound() {
        let dictionary = make_dictionary();
        let mut finder = Finder::new();

        for path in crate::catalog::Catalog::builtin().paths() {
            let grid = Grid::from_path("CORNERSTONES", path);

            for word in search_words(&grid, &dictionary) {
                assert!(dictionary.contains(&word));
                assert!(word.len() >= MIN_WORD_LENGTH);
                assert!(word.len() <= MAX_WORD_LENGTH);
                assert!(finder.find(&grid, &word).is_some());
            }
        }
    }

    #[test]
    fn routes() {
        let grid = Grid::from_path("CORNERSTONES", &CORNERSTONES_PATH);
        let dictionary = make_dictionary();
        let routes = discover_routes(&grid, &dictionary);

        assert_eq!(
            routes.keys().cloned().collect::<HashSet<_>>(),
            search_words(&grid, &dictionary),
        );

        // Both Os and both Ns can be used for “TONE”
        assert_eq!(
            routes["TONE"],
            &[vec![10, 5, 2, 7], vec![10, 5, 8, 9], vec![10, 6, 2, 7]],
        );
        assert_eq!(routes["CORE"], &[vec![1, 5, 4, 9]]);

        for (word, routes) in routes.iter() {
            let distinct = routes.iter().collect::<HashSet<_>>();

            assert_eq!(distinct.len(), routes.len());

            for route in routes.iter() {
                assert_eq!(&grid.spell(route), word);
            }
        }
    }

    #[test]
    fn visits() {
        let grid = Grid::from_path("CORNERSTONES", &CORNERSTONES_PATH);
        let counts = count_visits(&grid, ["CORE", "CORN", "TONE", "XYZZY"]);

        assert_eq!(counts.at(1).starts, 2);
        assert_eq!(counts.at(1).visits, 2);
        assert_eq!(counts.at(5).starts, 0);
        assert_eq!(counts.at(5).visits, 3);
        assert_eq!(counts.at(2).visits, 1);
        assert_eq!(counts.at(7).visits, 1);
        assert_eq!(counts.at(4).visits, 2);
        assert_eq!(counts.at(9).visits, 1);
        assert_eq!(counts.at(8).visits, 1);
        assert_eq!(counts.at(10).starts, 1);
        assert_eq!(counts.at(0).visits, 0);
    }
}
