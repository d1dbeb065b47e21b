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

//! Hamiltonian paths through the cross.
//!
//! A keystone word is laid out on the grid by following one of these
//! paths, so every path visits each of the twelve active cells
//! exactly once and only ever steps to an adjacent cell.

use std::path::Path as FsPath;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::grid::{self, N_ACTIVE, N_CELLS, ACTIVE_POSITIONS};
use super::adjacency;

pub type Path = [usize; N_ACTIVE];

static BUILTIN_PATHS: [Path; 10] = [
    [1, 5, 4, 8, 9, 13, 14, 10, 6, 2, 7, 11],
    [7, 6, 2, 1, 5, 4, 8, 9, 10, 11, 14, 13],
    [14, 10, 11, 7, 6, 2, 1, 5, 9, 13, 8, 4],
    [8, 9, 13, 14, 10, 11, 7, 6, 5, 4, 1, 2],
    [2, 6, 7, 11, 10, 14, 13, 9, 5, 1, 4, 8],
    [13, 9, 8, 4, 5, 1, 2, 6, 10, 14, 11, 7],
    [4, 5, 1, 2, 6, 7, 11, 10, 9, 8, 13, 14],
    [11, 10, 14, 13, 9, 8, 4, 5, 6, 7, 2, 1],
    [4, 8, 13, 9, 5, 1, 2, 6, 10, 14, 11, 7],
    [2, 1, 5, 4, 8, 13, 9, 6, 7, 11, 14, 10],
];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PathError {
    #[error("path has {0} positions but should have {n}", n = N_ACTIVE)]
    WrongLength(usize),
    #[error("position {0} is not part of the cross")]
    InactivePosition(usize),
    #[error("position {0} is visited more than once")]
    Repeated(usize),
    #[error("positions {0} and {1} are not adjacent")]
    NotAdjacent(usize, usize),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("path {index}: {error}")]
    InvalidPath { index: usize, error: PathError },
}

/// Checks every invariant of a Hamiltonian path and reports the
/// first one that fails.
pub fn check_path(path: &[usize]) -> Result<(), PathError> {
    if path.len() != N_ACTIVE {
        return Err(PathError::WrongLength(path.len()));
    }

    let mut seen = [false; N_CELLS];

    for &pos in path.iter() {
        if !grid::is_active(pos) {
            return Err(PathError::InactivePosition(pos));
        }

        if seen[pos] {
            return Err(PathError::Repeated(pos));
        }

        seen[pos] = true;
    }

    for pair in path.windows(2) {
        if !adjacency::is_adjacent(pair[0], pair[1]) {
            return Err(PathError::NotAdjacent(pair[0], pair[1]));
        }
    }

    Ok(())
}

pub fn is_hamiltonian(path: &[usize]) -> bool {
    check_path(path).is_ok()
}

struct StackEntry {
    pos: usize,
    next_direction: usize,
}

/// Finds every Hamiltonian path through the cross by backtracking.
/// The paths are ordered by their starting cell and then by the
/// order of the adjacency table.
pub fn enumerate_paths() -> Vec<Path> {
    let mut paths = Vec::new();

    for &start in ACTIVE_POSITIONS.iter() {
        let mut visited = [false; N_CELLS];
        let mut stack = vec![StackEntry { pos: start, next_direction: 0 }];

        visited[start] = true;

        while let Some(entry) = stack.last_mut() {
            let Some(next_pos) =
                adjacency::step(entry.pos, entry.next_direction)
            else {
                // Backtrack
                visited[entry.pos] = false;
                stack.pop();
                continue;
            };

            entry.next_direction += 1;

            if visited[next_pos] {
                continue;
            }

            visited[next_pos] = true;
            stack.push(StackEntry { pos: next_pos, next_direction: 0 });

            if stack.len() == N_ACTIVE {
                paths.push(std::array::from_fn(|i| stack[i].pos));
                // There is nowhere left to go so undo the last step
                // straight away
                visited[next_pos] = false;
                stack.pop();
            }
        }
    }

    paths
}

/// An ordered list of paths. The order matters because the puzzle
/// builder prefers earlier paths when two of them are equally good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    paths: Vec<Path>,
}

impl Catalog {
    pub fn builtin() -> Catalog {
        Catalog {
            paths: BUILTIN_PATHS.to_vec(),
        }
    }

    pub fn new(paths: Vec<Path>) -> Result<Catalog, Error> {
        for (index, path) in paths.iter().enumerate() {
            check_path(path).map_err(|error| Error::InvalidPath { index, error })?;
        }

        Ok(Catalog { paths })
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Appends a path unless it is already in the catalog. Returns
    /// whether the path was added.
    pub fn push(&mut self, path: Path) -> Result<bool, PathError> {
        check_path(&path)?;

        if self.paths.contains(&path) {
            Ok(false)
        } else {
            self.paths.push(path);
            Ok(true)
        }
    }

    pub fn load<P: AsRef<FsPath>>(filename: P) -> Result<Catalog, Error> {
        let reader = BufReader::new(File::open(filename)?);
        let paths = serde_json::from_reader::<_, Vec<Path>>(reader)?;

        Catalog::new(paths)
    }

    pub fn save<P: AsRef<FsPath>>(&self, filename: P) -> Result<(), Error> {
        let writer = BufWriter::new(File::create(filename)?);

        serde_json::to_writer(writer, &self.paths)?;

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Catalog {
        Catalog::builtin()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_paths_are_valid() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.len(), 10);

        for path in catalog.paths() {
            assert_eq!(check_path(path), Ok(()));

            let mut sorted = path.to_vec();
            sorted.sort_unstable();
            assert_eq!(&sorted, &ACTIVE_POSITIONS);
        }

        let distinct = catalog.paths().iter().collect::<HashSet<_>>();
        assert_eq!(distinct.len(), catalog.len());
    }

    #[test]
    fn first_path() {
        assert_eq!(
            Catalog::builtin().get(0),
            Some(&[1, 5, 4, 8, 9, 13, 14, 10, 6, 2, 7, 11]),
        );
    }

    #[test]
    fn invalid_paths() {
        assert_eq!(
            check_path(&[1, 5, 4]),
            Err(PathError::WrongLength(3)),
        );
        assert_eq!(
            check_path(&[0, 5, 4, 8, 9, 13, 14, 10, 6, 2, 7, 11]),
            Err(PathError::InactivePosition(0)),
        );
        assert_eq!(
            check_path(&[1, 5, 4, 8, 9, 13, 14, 10, 6, 2, 7, 7]),
            Err(PathError::Repeated(7)),
        );
        assert_eq!(
            check_path(&[1, 5, 4, 8, 9, 13, 14, 10, 6, 2, 11, 7]),
            Err(PathError::NotAdjacent(2, 11)),
        );
        assert!(!is_hamiltonian(&[1, 5, 4, 8, 9, 13, 14, 10, 6, 2, 11, 7]));
        assert_eq!(
            &PathError::NotAdjacent(2, 11).to_string(),
            "positions 2 and 11 are not adjacent",
        );
        assert_eq!(
            &PathError::WrongLength(3).to_string(),
            "path has 3 positions but should have 12",
        );
    }

    #[test]
    fn enumerate() {
        let paths = enumerate_paths();

        assert_eq!(paths.len(), 36592);

        let distinct = paths.iter().collect::<HashSet<_>>();
        assert_eq!(distinct.len(), paths.len());

        assert!(paths.iter().all(|path| is_hamiltonian(path)));

        for path in Catalog::builtin().paths() {
            assert!(paths.contains(path));
        }
    }

    #[test]
    fn push() {
        let mut catalog = Catalog::new(Vec::new()).unwrap();

        assert!(catalog.is_empty());
        assert_eq!(catalog.push(BUILTIN_PATHS[3]), Ok(true));
        assert_eq!(catalog.push(BUILTIN_PATHS[3]), Ok(false));
        assert_eq!(
            catalog.push([1, 5, 4, 8, 9, 13, 14, 10, 6, 2, 11, 7]),
            Err(PathError::NotAdjacent(2, 11)),
        );
        assert_eq!(catalog.paths(), &[BUILTIN_PATHS[3]]);
    }

    #[test]
    fn load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let filename = dir.path().join("catalog.json");

        Catalog::builtin().save(&filename).unwrap();
        assert_eq!(Catalog::load(&filename).unwrap(), Catalog::builtin());

        std::fs::write(&filename, "[[1, 2, 3]]").unwrap();

        match Catalog::load(&filename) {
            Err(Error::Json(_)) => (),
            other => panic!("unexpected result {:?}", other),
        }

        std::fs::write(
            &filename,
            "[[1, 5, 4, 8, 9, 13, 14, 10, 6, 2, 11, 7]]",
        ).unwrap();

        assert_eq!(
            &Catalog::load(&filename).unwrap_err().to_string(),
            "path 0: positions 2 and 11 are not adjacent",
        );
    }
}
