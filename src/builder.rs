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

//! Turning a keystone word into a puzzle by trying it along every
//! path in the catalog.

use std::collections::HashSet;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use super::catalog::{Catalog, Path};
use super::definitions::DefinitionSource;
use super::dictionary::Dictionary;
use super::grid::{Grid, N_ACTIVE};
use super::puzzle::{Puzzle, WordKind};
use super::search;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("keystone “{word}” has {length} letters but it needs 12")]
    WrongLength { word: String, length: usize },
    #[error("keystone “{0}” can only contain the uppercase letters A to Z")]
    InvalidCharacters(String),
    #[error("keystone “{0}” is not in the dictionary")]
    NotInDictionary(String),
}

/// The result of laying the keystone along one path
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path_index: usize,
    pub grid: Grid,
    pub words: Vec<(String, WordKind)>,
    pub cornerstone_count: usize,
}

impl Candidate {
    // Higher cornerstone count wins, then the earlier path
    fn is_better_than(&self, other: &Candidate) -> bool {
        self.cornerstone_count > other.cornerstone_count
            || (self.cornerstone_count == other.cornerstone_count
                && self.path_index < other.path_index)
    }
}

/// What was left of a puzzle after dropping the words that have no
/// definition.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    /// `None` if too few cornerstone words survived
    pub puzzle: Option<Puzzle>,
    pub removed: Vec<String>,
}

pub fn validate_keystone(
    keystone: &str,
    dictionary: &Dictionary,
) -> Result<(), BuildError> {
    let length = keystone.chars().count();

    if length != N_ACTIVE {
        return Err(BuildError::WrongLength {
            word: keystone.to_string(),
            length,
        });
    }

    if !keystone.chars().all(|ch| ch.is_ascii_uppercase()) {
        return Err(BuildError::InvalidCharacters(keystone.to_string()));
    }

    if !dictionary.contains(keystone) {
        return Err(BuildError::NotInDictionary(keystone.to_string()));
    }

    Ok(())
}

pub fn evaluate_path(
    keystone: &str,
    path_index: usize,
    path: &Path,
    dictionary: &Dictionary,
    common_words: &HashSet<String>,
) -> Candidate {
    let grid = Grid::from_path(keystone, path);

    let words = search::search_words(&grid, dictionary)
        .into_iter()
        .map(|word| {
            let kind = WordKind::classify(&word, common_words);
            (word, kind)
        })
        .collect::<Vec<_>>();

    let cornerstone_count = words.iter()
        .filter(|(_, kind)| *kind == WordKind::Cornerstone)
        .count();

    debug!(
        "{} on path {}: {} cornerstone words out of {}",
        keystone,
        path_index,
        cornerstone_count,
        words.len(),
    );

    Candidate { path_index, grid, words, cornerstone_count }
}

/// Tries the keystone along every path in the catalog and returns the
/// puzzle with the most cornerstone words. Ties go to the path that
/// comes first in the catalog. Returns `None` if no path gives at
/// least `min_cornerstone_words`.
pub fn build_puzzle(
    keystone: &str,
    catalog: &Catalog,
    dictionary: &Dictionary,
    common_words: &HashSet<String>,
    min_cornerstone_words: usize,
) -> Result<Option<Puzzle>, BuildError> {
    validate_keystone(keystone, dictionary)?;

    let best = catalog.paths()
        .par_iter()
        .enumerate()
        .map(|(index, path)| {
            evaluate_path(keystone, index, path, dictionary, common_words)
        })
        .filter(|candidate| {
            candidate.cornerstone_count >= min_cornerstone_words
        })
        .reduce_with(|a, b| if b.is_better_than(&a) { b } else { a });

    let Some(best) = best
    else {
        info!(
            "{}: no path gives at least {} cornerstone words",
            keystone,
            min_cornerstone_words,
        );
        return Ok(None);
    };

    info!(
        "{}: chose path {} with {} cornerstone words",
        keystone,
        best.path_index,
        best.cornerstone_count,
    );

    Ok(Some(Puzzle::new(
        keystone.to_string(),
        Some(best.path_index),
        best.grid,
        best.words,
    )))
}

/// Builds a puzzle for each keystone in parallel. The results are in
/// the same order as the keystones.
pub fn build_all<S>(
    keystones: &[S],
    catalog: &Catalog,
    dictionary: &Dictionary,
    common_words: &HashSet<String>,
    min_cornerstone_words: usize,
) -> Vec<Result<Option<Puzzle>, BuildError>>
    where S: AsRef<str> + Sync
{
    keystones.par_iter()
        .map(|keystone| {
            build_puzzle(
                keystone.as_ref(),
                catalog,
                dictionary,
                common_words,
                min_cornerstone_words,
            )
        })
        .collect()
}

/// Removes every word that the source can’t define. If that leaves
/// fewer than `min_cornerstone_words` cornerstone words the puzzle is
/// thrown away. The removed words are returned so that the caller can
/// leave them out of the dictionary next time.
pub fn clean_puzzle<S>(
    mut puzzle: Puzzle,
    source: &S,
    min_cornerstone_words: usize,
) -> CleanOutcome
    where S: DefinitionSource + ?Sized
{
    let mut removed = Vec::new();

    for word in puzzle.all_words.iter() {
        if source.resolve(word).is_none() {
            warn!("{}: removing “{}” which has no definition",
                  puzzle.keystone_word,
                  word);
            removed.push(word.clone());
        }
    }

    if removed.is_empty() {
        return CleanOutcome { puzzle: Some(puzzle), removed };
    }

    let removed_set = removed.iter()
        .map(String::as_str)
        .collect::<HashSet<&str>>();

    puzzle.retain_words(|word| !removed_set.contains(word));

    if puzzle.cornerstone_count < min_cornerstone_words {
        info!(
            "{}: only {} cornerstone words left after cleaning",
            puzzle.keystone_word,
            puzzle.cornerstone_count,
        );

        return CleanOutcome { puzzle: None, removed };
    }

    CleanOutcome { puzzle: Some(puzzle), removed }
}

/// Every word in the dictionary that could be used as a keystone, in
/// alphabetical order
pub fn keystone_candidates(dictionary: &Dictionary) -> Vec<String> {
    dictionary.words()
        .into_iter()
        .filter(|word| word.len() == N_ACTIVE)
        .collect()
}
