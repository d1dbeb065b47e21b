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

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use super::grid::Grid;

/// Whether a word found in a grid is one that most players would
/// know. Only cornerstone words count towards finishing a puzzle.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Serialize, Deserialize)]
pub enum WordKind {
    Cornerstone,
    Ordinary,
}

impl WordKind {
    pub fn classify(word: &str, common_words: &HashSet<String>) -> WordKind {
        if common_words.contains(word) {
            WordKind::Cornerstone
        } else {
            WordKind::Ordinary
        }
    }
}

/// A finished puzzle as handed over to the game. The two word lists
/// are kept sorted and the counts always match them when the puzzle
/// is made with [`Puzzle::new`]. The fields are public so that a
/// puzzle read back from a file can be checked, even if someone has
/// edited it by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub keystone_word: String,
    pub path_index: Option<usize>,
    pub grid: Grid,
    pub all_words: Vec<String>,
    pub cornerstone_words: Vec<String>,
    pub total_words: usize,
    pub cornerstone_count: usize,
}

impl Puzzle {
    pub fn new<I>(
        keystone_word: String,
        path_index: Option<usize>,
        grid: Grid,
        words: I,
    ) -> Puzzle
        where I: IntoIterator<Item = (String, WordKind)>
    {
        let mut all_words = Vec::new();
        let mut cornerstone_words = Vec::new();

        for (word, kind) in words {
            if kind == WordKind::Cornerstone {
                cornerstone_words.push(word.clone());
            }

            all_words.push(word);
        }

        all_words.sort_unstable();
        all_words.dedup();
        cornerstone_words.sort_unstable();
        cornerstone_words.dedup();

        Puzzle {
            keystone_word,
            path_index,
            grid,
            total_words: all_words.len(),
            cornerstone_count: cornerstone_words.len(),
            all_words,
            cornerstone_words,
        }
    }

    pub fn word_kind(&self, word: &str) -> Option<WordKind> {
        // The lists of a puzzle read from a file might not be sorted
        if self.cornerstone_words.iter().any(|w| w == word) {
            Some(WordKind::Cornerstone)
        } else if self.all_words.iter().any(|w| w == word) {
            Some(WordKind::Ordinary)
        } else {
            None
        }
    }

    /// Every word along with its kind, in alphabetical order
    pub fn words(&self) -> impl Iterator<Item = (&str, WordKind)> + '_ {
        let cornerstones = self.cornerstone_words.iter()
            .map(String::as_str)
            .collect::<HashSet<&str>>();

        self.all_words.iter().map(move |word| {
            let kind = if cornerstones.contains(word.as_str()) {
                WordKind::Cornerstone
            } else {
                WordKind::Ordinary
            };

            (word.as_str(), kind)
        })
    }

    /// Removes every word for which `keep` returns false from both
    /// lists and updates the counts.
    pub fn retain_words<F>(&mut self, mut keep: F)
        where F: FnMut(&str) -> bool
    {
        self.all_words.retain(|word| keep(word));

        let remaining = self.all_words.iter()
            .map(String::as_str)
            .collect::<HashSet<&str>>();

        self.cornerstone_words.retain(|word| remaining.contains(word.as_str()));

        self.total_words = self.all_words.len();
        self.cornerstone_count = self.cornerstone_words.len();
    }
}
