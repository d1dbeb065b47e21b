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

//! Checks a finished puzzle before it is handed to the game.
//!
//! Problems are split into errors, which mean the puzzle can’t be
//! used, and warnings, which only mean someone should take a look.
//! Warnings are expected when the dictionary has been edited since
//! the puzzle was built.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use serde::Serialize;
use thiserror::Error;
use super::adjacency;
use super::catalog::Catalog;
use super::config::ValidationConfig;
use super::definitions::{
    BasicQualityPolicy,
    DefinitionQualityPolicy,
    DefinitionSource,
};
use super::dictionary::Dictionary;
use super::grid::{self, N_ACTIVE, N_CELLS, CORNERS, ACTIVE_POSITIONS};
use super::puzzle::Puzzle;
use super::search;

const SHORT_WORD_LENGTH: usize = 4;
const LONG_WORD_LENGTH: usize = 10;
const MIN_UNIQUE_LETTERS: usize = 8;
const MIN_WORD_LENGTHS: usize = 4;
const MAX_SHORT_WORD_FRACTION: f64 = 0.6;
const MAX_LONG_WORD_FRACTION: f64 = 0.3;

const IDEAL_CORNERSTONE_RATIO: f64 = 0.6;
const IDEAL_MEAN_LENGTH: f64 = 6.5;

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "detail")]
pub enum Problem {
    #[error("keystone “{0}” is not 12 uppercase letters")]
    BadKeystone(String),
    #[error("totalWords is {stored} but {actual} words are listed")]
    TotalMismatch { stored: usize, actual: usize },
    #[error("cornerstoneCount is {stored} but {actual} cornerstone words are \
             listed")]
    CornerstoneCountMismatch { stored: usize, actual: usize },
    #[error("cornerstone word “{0}” is not in the list of all words")]
    CornerstoneNotListed(String),
    #[error("words listed more than once: {}", .0.join(", "))]
    DuplicateWords(Vec<String>),
    #[error("only {count} cornerstone words but at least {min} are needed")]
    TooFewCornerstones { count: usize, min: usize },
    #[error("{count} cornerstone words is more than {max}")]
    TooManyCornerstones { count: usize, max: usize },
    #[error("only {count} words but at least {min} are needed")]
    TooFewWords { count: usize, min: usize },
    #[error("{count} words is more than {max}")]
    TooManyWords { count: usize, max: usize },
    #[error("position {0} has no letter")]
    EmptyCell(usize),
    #[error("position {pos} has “{letter}” which is not a letter from A to Z")]
    BadLetter { pos: usize, letter: char },
    #[error("corner {0} has a letter")]
    FilledCorner(usize),
    #[error("path {0} is not in the catalog")]
    UnknownPath(usize),
    #[error("path {index} spells “{spelled}” but the keystone is \
             “{keystone}”")]
    PathMismatch { index: usize, spelled: String, keystone: String },
    #[error("path {index} steps between {a} and {b} which are not adjacent")]
    PathNotAdjacent { index: usize, a: usize, b: usize },
    #[error("position {0} can’t be reached from the other letters")]
    Disconnected(usize),
    #[error("“{0}” is listed but can’t be found in the grid")]
    WordNotFound(String),
    #[error("words found in the grid but not listed: {}", .0.join(", "))]
    UnlistedWords(Vec<String>),
    #[error("cornerstone words that are no longer common: {}", .0.join(", "))]
    NoLongerCommon(Vec<String>),
    #[error("words without a definition: {}", .0.join(", "))]
    MissingDefinitions(Vec<String>),
    #[error("words with a poor definition: {}", .0.join(", "))]
    PoorDefinitions(Vec<String>),
    #[error("{:.0}% of the words are cornerstone words", .0 * 100.0)]
    ExtremeRatio(f64),
    #[error("the mean word length is {0:.1}")]
    ExtremeMeanLength(f64),
    #[error("the keystone only has {0} different letters")]
    FewUniqueLetters(usize),
    #[error("the words only have {0} different lengths")]
    FewWordLengths(usize),
    #[error("{:.0}% of the words are 4 letters long", .0 * 100.0)]
    TooManyShortWords(f64),
    #[error("{:.0}% of the words are 10 letters or longer", .0 * 100.0)]
    TooManyLongWords(f64),
    #[error("the keystone “{0}” is not in the list of words")]
    KeystoneNotListed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_words: usize,
    pub cornerstone_count: usize,
    pub cornerstone_ratio: f64,
    pub mean_word_length: f64,
    pub difficulty: Difficulty,
    pub balance_score: f64,
    pub definition_coverage: f64,
    pub match_rate: f64,
    pub unique_letters: usize,
    pub word_lengths: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<Problem>,
    pub warnings: Vec<Problem>,
    pub metrics: Metrics,
    pub quality_score: f64,
}

pub fn classify_difficulty(ratio: f64, mean_length: f64) -> Difficulty {
    if ratio > 0.7 && mean_length < 6.0 {
        Difficulty::Easy
    } else if ratio > 0.5 && mean_length < 7.0 {
        Difficulty::Medium
    } else if ratio > 0.3 {
        Difficulty::Hard
    } else {
        Difficulty::Expert
    }
}

/// 100 for a puzzle with the ideal share of cornerstone words and the
/// ideal mean word length, going down as either drifts away.
pub fn balance_score(ratio: f64, mean_length: f64) -> f64 {
    let ratio_error = (ratio - IDEAL_CORNERSTONE_RATIO).abs()
        / IDEAL_CORNERSTONE_RATIO;
    let length_error = (mean_length - IDEAL_MEAN_LENGTH).abs()
        / IDEAL_MEAN_LENGTH;

    (100.0 - 100.0 * (ratio_error + length_error) / 2.0).clamp(0.0, 100.0)
}

pub fn quality_score(
    n_errors: usize,
    n_warnings: usize,
    metrics: &Metrics,
) -> f64 {
    let mut score = 100.0
        - 20.0 * n_errors as f64
        - 5.0 * n_warnings as f64;

    if metrics.balance_score > 80.0 {
        score += 10.0;
    }
    if metrics.definition_coverage > 0.95 {
        score += 5.0;
    }
    if metrics.match_rate > 0.98 {
        score += 5.0;
    }

    score.clamp(0.0, 100.0)
}

// Collects the problems and metrics while the checks run
struct Checker<'p> {
    puzzle: &'p Puzzle,
    errors: Vec<Problem>,
    warnings: Vec<Problem>,
}

impl<'p> Checker<'p> {
    fn error(&mut self, problem: Problem) {
        self.errors.push(problem);
    }

    fn warning(&mut self, problem: Problem) {
        self.warnings.push(problem);
    }

    fn error_or_warning(&mut self, is_error: bool, problem: Problem) {
        if is_error {
            self.error(problem);
        } else {
            self.warning(problem);
        }
    }
}

/// Everything a puzzle is checked against. The catalog defaults to
/// the built-in one and the definition quality to
/// [`BasicQualityPolicy`].
pub struct Validator<'a> {
    dictionary: &'a Dictionary,
    common_words: &'a HashSet<String>,
    definitions: &'a (dyn DefinitionSource + Sync),
    catalog: Catalog,
    quality_policy: Box<dyn DefinitionQualityPolicy + Send + Sync>,
    config: ValidationConfig,
}

impl<'a> Validator<'a> {
    pub fn new(
        dictionary: &'a Dictionary,
        common_words: &'a HashSet<String>,
        definitions: &'a (dyn DefinitionSource + Sync),
        config: ValidationConfig,
    ) -> Validator<'a> {
        Validator {
            dictionary,
            common_words,
            definitions,
            catalog: Catalog::builtin(),
            quality_policy: Box::new(BasicQualityPolicy::default()),
            config,
        }
    }

    pub fn with_catalog(self, catalog: Catalog) -> Validator<'a> {
        Validator { catalog, ..self }
    }

    pub fn with_quality_policy<P>(self, policy: P) -> Validator<'a>
        where P: DefinitionQualityPolicy + Send + Sync + 'static
    {
        Validator { quality_policy: Box::new(policy), ..self }
    }

    pub fn validate(&self, puzzle: &Puzzle) -> ValidationReport {
        let mut checker = Checker {
            puzzle,
            errors: Vec::new(),
            warnings: Vec::new(),
        };

        self.check_structure(&mut checker);
        self.check_grid(&mut checker);
        check_connectivity(&mut checker);
        let match_rate = self.check_discovery(&mut checker);
        let definition_coverage = self.check_definitions(&mut checker);
        let (ratio, mean_length) = check_balance(&mut checker);
        let (unique_letters, word_lengths) =
            self.check_solvability(&mut checker);

        let metrics = Metrics {
            total_words: puzzle.all_words.len(),
            cornerstone_count: puzzle.cornerstone_words.len(),
            cornerstone_ratio: ratio,
            mean_word_length: mean_length,
            difficulty: classify_difficulty(ratio, mean_length),
            balance_score: balance_score(ratio, mean_length),
            definition_coverage,
            match_rate,
            unique_letters,
            word_lengths,
        };

        let quality_score = quality_score(
            checker.errors.len(),
            checker.warnings.len(),
            &metrics,
        );

        ValidationReport {
            is_valid: checker.errors.is_empty(),
            errors: checker.errors,
            warnings: checker.warnings,
            metrics,
            quality_score,
        }
    }

    fn check_structure(&self, checker: &mut Checker) {
        let puzzle = checker.puzzle;
        let keystone = &puzzle.keystone_word;

        if keystone.chars().count() != N_ACTIVE
            || !keystone.chars().all(|ch| ch.is_ascii_uppercase())
        {
            checker.error(Problem::BadKeystone(keystone.clone()));
        }

        if puzzle.total_words != puzzle.all_words.len() {
            checker.error(Problem::TotalMismatch {
                stored: puzzle.total_words,
                actual: puzzle.all_words.len(),
            });
        }

        if puzzle.cornerstone_count != puzzle.cornerstone_words.len() {
            checker.error(Problem::CornerstoneCountMismatch {
                stored: puzzle.cornerstone_count,
                actual: puzzle.cornerstone_words.len(),
            });
        }

        let mut duplicates = duplicate_words(&puzzle.all_words)
            .collect::<Vec<_>>();

        for word in duplicate_words(&puzzle.cornerstone_words) {
            if !duplicates.contains(&word) {
                duplicates.push(word);
            }
        }

        if !duplicates.is_empty() {
            checker.error(Problem::DuplicateWords(duplicates));
        }

        let all_words = puzzle.all_words.iter().collect::<HashSet<_>>();

        for word in puzzle.cornerstone_words.iter() {
            if !all_words.contains(word) {
                checker.error(Problem::CornerstoneNotListed(word.clone()));
            }
        }

        let n_cornerstones = puzzle.cornerstone_words.len();

        if n_cornerstones < self.config.min_cornerstone_words {
            checker.error(Problem::TooFewCornerstones {
                count: n_cornerstones,
                min: self.config.min_cornerstone_words,
            });
        } else if n_cornerstones > self.config.max_cornerstone_words {
            checker.warning(Problem::TooManyCornerstones {
                count: n_cornerstones,
                max: self.config.max_cornerstone_words,
            });
        }

        let n_words = puzzle.all_words.len();

        if n_words < self.config.min_total_words {
            checker.error(Problem::TooFewWords {
                count: n_words,
                min: self.config.min_total_words,
            });
        } else if n_words > self.config.max_total_words {
            checker.warning(Problem::TooManyWords {
                count: n_words,
                max: self.config.max_total_words,
            });
        }
    }

    fn check_grid(&self, checker: &mut Checker) {
        let puzzle = checker.puzzle;
        let grid = &puzzle.grid;

        for &pos in ACTIVE_POSITIONS.iter() {
            match grid.at(pos) {
                None => checker.error(Problem::EmptyCell(pos)),
                Some(letter) if !letter.is_ascii_uppercase() => {
                    checker.error(Problem::BadLetter { pos, letter });
                },
                Some(_) => (),
            }
        }

        for &pos in CORNERS.iter() {
            if grid.at(pos).is_some() {
                checker.error(Problem::FilledCorner(pos));
            }
        }

        let Some(index) = puzzle.path_index
        else {
            return;
        };

        let Some(path) = self.catalog.get(index)
        else {
            checker.error(Problem::UnknownPath(index));
            return;
        };

        let spelled = grid.spell(path);

        if spelled != puzzle.keystone_word {
            checker.error(Problem::PathMismatch {
                index,
                spelled,
                keystone: puzzle.keystone_word.clone(),
            });
        }

        for pair in path.windows(2) {
            if !adjacency::is_adjacent(pair[0], pair[1]) {
                checker.error(Problem::PathNotAdjacent {
                    index,
                    a: pair[0],
                    b: pair[1],
                });
            }
        }
    }

    // Returns the fraction of the listed words that could be found
    fn check_discovery(&self, checker: &mut Checker) -> f64 {
        let puzzle = checker.puzzle;
        let found = search::search_words(&puzzle.grid, self.dictionary);

        let mut n_reproduced = 0;

        for word in puzzle.all_words.iter() {
            if found.contains(word) {
                n_reproduced += 1;
            } else {
                checker.error(Problem::WordNotFound(word.clone()));
            }
        }

        let listed = puzzle.all_words.iter()
            .map(String::as_str)
            .collect::<HashSet<&str>>();

        let mut unlisted = found.iter()
            .filter(|word| !listed.contains(word.as_str()))
            .cloned()
            .collect::<Vec<_>>();

        if !unlisted.is_empty() {
            unlisted.sort_unstable();
            checker.warning(Problem::UnlistedWords(unlisted));
        }

        let uncommon = puzzle.cornerstone_words.iter()
            .filter(|word| !self.common_words.contains(word.as_str()))
            .cloned()
            .collect::<Vec<_>>();

        if !uncommon.is_empty() {
            checker.warning(Problem::NoLongerCommon(uncommon));
        }

        fraction(n_reproduced, puzzle.all_words.len())
    }

    // Returns the fraction of words that have a definition
    fn check_definitions(&self, checker: &mut Checker) -> f64 {
        let puzzle = checker.puzzle;
        let mut missing = Vec::new();
        let mut poor = Vec::new();

        for word in puzzle.all_words.iter() {
            match self.definitions.resolve(word) {
                Some(text) if !text.trim().is_empty() => {
                    let score = self.quality_policy.score(word, &text);

                    if score < self.config.min_definition_quality {
                        poor.push(word.clone());
                    }
                },
                _ => missing.push(word.clone()),
            }
        }

        let n_words = puzzle.all_words.len();
        let coverage = fraction(n_words - missing.len(), n_words);

        if !missing.is_empty() {
            checker.error_or_warning(
                self.config.require_definitions,
                Problem::MissingDefinitions(missing),
            );
        }

        if !poor.is_empty() {
            checker.warning(Problem::PoorDefinitions(poor));
        }

        coverage
    }

    // Returns the number of different letters in the keystone and the
    // number of different word lengths
    fn check_solvability(&self, checker: &mut Checker) -> (usize, usize) {
        let puzzle = checker.puzzle;

        let unique_letters = puzzle.keystone_word.chars()
            .collect::<HashSet<char>>()
            .len();

        if unique_letters < MIN_UNIQUE_LETTERS {
            checker.warning(Problem::FewUniqueLetters(unique_letters));
        }

        let lengths = puzzle.all_words.iter()
            .map(|word| word.chars().count())
            .collect::<Vec<_>>();
        let word_lengths = lengths.iter().collect::<HashSet<_>>().len();

        if !lengths.is_empty() {
            if word_lengths < MIN_WORD_LENGTHS {
                checker.warning(Problem::FewWordLengths(word_lengths));
            }

            let short = fraction(
                lengths.iter().filter(|&&l| l == SHORT_WORD_LENGTH).count(),
                lengths.len(),
            );

            if short > MAX_SHORT_WORD_FRACTION {
                checker.warning(Problem::TooManyShortWords(short));
            }

            let long = fraction(
                lengths.iter().filter(|&&l| l >= LONG_WORD_LENGTH).count(),
                lengths.len(),
            );

            if long > MAX_LONG_WORD_FRACTION {
                checker.warning(Problem::TooManyLongWords(long));
            }
        }

        if !puzzle.all_words.contains(&puzzle.keystone_word) {
            checker.error_or_warning(
                self.config.require_keystone_word,
                Problem::KeystoneNotListed(puzzle.keystone_word.clone()),
            );
        }

        (unique_letters, word_lengths)
    }
}

fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

// Each repeated word once, in the order the repeats appear
fn duplicate_words(words: &[String]) -> impl Iterator<Item = String> + '_ {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    words.iter().filter_map(move |word| {
        if !seen.insert(word.as_str()) && reported.insert(word.as_str()) {
            Some(word.clone())
        } else {
            None
        }
    })
}

// Breadth-first search over the filled cells
fn check_connectivity(checker: &mut Checker) {
    let grid = &checker.puzzle.grid;

    let Some(start) = grid.filled().find(|&pos| grid::is_active(pos))
    else {
        return;
    };

    let mut reached = [false; N_CELLS];
    let mut queue = VecDeque::from([start]);

    reached[start] = true;

    while let Some(pos) = queue.pop_front() {
        for &next in adjacency::neighbours(pos).iter() {
            if !reached[next] && grid.at(next).is_some() {
                reached[next] = true;
                queue.push_back(next);
            }
        }
    }

    let unreached = grid.filled()
        .filter(|&pos| grid::is_active(pos) && !reached[pos])
        .collect::<Vec<_>>();

    for pos in unreached {
        checker.error(Problem::Disconnected(pos));
    }
}

// Returns the cornerstone ratio and the mean word length
fn check_balance(checker: &mut Checker) -> (f64, f64) {
    let puzzle = checker.puzzle;
    let n_words = puzzle.all_words.len();

    if n_words == 0 {
        return (0.0, 0.0);
    }

    let ratio = fraction(puzzle.cornerstone_words.len(), n_words);
    let mean_length = puzzle.all_words.iter()
        .map(|word| word.chars().count())
        .sum::<usize>() as f64
        / n_words as f64;

    if !(0.2..=0.8).contains(&ratio) {
        checker.warning(Problem::ExtremeRatio(ratio));
    }

    if !(4.5..=8.0).contains(&mean_length) {
        checker.warning(Problem::ExtremeMeanLength(mean_length));
    }

    (ratio, mean_length)
}

/// Checks a puzzle against the built-in catalog with the basic
/// definition quality policy
pub fn validate_puzzle(
    puzzle: &Puzzle,
    dictionary: &Dictionary,
    common_words: &HashSet<String>,
    definitions: &(dyn DefinitionSource + Sync),
    config: &ValidationConfig,
) -> ValidationReport {
    Validator::new(dictionary, common_words, definitions, config.clone())
        .validate(puzzle)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::builder;
    use crate::definitions::Definitions;
    use crate::grid::Grid;

    static WORDS: [&str; 48] = [
        "CORE", "CORN", "CORNS", "CORNER", "CORNERS", "STONE", "STONES",
        "NOTE", "NOTES", "TONE", "TONES", "SNORE", "SNORT", "STERN",
        "STORE", "STORES", "SONNET", "TENOR", "TENORS", "RESTORE",
        "CENSOR", "SCORN", "SCORE", "CRONE", "NEST", "NESTS", "REST",
        "RENT", "RENTS", "TERN", "TERNS", "ONES", "ROSE", "ROSES", "NOSE",
        "NOSES", "CORNERSTONES", "CORNERSTONE", "ONSET", "SNOT", "SNOTS",
        "TORN", "SORE", "SORT", "TRON", "ERNE", "ROTE", "ROTES",
    ];

    struct Fixture {
        dictionary: Dictionary,
        common_words: HashSet<String>,
        definitions: Definitions,
        config: ValidationConfig,
    }

    impl Fixture {
        fn new() -> Fixture {
            let mut definitions = Definitions::new();

            for word in WORDS.iter() {
                definitions.insert(word, "A perfectly reasonable definition");
            }

            Fixture {
                dictionary: Dictionary::from_words(WORDS),
                common_words: WORDS.iter().map(|w| w.to_string()).collect(),
                definitions,
                config: ValidationConfig {
                    min_total_words: 20,
                    ..ValidationConfig::default()
                },
            }
        }

        fn build(&self) -> Puzzle {
            builder::build_puzzle(
                "CORNERSTONES",
                &Catalog::builtin(),
                &self.dictionary,
                &self.common_words,
                20,
            ).unwrap().unwrap()
        }

        fn validate(&self, puzzle: &Puzzle) -> ValidationReport {
            validate_puzzle(
                puzzle,
                &self.dictionary,
                &self.common_words,
                &self.definitions,
                &self.config,
            )
        }
    }

    #[test]
    fn built_puzzle_is_valid() {
        let fixture = Fixture::new();
        let puzzle = fixture.build();
        let report = fixture.validate(&puzzle);

        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.errors.is_empty());
        assert_eq!(
            &report.warnings,
            &[Problem::ExtremeRatio(1.0), Problem::FewUniqueLetters(7)],
        );
        assert_eq!(report.metrics.total_words, 29);
        assert_eq!(report.metrics.difficulty, Difficulty::Easy);
        assert_eq!(report.metrics.match_rate, 1.0);
        assert_eq!(report.metrics.definition_coverage, 1.0);
        assert_eq!(report.metrics.word_lengths, 6);
        // Two warnings and both bonuses but the balance is too low
        assert_eq!(report.quality_score, 100.0);
    }

    #[test]
    fn missing_definitions() {
        let mut fixture = Fixture::new();
        let puzzle = fixture.build();

        fixture.definitions = Definitions::new();
        fixture.definitions.insert("CORE", "The central part of a fruit");

        let report = fixture.validate(&puzzle);

        assert!(!report.is_valid);
        assert!(matches!(
            &report.errors[..],
            [Problem::MissingDefinitions(words)] if words.len() == 28,
        ));
        assert!(report.metrics.definition_coverage < 0.05);

        fixture.config.require_definitions = false;
        let report = fixture.validate(&puzzle);

        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 3);
        // 100 - 3 × 5 + 5 for finding every word
        assert_eq!(report.quality_score, 90.0);
    }

    #[test]
    fn poor_definitions() {
        let mut fixture = Fixture::new();
        let puzzle = fixture.build();

        fixture.definitions.insert("TRON", "tron");
        fixture.definitions.insert("SNOT", "Snot");
        // Short but at least it doesn’t repeat the word
        fixture.definitions.insert("NEST", "Bird home");

        let report = fixture.validate(&puzzle);

        assert!(report.is_valid);
        assert!(report.warnings.contains(&Problem::PoorDefinitions(vec![
            "SNOT".to_string(),
            "TRON".to_string(),
        ])));
    }

    #[test]
    fn custom_policy() {
        struct Wordy;

        impl DefinitionQualityPolicy for Wordy {
            fn score(&self, _word: &str, text: &str) -> f64 {
                if text.len() > 40 { 1.0 } else { 0.0 }
            }
        }

        let fixture = Fixture::new();
        let puzzle = fixture.build();

        let validator = Validator::new(
            &fixture.dictionary,
            &fixture.common_words,
            &fixture.definitions,
            fixture.config.clone(),
        ).with_quality_policy(Wordy);

        let report = validator.validate(&puzzle);

        assert!(report.is_valid);
        assert!(report.warnings.contains(
            &Problem::PoorDefinitions(puzzle.all_words.clone())
        ));

        // A catalog without path 9 can’t check the grid
        let catalog = Catalog::new(
            Catalog::builtin().paths()[0..9].to_vec()
        ).unwrap();

        let report = validator.with_catalog(catalog).validate(&puzzle);

        assert_eq!(&report.errors, &[Problem::UnknownPath(9)]);
    }

    #[test]
    fn path_mismatch() {
        let fixture = Fixture::new();
        let mut puzzle = fixture.build();

        // The grid was built along path 9
        puzzle.path_index = Some(0);

        let report = fixture.validate(&puzzle);

        assert!(!report.is_valid);
        assert_eq!(
            &report.errors,
            &[Problem::PathMismatch {
                index: 0,
                spelled: "ORNESRESTCON".to_string(),
                keystone: "CORNERSTONES".to_string(),
            }],
        );
        assert_eq!(
            &report.errors[0].to_string(),
            "path 0 spells “ORNESRESTCON” but the keystone is “CORNERSTONES”",
        );

        puzzle.path_index = Some(10);

        assert_eq!(
            &fixture.validate(&puzzle).errors,
            &[Problem::UnknownPath(10)],
        );

        puzzle.path_index = None;

        assert!(fixture.validate(&puzzle).is_valid);
    }

    #[test]
    fn counts() {
        let fixture = Fixture::new();
        let mut puzzle = fixture.build();

        puzzle.total_words = 30;
        puzzle.cornerstone_count = 3;
        puzzle.cornerstone_words.push("ZEBRA".to_string());

        let report = fixture.validate(&puzzle);

        assert_eq!(
            &report.errors,
            &[
                Problem::TotalMismatch { stored: 30, actual: 29 },
                Problem::CornerstoneCountMismatch { stored: 3, actual: 30 },
                Problem::CornerstoneNotListed("ZEBRA".to_string()),
            ],
        );
        // ZEBRA isn’t in the common words either
        assert!(report.warnings.contains(
            &Problem::NoLongerCommon(vec!["ZEBRA".to_string()])
        ));
    }

    #[test]
    fn repeated_words() {
        let fixture = Fixture::new();
        let mut puzzle = fixture.build();
        let word = puzzle.all_words[0].clone();

        // The counts agree with the lists so only the repeat is wrong
        puzzle.all_words.push(word.clone());
        puzzle.cornerstone_words.push(word.clone());
        puzzle.total_words += 1;
        puzzle.cornerstone_count += 1;

        let report = fixture.validate(&puzzle);

        assert!(!report.is_valid);
        assert_eq!(&report.errors, &[Problem::DuplicateWords(vec![word])]);
        assert_eq!(
            &report.errors[0].to_string(),
            "words listed more than once: CORE",
        );
    }

    #[test]
    fn thresholds() {
        let mut fixture = Fixture::new();
        let puzzle = fixture.build();

        fixture.config.min_cornerstone_words = 30;
        fixture.config.min_total_words = 30;

        assert_eq!(
            &fixture.validate(&puzzle).errors,
            &[
                Problem::TooFewCornerstones { count: 29, min: 30 },
                Problem::TooFewWords { count: 29, min: 30 },
            ],
        );

        fixture.config = ValidationConfig {
            min_cornerstone_words: 1,
            max_cornerstone_words: 28,
            min_total_words: 1,
            max_total_words: 28,
            ..ValidationConfig::default()
        };

        let report = fixture.validate(&puzzle);

        assert!(report.is_valid);
        assert!(report.warnings.contains(
            &Problem::TooManyCornerstones { count: 29, max: 28 }
        ));
        assert!(report.warnings.contains(
            &Problem::TooManyWords { count: 29, max: 28 }
        ));
    }

    #[test]
    fn drift() {
        let mut fixture = Fixture::new();
        let puzzle = fixture.build();

        // A word added to the dictionary after the puzzle was built
        fixture.dictionary = Dictionary::from_words(
            WORDS.iter().copied().chain(["ONSETS", "CORES"])
        );
        fixture.common_words.remove("TRON");

        let report = fixture.validate(&puzzle);

        assert!(report.is_valid);
        assert!(report.warnings.contains(
            &Problem::UnlistedWords(vec!["CORES".to_string()])
        ));
        assert!(report.warnings.contains(
            &Problem::NoLongerCommon(vec!["TRON".to_string()])
        ));

        // A word taken out of the dictionary
        fixture.dictionary = fixture.dictionary.without(["SNORT"]);

        let report = fixture.validate(&puzzle);

        assert_eq!(
            &report.errors,
            &[Problem::WordNotFound("SNORT".to_string())],
        );
        assert!((report.metrics.match_rate - 28.0 / 29.0).abs() < 1e-9);
    }

    #[test]
    fn unlisted_words() {
        let fixture = Fixture::new();
        let mut puzzle = fixture.build();

        puzzle.retain_words(|word| word != "TRON" && word != "RENT");

        let report = fixture.validate(&puzzle);

        assert!(report.is_valid);
        assert!(report.warnings.contains(&Problem::UnlistedWords(vec![
            "RENT".to_string(),
            "TRON".to_string(),
        ])));
    }

    #[test]
    fn broken_grid() {
        let fixture = Fixture::new();
        let mut puzzle = fixture.build();

        // Take the letters out of the middle of the cross so that the
        // top arm is cut off
        for pos in [4, 5, 6, 7] {
            puzzle.grid.set(pos, None);
        }
        puzzle.grid.set(0, Some('X'));
        puzzle.grid.set(9, Some('é'));
        puzzle.path_index = None;

        let report = fixture.validate(&puzzle);

        for problem in [
            Problem::EmptyCell(4),
            Problem::EmptyCell(7),
            Problem::FilledCorner(0),
            Problem::BadLetter { pos: 9, letter: 'é' },
        ] {
            assert!(report.errors.contains(&problem), "{:?}", problem);
        }

        // The search starts from the top arm so everything below it is
        // unreachable
        assert!(report.errors.contains(&Problem::Disconnected(8)));
        assert!(report.errors.contains(&Problem::Disconnected(14)));
        assert!(!report.errors.contains(&Problem::Disconnected(1)));
        assert!(!report.errors.contains(&Problem::Disconnected(2)));
    }

    #[test]
    fn keystone() {
        let mut fixture = Fixture::new();
        let mut puzzle = fixture.build();

        puzzle.keystone_word = "Cornerstones".to_string();
        puzzle.path_index = None;

        let report = fixture.validate(&puzzle);

        assert!(report.errors.contains(
            &Problem::BadKeystone("Cornerstones".to_string())
        ));
        assert!(report.errors.contains(
            &Problem::KeystoneNotListed("Cornerstones".to_string())
        ));

        fixture.config.require_keystone_word = false;

        let report = fixture.validate(&puzzle);

        assert_eq!(
            &report.errors,
            &[Problem::BadKeystone("Cornerstones".to_string())],
        );
        assert!(report.warnings.contains(
            &Problem::KeystoneNotListed("Cornerstones".to_string())
        ));
    }

    #[test]
    fn difficulty() {
        assert_eq!(classify_difficulty(0.8, 5.0), Difficulty::Easy);
        assert_eq!(classify_difficulty(0.8, 6.0), Difficulty::Medium);
        assert_eq!(classify_difficulty(0.6, 6.9), Difficulty::Medium);
        assert_eq!(classify_difficulty(0.6, 7.0), Difficulty::Hard);
        assert_eq!(classify_difficulty(0.4, 5.0), Difficulty::Hard);
        assert_eq!(classify_difficulty(0.3, 5.0), Difficulty::Expert);
        assert_eq!(Difficulty::Expert.to_string(), "expert");
    }

    #[test]
    fn balance() {
        assert_eq!(balance_score(0.6, 6.5), 100.0);
        assert_eq!(balance_score(0.0, 0.0), 0.0);
        assert_eq!(balance_score(0.3, 6.5), 75.0);
        assert_eq!(balance_score(3.0, 20.0), 0.0);
    }

    #[test]
    fn small_grid() {
        let fixture = Fixture::new();
        let puzzle = Puzzle::new(
            "CORNERSTONES".to_string(),
            None,
            ".R..OE..........".parse::<Grid>().unwrap(),
            Vec::new(),
        );

        let report = fixture.validate(&puzzle);

        assert!(!report.is_valid);
        assert_eq!(report.metrics.total_words, 0);
        assert_eq!(report.metrics.match_rate, 0.0);
        assert_eq!(report.quality_score, 0.0);
        assert!(report.errors.contains(&Problem::EmptyCell(2)));
        assert!(!report.errors.iter().any(|problem| {
            matches!(problem, Problem::Disconnected(_))
        }));
    }

    #[test]
    fn report_json() {
        let fixture = Fixture::new();
        let mut puzzle = fixture.build();

        puzzle.path_index = Some(0);

        let json = serde_json::to_value(fixture.validate(&puzzle)).unwrap();

        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"][0]["kind"], "pathMismatch");
        assert_eq!(json["errors"][0]["detail"]["spelled"], "ORNESRESTCON");
        assert_eq!(json["metrics"]["difficulty"], "Easy");
    }
}
