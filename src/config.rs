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

//! Tunable settings for the tools. Every field has a default so a
//! config file only needs to mention the values it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// A puzzle needs at least this many common words to be accepted
    pub min_cornerstone_words: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            min_cornerstone_words: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_cornerstone_words: usize,
    pub max_cornerstone_words: usize,
    pub min_total_words: usize,
    pub max_total_words: usize,
    pub require_definitions: bool,
    pub require_keystone_word: bool,
    pub min_definition_quality: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_cornerstone_words: 20,
            max_cornerstone_words: 100,
            min_total_words: 50,
            max_total_words: 300,
            require_definitions: true,
            require_keystone_word: true,
            min_definition_quality: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub population_size: usize,
    pub generations: usize,
    pub top_n: usize,
    pub mutation_rate: f64,
    /// Fixed seed for reproducible runs. A random one is used if unset.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            top_n: 10,
            mutation_rate: 0.1,
            seed: None,
        }
    }
}

/// All of the settings as they appear in a config file, with one
/// section per tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub build: BuildConfig,
    pub validation: ValidationConfig,
    pub optimizer: OptimizerConfig,
}

impl Config {
    pub fn from_json(s: &str) -> Result<Config, Error> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(filename: P) -> Result<Config, Error> {
        Config::from_json(&std::fs::read_to_string(filename)?)
    }

    /// Loads the file if one was given, otherwise returns the defaults
    pub fn load_or_default<P: AsRef<Path>>(
        filename: Option<P>,
    ) -> Result<Config, Error> {
        match filename {
            Some(filename) => Config::load(filename),
            None => Ok(Config::default()),
        }
    }
}
