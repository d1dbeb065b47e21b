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

//! Word definitions shown to the player after finding a word.

use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("line {0}: expected a word and a definition separated by a tab")]
    MissingTab(usize),
}

/// Anything that can look up the definition of a word. A lookup that
/// fails for any reason, including a network error, is reported as
/// `None`.
pub trait DefinitionSource {
    fn resolve(&self, word: &str) -> Option<String>;
}

impl<F> DefinitionSource for F
    where F: Fn(&str) -> Option<String>
{
    fn resolve(&self, word: &str) -> Option<String> {
        self(word)
    }
}

/// Judges how useful a definition is, from 0.0 for useless to 1.0.
pub trait DefinitionQualityPolicy {
    fn score(&self, word: &str, text: &str) -> f64;
}

/// A simple policy that only catches definitions that
/// are empty, too short to explain anything, or that give away the
/// word itself.
#[derive(Debug, Clone)]
pub struct BasicQualityPolicy {
    pub min_length: usize,
}

impl Default for BasicQualityPolicy {
    fn default() -> BasicQualityPolicy {
        BasicQualityPolicy { min_length: 10 }
    }
}

impl DefinitionQualityPolicy for BasicQualityPolicy {
    fn score(&self, word: &str, text: &str) -> f64 {
        let text = text.trim();

        if text.is_empty() {
            return 0.0;
        }

        let mut score = 1.0;

        if text.chars().count() < self.min_length {
            score -= 0.5;
        }

        if text.to_ascii_uppercase().contains(&word.to_ascii_uppercase()) {
            score -= 0.5;
        }

        f64::max(score, 0.0)
    }
}

/// A table of definitions keyed by uppercase word. When a word is
/// added twice the later definition replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    entries: HashMap<String, String>,
}

impl Definitions {
    pub fn new() -> Definitions {
        Definitions::default()
    }

    /// Adds a definition and returns the one it replaced, if any
    pub fn insert(&mut self, word: &str, definition: &str) -> Option<String> {
        let word = word.trim().to_ascii_uppercase();
        let old = self.entries.insert(
            word.clone(),
            definition.trim().to_string(),
        );

        if old.is_some() {
            debug!("definition of {} replaced by a later entry", word);
        }

        old
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_ascii_uppercase())
            .map(String::as_str)
            .filter(|definition| !definition.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads lines of the form `WORD<tab>definition`. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn from_tsv<R: BufRead>(reader: R) -> Result<Definitions, Error> {
        let mut definitions = Definitions::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((word, definition)) = line.split_once('\t')
            else {
                return Err(Error::MissingTab(line_num + 1));
            };

            definitions.insert(word, definition);
        }

        Ok(definitions)
    }

    /// Reads a JSON object mapping words to definitions
    pub fn from_json(s: &str) -> Result<Definitions, Error> {
        let mut definitions = Definitions::new();

        // Deserialize into a list of pairs so that duplicate keys are
        // seen in file order
        let pairs = serde_json::from_str::<JsonPairs>(s)?;

        for (word, definition) in pairs.0 {
            definitions.insert(&word, &definition);
        }

        Ok(definitions)
    }

    /// Loads a file as JSON if its name ends in `.json`, otherwise as
    /// tab-separated values.
    pub fn load<P: AsRef<Path>>(filename: P) -> Result<Definitions, Error> {
        let filename = filename.as_ref();

        if filename.extension().is_some_and(|ext| ext == "json") {
            Definitions::from_json(&std::fs::read_to_string(filename)?)
        } else {
            Definitions::from_tsv(BufReader::new(std::fs::File::open(filename)?))
        }
    }
}

impl DefinitionSource for Definitions {
    fn resolve(&self, word: &str) -> Option<String> {
        self.get(word).map(str::to_string)
    }
}

// A JSON object read as an ordered list of its members
struct JsonPairs(Vec<(String, String)>);

impl<'de> serde::Deserialize<'de> for JsonPairs {
    fn deserialize<D>(deserializer: D) -> Result<JsonPairs, D::Error>
        where D: serde::Deserializer<'de>
    {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = JsonPairs;

            fn expecting(
                &self,
                f: &mut std::fmt::Formatter,
            ) -> std::fmt::Result {
                write!(f, "an object mapping words to definitions")
            }

            fn visit_map<A>(self, mut map: A) -> Result<JsonPairs, A::Error>
                where A: serde::de::MapAccess<'de>
            {
                let mut pairs = Vec::new();

                while let Some(pair) = map.next_entry::<String, String>()? {
                    pairs.push(pair);
                }

                Ok(JsonPairs(pairs))
            }
        }

        deserializer.deserialize_map(Visitor)
    }
}

/// Wraps a slow source such as a web service so that lookups are
/// spaced out by at least `interval` and a missing answer is tried
/// again up to `retries` more times.
pub struct RateLimited<S> {
    source: S,
    interval: Duration,
    retries: u32,
    last_request: Mutex<Option<Instant>>,
}

impl<S: DefinitionSource> RateLimited<S> {
    pub fn new(source: S, interval: Duration, retries: u32) -> RateLimited<S> {
        RateLimited {
            source,
            interval,
            retries,
            last_request: Mutex::new(None),
        }
    }

    fn wait_for_turn(&self) {
        // A poisoned lock only means another lookup panicked, the
        // timestamp is still usable
        let mut last_request = self.last_request.lock()
            .unwrap_or_else(|e| e.into_inner());

        if let Some(last) = *last_request {
            let elapsed = last.elapsed();

            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            }
        }

        *last_request = Some(Instant::now());
    }
}

impl<S: DefinitionSource> DefinitionSource for RateLimited<S> {
    fn resolve(&self, word: &str) -> Option<String> {
        for attempt in 0..=self.retries {
            self.wait_for_turn();

            if let Some(definition) = self.source.resolve(word) {
                return Some(definition);
            }

            debug!("no definition for {} on attempt {}", word, attempt + 1);
        }

        None
    }
}
