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

use std::path::Path;
use std::io::{BufReader, BufRead};
use std::collections::HashSet;
use super::search::MIN_WORD_LENGTH;

/// Converts a line from a word list into the form used everywhere
/// else. Returns `None` for blank lines, comments, words that are too
/// short to ever be found and anything that isn’t only letters.
pub fn normalize_word(line: &str) -> Option<String> {
    let line = line.trim();

    if line.is_empty() ||
        line.starts_with('#') ||
        line.chars().count() < MIN_WORD_LENGTH ||
        !line.chars().all(|ch| ch.is_ascii_alphabetic())
    {
        None
    } else {
        Some(line.to_ascii_uppercase())
    }
}

pub fn read_word_list_from_reader<R: BufRead>(
    reader: R,
    words: &mut HashSet<String>,
) -> Result<(), std::io::Error> {
    for line in reader.lines() {
        if let Some(word) = normalize_word(&line?) {
            words.insert(word);
        }
    }

    Ok(())
}

fn read_word_list_from_file<P: AsRef<Path>>(
    filename: P,
    words: &mut HashSet<String>,
) -> Result<(), std::io::Error> {
    read_word_list_from_reader(
        BufReader::new(std::fs::File::open(filename)?),
        words,
    )
}

/// Reads all of the words from each file into one set. Errors are
/// annotated with the name of the file.
pub fn read_word_list<I, P>(
    filenames: I,
) -> Result<HashSet<String>, std::io::Error>
    where I: IntoIterator<Item = P>,
          P: AsRef<Path>,
{
    let mut words = HashSet::new();

    for filename in filenames {
        read_word_list_from_file(&filename, &mut words)
            .map_err(|e| {
                let kind = e.kind();
                std::io::Error::new(
                    kind,
                    format!(
                        "{}: {}",
                        filename.as_ref().to_string_lossy(),
                        e,
                    ))
            })?;
    }

    Ok(words)
}
