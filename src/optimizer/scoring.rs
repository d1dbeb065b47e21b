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

//! Quick heuristic for how promising a keystone word is. None of the
//! parts look at the dictionary so it is much cheaper than building
//! the puzzle.

use crate::catalog;

// Percentage of English text made up of each letter, A to Z
static LETTER_FREQUENCIES: [f64; 26] = [
    8.167, 1.492, 2.782, 4.253, 12.702, 2.228, 2.015, 6.094, 6.966,
    0.153, 0.772, 4.025, 2.406, 6.749, 7.507, 1.929, 0.095, 5.987,
    6.327, 9.056, 2.758, 0.978, 2.360, 0.150, 1.974, 0.074,
];

static GOOD_DIGRAMS: [&str; 42] = [
    "TH", "HE", "IN", "ER", "AN", "RE", "ON", "AT", "EN", "ND", "TI",
    "ES", "OR", "TE", "OF", "ED", "IS", "IT", "AL", "AR", "ST", "TO",
    "NT", "NG", "SE", "HA", "AS", "OU", "IO", "LE", "VE", "CO", "ME",
    "DE", "HI", "RI", "RO", "IC", "NE", "EA", "RA", "CE",
];

static GOOD_TRIGRAMS: [&str; 41] = [
    "THE", "AND", "ING", "ION", "TIO", "ENT", "ATI", "FOR", "HER",
    "TER", "HAT", "THA", "ERE", "ATE", "HIS", "CON", "RES", "VER",
    "ALL", "ONS", "NCE", "MEN", "ITH", "TED", "ERS", "PRO", "THI",
    "WIT", "ARE", "ESS", "NOT", "IVE", "WAS", "ECT", "REA", "COM",
    "EVE", "PER", "INT", "EST", "STA",
];

const WORD_STARTERS: &str = "STCPABMFDRHW";

const DIGRAM_BONUS: f64 = 5.0;
const TRIGRAM_BONUS: f64 = 10.0;
const STARTER_BONUS: f64 = 3.0;
const MAX_VOWEL_GAP: usize = 4;

fn is_vowel(letter: u8) -> bool {
    matches!(letter, b'A' | b'E' | b'I' | b'O' | b'U')
}

pub fn letter_frequency_score(word: &[u8]) -> f64 {
    word.iter()
        .filter(|letter| letter.is_ascii_uppercase())
        .map(|&letter| LETTER_FREQUENCIES[(letter - b'A') as usize])
        .sum()
}

/// Rewards vowels that are spread out. Each gap between consecutive
/// vowels counts for twice its length, capped at four letters.
pub fn vowel_distribution_score(word: &[u8]) -> f64 {
    let vowels = word.iter()
        .enumerate()
        .filter_map(|(pos, &letter)| is_vowel(letter).then_some(pos))
        .collect::<Vec<_>>();

    vowels.windows(2)
        .map(|pair| (pair[1] - pair[0]).min(MAX_VOWEL_GAP) * 2)
        .sum::<usize>() as f64
}

pub fn combination_score(word: &[u8]) -> f64 {
    let digrams = word.windows(2)
        .filter(|window| {
            GOOD_DIGRAMS.iter().any(|digram| digram.as_bytes() == *window)
        })
        .count();
    let trigrams = word.windows(3)
        .filter(|window| {
            GOOD_TRIGRAMS.iter().any(|trigram| trigram.as_bytes() == *window)
        })
        .count();

    digrams as f64 * DIGRAM_BONUS + trigrams as f64 * TRIGRAM_BONUS
}

pub fn starter_score(word: &[u8]) -> f64 {
    word.iter()
        .filter(|&&letter| WORD_STARTERS.as_bytes().contains(&letter))
        .count() as f64
        * STARTER_BONUS
}

/// Scores laying `word` along `path`. The letters are read in path
/// order, which is the order of the word itself. A path that isn’t a
/// valid Hamiltonian path scores zero.
pub fn score_path(word: &str, path: &[usize]) -> f64 {
    if !catalog::is_hamiltonian(path) {
        return 0.0;
    }

    let word = word.to_ascii_uppercase();
    let word = word.as_bytes();

    letter_frequency_score(word)
        + vowel_distribution_score(word)
        + combination_score(word)
        + starter_score(word)
}

#[cfg(test)]
mod test {
    use super::*;

    const PATH: [usize; 12] = [1, 5, 4, 8, 9, 13, 14, 10, 6, 2, 7, 11];

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn parts() {
        let word = b"CORNERSTONES";

        assert_close(letter_frequency_score(word), 90.382);
        // Vowels at 1, 4, 8 and 10
        assert_close(vowel_distribution_score(word), 18.0);
        // CO OR NE ER ST TO ON NE ES and ERS
        assert_close(combination_score(word), 55.0);
        // C R R S T S
        assert_close(starter_score(word), 18.0);
    }

    #[test]
    fn whole_score() {
        assert_close(score_path("CORNERSTONES", &PATH), 181.382);
        assert_close(score_path("cornerstones", &PATH), 181.382);
        assert_close(score_path("CONSTITUTION", &PATH), 194.479);
    }

    #[test]
    fn invalid_path() {
        assert_eq!(score_path("CORNERSTONES", &PATH[1..]), 0.0);

        let mut path = PATH;
        path.swap(0, 11);

        assert_eq!(score_path("CORNERSTONES", &path), 0.0);
    }

    #[test]
    fn no_vowels() {
        assert_eq!(vowel_distribution_score(b"RHYTHMS"), 0.0);
        assert_eq!(vowel_distribution_score(b"A"), 0.0);
        // The last gap is 6 letters but only counts as 4
        assert_eq!(vowel_distribution_score(b"ABCDEFGHIJKLMNO"), 24.0);
    }
}
