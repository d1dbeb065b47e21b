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

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::{process::ExitCode, ffi::OsString};
use clap::Parser;
use tracing::info;
use cornerstones::builder;
use cornerstones::catalog::Catalog;
use cornerstones::config::Config;
use cornerstones::counts::CellCounts;
use cornerstones::definitions::Definitions;
use cornerstones::dictionary::Dictionary;
use cornerstones::grid::{self, Grid, WIDTH};
use cornerstones::logging;
use cornerstones::puzzle::{Puzzle, WordKind};
use cornerstones::search;
use cornerstones::word_list;

#[derive(Parser)]
#[command(name = "Build")]
struct Cli {
    #[arg(value_name = "KEYSTONE", required_unless_present = "all")]
    keystones: Vec<String>,
    /// Try every 12 letter word in the dictionary
    #[arg(short, long)]
    all: bool,
    #[arg(short, long, value_name = "FILE")]
    dictionary: OsString,
    #[arg(short, long, value_name = "FILE", required = true)]
    common_words: Vec<OsString>,
    /// Remove the words that have no definition in this file
    #[arg(short = 'D', long, value_name = "FILE")]
    definitions: Option<OsString>,
    #[arg(long, value_name = "FILE")]
    catalog: Option<OsString>,
    #[arg(long, value_name = "FILE")]
    config: Option<OsString>,
    #[arg(short, long, value_name = "COUNT")]
    min_cornerstone_words: Option<usize>,
    /// Write the words removed while cleaning to this file
    #[arg(short, long, value_name = "FILE")]
    removed_words: Option<OsString>,
    #[arg(short = 'H', long)]
    human_readable: bool,
    #[arg(short, long, conflicts_with = "human_readable")]
    json_lines: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(short, long)]
    quiet: bool,
}

fn print_grid(grid: &Grid, counts: &CellCounts) {
    for y in 0..WIDTH {
        for x in 0..WIDTH {
            print!("  {}   ", grid.at(y * WIDTH + x).unwrap_or(' '));
        }

        println!();

        for x in 0..WIDTH {
            let pos = y * WIDTH + x;

            if grid::is_active(pos) {
                let counts = counts.at(pos);
                print!("{:>2} {:<3}", counts.starts, counts.visits);
            } else {
                print!("      ");
            }
        }

        println!();
    }
}

fn print_human_readable(puzzle: &Puzzle) {
    match puzzle.path_index {
        Some(index) => println!("{} (path {})\n", puzzle.keystone_word, index),
        None => println!("{}\n", puzzle.keystone_word),
    }

    let counts = search::count_visits(
        &puzzle.grid,
        puzzle.cornerstone_words.iter(),
    );

    print_grid(&puzzle.grid, &counts);

    // One bucket for each word length, in order
    let mut buckets = BTreeMap::<usize, Vec<String>>::new();

    for (word, kind) in puzzle.words() {
        let mut entry = word.to_string();

        if kind == WordKind::Cornerstone {
            entry.push('*');
        }

        buckets.entry(word.chars().count()).or_default().push(entry);
    }

    for (length, words) in buckets.into_iter() {
        println!("\n{} letters\n", length);

        let mut x = 0;

        for word in words.into_iter() {
            let width = word.chars().count();
            let spaces = (x != 0) as usize;

            if x + spaces + width > 80 {
                println!();
                x = 0;
            }

            if x != 0 {
                print!(" ");
                x += 1;
            }

            print!("{}", word);

            x += width;
        }

        println!();
    }

    println!(
        "\n{} words, {} cornerstone words (marked with *)",
        puzzle.total_words,
        puzzle.cornerstone_count,
    );
}

fn write_removed_words(
    filename: &OsString,
    words: &BTreeSet<String>,
) -> Result<(), std::io::Error> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(filename)?);

    for word in words.iter() {
        writeln!(file, "{}", word)?;
    }

    file.flush()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.quiet);

    let config = match Config::load_or_default(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "{}: {}",
                cli.config.unwrap_or_default().to_string_lossy(),
                e,
            );
            return ExitCode::FAILURE;
        },
    };

    let min_cornerstone_words = cli.min_cornerstone_words
        .unwrap_or(config.build.min_cornerstone_words);

    let dictionary = match Dictionary::load(&cli.dictionary) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    let common_words = match word_list::read_word_list(&cli.common_words) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    let catalog = match cli.catalog.as_ref().map(Catalog::load) {
        None => Catalog::builtin(),
        Some(Ok(c)) => c,
        Some(Err(e)) => {
            eprintln!(
                "{}: {}",
                cli.catalog.unwrap_or_default().to_string_lossy(),
                e,
            );
            return ExitCode::FAILURE;
        },
    };

    let definitions = match cli.definitions.as_ref().map(Definitions::load) {
        None => None,
        Some(Ok(d)) => Some(d),
        Some(Err(e)) => {
            eprintln!(
                "{}: {}",
                cli.definitions.unwrap_or_default().to_string_lossy(),
                e,
            );
            return ExitCode::FAILURE;
        },
    };

    let keystones = if cli.all {
        builder::keystone_candidates(&dictionary)
    } else {
        cli.keystones.iter().map(|k| k.to_ascii_uppercase()).collect()
    };

    info!(
        "trying {} keystones along {} paths",
        keystones.len(),
        catalog.len(),
    );

    let results = builder::build_all(
        &keystones,
        &catalog,
        &dictionary,
        &common_words,
        min_cornerstone_words,
    );

    let mut status = ExitCode::SUCCESS;
    let mut puzzles = Vec::new();
    let mut removed_words = BTreeSet::new();

    for (keystone, result) in keystones.iter().zip(results.into_iter()) {
        let puzzle = match result {
            Ok(Some(p)) => p,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}: {}", keystone, e);
                status = ExitCode::FAILURE;
                continue;
            },
        };

        let puzzle = match definitions.as_ref() {
            Some(definitions) => {
                let outcome = builder::clean_puzzle(
                    puzzle,
                    definitions,
                    min_cornerstone_words,
                );

                removed_words.extend(outcome.removed);

                match outcome.puzzle {
                    Some(p) => p,
                    None => continue,
                }
            },
            None => puzzle,
        };

        puzzles.push(puzzle);
    }

    info!("built {} puzzles", puzzles.len());

    if let Some(filename) = cli.removed_words.as_ref() {
        if let Err(e) = write_removed_words(filename, &removed_words) {
            eprintln!("{}: {}", filename.to_string_lossy(), e);
            return ExitCode::FAILURE;
        }
    }

    if cli.human_readable {
        for (i, puzzle) in puzzles.iter().enumerate() {
            if i > 0 {
                println!();
            }

            print_human_readable(puzzle);
        }
    } else if cli.json_lines {
        for puzzle in puzzles.iter() {
            match serde_json::to_string(puzzle) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("{}: {}", puzzle.keystone_word, e);
                    return ExitCode::FAILURE;
                },
            }
        }
    } else {
        match serde_json::to_string_pretty(&puzzles) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            },
        }
    }

    status
}
