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

use std::{process::ExitCode, ffi::OsString};
use clap::Parser;
use rayon::prelude::*;
use tracing::info;
use cornerstones::catalog::Catalog;
use cornerstones::config::Config;
use cornerstones::definitions::Definitions;
use cornerstones::dictionary::Dictionary;
use cornerstones::logging;
use cornerstones::puzzle::Puzzle;
use cornerstones::validator::{ValidationReport, Validator};
use cornerstones::word_list;

#[derive(Parser)]
#[command(name = "Check puzzles")]
struct Cli {
    /// Files of puzzles as written by build-puzzle
    #[arg(required = true, value_name = "FILE")]
    puzzles: Vec<OsString>,
    #[arg(short, long, value_name = "FILE")]
    dictionary: OsString,
    #[arg(short, long, value_name = "FILE", required = true)]
    common_words: Vec<OsString>,
    #[arg(short = 'D', long, value_name = "FILE")]
    definitions: Option<OsString>,
    #[arg(long, value_name = "FILE")]
    catalog: Option<OsString>,
    #[arg(long, value_name = "FILE")]
    config: Option<OsString>,
    /// Print each report as a line of JSON
    #[arg(short, long)]
    json: bool,
    /// Only report errors
    #[arg(short = 'e', long)]
    errors_only: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(short, long)]
    quiet: bool,
}

struct PuzzleSource {
    filename: String,
    puzzle_num: usize,
    puzzle: Puzzle,
}

// Accepts either a JSON array of puzzles or one puzzle per line
fn parse_puzzles(source: &str) -> Result<Vec<Puzzle>, serde_json::Error> {
    let mut puzzles = Vec::new();

    let values = serde_json::Deserializer::from_str(source)
        .into_iter::<serde_json::Value>();

    for value in values {
        match value? {
            serde_json::Value::Array(array) => {
                for value in array {
                    puzzles.push(serde_json::from_value(value)?);
                }
            },
            value => puzzles.push(serde_json::from_value(value)?),
        }
    }

    Ok(puzzles)
}

fn load_puzzles(filenames: &[OsString]) -> Result<Vec<PuzzleSource>, ()> {
    let mut sources = Vec::new();

    for path in filenames.iter() {
        let filename = path.to_string_lossy();

        let puzzles = match std::fs::read_to_string(path) {
            Ok(s) => parse_puzzles(&s).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let puzzles = match puzzles {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{}: {}", filename, e);
                return Err(());
            },
        };

        if puzzles.is_empty() {
            eprintln!("{}: no puzzles", filename);
            return Err(());
        }

        sources.extend(puzzles.into_iter().enumerate().map(|(i, puzzle)| {
            PuzzleSource {
                filename: filename.to_string(),
                puzzle_num: i + 1,
                puzzle,
            }
        }));
    }

    Ok(sources)
}

fn print_report(
    source: &PuzzleSource,
    report: &ValidationReport,
    errors_only: bool,
) {
    let prefix = format!(
        "{}: puzzle {} ({})",
        source.filename,
        source.puzzle_num,
        source.puzzle.keystone_word,
    );

    for problem in report.errors.iter() {
        println!("{}: error: {}", prefix, problem);
    }

    if errors_only {
        return;
    }

    for problem in report.warnings.iter() {
        println!("{}: warning: {}", prefix, problem);
    }

    println!(
        "{}: {}, quality {:.0}, balance {:.0}",
        prefix,
        report.metrics.difficulty,
        report.quality_score,
        report.metrics.balance_score,
    );
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
        None => Definitions::new(),
        Some(Ok(d)) => d,
        Some(Err(e)) => {
            eprintln!(
                "{}: {}",
                cli.definitions.unwrap_or_default().to_string_lossy(),
                e,
            );
            return ExitCode::FAILURE;
        },
    };

    let Ok(sources) = load_puzzles(&cli.puzzles)
    else {
        return ExitCode::FAILURE;
    };

    let validator = Validator::new(
        &dictionary,
        &common_words,
        &definitions,
        config.validation,
    ).with_catalog(catalog);

    let reports = sources.par_iter()
        .map(|source| validator.validate(&source.puzzle))
        .collect::<Vec<_>>();

    let mut n_invalid = 0;

    for (source, report) in sources.iter().zip(reports.iter()) {
        if !report.is_valid {
            n_invalid += 1;
        }

        if cli.json {
            match serde_json::to_string(report) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("{}: {}", source.filename, e);
                    return ExitCode::FAILURE;
                },
            }
        } else {
            print_report(source, report, cli.errors_only);
        }
    }

    info!("{} of {} puzzles are invalid", n_invalid, sources.len());

    if n_invalid > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
