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
use cornerstones::dictionary::Dictionary;
use cornerstones::grid::Grid;
use cornerstones::logging;
use cornerstones::search;

/// Reads a grid from stdin and lists every word in it
#[derive(Parser)]
#[command(name = "Find words")]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    dictionary: OsString,
    /// Also print every route that spells each word
    #[arg(short, long)]
    routes: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.quiet);

    let dictionary = match Dictionary::load(&cli.dictionary) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    let grid_string = match std::io::read_to_string(std::io::stdin()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("stdin: {}", e);
            return ExitCode::FAILURE;
        },
    };

    let grid = match grid_string.parse::<Grid>() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("stdin: {}", e);
            return ExitCode::FAILURE;
        },
    };

    if cli.routes {
        for (word, routes) in search::discover_routes(&grid, &dictionary) {
            for route in routes.iter() {
                let positions = route.iter()
                    .map(|pos| pos.to_string())
                    .collect::<Vec<_>>();

                println!("{}: {}", word, positions.join(" "));
            }
        }
    } else {
        let mut words = search::search_words(&grid, &dictionary)
            .into_iter()
            .collect::<Vec<_>>();

        words.sort();

        for word in words.into_iter() {
            println!("{}", word);
        }
    }

    ExitCode::SUCCESS
}
