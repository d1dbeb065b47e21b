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
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use cornerstones::catalog::{self, Catalog, Path};
use cornerstones::config::Config;
use cornerstones::logging;
use cornerstones::optimizer;

#[derive(Parser)]
#[command(name = "Find paths")]
struct Cli {
    /// Catalog to start from instead of the built-in one
    #[arg(long, value_name = "FILE")]
    catalog: Option<OsString>,
    #[arg(long, value_name = "FILE")]
    config: Option<OsString>,
    /// List every Hamiltonian path instead of evolving new ones
    #[arg(short, long)]
    all: bool,
    #[arg(short, long, value_name = "COUNT")]
    population_size: Option<usize>,
    #[arg(short, long, value_name = "COUNT")]
    generations: Option<usize>,
    #[arg(short = 'n', long, value_name = "COUNT")]
    top_n: Option<usize>,
    #[arg(short, long, value_name = "RATE")]
    mutation_rate: Option<f64>,
    #[arg(short, long)]
    seed: Option<u64>,
    /// Rank the paths by how well they suit this keystone
    #[arg(short = 'w', long, value_name = "WORD")]
    score: Option<String>,
    /// Add the paths to the catalog and save it to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<OsString>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(short, long)]
    quiet: bool,
}

fn print_scores(word: &str, paths: &[Path]) {
    let mut scores = paths.iter()
        .map(|path| (optimizer::score_path(word, path), path))
        .collect::<Vec<_>>();

    scores.sort_by(|(a, _), (b, _)| b.total_cmp(a));

    for (score, path) in scores.into_iter() {
        let positions = path.iter()
            .map(|pos| pos.to_string())
            .collect::<Vec<_>>();

        println!(
            "{:>7.2} {:>4} {}",
            score,
            optimizer::fitness(path),
            positions.join(" "),
        );
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.quiet);

    let mut config = match Config::load_or_default(cli.config.as_ref()) {
        Ok(c) => c.optimizer,
        Err(e) => {
            eprintln!(
                "{}: {}",
                cli.config.unwrap_or_default().to_string_lossy(),
                e,
            );
            return ExitCode::FAILURE;
        },
    };

    if let Some(population_size) = cli.population_size {
        config.population_size = population_size;
    }
    if let Some(generations) = cli.generations {
        config.generations = generations;
    }
    if let Some(top_n) = cli.top_n {
        config.top_n = top_n;
    }
    if let Some(mutation_rate) = cli.mutation_rate {
        config.mutation_rate = mutation_rate;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut catalog = match cli.catalog.as_ref().map(Catalog::load) {
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

    let paths = if cli.all {
        catalog::enumerate_paths()
    } else {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        optimizer::generate_optimized_paths(&config, &catalog, &mut rng)
    };

    info!("{} paths", paths.len());

    if let Some(word) = cli.score.as_ref() {
        print_scores(word, &paths);
    }

    if let Some(filename) = cli.output.as_ref() {
        let mut n_added = 0;

        for path in paths.into_iter() {
            match catalog.push(path) {
                Ok(true) => n_added += 1,
                Ok(false) => (),
                Err(e) => {
                    eprintln!("{:?}: {}", path, e);
                    return ExitCode::FAILURE;
                },
            }
        }

        info!("added {} paths, catalog now has {}", n_added, catalog.len());

        if let Err(e) = catalog.save(filename) {
            eprintln!("{}: {}", filename.to_string_lossy(), e);
            return ExitCode::FAILURE;
        }
    } else if cli.score.is_none() {
        for path in paths.iter() {
            match serde_json::to_string(path) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("{}", e);
                    return ExitCode::FAILURE;
                },
            }
        }
    }

    ExitCode::SUCCESS
}
