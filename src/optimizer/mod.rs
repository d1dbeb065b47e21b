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

//! Genetic search for new paths to add to the catalog.
//!
//! The fitness only looks at the shape of a path, not at how many
//! words a keystone would give along it, so the paths it suggests
//! still have to be tried by the builder like any other catalog
//! entry.

pub mod crossover;
pub mod initialization;
pub mod scoring;

pub use self::scoring::score_path;

use std::cmp::Reverse;
use rand::Rng;
use tracing::{debug, info};
use crate::adjacency;
use crate::catalog::{self, Catalog, Path};
use crate::config::OptimizerConfig;
use crate::grid::N_ACTIVE;

/// The five arms of the cross. Every active position is in exactly
/// one region.
pub static REGIONS: [(&str, &[usize]); 5] = [
    ("top", &[1, 2]),
    ("left", &[4, 8]),
    ("centre", &[5, 6, 9, 10]),
    ("right", &[7, 11]),
    ("bottom", &[13, 14]),
];

const NEIGHBOUR_WEIGHT: u32 = 10;
const REGION_WEIGHT: u32 = 50;

pub fn region_of(pos: usize) -> Option<usize> {
    REGIONS.iter().position(|(_, positions)| positions.contains(&pos))
}

/// Ten points for each neighbour of each position on the path, plus
/// fifty for each region that the first half of the path reaches.
pub fn fitness(path: &Path) -> u32 {
    let neighbours = path.iter()
        .map(|&pos| adjacency::neighbours(pos).len() as u32)
        .sum::<u32>();

    let mut regions_seen = [false; REGIONS.len()];

    for &pos in path[0..N_ACTIVE / 2].iter() {
        if let Some(region) = region_of(pos) {
            regions_seen[region] = true;
        }
    }

    let n_regions = regions_seen.iter().filter(|&&seen| seen).count() as u32;

    neighbours * NEIGHBOUR_WEIGHT + n_regions * REGION_WEIGHT
}

fn sort_by_fitness(population: &mut [Path]) {
    // Stable so that equally fit paths keep their order
    population.sort_by_cached_key(|path| Reverse(fitness(path)));
}

/// Runs one generation. The fitter half survives and the rest of the
/// population is refilled with their children. A child that isn’t a
/// valid path is replaced with a copy of its first parent.
pub fn next_generation<R: Rng + ?Sized>(
    population: &mut Vec<Path>,
    mutation_rate: f64,
    rng: &mut R,
) {
    let size = population.len();

    if size < 2 {
        return;
    }

    sort_by_fitness(population);

    let n_parents = (size + 1) / 2;

    population.truncate(n_parents);

    while population.len() < size {
        let a = population[rng.gen_range(0..n_parents)];
        let b = population[rng.gen_range(0..n_parents)];
        let cut = rng.gen_range(1..N_ACTIVE);

        let mut child = crossover::order_crossover(&a, &b, cut);

        if rng.gen::<f64>() < mutation_rate {
            crossover::swap_mutation(&mut child, rng);
        }

        population.push(if catalog::is_hamiltonian(&child) {
            child
        } else {
            a
        });
    }
}

/// Creates a population and evolves it for the configured number of
/// generations. The result is sorted with the fittest paths first.
pub fn evolve<R: Rng + ?Sized>(
    config: &OptimizerConfig,
    catalog: &Catalog,
    rng: &mut R,
) -> Vec<Path> {
    let mut population = initialization::initial_population(
        config.population_size,
        catalog,
        initialization::MAX_ATTEMPTS,
        rng,
    );

    for generation in 0..config.generations {
        next_generation(&mut population, config.mutation_rate, rng);

        if let Some(best) = population.first() {
            debug!(
                "generation {}: best fitness {}",
                generation,
                fitness(best),
            );
        }
    }

    sort_by_fitness(&mut population);

    population
}

/// The `top_n` fittest distinct paths after evolving a population
pub fn generate_optimized_paths<R: Rng + ?Sized>(
    config: &OptimizerConfig,
    catalog: &Catalog,
    rng: &mut R,
) -> Vec<Path> {
    let mut paths = Vec::<Path>::with_capacity(config.top_n);

    for path in evolve(config, catalog, rng) {
        if paths.len() >= config.top_n {
            break;
        }

        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    info!(
        "found {} paths, best fitness {}",
        paths.len(),
        paths.first().map(fitness).unwrap_or(0),
    );

    paths
}
