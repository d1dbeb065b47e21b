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

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;
use crate::adjacency;
use crate::catalog::{Catalog, Path};
use crate::grid::{N_CELLS, N_ACTIVE, ACTIVE_POSITIONS};

/// How many random walks to try for each member of the population
/// before falling back to a path from the catalog
pub const MAX_ATTEMPTS: usize = 100;

/// Walks from a random start to a random unvisited neighbour each
/// step. Returns `None` if the walk gets stuck before visiting every
/// position.
pub fn random_path<R: Rng + ?Sized>(rng: &mut R) -> Option<Path> {
    let mut path = [0; N_ACTIVE];
    let mut visited = [false; N_CELLS];

    let start = *ACTIVE_POSITIONS.choose(rng)?;

    path[0] = start;
    visited[start] = true;

    for i in 1..path.len() {
        let unvisited = adjacency::neighbours(path[i - 1])
            .iter()
            .copied()
            .filter(|&pos| !visited[pos])
            .collect::<Vec<_>>();

        let &next = unvisited.choose(rng)?;

        path[i] = next;
        visited[next] = true;
    }

    Some(path)
}

/// Makes `size` random paths. Any that can’t be made within
/// `max_attempts` walks are taken from the catalog in turn, or from
/// the built-in catalog if `catalog` is empty.
pub fn initial_population<R: Rng + ?Sized>(
    size: usize,
    catalog: &Catalog,
    max_attempts: usize,
    rng: &mut R,
) -> Vec<Path> {
    let builtin;
    let fallback = if catalog.is_empty() {
        builtin = Catalog::builtin();
        builtin.paths()
    } else {
        catalog.paths()
    };

    let mut n_fallbacks = 0;

    let population = (0..size).map(|i| {
        (0..max_attempts)
            .find_map(|_| random_path(rng))
            .unwrap_or_else(|| {
                n_fallbacks += 1;
                fallback[i % fallback.len()]
            })
    }).collect::<Vec<_>>();

    if n_fallbacks > 0 {
        debug!("{} paths taken from the catalog", n_fallbacks);
    }

    population
}
