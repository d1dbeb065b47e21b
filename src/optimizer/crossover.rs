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
use crate::catalog::Path;
use crate::grid::N_CELLS;

/// Single point order crossover. The child takes the first `cut`
/// positions from `a` and then the remaining positions in the order
/// they appear in `b`. The child always visits every position once
/// but it might not be a valid path.
pub fn order_crossover(a: &Path, b: &Path, cut: usize) -> Path {
    let cut = cut.min(a.len());
    let mut child = *a;
    let mut used = [false; N_CELLS];

    for &pos in a[0..cut].iter() {
        used[pos] = true;
    }

    let mut next = cut;

    for &pos in b.iter() {
        if !used[pos] {
            used[pos] = true;
            child[next] = pos;
            next += 1;
        }
    }

    child
}

/// Swaps two different positions of the path
pub fn swap_mutation<R: Rng + ?Sized>(path: &mut Path, rng: &mut R) {
    let a = rng.gen_range(0..path.len());
    let b = (a + rng.gen_range(1..path.len())) % path.len();

    path.swap(a, b);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::catalog::Catalog;
    use crate::grid::ACTIVE_POSITIONS;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn sorted(path: &Path) -> Path {
        let mut path = *path;
        path.sort_unstable();
        path
    }

    #[test]
    fn crossover() {
        let a = [1, 5, 4, 8, 9, 13, 14, 10, 6, 2, 7, 11];
        let b = [2, 1, 5, 4, 8, 13, 9, 6, 7, 11, 14, 10];

        assert_eq!(
            order_crossover(&a, &b, 4),
            [1, 5, 4, 8, 2, 13, 9, 6, 7, 11, 14, 10],
        );
        assert_eq!(order_crossover(&a, &b, 0), b);
        assert_eq!(order_crossover(&a, &b, 12), a);
        assert_eq!(order_crossover(&a, &b, 100), a);
    }

    #[test]
    fn mutation_changes_two_positions() {
        let mut rng = StdRng::seed_from_u64(7);
        let original = [1, 5, 4, 8, 9, 13, 14, 10, 6, 2, 7, 11];

        for _ in 0..100 {
            let mut path = original;

            swap_mutation(&mut path, &mut rng);

            let changed = path.iter()
                .zip(original.iter())
                .filter(|(a, b)| a != b)
                .count();

            assert_eq!(changed, 2);
            assert_eq!(sorted(&path), ACTIVE_POSITIONS);
        }
    }

    proptest! {
        #[test]
        fn crossover_keeps_every_position(
            a in 0usize..10,
            b in 0usize..10,
            cut in 0usize..=12,
        ) {
            let catalog = Catalog::builtin();
            let a = catalog.paths()[a];
            let b = catalog.paths()[b];

            let child = order_crossover(&a, &b, cut);

            prop_assert_eq!(sorted(&child), ACTIVE_POSITIONS);
            prop_assert_eq!(&child[0..cut], &a[0..cut]);
        }
    }
}
