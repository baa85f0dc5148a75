use rand::Rng;

/// Return a uniformly random permutation of `items` (Fisher-Yates).
///
/// The input is left untouched. Empty and single-element slices come back
/// as-is.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..20).collect();

        for _ in 0..50 {
            let mut shuffled = shuffle(&items, &mut rng);
            assert_eq!(shuffled.len(), items.len());
            shuffled.sort_unstable();
            assert_eq!(shuffled, items);
        }
    }

    #[test]
    fn test_shuffle_keeps_duplicates() {
        let mut rng = StdRng::seed_from_u64(3);
        let items = vec!["a", "b", "a", "c", "a"];

        let mut shuffled = shuffle(&items, &mut rng);
        shuffled.sort_unstable();
        assert_eq!(shuffled, vec!["a", "a", "a", "b", "c"]);
    }

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let mut rng = StdRng::seed_from_u64(11);
        let items = vec!["cat".to_string(), "dog".to_string(), "fish".to_string()];
        let before = items.clone();

        let _ = shuffle(&items, &mut rng);
        assert_eq!(items, before);
    }

    #[test]
    fn test_shuffle_trivial_inputs() {
        let mut rng = StdRng::seed_from_u64(1);

        let empty: Vec<u8> = Vec::new();
        assert!(shuffle(&empty, &mut rng).is_empty());
        assert_eq!(shuffle(&[42], &mut rng), vec![42]);
    }

    #[test]
    fn test_shuffle_positions_are_uniform() {
        const N: usize = 5;
        const TRIALS: usize = 50_000;

        let mut rng = StdRng::seed_from_u64(2024);
        let items: Vec<usize> = (0..N).collect();
        let mut counts = [[0usize; N]; N];

        for _ in 0..TRIALS {
            for (position, item) in shuffle(&items, &mut rng).into_iter().enumerate() {
                counts[item][position] += 1;
            }
        }

        // Chi-square per element over N positions, 4 degrees of freedom.
        // 23.51 is the 0.01% critical value.
        let expected = (TRIALS / N) as f64;
        for row in counts.iter() {
            let chi_square: f64 = row
                .iter()
                .map(|&observed| {
                    let diff = observed as f64 - expected;
                    diff * diff / expected
                })
                .sum();
            assert!(chi_square < 23.51, "chi-square too large: {}", chi_square);
        }
    }

    #[test]
    fn test_shuffle_reaches_every_ordering() {
        const TRIALS: usize = 24_000;

        let mut rng = StdRng::seed_from_u64(99);
        let items = [0u8, 1, 2, 3];
        let mut orderings: HashMap<Vec<u8>, usize> = HashMap::new();

        for _ in 0..TRIALS {
            *orderings.entry(shuffle(&items, &mut rng)).or_default() += 1;
        }

        assert_eq!(orderings.len(), 24);

        // 23 degrees of freedom; roughly the 0.01% critical value.
        let expected = (TRIALS / 24) as f64;
        let chi_square: f64 = orderings
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        assert!(chi_square < 57.3, "chi-square too large: {}", chi_square);
    }
}
