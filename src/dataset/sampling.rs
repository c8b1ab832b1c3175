use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Draw `amount` items from `items` without replacement.
///
/// A fresh generator is built from `seed` on every call, so the same seed,
/// input order and amount always give the same draw. The returned order is
/// the draw order, not the input order.
///
/// # Panics
///
/// Panics if `amount > items.len()`; callers check eligibility first.
pub fn sample_without_replacement<T: Clone>(items: &[T], amount: usize, seed: u64) -> Vec<T> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    rand::seq::index::sample(&mut rng, items.len(), amount)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_has_no_duplicates() {
        let items: Vec<u32> = (0..50).collect();
        let picked = sample_without_replacement(&items, 20, 42);

        assert_eq!(picked.len(), 20);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 20);
        assert!(picked.iter().all(|v| items.contains(v)));
    }

    #[test]
    fn sample_is_reproducible() {
        let items: Vec<u32> = (0..100).collect();
        let a = sample_without_replacement(&items, 10, 42);
        let b = sample_without_replacement(&items, 10, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn full_sample_is_a_permutation() {
        let items: Vec<u32> = (0..20).collect();
        let mut picked = sample_without_replacement(&items, 20, 42);
        picked.sort_unstable();
        assert_eq!(picked, items);
    }

    #[test]
    fn empty_sample() {
        let items: Vec<u32> = (0..5).collect();
        assert!(sample_without_replacement(&items, 0, 42).is_empty());
    }
}
