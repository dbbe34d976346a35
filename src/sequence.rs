//! Trial-sequence generation.
//!
//! Given a pool of [`PoolEntry`] values and a target count, produce an ordered
//! sequence of exactly `count` entries under one of two [`BalancingPolicy`]
//! variants:
//!
//! - [`BalancingPolicy::WithReplacement`]: each position is an independent
//!   uniform draw from the pool. Short runs may be unbalanced.
//! - [`BalancingPolicy::BalancedRepeat`]: the pool is replicated
//!   `ceil(count / |pool|)` times and truncated to `count`. Every entry appears
//!   `floor(count / |pool|)` or `ceil(count / |pool|)` times. The entries that
//!   fall into the final partial replica are the ones that appear once more.
//!   That surplus is expected and is not a defect.
//!
//! The input pool is never mutated. Randomness comes only from the caller's RNG,
//! so a seeded RNG yields a reproducible sequence.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::config::BalancingPolicy;
use crate::data::PoolEntry;
use crate::errors::IatError;
use crate::rng::DeterministicRng;

/// Generate `count` entries from `pool` using `policy`.
///
/// `count == 0` yields an empty sequence even for an empty pool. An empty pool
/// with a nonzero count is an invalid configuration.
pub fn generate<R: Rng + ?Sized>(
    pool: &[PoolEntry],
    count: usize,
    policy: BalancingPolicy,
    rng: &mut R,
) -> Result<Vec<PoolEntry>, IatError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if pool.is_empty() {
        return Err(IatError::InvalidConfiguration(format!(
            "cannot draw {count} trials from an empty pool"
        )));
    }
    let sequence = match policy {
        BalancingPolicy::WithReplacement => sample_with_replacement(pool, count, rng),
        BalancingPolicy::BalancedRepeat => balanced_repeat(pool, count, rng),
    };
    debug_assert_eq!(sequence.len(), count);
    Ok(sequence)
}

fn sample_with_replacement<R: Rng + ?Sized>(
    pool: &[PoolEntry],
    count: usize,
    rng: &mut R,
) -> Vec<PoolEntry> {
    // `choose` only returns None for an empty slice, which `generate` rules out.
    (0..count)
        .filter_map(|_| pool.choose(rng).cloned())
        .collect()
}

fn balanced_repeat<R: Rng + ?Sized>(
    pool: &[PoolEntry],
    count: usize,
    rng: &mut R,
) -> Vec<PoolEntry> {
    let full_copies = count / pool.len();
    let remainder = count % pool.len();

    let mut sequence = Vec::with_capacity(count);
    for _ in 0..full_copies {
        sequence.extend_from_slice(pool);
    }
    if remainder > 0 {
        let mut partial = pool.to_vec();
        partial.shuffle(rng);
        partial.truncate(remainder);
        sequence.extend(partial);
    }
    sequence.shuffle(rng);
    sequence
}

/// A balancing policy bound to its own seeded stream.
///
/// Successive calls continue the same stream, so a generator reused across
/// blocks produces different (but reproducible) orders for each.
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    policy: BalancingPolicy,
    rng: DeterministicRng,
}

impl SequenceGenerator {
    /// Generator seeded with `seed`.
    pub fn new(policy: BalancingPolicy, seed: u64) -> Self {
        Self::with_rng(policy, DeterministicRng::new(seed))
    }

    /// Generator continuing an existing stream.
    pub fn with_rng(policy: BalancingPolicy, rng: DeterministicRng) -> Self {
        Self { policy, rng }
    }

    /// Policy applied on every call.
    pub fn policy(&self) -> BalancingPolicy {
        self.policy
    }

    /// Draw the next sequence from this generator's stream.
    pub fn generate(
        &mut self,
        pool: &[PoolEntry],
        count: usize,
    ) -> Result<Vec<PoolEntry>, IatError> {
        generate(pool, count, self.policy, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ResponseSide;
    use std::collections::HashMap;

    fn gender_pool() -> Vec<PoolEntry> {
        vec![
            PoolEntry::new("남자", ResponseSide::Left, "male"),
            PoolEntry::new("남성", ResponseSide::Left, "male"),
            PoolEntry::new("여자", ResponseSide::Right, "female"),
            PoolEntry::new("여성", ResponseSide::Right, "female"),
        ]
    }

    fn counts(sequence: &[PoolEntry]) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for entry in sequence {
            *counts.entry(entry.text.as_str()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn balanced_gender_block_splits_evenly() {
        let pool = gender_pool();
        let mut rng = DeterministicRng::new(1);
        let sequence = generate(&pool, 20, BalancingPolicy::BalancedRepeat, &mut rng).unwrap();
        assert_eq!(sequence.len(), 20);
        let counts = counts(&sequence);
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|count| *count == 5));
        let left = sequence
            .iter()
            .filter(|entry| entry.side == ResponseSide::Left)
            .count();
        assert_eq!(left, 10);
    }

    #[test]
    fn partial_replica_adds_at_most_one() {
        let pool = gender_pool();
        for seed in 0..32 {
            let mut rng = DeterministicRng::new(seed);
            let sequence = generate(&pool, 7, BalancingPolicy::BalancedRepeat, &mut rng).unwrap();
            let counts = counts(&sequence);
            assert_eq!(counts.len(), 4, "every entry should appear when count >= pool");
            assert!(counts.values().all(|count| (1..=2).contains(count)));
            assert_eq!(counts.values().filter(|count| **count == 2).count(), 3);
        }
    }

    #[test]
    fn short_balanced_run_has_no_repeats() {
        let pool = gender_pool();
        let mut rng = DeterministicRng::new(5);
        let sequence = generate(&pool, 3, BalancingPolicy::BalancedRepeat, &mut rng).unwrap();
        let counts = counts(&sequence);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn with_replacement_draws_only_pool_entries() {
        let pool = gender_pool();
        let mut rng = DeterministicRng::new(2);
        let sequence = generate(&pool, 50, BalancingPolicy::WithReplacement, &mut rng).unwrap();
        assert_eq!(sequence.len(), 50);
        assert!(sequence.iter().all(|entry| pool.contains(entry)));
    }

    #[test]
    fn zero_count_is_empty_even_for_empty_pool() {
        let mut rng = DeterministicRng::new(0);
        for policy in [BalancingPolicy::WithReplacement, BalancingPolicy::BalancedRepeat] {
            assert!(generate(&gender_pool(), 0, policy, &mut rng).unwrap().is_empty());
            assert!(generate(&[], 0, policy, &mut rng).unwrap().is_empty());
        }
    }

    #[test]
    fn empty_pool_is_invalid_configuration() {
        let mut rng = DeterministicRng::new(0);
        let err = generate(&[], 4, BalancingPolicy::BalancedRepeat, &mut rng).unwrap_err();
        assert!(matches!(err, IatError::InvalidConfiguration(_)));
    }

    #[test]
    fn input_pool_is_untouched() {
        let pool = gender_pool();
        let snapshot = pool.clone();
        let mut generator = SequenceGenerator::new(BalancingPolicy::BalancedRepeat, 9);
        let _ = generator.generate(&pool, 13).unwrap();
        assert_eq!(pool, snapshot);
    }

    #[test]
    fn generator_is_reproducible_per_seed() {
        let pool = gender_pool();
        let mut first = SequenceGenerator::new(BalancingPolicy::BalancedRepeat, 77);
        let mut second = SequenceGenerator::new(BalancingPolicy::BalancedRepeat, 77);
        let a1 = first.generate(&pool, 20).unwrap();
        let b1 = second.generate(&pool, 20).unwrap();
        assert_eq!(a1, b1);
        let a2 = first.generate(&pool, 20).unwrap();
        let b2 = second.generate(&pool, 20).unwrap();
        assert_eq!(a2, b2);
        assert_eq!(first.policy(), BalancingPolicy::BalancedRepeat);
    }
}
