//! Seeded emission order.
//!
//! Node 0 is always emitted first; every other id is shuffled with a
//! Fisher-Yates pass driven by the caller's PRNG. The shuffle draws `u32`
//! ranges so a given ChaCha seed yields the same order on 32- and 64-bit
//! targets.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use crate::model::NodeId;

/// PRNG used when the caller only supplies a numeric seed.
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Portable in-place Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=(i as u32)) as usize;
        items.swap(i, j);
    }
}

/// Emission order for `node_count` nodes: node 0, then a permutation of `1..node_count`.
pub fn emission_order<R: Rng>(node_count: usize, rng: &mut R) -> Vec<NodeId> {
    let mut order: Vec<NodeId> = (0..node_count as u32).map(NodeId).collect();
    if let Some((_, rest)) = order.split_first_mut() {
        shuffle(rest, rng);
    }
    order
}
