//! Reproducible randomness keyed by text.
//!
//! Seeds are the first four bytes (big-endian) of the MD5 digest of the key, the
//! same derivation used for question rotation, so any choice that "varies" across
//! users or sessions is still replayable from its inputs.

use md5::{Digest, Md5};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub fn seed_for(key: &str) -> u32 {
    let digest = Md5::digest(key.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Seed for question rotation: `"{user_key}-{rotation_key}"`.
pub fn rotation_seed(user_key: &str, rotation_key: &str) -> u32 {
    seed_for(&format!("{user_key}-{rotation_key}"))
}

pub fn rng(seed: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(u64::from(seed))
}

/// Fisher–Yates over the whole slice, driven entirely by `seed`.
pub fn shuffle<T>(items: &mut [T], seed: u32) {
    let mut rng = rng(seed);
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Picks `count` distinct indices below `len` in seeded order.
pub fn sample_indices(len: usize, count: usize, seed: u32) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    shuffle(&mut indices, seed);
    indices.truncate(count);
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_md5_prefix() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(seed_for(""), 0xd41d_8cd9);
        assert_eq!(rotation_seed("u1", "2024-01-01"), seed_for("u1-2024-01-01"));
    }

    #[test]
    fn shuffle_is_reproducible_and_a_permutation() {
        let mut first: Vec<u32> = (0..20).collect();
        let mut second = first.clone();
        shuffle(&mut first, 42);
        shuffle(&mut second, 42);
        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn different_seeds_usually_differ() {
        let base: Vec<u32> = (0..12).collect();
        let orders: Vec<Vec<u32>> = (0..5)
            .map(|seed| {
                let mut items = base.clone();
                shuffle(&mut items, seed);
                items
            })
            .collect();
        assert!(orders.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn sample_indices_are_distinct() {
        let picked = sample_indices(7, 3, 9);
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|index| *index < 7));
        assert_ne!(picked[0], picked[1]);
        assert_ne!(picked[1], picked[2]);
        assert_ne!(picked[0], picked[2]);
        assert_eq!(sample_indices(2, 5, 9).len(), 2);
    }
}
