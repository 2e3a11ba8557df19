//! Event-name corpora for dispatch benchmarks.
//!
//! Names follow the dotted `family.detail` shape hosts actually register,
//! drawn from a seeded rng so runs are reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random seed for reproducibility.
const SEED: u64 = 12345;

/// First segment of a generated name.
const FAMILIES: [&str; 5] = ["node", "scene", "camera", "material", "mesh"];

/// Second segment of a generated name.
const DETAILS: [&str; 6] = ["dirty", "removed", "added", "moved", "renamed", "loaded"];

/// Generate `count` distinct dotted event names.
pub fn event_names(count: usize) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    (0..count)
        .map(|i| {
            let family = FAMILIES[rng.gen_range(0..FAMILIES.len())];
            let detail = DETAILS[rng.gen_range(0..DETAILS.len())];
            format!("{family}.{detail}.{i}")
        })
        .collect()
}

/// A name no generated corpus entry collides with.
pub fn miss_name() -> &'static str {
    "bench.miss"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_distinct() {
        let names = event_names(1_000);

        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();

        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn miss_name_misses_the_corpus() {
        let names = event_names(1_000);

        assert!(!names.contains(&miss_name().to_string()));
    }
}
