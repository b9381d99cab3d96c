//! Deterministic palette generation for recursive segmentation.

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::geometry::Colour;

/// Draws `num_colours` random RGB colours from an already-seeded stream.
///
/// [`crate::segment::recursive::RecursiveSegmenter`] keeps one [`ChaCha8Rng`]
/// alive for an entire run and draws both palettes and its unsure-face coin
/// flips from it, so the whole recursion is reproducible end to end from a
/// single seed rather than per level. Colours are not checked for
/// uniqueness or minimum contrast; with 16.7 million possible values,
/// collisions across a handful of colours are vanishingly unlikely and not
/// worth the extra bookkeeping.
pub fn draw_colours(rng: &mut ChaCha8Rng, num_colours: usize) -> Vec<Colour> {
    (0..num_colours)
        .map(|_| Colour::new(rng.gen(), rng.gen(), rng.gen()))
        .collect()
}

/// Convenience one-shot variant of [`draw_colours`] for callers that don't
/// need a continuing random stream.
pub fn random_colours(num_colours: usize, seed: u64) -> Vec<Colour> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    draw_colours(&mut rng, num_colours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_the_same_palette() {
        let a = random_colours(6, 42);
        let b = random_colours(6, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = random_colours(6, 1);
        let b = random_colours(6, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn draws_exactly_the_requested_count() {
        assert_eq!(random_colours(0, 7).len(), 0);
        assert_eq!(random_colours(10, 7).len(), 10);
    }
}
