use rand::Rng;
use rand::SeedableRng;
use rand::distributions::Open01;
use rand::rngs::SmallRng;

/// Draws geometrically distributed node heights.
///
/// Sampling `u` uniformly from `(0, 1)` and taking `floor(ln u / ln p) + 1`
/// yields `P(height >= k) = p^(k-1)`: each node is promoted one level higher
/// with probability `p`.
///
/// The generator is per-list mutable state and is seedable, so tests can pin
/// the exact shape a given insertion sequence produces.
pub(crate) struct LevelGenerator {
    p: f64,
    rng: SmallRng,
}

impl LevelGenerator {
    /// Creates a generator seeded from OS entropy.
    pub(crate) fn new(p: f64) -> Self {
        Self::with_rng(p, SmallRng::from_entropy())
    }

    /// Creates a deterministic generator from a seed.
    pub(crate) fn seeded(p: f64, seed: u64) -> Self {
        Self::with_rng(p, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(p: f64, rng: SmallRng) -> Self {
        assert!(p > 0.0 && p < 1.0, "`LevelGenerator` - `p` must lie in (0, 1)!");
        Self {
            p,
            rng,
        }
    }

    /// Draws a height in `[1, min(level + 1, ceiling)]`.
    ///
    /// The unclamped draw is unbounded, so it is clamped here, before any
    /// caller allocates link slots based on it. `level` is the highest level
    /// currently in use; a new node may open at most one level above it.
    pub(crate) fn height(&mut self, level: usize, ceiling: usize) -> usize {
        let u: f64 = self.rng.sample(Open01);
        // `ln u / ln p` is non-negative for u, p in (0, 1); the `as` cast
        // floors and saturates, so extreme draws stay well-defined.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let raw = (u.ln() / self.p.ln()) as usize;
        raw.saturating_add(1).min(level + 1).min(ceiling)
    }
}

impl Clone for LevelGenerator {
    fn clone(&self) -> Self {
        Self {
            p: self.p,
            rng: self.rng.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAWS: usize = 20_000;

    #[test]
    fn heights_follow_a_geometric_distribution() {
        let mut levels = LevelGenerator::seeded(0.5, 0xC0FFEE);
        let mut ones = 0usize;
        let mut twos = 0usize;
        for _ in 0..DRAWS {
            match levels.height(usize::MAX - 1, usize::MAX) {
                1 => ones += 1,
                2 => twos += 1,
                _ => {}
            }
        }
        // P(height = 1) = 1/2, P(height = 2) = 1/4; allow generous slack.
        let one_share = ones as f64 / DRAWS as f64;
        let two_share = twos as f64 / DRAWS as f64;
        assert!((0.45..0.55).contains(&one_share), "P(h=1) was {one_share}");
        assert!((0.20..0.30).contains(&two_share), "P(h=2) was {two_share}");
    }

    #[test]
    fn heights_are_clamped_to_one_above_the_active_level() {
        let mut levels = LevelGenerator::seeded(0.5, 7);
        for _ in 0..DRAWS {
            let height = levels.height(3, 64);
            assert!((1..=4).contains(&height));
        }
    }

    #[test]
    fn heights_never_exceed_the_ceiling() {
        let mut levels = LevelGenerator::seeded(0.5, 7);
        for _ in 0..DRAWS {
            assert_eq!(levels.height(10, 1), 1);
        }
    }

    #[test]
    fn same_seed_draws_the_same_sequence() {
        let mut a = LevelGenerator::seeded(0.5, 99);
        let mut b = LevelGenerator::seeded(0.5, 99);
        for _ in 0..1000 {
            assert_eq!(a.height(31, 32), b.height(31, 32));
        }
    }

    #[test]
    #[should_panic(expected = "`LevelGenerator` - `p` must lie in (0, 1)!")]
    fn p_outside_the_open_interval_is_rejected() {
        let _ = LevelGenerator::seeded(1.0, 0);
    }
}
