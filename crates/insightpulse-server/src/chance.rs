//! Randomness seam for the simulated services.

use rand::Rng;

/// Source of random outcomes. Services take `Arc<dyn Chance>` so tests can
/// script outcomes instead of rolling dice.
pub trait Chance: Send + Sync {
    /// True with probability `p` (0.0..=1.0).
    fn hits(&self, p: f64) -> bool;

    /// Fair coin toss.
    fn flip(&self) -> bool;

    /// Uniform pick in `min..=max` milliseconds.
    fn pick_ms(&self, min: u64, max: u64) -> u64;
}

/// Thread-local RNG backed implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadChance;

impl Chance for ThreadChance {
    fn hits(&self, p: f64) -> bool {
        rand::rng().random_bool(p.clamp(0.0, 1.0))
    }

    fn flip(&self) -> bool {
        rand::rng().random_bool(0.5)
    }

    fn pick_ms(&self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        rand::rng().random_range(min..=max)
    }
}

/// Scripted outcomes for unit tests.
#[cfg(test)]
pub(crate) struct Fixed {
    pub hit: bool,
    pub flip: bool,
}

#[cfg(test)]
impl Chance for Fixed {
    fn hits(&self, _p: f64) -> bool {
        self.hit
    }

    fn flip(&self) -> bool {
        self.flip
    }

    fn pick_ms(&self, min: u64, _max: u64) -> u64 {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_stays_in_range() {
        let c = ThreadChance;
        for _ in 0..1000 {
            let v = c.pick_ms(200, 1000);
            assert!((200..=1000).contains(&v));
        }
        assert_eq!(c.pick_ms(5, 5), 5);
    }

    #[test]
    fn certain_and_impossible_probabilities() {
        let c = ThreadChance;
        assert!((0..100).all(|_| c.hits(1.0)));
        assert!((0..100).all(|_| !c.hits(0.0)));
    }
}
