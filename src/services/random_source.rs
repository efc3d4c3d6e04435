use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hands out one independent random stream per simulation run.
pub trait RandomSource: Send + Sync {
    type Stream: Rng;

    fn stream(&self) -> Self::Stream;
}

/// `StdRng` streams, seeded from a fixed value when one is configured and
/// from OS entropy otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeededSource {
    seed: Option<u64>,
}

impl SeededSource {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }
}

impl RandomSource for SeededSource {
    type Stream = StdRng;

    fn stream(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
