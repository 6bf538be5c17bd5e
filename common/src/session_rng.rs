use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers for food and power-up placement.
pub trait RandomSource {
    /// Returns a value in `0..upper`. `upper` is never zero.
    fn next_below(&mut self, upper: u32) -> u32;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restarts the sequence from the initial seed.
    pub fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

impl RandomSource for SessionRng {
    fn next_below(&mut self, upper: u32) -> u32 {
        self.random_range(0..upper)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::RandomSource;

    /// Replays a fixed sequence, wrapping around when exhausted.
    pub struct ScriptedRng {
        values: Vec<u32>,
        index: usize,
    }

    impl ScriptedRng {
        pub fn new(values: Vec<u32>) -> Self {
            Self { values, index: 0 }
        }
    }

    impl RandomSource for ScriptedRng {
        fn next_below(&mut self, upper: u32) -> u32 {
            let value = self.values[self.index % self.values.len()];
            self.index += 1;
            value % upper
        }
    }
}
