//! Simulation context: the explicit clock and RNG handle.
//!
//! The current tick and the RNG live in a `SimContext` value the caller
//! owns and passes to every `advance` call. No process-wide singletons,
//! and a run is reproducible from its seed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Clock and randomness for one simulation run.
#[derive(Debug, Clone)]
pub struct SimContext {
    tick: u64,
    rng: ChaCha8Rng,
}

impl SimContext {
    /// Creates a context at tick 0 with a deterministic RNG seeded from
    /// `seed`. Two contexts built from the same seed drive identical runs.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Current tick of the external clock.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Advances the clock by one tick.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// The deterministic random number generator.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}
