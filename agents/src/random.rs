use crate::{search::Decision, Agent};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tactician_core::GameState;

/// Picks uniformly among the side to move's piece moves. Never castles.
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            name: "Random".to_string(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible agent for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            name: format!("Random(seed={seed})"),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn choose(&mut self, state: &GameState) -> Option<Decision> {
        state
            .moves()
            .choose(&mut self.rng)
            .copied()
            .map(Decision::Move)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
