use crate::{
    search::{choose_move, Decision, SearchConfig},
    Agent,
};
use tactician_core::GameState;

/// Plays the move picked by the exchange search.
pub struct HeuristicAgent {
    name: String,
    config: SearchConfig,
}

impl HeuristicAgent {
    pub fn new(depth: u8) -> Self {
        Self::with_config(SearchConfig::with_depth(depth))
    }

    pub fn with_config(config: SearchConfig) -> Self {
        HeuristicAgent {
            name: format!("Heuristic(depth={})", config.max_depth),
            config,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl Default for HeuristicAgent {
    fn default() -> Self {
        Self::with_config(SearchConfig::default())
    }
}

impl Agent for HeuristicAgent {
    fn choose(&mut self, state: &GameState) -> Option<Decision> {
        choose_move(state, self.config)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
