pub mod evaluation;
pub mod heuristic;
pub mod random;
pub mod search;

use tactician_core::GameState;

/// An automated player.
pub trait Agent {
    /// Picks a move for the side to move, or `None` if it has none.
    fn choose(&mut self, state: &GameState) -> Option<Decision>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use evaluation::*;
pub use heuristic::HeuristicAgent;
pub use random::RandomAgent;
pub use search::*;
