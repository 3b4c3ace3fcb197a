mod cache;
mod evaluator;
mod search;

pub use cache::{Bound, CacheEntry, CacheKey, CacheStats, TranspositionCache};
pub use evaluator::{Evaluate, Evaluator, Score, Weights};
pub use search::{SearchOptions, SearchResult, SearchStats, Searcher, INFINITY};

use crate::pylos::prelude::*;

/// Anything that can pick a move for a colour in a given sub-turn.
pub trait Agent {
    fn choose_move(&mut self, state: GameState, board: &Board, color: Color) -> Result<Move>;

    /// Configures the max depth on the search.
    fn set_max_depth(&mut self, depth: u8);
}

/// An agent backed by the alpha-beta search.
pub struct SearchAgent<E: Evaluate = Evaluator> {
    searcher: Searcher<E>,
}

impl<E: Evaluate> SearchAgent<E> {
    pub fn new(searcher: Searcher<E>) -> SearchAgent<E> {
        SearchAgent { searcher }
    }
}

impl<E: Evaluate> Agent for SearchAgent<E> {
    fn choose_move(&mut self, state: GameState, board: &Board, color: Color) -> Result<Move> {
        if state.is_terminal() {
            return Err(anyhow!("the game is over ({state})"));
        }
        let result = self.searcher.best_move(state, board, color);
        result.best_move.ok_or(anyhow!("failed to generate a move for {color} during {state}"))
    }

    fn set_max_depth(&mut self, depth: u8) {
        self.searcher.set_depth(depth);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentConfig {
    pub search: SearchOptions,
    pub weights: Weights,
    /// The transposition cache size in entries, or `None` to search without one.
    pub cache_entries: Option<usize>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            search: SearchOptions::default(),
            weights: Weights::default(),
            cache_entries: Some(1 << 20),
        }
    }
}

impl AgentConfig {
    /// Gets the default configuration.
    pub fn new() -> AgentConfig {
        AgentConfig::default()
    }

    /// Produces an agent.
    pub fn get_agent(&self) -> Box<dyn Agent> {
        let searcher = Searcher::new(Evaluator::new(self.weights), self.search, self.cache_entries);
        Box::new(SearchAgent::new(searcher))
    }
}
