use crate::agent::{cache::*, evaluator::*};
use crate::pylos::prelude::*;

/// Wider than any evaluation, and safe to negate.
pub const INFINITY: Score = Score::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    pub depth: u8,
    /// Searches additions two plies shallower than everything else.
    pub reduce_adds: bool,
    /// Opens in the centre of the base without searching.
    pub opening: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions { depth: 4, reduce_adds: false, opening: false }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    pub cache_hits: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: Score,
    pub stats: SearchStats,
    /// Cache activity during this search, when searching with a cache.
    pub cache: Option<CacheStats>,
}

/// A depth-limited negamax search with alpha-beta pruning.
///
/// A colour can own several consecutive sub-turns (a placement followed by its removals), so a child
/// is only negated when the simulator actually hands the turn over; otherwise it is searched from the
/// same perspective with the same window.
pub struct Searcher<E: Evaluate> {
    evaluator: E,
    options: SearchOptions,
    cache: Option<TranspositionCache>,
    stats: SearchStats,
}

impl<E: Evaluate> Searcher<E> {
    pub fn new(evaluator: E, options: SearchOptions, cache_entries: Option<usize>) -> Searcher<E> {
        Searcher {
            evaluator,
            options,
            cache: cache_entries.map(TranspositionCache::new),
            stats: SearchStats::default(),
        }
    }

    /// Searches a private copy of the position to the configured depth. The board is never touched.
    pub fn best_move(&mut self, state: GameState, board: &Board, color: Color) -> SearchResult {
        self.stats = SearchStats::default();
        if let Some(cache) = &mut self.cache {
            cache.clear();
        }

        if let Some(mv) = self.opening_move(state, board, color) {
            log::debug!("opening with {mv}");
            let score = self.evaluator.evaluate(board, color);
            return SearchResult { best_move: Some(mv), score, stats: self.stats, cache: self.cache_stats() };
        }

        let mut sim = Simulator::new(state, color, board.clone());
        let (best_move, score) = self.search(&mut sim, self.options.depth, -INFINITY, INFINITY);
        debug_assert_eq!(sim.board(), board, "search leaked into its simulator");

        log::debug!(
            "searched {} nodes to depth {} ({} cutoffs, {} cache hits): {} scores {score}",
            self.stats.nodes,
            self.options.depth,
            self.stats.cutoffs,
            self.stats.cache_hits,
            best_move.map_or("nothing".into(), |mv| mv.notate()),
        );
        let cache = self.cache_stats();
        if let Some(CacheStats { probes, hits, stores, dropped }) = cache {
            log::debug!("cache: {probes} probes, {hits} hits, {stores} stores, {dropped} dropped");
        }
        SearchResult { best_move, score, stats: self.stats, cache }
    }

    fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    /// Searches the simulator's position from the mover's perspective, returning the first best move
    /// in generator order and its score. The simulator is left exactly as it was found.
    ///
    /// The position itself is never looked up in the cache, so a live position always yields a move.
    pub fn search(&mut self, sim: &mut Simulator, depth: u8, alpha: Score, beta: Score) -> (Option<Move>, Score) {
        self.negamax(sim, depth, alpha, beta, true, true)
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.options.depth = depth;
    }

    fn negamax(
        &mut self, sim: &mut Simulator, depth: u8, mut alpha: Score, mut beta: Score, root: bool, reducible: bool,
    ) -> (Option<Move>, Score) {
        self.stats.nodes += 1;
        if depth == 0 || sim.state().is_terminal() {
            return (None, self.evaluator.evaluate(sim.board(), sim.color()));
        }

        // positions below a reduced addition are searched too shallowly to share
        let cacheable = !root && reducible && self.cache.is_some();
        let key = CacheKey::of(sim);
        if cacheable && let Some(entry) = self.cache.as_mut().and_then(|c| c.get(&key)) && entry.depth >= depth {
            self.stats.cache_hits += 1;
            match entry.bound {
                Bound::Exact => return (None, entry.score),
                Bound::Lower => alpha = alpha.max(entry.score),
                Bound::Upper => beta = beta.min(entry.score),
            }
            if alpha >= beta {
                return (None, entry.score);
            }
        }
        let window = (alpha, beta);

        let moves = legal_moves(sim.state(), sim.color(), sim.board());
        assert!(!moves.is_empty(), "no moves for {} during {}", sim.color(), sim.state());

        let (state, color) = (sim.state(), sim.color());
        let mut best: (Option<Move>, Score) = (None, -INFINITY);
        for mv in moves {
            let reduced = reducible && self.options.reduce_adds && mv.is_add();
            let child_depth = if reduced { depth.saturating_sub(2) } else { depth - 1 };

            sim.apply(&mv);
            let score = if sim.color() == color {
                self.negamax(sim, child_depth, alpha, beta, false, !reduced).1
            } else {
                -self.negamax(sim, child_depth, -beta, -alpha, false, !reduced).1
            };
            sim.undo(&mv, state, color);

            if best.0.is_none() || score > best.1 {
                best = (Some(mv), score);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if cacheable && let Some(cache) = &mut self.cache {
            let bound = match best.1 {
                s if s <= window.0 => Bound::Upper,
                s if s >= window.1 => Bound::Lower,
                _                  => Bound::Exact,
            };
            cache.put(key, CacheEntry { score: best.1, depth, bound });
        }
        best
    }

    /// The first central base location among the generated additions, while either reserve is untouched.
    fn opening_move(&self, state: GameState, board: &Board, color: Color) -> Option<Move> {
        let untouched = [color, -color].iter().any(|c| board.reserve(*c) == SPHERES_PER_PLAYER);
        if !self.options.opening || state != GameState::Move || !untouched {
            return None;
        }
        let central = Location::central();
        legal_moves(state, color, board).into_iter()
            .find(|mv| mv.is_add() && mv.destination().is_some_and(|to| central.contains(&to)))
    }
}
