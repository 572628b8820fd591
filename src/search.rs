//! Move selection for computer players
//!
//! Three strategies are available: a uniformly random legal move, plain
//! minimax and minimax with alpha-beta pruning. Both minimax variants break
//! ties between equally valued moves with a coin flip drawn from the
//! searcher's random source, so seeding that source makes a search
//! reproducible.

use anyhow::{anyhow, Result};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::{Evaluator, GameState, Heuristic, Stone};

/// How a computer player picks its moves
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SearchMode {
    Random,
    Minimax,
    MinimaxAlphaBeta,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [
        SearchMode::Random,
        SearchMode::Minimax,
        SearchMode::MinimaxAlphaBeta,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SearchMode::Random => "random",
            SearchMode::Minimax => "minimax",
            SearchMode::MinimaxAlphaBeta => "minimax-alphabeta",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "r" => Ok(SearchMode::Random),
            "minimax" | "m" => Ok(SearchMode::Minimax),
            "minimax-alphabeta" | "alphabeta" | "ab" | "a" => Ok(SearchMode::MinimaxAlphaBeta),
            other => Err(anyhow!(
                "unknown search mode '{}', expected one of: random, minimax, minimax-alphabeta",
                other
            )),
        }
    }
}

/// A search mode together with its depth in plies
///
/// Parsed from `"<mode>"` or `"<mode>:<depth>"`, e.g. `"minimax:3"`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct BotConfig {
    pub mode: SearchMode,
    pub depth: usize,
}

impl BotConfig {
    pub const DEFAULT_DEPTH: usize = 4;

    pub fn new(mode: SearchMode, depth: usize) -> Self {
        Self { mode, depth }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self::new(SearchMode::MinimaxAlphaBeta, Self::DEFAULT_DEPTH)
    }
}

impl fmt::Display for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            SearchMode::Random => write!(f, "{}", self.mode),
            _ => write!(f, "{}:{}", self.mode, self.depth),
        }
    }
}

impl FromStr for BotConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(2, ':');
        let mode = parts.next().unwrap_or_default().parse::<SearchMode>()?;
        let depth = match parts.next() {
            Some(depth) => depth
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow!("could not parse '{}' as a search depth", depth))?,
            None => Self::DEFAULT_DEPTH,
        };
        Ok(Self::new(mode, depth))
    }
}

/// Picks moves for a computer player
///
/// # Value orientation
/// Values returned by [`minimax`] and [`minimax_alpha_beta`] are given from
/// the point of view of the player to move in the searched position: that
/// player maximises, their opponent minimises. Leaf evaluations made with
/// the other player to move are negated to match.
///
/// [`minimax`]: Searcher::minimax
/// [`minimax_alpha_beta`]: Searcher::minimax_alpha_beta
#[derive(Clone, Debug)]
pub struct Searcher<E = Heuristic, R = StdRng> {
    evaluator: E,
    rng: R,

    /// The number of positions visited by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher<Heuristic, StdRng> {
    /// Creates a `Searcher` with the default evaluation and an entropy seeded random source
    pub fn new() -> Self {
        Self::with_parts(Heuristic, StdRng::from_entropy())
    }

    /// Creates a `Searcher` whose tie breaks are fixed by `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::with_parts(Heuristic, StdRng::seed_from_u64(seed))
    }
}

impl Default for Searcher<Heuristic, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Evaluator, R: Rng> Searcher<E, R> {
    pub fn with_parts(evaluator: E, rng: R) -> Self {
        Self {
            evaluator,
            rng,
            node_count: 0,
        }
    }

    /// Picks a move for the player to move, `None` if the game is over
    pub fn choose(&mut self, state: &GameState, config: BotConfig) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }

        let start = Instant::now();
        let nodes_before = self.node_count;

        let (column, value) = match config.mode {
            SearchMode::Random => (self.random(state), None),
            SearchMode::Minimax => {
                let (column, value) = self.minimax(state, config.depth);
                (column, Some(value))
            }
            SearchMode::MinimaxAlphaBeta => {
                let (column, value) = self.minimax_alpha_beta(state, config.depth);
                (column, Some(value))
            }
        };

        tracing::debug!(
            mode = %config.mode,
            depth = config.depth,
            player = state.current_player().name(),
            column = ?column,
            value = ?value,
            nodes = self.node_count - nodes_before,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "search finished"
        );
        column
    }

    /// Returns a uniformly random legal move
    pub fn random(&mut self, state: &GameState) -> Option<usize> {
        state.legal_actions().choose(&mut self.rng).copied()
    }

    /// Performs a full minimax search `depth` plies deep
    ///
    /// Returns the chosen move (`None` at a leaf) and its value. The value is
    /// always from the point of view of the player to move in `state`.
    pub fn minimax(&mut self, state: &GameState, depth: usize) -> (Option<usize>, f64) {
        let root = state.current_player();
        self.minimax_node(state, root, depth)
    }

    fn minimax_node(&mut self, state: &GameState, root: Stone, depth: usize) -> (Option<usize>, f64) {
        self.node_count += 1;

        let actions = state.legal_actions();
        if depth == 0 || state.is_terminal() || actions.is_empty() {
            return (None, self.leaf_value(state, root));
        }

        let maximize = state.current_player() == root;
        let mut best = Best::new(maximize, actions[self.rng.gen_range(0..actions.len())]);

        for (action, successor) in successors(state, &actions) {
            let (_, value) = self.minimax_node(&successor, root, depth - 1);
            best.offer(action, value, &mut self.rng);
        }

        (Some(best.action), best.value)
    }

    /// Performs a minimax search with alpha-beta pruning over the full window
    ///
    /// Picks moves by the same rules as [`minimax`](Searcher::minimax) and
    /// returns the same value for the searched position.
    pub fn minimax_alpha_beta(&mut self, state: &GameState, depth: usize) -> (Option<usize>, f64) {
        self.alpha_beta(state, depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Performs a minimax search with alpha-beta pruning inside `[alpha, beta]`
    pub fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: usize,
        alpha: f64,
        beta: f64,
    ) -> (Option<usize>, f64) {
        let root = state.current_player();
        self.alpha_beta_node(state, root, depth, alpha, beta)
    }

    fn alpha_beta_node(
        &mut self,
        state: &GameState,
        root: Stone,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
    ) -> (Option<usize>, f64) {
        self.node_count += 1;

        let actions = state.legal_actions();
        if depth == 0 || state.is_terminal() || actions.is_empty() {
            return (None, self.leaf_value(state, root));
        }

        let maximize = state.current_player() == root;
        let mut best = Best::new(maximize, actions[self.rng.gen_range(0..actions.len())]);

        for (action, successor) in successors(state, &actions) {
            let (_, value) = self.alpha_beta_node(&successor, root, depth - 1, alpha, beta);
            best.offer(action, value, &mut self.rng);

            if maximize {
                alpha = alpha.max(best.value);
            } else {
                beta = beta.min(best.value);
            }
            // the other player will never let the game reach this position.
            // a cut layer returns a bound strictly outside the window, so it
            // can never tie an exact value one layer up
            if alpha > beta {
                break;
            }
        }

        (Some(best.action), best.value)
    }

    // evaluation of a leaf from the searching player's point of view
    fn leaf_value(&self, state: &GameState, root: Stone) -> f64 {
        let value = self.evaluator.evaluate(state);
        if state.current_player() == root {
            value
        } else {
            -value
        }
    }
}

// the best move of one search layer
struct Best {
    maximize: bool,
    action: usize,
    value: f64,
}

impl Best {
    fn new(maximize: bool, fallback: usize) -> Self {
        Self {
            maximize,
            action: fallback,
            value: if maximize {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            },
        }
    }

    // strictly better values replace the current move, equal ones win a coin flip
    fn offer<R: Rng>(&mut self, action: usize, value: f64, rng: &mut R) {
        let better = if self.maximize {
            value > self.value
        } else {
            value < self.value
        };
        if better {
            self.action = action;
            self.value = value;
        } else if value == self.value && rng.gen_bool(0.5) {
            self.action = action;
        }
    }
}

fn successors<'a>(
    state: &'a GameState,
    actions: &'a [usize],
) -> impl Iterator<Item = (usize, GameState)> + 'a {
    actions.iter().filter_map(move |&action| {
        state
            .generate_successor(action)
            .ok()
            .map(|successor| (action, successor))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bot_configs() -> Result<()> {
        assert_eq!("random".parse::<BotConfig>()?.mode, SearchMode::Random);
        assert_eq!(
            "minimax:3".parse::<BotConfig>()?,
            BotConfig::new(SearchMode::Minimax, 3)
        );
        assert_eq!("AlphaBeta".parse::<BotConfig>()?, BotConfig::default());
        assert!("minimax:deep".parse::<BotConfig>().is_err());
        assert!("negamax".parse::<BotConfig>().is_err());

        for mode in SearchMode::ALL.iter() {
            let config = BotConfig::new(*mode, 2);
            let parsed = config.to_string().parse::<BotConfig>()?;
            assert_eq!(parsed.mode, config.mode);
        }
        Ok(())
    }
}
