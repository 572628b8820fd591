//! The rules and computer players of the board game 'Connect 4'
//!
//! Positions are immutable [`GameState`] values. A computer player searches
//! the game tree below a position with plain minimax or alpha-beta pruned
//! minimax, scoring the leaves with a hand tuned [`Heuristic`], and
//! returns the column it wants to play.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{apply_move, choose_bot_move, new_game, SearchMode};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let state = new_game();
//! let state = apply_move(&state, 3)?;
//!
//! let reply = choose_bot_move(&state, SearchMode::MinimaxAlphaBeta, 4);
//! assert!(reply.map_or(false, |column| state.is_legal_action(column)));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod board;

pub mod codec;

pub mod error;

pub mod evaluator;

pub mod search;

pub mod state;

pub mod stone;

pub mod tournament;


pub use board::Board;
pub use error::IllegalAction;
pub use evaluator::{evaluate, Evaluator, Heuristic};
pub use search::{BotConfig, SearchMode, Searcher};
pub use state::{GameState, Status};
pub use stone::Stone;
pub use tournament::{play_match, MatchRecord, Tournament, TournamentStats};

/// The width of the standard game board in tiles
pub const WIDTH: usize = 7;

/// The height of the standard game board in tiles
pub const HEIGHT: usize = 6;

/// The number of stones in a row needed to win
pub const WINDOW: usize = 4;

// a win must fit on the standard board in every direction
const_assert!(WINDOW >= 2);
const_assert!(WIDTH >= WINDOW);
const_assert!(HEIGHT >= WINDOW);

/// Starts a game on the standard board
pub fn new_game() -> GameState {
    GameState::default()
}

/// Returns the playable columns in ascending order
pub fn legal_actions(state: &GameState) -> Vec<usize> {
    state.legal_actions()
}

/// Returns the position after the player to move drops a stone in `column`
pub fn apply_move(state: &GameState, column: usize) -> Result<GameState, IllegalAction> {
    state.generate_successor(column)
}

/// Returns the player with four in a row, if any
pub fn winner(state: &GameState) -> Option<Stone> {
    state.winner()
}

/// Returns true when the board is full and nobody has won
pub fn is_draw(state: &GameState) -> bool {
    state.is_draw()
}

/// Returns true once the game is won or drawn
pub fn is_terminal(state: &GameState) -> bool {
    state.is_terminal()
}

/// Picks a move for the player to move, `None` once the game is over
///
/// `depth` is ignored by [`SearchMode::Random`].
pub fn choose_bot_move(state: &GameState, mode: SearchMode, depth: usize) -> Option<usize> {
    Searcher::new().choose(state, BotConfig::new(mode, depth))
}

/// Returns every cell of the board in column-major order, top cell first
pub fn serialize(state: &GameState) -> Vec<Stone> {
    state.board().flatten()
}
