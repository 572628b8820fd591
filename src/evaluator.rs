//! Static evaluation of positions
//!
//! Scores are always given from the point of view of the player to move:
//! positive values favour them, negative values favour their opponent.

use crate::{GameState, Stone, WINDOW};

/// Score of a window holding three stones of one player and one empty cell
pub const WINDOW_SCORE: f64 = 5.0;
/// Bound on the total contribution of a single line
pub const LINE_CLAMP: f64 = 5.0;
/// Weight of a stone in the centre column(s)
pub const CENTRE_WEIGHT: f64 = 1.0;
/// Weight of a stone in the columns next to the centre
pub const NEAR_CENTRE_WEIGHT: f64 = 0.5;

/// Maps a position to a score for its current player
pub trait Evaluator {
    fn evaluate(&self, state: &GameState) -> f64;
}

/// The hand tuned evaluation used by the bots
///
/// Won and lost positions score positive and negative infinity, drawn ones
/// zero. Any other position is scored by a centre column bias plus, for every
/// row, column and diagonal, the clamped sum of its window scores.
#[derive(Copy, Clone, Debug, Default)]
pub struct Heuristic;

impl Evaluator for Heuristic {
    fn evaluate(&self, state: &GameState) -> f64 {
        let player = state.current_player();

        match state.winner() {
            Some(winner) if winner == player => return f64::INFINITY,
            Some(_) => return f64::NEG_INFINITY,
            None if state.is_draw() => return 0.0,
            None => {}
        }

        let board = state.board();
        let mut score = 0.0;

        for x in 0..board.width() {
            let weight = column_weight(board.width(), x);
            if weight == 0.0 {
                continue;
            }
            for &cell in board.column(x) {
                score += weight * ownership(cell, player);
            }
        }

        for line in board.lines() {
            score += line_score(&line, player);
        }

        score
    }
}

/// Evaluates `state` with the default [`Heuristic`]
pub fn evaluate(state: &GameState) -> f64 {
    Heuristic.evaluate(state)
}

// +1 for the player's stones, -1 for the opponent's
fn ownership(cell: Stone, player: Stone) -> f64 {
    if cell.is_empty() {
        0.0
    } else if cell == player {
        1.0
    } else {
        -1.0
    }
}

// one centre column on odd widths, two on even widths, and half weight on
// the columns either side of them
fn column_weight(width: usize, x: usize) -> f64 {
    let distance = (2 * x as isize + 1 - width as isize).abs();
    if distance <= 1 {
        CENTRE_WEIGHT
    } else if distance <= 3 {
        NEAR_CENTRE_WEIGHT
    } else {
        0.0
    }
}

// sum of the window scores along a line, clamped to +/- LINE_CLAMP
fn line_score(line: &[Stone], player: Stone) -> f64 {
    let score: f64 = line
        .windows(WINDOW)
        .map(|window| window_score(window, player))
        .sum();
    score.max(-LINE_CLAMP).min(LINE_CLAMP)
}

fn window_score(window: &[Stone], player: Stone) -> f64 {
    let own = window.iter().filter(|&&cell| cell == player).count();
    let theirs = window.iter().filter(|&&cell| cell == player.opponent()).count();
    let empty = window.len() - own - theirs;

    if empty == 1 && own == WINDOW - 1 {
        WINDOW_SCORE
    } else if empty == 1 && theirs == WINDOW - 1 {
        -WINDOW_SCORE
    } else {
        0.0
    }
}
