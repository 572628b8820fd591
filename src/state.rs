use anyhow::{anyhow, Result};

use std::sync::OnceLock;

use crate::{Board, IllegalAction, Stone, HEIGHT, WIDTH, WINDOW};

/// Where a game stands
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Status {
    InProgress,
    Won(Stone),
    Drawn,
}

/// A position: the board, the player to move and the number of stones played
///
/// States handed to the search are never mutated. [`generate_successor`]
/// copies the board, so a successor shares nothing with its parent.
///
/// [`generate_successor`]: GameState::generate_successor
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    current_player: Stone,
    turns: usize,
    // resolved on the first call to `winner()`, reset by `place()`
    winner: OnceLock<Option<Stone>>,
}

impl GameState {
    /// Creates an empty game of the given size, Yellow to move
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            board: Board::new(width, height),
            current_player: Stone::FIRST_PLAYER,
            turns: 0,
            winner: OnceLock::new(),
        }
    }

    /// Plays a sequence of moves on a default sized board
    ///
    /// Moves are column digits counted from 1, so `"44"` stacks two stones
    /// in the middle column of a 7 wide board.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut state = Self::default();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    // abort if the position is won at any point
                    if state.winner().is_some() {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    state.place(column - 1)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(state)
    }

    /// Rebuilds a state from a board alone
    ///
    /// The player to move and the turn count follow from the stones on the
    /// board, which must have fallen into place and be balanced between the
    /// two players.
    pub fn from_board(board: Board) -> Result<Self> {
        for x in 0..board.width() {
            let column = board.column(x);
            if let Some(top) = column.iter().position(|cell| !cell.is_empty()) {
                if column[top..].iter().any(|cell| cell.is_empty()) {
                    return Err(anyhow!("column {} has a floating stone", x));
                }
            }
        }

        let first = Stone::FIRST_PLAYER;
        let cells = board.cells();
        let first_count = cells.iter().filter(|&&cell| cell == first).count();
        let second_count = cells.iter().filter(|&&cell| cell == first.opponent()).count();

        let current_player = if first_count == second_count {
            first
        } else if first_count == second_count + 1 {
            first.opponent()
        } else {
            return Err(anyhow!(
                "unbalanced board: {} {} stones against {} {} stones",
                first_count,
                first.name(),
                second_count,
                first.opponent().name()
            ));
        };

        Ok(Self {
            board,
            current_player,
            turns: first_count + second_count,
            winner: OnceLock::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Stone {
        self.current_player
    }

    /// The number of stones played so far
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    /// Returns the number of `stone` cells on the board
    pub fn count(&self, stone: Stone) -> usize {
        self.board.cells().iter().filter(|&&cell| cell == stone).count()
    }

    fn check_action(&self, column: usize) -> Result<(), IllegalAction> {
        if column >= self.width() {
            return Err(IllegalAction::OutOfRange {
                column,
                width: self.width(),
            });
        }
        // the top cell is the last one to fill up
        if !self.board.get(column, 0).is_empty() {
            return Err(IllegalAction::ColumnFull(column));
        }
        Ok(())
    }

    pub fn is_legal_action(&self, column: usize) -> bool {
        self.check_action(column).is_ok()
    }

    /// Returns every playable column in ascending order
    pub fn legal_actions(&self) -> Vec<usize> {
        (0..self.width())
            .filter(|&column| self.is_legal_action(column))
            .collect()
    }

    /// Drops a stone of the current player into `column` and passes the turn
    ///
    /// On error the state is left as it was.
    pub fn place(&mut self, column: usize) -> Result<(), IllegalAction> {
        self.check_action(column)?;

        // the stone lands on the lowest empty cell
        let y = self
            .board
            .column(column)
            .iter()
            .rposition(|cell| cell.is_empty())
            .ok_or(IllegalAction::ColumnFull(column))?;

        self.board.set(column, y, self.current_player);
        tracing::trace!(player = self.current_player.name(), column, row = y, "stone placed");

        self.turns += 1;
        self.current_player = self.current_player.opponent();
        self.winner = OnceLock::new();
        Ok(())
    }

    /// Returns the position after the current player plays `column`
    pub fn generate_successor(&self, column: usize) -> Result<GameState, IllegalAction> {
        let mut successor = Self {
            board: self.board.clone(),
            current_player: self.current_player,
            turns: self.turns,
            winner: OnceLock::new(),
        };
        successor.place(column)?;
        Ok(successor)
    }

    /// Returns the owner of the first run of four found, if any
    ///
    /// Lines are scanned columns first, then rows, then both diagonal
    /// directions. The result is computed once per position.
    pub fn winner(&self) -> Option<Stone> {
        *self.winner.get_or_init(|| find_run(&self.board))
    }

    /// True if the board is full and nobody has won
    pub fn is_draw(&self) -> bool {
        self.turns == self.width() * self.height() && self.winner().is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_draw()
    }

    pub fn status(&self) -> Status {
        match self.winner() {
            Some(stone) => Status::Won(stone),
            None if self.is_draw() => Status::Drawn,
            None => Status::InProgress,
        }
    }
}

impl Default for GameState {
    /// A fresh game on the standard board
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.current_player == other.current_player
            && self.turns == other.turns
    }
}

impl Eq for GameState {}

// walks each line keeping a streak of equal stones, any streak of WINDOW
// non-empty stones wins
fn find_run(board: &Board) -> Option<Stone> {
    for line in board.lines() {
        let mut streak = 0;
        let mut last_stone = None;
        for &stone in line.iter() {
            if Some(stone) != last_stone {
                streak = 1;
                last_stone = Some(stone);
            } else {
                streak += 1;
            }
            if streak >= WINDOW && !stone.is_empty() {
                return Some(stone);
            }
        }
    }
    None
}
