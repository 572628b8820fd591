/// A move that cannot be played in the current position
///
/// This is the only error the game rules produce. It is always recoverable:
/// the position it was raised on is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalAction {
    #[error("column {column} is out of range for a board {width} columns wide")]
    OutOfRange { column: usize, width: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),
}

impl IllegalAction {
    /// The column that was rejected
    pub fn column(&self) -> usize {
        match *self {
            IllegalAction::OutOfRange { column, .. } => column,
            IllegalAction::ColumnFull(column) => column,
        }
    }
}
