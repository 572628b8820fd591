use std::fmt;

/// The contents of a single cell of the board
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Stone {
    Empty,
    Red,
    Yellow,
}

impl Stone {
    /// The player that moves first in every game
    pub const FIRST_PLAYER: Stone = Stone::Yellow;

    pub fn is_empty(self) -> bool {
        matches!(self, Stone::Empty)
    }

    /// Returns the other player, `Empty` has no opponent
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Red => Stone::Yellow,
            Stone::Yellow => Stone::Red,
            Stone::Empty => Stone::Empty,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Red => "Red",
            Stone::Yellow => "Yellow",
            Stone::Empty => "Empty",
        }
    }

    // tag bytes for the snapshot codec
    pub(crate) fn to_tag(self) -> u8 {
        match self {
            Stone::Empty => 0,
            Stone::Red => 1,
            Stone::Yellow => 2,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Stone::Empty),
            1 => Some(Stone::Red),
            2 => Some(Stone::Yellow),
            _ => None,
        }
    }
}

impl Default for Stone {
    fn default() -> Self {
        Stone::Empty
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Stone::Red => 'R',
            Stone::Yellow => 'Y',
            Stone::Empty => ' ',
        };
        write!(f, "{}", c)
    }
}
