use std::fmt;

use crate::{Stone, WINDOW};

/// A `width` x `height` grid of stones
///
/// Cells are stored column by column. Within a column, index 0 is the top
/// cell and `height - 1` the bottom one, so stones stack from the highest
/// index downwards.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Stone>,
}

impl Board {
    /// Creates an empty board
    ///
    /// # Panics
    /// Panics if either dimension is zero
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![Stone::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Stone {
        self.cells[x * self.height + y]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, stone: Stone) {
        self.cells[x * self.height + y] = stone;
    }

    /// Returns column `x`, top cell first
    pub fn column(&self, x: usize) -> &[Stone] {
        &self.cells[x * self.height..(x + 1) * self.height]
    }

    /// Returns row `y`, leftmost cell first
    pub fn row(&self, y: usize) -> Vec<Stone> {
        (0..self.width).map(|x| self.get(x, y)).collect()
    }

    /// Returns every cell in column-major order
    pub fn flatten(&self) -> Vec<Stone> {
        self.cells.clone()
    }

    pub(crate) fn cells(&self) -> &[Stone] {
        &self.cells
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Stone>) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Returns every line that can hold a full window, in scan order:
    /// columns left to right, rows top to bottom, then the diagonals running
    /// down-right and finally those running down-left.
    pub fn lines(&self) -> Vec<Vec<Stone>> {
        let (w, h) = (self.width, self.height);
        let mut lines = Vec::with_capacity(2 * (w + h));

        for x in 0..w {
            lines.push(self.column(x).to_vec());
        }
        for y in 0..h {
            lines.push(self.row(y));
        }

        // down-right diagonals start on the top edge or the left edge
        for x in 0..w {
            lines.push(self.walk(x, 0, 1));
        }
        for y in 1..h {
            lines.push(self.walk(0, y, 1));
        }

        // down-left diagonals start on the top edge or the right edge
        for x in 0..w {
            lines.push(self.walk(x, 0, -1));
        }
        for y in 1..h {
            lines.push(self.walk(w - 1, y, -1));
        }

        lines.retain(|line| line.len() >= WINDOW);
        lines
    }

    // follows a diagonal from (x, y) moving one row down per step
    fn walk(&self, mut x: usize, mut y: usize, dx: isize) -> Vec<Stone> {
        let mut line = Vec::new();
        loop {
            line.push(self.get(x, y));
            y += 1;
            match (x as isize).checked_add(dx) {
                Some(next) if next >= 0 && (next as usize) < self.width && y < self.height => {
                    x = next as usize
                }
                _ => break,
            }
        }
        line
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            write!(f, "|")?;
            for x in 0..self.width {
                write!(f, "{}|", self.get(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_count_on_default_board() {
        let board = Board::new(7, 6);
        let lines = board.lines();
        // 7 columns, 6 rows and 6 diagonals in each direction
        assert_eq!(lines.len(), 7 + 6 + 12);
        assert!(lines.iter().all(|line| line.len() >= WINDOW));
    }

    #[test]
    fn short_boards_have_no_vertical_lines() {
        let board = Board::new(5, 3);
        let lines = board.lines();
        // only the three rows are long enough
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn walk_follows_diagonals() {
        let mut board = Board::new(4, 4);
        for i in 0..4 {
            board.set(i, i, Stone::Red);
            board.set(3 - i, i, Stone::Yellow);
        }
        let lines = board.lines();
        assert!(lines.contains(&vec![Stone::Red; 4]));
        assert!(lines.contains(&vec![Stone::Yellow; 4]));
    }
}
