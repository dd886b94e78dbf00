use crate::board::{BOARD_COLS, BOARD_ROWS};
use std::fmt;

/// A space on the grid. Column 0, row 0 is White's bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub fn new(col: usize, row: usize) -> Self {
        Position { col, row }
    }

    pub fn is_valid(&self, width: usize, height: usize) -> bool {
        self.col < width && self.row < height
    }

    pub fn is_on_board(&self) -> bool {
        self.is_valid(BOARD_COLS, BOARD_ROWS)
    }

    /// The position `d_col`/`d_row` away, if that is still on the board.
    pub fn offset(&self, d_col: i32, d_row: i32) -> Option<Position> {
        let col = self.col as i32 + d_col;
        let row = self.row as i32 + d_row;
        if col < 0 || row < 0 {
            return None;
        }
        let pos = Position::new(col as usize, row as usize);
        pos.is_on_board().then_some(pos)
    }

    /// Signed (column, row) difference from `self` to `other`.
    pub fn delta(&self, other: &Position) -> (i32, i32) {
        (
            other.col as i32 - self.col as i32,
            other.row as i32 - self.row as i32,
        )
    }

    pub fn to_algebraic(&self) -> String {
        if self.col < 26 {
            format!("{}{}", (b'a' + self.col as u8) as char, self.row + 1)
        } else {
            format!("{}-{}", self.col, self.row + 1)
        }
    }

    pub fn from_algebraic(s: &str) -> Result<Self, String> {
        let mut chars = s.chars();
        let col_char = chars.next().ok_or("Invalid position string")?;
        let row_str = chars.as_str();

        if !col_char.is_ascii_lowercase() {
            return Err("Invalid file character".to_string());
        }
        let col = (col_char as u8 - b'a') as usize;

        let row = row_str
            .parse::<usize>()
            .map_err(|_| "Invalid row number".to_string())?;
        if row == 0 {
            return Err("Invalid row number".to_string());
        }

        let pos = Position::new(col, row - 1);
        if !pos.is_on_board() {
            return Err(format!("Position {} is off the board", s));
        }
        Ok(pos)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
