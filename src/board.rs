use crate::assets::AssetSet;
use crate::color::Color;
use crate::pieces::Piece;
use crate::position::Position;
use std::fmt;

pub const BOARD_COLS: usize = 5;
pub const BOARD_ROWS: usize = 12;

const SPACES: usize = BOARD_COLS * BOARD_ROWS;

/// The grid of spaces. Each space holds at most one piece.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; SPACES],
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [None; SPACES],
        }
    }

    /// Builds a board from a layout string, top row first:
    /// `"rnbqk/ppppp/5/5/5/5/5/5/5/5/PPPPP/RNBQK"`.
    pub fn from_layout(layout: &str, assets: &AssetSet) -> Result<Self, String> {
        let mut board = Board::empty();
        board.load_layout(layout, assets)?;
        Ok(board)
    }

    pub fn width(&self) -> usize {
        BOARD_COLS
    }

    pub fn height(&self) -> usize {
        BOARD_ROWS
    }

    fn index(&self, pos: &Position) -> usize {
        assert!(pos.is_on_board(), "position {:?} is off the board", pos);
        pos.row * BOARD_COLS + pos.col
    }

    pub fn get_piece(&self, pos: &Position) -> Option<Piece> {
        self.squares[self.index(pos)]
    }

    pub(crate) fn piece_mut(&mut self, pos: &Position) -> Option<&mut Piece> {
        let index = self.index(pos);
        self.squares[index].as_mut()
    }

    pub fn set_piece(&mut self, pos: &Position, piece: Option<Piece>) {
        let index = self.index(pos);
        self.squares[index] = piece;
    }

    /// Removes and returns the occupant of `pos`.
    pub fn take_piece(&mut self, pos: &Position) -> Option<Piece> {
        let index = self.index(pos);
        self.squares[index].take()
    }

    pub fn is_empty(&self, pos: &Position) -> bool {
        self.get_piece(pos).is_none()
    }

    /// The color occupying `pos`, if any.
    pub fn color_at(&self, pos: &Position) -> Option<Color> {
        self.get_piece(pos).map(|p| p.color)
    }

    pub fn clear(&mut self) {
        self.squares = [None; SPACES];
    }

    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLS).map(move |col| Position::new(col, row)))
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Board::positions().filter_map(|pos| self.get_piece(&pos).map(|piece| (pos, piece)))
    }

    pub fn pieces(&self, color: Color) -> Vec<(Position, Piece)> {
        self.occupied()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|s| s.is_some()).count()
    }

    pub fn to_layout(&self) -> String {
        let mut layout = String::new();

        for row in (0..BOARD_ROWS).rev() {
            let mut empty_count = 0;

            for col in 0..BOARD_COLS {
                if let Some(piece) = self.get_piece(&Position::new(col, row)) {
                    if empty_count > 0 {
                        layout.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    layout.push(piece.to_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                layout.push_str(&empty_count.to_string());
            }

            if row > 0 {
                layout.push('/');
            }
        }

        layout
    }

    fn load_layout(&mut self, layout: &str, assets: &AssetSet) -> Result<(), String> {
        self.clear();

        let parts: Vec<&str> = layout.split('/').collect();

        if parts.len() != BOARD_ROWS {
            return Err(format!(
                "Invalid layout: expected {} rows, got {}",
                BOARD_ROWS,
                parts.len()
            ));
        }

        for (row_idx, row_str) in parts.iter().enumerate() {
            let row = BOARD_ROWS - 1 - row_idx;
            let mut col = 0;

            for c in row_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as usize;
                } else if let Some(piece) = Piece::from_char(c, assets) {
                    if col >= BOARD_COLS {
                        return Err("Invalid layout: col index out of bounds".to_string());
                    }
                    self.set_piece(&Position::new(col, row), Some(piece));
                    col += 1;
                } else {
                    return Err(format!("Invalid layout character: {}", c));
                }
            }

            if col != BOARD_COLS {
                return Err(format!(
                    "Invalid layout: row {} has wrong number of squares",
                    row + 1
                ));
            }
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..BOARD_ROWS).rev() {
            write!(f, "{:2} ", row + 1)?;
            for col in 0..BOARD_COLS {
                match self.get_piece(&Position::new(col, row)) {
                    Some(piece) => write!(f, "{} ", piece.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }

        write!(f, "   ")?;
        for col in 0..BOARD_COLS {
            write!(f, "{} ", (b'a' + col as u8) as char)?;
        }
        Ok(())
    }
}
