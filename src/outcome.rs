use crate::color::Color;
use std::fmt;

/// How a finished game ended. The only way to finish is to capture a King.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    WhiteWin,
    BlackWin,
}

impl GameOutcome {
    pub fn won_by(color: Color) -> Self {
        match color {
            Color::White => GameOutcome::WhiteWin,
            Color::Black => GameOutcome::BlackWin,
        }
    }

    pub fn winner(&self) -> Color {
        match self {
            GameOutcome::WhiteWin => Color::White,
            GameOutcome::BlackWin => Color::Black,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameOutcome::WhiteWin => "white_win",
            GameOutcome::BlackWin => "black_win",
        };
        write!(f, "{}", s)
    }
}
