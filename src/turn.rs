use crate::board::Board;
use crate::color::Color;
use crate::outcome::GameOutcome;
use crate::position::Position;

/// Whose turn it is, who moved last, and whether a King has fallen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    player_turn: Color,
    /// Where the last moved piece landed.
    last_piece_moved: Option<Position>,
    outcome: Option<GameOutcome>,
}

impl TurnState {
    pub fn new(player_turn: Color) -> Self {
        TurnState {
            player_turn,
            last_piece_moved: None,
            outcome: None,
        }
    }

    pub fn player_turn(&self) -> Color {
        self.player_turn
    }

    pub fn last_piece_moved(&self) -> Option<Position> {
        self.last_piece_moved
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner(&self) -> Option<Color> {
        self.outcome.map(|o| o.winner())
    }

    /// Closes out a committed move that landed on `landed` and hands the turn over.
    ///
    /// The previous mover loses its double-step mark here, so an en passant
    /// reply is only available on the move right after the double step.
    pub fn record_move(&mut self, board: &mut Board, landed: Position) -> Color {
        assert!(!self.is_over(), "turn recorded after the game ended");

        if let Some(previous) = self.last_piece_moved {
            if let Some(piece) = board.piece_mut(&previous) {
                piece.clear_double_step();
            }
        }
        self.last_piece_moved = Some(landed);
        self.player_turn = self.player_turn.opposite();
        self.player_turn
    }

    /// Ends the game. Nothing else about the turn changes.
    pub fn finish(&mut self, winner: Color) {
        assert!(!self.is_over(), "game finished twice");
        self.outcome = Some(GameOutcome::won_by(winner));
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new(Color::White)
    }
}
