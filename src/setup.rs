//! Randomized opening position.
//!
//! Every space of the occupancy template gets an independently drawn piece
//! type. Nothing limits how many Kings a side receives.

use rand::Rng;
use rand::prelude::IndexedRandom;

use crate::assets::AssetSet;
use crate::board::{BOARD_ROWS, Board};
use crate::color::Color;
use crate::pieces::{Piece, PieceType};
use crate::position::Position;

/// Piece types a setup space can receive, each with equal probability.
pub const SPAWNABLE: [PieceType; 6] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Pawn,
];

/// Whether setup places a piece on `pos`.
///
/// Rows 0, 1, 5, 6, 10 and 11 are full. Rows 3 and 8 skip the centre column,
/// rows 2, 4, 7 and 9 only use columns 0, 2 and 4.
pub fn is_setup_space(pos: &Position) -> bool {
    if !pos.is_on_board() {
        return false;
    }
    match pos.row {
        0 | 1 | 5 | 6 | 10 | 11 => true,
        3 | 8 => pos.col != 2,
        _ => pos.col % 2 == 0,
    }
}

/// The light spaces of the board pattern: exactly the ones setup leaves empty.
pub fn is_light_space(pos: &Position) -> bool {
    pos.is_on_board() && !is_setup_space(pos)
}

/// Side that owns the piece set up on `pos`. White holds the lower half.
pub fn setup_color(pos: &Position) -> Color {
    if pos.row < BOARD_ROWS / 2 {
        Color::White
    } else {
        Color::Black
    }
}

pub fn setup_spaces() -> impl Iterator<Item = Position> {
    Board::positions().filter(is_setup_space)
}

pub fn random_piece_type<R: Rng + ?Sized>(rng: &mut R) -> PieceType {
    SPAWNABLE.choose(rng).copied().unwrap_or(PieceType::Pawn)
}

/// Clears `board` and fills every setup space with a random piece.
pub fn populate_board<R: Rng + ?Sized>(board: &mut Board, assets: &AssetSet, rng: &mut R) {
    board.clear();
    for pos in setup_spaces() {
        let color = setup_color(&pos);
        let piece = Piece::with_assets(random_piece_type(rng), color, assets);
        board.set_piece(&pos, Some(piece));
    }
}

pub fn random_board<R: Rng + ?Sized>(assets: &AssetSet, rng: &mut R) -> Board {
    let mut board = Board::empty();
    populate_board(&mut board, assets, rng);
    board
}
