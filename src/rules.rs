//! Movement legality for every piece kind.
//!
//! Everything here reads the board and never mutates it. Side effects of a
//! legal move (captures, flag changes, promotion) are described by the
//! [`MoveFlags`] on the returned [`Move`] and applied by the resolver.

use crate::board::Board;
use crate::color::Color;
use crate::pieces::{Piece, PieceKind, PieceType};
use crate::position::Position;
use crate::r#move::{Move, MoveFlags};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Row a pawn must stand on to capture en passant.
pub fn en_passant_row(color: Color) -> usize {
    match color {
        Color::White => 4,
        Color::Black => 3,
    }
}

/// Row on which a pawn of `color` turns into a queen.
pub fn promotion_row(color: Color) -> usize {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

pub fn is_valid_move(board: &Board, src: &Position, dst: &Position) -> bool {
    classify_move(board, src, dst).is_some()
}

/// Classifies the move of the piece on `src` to `dst`.
///
/// Returns `None` when the move is illegal: no piece on `src`, `dst` equal to
/// `src` or held by an ally, or a destination the piece cannot reach.
pub fn classify_move(board: &Board, src: &Position, dst: &Position) -> Option<Move> {
    let piece = board.get_piece(src)?;
    if src == dst {
        return None;
    }

    let target = board.get_piece(dst);
    if target.is_some_and(|t| t.color == piece.color) {
        return None;
    }

    let mut flags = match piece.kind {
        PieceKind::Pawn { .. } => pawn_flags(board, src, dst, &piece)?,
        PieceKind::Knight => knight_reaches(src, dst).then(MoveFlags::empty)?,
        PieceKind::Bishop => diagonal_path_clear(board, src, dst).then(MoveFlags::empty)?,
        PieceKind::Rook | PieceKind::Miner { .. } => {
            straight_path_clear(board, src, dst).then(MoveFlags::empty)?
        }
        PieceKind::Queen { .. } => (straight_path_clear(board, src, dst)
            || diagonal_path_clear(board, src, dst))
        .then(MoveFlags::empty)?,
        PieceKind::King => king_reaches(src, dst).then(MoveFlags::empty)?,
    };

    if let Some(target) = target {
        flags |= MoveFlags::CAPTURE;
        if target.is_type(PieceType::King) {
            flags |= MoveFlags::KING_CAPTURE;
        }
    }

    if piece.is_type(PieceType::Pawn) && dst.row == promotion_row(piece.color) {
        flags |= MoveFlags::PROMOTION;
    }

    Some(Move::new(*src, *dst, flags))
}

/// Every destination the piece on `src` may legally move to.
pub fn valid_targets(board: &Board, src: &Position) -> Vec<Position> {
    moves_from(board, src).into_iter().map(|mv| mv.dst).collect()
}

/// Every legal move of the piece on `src`, classified.
pub fn moves_from(board: &Board, src: &Position) -> Vec<Move> {
    if board.is_empty(src) {
        return Vec::new();
    }
    Board::positions()
        .filter_map(|dst| classify_move(board, src, &dst))
        .collect()
}

fn pawn_flags(board: &Board, src: &Position, dst: &Position, pawn: &Piece) -> Option<MoveFlags> {
    let (d_col, d_row) = src.delta(dst);
    let advance = d_row * pawn.color.forward();
    let occupied = !board.is_empty(dst);

    match (d_col.abs(), advance) {
        (0, 1) if !occupied => Some(MoveFlags::empty()),
        // The space jumped over is not inspected.
        (0, 2) if !occupied && pawn.first_move() => Some(MoveFlags::DOUBLE_STEP),
        (1, 1) if occupied => Some(MoveFlags::empty()),
        (1, 1) if en_passant_available(board, src, dst, pawn) => {
            Some(MoveFlags::CAPTURE | MoveFlags::EN_PASSANT)
        }
        _ => None,
    }
}

fn en_passant_available(board: &Board, src: &Position, dst: &Position, pawn: &Piece) -> bool {
    if src.row != en_passant_row(pawn.color) {
        return false;
    }
    board
        .get_piece(&Position::new(dst.col, src.row))
        .is_some_and(|victim| victim.color != pawn.color && victim.just_made_double_step())
}

fn knight_reaches(src: &Position, dst: &Position) -> bool {
    KNIGHT_OFFSETS.contains(&src.delta(dst))
}

fn king_reaches(src: &Position, dst: &Position) -> bool {
    let (d_col, d_row) = src.delta(dst);
    d_col.abs() <= 1 && d_row.abs() <= 1 && (d_col, d_row) != (0, 0)
}

/// Bishop-style movement: equal column and row distance, nothing in between.
pub fn diagonal_path_clear(board: &Board, src: &Position, dst: &Position) -> bool {
    let (d_col, d_row) = src.delta(dst);
    if d_col.abs() != d_row.abs() || d_col == 0 {
        return false;
    }
    path_clear(board, src, (d_col.signum(), d_row.signum()), d_col.abs())
}

/// Rook-style movement: exactly one of column and row changes, nothing in between.
pub fn straight_path_clear(board: &Board, src: &Position, dst: &Position) -> bool {
    let (d_col, d_row) = src.delta(dst);
    if (d_col == 0) == (d_row == 0) {
        return false;
    }
    path_clear(
        board,
        src,
        (d_col.signum(), d_row.signum()),
        d_col.abs().max(d_row.abs()),
    )
}

/// Whether every space strictly between `src` and `distance` steps along `step` is empty.
fn path_clear(board: &Board, src: &Position, step: (i32, i32), distance: i32) -> bool {
    (1..distance).all(|i| {
        src.offset(step.0 * i, step.1 * i)
            .is_some_and(|pos| board.is_empty(&pos))
    })
}
