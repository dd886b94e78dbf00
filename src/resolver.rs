use arrayvec::ArrayVec;

use crate::assets::AssetSet;
use crate::board::Board;
use crate::pieces::{Piece, PieceType};
use crate::position::Position;
use crate::r#move::{Move, MoveFlags};
use crate::rules;

/// Upper bound on effects of one move: a capture, the relocation, a promotion.
pub const MAX_EFFECTS: usize = 3;

/// A single board mutation produced by resolving a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Remove `piece` from play. For en passant `at` is not the destination.
    Capture { at: Position, piece: Piece },
    /// Move `piece` (already carrying its post-move state) from `from` to `to`.
    Relocate {
        from: Position,
        to: Position,
        piece: Piece,
    },
    /// Replace the pawn on `at` with `queen`.
    Promote { at: Position, queen: Piece },
}

impl Effect {
    pub fn apply(&self, board: &mut Board) {
        match self {
            Effect::Capture { at, .. } => {
                board.take_piece(at);
            }
            Effect::Relocate { from, to, piece } => {
                board.take_piece(from);
                board.set_piece(to, Some(*piece));
            }
            Effect::Promote { at, queen } => board.set_piece(at, Some(*queen)),
        }
    }
}

/// A legal move together with the ordered mutations that carry it out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub mv: Move,
    pub effects: ArrayVec<Effect, MAX_EFFECTS>,
}

impl Resolution {
    pub fn captures_king(&self) -> bool {
        self.mv.flags.contains(MoveFlags::KING_CAPTURE)
    }
}

/// Decides whether the piece on `src` may move to `dst` and, if so, lists the
/// board mutations in the order they must be applied. The board is not touched.
pub fn resolve(
    board: &Board,
    src: &Position,
    dst: &Position,
    assets: &AssetSet,
) -> Option<Resolution> {
    let mv = rules::classify_move(board, src, dst)?;
    let mover = board.get_piece(src)?;
    let mut effects = ArrayVec::new();

    let victim_square = mv.en_passant_victim().unwrap_or(*dst);
    if let Some(victim) = board.get_piece(&victim_square) {
        if mv.flags.contains(MoveFlags::CAPTURE) {
            effects.push(Effect::Capture {
                at: victim_square,
                piece: victim,
            });
        }
    }

    let moved = mover.after_move(&mv);
    effects.push(Effect::Relocate {
        from: *src,
        to: *dst,
        piece: moved,
    });

    if mv.flags.contains(MoveFlags::PROMOTION) && moved.is_type(PieceType::Pawn) {
        effects.push(Effect::Promote {
            at: *dst,
            queen: moved.promoted(assets),
        });
    }

    Some(Resolution { mv, effects })
}
