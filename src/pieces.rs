use crate::assets::{AssetId, AssetSet};
use crate::color::Color;
use crate::r#move::{Move, MoveFlags};

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Color::White => "White",
            Color::Black => "Black",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Miner,
}

impl PieceType {
    pub const COUNT: usize = 7;

    pub const ALL: [PieceType; PieceType::COUNT] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
        PieceType::Miner,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn to_char(&self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
            PieceType::Miner => 'm',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            'm' => Some(PieceType::Miner),
            _ => None,
        }
    }
}

/// Piece kind together with the state that kind carries between moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn {
        first_move: bool,
        just_made_double_step: bool,
    },
    Knight,
    Bishop,
    Rook,
    /// `pawn_asset` is set when the queen came from a promotion.
    Queen {
        pawn_asset: Option<AssetId>,
    },
    King,
    Miner {
        moved: bool,
    },
}

impl PieceKind {
    pub fn fresh(piece_type: PieceType) -> Self {
        match piece_type {
            PieceType::Pawn => PieceKind::Pawn {
                first_move: true,
                just_made_double_step: false,
            },
            PieceType::Knight => PieceKind::Knight,
            PieceType::Bishop => PieceKind::Bishop,
            PieceType::Rook => PieceKind::Rook,
            PieceType::Queen => PieceKind::Queen { pawn_asset: None },
            PieceType::King => PieceKind::King,
            PieceType::Miner => PieceKind::Miner { moved: false },
        }
    }

    pub fn piece_type(&self) -> PieceType {
        match self {
            PieceKind::Pawn { .. } => PieceType::Pawn,
            PieceKind::Knight => PieceType::Knight,
            PieceKind::Bishop => PieceType::Bishop,
            PieceKind::Rook => PieceType::Rook,
            PieceKind::Queen { .. } => PieceType::Queen,
            PieceKind::King => PieceType::King,
            PieceKind::Miner { .. } => PieceType::Miner,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub asset: AssetId,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color, asset: AssetId) -> Self {
        Piece {
            kind: PieceKind::fresh(piece_type),
            color,
            asset,
        }
    }

    pub fn with_assets(piece_type: PieceType, color: Color, assets: &AssetSet) -> Self {
        Self::new(piece_type, color, assets.get(color, piece_type))
    }

    pub fn piece_type(&self) -> PieceType {
        self.kind.piece_type()
    }

    pub fn is_type(&self, piece_type: PieceType) -> bool {
        self.piece_type() == piece_type
    }

    pub fn first_move(&self) -> bool {
        matches!(
            self.kind,
            PieceKind::Pawn {
                first_move: true,
                ..
            }
        )
    }

    pub fn just_made_double_step(&self) -> bool {
        matches!(
            self.kind,
            PieceKind::Pawn {
                just_made_double_step: true,
                ..
            }
        )
    }

    pub fn clear_double_step(&mut self) {
        if let PieceKind::Pawn {
            just_made_double_step,
            ..
        } = &mut self.kind
        {
            *just_made_double_step = false;
        }
    }

    /// The asset of the pawn this queen was promoted from.
    pub fn promoted_from(&self) -> Option<AssetId> {
        match self.kind {
            PieceKind::Queen { pawn_asset } => pawn_asset,
            _ => None,
        }
    }

    /// The piece as it is after making `mv`.
    pub fn after_move(&self, mv: &Move) -> Piece {
        let mut piece = *self;
        match &mut piece.kind {
            PieceKind::Pawn {
                first_move,
                just_made_double_step,
            } => {
                *first_move = false;
                *just_made_double_step = mv.flags.contains(MoveFlags::DOUBLE_STEP);
            }
            PieceKind::Miner { moved } => *moved = true,
            _ => {}
        }
        piece
    }

    /// The queen this pawn becomes on reaching its promotion row.
    pub fn promoted(&self, assets: &AssetSet) -> Piece {
        Piece {
            kind: PieceKind::Queen {
                pawn_asset: Some(self.asset),
            },
            color: self.color,
            asset: assets.get(self.color, PieceType::Queen),
        }
    }

    /// How a captured piece is shown: a promoted queen goes back to its pawn form.
    pub fn display_form(&self) -> Piece {
        match self.promoted_from() {
            Some(pawn_asset) => Piece::new(PieceType::Pawn, self.color, pawn_asset),
            None => *self,
        }
    }

    pub fn to_char(&self) -> char {
        let c = self.piece_type().to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char, assets: &AssetSet) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece_type = PieceType::from_char(c)?;
        Some(Piece::with_assets(piece_type, color, assets))
    }
}
