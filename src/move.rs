use crate::position::Position;
use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u8 {
        const CAPTURE = 0b00000001;
        const DOUBLE_STEP = 0b00000010;
        const EN_PASSANT = 0b00000100;
        const PROMOTION = 0b00001000;
        const KING_CAPTURE = 0b00010000;
    }
}

/// A legal move as classified by the rules, before it is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub src: Position,
    pub dst: Position,
    pub flags: MoveFlags,
}

impl Move {
    pub fn new(src: Position, dst: Position, flags: MoveFlags) -> Self {
        Move { src, dst, flags }
    }

    /// Square of the pawn removed by an en passant capture.
    pub fn en_passant_victim(&self) -> Option<Position> {
        self.flags
            .contains(MoveFlags::EN_PASSANT)
            .then(|| Position::new(self.dst.col, self.src.row))
    }

    /// Parses `"<src><dst>"` such as `"c2c4"` or `"b11c10"`. Flags are left empty.
    pub fn from_lan(lan: &str) -> Result<Self, String> {
        let split = lan
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_alphabetic())
            .map(|(i, _)| i)
            .ok_or_else(|| format!("Invalid LAN move: {}", lan))?;

        let src = Position::from_algebraic(&lan[..split])?;
        let dst = Position::from_algebraic(&lan[split..])?;

        Ok(Move::new(src, dst, MoveFlags::empty()))
    }

    pub fn to_lan(&self) -> String {
        format!("{}{}", self.src.to_algebraic(), self.dst.to_algebraic())
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lan())
    }
}
