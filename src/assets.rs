use crate::color::Color;
use crate::pieces::PieceType;

/// Opaque handle to a visual asset owned by the display layer.
///
/// The engine stores these on pieces and hands them back in events but never
/// interprets them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AssetId(pub u32);

/// Mapping from (color, piece type) to the asset the display layer draws for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetSet {
    ids: [[AssetId; PieceType::COUNT]; 2],
}

impl AssetSet {
    pub fn new(mut lookup: impl FnMut(Color, PieceType) -> AssetId) -> Self {
        let mut ids = [[AssetId::default(); PieceType::COUNT]; 2];
        for color in [Color::White, Color::Black] {
            for piece_type in PieceType::ALL {
                ids[color.index()][piece_type.index()] = lookup(color, piece_type);
            }
        }
        AssetSet { ids }
    }

    /// Distinct ids numbered White first, in `PieceType::ALL` order.
    pub fn sequential() -> Self {
        Self::new(|color, piece_type| {
            AssetId((color.index() * PieceType::COUNT + piece_type.index()) as u32)
        })
    }

    pub fn get(&self, color: Color, piece_type: PieceType) -> AssetId {
        self.ids[color.index()][piece_type.index()]
    }

    pub fn set(&mut self, color: Color, piece_type: PieceType, id: AssetId) {
        self.ids[color.index()][piece_type.index()] = id;
    }
}

impl Default for AssetSet {
    fn default() -> Self {
        Self::sequential()
    }
}
