use crate::position::Position;

/// The space whose piece the current player has picked up, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Position>,
}

impl Selection {
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn is_selected(&self, pos: &Position) -> bool {
        self.selected.as_ref() == Some(pos)
    }

    /// Selects `pos`, returning the previously selected space.
    pub fn select(&mut self, pos: Position) -> Option<Position> {
        self.selected.replace(pos)
    }

    pub fn clear(&mut self) -> Option<Position> {
        self.selected.take()
    }
}
