use crate::assets::AssetSet;
use crate::color::Color;

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub white_player_name: String,
    pub black_player_name: String,

    /// Seed for the random setup. `None` draws one from the OS.
    pub seed: Option<u64>,

    pub assets: AssetSet,

    /// Keep the current selection when a click lands on a space the selected
    /// piece cannot reach. When `false` such a click drops the selection.
    pub keep_selection_on_illegal_target: bool,
}

impl GameConfig {
    pub fn new(white_player_name: &str, black_player_name: &str) -> Self {
        GameConfig {
            white_player_name: white_player_name.to_string(),
            black_player_name: black_player_name.to_string(),
            seed: None,
            assets: AssetSet::default(),
            keep_selection_on_illegal_target: true,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_assets(mut self, assets: AssetSet) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_keep_selection_on_illegal_target(mut self, keep: bool) -> Self {
        self.keep_selection_on_illegal_target = keep;
        self
    }

    pub fn player_name(&self, color: Color) -> &str {
        match color {
            Color::White => &self.white_player_name,
            Color::Black => &self.black_player_name,
        }
    }

    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new("White", "Black")
    }
}
