pub mod assets;
pub mod board;
pub mod color;
pub mod config;
pub mod game;
pub mod r#move;
pub mod outcome;
pub mod pieces;
pub mod position;
pub mod resolver;
pub mod rules;
pub mod selection;
pub mod setup;
pub mod turn;

#[cfg(feature = "python")]
extern crate pyo3;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule(gil_used = false)]
fn battle_chess(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use color::Color;
    use python_bindings::*;
    m.add_class::<PyGame>()?;
    m.add_class::<PyResponse>()?;
    m.add_class::<PyEvent>()?;
    m.add_class::<PyPiece>()?;
    m.add_class::<PyPosition>()?;
    m.add("WHITE", Color::White as i8)?;
    m.add("BLACK", Color::Black as i8)?;
    m.add("BOARD_COLS", board::BOARD_COLS)?;
    m.add("BOARD_ROWS", board::BOARD_ROWS)?;
    Ok(())
}

#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use crate::assets::{AssetId, AssetSet};
    use crate::color::Color;
    use crate::config::GameConfig;
    use crate::game::{ClickOutcome, Event, Game, Response};
    use crate::pieces::{Piece, PieceType};
    use crate::position::Position;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn color_from_int(color: i8) -> PyResult<Color> {
        Color::from_int(color).ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Invalid color: must be 1 (White) or -1 (Black), got {}",
                color
            ))
        })
    }

    fn piece_type_from_str(piece_type: &str) -> PyResult<PieceType> {
        match piece_type.to_lowercase().as_str() {
            "p" | "pawn" => Ok(PieceType::Pawn),
            "n" | "knight" => Ok(PieceType::Knight),
            "b" | "bishop" => Ok(PieceType::Bishop),
            "r" | "rook" => Ok(PieceType::Rook),
            "q" | "queen" => Ok(PieceType::Queen),
            "k" | "king" => Ok(PieceType::King),
            "m" | "miner" => Ok(PieceType::Miner),
            _ => Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(
                "Invalid piece type",
            )),
        }
    }

    fn checked_position(col: usize, row: usize) -> PyResult<Position> {
        let pos = Position::new(col, row);
        if pos.is_on_board() {
            Ok(pos)
        } else {
            Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Position ({}, {}) is off the board",
                col, row
            )))
        }
    }

    /// Builds an asset set from `{(color, piece_type): asset_id}`; missing
    /// entries keep their sequential default.
    fn asset_set(assets: Option<HashMap<(i8, String), u32>>) -> PyResult<AssetSet> {
        let mut set = AssetSet::sequential();
        for ((color, piece_type), id) in assets.unwrap_or_default() {
            set.set(
                color_from_int(color)?,
                piece_type_from_str(&piece_type)?,
                AssetId(id),
            );
        }
        Ok(set)
    }

    #[pyclass(name = "Game")]
    pub struct PyGame {
        game: Game,
    }

    #[pymethods]
    impl PyGame {
        #[new]
        #[pyo3(signature = (white_name="White", black_name="Black", seed=None, assets=None, keep_selection=true))]
        pub fn new(
            white_name: &str,
            black_name: &str,
            seed: Option<u64>,
            assets: Option<HashMap<(i8, String), u32>>,
            keep_selection: bool,
        ) -> PyResult<Self> {
            let mut config = GameConfig::new(white_name, black_name)
                .with_assets(asset_set(assets)?)
                .with_keep_selection_on_illegal_target(keep_selection);
            config.seed = seed;
            Ok(PyGame {
                game: Game::new(config),
            })
        }

        #[staticmethod]
        pub fn from_layout(layout: &str, turn: i8) -> PyResult<Self> {
            let game = Game::from_layout(layout, color_from_int(turn)?, GameConfig::default())
                .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e))?;
            Ok(PyGame { game })
        }

        pub fn handle_space_clicked(&mut self, col: usize, row: usize) -> PyResult<PyResponse> {
            let pos = checked_position(col, row)?;
            Ok(PyResponse::from(self.game.handle_space_clicked(pos)))
        }

        pub fn make_move(
            &mut self,
            src_col: usize,
            src_row: usize,
            dst_col: usize,
            dst_row: usize,
        ) -> PyResult<PyResponse> {
            if self.game.is_over() {
                return Err(PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(
                    "The game is over",
                ));
            }
            let src = checked_position(src_col, src_row)?;
            let dst = checked_position(dst_col, dst_row)?;
            Ok(PyResponse::from(self.game.make_move(src, dst)))
        }

        pub fn make_lan_move(&mut self, lan: &str) -> PyResult<PyResponse> {
            if self.game.is_over() {
                return Err(PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(
                    "The game is over",
                ));
            }
            let response = self
                .game
                .make_lan_move(lan)
                .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e))?;
            Ok(PyResponse::from(response))
        }

        /// Deals a new random board drawn with `assets`.
        #[pyo3(signature = (assets=None, seed=None))]
        pub fn populate_board(
            &mut self,
            assets: Option<HashMap<(i8, String), u32>>,
            seed: Option<u64>,
        ) -> PyResult<()> {
            let assets = asset_set(assets)?;
            let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(rand::random));
            self.game.populate_board(&assets, &mut rng);
            Ok(())
        }

        pub fn turn(&self) -> i8 {
            self.game.turn() as i8
        }

        pub fn selected(&self) -> Option<PyPosition> {
            self.game.selected().map(|pos| PyPosition { pos })
        }

        pub fn last_piece_moved(&self) -> Option<PyPosition> {
            self.game.last_piece_moved().map(|pos| PyPosition { pos })
        }

        pub fn is_over(&self) -> bool {
            self.game.is_over()
        }

        pub fn winner(&self) -> Option<i8> {
            self.game.winner().map(|color| color as i8)
        }

        pub fn winner_name(&self) -> Option<String> {
            self.game.winner_name().map(str::to_string)
        }

        pub fn player_name(&self, color: i8) -> PyResult<String> {
            Ok(self.game.player_name(color_from_int(color)?).to_string())
        }

        pub fn get_piece(&self, col: usize, row: usize) -> PyResult<Option<PyPiece>> {
            let pos = checked_position(col, row)?;
            Ok(self.game.get_piece(&pos).map(|piece| PyPiece { piece }))
        }

        pub fn valid_targets(&self, col: usize, row: usize) -> PyResult<Vec<PyPosition>> {
            let pos = checked_position(col, row)?;
            Ok(self
                .game
                .valid_targets(&pos)
                .into_iter()
                .map(|pos| PyPosition { pos })
                .collect())
        }

        /// Legal moves for the side to move, in LAN such as `"c2c4"`.
        pub fn legal_moves(&self) -> Vec<String> {
            self.game
                .legal_moves()
                .iter()
                .map(|mv| mv.to_lan())
                .collect()
        }

        pub fn layout(&self) -> String {
            self.game.board().to_layout()
        }

        pub fn __str__(&self) -> String {
            self.game.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Game(turn={:?}, selected={:?}, over={})",
                self.game.turn(),
                self.game.selected(),
                self.game.is_over(),
            )
        }
    }

    #[pyclass(name = "Response")]
    #[derive(Clone, Debug)]
    pub struct PyResponse {
        outcome: ClickOutcome,
        events: Vec<PyEvent>,
    }

    impl From<Response> for PyResponse {
        fn from(response: Response) -> Self {
            PyResponse {
                outcome: response.outcome,
                events: response
                    .events
                    .into_iter()
                    .map(|event| PyEvent { event })
                    .collect(),
            }
        }
    }

    #[pymethods]
    impl PyResponse {
        pub fn outcome(&self) -> String {
            match self.outcome {
                ClickOutcome::Ignored => "ignored",
                ClickOutcome::SelectionChanged => "selection_changed",
                ClickOutcome::MoveCommitted => "move_committed",
                ClickOutcome::GameEnded => "game_ended",
            }
            .to_string()
        }

        pub fn events(&self) -> Vec<PyEvent> {
            self.events.clone()
        }

        pub fn __repr__(&self) -> String {
            format!("Response({}, {} events)", self.outcome(), self.events.len())
        }
    }

    #[pyclass(name = "Event")]
    #[derive(Clone, Debug)]
    pub struct PyEvent {
        event: Event,
    }

    #[pymethods]
    impl PyEvent {
        pub fn kind(&self) -> String {
            match self.event {
                Event::PieceHighlighted(_) => "piece_highlighted",
                Event::HighlightCleared => "highlight_cleared",
                Event::PieceMoved { .. } => "piece_moved",
                Event::PieceCaptured { .. } => "piece_captured",
                Event::PiecePromoted { .. } => "piece_promoted",
                Event::TurnChanged(_) => "turn_changed",
                Event::GameOver { .. } => "game_over",
            }
            .to_string()
        }

        /// The space the event concerns; the destination for moves.
        pub fn position(&self) -> Option<PyPosition> {
            let pos = match &self.event {
                Event::PieceHighlighted(pos) => *pos,
                Event::PieceMoved { to, .. } => *to,
                Event::PieceCaptured { at, .. } | Event::PiecePromoted { at, .. } => *at,
                _ => return None,
            };
            Some(PyPosition { pos })
        }

        pub fn origin(&self) -> Option<PyPosition> {
            match &self.event {
                Event::PieceMoved { from, .. } => Some(PyPosition { pos: *from }),
                _ => None,
            }
        }

        pub fn piece(&self) -> Option<PyPiece> {
            match &self.event {
                Event::PieceCaptured { piece, .. } => Some(PyPiece { piece: *piece }),
                Event::PiecePromoted { queen, .. } => Some(PyPiece { piece: *queen }),
                _ => None,
            }
        }

        pub fn color(&self) -> Option<i8> {
            match &self.event {
                Event::TurnChanged(color) => Some(*color as i8),
                Event::GameOver { winner, .. } => Some(*winner as i8),
                _ => None,
            }
        }

        pub fn winner_name(&self) -> Option<String> {
            match &self.event {
                Event::GameOver { winner_name, .. } => Some(winner_name.clone()),
                _ => None,
            }
        }

        pub fn __repr__(&self) -> String {
            format!("Event({:?})", self.event)
        }
    }

    #[pyclass(name = "Piece")]
    #[derive(Clone, Copy, Debug)]
    pub struct PyPiece {
        piece: Piece,
    }

    #[pymethods]
    impl PyPiece {
        pub fn piece_type(&self) -> String {
            format!("{:?}", self.piece.piece_type()).to_lowercase()
        }

        pub fn color(&self) -> i8 {
            self.piece.color as i8
        }

        pub fn asset(&self) -> u32 {
            self.piece.asset.0
        }

        pub fn promoted_from(&self) -> Option<u32> {
            self.piece.promoted_from().map(|id| id.0)
        }

        pub fn symbol(&self) -> String {
            self.piece.to_char().to_string()
        }

        pub fn __str__(&self) -> String {
            self.piece.to_char().to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Piece({:?}, {:?})",
                self.piece.piece_type(),
                self.piece.color
            )
        }
    }

    #[pyclass(name = "Position")]
    #[derive(Clone, Copy, Debug)]
    pub struct PyPosition {
        pos: Position,
    }

    #[pymethods]
    impl PyPosition {
        #[new]
        pub fn new(col: usize, row: usize) -> Self {
            PyPosition {
                pos: Position::new(col, row),
            }
        }

        pub fn col(&self) -> usize {
            self.pos.col
        }

        pub fn row(&self) -> usize {
            self.pos.row
        }

        pub fn __str__(&self) -> String {
            self.pos.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!("Position({}, {})", self.pos.col, self.pos.row)
        }
    }
} // end python_bindings module
