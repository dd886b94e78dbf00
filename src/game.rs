use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::AssetSet;
use crate::board::Board;
use crate::color::Color;
use crate::config::GameConfig;
use crate::outcome::GameOutcome;
use crate::pieces::Piece;
use crate::position::Position;
use crate::r#move::Move;
use crate::resolver::{self, Effect, Resolution};
use crate::rules;
use crate::selection::Selection;
use crate::setup;
use crate::turn::TurnState;

/// Upper bound on events emitted by a single click.
pub const MAX_EVENTS: usize = 6;

/// What a click did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored,
    /// A piece was picked up, swapped for another or put back.
    SelectionChanged,
    /// A move was made and the turn passed to the other side.
    MoveCommitted,
    /// A move captured a King. The session accepts no further moves.
    GameEnded,
}

/// Notifications for the display layer, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    PieceHighlighted(Position),
    HighlightCleared,
    PieceMoved { from: Position, to: Position },
    /// `piece` is the form to show: a promoted queen is shown as its pawn.
    PieceCaptured { at: Position, piece: Piece },
    PiecePromoted { at: Position, queen: Piece },
    TurnChanged(Color),
    GameOver { winner: Color, winner_name: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub outcome: ClickOutcome,
    pub events: ArrayVec<Event, MAX_EVENTS>,
}

impl Response {
    fn ignored() -> Self {
        Response {
            outcome: ClickOutcome::Ignored,
            events: ArrayVec::new(),
        }
    }
}

/// One game session: the board, turn state and the current selection.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: TurnState,
    selection: Selection,
    config: GameConfig,
}

impl Game {
    /// Starts a game on a freshly randomized board. White moves first.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.resolve_seed());
        let board = setup::random_board(&config.assets, &mut rng);
        Self::with_board(board, Color::White, config)
    }

    pub fn with_board(board: Board, player_turn: Color, config: GameConfig) -> Self {
        Game {
            board,
            turn: TurnState::new(player_turn),
            selection: Selection::default(),
            config,
        }
    }

    /// Starts a game from a board layout (see [`Board::from_layout`]).
    pub fn from_layout(
        layout: &str,
        player_turn: Color,
        config: GameConfig,
    ) -> Result<Self, String> {
        let board = Board::from_layout(layout, &config.assets)?;
        Ok(Self::with_board(board, player_turn, config))
    }

    /// Throws away the current position and deals a new random board drawn
    /// with `assets`. Later promotions use the same assets.
    pub fn populate_board<R: Rng + ?Sized>(&mut self, assets: &AssetSet, rng: &mut R) {
        self.config.assets = assets.clone();
        setup::populate_board(&mut self.board, &self.config.assets, rng);
        self.turn = TurnState::default();
        self.selection = Selection::default();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn turn(&self) -> Color {
        self.turn.player_turn()
    }

    pub fn last_piece_moved(&self) -> Option<Position> {
        self.turn.last_piece_moved()
    }

    pub fn selected(&self) -> Option<Position> {
        self.selection.selected()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.turn.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.turn.is_over()
    }

    pub fn winner(&self) -> Option<Color> {
        self.turn.winner()
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.winner().map(|c| self.config.player_name(c))
    }

    pub fn player_name(&self, color: Color) -> &str {
        self.config.player_name(color)
    }

    pub fn get_piece(&self, pos: &Position) -> Option<Piece> {
        self.board.get_piece(pos)
    }

    pub fn is_valid_move(&self, src: &Position, dst: &Position) -> bool {
        rules::is_valid_move(&self.board, src, dst)
    }

    pub fn valid_targets(&self, src: &Position) -> Vec<Position> {
        rules::valid_targets(&self.board, src)
    }

    /// Targets of the selected piece, for move hints.
    pub fn selected_targets(&self) -> Vec<Position> {
        self.selection
            .selected()
            .map(|src| self.valid_targets(&src))
            .unwrap_or_default()
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        self.board
            .pieces(self.turn())
            .into_iter()
            .flat_map(|(src, _)| rules::moves_from(&self.board, &src))
            .collect()
    }

    /// Feeds one click on `pos` through the selection state machine.
    pub fn handle_space_clicked(&mut self, pos: Position) -> Response {
        assert!(pos.is_on_board(), "clicked position {:?} is off the board", pos);

        if self.is_over() {
            return Response::ignored();
        }

        let occupant_is_ally = self.board.color_at(&pos) == Some(self.turn());
        let mut events = ArrayVec::new();

        let outcome = match self.selection.selected() {
            None if occupant_is_ally => {
                self.selection.select(pos);
                events.push(Event::PieceHighlighted(pos));
                ClickOutcome::SelectionChanged
            }
            None => ClickOutcome::Ignored,
            Some(_) if self.selection.is_selected(&pos) => {
                self.selection.clear();
                events.push(Event::HighlightCleared);
                ClickOutcome::SelectionChanged
            }
            Some(_) if occupant_is_ally => {
                self.selection.select(pos);
                events.push(Event::HighlightCleared);
                events.push(Event::PieceHighlighted(pos));
                ClickOutcome::SelectionChanged
            }
            Some(selected) => {
                match resolver::resolve(&self.board, &selected, &pos, &self.config.assets) {
                    Some(resolution) => {
                        self.selection.clear();
                        events.push(Event::HighlightCleared);
                        self.commit_move(&resolution, &mut events)
                    }
                    None if self.config.keep_selection_on_illegal_target => ClickOutcome::Ignored,
                    None => {
                        self.selection.clear();
                        events.push(Event::HighlightCleared);
                        ClickOutcome::SelectionChanged
                    }
                }
            }
        };

        Response { outcome, events }
    }

    /// Moves the piece on `src` to `dst` without going through selection.
    ///
    /// The piece must belong to the side to move. Illegal moves are ignored.
    /// Calling this after the game has ended is a contract violation.
    pub fn make_move(&mut self, src: Position, dst: Position) -> Response {
        assert!(!self.is_over(), "move attempted after the game ended");

        if self.board.color_at(&src) != Some(self.turn()) {
            return Response::ignored();
        }
        let Some(resolution) = resolver::resolve(&self.board, &src, &dst, &self.config.assets)
        else {
            return Response::ignored();
        };

        let mut events = ArrayVec::new();
        if self.selection.clear().is_some() {
            events.push(Event::HighlightCleared);
        }
        let outcome = self.commit_move(&resolution, &mut events);
        Response { outcome, events }
    }

    /// Like [`Game::make_move`], with the move given in LAN such as `"c2c4"`.
    pub fn make_lan_move(&mut self, lan: &str) -> Result<Response, String> {
        let mv = Move::from_lan(lan)?;
        Ok(self.make_move(mv.src, mv.dst))
    }

    fn commit_move(
        &mut self,
        resolution: &Resolution,
        events: &mut ArrayVec<Event, MAX_EVENTS>,
    ) -> ClickOutcome {
        assert!(!self.is_over(), "move committed after the game ended");
        let mover = self.turn();
        let king_taken = resolution.captures_king();

        for effect in &resolution.effects {
            match effect {
                // A game won by this move ends before the pawn is promoted.
                Effect::Promote { .. } if king_taken => continue,
                Effect::Capture { at, piece } => events.push(Event::PieceCaptured {
                    at: *at,
                    piece: piece.display_form(),
                }),
                Effect::Relocate { from, to, .. } => events.push(Event::PieceMoved {
                    from: *from,
                    to: *to,
                }),
                Effect::Promote { at, queen } => events.push(Event::PiecePromoted {
                    at: *at,
                    queen: *queen,
                }),
            }
            effect.apply(&mut self.board);
        }

        if king_taken {
            self.turn.finish(mover);
            events.push(Event::GameOver {
                winner: mover,
                winner_name: self.config.player_name(mover).to_string(),
            });
            return ClickOutcome::GameEnded;
        }

        let next = self.turn.record_move(&mut self.board, resolution.mv.dst);
        events.push(Event::TurnChanged(next));
        ClickOutcome::MoveCommitted
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.board)?;
        match self.outcome() {
            Some(outcome) => write!(
                f,
                "{} wins ({})",
                self.player_name(outcome.winner()),
                outcome
            ),
            None => write!(f, "{} to move", self.player_name(self.turn())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetId;
    use crate::pieces::PieceType;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).expect("valid square")
    }

    fn game(layout: &str) -> Game {
        Game::from_layout(layout, Color::White, GameConfig::default()).expect("valid layout")
    }

    // White rook a1, white knight b1, black rook a9, black king e12.
    const SMALL: &str = "4k/5/5/r4/5/5/5/5/5/5/5/RN3";

    #[test]
    fn test_random_game_creation() {
        let game = Game::new(GameConfig::default().with_seed(1));
        assert_eq!(game.board().piece_count(), 50);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.selected(), None);
        assert!(!game.is_over());
    }

    #[test]
    fn test_seeded_games_match() {
        let a = Game::new(GameConfig::default().with_seed(99));
        let b = Game::new(GameConfig::default().with_seed(99));
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_click_empty_space_without_selection_is_ignored() {
        let mut game = game(SMALL);
        let response = game.handle_space_clicked(pos("c5"));
        assert_eq!(response.outcome, ClickOutcome::Ignored);
        assert!(response.events.is_empty());
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_click_enemy_without_selection_is_ignored() {
        let mut game = game(SMALL);
        let response = game.handle_space_clicked(pos("a9"));
        assert_eq!(response.outcome, ClickOutcome::Ignored);
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_select_and_deselect() {
        let mut game = game(SMALL);
        let before = game.board().clone();

        let response = game.handle_space_clicked(pos("a1"));
        assert_eq!(response.outcome, ClickOutcome::SelectionChanged);
        assert_eq!(response.events.as_slice(), &[Event::PieceHighlighted(pos("a1"))]);
        assert_eq!(game.selected(), Some(pos("a1")));

        let response = game.handle_space_clicked(pos("a1"));
        assert_eq!(response.outcome, ClickOutcome::SelectionChanged);
        assert_eq!(response.events.as_slice(), &[Event::HighlightCleared]);
        assert_eq!(game.selected(), None);
        assert_eq!(game.board(), &before);
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_reselect_ally() {
        let mut game = game(SMALL);
        game.handle_space_clicked(pos("a1"));
        let response = game.handle_space_clicked(pos("b1"));
        assert_eq!(response.outcome, ClickOutcome::SelectionChanged);
        assert_eq!(
            response.events.as_slice(),
            &[Event::HighlightCleared, Event::PieceHighlighted(pos("b1"))]
        );
        assert_eq!(game.selected(), Some(pos("b1")));
    }

    #[test]
    fn test_illegal_target_keeps_selection() {
        let mut game = game(SMALL);
        game.handle_space_clicked(pos("a1"));
        let response = game.handle_space_clicked(pos("b3"));
        assert_eq!(response.outcome, ClickOutcome::Ignored);
        assert!(response.events.is_empty());
        assert_eq!(game.selected(), Some(pos("a1")));
    }

    #[test]
    fn test_illegal_target_drops_selection_when_configured() {
        let config = GameConfig::default().with_keep_selection_on_illegal_target(false);
        let mut game = Game::from_layout(SMALL, Color::White, config).expect("valid layout");
        game.handle_space_clicked(pos("a1"));
        let response = game.handle_space_clicked(pos("b3"));
        assert_eq!(response.outcome, ClickOutcome::SelectionChanged);
        assert_eq!(response.events.as_slice(), &[Event::HighlightCleared]);
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_commit_quiet_move() {
        let mut game = game(SMALL);
        game.handle_space_clicked(pos("a1"));
        let response = game.handle_space_clicked(pos("a5"));
        assert_eq!(response.outcome, ClickOutcome::MoveCommitted);
        assert_eq!(
            response.events.as_slice(),
            &[
                Event::HighlightCleared,
                Event::PieceMoved {
                    from: pos("a1"),
                    to: pos("a5")
                },
                Event::TurnChanged(Color::Black),
            ]
        );
        assert!(game.get_piece(&pos("a1")).is_none());
        assert_eq!(
            game.get_piece(&pos("a5")).map(|p| p.piece_type()),
            Some(PieceType::Rook)
        );
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.last_piece_moved(), Some(pos("a5")));
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_commit_capture() {
        let mut game = game(SMALL);
        game.handle_space_clicked(pos("a1"));
        let response = game.handle_space_clicked(pos("a9"));
        assert_eq!(response.outcome, ClickOutcome::MoveCommitted);
        assert!(matches!(
            response.events[1],
            Event::PieceCaptured { at, piece } if at == pos("a9") && piece.color == Color::Black
        ));
        assert_eq!(game.board().piece_count(), 3);
    }

    #[test]
    fn test_black_cannot_move_on_white_turn() {
        let mut game = game(SMALL);
        let response = game.make_move(pos("a9"), pos("a5"));
        assert_eq!(response.outcome, ClickOutcome::Ignored);
        assert!(game.get_piece(&pos("a9")).is_some());
    }

    #[test]
    fn test_king_capture_ends_game() {
        let mut game = game("4k/5/5/5/5/5/5/5/5/5/5/4R");
        game.handle_space_clicked(pos("e1"));
        let response = game.handle_space_clicked(pos("e12"));
        assert_eq!(response.outcome, ClickOutcome::GameEnded);
        assert_eq!(
            response.events.last(),
            Some(&Event::GameOver {
                winner: Color::White,
                winner_name: "White".to_string()
            })
        );
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(game.winner_name(), Some("White"));
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.last_piece_moved(), None);
        assert!(game.legal_moves().is_empty());

        let after = game.board().clone();
        let response = game.handle_space_clicked(pos("e12"));
        assert_eq!(response.outcome, ClickOutcome::Ignored);
        assert_eq!(game.board(), &after);
    }

    #[test]
    #[should_panic(expected = "after the game ended")]
    fn test_make_move_after_game_over_panics() {
        let mut game = game("4k/5/5/5/5/5/5/5/5/5/5/4R");
        game.make_move(pos("e1"), pos("e12"));
        game.make_move(pos("e12"), pos("e11"));
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn test_off_board_click_panics() {
        let mut game = game(SMALL);
        game.handle_space_clicked(Position::new(5, 0));
    }

    #[test]
    fn test_promotion_event_and_piece() {
        let mut game = game("4k/5/5/5/5/P4/5/5/5/5/5/K4");
        let response = game.make_move(pos("a7"), pos("a8"));
        assert_eq!(response.outcome, ClickOutcome::MoveCommitted);
        let queen = game.get_piece(&pos("a8")).expect("queen present");
        assert_eq!(queen.piece_type(), PieceType::Queen);
        assert_eq!(queen.color, Color::White);
        assert!(response
            .events
            .iter()
            .any(|e| matches!(e, Event::PiecePromoted { at, .. } if *at == pos("a8"))));
    }

    #[test]
    fn test_captured_promoted_queen_shows_pawn() {
        let mut game = game("4k/5/5/5/5/P4/5/4K/5/5/5/4r");
        game.make_move(pos("a7"), pos("a8"));
        let queen = game.get_piece(&pos("a8")).expect("queen present");
        let pawn_asset = queen.promoted_from().expect("queen remembers its pawn");

        game.make_move(pos("e1"), pos("a1"));
        game.make_move(pos("e5"), pos("e6"));
        let response = game.make_move(pos("a1"), pos("a8"));
        let captured = response.events.iter().find_map(|e| match e {
            Event::PieceCaptured { piece, .. } => Some(*piece),
            _ => None,
        });
        let captured = captured.expect("capture event");
        assert_eq!(captured.piece_type(), PieceType::Pawn);
        assert_eq!(captured.color, Color::White);
        assert_eq!(captured.asset, pawn_asset);
    }

    #[test]
    fn test_legal_moves_for_side_to_move() {
        let game = game("5/5/5/5/5/5/5/5/5/5/5/K3k");
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|mv| mv.src == pos("a1")));
    }

    #[test]
    fn test_selected_targets() {
        let mut game = game("5/5/5/5/5/5/5/5/5/5/5/K3k");
        assert!(game.selected_targets().is_empty());
        game.handle_space_clicked(pos("a1"));
        assert_eq!(game.selected_targets().len(), 3);
    }

    #[test]
    fn test_populate_board_resets_session() {
        let mut game = game(SMALL);
        game.make_move(pos("a1"), pos("a5"));
        game.handle_space_clicked(pos("a9"));
        game.populate_board(&AssetSet::sequential(), &mut StdRng::seed_from_u64(5));
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.last_piece_moved(), None);
        assert_eq!(game.selected(), None);
        assert_eq!(game.board().piece_count(), 50);
    }

    #[test]
    fn test_populate_board_uses_supplied_assets() {
        let assets = AssetSet::new(|color, piece_type| {
            AssetId(100 * color.index() as u32 + piece_type.index() as u32)
        });
        let mut game = game(SMALL);
        game.populate_board(&assets, &mut StdRng::seed_from_u64(9));

        for (_, piece) in game.board().occupied() {
            assert_eq!(piece.asset, assets.get(piece.color, piece.piece_type()));
        }
        assert_eq!(game.config().assets, assets);
    }

    #[test]
    fn test_make_lan_move() {
        let mut game = game(SMALL);
        let response = game.make_lan_move("a1a5").expect("valid LAN");
        assert_eq!(response.outcome, ClickOutcome::MoveCommitted);
        assert!(game.get_piece(&pos("a5")).is_some());
        assert_eq!(game.turn(), Color::Black);

        assert!(game.make_lan_move("a9").is_err());
        let response = game.make_lan_move("a9b8").expect("valid LAN");
        assert_eq!(response.outcome, ClickOutcome::Ignored);
    }

    #[test]
    fn test_display() {
        let game = game(SMALL);
        assert!(game.to_string().ends_with("White to move"));
    }
}
