//! Plays random legal clicks from a seed until a King is captured.
//!
//! Usage: random_game [seed] [max_plies]

use battle_chess::config::GameConfig;
use battle_chess::game::{ClickOutcome, Event, Game};
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;

fn describe(event: &Event) -> String {
    match event {
        Event::PieceHighlighted(pos) => format!("highlight {}", pos),
        Event::HighlightCleared => "clear highlight".to_string(),
        Event::PieceMoved { from, to } => format!("move {}{}", from, to),
        Event::PieceCaptured { at, piece } => format!("capture {} on {}", piece.to_char(), at),
        Event::PiecePromoted { at, .. } => format!("promote on {}", at),
        Event::TurnChanged(color) => format!("{} to move", color),
        Event::GameOver { winner_name, .. } => format!("{} wins", winner_name),
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let max_plies: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(500);

    let mut game = Game::new(GameConfig::default().with_seed(seed));
    let mut rng = StdRng::seed_from_u64(seed);

    println!("seed {}", seed);
    println!("{}\n", game.board());

    for ply in 1..=max_plies {
        let moves = game.legal_moves();
        let Some(&mv) = moves.choose(&mut rng) else {
            println!("{} has no legal move", game.turn());
            break;
        };

        game.handle_space_clicked(mv.src);
        let response = game.handle_space_clicked(mv.dst);
        let events: Vec<String> = response.events.iter().map(describe).collect();
        println!("{:3}. {:<6} {}", ply, mv.to_lan(), events.join(", "));

        if response.outcome == ClickOutcome::GameEnded {
            break;
        }
    }

    println!("\n{}", game);
}
