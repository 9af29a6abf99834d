//! Headless session - run with: cargo run --example autoplay [seed] [swipes]
//!
//! A bot plays without a terminal UI: it hits three times out of four and
//! misses otherwise. Commentary is resolved inline.

use std::env;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chroma_swipe::catalog::Catalog;
use chroma_swipe::commentary::{LocalCommentator, request_encouragement};
use chroma_swipe::game::Game;
use chroma_swipe::report::format_summary;
use chroma_swipe::types::{Direction, GameConfig, OutputFormat};

fn main() {
    let args: Vec<String> = env::args().collect();
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(7);
    let swipes: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(40);

    let config = GameConfig::default();
    let timeout = config.commentary_timeout;
    let mut game = Game::new(
        Arc::new(Catalog::standard()),
        config,
        StdRng::seed_from_u64(seed),
    );
    let mut player = StdRng::seed_from_u64(seed.wrapping_add(1));
    let provider = Arc::new(LocalCommentator);

    println!("Seed {}, {} swipes", seed, swipes);
    println!();

    for _ in 0..swipes {
        let Some(challenge) = game.current_challenge() else {
            println!("Queue ran dry.");
            break;
        };

        let right = challenge.correct_direction;
        let direction = if player.gen_bool(0.75) {
            right
        } else {
            let wrong: Vec<Direction> = Direction::ALL.into_iter().filter(|&d| d != right).collect();
            wrong[player.gen_range(0..wrong.len())]
        };

        let Some(outcome) = game.swipe(direction) else {
            break;
        };

        println!(
            "{} {:<12} {:<6} -> {}",
            if outcome.correct { "✓" } else { "✗" },
            outcome.challenge.target.id,
            direction,
            outcome.challenge.options.get(direction).name
        );

        if let Some(request) = outcome.commentary {
            let text = request_encouragement(provider.clone(), request.snapshot, timeout);
            game.apply_commentary(request.ticket, text);
            println!("  \"{}\"", game.feedback());
        }
    }

    println!();
    print!("{}", format_summary(&game.summary(), OutputFormat::Human));
}
