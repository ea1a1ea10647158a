use std::env;

use anyhow::{Context, Result};
use log::info;

use dama_engine::advice::advisory_prompt;
use dama_engine::{GameState, Game};

const DEFAULT_MAX_PLIES: usize = 200;

fn main() -> Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let max_plies = match env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("max plies must be a number, got `{arg}`"))?,
        None => DEFAULT_MAX_PLIES,
    };

    let mut game = Game::new();
    print!("{}", game.board());
    for ply in 1..=max_plies {
        let player = game.current_player();
        let state = game
            .make_random_move()
            .with_context(|| format!("random move failed at ply {ply}"))?;
        println!("\nPly {ply}, {player} moved:");
        print!("{}", game.board());
        if let GameState::Finished(winner) = state {
            println!("\n{winner} wins after {ply} plies");
            return Ok(());
        }
    }
    info!("Stopped after {max_plies} plies without a winner");
    println!("\n{}", advisory_prompt(game.board(), game.current_player()));
    Ok(())
}
