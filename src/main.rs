//! Arbitro command-line front-end.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use arbitro::notation::{replay_pgn, START_FEN};
use arbitro::search::{Search, SearchParams};
use arbitro::Game;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the legal moves of the side on move
    Legal {
        #[arg(short, long, default_value_t = String::from(START_FEN))]
        fen: String,
    },
    /// Ask the search for a move
    Best {
        #[arg(short, long, default_value_t = String::from(START_FEN))]
        fen: String,

        #[arg(short, long, default_value_t = 3)]
        depth: u8,

        /// Wall-clock budget in milliseconds, 0 for none
        #[arg(short, long, default_value_t = 2000)]
        time_ms: u64,
    },
    /// Replay a PGN file and print the final position
    Replay { pgn: PathBuf },
    /// Decode a FEN, draw the board and print it re-encoded
    Fen {
        #[arg(short, long, default_value_t = String::from(START_FEN))]
        fen: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Legal { fen } => {
            let game = Game::from_fen(&fen)?;
            let moves = game.legal_moves(game.current_player());
            let list: Vec<String> = moves.iter().map(ToString::to_string).collect();
            println!("{} to move, {:?}", game.current_player(), game.status());
            println!("{} legal moves: {}", list.len(), list.join(" "));
        }
        Command::Best { fen, depth, time_ms } => {
            let game = Game::from_fen(&fen)?;
            if game.status().is_game_over() {
                println!("game over: {:?}", game.status());
                return Ok(());
            }
            let params = SearchParams::new().max_depth(depth).time_limit(time_ms);
            let mut search = Search::new(params);
            match search.search(game.state()) {
                Some(outcome) => println!("bestmove {} score {}", outcome.command, outcome.score),
                None => println!("bestmove (none) status {:?}", game.status()),
            }
        }
        Command::Replay { pgn } => {
            let text = std::fs::read_to_string(&pgn)
                .with_context(|| format!("reading {}", pgn.display()))?;
            let game = replay_pgn(&text)?;
            println!("{}", game.state().board());
            println!("{}", game.current_fen());
            println!("{} plies, {:?}", game.state().counter(), game.status());
        }
        Command::Fen { fen } => {
            let game = Game::from_fen(&fen)?;
            println!("{}", game.state().board());
            println!("{}", game.current_fen());
        }
    }
    Ok(())
}
