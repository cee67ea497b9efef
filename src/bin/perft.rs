use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position, Role};
use tracing::info;
use tracing_subscriber::EnvFilter;

use arbitro::notation::{fen, START_FEN};
use arbitro::perft;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u8,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);

    let state = fen::decode(&args.fen)?;
    let start = Instant::now();
    let nodes = perft(&state, args.depth as u32);
    let duration = start.elapsed();
    println!("arbitro  perft({}) = {} nodes ({} ms)", args.depth, nodes, duration.as_millis());

    let parsed: Fen = args.fen.parse().context("shakmaty rejected the FEN")?;
    let pos: Chess = parsed
        .into_position(CastlingMode::Standard)
        .context("shakmaty rejected the position")?;
    let start = Instant::now();
    let reference = perft_shakmaty(&pos, args.depth);
    let duration = start.elapsed();
    println!("shakmaty perft({}) = {} nodes ({} ms)", args.depth, reference, duration.as_millis());

    if nodes == reference {
        info!("node counts agree");
    } else {
        anyhow::bail!("node count mismatch: {} vs {}", nodes, reference);
    }
    Ok(())
}

fn perft_shakmaty(pos: &Chess, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    // Promotion is always to a queen on the engine side
    for m in pos.legal_moves() {
        if !matches!(m.promotion(), None | Some(Role::Queen)) {
            continue;
        }
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}
