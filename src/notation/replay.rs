//! Batch reconstruction of a recorded game from SAN tokens

use thiserror::Error;
use tracing::debug;

use super::fen::FenError;
use super::pgn::{parse_pgn, PgnError};
use super::san::{san_to_command, SanError};
use crate::error::GameError;
use crate::game::Game;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error(transparent)]
    Pgn(#[from] PgnError),

    #[error("invalid FEN tag: {0}")]
    Fen(#[from] FenError),

    /// `ply` is 1-based
    #[error("move {ply} '{token}' could not be resolved")]
    San {
        ply: usize,
        token: String,
        #[source]
        source: SanError,
    },

    #[error("move {ply} '{token}' was rejected")]
    Rejected {
        ply: usize,
        token: String,
        #[source]
        source: GameError,
    },
}

impl ReplayError {
    /// 1-based ply of the failing move, if a move failed
    pub fn ply(&self) -> Option<usize> {
        match self {
            ReplayError::San { ply, .. } | ReplayError::Rejected { ply, .. } => Some(*ply),
            _ => None,
        }
    }
}

/// Play `tokens` in order from `game`, stopping at the first failure. The
/// input game is left untouched.
pub fn replay_san<S: AsRef<str>>(game: &Game, tokens: &[S]) -> Result<Game, ReplayError> {
    let mut game = game.clone();
    for (i, token) in tokens.iter().enumerate() {
        let (ply, token) = (i + 1, token.as_ref());
        let command = san_to_command(game.state(), token).map_err(|source| ReplayError::San {
            ply,
            token: token.to_string(),
            source,
        })?;
        game.execute_command(command).map_err(|source| ReplayError::Rejected {
            ply,
            token: token.to_string(),
            source,
        })?;
        debug!(ply, token, %command, status = ?game.status(), "replayed");
    }
    Ok(game)
}

/// Replay a whole PGN game, starting from its `FEN` tag when present
pub fn replay_pgn(text: &str) -> Result<Game, ReplayError> {
    let pgn = parse_pgn(text)?;
    let start = match pgn.tag("FEN") {
        Some(fen_text) => Game::from_fen(fen_text)?,
        None => Game::default(),
    };
    replay_san(&start, &pgn.moves)
}
