//! Arbitro: a chess rules engine.
//!
//! Board representation, per-piece move generation, legality filtering, the
//! game state machine, a small alpha-beta opponent and FEN/SAN/PGN notation.
//! The library performs no I/O; front-ends feed it text and commands.

pub mod board;
pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod search;
pub mod state;
pub mod time;
pub mod types;
pub mod utils;

pub use board::Board;
pub use error::{GameError, GameResult};
pub use game::{apply_move_command, find_legal_moves, is_king_in_check, perft, Game};
pub use state::{GameState, Status};
pub use types::{CastleSide, ChessPiece, Loc, MoveCommand, Rank, Team};
