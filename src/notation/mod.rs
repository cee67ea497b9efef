//! Text formats: FEN positions, SAN move tokens, PGN games and replay

pub mod fen;
pub mod pgn;
pub mod replay;
pub mod san;

pub use self::fen::{FenError, START_FEN};
pub use self::pgn::{parse_pgn, Pgn, PgnError};
pub use self::replay::{replay_pgn, replay_san, ReplayError};
pub use self::san::{parse_san, resolve_san, san_to_command, SanError, SanMove};
