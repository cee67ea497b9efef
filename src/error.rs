//! Error types for command execution
//!
//! Every rejection is an ordinary value; no panic crosses the
//! generation/legality boundary. Notation errors live next to their parsers
//! in [`crate::notation`].

use crate::types::{Loc, Team};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Nothing stands on the source square
    #[error("no piece at {loc}")]
    InvalidSource { loc: Loc },

    /// The source piece belongs to the side not on move
    #[error("piece at {loc} belongs to {team}, who is not on move")]
    WrongTurn { loc: Loc, team: Team },

    /// The move would leave the mover's king attacked. Also raised for
    /// castling out of check or across an attacked square.
    #[error("{from}{to} would leave the king in check")]
    SelfCheck { from: Loc, to: Loc },

    /// The source piece has no pseudo-legal move to the destination
    #[error("piece at {from} cannot move to {to}")]
    NoSuchMove { from: Loc, to: Loc },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
