//! Immutable game state: board, side to move, move history and status.
//!
//! A state is never edited after construction. Applying a move derives a new
//! state (see [`crate::game`]); the orchestrator rebinds its own field to it.

use crate::board::Board;
use crate::movegen::MoveResult;
use crate::types::{MoveCommand, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    InProgress,
    Check,
    Checkmate,
    /// Stalemate: no legal reply and not in check
    Draw,
}

impl Status {
    pub fn is_game_over(self) -> bool {
        matches!(self, Status::Checkmate | Status::Draw)
    }
}

/// One accepted move: the request and the generator result it matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub command: MoveCommand,
    pub result: MoveResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Team,
    history: Vec<HistoryEntry>,
    counter: u32,
    status: Status,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Board::standard(), Team::White)
    }
}

impl GameState {
    /// Fresh state with empty history; status starts as `InProgress`
    pub fn new(board: Board, current_player: Team) -> Self {
        Self {
            board,
            current_player,
            history: Vec::new(),
            counter: 0,
            status: Status::InProgress,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Team {
        self.current_player
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }

    /// Plies played since this state's root position
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Derive the successor state after `entry`: new board, entry appended,
    /// turn handed to the mover's opponent. Status is reset to `InProgress`
    /// until the orchestrator recomputes it.
    pub(crate) fn advance(&self, board: Board, entry: HistoryEntry) -> GameState {
        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend_from_slice(&self.history);
        history.push(entry);
        GameState {
            board,
            current_player: entry.result.moving_piece.team.opponent(),
            history,
            counter: self.counter + 1,
            status: Status::InProgress,
        }
    }

    #[must_use]
    pub(crate) fn with_status(self, status: Status) -> GameState {
        GameState { status, ..self }
    }
}
