//! Orchestrator: legality filtering, move application and the status machine.
//!
//! The free functions work on borrowed [`GameState`]s and always return new
//! states. [`Game`] owns the current state exclusively and rebinds it after
//! each accepted command.

use tracing::debug;

use crate::error::{GameError, GameResult};
use crate::movegen::{is_square_attacked, piece_moves, pseudo_legal_moves, MoveResult};
use crate::notation::fen::{self, FenError};
use crate::state::{GameState, HistoryEntry, Status};
use crate::types::{ChessPiece, MoveCommand, Rank, Team};

/// True when `team`'s king is attacked by any opposing piece.
/// A side without a king is never in check.
pub fn is_king_in_check(state: &GameState, team: Team) -> bool {
    match state.board().find_king(team) {
        Some(king) => is_square_attacked(state, king.position, team.opponent()),
        None => false,
    }
}

/// Pseudo-legal moves of `team` that survive the self-check filter, in
/// generation order.
pub fn find_legal_results(state: &GameState, team: Team) -> Vec<MoveResult> {
    pseudo_legal_moves(state, team)
        .into_iter()
        .filter(|result| is_result_legal(state, result))
        .collect()
}

pub fn find_legal_moves(state: &GameState, team: Team) -> Vec<MoveCommand> {
    find_legal_results(state, team)
        .iter()
        .map(MoveResult::to_command)
        .collect()
}

pub fn has_legal_move(state: &GameState, team: Team) -> bool {
    pseudo_legal_moves(state, team)
        .iter()
        .any(|result| is_result_legal(state, result))
}

fn is_result_legal(state: &GameState, result: &MoveResult) -> bool {
    let team = result.moving_piece.team;
    if castling_path_attacked(state, result) {
        return false;
    }
    let next = apply_result(state, result.to_command(), *result);
    !is_king_in_check(&next, team)
}

// Castling is vetoed when the king starts in check or any square on its
// path is attacked. The post-move check test only sees the landing square.
fn castling_path_attacked(state: &GameState, result: &MoveResult) -> bool {
    let Some(path) = result.king_path else {
        return false;
    };
    let team = result.moving_piece.team;
    is_king_in_check(state, team)
        || path
            .iter()
            .any(|&square| is_square_attacked(state, square, team.opponent()))
}

/// The pseudo-legal result of the piece on `command.source` that lands on
/// `command.destination`
fn find_pseudo_result(state: &GameState, command: &MoveCommand) -> Option<MoveResult> {
    let piece = state.board().piece_from_loc(command.source)?;
    piece_moves(&piece, state)
        .into_iter()
        .find(|result| result.destination == command.destination)
}

/// Apply `command` without any turn or check validation. When the source
/// piece has no pseudo-legal move to the destination the state comes back
/// unchanged.
pub fn apply_move_command(command: &MoveCommand, state: &GameState) -> GameState {
    match find_pseudo_result(state, command) {
        Some(result) => apply_result(state, *command, result),
        None => state.clone(),
    }
}

/// Apply an already matched generator result. Captured pieces are removed
/// from wherever they stand, a castling rook is relocated and a pawn reaching
/// the last row becomes a queen.
pub(crate) fn apply_result(
    state: &GameState,
    command: MoveCommand,
    result: MoveResult,
) -> GameState {
    let mut board = state.board().clone();

    if let Some(taken) = result.taken_piece {
        board = board.update_piece_from_loc(taken.position, None);
    }

    if let Some(rook_move) = result.rook_move {
        if let Some(rook) = board.piece_from_loc(rook_move.source) {
            let relocated = rook.moved_to(rook_move.destination);
            board = board
                .update_piece_from_loc(rook_move.source, None)
                .update_piece_from_loc(rook_move.destination, Some(relocated));
        }
    }

    let mut moved: ChessPiece = result.moving_piece.moved_to(result.destination);
    if result.promotion.is_some() {
        moved = moved.promoted_to(Rank::Queen);
    }
    board = board
        .update_piece_from_loc(result.source(), None)
        .update_piece_from_loc(result.destination, Some(moved));

    state.advance(board, HistoryEntry { command, result })
}

/// Status of `state` from the point of view of the side on move
pub fn compute_status(state: &GameState) -> Status {
    let team = state.current_player();
    let in_check = is_king_in_check(state, team);
    let can_reply = has_legal_move(state, team);
    match (in_check, can_reply) {
        (true, false) => Status::Checkmate,
        (false, false) => Status::Draw,
        (true, true) => Status::Check,
        (false, true) => Status::InProgress,
    }
}

/// Leaf count of the legal move tree, for move generator validation
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = find_legal_results(state, state.current_player());
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|result| perft(&apply_result(state, result.to_command(), result), depth - 1))
        .sum()
}

/// Engine handle owning the current game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    state: GameState,
}

impl Default for Game {
    fn default() -> Self {
        Self::from_state(GameState::default())
    }
}

impl Game {
    /// Build from an optional FEN; `None` is the standard starting position
    pub fn new(fen_text: Option<&str>) -> Result<Self, FenError> {
        match fen_text {
            Some(text) => Self::from_fen(text),
            None => Ok(Self::default()),
        }
    }

    pub fn from_fen(fen_text: &str) -> Result<Self, FenError> {
        fen::decode(fen_text).map(Self::from_state)
    }

    /// Adopt `state`, recomputing its status
    pub fn from_state(state: GameState) -> Self {
        let status = compute_status(&state);
        Self {
            state: state.with_status(status),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn current_player(&self) -> Team {
        self.state.current_player()
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    /// The board flattened to a list, a1 first
    pub fn pieces(&self) -> Vec<ChessPiece> {
        self.state.board().pieces().collect()
    }

    pub fn current_fen(&self) -> String {
        fen::encode(&self.state)
    }

    pub fn legal_moves(&self, team: Team) -> Vec<MoveCommand> {
        find_legal_moves(&self.state, team)
    }

    /// Validate and play `command`. On error the current state is untouched.
    pub fn execute_command(&mut self, command: MoveCommand) -> GameResult<&Game> {
        let (from, to) = (command.source, command.destination);
        let piece = self
            .state
            .board()
            .piece_from_loc(from)
            .ok_or(GameError::InvalidSource { loc: from })?;
        if piece.team != self.state.current_player() {
            return Err(GameError::WrongTurn {
                loc: from,
                team: piece.team,
            });
        }

        let result = find_pseudo_result(&self.state, &command)
            .ok_or(GameError::NoSuchMove { from, to })?;
        if castling_path_attacked(&self.state, &result) {
            debug!(%command, "castling out of or through check rejected");
            return Err(GameError::SelfCheck { from, to });
        }

        let next = apply_result(&self.state, command, result);
        if is_king_in_check(&next, piece.team) {
            debug!(%command, "move leaves own king in check");
            return Err(GameError::SelfCheck { from, to });
        }

        let status = compute_status(&next);
        debug!(%command, ?status, ply = next.counter(), "command accepted");
        self.state = next.with_status(status);
        Ok(self)
    }
}
