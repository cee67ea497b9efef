//! Pseudo-legal move generation.
//!
//! One pure function per piece rank, selected through [`generator_for`].
//! Generators only read the state; they never check whether the mover's own
//! king is left (or already) in check. The orchestrator filters for that and
//! for castling through attacked squares.

use crate::board::Board;
use crate::state::GameState;
use crate::types::{CastleSide, ChessPiece, Loc, MoveCommand, Rank, Team};
use crate::utils::{ALL_DIRECTIONS, DIAGONAL, KNIGHT_OFFSETS, MAX_RAY, ORTHOGONAL};

/// Rook leg of a castling move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RookRelocation {
    pub source: Loc,
    pub destination: Loc,
}

/// Pseudo-legal candidate move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub destination: Loc,
    /// Snapshot of the piece before it moves
    pub moving_piece: ChessPiece,
    /// For en passant this sits beside the destination, not on it
    pub taken_piece: Option<ChessPiece>,
    /// Set on a double pawn advance: the reply may capture en passant
    pub en_passant_possible: bool,
    /// Castling only: squares the king crosses, destination included
    pub king_path: Option<[Loc; 2]>,
    pub rook_move: Option<RookRelocation>,
    pub promotion: Option<Rank>,
}

impl MoveResult {
    fn quiet(piece: &ChessPiece, destination: Loc) -> Self {
        Self {
            destination,
            moving_piece: *piece,
            taken_piece: None,
            en_passant_possible: false,
            king_path: None,
            rook_move: None,
            promotion: None,
        }
    }

    fn capture(piece: &ChessPiece, destination: Loc, taken: ChessPiece) -> Self {
        Self {
            taken_piece: Some(taken),
            ..Self::quiet(piece, destination)
        }
    }

    pub fn source(&self) -> Loc {
        self.moving_piece.position
    }

    pub fn is_capture(&self) -> bool {
        self.taken_piece.is_some()
    }

    pub fn castle_side(&self) -> Option<CastleSide> {
        self.rook_move.map(|rook| {
            if rook.source.col == 0 {
                CastleSide::Queen
            } else {
                CastleSide::King
            }
        })
    }

    pub fn to_command(&self) -> MoveCommand {
        MoveCommand {
            source: self.source(),
            destination: self.destination,
            promotion_rank: self.promotion,
        }
    }
}

pub type Generator = fn(&ChessPiece, &GameState) -> Vec<MoveResult>;

/// Closed dispatch table from rank to generator
pub fn generator_for(rank: Rank) -> Generator {
    match rank {
        Rank::Pawn => pawn_moves,
        Rank::Knight => knight_moves,
        Rank::Bishop => bishop_moves,
        Rank::Rook => rook_moves,
        Rank::Queen => queen_moves,
        Rank::King => king_moves,
    }
}

pub fn piece_moves(piece: &ChessPiece, state: &GameState) -> Vec<MoveResult> {
    generator_for(piece.rank)(piece, state)
}

/// Every pseudo-legal move of `team`, in board order then generator order
pub fn pseudo_legal_moves(state: &GameState, team: Team) -> Vec<MoveResult> {
    state
        .board()
        .pieces_of(team)
        .flat_map(|piece| piece_moves(&piece, state))
        .collect()
}

/// Whether any piece of `by` attacks `target`. Castling is not an attack;
/// pawns attack their forward diagonals whether or not anything stands there.
pub fn is_square_attacked(state: &GameState, target: Loc, by: Team) -> bool {
    state.board().pieces_of(by).any(|attacker| match attacker.rank {
        Rank::Pawn => [-1, 1]
            .iter()
            .any(|&d_col| attacker.position.offset(by.forward(), d_col) == Some(target)),
        _ => piece_moves(&attacker, state)
            .iter()
            .any(|m| m.destination == target && m.rook_move.is_none()),
    })
}

// Walk each ray until the edge, a friendly piece (excluded) or an enemy
// piece (captured). Knights and kings use `max_distance == 1`.
fn walk_rays(
    piece: &ChessPiece,
    board: &Board,
    directions: &[(i8, i8)],
    max_distance: u8,
) -> Vec<MoveResult> {
    let mut moves = Vec::new();
    for &(d_row, d_col) in directions {
        let mut current = piece.position;
        for _ in 0..max_distance {
            let Some(next) = current.offset(d_row, d_col) else {
                break;
            };
            match board.piece_from_loc(next) {
                None => moves.push(MoveResult::quiet(piece, next)),
                Some(other) if other.team != piece.team => {
                    moves.push(MoveResult::capture(piece, next, other));
                    break;
                }
                Some(_) => break,
            }
            current = next;
        }
    }
    moves
}

pub fn pawn_moves(piece: &ChessPiece, state: &GameState) -> Vec<MoveResult> {
    let board = state.board();
    let forward = piece.team.forward();
    let mut moves = Vec::new();

    if let Some(one) = piece.position.offset(forward, 0) {
        if board.is_empty_at(one) {
            moves.push(MoveResult::quiet(piece, one));
            if piece.first_move {
                if let Some(two) = one.offset(forward, 0) {
                    if board.is_empty_at(two) {
                        moves.push(MoveResult {
                            en_passant_possible: true,
                            ..MoveResult::quiet(piece, two)
                        });
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(target) = piece.position.offset(forward, d_col) {
            if let Some(other) = board.piece_from_loc(target) {
                if other.team != piece.team {
                    moves.push(MoveResult::capture(piece, target, other));
                }
            }
        }
    }

    if let Some(victim) = en_passant_victim(piece, state) {
        if let Some(target) = victim.position.offset(forward, 0) {
            if board.is_empty_at(target) {
                moves.push(MoveResult::capture(piece, target, victim));
            }
        }
    }

    let last_row = piece.team.promotion_row();
    for m in &mut moves {
        if m.destination.row == last_row {
            m.promotion = Some(Rank::Queen);
        }
    }
    moves
}

// The enemy pawn that just advanced two squares to land beside `piece`
fn en_passant_victim(piece: &ChessPiece, state: &GameState) -> Option<ChessPiece> {
    let last = state.last_move()?.result;
    if !last.en_passant_possible || last.moving_piece.team == piece.team {
        return None;
    }
    let landed = last.destination;
    if landed.row != piece.position.row || landed.col.abs_diff(piece.position.col) != 1 {
        return None;
    }
    let victim = state.board().piece_from_loc(landed)?;
    (victim.rank == Rank::Pawn && victim.team != piece.team).then_some(victim)
}

pub fn knight_moves(piece: &ChessPiece, state: &GameState) -> Vec<MoveResult> {
    walk_rays(piece, state.board(), &KNIGHT_OFFSETS, 1)
}

pub fn bishop_moves(piece: &ChessPiece, state: &GameState) -> Vec<MoveResult> {
    walk_rays(piece, state.board(), &DIAGONAL, MAX_RAY)
}

pub fn rook_moves(piece: &ChessPiece, state: &GameState) -> Vec<MoveResult> {
    walk_rays(piece, state.board(), &ORTHOGONAL, MAX_RAY)
}

pub fn queen_moves(piece: &ChessPiece, state: &GameState) -> Vec<MoveResult> {
    walk_rays(piece, state.board(), &ALL_DIRECTIONS, MAX_RAY)
}

pub fn king_moves(piece: &ChessPiece, state: &GameState) -> Vec<MoveResult> {
    let mut moves = walk_rays(piece, state.board(), &ALL_DIRECTIONS, 1);
    moves.extend(castling_moves(piece, state.board()));
    moves
}

// Castling candidates: king and rook unmoved, nothing between them. Whether
// the king is in check or crosses an attacked square is left to the caller,
// which reads `king_path`.
fn castling_moves(king: &ChessPiece, board: &Board) -> Vec<MoveResult> {
    let mut moves = Vec::new();
    let row = king.team.back_row();
    if !king.first_move || king.position != Loc::new(row, 4) {
        return moves;
    }

    for rook_col in [7u8, 0u8] {
        let rook_loc = Loc::new(row, rook_col);
        let Some(rook) = board.piece_from_loc(rook_loc) else {
            continue;
        };
        if rook.rank != Rank::Rook || rook.team != king.team || !rook.first_move {
            continue;
        }

        let (low, high) = if rook_col > king.position.col {
            (king.position.col, rook_col)
        } else {
            (rook_col, king.position.col)
        };
        if ((low + 1)..high).any(|col| !board.is_empty_at(Loc::new(row, col))) {
            continue;
        }

        let step: i8 = if rook_col > king.position.col { 1 } else { -1 };
        let (Some(passed), Some(landing)) =
            (king.position.offset(0, step), king.position.offset(0, 2 * step))
        else {
            continue;
        };
        moves.push(MoveResult {
            king_path: Some([passed, landing]),
            rook_move: Some(RookRelocation {
                source: rook_loc,
                destination: passed,
            }),
            ..MoveResult::quiet(king, landing)
        });
    }
    moves
}
