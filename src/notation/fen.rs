//! FEN decoding and encoding.
//!
//! Only piece placement and the active colour are round-tripped. The castling
//! field is read to seed `first_move` flags; en passant and the move clocks
//! are ignored on input and written as fixed placeholders on output.

use thiserror::Error;

use crate::board::Board;
use crate::state::GameState;
use crate::types::{ChessPiece, Loc, Rank, Team};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Suffix written after the active colour
const PLACEHOLDER_FIELDS: &str = "KQkq - 0 1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("empty FEN string")]
    Empty,

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    /// Rank number as written in the FEN, 8 first
    #[error("rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: u8 },

    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),

    #[error("invalid active colour '{0}'")]
    InvalidColor(String),

    #[error("invalid castling field '{0}'")]
    InvalidCastling(String),

    #[error("{team} has {count} kings, expected exactly one")]
    KingCount { team: Team, count: usize },
}

/// Castling rights as listed in the third FEN field
#[derive(Debug, Clone, Copy, Default)]
struct CastlingRights {
    white_king: bool,
    white_queen: bool,
    black_king: bool,
    black_queen: bool,
}

impl CastlingRights {
    fn parse(field: &str) -> Result<Self, FenError> {
        let mut rights = Self::default();
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            match c {
                'K' => rights.white_king = true,
                'Q' => rights.white_queen = true,
                'k' => rights.black_king = true,
                'q' => rights.black_queen = true,
                _ => return Err(FenError::InvalidCastling(field.to_string())),
            }
        }
        Ok(rights)
    }

    fn side(&self, team: Team) -> (bool, bool) {
        match team {
            Team::White => (self.white_king, self.white_queen),
            Team::Black => (self.black_king, self.black_queen),
        }
    }
}

/// Decode a FEN string into a fresh state with empty history.
///
/// The active colour defaults to White when the field is missing. Without a
/// castling field, kings and rooks on their home squares count as unmoved.
pub fn decode(text: &str) -> Result<GameState, FenError> {
    let mut fields = text.split_whitespace();
    let placement = fields.next().ok_or(FenError::Empty)?;
    let team = match fields.next() {
        None | Some("w") => Team::White,
        Some("b") => Team::Black,
        Some(other) => return Err(FenError::InvalidColor(other.to_string())),
    };
    let rights = fields.next().map(CastlingRights::parse).transpose()?;

    let mut placed = parse_placement(placement)?;
    for team in [Team::White, Team::Black] {
        let count = placed
            .iter()
            .filter(|(_, t, r)| *t == team && *r == Rank::King)
            .count();
        if count != 1 {
            return Err(FenError::KingCount { team, count });
        }
    }

    placed.sort_by_key(|(loc, _, _)| *loc);
    let pieces = placed.into_iter().enumerate().map(|(id, (loc, team, rank))| ChessPiece {
        id: id as u16,
        team,
        rank,
        position: loc,
        first_move: is_unmoved(loc, team, rank, rights.as_ref()),
    });

    Ok(GameState::new(Board::from_pieces(pieces), team))
}

fn parse_placement(placement: &str) -> Result<Vec<(Loc, Team, Rank)>, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut placed = Vec::with_capacity(32);
    for (i, rank_text) in ranks.iter().enumerate() {
        let row = 7 - i as u8;
        let width_error = FenError::RankWidth { rank: row + 1 };
        let mut col = 0u8;
        for c in rank_text.chars() {
            match c {
                '1'..='8' => col += c as u8 - b'0',
                _ => {
                    let rank = Rank::from_letter(c).ok_or(FenError::InvalidPiece(c))?;
                    if col >= 8 {
                        return Err(width_error);
                    }
                    let team = if c.is_ascii_uppercase() {
                        Team::White
                    } else {
                        Team::Black
                    };
                    placed.push((Loc::new(row, col), team, rank));
                    col += 1;
                }
            }
            if col > 8 {
                return Err(width_error);
            }
        }
        if col != 8 {
            return Err(width_error);
        }
    }
    Ok(placed)
}

fn is_unmoved(loc: Loc, team: Team, rank: Rank, rights: Option<&CastlingRights>) -> bool {
    let home = team.back_row();
    match rank {
        Rank::Pawn => loc.row == team.pawn_row(),
        Rank::King => {
            if loc != Loc::new(home, 4) {
                return false;
            }
            rights.map_or(true, |r| {
                let (king_side, queen_side) = r.side(team);
                king_side || queen_side
            })
        }
        Rank::Rook => {
            if loc.row != home || (loc.col != 0 && loc.col != 7) {
                return false;
            }
            rights.map_or(true, |r| {
                let (king_side, queen_side) = r.side(team);
                if loc.col == 7 {
                    king_side
                } else {
                    queen_side
                }
            })
        }
        _ => true,
    }
}

/// Piece-placement field only, rank 8 first
pub fn encode_placement(board: &Board) -> String {
    let mut out = String::with_capacity(72);
    for row in (0..8).rev() {
        let mut empty = 0u8;
        for col in 0..8 {
            match board.piece_from_row_col(row, col) {
                Some(piece) => {
                    if empty > 0 {
                        out.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push((b'0' + empty) as char);
        }
        if row > 0 {
            out.push('/');
        }
    }
    out
}

pub fn encode(state: &GameState) -> String {
    let colour = match state.current_player() {
        Team::White => 'w',
        Team::Black => 'b',
    };
    format!("{} {} {}", encode_placement(state.board()), colour, PLACEHOLDER_FIELDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_fen_matches_standard_board() {
        let state = decode(START_FEN).unwrap();
        assert_eq!(state.board(), &Board::standard());
        assert_eq!(state.current_player(), Team::White);
        assert_eq!(encode(&state), START_FEN);
    }

    #[test]
    fn placement_round_trips() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
            "4k3/8/8/8/8/8/8/4K3",
        ] {
            let state = decode(fen).unwrap();
            assert_eq!(encode_placement(state.board()), fen);
        }
    }

    #[test]
    fn active_colour_and_default() {
        assert_eq!(decode("4k3/8/8/8/8/8/8/4K3 b").unwrap().current_player(), Team::Black);
        assert_eq!(decode("4k3/8/8/8/8/8/8/4K3").unwrap().current_player(), Team::White);
        assert_eq!(
            decode("4k3/8/8/8/8/8/8/4K3 x"),
            Err(FenError::InvalidColor("x".to_string()))
        );
    }

    #[test]
    fn malformed_placements_are_rejected() {
        assert_eq!(decode(""), Err(FenError::Empty));
        assert_eq!(decode("8/8/8/8/8/8/8 w"), Err(FenError::RankCount(7)));
        assert_eq!(
            decode("4k3/8/8/8/8/8/8/4K4 w"),
            Err(FenError::RankWidth { rank: 1 })
        );
        assert_eq!(
            decode("4k2/8/8/8/8/8/8/4K3 w"),
            Err(FenError::RankWidth { rank: 8 })
        );
        assert_eq!(decode("4k3/8/8/8/8/8/8/4X3 w"), Err(FenError::InvalidPiece('X')));
        assert_eq!(
            decode("8/8/8/8/8/8/8/4K3 w"),
            Err(FenError::KingCount {
                team: Team::Black,
                count: 0
            })
        );
    }

    #[test]
    fn castling_field_seeds_first_move() {
        let state = decode("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        let board = state.board();
        let unmoved = |sq: &str| board.piece_from_loc(sq.parse().unwrap()).unwrap().first_move;
        assert!(unmoved("h1"));
        assert!(!unmoved("a1"));
        assert!(unmoved("e1"));
        assert!(unmoved("a8"));
        assert!(!unmoved("h8"));

        let none = decode("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert!(!none.board().piece_from_loc(Loc::new(0, 4)).unwrap().first_move);
        assert_eq!(
            decode("r3k2r/8/8/8/8/8/8/R3K2R w KX - 0 1"),
            Err(FenError::InvalidCastling("KX".to_string()))
        );
    }

    #[test]
    fn pawns_off_start_row_have_moved() {
        let state = decode("4k3/8/8/8/4P3/8/3P4/4K3 w - - 0 1").unwrap();
        assert!(state.board().piece_from_loc(Loc::new(1, 3)).unwrap().first_move);
        assert!(!state.board().piece_from_loc(Loc::new(3, 4)).unwrap().first_move);
    }
}
