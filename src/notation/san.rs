//! Short algebraic notation: single-token parsing and resolution against the
//! legal moves of a position.
//!
//! Supported forms after normalisation are castling (`O-O`, `O-O-O`), a bare
//! destination (`e4`), a piece letter plus destination (`Nf3`) and a
//! pawn capture with its source file (`exd5`). Tokens that still need file
//! or rank disambiguation (`Nbd2`, `R1a3`, `Qh4e1`) are rejected as
//! unrecognized.

use thiserror::Error;

use crate::game::find_legal_results;
use crate::movegen::MoveResult;
use crate::state::GameState;
use crate::types::{file_index, CastleSide, Loc, MoveCommand, Rank};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanError {
    #[error("unrecognized move token '{0}'")]
    Unrecognized(String),

    /// The token parsed but no legal move in the position fits it
    #[error("no legal move matches '{0}'")]
    Ambiguous(String),
}

/// Parsed form of one SAN token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanMove {
    Castle(CastleSide),
    Move {
        /// `None` for a bare destination: any piece may move there
        rank: Option<Rank>,
        destination: Loc,
        source_file: Option<u8>,
        source_row: Option<u8>,
    },
}

/// Strip check and mate markers, annotation glyphs, capture marks and the
/// promotion suffix. Promotion is always to a queen, so the piece is dropped.
fn normalize(token: &str) -> String {
    let mut text: String = token
        .chars()
        .filter(|c| !matches!(c, '+' | '#' | '!' | '?' | 'x' | ':'))
        .collect();
    if let Some(eq) = text.find('=') {
        text.truncate(eq);
    }
    // "e8Q" without the equals sign
    let bytes = text.as_bytes();
    if bytes.len() >= 3 {
        let last = bytes[bytes.len() - 1];
        let before = bytes[bytes.len() - 2];
        if matches!(last, b'Q' | b'R' | b'B' | b'N') && matches!(before, b'1' | b'8') {
            text.pop();
        }
    }
    text
}

pub fn parse_san(token: &str) -> Result<SanMove, SanError> {
    let unrecognized = || SanError::Unrecognized(token.to_string());
    let text = normalize(token.trim());

    match text.as_str() {
        "O-O" | "0-0" => return Ok(SanMove::Castle(CastleSide::King)),
        "O-O-O" | "0-0-0" => return Ok(SanMove::Castle(CastleSide::Queen)),
        _ => {}
    }

    let chars: Vec<char> = text.chars().collect();
    match chars.as_slice() {
        [file, rank] => {
            let destination = Loc::from_file_rank(*file, *rank).ok_or_else(unrecognized)?;
            Ok(SanMove::Move {
                rank: None,
                destination,
                source_file: None,
                source_row: None,
            })
        }
        [first, file, rank] => {
            let destination = Loc::from_file_rank(*file, *rank).ok_or_else(unrecognized)?;
            if first.is_ascii_uppercase() {
                let piece = Rank::from_letter(*first).ok_or_else(unrecognized)?;
                Ok(SanMove::Move {
                    rank: Some(piece),
                    destination,
                    source_file: None,
                    source_row: None,
                })
            } else {
                let source_file = file_index(*first).ok_or_else(unrecognized)?;
                Ok(SanMove::Move {
                    rank: Some(Rank::Pawn),
                    destination,
                    source_file: Some(source_file),
                    source_row: None,
                })
            }
        }
        _ => Err(unrecognized()),
    }
}

fn matches_san(result: &MoveResult, san: &SanMove) -> bool {
    match *san {
        SanMove::Castle(side) => result.castle_side() == Some(side),
        SanMove::Move {
            rank,
            destination,
            source_file,
            source_row,
        } => {
            let source = result.source();
            result.castle_side().is_none()
                && result.destination == destination
                && rank.map_or(true, |rank| result.moving_piece.rank == rank)
                && source_file.map_or(true, |file| source.col == file)
                && source_row.map_or(true, |row| source.row == row)
        }
    }
}

/// The legal move of the side on move that fits `san`. When several fit, the
/// one moving the cheapest piece wins, first generated on a tie.
pub fn resolve_san(state: &GameState, san: &SanMove) -> Option<MoveResult> {
    find_legal_results(state, state.current_player())
        .into_iter()
        .filter(|result| matches_san(result, san))
        .min_by_key(|result| result.moving_piece.rank.value())
}

/// Parse and resolve `token` in one step
pub fn san_to_command(state: &GameState, token: &str) -> Result<MoveCommand, SanError> {
    let san = parse_san(token)?;
    resolve_san(state, &san)
        .map(|result| result.to_command())
        .ok_or_else(|| SanError::Ambiguous(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::fen;

    fn loc(text: &str) -> Loc {
        text.parse().unwrap()
    }

    #[test]
    fn parses_supported_forms() {
        assert_eq!(parse_san("O-O"), Ok(SanMove::Castle(CastleSide::King)));
        assert_eq!(parse_san("0-0-0+"), Ok(SanMove::Castle(CastleSide::Queen)));
        assert_eq!(
            parse_san("e4"),
            Ok(SanMove::Move {
                rank: None,
                destination: loc("e4"),
                source_file: None,
                source_row: None
            })
        );
        assert_eq!(
            parse_san("Qxf7#"),
            Ok(SanMove::Move {
                rank: Some(Rank::Queen),
                destination: loc("f7"),
                source_file: None,
                source_row: None
            })
        );
        assert_eq!(
            parse_san("exd5"),
            Ok(SanMove::Move {
                rank: Some(Rank::Pawn),
                destination: loc("d5"),
                source_file: Some(4),
                source_row: None
            })
        );
        assert_eq!(
            parse_san("e8=Q+"),
            Ok(SanMove::Move {
                rank: None,
                destination: loc("e8"),
                source_file: None,
                source_row: None
            })
        );
    }

    #[test]
    fn rejects_disambiguated_and_garbage() {
        for token in ["Nbd2", "R1a3", "Qh4e1", "Z4", "i9", "", "Nz3"] {
            assert_eq!(parse_san(token), Err(SanError::Unrecognized(token.to_string())));
        }
    }

    #[test]
    fn resolves_opening_moves() {
        let state = GameState::default();
        assert_eq!(san_to_command(&state, "e4").unwrap().to_string(), "e2e4");
        assert_eq!(san_to_command(&state, "Nf3").unwrap().to_string(), "g1f3");
        assert_eq!(
            san_to_command(&state, "Ke2"),
            Err(SanError::Ambiguous("Ke2".to_string()))
        );
    }

    #[test]
    fn bare_destination_matches_any_piece() {
        // Only the knight can reach d4 here
        let state = fen::decode("4k3/8/8/8/8/5N2/8/4K3 w - - 0 1").unwrap();
        assert_eq!(san_to_command(&state, "d4").unwrap().to_string(), "f3d4");
        assert_eq!(san_to_command(&state, "Ne5").unwrap().to_string(), "f3e5");
        assert!(san_to_command(&state, "Nd5").is_err());
    }

    #[test]
    fn bare_destination_prefers_the_cheapest_piece() {
        // Pawn d2 and knight f3 both reach d4
        let state = fen::decode("4k3/8/8/8/8/5N2/3P4/4K3 w - - 0 1").unwrap();
        assert_eq!(san_to_command(&state, "d4").unwrap().to_string(), "d2d4");
        assert_eq!(san_to_command(&state, "Nd4").unwrap().to_string(), "f3d4");
    }

    #[test]
    fn pawn_capture_uses_source_file() {
        let state = fen::decode("4k3/8/8/3p4/2P1P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(san_to_command(&state, "exd5").unwrap().to_string(), "e4d5");
        assert_eq!(san_to_command(&state, "cxd5").unwrap().to_string(), "c4d5");
    }

    #[test]
    fn castling_token_needs_a_castle() {
        let state = fen::decode("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert_eq!(san_to_command(&state, "O-O").unwrap().to_string(), "e1g1");
        assert_eq!(
            san_to_command(&state, "O-O-O"),
            Err(SanError::Ambiguous("O-O-O".to_string()))
        );
        // A king step to g1 is not a castle request
        assert_eq!(
            san_to_command(&state, "Kg1"),
            Err(SanError::Ambiguous("Kg1".to_string()))
        );
    }
}
