//! Immutable 8x8 board of optional pieces.
//!
//! Every update returns a fresh `Board`; nothing mutates a board that may be
//! shared through another `GameState`. Indexing outside the grid is a caller
//! bug: check with [`Board::is_row_col_oob`] before calling
//! [`Board::piece_from_row_col`].

use std::fmt;

use crate::types::{ChessPiece, Loc, Rank, Team};

const BACK_RANK: [Rank; 8] = [
    Rank::Rook,
    Rank::Knight,
    Rank::Bishop,
    Rank::Queen,
    Rank::King,
    Rank::Bishop,
    Rank::Knight,
    Rank::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    // squares[row][col]
    squares: [[Option<ChessPiece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard starting position, piece ids assigned row by row from a1
    pub fn standard() -> Self {
        let mut board = Self::empty();
        let mut id = 0u16;
        let rows: [(u8, Team, bool); 4] = [
            (0, Team::White, true),
            (1, Team::White, false),
            (6, Team::Black, false),
            (7, Team::Black, true),
        ];
        for (row, team, back) in rows {
            for col in 0..8u8 {
                let rank = if back {
                    BACK_RANK[col as usize]
                } else {
                    Rank::Pawn
                };
                board.squares[row as usize][col as usize] =
                    Some(ChessPiece::new(id, team, rank, Loc::new(row, col)));
                id += 1;
            }
        }
        board
    }

    /// Build a board from piece records, each placed at its own `position`
    pub fn from_pieces<I: IntoIterator<Item = ChessPiece>>(pieces: I) -> Self {
        let mut board = Self::empty();
        for piece in pieces {
            let Loc { row, col } = piece.position;
            board.squares[row as usize][col as usize] = Some(piece);
        }
        board
    }

    #[inline]
    pub fn is_row_col_oob(row: i8, col: i8) -> bool {
        crate::utils::is_row_col_oob(row, col)
    }

    #[inline]
    pub fn piece_from_loc(&self, loc: Loc) -> Option<ChessPiece> {
        self.squares[loc.row as usize][loc.col as usize]
    }

    /// Panics when `row` or `col` is outside 0..8.
    #[inline]
    pub fn piece_from_row_col(&self, row: usize, col: usize) -> Option<ChessPiece> {
        self.squares[row][col]
    }

    #[inline]
    pub fn is_empty_at(&self, loc: Loc) -> bool {
        self.piece_from_loc(loc).is_none()
    }

    /// Copy-on-write: a new board with exactly `loc` replaced.
    #[must_use]
    pub fn update_piece_from_loc(&self, loc: Loc, piece: Option<ChessPiece>) -> Board {
        debug_assert!(piece.map_or(true, |p| p.position == loc));
        let mut next = self.clone();
        next.squares[loc.row as usize][loc.col as usize] = piece;
        next
    }

    /// All pieces, row by row from a1 to h8
    pub fn pieces(&self) -> impl Iterator<Item = ChessPiece> + '_ {
        self.squares.iter().flatten().flatten().copied()
    }

    pub fn pieces_of(&self, team: Team) -> impl Iterator<Item = ChessPiece> + '_ {
        self.pieces().filter(move |p| p.team == team)
    }

    pub fn find_king(&self, team: Team) -> Option<ChessPiece> {
        self.pieces_of(team).find(|p| p.rank == Rank::King)
    }

    pub fn count(&self, team: Team, rank: Rank) -> usize {
        self.pieces_of(team).filter(|p| p.rank == rank).count()
    }
}

// Diagram with rank 8 on top
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            for col in 0..8 {
                match self.squares[row][col] {
                    Some(piece) => write!(f, "{} ", piece.fen_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_board_layout() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        let king = board.find_king(Team::White).unwrap();
        assert_eq!(king.position, Loc::new(0, 4));
        assert_eq!(board.find_king(Team::Black).unwrap().position, Loc::new(7, 4));
        assert_eq!(board.count(Team::Black, Rank::Pawn), 8);
        assert_eq!(
            board.piece_from_row_col(7, 3).map(|p| (p.team, p.rank)),
            Some((Team::Black, Rank::Queen))
        );
        assert!(board.is_empty_at(Loc::new(3, 4)));
    }

    #[test]
    fn update_is_copy_on_write() {
        let board = Board::standard();
        let from = Loc::new(1, 4);
        let to = Loc::new(3, 4);
        let pawn = board.piece_from_loc(from).unwrap();

        let next = board
            .update_piece_from_loc(from, None)
            .update_piece_from_loc(to, Some(pawn.moved_to(to)));

        assert_eq!(board.piece_from_loc(from), Some(pawn));
        assert!(board.is_empty_at(to));
        assert!(next.is_empty_at(from));
        assert_eq!(next.piece_from_loc(to).map(|p| p.id), Some(pawn.id));
    }

    #[test]
    fn bounds_check_helper() {
        assert!(!Board::is_row_col_oob(0, 0));
        assert!(!Board::is_row_col_oob(7, 7));
        assert!(Board::is_row_col_oob(-1, 3));
        assert!(Board::is_row_col_oob(3, 8));
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let _ = Board::standard().piece_from_row_col(8, 0);
    }

    #[test]
    fn display_draws_rank_eight_first() {
        let text = Board::standard().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first.trim_end(), "r n b q k b n r");
    }
}
