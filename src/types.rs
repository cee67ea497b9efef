//! Coordinate and enumeration primitives shared by every layer of the engine.
//!
//! Square mapping: row 0 is White's back rank (rank 1), col 0 is the a-file.
//! `Loc::new(1, 4)` is e2, `Loc::new(7, 7)` is h8.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A board coordinate, always inside the 8x8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Loc {
    pub row: u8,
    pub col: u8,
}

impl Loc {
    /// Panics if `row` or `col` is outside 0..8; callers bounds-check first.
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "square out of range");
        Self { row, col }
    }

    /// Signed constructor used when stepping along rays
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::try_new(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    /// "a1".."h8"
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = (b'1' + self.row) as char;
        format!("{}{}", file, rank)
    }

    pub fn from_algebraic(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        Self::from_file_rank(bytes[0] as char, bytes[1] as char)
    }

    pub(crate) fn from_file_rank(file: char, rank: char) -> Option<Self> {
        let col = file_index(file)?;
        let row = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return None,
        };
        Some(Self { row, col })
    }
}

pub(crate) fn file_index(file: char) -> Option<u8> {
    match file {
        'a'..='h' => Some(file as u8 - b'a'),
        _ => None,
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid square notation '{0}'")]
pub struct ParseLocError(pub String);

impl FromStr for Loc {
    type Err = ParseLocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s).ok_or_else(|| ParseLocError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 6] = [
        Rank::Pawn,
        Rank::Knight,
        Rank::Bishop,
        Rank::Rook,
        Rank::Queen,
        Rank::King,
    ];

    /// Material value in pawns
    pub const fn value(self) -> i32 {
        match self {
            Rank::Pawn => 1,
            Rank::Knight => 3,
            Rank::Bishop => 3,
            Rank::Rook => 5,
            Rank::Queen => 9,
            Rank::King => 100,
        }
    }

    /// Upper-case letter as used by FEN (white) and SAN
    pub const fn letter(self) -> char {
        match self {
            Rank::Pawn => 'P',
            Rank::Knight => 'N',
            Rank::Bishop => 'B',
            Rank::Rook => 'R',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }

    /// Case-insensitive inverse of [`Rank::letter`]
    pub fn from_letter(letter: char) -> Option<Rank> {
        let upper = letter.to_ascii_uppercase();
        Rank::ALL.into_iter().find(|rank| rank.letter() == upper)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    White,
    Black,
}

impl Team {
    pub const fn opponent(self) -> Team {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// Row delta of a pawn advance
    pub const fn forward(self) -> i8 {
        match self {
            Team::White => 1,
            Team::Black => -1,
        }
    }

    pub const fn back_row(self) -> u8 {
        match self {
            Team::White => 0,
            Team::Black => 7,
        }
    }

    pub const fn pawn_row(self) -> u8 {
        match self {
            Team::White => 1,
            Team::Black => 6,
        }
    }

    pub const fn promotion_row(self) -> u8 {
        match self {
            Team::White => 7,
            Team::Black => 0,
        }
    }

    /// +1 for White, -1 for Black; evaluation is White-positive
    pub const fn sign(self) -> i32 {
        match self {
            Team::White => 1,
            Team::Black => -1,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => f.write_str("white"),
            Team::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

/// Immutable piece record. Moving or promoting a piece builds a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessPiece {
    pub id: u16,
    pub team: Team,
    pub rank: Rank,
    pub position: Loc,
    /// Still on its starting square; gates the double pawn push and castling
    pub first_move: bool,
}

impl ChessPiece {
    pub const fn new(id: u16, team: Team, rank: Rank, position: Loc) -> Self {
        Self {
            id,
            team,
            rank,
            position,
            first_move: true,
        }
    }

    #[must_use]
    pub const fn moved_to(self, position: Loc) -> Self {
        Self {
            position,
            first_move: false,
            ..self
        }
    }

    #[must_use]
    pub const fn promoted_to(self, rank: Rank) -> Self {
        Self { rank, ..self }
    }

    /// FEN letter: upper case for White, lower case for Black
    pub fn fen_char(&self) -> char {
        match self.team {
            Team::White => self.rank.letter(),
            Team::Black => self.rank.letter().to_ascii_lowercase(),
        }
    }
}

/// External move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveCommand {
    pub source: Loc,
    pub destination: Loc,
    /// Accepted for interface completeness; promotion is always to a queen
    pub promotion_rank: Option<Rank>,
}

impl MoveCommand {
    pub const fn new(source: Loc, destination: Loc) -> Self {
        Self {
            source,
            destination,
            promotion_rank: None,
        }
    }

    #[must_use]
    pub const fn with_promotion(self, rank: Rank) -> Self {
        Self {
            promotion_rank: Some(rank),
            ..self
        }
    }
}

/// Long algebraic form, e.g. "e2e4" or "e7e8q"
impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)?;
        if let Some(rank) = self.promotion_rank {
            write!(f, "{}", rank.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_conversion_matches_row_col_mapping() {
        assert_eq!(Loc::new(0, 0).to_algebraic(), "a1");
        assert_eq!(Loc::new(1, 4).to_algebraic(), "e2");
        assert_eq!(Loc::new(7, 7).to_algebraic(), "h8");
        assert_eq!("e4".parse::<Loc>(), Ok(Loc::new(3, 4)));
        assert_eq!(Loc::from_algebraic("f7"), Some(Loc::new(6, 5)));
        assert!(Loc::from_algebraic("i1").is_none());
        assert!(Loc::from_algebraic("a9").is_none());
        assert!(Loc::from_algebraic("a10").is_none());
    }

    #[test]
    fn offsets_stay_on_board() {
        let corner = Loc::new(0, 7);
        assert_eq!(corner.offset(1, -1), Some(Loc::new(1, 6)));
        assert!(corner.offset(0, 1).is_none());
        assert!(corner.offset(-1, 0).is_none());
    }

    #[test]
    fn moved_piece_is_a_new_record() {
        let pawn = ChessPiece::new(3, Team::White, Rank::Pawn, Loc::new(1, 4));
        let moved = pawn.moved_to(Loc::new(3, 4));
        assert!(pawn.first_move);
        assert_eq!(pawn.position, Loc::new(1, 4));
        assert!(!moved.first_move);
        assert_eq!(moved.id, pawn.id);
        assert_eq!(moved.promoted_to(Rank::Queen).rank, Rank::Queen);
    }

    #[test]
    fn command_display_is_long_algebraic() {
        let cmd = MoveCommand::new(Loc::new(6, 0), Loc::new(7, 0)).with_promotion(Rank::Queen);
        assert_eq!(cmd.to_string(), "a7a8q");
    }

    #[test]
    fn rank_letters_parse_in_either_case() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_letter(rank.letter()), Some(rank));
            assert_eq!(Rank::from_letter(rank.letter().to_ascii_lowercase()), Some(rank));
        }
        assert_eq!(Rank::from_letter('x'), None);
    }
}
