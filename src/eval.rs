//! Static evaluation: material plus a small central-occupation term.
//!
//! Scores are White-positive: the search maximises for White and minimises
//! for Black, so no side-to-move flip happens here.

use crate::board::Board;
use crate::types::Team;
use crate::utils::CENTER;

// ============================================================================
// SCALE
// ============================================================================

/// Evaluation units per pawn of material
pub const PAWN_UNITS: i32 = 100;

/// Base score of a mate; the search adds remaining depth so faster mates win
pub const MATE: i32 = 1_000_000;

/// Bound used as the initial alpha/beta window
pub const INFINITY: i32 = 10_000_000;

// ============================================================================
// EVALUATION
// ============================================================================

/// Material value of one side in evaluation units (kings included)
pub fn material(board: &Board, team: Team) -> i32 {
    board
        .pieces_of(team)
        .map(|p| p.rank.value() * PAWN_UNITS)
        .sum()
}

/// Evaluate a position.
///
/// # Arguments
/// * `board` - the position to score
/// * `center_bonus` - units added for each piece standing on d4, e4, d5 or e5
///
/// # Returns
/// Signed score, positive when White is better
pub fn evaluate(board: &Board, center_bonus: i32) -> i32 {
    board
        .pieces()
        .map(|piece| {
            let mut score = piece.rank.value() * PAWN_UNITS;
            if CENTER.contains(&piece.position) {
                score += center_bonus;
            }
            piece.team.sign() * score
        })
        .sum()
}

/// Score for the side on move having no legal reply while in check.
/// `depth_left` rewards mates found closer to the root.
pub fn mated_score(mated: Team, depth_left: u8) -> i32 {
    -mated.sign() * (MATE + depth_left as i32)
}

/// Whether a score encodes a forced mate
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE
}
