//! Search parameters and configuration
//!
//! Depth bound, wall-clock budget and the evaluation's central bonus.

/// Search parameters for the automated player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum search depth in plies
    pub max_depth: u8,

    /// Time limit in milliseconds (0 = unlimited)
    pub time_limit_ms: u64,

    /// Bonus for each piece on d4, e4, d5 or e5 (a pawn is worth 100)
    pub center_bonus: i32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 3,
            time_limit_ms: 2000,
            center_bonus: 10,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth in plies
    pub fn max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set time limit in milliseconds
    pub fn time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn center_bonus(mut self, bonus: i32) -> Self {
        self.center_bonus = bonus;
        self
    }
}
