//! Automated player: alpha-beta search over the legal move tree

pub mod params;
pub mod search;
pub mod stats;

pub use self::params::SearchParams;
pub use self::search::{Search, SearchOutcome};
pub use self::stats::SearchStats;
