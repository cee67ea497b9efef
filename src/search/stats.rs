//! Search statistics
//!
//! Node and cutoff counters plus timing for the last search.

use std::time::{Duration, Instant};

use tracing::info;

#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Total nodes visited, root included
    pub nodes: u64,

    /// Alpha-beta cutoffs
    pub cutoffs: u64,

    /// Root moves fully searched before returning
    pub root_moves: u32,

    /// Set when the time budget stopped the search early
    pub aborted: bool,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Update elapsed time and NPS
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    pub fn inc_root_move(&mut self) {
        self.root_moves += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Emit a one-line summary at info level
    pub fn log_summary(&self, depth: u8) {
        info!(
            depth,
            nodes = self.nodes,
            cutoffs = self.cutoffs,
            root_moves = self.root_moves,
            aborted = self.aborted,
            elapsed_ms = self.search_time.as_millis() as u64,
            nps = self.nps,
            "search finished"
        );
    }
}
