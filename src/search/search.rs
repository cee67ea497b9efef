//! Minimax search with alpha-beta pruning for the automated player
//!
//! Moves are visited in generation order with no ordering heuristic. Scores
//! are White-positive: White nodes maximise, Black nodes minimise. A node is
//! a leaf when its depth is exhausted or its status is anything other than
//! `InProgress`, so a checked position is scored statically. The time
//! budget is only consulted between sibling branches, so a running subtree
//! always completes before the search stops.

use futures_lite::future;
use tracing::{debug, trace};

use super::params::SearchParams;
use super::stats::SearchStats;
use crate::eval::{evaluate, mated_score, INFINITY};
use crate::game::{apply_result, compute_status, find_legal_results};
use crate::state::{GameState, Status};
use crate::time::TimeBudget;
use crate::types::{MoveCommand, Team};

/// Move chosen by a search and its White-positive score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub command: MoveCommand,
    pub score: i32,
}

pub struct Search {
    params: SearchParams,
    stats: SearchStats,
}

impl Default for Search {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

impl Search {
    pub fn new(params: SearchParams) -> Self {
        Self {
            params,
            stats: SearchStats::new(),
        }
    }

    /// Statistics of the most recent search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Propose a move for the side on move in `state`.
    ///
    /// Suspends between root moves so an executor can interleave other work;
    /// nothing runs on another thread. The first root move is always searched
    /// in full, later ones only while the budget lasts. Among equal scores the
    /// earliest generated move wins.
    ///
    /// # Returns
    /// `None` when the side on move has no legal move
    pub async fn propose_move(&mut self, state: &GameState) -> Option<SearchOutcome> {
        self.stats.reset();
        self.stats.start_timing();
        let budget = TimeBudget::start(self.params.time_limit_ms);
        let depth = self.params.max_depth.max(1);

        let team = state.current_player();
        let maximizing = team == Team::White;
        let (mut alpha, mut beta) = (-INFINITY, INFINITY);
        let mut best: Option<SearchOutcome> = None;

        self.stats.inc_node();
        for (i, result) in find_legal_results(state, team).into_iter().enumerate() {
            if i > 0 {
                if budget.expired() {
                    self.stats.aborted = true;
                    break;
                }
                future::yield_now().await;
            }

            let command = result.to_command();
            let child = apply_result(state, command, result);
            let score = self.minimax(&child, depth - 1, alpha, beta, &budget);

            // A subtree cut short by the budget has no trustworthy score
            if self.stats.aborted && best.is_some() {
                break;
            }
            self.stats.inc_root_move();
            debug!(%command, score, "root move searched");

            let improves = match best {
                None => true,
                Some(current) if maximizing => score > current.score,
                Some(current) => score < current.score,
            };
            if improves {
                best = Some(SearchOutcome { command, score });
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        self.stats.update_timing();
        self.stats.log_summary(depth);
        if let Some(outcome) = best {
            debug!(command = %outcome.command, score = outcome.score, "move proposed");
        }
        best
    }

    /// Blocking wrapper around [`Search::propose_move`]
    pub fn search(&mut self, state: &GameState) -> Option<SearchOutcome> {
        future::block_on(self.propose_move(state))
    }

    fn minimax(
        &mut self,
        state: &GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        budget: &TimeBudget,
    ) -> i32 {
        self.stats.inc_node();
        if depth == 0 {
            return evaluate(state.board(), self.params.center_bonus);
        }

        let team = state.current_player();
        match compute_status(state) {
            Status::InProgress => {}
            Status::Check => return evaluate(state.board(), self.params.center_bonus),
            Status::Checkmate => return mated_score(team, depth),
            Status::Draw => return 0,
        }

        let moves = find_legal_results(state, team);

        let maximizing = team == Team::White;
        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for (i, result) in moves.into_iter().enumerate() {
            if i > 0 && budget.expired() {
                self.stats.aborted = true;
                break;
            }
            let child = apply_result(state, result.to_command(), result);
            let score = self.minimax(&child, depth - 1, alpha, beta, budget);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if alpha >= beta {
                self.stats.inc_cutoff();
                trace!(depth, alpha, beta, "cutoff");
                break;
            }
        }
        best
    }
}
