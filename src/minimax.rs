//! Alpha-beta search over a belief state
//!
//! The searcher only ever sees a [`BeliefState`], never the true board.
//! Challenges against a hidden enemy piece become chance nodes whose children
//! assume each possible type, weighted by the belief state's probabilities.
//! Moves are ordered by a history table that persists across calls and is
//! owned by the searcher, so independent agents never share it.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::time::Instant;

use log::{debug, trace};

use crate::{
    belief::{BeliefState, Side, Square},
    board::{resolve_challenge, Move, Outcome, PieceType, PIECES_PER_SIDE},
    config::MinimaxConfig,
    stats::MinimaxStatistics,
    Error, Result,
};

/// Initial alpha-beta window; wider than any reachable value
const WINDOW: f64 = 1000.0;

/// Scale applied to the score of a decided (or possibly decided) match
const TERMINAL_SCALE: f64 = 10.0;

/// Move success counts, keyed by belief-state hash
pub type HistoryTable = HashMap<String, HashMap<Move, u32>>;

/// Probability-weighted alpha-beta searcher
#[derive(Debug, Clone)]
pub struct Minimax {
    config: MinimaxConfig,
    history: HistoryTable,
    statistics: MinimaxStatistics,
}

impl Minimax {
    /// Creates a searcher, rejecting an unusable configuration
    pub fn new(config: MinimaxConfig) -> Result<Self> {
        config.validate()?;
        Ok(Minimax {
            config,
            history: HistoryTable::new(),
            statistics: MinimaxStatistics::default(),
        })
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// The move-ordering history accumulated so far
    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    /// Number of distinct states in the history table
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Statistics of the last [`Minimax::choose_move`] call
    pub fn get_statistics(&self) -> &MinimaxStatistics {
        &self.statistics
    }

    /// Picks a move for the player side of `state`
    ///
    /// Returns `None` when the match is already decided or no move exists.
    /// With iterative deepening the result of the last completed depth wins.
    pub fn choose_move(&mut self, state: &BeliefState) -> Result<Option<Move>> {
        self.statistics = MinimaxStatistics::default();
        let start = Instant::now();

        let first_depth = if self.config.iterative_deepening {
            1
        } else {
            self.config.max_depth
        };

        let mut chosen = None;
        for depth in first_depth..=self.config.max_depth {
            if let Some(limit) = self.config.max_time {
                if depth > first_depth && start.elapsed() >= limit {
                    self.statistics.stopped_early = true;
                    debug!("minimax stopped before depth {depth}: time limit");
                    break;
                }
            }

            let result = self.search_root(state, depth)?;
            chosen = result.map(|(mv, _)| mv);
            self.statistics.best_value = result.map(|(_, value)| value);
            self.statistics.completed_depth = depth;
            debug!("depth {depth}: best {result:?}");
        }

        self.statistics.total_time = start.elapsed();
        debug!(
            "minimax chose {chosen:?} after {} nodes",
            self.statistics.nodes
        );
        Ok(chosen)
    }

    fn search_root(&mut self, state: &BeliefState, depth: usize) -> Result<Option<(Move, f64)>> {
        self.statistics.nodes += 1;
        let (probability, winner) = state.is_match_over();
        if probability >= 1.0 {
            debug!("match already decided for {winner:?}");
            return Ok(None);
        }
        self.best_move(state, depth, true, -WINDOW, WINDOW)
    }

    /// Value of `state` for the player side, searching `depth` more plies
    fn evaluate(
        &mut self,
        state: &BeliefState,
        depth: usize,
        maximizing: bool,
        alpha: f64,
        beta: f64,
    ) -> Result<f64> {
        self.statistics.nodes += 1;
        trace!(
            "{} @ depth {depth}, alpha {alpha}, beta {beta}",
            if maximizing { "max" } else { "min" }
        );

        let (probability, winner) = state.is_match_over();
        if probability > 0.0 {
            return Ok(TERMINAL_SCALE * probability * self.match_score(state, winner));
        }
        if depth == 0 {
            return Ok(self.heuristic(state));
        }

        match self.best_move(state, depth, maximizing, alpha, beta)? {
            Some((_, value)) => Ok(value),
            None => Ok(self.heuristic(state)),
        }
    }

    /// Score of a finished match: faster, more complete wins score higher
    fn match_score(&self, state: &BeliefState, winner: Option<Side>) -> f64 {
        match winner {
            Some(Side::Player) => {
                let captured: u32 = state.captures().iter().map(|&c| u32::from(c)).sum();
                self.config.win_score_base - f64::from(captured)
            }
            _ => -f64::from(state.enemy_total()),
        }
    }

    /// Linear combination of captures, uncovered enemies and own losses
    pub fn heuristic(&self, state: &BeliefState) -> f64 {
        let captured: u32 = state.captures().iter().map(|&c| u32::from(c)).sum();
        let uncovered = PIECES_PER_SIDE as u32 - u32::from(state.unknown_enemies());
        let lost = state.own_lost();
        let [w_captured, w_uncovered, w_lost] = self.config.heuristic_weights;
        w_captured * f64::from(captured)
            + w_uncovered * f64::from(uncovered)
            + w_lost * f64::from(lost)
    }

    /// Searches every move of the side to act and returns the best one
    fn best_move(
        &mut self,
        state: &BeliefState,
        depth: usize,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<Option<(Move, f64)>> {
        let side = if maximizing {
            Side::Player
        } else {
            Side::Opponent
        };
        let mut moves = state.possible_moves(side);
        let hash = state.get_hash();
        {
            let scores = self.history.entry(hash.clone()).or_default();
            // stable: equal scores keep generation order
            moves.sort_by_key(|mv| Reverse(scores.get(mv).copied().unwrap_or(0)));
        }

        let mut best: Option<(Move, f64)> = None;
        for mv in moves {
            let value = self.move_value(state, mv, depth, maximizing, alpha, beta)?;
            let (best_move, best_value) = match best {
                Some((kept, kept_value))
                    if !(if maximizing {
                        value > kept_value
                    } else {
                        value < kept_value
                    }) =>
                {
                    (kept, kept_value)
                }
                _ => (mv, value),
            };
            best = Some((best_move, best_value));

            let cutoff = if maximizing {
                best_value >= beta
            } else {
                best_value <= alpha
            };
            if cutoff {
                trace!("cutoff at {best_move} with {best_value}");
                self.statistics.cutoffs += 1;
                self.record_success(&hash, best_move);
                return Ok(best);
            }
            if maximizing {
                alpha = alpha.max(best_value);
            } else {
                beta = beta.min(best_value);
            }
        }

        if let Some((best_move, _)) = best {
            self.record_success(&hash, best_move);
        }
        Ok(best)
    }

    fn record_success(&mut self, hash: &str, mv: Move) {
        *self
            .history
            .entry(hash.to_string())
            .or_default()
            .entry(mv)
            .or_insert(0) += 1;
    }

    /// Value of playing `mv`, branching on the hidden type when the enemy
    /// piece involved is unknown
    fn move_value(
        &mut self,
        state: &BeliefState,
        mv: Move,
        depth: usize,
        maximizing: bool,
        alpha: f64,
        beta: f64,
    ) -> Result<f64> {
        let attacker = state.square(mv.from);
        let defender = state.square(mv.to);

        if defender == Square::Empty {
            let child = state.after_move(mv.from, mv.to, Outcome::Move, None)?;
            return self.evaluate(&child, depth - 1, !maximizing, alpha, beta);
        }

        let (own, enemy) = if maximizing {
            (attacker, defender)
        } else {
            (defender, attacker)
        };
        let own_kind = own.known_type().ok_or_else(|| {
            Error::InconsistentReport(format!("challenge {mv} without an own piece"))
        })?;
        let challenge = |hidden: PieceType| {
            if maximizing {
                resolve_challenge(own_kind, hidden)
            } else {
                resolve_challenge(hidden, own_kind)
            }
        };

        if let Some(enemy_kind) = enemy.known_type() {
            let outcome = challenge(enemy_kind);
            let child = state.after_move(mv.from, mv.to, outcome, Some(enemy_kind))?;
            return self.evaluate(&child, depth - 1, !maximizing, alpha, beta);
        }

        let probabilities = state.get_opponent_piece_probabilities();
        let (lower, upper) = self.config.chance_bounds;
        let mut values = [0.0; 3];
        let mut weights = probabilities;
        let mut considered = PieceType::ALL.len();

        for (i, hidden) in PieceType::ALL.into_iter().enumerate() {
            if probabilities[i] > 0.0 {
                let child = state.after_move(mv.from, mv.to, challenge(hidden), Some(hidden))?;
                values[i] = self.evaluate(&child, depth - 1, !maximizing, alpha, beta)?;
            }

            let mass: f64 = probabilities[..=i].iter().sum();
            if i < 2 && mass > 0.0 {
                let known: f64 = (0..=i).map(|j| values[j] * probabilities[j]).sum();
                let remaining: f64 = probabilities[i + 1..].iter().sum();
                let floor = known + remaining * lower;
                let ceiling = known + remaining * upper;
                if (maximizing && floor > beta) || (!maximizing && ceiling < alpha) {
                    trace!("chance cutoff at {mv} after {hidden}: bounds ({floor}, {ceiling})");
                    self.statistics.chance_cutoffs += 1;
                    for j in 0..=i {
                        weights[j] = probabilities[j] / mass;
                    }
                    considered = i + 1;
                    break;
                }
            }
        }

        Ok((0..considered).map(|j| values[j] * weights[j]).sum())
    }
}
