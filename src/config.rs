//! Configuration options for the searchers
//!
//! [`MCTSConfig`] controls the UCT search and [`MinimaxConfig`] the
//! alpha-beta search. Both are validated when a searcher is constructed, so a
//! bad budget is reported before any search runs.

use std::time::Duration;

use crate::{Error, Result};

/// Criteria for selecting the best child after search is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Select the child with the most visits
    ///
    /// Relies on statistical confidence rather than noisy value estimates.
    MostVisits,

    /// Select the child with the highest average value
    HighestValue,
}

/// Configuration for the MCTS algorithm
///
/// Exactly one of `max_iterations` and `max_time` must be set.
///
/// # Example
///
/// ```
/// use rps3_ai::{MCTSConfig, config::BestChildCriteria};
/// use std::time::Duration;
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.5)
///     .with_max_time(Duration::from_millis(200))
///     .with_best_child_criteria(BestChildCriteria::MostVisits);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Exploration constant `C` in `mean + C * sqrt(2 ln N / n)`
    pub exploration_constant: f64,

    /// Number of iterations to run
    pub max_iterations: Option<usize>,

    /// Wall-clock budget, checked before each iteration
    pub max_time: Option<Duration>,

    /// Cut random playouts off after this many actions
    ///
    /// `None` plays every rollout out to a terminal state.
    pub max_playout_length: Option<usize>,

    /// Determines how the final action is selected once the search is complete
    pub best_child_criteria: BestChildCriteria,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: std::f64::consts::FRAC_1_SQRT_2,
            max_iterations: Some(10_000),
            max_time: None,
            max_playout_length: None,
            best_child_criteria: BestChildCriteria::MostVisits,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Budgets the search by iteration count, dropping any time budget
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self.max_time = None;
        self
    }

    /// Budgets the search by wall-clock time, dropping any iteration budget
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self.max_iterations = None;
        self
    }

    /// Caps the length of random playouts
    pub fn with_max_playout_length(mut self, length: usize) -> Self {
        self.max_playout_length = Some(length);
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Checks that exactly one budget is set and that it is usable
    pub fn validate(&self) -> Result<()> {
        match (self.max_iterations, self.max_time) {
            (Some(_), Some(_)) => Err(Error::InvalidConfiguration(
                "cannot have both a time limit and an iteration limit".into(),
            )),
            (None, None) => Err(Error::InvalidConfiguration(
                "must have either a time limit or an iteration limit".into(),
            )),
            (Some(0), None) => Err(Error::InvalidConfiguration(
                "iteration limit must be at least one".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// Configuration for the alpha-beta searcher
///
/// # Example
///
/// ```
/// use rps3_ai::MinimaxConfig;
///
/// let config = MinimaxConfig::default()
///     .with_max_depth(3)
///     .with_iterative_deepening(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MinimaxConfig {
    /// Deepest ply searched
    pub max_depth: usize,

    /// Search depths 1..=max_depth in turn and keep the last result
    pub iterative_deepening: bool,

    /// Stop starting new depths once this much time has passed
    ///
    /// Requires iterative deepening; a started depth always completes.
    pub max_time: Option<Duration>,

    /// Weights of (captures, enemies uncovered, own pieces lost) in the
    /// depth-limit heuristic
    pub heuristic_weights: [f64; 3],

    /// Score of a won match before subtracting our captures
    pub win_score_base: f64,

    /// Lowest and highest value a chance-node branch can take, used to bound
    /// the unexplored probability mass
    pub chance_bounds: (f64, f64),
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        MinimaxConfig {
            max_depth: 4,
            iterative_deepening: true,
            max_time: None,
            heuristic_weights: [3.0, 1.0, -3.0],
            win_score_base: 12.0,
            chance_bounds: (-27.0, 36.0),
        }
    }
}

impl MinimaxConfig {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_iterative_deepening(mut self, enabled: bool) -> Self {
        self.iterative_deepening = enabled;
        self
    }

    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self
    }

    pub fn with_heuristic_weights(mut self, weights: [f64; 3]) -> Self {
        self.heuristic_weights = weights;
        self
    }

    pub fn with_win_score_base(mut self, base: f64) -> Self {
        self.win_score_base = base;
        self
    }

    pub fn with_chance_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.chance_bounds = (lower, upper);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::InvalidConfiguration(
                "depth limit must be at least one".into(),
            ));
        }
        if self.max_time.is_some() && !self.iterative_deepening {
            return Err(Error::InvalidConfiguration(
                "a time limit needs iterative deepening".into(),
            ));
        }
        if self.chance_bounds.0 > self.chance_bounds.1 {
            return Err(Error::InvalidConfiguration(format!(
                "chance bounds {:?} are inverted",
                self.chance_bounds
            )));
        }
        Ok(())
    }
}
