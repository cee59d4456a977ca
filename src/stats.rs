//! Statistics collection for searches
//!
//! Both searchers reset their statistics at the start of each call and expose
//! them afterwards for logging and tests.

use std::time::Duration;

/// Statistics collected during an MCTS search
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of iterations performed
    pub iterations: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Total number of nodes in the tree
    pub tree_size: usize,

    /// Maximum depth reached in the tree
    pub max_depth: usize,

    /// Whether the search was stopped by its time budget
    pub stopped_early: bool,
}

impl SearchStatistics {
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1, // root
            max_depth: 0,
            stopped_early: false,
        }
    }

    /// Returns the average time per iteration in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    pub fn summary(&self) -> String {
        format!(
            "MCTS Search Statistics:\n\
             - Iterations: {}\n\
             - Total time: {:.3} seconds\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Avg time per iteration: {:.3} µs\n\
             - Iterations per second: {:.1}\n\
             - Stopped early: {}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.avg_time_per_iteration_us(),
            self.iterations_per_second(),
            self.stopped_early
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics collected during one alpha-beta move choice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinimaxStatistics {
    /// Calls to the recursive evaluation, root included
    pub nodes: usize,

    /// Move-level alpha-beta cutoffs
    pub cutoffs: usize,

    /// Chance nodes abandoned early because the bound could not matter
    pub chance_cutoffs: usize,

    /// Deepest depth whose search completed
    pub completed_depth: usize,

    /// Value of the chosen move at the completed depth
    pub best_value: Option<f64>,

    pub total_time: Duration,

    /// Whether iterative deepening was stopped by the time budget
    pub stopped_early: bool,
}

impl MinimaxStatistics {
    pub fn summary(&self) -> String {
        format!(
            "Minimax Search Statistics:\n\
             - Nodes: {}\n\
             - Cutoffs: {}\n\
             - Chance cutoffs: {}\n\
             - Completed depth: {}\n\
             - Best value: {:?}\n\
             - Total time: {:.3} seconds\n\
             - Stopped early: {}",
            self.nodes,
            self.cutoffs,
            self.chance_cutoffs,
            self.completed_depth,
            self.best_value,
            self.total_time.as_secs_f64(),
            self.stopped_early
        )
    }
}
