//! Monte Carlo Tree Search (UCT)
//!
//! This module orchestrates the four phases of selection, expansion,
//! simulation and backpropagation over any fully-observable [`GameState`].
//! It is independent of the belief-state machinery and searches the match
//! engine directly when used on this game.

use std::time::{Duration, Instant};

use log::debug;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::{BestChildCriteria, MCTSConfig},
    game_state::GameState,
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        selection::{SelectionPolicy, UCB1Policy},
        simulation::{RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{MCTSNode, NodePath},
    utils, Error, Result,
};

/// The main Monte Carlo Tree Search implementation
///
/// The tree is rooted at the state given to [`MCTS::new`] and keeps growing
/// across calls to [`MCTS::search`] until [`MCTS::reset`] re-roots it.
pub struct MCTS<S: GameState> {
    /// Root node of the search tree
    pub root: MCTSNode<S>,

    config: MCTSConfig,

    statistics: SearchStatistics,

    selection_policy: Box<dyn SelectionPolicy<S>>,

    simulation_policy: Box<dyn SimulationPolicy<S>>,

    backpropagation_policy: Box<dyn BackpropagationPolicy<S>>,

    /// Source of randomness for tie-breaks and playouts
    rng: StdRng,
}

impl<S: GameState + 'static> MCTS<S> {
    /// Creates a new MCTS instance, rejecting an unusable configuration
    pub fn new(initial_state: S, config: MCTSConfig) -> Result<Self> {
        config.validate()?;

        let root = MCTSNode::new(initial_state, None, None, 0);

        let selection_policy: Box<dyn SelectionPolicy<S>> =
            Box::new(UCB1Policy::new(config.exploration_constant));

        let simulation_policy: Box<dyn SimulationPolicy<S>> = Box::new(RandomPolicy {
            max_length: config.max_playout_length,
        });

        let backpropagation_policy: Box<dyn BackpropagationPolicy<S>> =
            Box::new(StandardPolicy::new());

        Ok(MCTS {
            root,
            config,
            statistics: SearchStatistics::new(),
            selection_policy,
            simulation_policy,
            backpropagation_policy,
            rng: StdRng::from_entropy(),
        })
    }

    /// Makes tie-breaks and playouts reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy<S> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Discards the tree and roots the next search at `state`
    pub fn reset(&mut self, state: S) {
        self.root = MCTSNode::new(state, None, None, 0);
        self.statistics = SearchStatistics::new();
    }

    /// Runs the search within the configured budget and returns the best action
    pub fn search(&mut self) -> Result<S::Action> {
        match (self.config.max_iterations, self.config.max_time) {
            (Some(iterations), None) => self.search_for_iterations(iterations),
            (None, Some(duration)) => self.search_for_time(duration),
            _ => Err(Error::InvalidConfiguration(
                "exactly one of a time limit and an iteration limit is required".into(),
            )),
        }
    }

    /// Runs exactly `iterations` iterations
    pub fn search_for_iterations(&mut self, iterations: usize) -> Result<S::Action> {
        if iterations == 0 {
            return Err(Error::InvalidConfiguration(
                "iteration limit must be at least one".into(),
            ));
        }
        self.run(false, |done, _| done >= iterations)
    }

    /// Runs iterations until `duration` has elapsed or the whole game tree
    /// has been explored
    ///
    /// The deadline is checked between iterations, so the search overruns by
    /// at most one iteration.
    pub fn search_for_time(&mut self, duration: Duration) -> Result<S::Action> {
        self.run(true, |_, elapsed| elapsed >= duration)
    }

    fn run<F>(&mut self, timed: bool, finished: F) -> Result<S::Action>
    where
        F: Fn(usize, Duration) -> bool,
    {
        self.statistics = SearchStatistics::new();

        if self.root.is_terminal()
            || (self.root.unexpanded_actions.is_empty() && self.root.children.is_empty())
        {
            return Err(Error::NoLegalActions);
        }

        let start_time = Instant::now();
        let mut iterations = 0;
        loop {
            if finished(iterations, start_time.elapsed()) {
                self.statistics.stopped_early = timed;
                break;
            }
            // an iteration budget is an exact count, even on a finished tree
            if timed && self.root.exhausted {
                debug!("game tree exhausted after {iterations} iterations");
                break;
            }
            self.execute_iteration();
            iterations += 1;
        }

        self.statistics.iterations = iterations;
        self.statistics.total_time = start_time.elapsed();
        self.statistics.tree_size = self.root.subtree_size();
        debug!("{}", self.statistics.summary());

        self.select_best_action()
    }

    /// Execute a single iteration of the MCTS algorithm
    fn execute_iteration(&mut self) {
        // 1. Selection
        let selected_path = self.selection();

        // 2. Expansion
        let expanded_path = self.expansion(selected_path);

        // 3. Simulation
        let final_state = {
            let node = Self::node_at(&self.root, &expanded_path);
            self.simulation_policy.simulate(&node.state, &mut self.rng)
        };

        // 4. Backpropagation
        self.backpropagation(&expanded_path, &final_state);
        Self::refresh_exhausted(&mut self.root, &expanded_path.indices);
    }

    /// Updates the exhausted flags bottom-up along `path`
    fn refresh_exhausted(node: &mut MCTSNode<S>, path: &[usize]) {
        if let Some((&first, rest)) = path.split_first() {
            Self::refresh_exhausted(&mut node.children[first], rest);
        }
        node.refresh_exhausted();
    }

    fn node_at<'a>(root: &'a MCTSNode<S>, path: &NodePath) -> &'a MCTSNode<S> {
        let mut node = root;
        for &index in &path.indices {
            node = &node.children[index];
        }
        node
    }

    fn node_at_mut<'a>(root: &'a mut MCTSNode<S>, path: &NodePath) -> &'a mut MCTSNode<S> {
        let mut node = root;
        for &index in &path.indices {
            node = &mut node.children[index];
        }
        node
    }

    /// Selection phase: descend through fully expanded, non-terminal nodes
    fn selection(&mut self) -> NodePath {
        let mut path = NodePath::new();
        let mut current = &self.root;

        while !current.is_terminal() && current.is_fully_expanded() {
            if current.is_leaf() {
                panic!("non-terminal state has no legal actions");
            }
            let best_child_idx = self.selection_policy.select_child(current, &mut self.rng);
            path.push(best_child_idx);
            current = &current.children[best_child_idx];
        }

        self.statistics.max_depth = self.statistics.max_depth.max(path.len());
        path
    }

    /// Expansion phase: materialise one untried child of the selected node
    fn expansion(&mut self, mut path: NodePath) -> NodePath {
        let node = Self::node_at_mut(&mut self.root, &path);
        if node.is_terminal() {
            return path;
        }

        if node.expand().is_some() {
            path.push(node.children.len() - 1);
            self.statistics.max_depth = self.statistics.max_depth.max(path.len());
        }
        path
    }

    /// Backpropagation phase: credit every node from the root down the path
    fn backpropagation(&mut self, path: &NodePath, final_state: &S) {
        self.backpropagation_policy
            .update_stats(&mut self.root, final_state);

        let mut node = &mut self.root;
        for &index in &path.indices {
            node = &mut node.children[index];
            self.backpropagation_policy.update_stats(node, final_state);
        }
    }

    /// Selects the best action based on configured criteria
    fn select_best_action(&mut self) -> Result<S::Action> {
        if self.root.children.is_empty() {
            return self
                .root
                .unexpanded_actions
                .first()
                .cloned()
                .ok_or(Error::NoLegalActions);
        }

        let scores: Vec<f64> = match self.config.best_child_criteria {
            BestChildCriteria::MostVisits => self
                .root
                .children
                .iter()
                .map(|child| child.visits() as f64)
                .collect(),
            BestChildCriteria::HighestValue => {
                self.root.children.iter().map(MCTSNode::value).collect()
            }
        };

        let best_index =
            utils::argmax_random_tie(scores, &mut self.rng).ok_or(Error::NoLegalActions)?;
        self.root.children[best_index]
            .action
            .clone()
            .ok_or(Error::NoLegalActions)
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Renders the tree one node per line, children indented under their
    /// parent in expansion order
    pub fn visualize_tree(&self) -> String {
        let mut output = String::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            let label = node
                .action
                .as_ref()
                .map_or_else(|| "Root".to_string(), |action| format!("{action:?}"));
            output.push_str(&format!(
                "{:indent$}{label} [{:?}] visits={} mean={:.3}\n",
                "",
                node.player,
                node.visits(),
                node.value(),
                indent = node.depth * 2,
            ));
            stack.extend(node.children.iter().rev());
        }
        output
    }
}
