//! Tree data structures for Monte Carlo Tree Search
//!
//! Nodes own their children directly. Navigation back towards the root uses
//! a [`NodePath`] of child indices instead of parent pointers.

use std::fmt;

use crate::game_state::GameState;

/// A node in the MCTS tree
///
/// The state is owned by the node and never changes after creation. Children
/// are created lazily, one untried action at a time, and never removed.
pub struct MCTSNode<S: GameState> {
    /// The game state at this node
    pub state: S,

    /// The action that led to this state (None for root)
    pub action: Option<S::Action>,

    /// Number of times this node has been visited
    pub visits: u64,

    /// Total reward accumulated from rollouts through this node, from the
    /// perspective of `player`
    pub total_reward: f64,

    /// Children, each tagged with the action that produced it
    pub children: Vec<MCTSNode<S>>,

    /// Legal actions not yet expanded, in generation order
    pub unexpanded_actions: Vec<S::Action>,

    /// Depth of this node in the tree (root = 0)
    pub depth: usize,

    /// Player who made the move into this state; for the root, the player
    /// to move
    pub player: S::Player,

    /// Cached `state.is_terminal()`
    pub terminal: bool,

    /// Set once this subtree holds every continuation: the node is terminal,
    /// or fully expanded with only exhausted children
    pub exhausted: bool,
}

impl<S: GameState> MCTSNode<S> {
    /// Creates a new node with the given state and action
    pub fn new(
        state: S,
        action: Option<S::Action>,
        parent_player: Option<S::Player>,
        depth: usize,
    ) -> Self {
        let player = parent_player.unwrap_or_else(|| state.get_current_player());
        let terminal = state.is_terminal();
        let unexpanded_actions = if terminal {
            Vec::new()
        } else {
            state.get_legal_actions()
        };

        MCTSNode {
            state,
            action,
            visits: 0,
            total_reward: 0.0,
            children: Vec::new(),
            unexpanded_actions,
            depth,
            player,
            terminal,
            exhausted: terminal,
        }
    }

    pub fn visits(&self) -> u64 {
        self.visits
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Returns the average reward (value) of this node
    pub fn value(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        self.total_reward / self.visits as f64
    }

    pub fn increment_visits(&mut self) {
        self.visits += 1;
    }

    pub fn add_reward(&mut self, reward: f64) {
        self.total_reward += reward;
    }

    /// Returns true once every legal action has a child
    pub fn is_fully_expanded(&self) -> bool {
        self.unexpanded_actions.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Recomputes [`MCTSNode::exhausted`] from the children's flags
    pub fn refresh_exhausted(&mut self) {
        self.exhausted = self.terminal
            || (self.is_fully_expanded() && self.children.iter().all(|child| child.exhausted));
    }

    /// The child reached by `action`, if it has been expanded
    pub fn child(&self, action: &S::Action) -> Option<&MCTSNode<S>> {
        self.children
            .iter()
            .find(|child| child.action.as_ref() == Some(action))
    }

    /// Expands the first untried action into a new child
    ///
    /// Returns `None` once the node is fully expanded.
    pub fn expand(&mut self) -> Option<&mut MCTSNode<S>> {
        if self.unexpanded_actions.is_empty() {
            return None;
        }

        let action = self.unexpanded_actions.remove(0);
        let next_state = self.state.apply_action(&action);
        let current_player = self.state.get_current_player();

        let child = MCTSNode::new(
            next_state,
            Some(action),
            Some(current_player),
            self.depth + 1,
        );

        self.children.push(child);
        self.children.last_mut()
    }

    /// Number of nodes in this subtree, this one included
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(MCTSNode::subtree_size)
            .sum::<usize>()
    }
}

/// A path through the MCTS tree
///
/// The sequence of child indices leading from the root to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    pub indices: Vec<usize>,
}

impl NodePath {
    /// Creates a new empty path (pointing to the root)
    pub fn new() -> Self {
        NodePath {
            indices: Vec::new(),
        }
    }

    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path[")?;
        for (i, idx) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", idx)?;
        }
        write!(f, "]")
    }
}
