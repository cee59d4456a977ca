use rps3_ai::{config::BestChildCriteria, Error, MCTSConfig, MinimaxConfig};
use std::time::Duration;

#[test]
fn test_mcts_config_default_values() {
    let config = MCTSConfig::default();

    // default exploration constant is 1/sqrt(2)
    assert!((config.exploration_constant - 0.7071).abs() < 0.001);
    assert_eq!(config.max_iterations, Some(10_000));
    assert_eq!(config.max_time, None);
    assert_eq!(config.max_playout_length, None);
    assert_eq!(config.best_child_criteria, BestChildCriteria::MostVisits);
    assert!(config.validate().is_ok());
}

#[test]
fn test_mcts_config_builder_methods() {
    let config = MCTSConfig::default()
        .with_exploration_constant(2.0)
        .with_max_iterations(5000)
        .with_max_playout_length(80)
        .with_best_child_criteria(BestChildCriteria::HighestValue);

    assert_eq!(config.exploration_constant, 2.0);
    assert_eq!(config.max_iterations, Some(5000));
    assert_eq!(config.max_playout_length, Some(80));
    assert_eq!(config.best_child_criteria, BestChildCriteria::HighestValue);
}

#[test]
fn test_mcts_budgets_replace_each_other() {
    let timed = MCTSConfig::default().with_max_time(Duration::from_secs(1));
    assert_eq!(timed.max_time, Some(Duration::from_secs(1)));
    assert_eq!(timed.max_iterations, None);
    assert!(timed.validate().is_ok());

    let counted = timed.with_max_iterations(10);
    assert_eq!(counted.max_iterations, Some(10));
    assert_eq!(counted.max_time, None);
    assert!(counted.validate().is_ok());
}

#[test]
fn test_mcts_config_validation() {
    let both = MCTSConfig {
        max_iterations: Some(10),
        max_time: Some(Duration::from_secs(1)),
        ..MCTSConfig::default()
    };
    assert!(matches!(both.validate(), Err(Error::InvalidConfiguration(_))));

    let neither = MCTSConfig {
        max_iterations: None,
        max_time: None,
        ..MCTSConfig::default()
    };
    assert!(matches!(
        neither.validate(),
        Err(Error::InvalidConfiguration(_))
    ));

    let zero = MCTSConfig::default().with_max_iterations(0);
    assert!(matches!(zero.validate(), Err(Error::InvalidConfiguration(_))));
}

#[test]
fn test_minimax_config_default_values() {
    let config = MinimaxConfig::default();
    assert_eq!(config.max_depth, 4);
    assert!(config.iterative_deepening);
    assert_eq!(config.max_time, None);
    assert_eq!(config.heuristic_weights, [3.0, 1.0, -3.0]);
    assert_eq!(config.win_score_base, 12.0);
    assert_eq!(config.chance_bounds, (-27.0, 36.0));
    assert!(config.validate().is_ok());
}

#[test]
fn test_minimax_config_validation() {
    let shallow = MinimaxConfig::default().with_max_depth(0);
    assert!(matches!(
        shallow.validate(),
        Err(Error::InvalidConfiguration(_))
    ));

    let timed_fixed_depth = MinimaxConfig::default()
        .with_iterative_deepening(false)
        .with_max_time(Duration::from_millis(100));
    assert!(matches!(
        timed_fixed_depth.validate(),
        Err(Error::InvalidConfiguration(_))
    ));

    let inverted = MinimaxConfig::default().with_chance_bounds(5.0, -5.0);
    assert!(inverted.validate().is_err());

    let tuned = MinimaxConfig::default()
        .with_heuristic_weights([2.0, 0.5, -4.0])
        .with_win_score_base(20.0)
        .with_max_time(Duration::from_millis(100));
    assert!(tuned.validate().is_ok());
    assert_eq!(tuned.heuristic_weights, [2.0, 0.5, -4.0]);
}

#[test]
fn test_error_messages() {
    let err = MinimaxConfig::default()
        .with_max_depth(0)
        .validate()
        .unwrap_err();
    assert!(err.to_string().starts_with("Invalid configuration"));
    assert_eq!(Error::MatchOver.to_string(), "The match is over");
}
