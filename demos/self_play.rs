//! Self-play demo
//!
//! A minimax agent plays Blue against a random agent playing Red. Run with
//! `RUST_LOG=debug` to see the search summaries.

use rps3_ai::{
    Color, GameState, MCTSConfig, MatchRunner, MinimaxConfig, MinimaxOpponent, Opponent,
    RandomOpponent, MCTS,
};

const MAX_HALF_MOVES: usize = 400;

fn main() -> Result<(), rps3_ai::Error> {
    // Initialize logging
    env_logger::init();

    println!("Ring RPS Self-Play");
    println!("==================");
    println!();

    let blue = MinimaxOpponent::new(MinimaxConfig::default().with_max_depth(3))?;
    let red = RandomOpponent::new();
    let mut runner = MatchRunner::new(Box::new(blue), Box::new(red));
    runner.setup()?;

    // What a fully-informed UCT search would open with
    let config = MCTSConfig::default()
        .with_max_iterations(2_000)
        .with_max_playout_length(200);
    let mut mcts = MCTS::new(runner.game().clone(), config)?;
    let suggestion = mcts.search()?;
    println!("MCTS opening suggestion for Blue: {}", suggestion);
    println!("{}", mcts.get_statistics().summary());
    println!();

    let winner = runner.play(MAX_HALF_MOVES)?;

    println!("Blue's view of the final position:");
    println!("{}", runner.agent(Color::Blue).belief());
    println!();

    match winner {
        Some(color) => println!(
            "{} ({}) wins after {} half-moves",
            color,
            runner.agent(color).name(),
            runner.half_moves()
        ),
        None => println!(
            "No winner after {} half-moves (game over: {})",
            runner.half_moves(),
            runner.game().is_terminal()
        ),
    }

    Ok(())
}
