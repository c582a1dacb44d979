use std::path::PathBuf;
use std::time::Instant;

use plotters::style::BLUE;

use traffic_rl::action_selection::{EnumActionSelection, Greedy, LinearDecayEpsilonGreed};
use traffic_rl::env::{DriveAction, IntersectionEnv};
use traffic_rl::network::q_network;
use traffic_rl::trainer::Trainer;
use traffic_rl::utils::{moving_average, plot_moving_average};
use traffic_rl::DeepQAgent;

extern crate structopt;

use structopt::StructOpt;

/// Train a deep Q driver on the four-way intersection and generate some graphics of its results
#[derive(StructOpt, Debug)]
#[structopt(name = "TrafficRL - Intersection")]
struct Cli {
    /// Show example of episode
    #[structopt(long = "show_example", short = "s")]
    show_example: bool,

    /// Play greedily with the saved model instead of training
    #[structopt(long = "greedy", short = "g")]
    greedy: bool,

    /// Load the saved model before training
    #[structopt(long = "resume")]
    resume: bool,

    /// Number of games for the training
    #[structopt(long = "n_games", short = "n", default_value = "500")]
    n_games: u128,

    /// Maximum number of ticks per game
    #[structopt(long = "max_ticks", default_value = "1000")]
    max_ticks: u128,

    /// Learning rate of the value network
    #[structopt(long = "learning_rate", default_value = "0.001")]
    learning_rate: f32,

    /// Number of games during which exploration is possible
    #[structopt(long = "exploration_window", default_value = "80")]
    exploration_window: i64,

    /// Discount factor to be used on the temporal difference calculation
    #[structopt(long = "discount_factor", default_value = "0.9")]
    discount_factor: f32,

    /// Neurons on the hidden layer of the value network
    #[structopt(long = "hidden_size", default_value = "256")]
    hidden_size: usize,

    /// Maximum number of transitions kept in the replay memory
    #[structopt(long = "memory_capacity", default_value = "100000")]
    memory_capacity: usize,

    /// Number of transitions sampled from the replay memory at the end of a game
    #[structopt(long = "batch_size", default_value = "1000")]
    batch_size: usize,

    /// Seed for the exploration draws and the replay sampling
    #[structopt(long = "seed", default_value = "42")]
    seed: u64,

    /// Evaluate the agent after every eval_at training games
    #[structopt(long = "eval_at", default_value = "50")]
    eval_at: u128,

    /// Number of games on each evaluation
    #[structopt(long = "eval_for", default_value = "10")]
    eval_for: u128,

    /// Where the value network is saved and loaded from
    #[structopt(long = "model_path", default_value = "models/model.json")]
    model_path: String,

    /// Moving average window to be used on the visualization of results
    #[structopt(long = "moving_average_window", default_value = "100")]
    moving_average_window: usize,
}

fn main() {
    let cli: Cli = Cli::from_args();

    let n_games: u128 = cli.n_games;
    let max_ticks: u128 = cli.max_ticks;
    let learning_rate: f32 = cli.learning_rate;
    let exploration_window: i64 = cli.exploration_window;
    let discount_factor: f32 = cli.discount_factor;
    let hidden_size: usize = cli.hidden_size;
    let memory_capacity: usize = cli.memory_capacity;
    let batch_size: usize = cli.batch_size;
    let seed: u64 = cli.seed;
    let moving_average_window: usize = cli.moving_average_window.max(1);

    let mut env = IntersectionEnv::new();

    let network = q_network(2, hidden_size, DriveAction::COUNT, learning_rate);

    let action_selection: EnumActionSelection<{ DriveAction::COUNT }> = if cli.greedy {
        EnumActionSelection::from(Greedy)
    } else {
        EnumActionSelection::from(LinearDecayEpsilonGreed::new(exploration_window, seed))
    };

    let mut agent = DeepQAgent::new(
        network,
        action_selection,
        discount_factor,
        memory_capacity,
        batch_size,
        seed,
    );

    if cli.greedy || cli.resume {
        agent.load_network(&cli.model_path).unwrap();
    }

    let mut trainer = Trainer::new(max_ticks);

    if cli.greedy {
        trainer.example(&mut env, &mut agent);
        return;
    }

    trainer.checkpoint_path = Some(PathBuf::from(&cli.model_path));

    let legends: Vec<&str> = ["ε-Greedy Deep Qlearning"].to_vec();
    let colors: Vec<&plotters::style::RGBColor> = [&BLUE].to_vec();

    let mut train_rewards: Vec<Vec<f32>> = vec![];
    let mut train_episodes_length: Vec<Vec<f32>> = vec![];
    let mut train_errors: Vec<Vec<f32>> = vec![];
    let mut test_rewards: Vec<Vec<f32>> = vec![];
    let mut test_episodes_length: Vec<Vec<f32>> = vec![];

    let now: Instant = Instant::now();
    let (training_reward, training_length, training_error, evaluation_reward, evaluation_length) =
        trainer
            .train(&mut env, &mut agent, n_games, cli.eval_at, cli.eval_for)
            .unwrap();
    let elapsed: std::time::Duration = now.elapsed();
    println!("{} {:.2?}", legends[0], elapsed);
    println!("best game reward {:?}", trainer.best_reward());

    if cli.show_example {
        trainer.example(&mut env, &mut agent);
    }

    let window = (n_games as usize / moving_average_window).max(1);

    let ma_reward = moving_average(window, &training_reward);
    train_rewards.push(ma_reward);

    let lengths: Vec<f32> = training_length.iter().map(|x| *x as f32).collect();
    let ma_episode = moving_average(window, &lengths);
    train_episodes_length.push(ma_episode);

    let ma_error = moving_average(
        (training_error.len() / moving_average_window).max(1),
        &training_error,
    );
    train_errors.push(ma_error);

    let ma_eval_reward = moving_average(
        (evaluation_reward.len() / moving_average_window).max(1),
        &evaluation_reward,
    );
    test_rewards.push(ma_eval_reward);

    let ma_eval_length = moving_average(
        (evaluation_length.len() / moving_average_window).max(1),
        &evaluation_length,
    );
    test_episodes_length.push(ma_eval_length);

    plot_moving_average(&train_rewards, &colors, &legends, "Train Rewards");

    plot_moving_average(
        &train_episodes_length,
        &colors,
        &legends,
        "Train Episodes Length",
    );

    plot_moving_average(&train_errors, &colors, &legends, "Training Error");

    plot_moving_average(&test_rewards, &colors, &legends, "Test Rewards");

    plot_moving_average(&test_episodes_length, &colors, &legends, "Test Episodes Length");
}
