use std::io;
use std::path::PathBuf;

use kdam::{tqdm, BarExt};

use crate::agent::DeepQAgent;
use crate::env::{DriveAction, IntersectionEnv, Vehicle};
use crate::memory::Transition;

pub type TrainResults = (Vec<f32>, Vec<u128>, Vec<f32>, Vec<f32>, Vec<f32>);

/// Per-vehicle, per-tick reward shaping.
#[derive(Debug, Clone)]
pub struct RewardConfig {
    pub crash_penalty: f32,
    pub speed_bonus: f32,
    pub stall_penalty: f32,
    pub stall_threshold: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            crash_penalty: -10.0,
            speed_bonus: 0.1,
            stall_penalty: -0.5,
            stall_threshold: 1.5,
        }
    }
}

impl RewardConfig {
    pub fn vehicle_reward(&self, vehicle: &Vehicle) -> f32 {
        if vehicle.crashed() {
            return self.crash_penalty;
        }
        let mut reward = self.speed_bonus * vehicle.speed() / Vehicle::MAX_SPEED;
        if vehicle.speed() <= self.stall_threshold {
            reward += self.stall_penalty;
        }
        reward
    }
}

/// Runs games on an [`IntersectionEnv`], feeding every vehicle's transition
/// to one shared agent.
pub struct Trainer {
    pub max_ticks: u128,
    pub reward_config: RewardConfig,
    pub checkpoint_path: Option<PathBuf>,
    best_reward: f32,
}

impl Trainer {
    pub fn new(max_ticks: u128) -> Self {
        Self {
            max_ticks,
            reward_config: RewardConfig::default(),
            checkpoint_path: None,
            best_reward: f32::NEG_INFINITY,
        }
    }

    pub fn best_reward(&self) -> f32 {
        self.best_reward
    }

    pub fn train(
        &mut self,
        env: &mut IntersectionEnv,
        agent: &mut DeepQAgent,
        n_games: u128,
        eval_at: u128,
        eval_for: u128,
    ) -> io::Result<TrainResults> {
        let mut training_reward: Vec<f32> = vec![];
        let mut training_length: Vec<u128> = vec![];
        let mut training_error: Vec<f32> = vec![];
        let mut evaluation_reward: Vec<f32> = vec![];
        let mut evaluation_length: Vec<f32> = vec![];

        let mut pb = tqdm!(total = n_games as usize);
        pb.set_description(format!("GEN {}", 1));
        match pb.refresh() {
            Ok(_) => (),
            Err(e) => panic!("{}", e.to_string()),
        };

        for game in 0..n_games {
            let (epi_reward, ticks) = self.run_episode(env, agent, &mut training_error);
            training_reward.push(epi_reward);
            training_length.push(ticks);

            if epi_reward > self.best_reward {
                self.best_reward = epi_reward;
                if let Some(path) = &self.checkpoint_path {
                    agent.save(path)?;
                }
            }

            if eval_at != 0 && eval_for != 0 && game % eval_at == 0 {
                let (r, l) = self.evaluate(env, agent, eval_for);
                let mr: f32 = r.iter().sum::<f32>() / r.len() as f32;
                let ml: f32 = l.iter().sum::<u128>() as f32 / l.len() as f32;
                pb.set_postfix(format!("eval reward={}, eval ep len={}", mr, ml));
                pb.set_description(format!("GEN {}", (game / eval_at) + 1));
                evaluation_reward.push(mr);
                evaluation_length.push(ml);
            }
            match pb.update(1) {
                Ok(_) => (),
                Err(e) => panic!("{}", e.to_string()),
            };
        }
        Ok((
            training_reward,
            training_length,
            training_error,
            evaluation_reward,
            evaluation_length,
        ))
    }

    fn run_episode(
        &self,
        env: &mut IntersectionEnv,
        agent: &mut DeepQAgent,
        training_error: &mut Vec<f32>,
    ) -> (f32, u128) {
        let mut ticks: u128 = 0;
        let mut epi_reward: f32 = 0.0;
        let mut observations = env.reset();

        loop {
            ticks += 1;
            let actions: Vec<DriveAction> = observations
                .iter()
                .map(|observation| agent.get_action(observation))
                .collect();
            let (next_observations, crashed) = env.step(&actions).unwrap();
            let done = crashed || ticks >= self.max_ticks;

            for (i, vehicle) in env.vehicles().iter().enumerate() {
                let reward = self.reward_config.vehicle_reward(vehicle);
                let transition = Transition::new(
                    observations[i].as_array(),
                    actions[i],
                    reward,
                    next_observations[i].as_array(),
                    done,
                );
                let td = agent.train_step(&transition);
                training_error.push(td);
                agent.memorize(transition);
                epi_reward += reward;
            }

            if done {
                agent.train_long_memory();
                agent.finish_game();
                break;
            }
            env.prune_offscreen();
            observations = env.observations();
        }
        (epi_reward, ticks)
    }

    pub fn evaluate(
        &self,
        env: &mut IntersectionEnv,
        agent: &mut DeepQAgent,
        n_episodes: u128,
    ) -> (Vec<f32>, Vec<u128>) {
        let mut reward_history: Vec<f32> = vec![];
        let mut episode_length: Vec<u128> = vec![];
        for _episode in 0..n_episodes {
            let mut ticks: u128 = 0;
            let mut epi_reward: f32 = 0.0;
            let mut observations = env.reset();
            loop {
                ticks += 1;
                let actions: Vec<DriveAction> = observations
                    .iter()
                    .map(|observation| agent.greedy_action(observation))
                    .collect();
                let (_, crashed) = env.step(&actions).unwrap();
                for vehicle in env.vehicles() {
                    epi_reward += self.reward_config.vehicle_reward(vehicle);
                }
                if crashed || ticks >= self.max_ticks {
                    break;
                }
                env.prune_offscreen();
                observations = env.observations();
            }
            reward_history.push(epi_reward);
            episode_length.push(ticks);
        }
        (reward_history, episode_length)
    }

    pub fn example(&self, env: &mut IntersectionEnv, agent: &mut DeepQAgent) {
        let mut epi_reward = 0.0;
        let mut steps: i32 = 0;
        let mut observations = env.reset();
        loop {
            steps += 1;
            println!("{}", env.render());
            let actions: Vec<DriveAction> = observations
                .iter()
                .map(|observation| agent.get_action(observation))
                .collect();
            let (_, crashed) = env.step(&actions).unwrap();
            let mut tick_reward = 0.0;
            for vehicle in env.vehicles() {
                tick_reward += self.reward_config.vehicle_reward(vehicle);
            }
            println!("step reward {:?}", tick_reward);
            epi_reward += tick_reward;
            if crashed || steps as u128 >= self.max_ticks {
                println!("{}", env.render());
                println!("episode reward {:?}", epi_reward);
                println!("terminated with {:?} steps", steps);
                break;
            }
            env.prune_offscreen();
            observations = env.observations();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Heading;

    #[test]
    fn crash_penalty_overrides_speed() {
        let mut vehicle = Vehicle::new(Heading::East, 0.0, 0.0, 5.0);
        vehicle.mark_crashed();
        assert_eq!(RewardConfig::default().vehicle_reward(&vehicle), -10.0);
    }

    #[test]
    fn faster_vehicles_earn_more() {
        let config = RewardConfig::default();
        let slow = Vehicle::new(Heading::East, 0.0, 0.0, 2.0);
        let fast = Vehicle::new(Heading::East, 0.0, 0.0, 8.0);
        assert!(config.vehicle_reward(&fast) > config.vehicle_reward(&slow));
        assert!((config.vehicle_reward(&fast) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn crawling_is_penalized() {
        let config = RewardConfig::default();
        let crawling = Vehicle::new(Heading::East, 0.0, 0.0, 1.0);
        let reward = config.vehicle_reward(&crawling);
        assert!(reward < 0.0);
        assert!((reward - (-0.5 + 0.1 * 1.0 / 8.0)).abs() < 1e-6);
    }
}
