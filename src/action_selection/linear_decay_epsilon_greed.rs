use rand::{distributions::Uniform, prelude::Distribution, rngs::StdRng, SeedableRng};

use crate::utils::argmax;

use super::ActionSelection;

/// Epsilon-greedy where the exploration chance starts at
/// `exploration_window` out of [`Self::DRAW_RANGE`] and shrinks by one with
/// every finished game until it reaches zero.
#[derive(Debug, Clone)]
pub struct LinearDecayEpsilonGreed<const COUNT: usize> {
    exploration_decider: Uniform<i64>,
    rand_action_selecter: Uniform<usize>,
    exploration_window: i64,
    games_played: i64,
    rng: StdRng,
}

impl<const COUNT: usize> LinearDecayEpsilonGreed<COUNT> {
    pub const DRAW_RANGE: i64 = 200;

    pub fn new(exploration_window: i64, seed: u64) -> Self {
        Self {
            exploration_decider: Uniform::from(0..Self::DRAW_RANGE),
            rand_action_selecter: Uniform::from(0..COUNT),
            exploration_window,
            games_played: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn epsilon(&self) -> i64 {
        (self.exploration_window - self.games_played).max(0)
    }

    pub fn games_played(&self) -> i64 {
        self.games_played
    }

    fn should_explore(&mut self) -> bool {
        let epsilon = self.epsilon();
        epsilon != 0 && self.exploration_decider.sample(&mut self.rng) < epsilon
    }
}

impl<const COUNT: usize> ActionSelection<COUNT> for LinearDecayEpsilonGreed<COUNT> {
    fn get_action(&mut self, values: &[f32; COUNT]) -> usize {
        if self.should_explore() {
            self.rand_action_selecter.sample(&mut self.rng)
        } else {
            argmax(values)
        }
    }

    fn update(&mut self) {
        self.games_played += 1;
    }

    fn reset(&mut self) {
        self.games_played = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_shrinks_one_per_game() {
        let mut selection: LinearDecayEpsilonGreed<3> = LinearDecayEpsilonGreed::new(80, 7);
        assert_eq!(selection.epsilon(), 80);
        for _ in 0..35 {
            selection.update();
        }
        assert_eq!(selection.epsilon(), 45);
        for _ in 0..60 {
            selection.update();
        }
        assert_eq!(selection.epsilon(), 0);
        selection.reset();
        assert_eq!(selection.games_played(), 0);
        assert_eq!(selection.epsilon(), 80);
    }

    #[test]
    fn actions_stay_in_range_while_exploring() {
        let mut selection: LinearDecayEpsilonGreed<3> = LinearDecayEpsilonGreed::new(80, 42);
        let values = [0.0, 1.0, 0.0];
        for _ in 0..500 {
            assert!(selection.get_action(&values) < 3);
        }
    }

    #[test]
    fn exploits_once_the_window_is_spent() {
        let mut selection: LinearDecayEpsilonGreed<3> = LinearDecayEpsilonGreed::new(0, 42);
        let values = [0.1, 0.9, 0.3];
        for _ in 0..100 {
            assert_eq!(selection.get_action(&values), 1);
        }
    }

    #[test]
    fn early_game_exploration_rate_matches_epsilon() {
        let mut selection: LinearDecayEpsilonGreed<3> = LinearDecayEpsilonGreed::new(80, 7);
        let values = [0.1, 0.9, 0.3];

        // epsilon 80 of 200 explores at 0.4, and a third of those draws
        // land on the greedy action anyway
        let mut off_greedy = 0;
        for _ in 0..3000 {
            if selection.get_action(&values) != 1 {
                off_greedy += 1;
            }
        }
        assert!(off_greedy > 650 && off_greedy < 950);

        for _ in 0..80 {
            selection.update();
        }
        for _ in 0..200 {
            assert_eq!(selection.get_action(&values), 1);
        }
    }
}
