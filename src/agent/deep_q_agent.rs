use std::io;
use std::path::Path;
use std::slice;

use ndarray::{arr2, Array2};

use crate::action_selection::{ActionSelection, EnumActionSelection};
use crate::env::{DriveAction, VehicleObservation};
use crate::memory::{ReplayMemory, Transition};
use crate::network::Network;
use crate::utils::{argmax, max};

/// Q-learning driver sharing one value network across every vehicle on the
/// field.
pub struct DeepQAgent {
    network: Network,
    action_selection: EnumActionSelection<{ DriveAction::COUNT }>,
    memory: ReplayMemory,
    discount_factor: f32,
    batch_size: usize,
}

impl DeepQAgent {
    pub fn new(
        network: Network,
        action_selection: EnumActionSelection<{ DriveAction::COUNT }>,
        discount_factor: f32,
        memory_capacity: usize,
        batch_size: usize,
        seed: u64,
    ) -> Self {
        Self {
            network,
            action_selection,
            memory: ReplayMemory::new(memory_capacity, seed),
            discount_factor,
            batch_size,
        }
    }

    pub fn q_values(&mut self, observation: &VehicleObservation) -> [f32; DriveAction::COUNT] {
        let values = self.network.predict(arr2(&[observation.as_array()]));
        row_values(&values, 0)
    }

    pub fn get_action(&mut self, observation: &VehicleObservation) -> DriveAction {
        let values = self.q_values(observation);
        DriveAction::from(self.action_selection.get_action(&values))
    }

    pub fn greedy_action(&mut self, observation: &VehicleObservation) -> DriveAction {
        DriveAction::from(argmax(&self.q_values(observation)))
    }

    pub fn memorize(&mut self, transition: Transition) {
        self.memory.add(transition);
    }

    // fit on the transition that just happened
    pub fn train_step(&mut self, transition: &Transition) -> f32 {
        self.train_batch(slice::from_ref(transition))
    }

    // fit on a batch drawn from the replay memory
    pub fn train_long_memory(&mut self) -> f32 {
        let batch = self.memory.sample_batch(self.batch_size);
        self.train_batch(&batch)
    }

    /// Advances the exploration schedule by one finished game.
    pub fn finish_game(&mut self) {
        self.action_selection.update();
    }

    pub fn reset(&mut self) {
        self.action_selection.reset();
    }

    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        self.network.save(path)
    }

    pub fn load_network(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        self.network = Network::load(path)?;
        Ok(())
    }

    fn train_batch(&mut self, transitions: &[Transition]) -> f32 {
        let states =
            Array2::from_shape_fn((transitions.len(), 2), |(i, j)| transitions[i].state[j]);
        let next_states =
            Array2::from_shape_fn((transitions.len(), 2), |(i, j)| transitions[i].next_state[j]);
        let next_values = self.network.predict(next_states);
        let mut targets = self.network.predict(states.clone());
        for (i, transition) in transitions.iter().enumerate() {
            let mut target = transition.reward;
            if !transition.done {
                target += self.discount_factor * max(&row_values(&next_values, i));
            }
            // only the slot of the action actually taken moves
            targets[(i, argmax(&transition.action))] = target;
        }
        self.network.fit(states, targets)
    }
}

fn row_values(values: &Array2<f32>, row: usize) -> [f32; DriveAction::COUNT] {
    [
        *values.get((row, 0)).unwrap(),
        *values.get((row, 1)).unwrap(),
        *values.get((row, 2)).unwrap(),
    ]
}
