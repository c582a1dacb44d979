use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::env::DriveAction;

/// One recorded tick for one vehicle. The action is kept one-hot so the
/// taken slot can be recovered with an argmax when building targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: [f32; 2],
    pub action: [f32; 3],
    pub reward: f32,
    pub next_state: [f32; 2],
    pub done: bool,
}

impl Transition {
    pub fn new(
        state: [f32; 2],
        action: DriveAction,
        reward: f32,
        next_state: [f32; 2],
        done: bool,
    ) -> Self {
        Self {
            state,
            action: action.one_hot(),
            reward,
            next_state,
            done,
        }
    }
}

pub struct ReplayMemory {
    transitions: VecDeque<Transition>,
    capacity: usize,
    rng: StdRng,
}

impl ReplayMemory {
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            transitions: VecDeque::new(),
            capacity,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn add(&mut self, transition: Transition) {
        self.transitions.push_back(transition);
        if self.transitions.len() > self.capacity {
            self.transitions.pop_front();
        }
    }

    /// Uniform sample without replacement. With `size` or fewer transitions
    /// stored, returns everything in insertion order instead.
    pub fn sample_batch(&mut self, size: usize) -> Vec<Transition> {
        if self.transitions.len() <= size {
            return self.transitions.iter().copied().collect();
        }
        rand::seq::index::sample(&mut self.rng, self.transitions.len(), size)
            .into_iter()
            .map(|i| self.transitions[i])
            .collect()
    }
}
