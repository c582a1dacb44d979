pub mod action_selection;
pub mod env;
pub mod memory;
pub mod network;
pub mod trainer;
pub mod utils;

mod agent;

pub use agent::DeepQAgent;
