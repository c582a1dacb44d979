mod deep_q_agent;

pub use deep_q_agent::DeepQAgent;
