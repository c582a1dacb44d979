mod greedy;
mod linear_decay_epsilon_greed;

use enum_dispatch::enum_dispatch;
pub use greedy::Greedy;
pub use linear_decay_epsilon_greed::LinearDecayEpsilonGreed;

#[enum_dispatch]
pub trait ActionSelection<const COUNT: usize> {
    fn get_action(&mut self, values: &[f32; COUNT]) -> usize;
    fn update(&mut self);
    fn reset(&mut self);
}

#[derive(Debug, Clone)]
#[enum_dispatch(ActionSelection<COUNT>)]
pub enum EnumActionSelection<const COUNT: usize> {
    LinearDecayEpsilonGreed(LinearDecayEpsilonGreed<COUNT>),
    Greedy(Greedy),
}
