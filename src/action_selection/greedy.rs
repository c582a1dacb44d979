use crate::utils::argmax;

use super::ActionSelection;

/// Always takes the highest valued action. Used when replaying a trained
/// driver without exploration.
#[derive(Debug, Clone, Default)]
pub struct Greedy;

impl<const COUNT: usize> ActionSelection<COUNT> for Greedy {
    fn get_action(&mut self, values: &[f32; COUNT]) -> usize {
        argmax(values)
    }

    fn update(&mut self) {}

    fn reset(&mut self) {}
}
