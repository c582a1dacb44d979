mod intersection;
mod vehicle;

pub use intersection::IntersectionEnv;
pub use vehicle::{DriveAction, Heading, Rect, Vehicle, VehicleObservation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    EnvNotReady,
    ActionCountMismatch { expected: usize, got: usize },
}
