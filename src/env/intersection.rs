use std::fmt::Write;

use super::vehicle::{DriveAction, Heading, Rect, Vehicle, VehicleObservation};
use super::EnvError;

/// Four-way crossing with one lane per heading, right-hand traffic.
/// Vehicles enter at the field edge, cross the shared center box and leave
/// on the far side; every tick moves all of them, refreshes every radar and
/// then checks each pair for overlap.
#[derive(Debug, Clone, Default)]
pub struct IntersectionEnv {
    vehicles: Vec<Vehicle>,
    ready: bool,
}

impl IntersectionEnv {
    pub const FIELD_SIDE: f32 = 800.0;
    pub const ROAD_WIDTH: f32 = 120.0;
    pub const CENTER: f32 = Self::FIELD_SIDE / 2.0;
    pub const LANE_OFFSET: f32 = Self::ROAD_WIDTH / 4.0;
    pub const PRUNE_MARGIN: f32 = 50.0;
    // staggered speeds so crossing conflicts actually happen
    pub const SPAWN_SPEEDS: [(Heading, f32); 4] = [
        (Heading::West, 4.0),
        (Heading::East, 3.0),
        (Heading::North, 5.0),
        (Heading::South, 3.0),
    ];

    pub fn new() -> Self {
        Self {
            vehicles: vec![],
            ready: false,
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn observations(&self) -> Vec<VehicleObservation> {
        self.vehicles.iter().map(Vehicle::observation).collect()
    }

    /// Replaces whatever is on the field with the default one-per-heading
    /// grid and returns the fresh observations.
    pub fn reset(&mut self) -> Vec<VehicleObservation> {
        self.vehicles = Self::starting_grid();
        self.ready = true;
        self.run_radars();
        self.observations()
    }

    /// Advances every vehicle with its paired action, refreshes the radars
    /// and marks every overlapping pair as crashed. The returned flag
    /// reports whether any overlap was found this tick; rewards are the
    /// caller's concern.
    pub fn step(
        &mut self,
        actions: &[DriveAction],
    ) -> Result<(Vec<VehicleObservation>, bool), EnvError> {
        if !self.ready {
            return Err(EnvError::EnvNotReady);
        }
        if actions.len() != self.vehicles.len() {
            return Err(EnvError::ActionCountMismatch {
                expected: self.vehicles.len(),
                got: actions.len(),
            });
        }
        for (vehicle, action) in self.vehicles.iter_mut().zip(actions) {
            vehicle.advance(Some(*action));
        }
        self.run_radars();
        let crashed = self.mark_collisions();
        Ok((self.observations(), crashed))
    }

    /// Drops vehicles that drifted further than PRUNE_MARGIN outside the
    /// field and returns how many were removed. An emptied field respawns
    /// the default grid, so a running simulation never stays empty.
    pub fn prune_offscreen(&mut self) -> usize {
        let before = self.vehicles.len();
        self.vehicles.retain(|v| {
            v.x() > -Self::PRUNE_MARGIN
                && v.x() < Self::FIELD_SIDE + Self::PRUNE_MARGIN
                && v.y() > -Self::PRUNE_MARGIN
                && v.y() < Self::FIELD_SIDE + Self::PRUNE_MARGIN
        });
        let pruned = before - self.vehicles.len();
        if self.ready && self.vehicles.is_empty() {
            self.vehicles = Self::starting_grid();
            self.run_radars();
        }
        pruned
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for vehicle in &self.vehicles {
            let _ = writeln!(
                out,
                "{:?} x={:7.1} y={:7.1} speed={:.1} radar={:5.1}{}",
                vehicle.heading(),
                vehicle.x(),
                vehicle.y(),
                vehicle.speed(),
                vehicle.radar_reading(),
                if vehicle.crashed() { " CRASHED" } else { "" },
            );
        }
        out
    }

    fn spawn_position(heading: Heading) -> (f32, f32) {
        match heading {
            Heading::West => (
                Self::FIELD_SIDE,
                Self::CENTER - Self::LANE_OFFSET - Vehicle::WIDTH / 2.0,
            ),
            Heading::East => (
                -Vehicle::LENGTH,
                Self::CENTER + Self::LANE_OFFSET - Vehicle::WIDTH / 2.0,
            ),
            Heading::North => (
                Self::CENTER + Self::LANE_OFFSET - Vehicle::WIDTH / 2.0,
                Self::FIELD_SIDE,
            ),
            Heading::South => (
                Self::CENTER - Self::LANE_OFFSET - Vehicle::WIDTH / 2.0,
                -Vehicle::LENGTH,
            ),
        }
    }

    fn starting_grid() -> Vec<Vehicle> {
        Self::SPAWN_SPEEDS
            .iter()
            .map(|(heading, speed)| {
                let (x, y) = Self::spawn_position(*heading);
                Vehicle::new(*heading, x, y, *speed)
            })
            .collect()
    }

    fn run_radars(&mut self) {
        let boxes: Vec<Rect> = self.vehicles.iter().map(Vehicle::bounding_box).collect();
        for (i, vehicle) in self.vehicles.iter_mut().enumerate() {
            let others: Vec<Rect> = boxes
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, r)| *r)
                .collect();
            vehicle.sense(&others);
        }
    }

    // O(n^2) over the active set, fine for a handful of vehicles
    fn mark_collisions(&mut self) -> bool {
        let boxes: Vec<Rect> = self.vehicles.iter().map(Vehicle::bounding_box).collect();
        let mut any = false;
        for i in 0..self.vehicles.len() {
            for j in (i + 1)..self.vehicles.len() {
                if boxes[i].overlaps(&boxes[j]) {
                    self.vehicles[i].mark_crashed();
                    self.vehicles[j].mark_crashed();
                    any = true;
                }
            }
        }
        any
    }
}
