#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    /// Unit travel direction on the screen grid, where y grows downward.
    pub fn direction(self) -> (f32, f32) {
        match self {
            Heading::North => (0.0, -1.0),
            Heading::South => (0.0, 1.0),
            Heading::East => (1.0, 0.0),
            Heading::West => (-1.0, 0.0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Heading::North | Heading::South)
    }
}

/// Axis-aligned box, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    // right and bottom edges are exclusive
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    // boxes that only touch on an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveAction {
    Brake,
    Hold,
    Gas,
}

impl DriveAction {
    pub const COUNT: usize = 3;

    pub fn delta(self) -> f32 {
        match self {
            DriveAction::Brake => -Vehicle::SPEED_DELTA,
            DriveAction::Hold => 0.0,
            DriveAction::Gas => Vehicle::SPEED_DELTA,
        }
    }

    pub fn one_hot(self) -> [f32; Self::COUNT] {
        let mut encoded = [0.0; Self::COUNT];
        encoded[usize::from(self)] = 1.0;
        encoded
    }
}

impl From<usize> for DriveAction {
    fn from(value: usize) -> Self {
        match value {
            0 => DriveAction::Brake,
            1 => DriveAction::Hold,
            2 => DriveAction::Gas,
            _ => panic!("invalid action index: {}", value),
        }
    }
}

impl From<DriveAction> for usize {
    fn from(action: DriveAction) -> Self {
        match action {
            DriveAction::Brake => 0,
            DriveAction::Hold => 1,
            DriveAction::Gas => 2,
        }
    }
}

/// What a single vehicle feeds the value network, both terms in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VehicleObservation {
    pub speed: f32,
    pub lead_distance: f32,
}

impl VehicleObservation {
    pub fn new(speed: f32, lead_distance: f32) -> Self {
        Self {
            speed,
            lead_distance,
        }
    }

    pub fn as_array(&self) -> [f32; 2] {
        [self.speed, self.lead_distance]
    }
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    heading: Heading,
    x: f32,
    y: f32,
    speed: f32,
    crashed: bool,
    radar_reading: f32,
}

impl Vehicle {
    pub const LENGTH: f32 = 40.0;
    pub const WIDTH: f32 = 20.0;
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 8.0;
    pub const SPEED_DELTA: f32 = 0.2;
    pub const RADAR_LENGTH: f32 = 200.0;
    pub const RADAR_STEP: f32 = 10.0;

    pub fn new(heading: Heading, x: f32, y: f32, speed: f32) -> Self {
        Self {
            heading,
            x,
            y,
            speed: speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED),
            crashed: false,
            radar_reading: Self::RADAR_LENGTH,
        }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn crashed(&self) -> bool {
        self.crashed
    }

    pub fn radar_reading(&self) -> f32 {
        self.radar_reading
    }

    pub fn mark_crashed(&mut self) {
        self.crashed = true;
    }

    pub fn bounding_box(&self) -> Rect {
        let (w, h) = if self.heading.is_vertical() {
            (Self::WIDTH, Self::LENGTH)
        } else {
            (Self::LENGTH, Self::WIDTH)
        };
        Rect::new(self.x, self.y, w, h)
    }

    /// Adjusts speed by the action, then translates along the heading.
    /// A crashed vehicle stays where it is.
    pub fn advance(&mut self, action: Option<DriveAction>) {
        if self.crashed {
            return;
        }
        if let Some(action) = action {
            self.speed = (self.speed + action.delta()).clamp(Self::MIN_SPEED, Self::MAX_SPEED);
        }
        let (dx, dy) = self.heading.direction();
        self.x += dx * self.speed;
        self.y += dy * self.speed;
    }

    /// Casts the forward radar against the given boxes, probing every
    /// RADAR_STEP units from the leading edge. The first probe inside a box
    /// wins; with nothing in range the reading saturates at RADAR_LENGTH.
    pub fn sense(&mut self, others: &[Rect]) {
        let (ox, oy) = self.leading_edge();
        let (dx, dy) = self.heading.direction();
        self.radar_reading = Self::RADAR_LENGTH;
        for step in 0..=(Self::RADAR_LENGTH / Self::RADAR_STEP) as u32 {
            let dist = step as f32 * Self::RADAR_STEP;
            let px = ox + dx * dist;
            let py = oy + dy * dist;
            if others.iter().any(|r| r.contains(px, py)) {
                self.radar_reading = dist;
                break;
            }
        }
    }

    pub fn observation(&self) -> VehicleObservation {
        VehicleObservation::new(
            (self.speed / Self::MAX_SPEED).clamp(0.0, 1.0),
            (self.radar_reading / Self::RADAR_LENGTH).clamp(0.0, 1.0),
        )
    }

    fn leading_edge(&self) -> (f32, f32) {
        let rect = self.bounding_box();
        match self.heading {
            Heading::North => (rect.x + rect.w / 2.0, rect.y),
            Heading::South => (rect.x + rect.w / 2.0, rect.y + rect.h),
            Heading::East => (rect.x + rect.w, rect.y + rect.h / 2.0),
            Heading::West => (rect.x, rect.y + rect.h / 2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_stays_clamped() {
        let mut vehicle = Vehicle::new(Heading::East, 0.0, 0.0, 4.0);
        for _ in 0..100 {
            vehicle.advance(Some(DriveAction::Gas));
        }
        assert_eq!(vehicle.speed(), Vehicle::MAX_SPEED);
        for _ in 0..100 {
            vehicle.advance(Some(DriveAction::Brake));
        }
        assert_eq!(vehicle.speed(), Vehicle::MIN_SPEED);
    }

    #[test]
    fn construction_clamps_speed() {
        assert_eq!(Vehicle::new(Heading::East, 0.0, 0.0, 99.0).speed(), 8.0);
        assert_eq!(Vehicle::new(Heading::East, 0.0, 0.0, 0.0).speed(), 1.0);
    }

    #[test]
    fn crashed_vehicle_never_moves() {
        let mut vehicle = Vehicle::new(Heading::South, 100.0, 100.0, 3.0);
        vehicle.mark_crashed();
        vehicle.advance(Some(DriveAction::Gas));
        vehicle.advance(None);
        assert_eq!(vehicle.x(), 100.0);
        assert_eq!(vehicle.y(), 100.0);
        assert_eq!(vehicle.speed(), 3.0);
    }

    #[test]
    fn hold_keeps_speed_and_translates() {
        let mut vehicle = Vehicle::new(Heading::West, 500.0, 360.0, 4.0);
        vehicle.advance(Some(DriveAction::Hold));
        assert_eq!(vehicle.speed(), 4.0);
        assert_eq!(vehicle.x(), 496.0);
        assert_eq!(vehicle.y(), 360.0);
    }

    #[test]
    fn radar_reports_first_box_hit() {
        // leading edge at (40, 410), box 60 units ahead
        let mut vehicle = Vehicle::new(Heading::East, 0.0, 400.0, 2.0);
        vehicle.sense(&[Rect::new(100.0, 400.0, 40.0, 20.0)]);
        assert_eq!(vehicle.radar_reading(), 60.0);
    }

    #[test]
    fn radar_saturates_when_clear() {
        let mut vehicle = Vehicle::new(Heading::East, 0.0, 400.0, 2.0);
        vehicle.sense(&[]);
        assert_eq!(vehicle.radar_reading(), Vehicle::RADAR_LENGTH);
        // just beyond the last probe at 40 + 200
        vehicle.sense(&[Rect::new(250.0, 400.0, 40.0, 20.0)]);
        assert_eq!(vehicle.radar_reading(), Vehicle::RADAR_LENGTH);
    }

    #[test]
    fn radar_ignores_boxes_off_the_ray() {
        let mut vehicle = Vehicle::new(Heading::North, 420.0, 800.0, 5.0);
        vehicle.sense(&[Rect::new(360.0, 700.0, 20.0, 40.0)]);
        assert_eq!(vehicle.radar_reading(), Vehicle::RADAR_LENGTH);
        // same lane: the near face sits exactly 100 ahead of the leading
        // edge (430, 800), and the face itself is exclusive, so the first
        // probe inside the box lands at 110
        vehicle.sense(&[Rect::new(420.0, 660.0, 20.0, 40.0)]);
        assert_eq!(vehicle.radar_reading(), 110.0);
    }

    #[test]
    fn observation_is_normalized() {
        let mut vehicle = Vehicle::new(Heading::East, 0.0, 0.0, 4.0);
        vehicle.sense(&[]);
        let obs = vehicle.observation();
        assert_eq!(obs.speed, 0.5);
        assert_eq!(obs.lead_distance, 1.0);
        assert_eq!(obs.as_array(), [0.5, 1.0]);
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 40.0, 20.0);
        let b = Rect::new(40.0, 0.0, 40.0, 20.0);
        assert!(!a.overlaps(&b));
        let c = Rect::new(39.0, 10.0, 40.0, 20.0);
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn contains_excludes_right_and_bottom_edges() {
        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(39.9, 19.9));
        assert!(!rect.contains(40.0, 10.0));
        assert!(!rect.contains(10.0, 20.0));
    }

    #[test]
    fn one_hot_marks_the_taken_slot() {
        assert_eq!(DriveAction::Brake.one_hot(), [1.0, 0.0, 0.0]);
        assert_eq!(DriveAction::Hold.one_hot(), [0.0, 1.0, 0.0]);
        assert_eq!(DriveAction::Gas.one_hot(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn action_indices_round_trip() {
        for i in 0..DriveAction::COUNT {
            assert_eq!(usize::from(DriveAction::from(i)), i);
        }
    }
}
