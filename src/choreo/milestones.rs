/// Steps along a growing line that light up once the line reaches them.
///
/// Thresholds are the steps' centre offsets inside the container; a step is
/// active while `progress * height` is at or past its threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Milestones {
    thresholds: Vec<f64>,
    height: f64,
}

impl Milestones {
    pub fn new(thresholds: Vec<f64>, height: f64) -> Self {
        Self { thresholds, height }
    }

    /// Replace the layout after a resize.
    pub fn remeasure(&mut self, thresholds: Vec<f64>, height: f64) {
        self.thresholds = thresholds;
        self.height = height;
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_active(&self, index: usize, progress: f64) -> bool {
        let reached = progress.clamp(0.0, 1.0) * self.height;
        self.thresholds
            .get(index)
            .is_some_and(|threshold| reached >= *threshold)
    }

    pub fn active_at(&self, progress: f64) -> Vec<bool> {
        (0..self.thresholds.len())
            .map(|i| self.is_active(i, progress))
            .collect()
    }
}

/// Gap between consecutive entrances in a list, in seconds.
pub const ENTRANCE_STAGGER_S: f64 = 0.2;

pub fn entrance_delay(index: usize) -> f64 {
    index as f64 * ENTRANCE_STAGGER_S
}

/// A section entrance that plays once: set the first time the section is
/// seen, never cleared when it scrolls away again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Entrance {
    played: bool,
}

impl Entrance {
    pub fn observe(&mut self, visible: bool) -> bool {
        self.played |= visible;
        self.played
    }

    pub fn has_played(&self) -> bool {
        self.played
    }
}
