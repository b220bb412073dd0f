use serde::{Deserialize, Serialize};

use super::{easing::Ease, props::PropertySet};

/// Where an item is in its reveal cycle. The cycle has no terminal state:
/// scrolling back walks it in reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemPhase {
    #[default]
    Inactive,
    Entering,
    Active,
    Exiting,
}

/// One from -> to tween over `[start, end]` of a normalized timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub from: PropertySet,
    pub to: PropertySet,
    pub ease: Ease,
}

impl Segment {
    pub fn new(start: f64, end: f64, from: PropertySet, to: PropertySet, ease: Ease) -> Self {
        Self {
            start,
            end,
            from,
            to,
            ease,
        }
    }

    /// Local progress in [0, 1]. A zero-length segment jumps at `start`.
    pub fn local(&self, p: f64) -> f64 {
        let len = self.end - self.start;
        if len <= 0.0 {
            return if p >= self.start { 1.0 } else { 0.0 };
        }
        ((p - self.start) / len).clamp(0.0, 1.0)
    }

    pub fn sample(&self, p: f64) -> PropertySet {
        PropertySet::blend(&self.from, &self.to, self.ease.apply(self.local(p)))
    }
}

/// The ordered segments that animate a single item.
///
/// The first segment is the item's entrance; an optional exit segment turns
/// the phase back to `Inactive` once it completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    segments: Vec<Segment>,
    exit: Option<usize>,
}

impl Track {
    pub fn new(enter: Segment) -> Self {
        Self {
            segments: vec![enter],
            exit: None,
        }
    }

    pub fn then(mut self, segment: Segment) -> Self {
        debug_assert!(self.segments.last().is_none_or(|s| s.start <= segment.start));
        self.segments.push(segment);
        self
    }

    pub fn then_exit(mut self, segment: Segment) -> Self {
        self.exit = Some(self.segments.len());
        self.then(segment)
    }

    pub fn enter(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn exit(&self) -> Option<&Segment> {
        self.exit.map(|i| &self.segments[i])
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Sample the item's properties at timeline progress `p`.
    ///
    /// Before the entrance starts the item holds the entrance's `from` state;
    /// after that the most recently started segment wins.
    pub fn sample(&self, p: f64) -> PropertySet {
        let mut out = self.segments[0].from;
        for segment in &self.segments {
            if p < segment.start {
                break;
            }
            out = segment.sample(p);
        }
        out
    }

    pub fn phase(&self, p: f64) -> ItemPhase {
        let enter = self.enter();
        if p < enter.end {
            return if p > enter.start {
                ItemPhase::Entering
            } else {
                ItemPhase::Inactive
            };
        }
        match self.exit() {
            None => ItemPhase::Active,
            Some(exit) if p <= exit.start => ItemPhase::Active,
            Some(exit) if p < exit.end => ItemPhase::Exiting,
            Some(_) => ItemPhase::Inactive,
        }
    }
}

/// One track per bound item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub tracks: Vec<Track>,
}

impl Timeline {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden() -> PropertySet {
        PropertySet::IDENTITY.with_opacity(0.0).with_offset(0.0, 100.0)
    }

    fn shown() -> PropertySet {
        PropertySet::IDENTITY
    }

    fn gone() -> PropertySet {
        PropertySet::IDENTITY.with_offset(0.0, -800.0)
    }

    fn in_out_track() -> Track {
        Track::new(Segment::new(0.2, 0.4, hidden(), shown(), Ease::Linear))
            .then_exit(Segment::new(0.4, 0.6, shown(), gone(), Ease::Linear))
    }

    #[test]
    fn test_sample_holds_from_before_start() {
        let track = in_out_track();
        assert_eq!(track.sample(0.0), hidden());
        assert_eq!(track.sample(0.2), hidden());
    }

    #[test]
    fn test_sample_latest_segment_wins() {
        let track = in_out_track();
        let mid_enter = track.sample(0.3);
        assert!((mid_enter.opacity - 0.5).abs() < 1e-9);
        assert!((mid_enter.y - 50.0).abs() < 1e-9);
        assert_eq!(track.sample(0.4), shown());
        assert!((track.sample(0.5).y + 400.0).abs() < 1e-9);
        assert_eq!(track.sample(0.9), gone());
    }

    #[test]
    fn test_phase_cycle() {
        let track = in_out_track();
        assert_eq!(track.phase(0.0), ItemPhase::Inactive);
        assert_eq!(track.phase(0.2), ItemPhase::Inactive);
        assert_eq!(track.phase(0.3), ItemPhase::Entering);
        assert_eq!(track.phase(0.4), ItemPhase::Active);
        assert_eq!(track.phase(0.5), ItemPhase::Exiting);
        assert_eq!(track.phase(0.6), ItemPhase::Inactive);
        assert_eq!(track.phase(1.0), ItemPhase::Inactive);
    }

    #[test]
    fn test_phase_without_exit_holds() {
        let track = Track::new(Segment::new(0.0, 0.5, hidden(), shown(), Ease::Linear));
        assert_eq!(track.phase(0.0), ItemPhase::Inactive);
        assert_eq!(track.phase(0.25), ItemPhase::Entering);
        assert_eq!(track.phase(0.5), ItemPhase::Active);
        assert_eq!(track.phase(1.0), ItemPhase::Active);
    }

    #[test]
    fn test_zero_length_segment_jumps() {
        let seg = Segment::new(0.5, 0.5, hidden(), shown(), Ease::Linear);
        assert_eq!(seg.sample(0.49), hidden());
        assert_eq!(seg.sample(0.5), shown());
    }
}
