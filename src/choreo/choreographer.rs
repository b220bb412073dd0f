use serde::{Deserialize, Serialize};

use super::{
    progress::ScrollRange,
    props::PropertySet,
    timeline::{ItemPhase, Timeline},
    ChoreoError,
};

/// Where computed properties go. The view layer implements this for its
/// reactive style bindings; `Err(ChoreoError::Detached)` tells the
/// choreographer the element is gone.
pub trait Surface {
    fn apply(&self, props: &PropertySet) -> Result<(), ChoreoError>;
}

/// Device-class layout, chosen once when a choreography is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutVariant {
    /// Wide viewport: items animate together.
    Simultaneous,
    /// Compact viewport: items take turns, one full screen at a time.
    Sequential,
}

impl LayoutVariant {
    pub fn for_viewport(width: f64, breakpoint: f64) -> Self {
        if width >= breakpoint {
            LayoutVariant::Simultaneous
        } else {
            LayoutVariant::Sequential
        }
    }
}

#[derive(Debug)]
pub struct AnimatedItem<S> {
    surface: S,
    props: PropertySet,
    phase: ItemPhase,
    active: bool,
    detached: bool,
}

impl<S> AnimatedItem<S> {
    fn new(surface: S, props: PropertySet) -> Self {
        Self {
            surface,
            props,
            phase: ItemPhase::Inactive,
            active: false,
            detached: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The last properties successfully applied.
    pub fn props(&self) -> PropertySet {
        self.props
    }

    pub fn phase(&self) -> ItemPhase {
        self.phase
    }

    /// True once progress has carried the item past its entrance and until
    /// its exit completes.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

/// A resolved window, its tracks and the layout they were built for.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub range: ScrollRange,
    pub timeline: Timeline,
    pub layout: LayoutVariant,
}

/// Drives a set of items from a single progress value.
///
/// Visual state is a pure function of progress: `seek` recomputes every
/// item from its track and applies the result immediately, so scrolling back
/// to an offset always reproduces what was shown there before.
#[derive(Debug)]
pub struct Choreographer<S> {
    layout: LayoutVariant,
    range: ScrollRange,
    timeline: Timeline,
    items: Vec<AnimatedItem<S>>,
    progress: Option<f64>,
}

impl<S: Surface> Choreographer<S> {
    /// Bind `surfaces` to the tracks of `timeline`, pairing them by index.
    pub fn bind(surfaces: Vec<S>, range: ScrollRange, timeline: Timeline, layout: LayoutVariant) -> Self {
        if surfaces.len() != timeline.len() {
            log::warn!(
                "binding {} items to {} tracks; extras are ignored",
                surfaces.len(),
                timeline.len()
            );
        }
        let items = surfaces
            .into_iter()
            .zip(timeline.tracks.iter())
            .map(|(surface, track)| AnimatedItem::new(surface, track.sample(0.0)))
            .collect();
        Self {
            layout,
            range,
            timeline,
            items,
            progress: None,
        }
    }

    /// Bind from a plan that may still be waiting on a pin.
    ///
    /// A missing pin leaves the surfaces untouched and yields `None`; call
    /// again once the registry changes. A successful bind is applied at
    /// `offset` immediately.
    pub fn try_bind(surfaces: Vec<S>, plan: Result<Plan, ChoreoError>, offset: f64) -> Option<Self> {
        match plan {
            Ok(Plan {
                range,
                timeline,
                layout,
            }) => {
                let mut bound = Self::bind(surfaces, range, timeline, layout);
                bound.on_scroll(offset);
                Some(bound)
            }
            Err(ChoreoError::PinNotReady(id)) => {
                log::debug!("waiting on pin {id}");
                None
            }
            Err(e) => {
                log::warn!("couldn't bind choreography: {e}");
                None
            }
        }
    }

    pub fn layout(&self) -> LayoutVariant {
        self.layout
    }

    pub fn range(&self) -> ScrollRange {
        self.range
    }

    pub fn items(&self) -> &[AnimatedItem<S>] {
        &self.items
    }

    /// The last progress value applied, if any.
    pub fn progress(&self) -> Option<f64> {
        self.progress
    }

    pub fn on_scroll(&mut self, offset: f64) -> usize {
        let p = self.range.progress(offset);
        self.seek(p)
    }

    /// Apply the state at `progress`, returning how many items were updated.
    pub fn seek(&mut self, progress: f64) -> usize {
        let p = progress.clamp(0.0, 1.0);
        self.progress = Some(p);
        let mut applied = 0;
        for (index, (item, track)) in self
            .items
            .iter_mut()
            .zip(self.timeline.tracks.iter())
            .enumerate()
        {
            if item.detached {
                continue;
            }
            let props = track.sample(p);
            item.phase = track.phase(p);
            item.active = matches!(item.phase, ItemPhase::Active | ItemPhase::Exiting);
            match item.surface.apply(&props) {
                Ok(()) => {
                    item.props = props;
                    applied += 1;
                }
                Err(ChoreoError::Detached) => {
                    log::debug!("item {index} detached; dropping its updates");
                    item.detached = true;
                }
                Err(e) => log::warn!("item {index} rejected update: {e}"),
            }
        }
        applied
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use super::*;
    use crate::choreo::{
        easing::Ease,
        pins::PinRegistry,
        progress::{Measure, ProgressSource},
        timeline::Segment,
        timeline::Track,
    };

    /// Records everything applied to it; can be "removed from the document".
    #[derive(Clone, Default)]
    pub(crate) struct MockSurface {
        pub applied: Rc<RefCell<Vec<PropertySet>>>,
        pub removed: Rc<Cell<bool>>,
    }

    impl MockSurface {
        pub fn last(&self) -> Option<PropertySet> {
            self.applied.borrow().last().copied()
        }

        pub fn count(&self) -> usize {
            self.applied.borrow().len()
        }
    }

    impl Surface for MockSurface {
        fn apply(&self, props: &PropertySet) -> Result<(), ChoreoError> {
            if self.removed.get() {
                return Err(ChoreoError::Detached);
            }
            self.applied.borrow_mut().push(*props);
            Ok(())
        }
    }

    fn fade_track(start: f64, end: f64) -> Track {
        Track::new(Segment::new(
            start,
            end,
            PropertySet::IDENTITY.with_opacity(0.0).with_blur(4.0),
            PropertySet::IDENTITY,
            Ease::Linear,
        ))
    }

    fn bound(n: usize) -> (Choreographer<MockSurface>, Vec<MockSurface>) {
        let surfaces = (0..n).map(|_| MockSurface::default()).collect::<Vec<_>>();
        let tracks = (0..n)
            .map(|i| fade_track(i as f64 * 0.25, i as f64 * 0.25 + 0.5))
            .collect();
        let choreo = Choreographer::bind(
            surfaces.clone(),
            ScrollRange::new(1000.0, 2000.0),
            Timeline::new(tracks),
            LayoutVariant::Simultaneous,
        );
        (choreo, surfaces)
    }

    #[test]
    fn test_bind_applies_nothing() {
        let (choreo, surfaces) = bound(2);
        assert!(surfaces.iter().all(|s| s.count() == 0));
        assert_eq!(choreo.progress(), None);
        assert!(choreo.items().iter().all(|i| i.phase() == ItemPhase::Inactive));
    }

    #[test]
    fn test_seek_interpolates() {
        let (mut choreo, surfaces) = bound(1);
        choreo.seek(0.0);
        assert_eq!(surfaces[0].last().unwrap().opacity, 0.0);
        choreo.seek(0.25);
        let mid = surfaces[0].last().unwrap();
        assert!((mid.opacity - 0.5).abs() < 1e-9);
        assert!((mid.blur - 2.0).abs() < 1e-9);
        choreo.seek(1.0);
        assert_eq!(surfaces[0].last().unwrap(), PropertySet::IDENTITY);
    }

    #[test]
    fn test_on_scroll_uses_range() {
        let (mut choreo, surfaces) = bound(1);
        choreo.on_scroll(0.0);
        assert_eq!(choreo.progress(), Some(0.0));
        choreo.on_scroll(1125.0);
        assert_eq!(choreo.progress(), Some(0.125));
        assert!((surfaces[0].last().unwrap().opacity - 0.25).abs() < 1e-9);
        choreo.on_scroll(5000.0);
        assert_eq!(choreo.progress(), Some(1.0));
    }

    #[test]
    fn test_forward_then_back_reproduces_state() {
        let (mut choreo, _surfaces) = bound(3);
        let snapshot = |c: &Choreographer<MockSurface>| {
            c.items()
                .iter()
                .map(|i| (i.props(), i.phase(), i.is_active()))
                .collect::<Vec<_>>()
        };

        choreo.on_scroll(1400.0);
        let there = snapshot(&choreo);
        for offset in [1500.0, 1800.0, 2500.0, 1900.0, 1200.0, 900.0] {
            choreo.on_scroll(offset);
        }
        choreo.on_scroll(1400.0);
        assert_eq!(snapshot(&choreo), there);

        // repeated measurement at the same offset is idempotent
        choreo.on_scroll(1400.0);
        assert_eq!(snapshot(&choreo), there);
    }

    #[test]
    fn test_active_flag_tracks_threshold() {
        let (mut choreo, _surfaces) = bound(2);
        choreo.seek(0.6);
        assert!(choreo.items()[0].is_active());
        assert!(!choreo.items()[1].is_active());
        choreo.seek(0.75);
        assert!(choreo.items()[1].is_active());
        choreo.seek(0.3);
        assert!(!choreo.items()[0].is_active());
        assert!(!choreo.items()[1].is_active());
    }

    #[test]
    fn test_detached_item_is_dropped() {
        let (mut choreo, surfaces) = bound(2);
        choreo.seek(0.1);
        surfaces[0].removed.set(true);
        assert_eq!(choreo.seek(0.2), 1);
        assert!(choreo.items()[0].is_detached());
        assert_eq!(choreo.seek(0.3), 1);
        assert_eq!(surfaces[0].count(), 1);
        assert_eq!(surfaces[1].count(), 3);
    }

    #[test]
    fn test_try_bind_holds_until_pin_registered() {
        let pins = PinRegistry::new();
        let source = ProgressSource::pinned("aboutPin", 0.0, 40.0);
        let measure = Measure {
            trigger_top: 1000.0,
            trigger_height: 2720.0,
            viewport_height: 800.0,
        };
        let plan = |pins: &PinRegistry| -> Result<Plan, ChoreoError> {
            Ok(Plan {
                range: source.resolve(&measure, pins)?,
                timeline: Timeline::new(vec![fade_track(0.0, 1.0)]),
                layout: LayoutVariant::Simultaneous,
            })
        };
        let surfaces = vec![MockSurface::default()];

        assert!(Choreographer::try_bind(surfaces.clone(), plan(&pins), 1160.0).is_none());
        assert_eq!(surfaces[0].count(), 0);

        pins.register("aboutPin", 1000.0, 2920.0);
        let choreo = Choreographer::try_bind(surfaces.clone(), plan(&pins), 1160.0).unwrap();
        assert_eq!(choreo.range(), ScrollRange::new(1000.0, 1320.0));
        assert_eq!(choreo.progress(), Some(0.5));
        assert_eq!(surfaces[0].count(), 1);
        assert!((surfaces[0].last().unwrap().opacity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_try_bind_rejects_bad_rule() {
        let plan = ProgressSource::parse("top nowhere", "bottom bottom").map(|_| Plan {
            range: ScrollRange::new(0.0, 1.0),
            timeline: Timeline::default(),
            layout: LayoutVariant::Simultaneous,
        });
        let surfaces = vec![MockSurface::default()];
        assert!(Choreographer::<MockSurface>::try_bind(surfaces.clone(), plan, 0.0).is_none());
        assert_eq!(surfaces[0].count(), 0);
    }

    #[test]
    fn test_layout_variant_breakpoint() {
        assert_eq!(
            LayoutVariant::for_viewport(767.0, 768.0),
            LayoutVariant::Sequential
        );
        assert_eq!(
            LayoutVariant::for_viewport(768.0, 768.0),
            LayoutVariant::Simultaneous
        );
    }
}
