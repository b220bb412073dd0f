use std::sync::Arc;

use leptos::{html, prelude::*};
use leptos_use::{
    use_element_visibility, use_interval_fn, use_window_scroll, use_window_size, utils::Pausable,
    UseWindowSizeReturn,
};

use crate::choreo::{
    AmbientScheduler, AmbientUpdate, ChoreoError, Choreographer, Entrance, Measure, PinRegistry,
    Plan, PropertySet, ScrollRange, Surface, Viewport,
};

/// Reactive style slot for one animated element.
pub type StyleSignal = RwSignal<PropertySet>;

impl Surface for RwSignal<PropertySet> {
    fn apply(&self, props: &PropertySet) -> Result<(), ChoreoError> {
        match self.try_set(*props) {
            None => Ok(()),
            // handed back: the owning view is gone
            Some(_) => Err(ChoreoError::Detached),
        }
    }
}

pub fn style_signals(n: usize, base: PropertySet) -> Vec<StyleSignal> {
    (0..n).map(|_| RwSignal::new(base)).collect()
}

/// Pins shared across the page. `ready` fires whenever a pin is measured,
/// so readers that found a pin missing can try again.
#[derive(Clone, Default)]
pub struct PinContext {
    pub registry: Arc<PinRegistry>,
    pub ready: ArcTrigger,
}

impl PinContext {
    pub fn register(&self, id: &str, range: ScrollRange) {
        self.registry.register(id, range.start, range.end);
        self.ready.notify();
    }

    pub fn release(&self, id: &str) {
        if self.registry.remove(id).is_some() {
            self.ready.notify();
        }
    }
}

/// What a plan gets to look at when (re)binding.
pub struct Frame<'a> {
    pub measure: Measure,
    pub viewport: Viewport,
    pub pins: &'a PinRegistry,
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn measure(el: &web_sys::Element, scroll_y: f64, viewport_height: f64) -> Measure {
    let rect = el.get_bounding_client_rect();
    Measure {
        trigger_top: rect.top() + scroll_y,
        trigger_height: rect.height(),
        viewport_height,
    }
}

/// Drive `surfaces` from window scroll.
///
/// `plan` runs once the trigger is mounted and again on every resize or pin
/// change; if it fails with `PinNotReady` the surfaces keep their base state
/// until the pin shows up. Returns the current progress.
pub fn use_choreography<F>(
    trigger: NodeRef<html::Div>,
    surfaces: Vec<StyleSignal>,
    plan: F,
) -> Signal<f64>
where
    F: Fn(&Frame) -> Result<Plan, ChoreoError> + 'static,
{
    let pins = expect_context::<PinContext>();
    let (_, scroll_y) = use_window_scroll();
    let UseWindowSizeReturn { width, height } = use_window_size();
    let choreo = StoredValue::new_local(None::<Choreographer<StyleSignal>>);
    let progress = RwSignal::new(0.0);

    Effect::new(move |_| {
        pins.ready.track();
        let viewport = Viewport {
            width: width.get(),
            height: height.get(),
        };
        let Some(el) = trigger.get() else {
            return;
        };
        let y = scroll_y.get_untracked();
        let frame = Frame {
            measure: measure(&el, y, viewport.height),
            viewport,
            pins: &pins.registry,
        };
        let bound = Choreographer::try_bind(surfaces.clone(), plan(&frame), y);
        if let Some(p) = bound.as_ref().and_then(Choreographer::progress) {
            progress.set(p);
        }
        choreo.set_value(bound);
    });

    Effect::new(move |_| {
        let y = scroll_y.get();
        let p = choreo
            .try_update_value(|c| {
                c.as_mut().and_then(|c| {
                    c.on_scroll(y);
                    c.progress()
                })
            })
            .flatten();
        if let Some(p) = p {
            progress.set(p);
        }
    });

    progress.into()
}

/// Run wall-clock effects for the lifetime of the calling component.
///
/// `start` registers tasks once on the client; every tick's updates go to
/// `apply`. The interval is paused and the scheduler torn down on cleanup.
pub fn use_ambient<S, A>(start: S, apply: A, interval_ms: u64)
where
    S: FnOnce(&mut AmbientScheduler, f64) + 'static,
    A: Fn(AmbientUpdate) + Clone + 'static,
{
    let scheduler = StoredValue::new_local(AmbientScheduler::new());
    let start = StoredValue::new_local(Some(start));

    let Pausable { pause, .. } = use_interval_fn(
        move || {
            let updates = scheduler
                .try_update_value(|s| s.tick(now_ms()))
                .unwrap_or_default();
            for update in updates {
                apply(update);
            }
        },
        interval_ms,
    );

    Effect::new(move |_| {
        if let Some(start) = start.try_update_value(Option::take).flatten() {
            scheduler.update_value(|s| start(s, now_ms()));
        }
    });

    on_cleanup(move || {
        pause();
        let _ = scheduler.try_update_value(AmbientScheduler::teardown);
    });
}

/// True from the first time `target` scrolls into view.
pub fn use_entrance(target: NodeRef<html::Section>) -> Signal<bool> {
    let visible = use_element_visibility(target);
    let entrance = RwSignal::new(Entrance::default());
    Effect::new(move |_| {
        let seen = visible.get();
        if seen && !entrance.read_untracked().has_played() {
            entrance.update(|e| {
                e.observe(seen);
            });
        }
    });
    Signal::derive(move || entrance.read().has_played())
}
