use leptos::{html, prelude::*};

use super::scroll::{style_signals, use_choreography, Frame, StyleSignal};
use crate::choreo::{
    text::{is_space, split_chars, split_words},
    ChoreoError, FloatConfig, LayoutVariant, Plan, ProgressSource, PropertySet, RevealConfig,
    ScrollRange, Timeline,
};

/// Either rule strings against the trigger, or a window synced to a pin.
#[derive(Debug, Clone)]
struct Window {
    pin: Option<(String, (f64, f64))>,
    start: &'static str,
    end: &'static str,
}

impl Window {
    fn resolve(&self, frame: &Frame) -> Result<ScrollRange, ChoreoError> {
        let source = match &self.pin {
            Some((pin, (start_vh, end_vh))) => ProgressSource::pinned(pin, *start_vh, *end_vh),
            None => ProgressSource::parse(self.start, self.end)?,
        };
        source.resolve(&frame.measure, frame.pins)
    }
}

fn bind(node: NodeRef<html::Div>, surfaces: Vec<StyleSignal>, window: Window, timeline: Timeline) {
    use_choreography(node, surfaces, move |frame| {
        Ok(Plan {
            range: window.resolve(frame)?,
            timeline: timeline.clone(),
            layout: LayoutVariant::Simultaneous,
        })
    });
}

/// Paragraph that sharpens word by word as it scrolls in.
///
/// With `pin_id` set the window is `[pin.start + start_vh, pin.start + end_vh]`
/// and nothing animates until that pin has been measured.
#[component]
pub fn ScrollReveal(
    #[prop(into)] text: String,
    #[prop(optional)] config: Option<RevealConfig>,
    #[prop(optional, into)] pin_id: Option<String>,
    #[prop(default = (50.0, 90.0))] pin_offsets_vh: (f64, f64),
    #[prop(default = "top bottom-=20%")] word_start: &'static str,
    #[prop(default = "bottom bottom")] word_end: &'static str,
    #[prop(default = "top bottom")] rotation_start: &'static str,
    #[prop(default = "bottom bottom")] rotation_end: &'static str,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] text_class: String,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let node = NodeRef::<html::Div>::new();
    let segments = split_words(&text)
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let word_count = segments.iter().filter(|s| !is_space(s)).count();
    let words = style_signals(word_count, config.hidden());
    let pin = pin_id.map(|id| (id, pin_offsets_vh));

    bind(
        node,
        words.clone(),
        Window {
            pin: pin.clone(),
            start: word_start,
            end: word_end,
        },
        config.timeline(word_count),
    );

    let tilt = RwSignal::new(PropertySet::IDENTITY);
    if let Some(track) = config.tilt() {
        tilt.set(track.sample(0.0));
        bind(
            node,
            vec![tilt],
            Window {
                pin,
                start: rotation_start,
                end: rotation_end,
            },
            Timeline::new(vec![track]),
        );
    }

    let mut next = words.into_iter();
    let spans = segments
        .into_iter()
        .map(|segment| {
            if is_space(&segment) {
                return segment.into_any();
            }
            match next.next() {
                Some(style) => view! {
                    <span class="word" style=move || style.get().to_css()>
                        {segment}
                    </span>
                }
                .into_any(),
                None => segment.into_any(),
            }
        })
        .collect_view();

    view! {
        <div
            node_ref=node
            class=format!("scroll-reveal {class}")
            style=move || tilt.get().to_css()
        >
            <p class=format!("scroll-reveal-text {text_class}")>{spans}</p>
        </div>
    }
}

/// Heading whose letters float up into place.
#[component]
pub fn ScrollFloat(
    #[prop(into)] text: String,
    #[prop(optional)] config: Option<FloatConfig>,
    #[prop(optional, into)] pin_id: Option<String>,
    #[prop(default = (0.0, 40.0))] pin_offsets_vh: (f64, f64),
    #[prop(default = "center bottom+=50%")] start: &'static str,
    #[prop(default = "bottom bottom-=40%")] end: &'static str,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] text_class: String,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let node = NodeRef::<html::Div>::new();
    let chars = split_chars(&text);
    let letters = style_signals(chars.len(), config.from);

    bind(
        node,
        letters.clone(),
        Window {
            pin: pin_id.map(|id| (id, pin_offsets_vh)),
            start,
            end,
        },
        config.timeline(chars.len()),
    );

    let spans = chars
        .into_iter()
        .zip(letters)
        .map(|(c, style)| {
            view! {
                <span class="char" style=move || style.get().to_css()>
                    {c.to_string()}
                </span>
            }
        })
        .collect_view();

    view! {
        <div node_ref=node class=format!("scroll-float {class}")>
            <h2 class=format!("scroll-float-text {text_class}")>{spans}</h2>
        </div>
    }
}
