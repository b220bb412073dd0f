use leptos::{html, prelude::*};
use leptos_use::{use_window_scroll, use_window_size, UseWindowSizeReturn};

use super::{
    reveal::{ScrollFloat, ScrollReveal},
    scroll::{measure, style_signals, use_choreography, PinContext},
};
use crate::choreo::{
    CardDeck, DeckConfig, Ease, LayoutVariant, Plan, PropertySet, RevealConfig, Segment,
    Timeline, Track, Viewport,
};

pub const ABOUT_PIN: &str = "aboutPin";

struct Card {
    icon: &'static str,
    title: &'static str,
    body: &'static str,
}

const CARDS: [Card; 3] = [
    Card {
        icon: "📱",
        title: "Flutter Developer",
        body: "Building cross-platform mobile applications with Flutter, creating beautiful and performant user experiences",
    },
    Card {
        icon: "🍎",
        title: "iOS Developer",
        body: "Developing native iOS applications using Swift and SwiftUI, focusing on Apple's design principles",
    },
    Card {
        icon: "🌐",
        title: "Front End Web Developer",
        body: "Creating responsive and interactive web applications using React, TypeScript, and modern web technologies",
    },
];

const INTRO: &str = "I'm a B.Tech undergrad student in Computer Science and Engineering, passionate about creating innovative mobile and web solutions. I specialize in Flutter, iOS, and front-end web development.";

/// Pinned section: the heading floats in, the intro sharpens, then the cards
/// fly in (together on wide screens, one at a time on phones).
#[component]
pub fn About(#[prop(optional)] deck: Option<DeckConfig>) -> impl IntoView {
    let deck = CardDeck::new(deck.unwrap_or_default(), CARDS.len());
    let pins = expect_context::<PinContext>();
    let section = NodeRef::<html::Div>::new();
    let (_, scroll_y) = use_window_scroll();
    let UseWindowSizeReturn { width, height } = use_window_size();

    Effect::new({
        let pins = pins.clone();
        let deck = deck.clone();
        move |_| {
            let viewport_height = height.get();
            let Some(el) = section.get() else {
                return;
            };
            let measure = measure(&el, scroll_y.get_untracked(), viewport_height);
            match deck.pin_source().resolve(&measure, &pins.registry) {
                Ok(range) => pins.register(ABOUT_PIN, range),
                Err(e) => log::warn!("couldn't measure {ABOUT_PIN}: {e}"),
            }
        }
    });
    on_cleanup(move || pins.release(ABOUT_PIN));

    // hidden until the first bind places them off-screen
    let cards = style_signals(CARDS.len(), PropertySet::IDENTITY.with_opacity(0.0));
    use_choreography(section, cards.clone(), {
        let deck = deck.clone();
        move |frame| {
            let pin = frame.pins.lookup(ABOUT_PIN)?;
            let layout = deck.variant_for(frame.viewport);
            let (range, timeline) = deck.plan(layout, frame.viewport, &pin).cards;
            Ok(Plan {
                range,
                timeline,
                layout,
            })
        }
    });

    let intro = RwSignal::new(PropertySet::IDENTITY);
    use_choreography(section, vec![intro], {
        let deck = deck.clone();
        move |frame| {
            let pin = frame.pins.lookup(ABOUT_PIN)?;
            let layout = deck.variant_for(frame.viewport);
            let plan = deck.plan(layout, frame.viewport, &pin);
            let (range, timeline) = plan.intro.unwrap_or_else(|| {
                let still = Segment::new(
                    0.0,
                    1.0,
                    PropertySet::IDENTITY,
                    PropertySet::IDENTITY,
                    Ease::Linear,
                );
                (plan.cards.0, Timeline::new(vec![Track::new(still)]))
            });
            Ok(Plan {
                range,
                timeline,
                layout,
            })
        }
    });

    let height_vh = 100.0 + deck.config.pin_length_pct;
    let compact = Signal::derive(move || {
        let viewport = Viewport {
            width: width.get(),
            height: height.get(),
        };
        deck.variant_for(viewport) == LayoutVariant::Sequential
    });

    let reveal = RevealConfig {
        base_opacity: 0.0,
        base_rotation: 0.0,
        ..Default::default()
    };

    view! {
        <section id="about" class="relative w-full bg-[#0a0a0a]">
            <div
                node_ref=section
                class="relative"
                style=format!("height:{height_vh}vh")
            >
                <div class="sticky top-0 h-screen w-full overflow-hidden">
                    <div class="absolute inset-0 z-20 px-6 flex flex-col items-center justify-center gap-6 md:gap-8">
                        <div
                            class="w-full flex flex-col items-center gap-6"
                            style=move || intro.get().to_css()
                        >
                            <ScrollFloat
                                text="About Me"
                                pin_id=ABOUT_PIN
                                pin_offsets_vh=(0.0, 40.0)
                                class="gradient-text w-full flex justify-center"
                                text_class="text-5xl sm:text-6xl md:text-7xl font-extrabold"
                            />
                            <ScrollReveal
                                text=INTRO
                                config=reveal
                                pin_id=ABOUT_PIN
                                pin_offsets_vh=(50.0, 90.0)
                                class="w-full max-w-3xl"
                                text_class="text-gray-300 text-center text-lg sm:text-xl md:text-2xl leading-relaxed"
                            />
                        </div>
                        <div class="w-full" class:deck-compact=move || compact.get()>
                            <div class="deck-grid mx-auto max-w-6xl grid grid-cols-1 md:grid-cols-3 gap-6 md:gap-8">
                                {CARDS
                                    .iter()
                                    .zip(cards)
                                    .map(|(card, style)| {
                                        view! {
                                            <div class="flex justify-center">
                                                <div
                                                    class="deck-card spotlight-card rounded-xl p-6 flex flex-col items-center text-center"
                                                    style=move || style.get().to_css()
                                                >
                                                    <div class="w-16 h-16 rounded-full bg-[#474973]/10 flex items-center justify-center mb-4 text-3xl">
                                                        {card.icon}
                                                    </div>
                                                    <h3 class="text-lg md:text-xl font-semibold mb-2">
                                                        {card.title}
                                                    </h3>
                                                    <p class="text-gray-400 text-sm md:text-base">
                                                        {card.body}
                                                    </p>
                                                </div>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}
