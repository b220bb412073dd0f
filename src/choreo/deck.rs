use serde::{Deserialize, Serialize};

use super::{
    choreographer::LayoutVariant,
    easing::Ease,
    pins::TriggerRegion,
    progress::{Edge, Length, ProgressSource, ScrollRange, ScrollRule},
    props::PropertySet,
    reveal::SequencedReveal,
    timeline::{Segment, Timeline, Track},
};

const TOP: Edge = Edge {
    base: Length::Percent(0.0),
    offset: Length::Px(0.0),
};

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Tuning for the pinned card deck. Windows are in viewport heights past the
/// pin's start; travel distances are in viewport widths/heights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub breakpoint: f64,
    /// How long the section stays pinned, in percent of viewport height.
    pub pin_length_pct: f64,
    pub offscreen_x: f64,
    pub offscreen_y: f64,
    pub wide_window: (f64, f64),
    pub compact_intro: (f64, f64),
    pub compact_window: (f64, f64),
    pub move_units: f64,
    pub gap_units: f64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            pin_length_pct: 240.0,
            offscreen_x: 1.1,
            offscreen_y: 0.9,
            wide_window: (1.0, 1.55),
            compact_intro: (0.8, 1.2),
            compact_window: (1.2, 2.4),
            move_units: 1.0,
            gap_units: 0.2,
        }
    }
}

/// Everything a bound deck needs: where each choreography runs, and what
/// it does there.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckPlan {
    pub variant: LayoutVariant,
    pub cards: (ScrollRange, Timeline),
    /// Compact layouts slide the intro copy away before the first card.
    pub intro: Option<(ScrollRange, Timeline)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardDeck {
    pub config: DeckConfig,
    pub cards: usize,
}

impl CardDeck {
    pub fn new(config: DeckConfig, cards: usize) -> Self {
        Self { config, cards }
    }

    pub fn variant_for(&self, viewport: Viewport) -> LayoutVariant {
        LayoutVariant::for_viewport(viewport.width, self.config.breakpoint)
    }

    /// The pin itself: from the section's top reaching the viewport top, for
    /// `pin_length_pct` of the viewport height.
    pub fn pin_source(&self) -> ProgressSource {
        ProgressSource::new(
            ScrollRule::Anchor {
                trigger: TOP,
                viewport: TOP,
            },
            ScrollRule::Relative(Length::Percent(self.config.pin_length_pct)),
        )
    }

    /// Off-screen starting position of card `i`: left, below, right, repeating.
    pub fn start_position(&self, i: usize, viewport: Viewport) -> PropertySet {
        let dx = viewport.width * self.config.offscreen_x;
        let dy = viewport.height * self.config.offscreen_y;
        let (x, y) = match i % 3 {
            0 => (-dx, 0.0),
            1 => (0.0, dy),
            _ => (dx, 0.0),
        };
        PropertySet::IDENTITY.with_offset(x, y)
    }

    pub fn plan(&self, variant: LayoutVariant, viewport: Viewport, pin: &TriggerRegion) -> DeckPlan {
        let vh = viewport.height;
        let window = |(a, b): (f64, f64)| ScrollRange::new(pin.start + a * vh, pin.start + b * vh);
        let from = (0..self.cards)
            .map(|i| self.start_position(i, viewport))
            .collect::<Vec<_>>();
        match variant {
            LayoutVariant::Simultaneous => {
                let timeline = SequencedReveal::stagger(0.0).timeline(
                    &from,
                    PropertySet::IDENTITY,
                    PropertySet::IDENTITY,
                    Ease::Linear,
                );
                DeckPlan {
                    variant,
                    cards: (window(self.config.wide_window), timeline),
                    intro: None,
                }
            }
            LayoutVariant::Sequential => {
                let out = PropertySet::IDENTITY.with_offset(0.0, -vh);
                let timeline = SequencedReveal::sequential(
                    self.config.move_units,
                    self.config.move_units,
                    self.config.gap_units,
                )
                .timeline(&from, PropertySet::IDENTITY, out, Ease::Linear);
                let intro = Timeline::new(vec![Track::new(Segment::new(
                    0.0,
                    1.0,
                    PropertySet::IDENTITY,
                    out,
                    Ease::Linear,
                ))]);
                DeckPlan {
                    variant,
                    cards: (window(self.config.compact_window), timeline),
                    intro: Some((window(self.config.compact_intro), intro)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreo::{
        choreographer::{tests::MockSurface, Choreographer},
        pins::PinRegistry,
        progress::Measure,
        timeline::ItemPhase,
    };

    const PHONE: Viewport = Viewport {
        width: 400.0,
        height: 800.0,
    };
    const DESKTOP: Viewport = Viewport {
        width: 1440.0,
        height: 900.0,
    };

    fn pin() -> TriggerRegion {
        TriggerRegion {
            id: "aboutPin".to_string(),
            start: 1000.0,
            end: 3000.0,
        }
    }

    #[test]
    fn test_variant_selection() {
        let deck = CardDeck::new(DeckConfig::default(), 3);
        assert_eq!(deck.variant_for(PHONE), LayoutVariant::Sequential);
        assert_eq!(deck.variant_for(DESKTOP), LayoutVariant::Simultaneous);
    }

    #[test]
    fn test_pin_source_spans_pin_length() {
        let deck = CardDeck::new(DeckConfig::default(), 3);
        let measure = Measure {
            trigger_top: 1000.0,
            trigger_height: 3000.0,
            viewport_height: 800.0,
        };
        let range = deck
            .pin_source()
            .resolve(&measure, &PinRegistry::new())
            .unwrap();
        assert_eq!(range, ScrollRange::new(1000.0, 2920.0));
    }

    #[test]
    fn test_start_positions() {
        let deck = CardDeck::new(DeckConfig::default(), 3);
        let p0 = deck.start_position(0, DESKTOP);
        let p1 = deck.start_position(1, DESKTOP);
        let p2 = deck.start_position(2, DESKTOP);
        assert!((p0.x + 1584.0).abs() < 1e-9 && p0.y == 0.0);
        assert!(p1.x == 0.0 && (p1.y - 810.0).abs() < 1e-9);
        assert!((p2.x - 1584.0).abs() < 1e-9 && p2.y == 0.0);
    }

    #[test]
    fn test_wide_plan_is_simultaneous() {
        let deck = CardDeck::new(DeckConfig::default(), 3);
        let plan = deck.plan(LayoutVariant::Simultaneous, DESKTOP, &pin());
        assert!(plan.intro.is_none());
        let (range, timeline) = &plan.cards;
        assert!((range.start - 1900.0).abs() < 1e-9);
        assert!((range.end - 2395.0).abs() < 1e-9);
        for track in &timeline.tracks {
            assert_eq!(track.enter().start, 0.0);
            assert_eq!(track.enter().end, 1.0);
            assert_eq!(track.sample(1.0), PropertySet::IDENTITY);
        }
    }

    #[test]
    fn test_compact_plan_is_sequential() {
        let deck = CardDeck::new(DeckConfig::default(), 3);
        let plan = deck.plan(LayoutVariant::Sequential, PHONE, &pin());
        let approx = |a: f64, b: f64| (a - b).abs() < 1e-9;
        let (intro_range, _) = plan.intro.as_ref().unwrap();
        assert!(approx(intro_range.start, 1640.0) && approx(intro_range.end, 1960.0));

        let (range, timeline) = plan.cards.clone();
        assert!(approx(range.start, 1960.0) && approx(range.end, 2920.0));

        let surfaces = (0..3).map(|_| MockSurface::default()).collect::<Vec<_>>();
        let mut choreo = Choreographer::bind(surfaces.clone(), range, timeline, plan.variant);

        // first card halfway in from the left, the others still off-screen
        choreo.on_scroll(range.start + 0.5 * (range.end - range.start) / 5.4);
        assert_eq!(choreo.items()[0].phase(), ItemPhase::Entering);
        assert!(approx(surfaces[0].last().unwrap().x, -220.0));
        assert!(approx(surfaces[1].last().unwrap().y, 720.0));
        assert_eq!(choreo.items()[2].phase(), ItemPhase::Inactive);

        // end of the pin: the last card holds at centre, earlier ones are gone
        choreo.on_scroll(range.end);
        assert_eq!(surfaces[0].last().unwrap().y, -800.0);
        assert_eq!(surfaces[1].last().unwrap().y, -800.0);
        assert_eq!(surfaces[2].last().unwrap(), PropertySet::IDENTITY);
        assert_eq!(choreo.items()[2].phase(), ItemPhase::Active);
    }
}
