//! Scroll choreography.
//!
//! Everything in here is a pure function of scroll progress (or, for the
//! ambient effects, of elapsed wall-clock time). Nothing touches the DOM: the
//! view layer reads scroll/viewport/layout from the host, feeds plain numbers
//! in, and pushes the resulting [`PropertySet`]s out through a [`Surface`].

pub mod ambient;
pub mod choreographer;
pub mod deck;
pub mod easing;
pub mod milestones;
pub mod pins;
pub mod progress;
pub mod props;
pub mod reveal;
pub mod text;
pub mod timeline;

pub use ambient::{
    AmbientEffect, AmbientScheduler, AmbientUpdate, KenBurns, ParticleConfig, ParticleField,
    ParticleSample,
};
pub use choreographer::{AnimatedItem, Choreographer, LayoutVariant, Plan, Surface};
pub use deck::{CardDeck, DeckConfig, DeckPlan, Viewport};
pub use easing::Ease;
pub use milestones::{entrance_delay, Entrance, Milestones};
pub use pins::{PinRegistry, TriggerRegion};
pub use progress::{Measure, ProgressSource, ScrollRange, ScrollRule};
pub use props::PropertySet;
pub use reveal::{FloatConfig, RevealConfig, SequencedReveal};
pub use timeline::{ItemPhase, Segment, Timeline, Track};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChoreoError {
    #[error("pin '{0}' has not been measured yet")]
    PinNotReady(String),
    #[error("target element is no longer attached")]
    Detached,
    #[error("invalid scroll rule: {0}")]
    InvalidRule(String),
    #[error("unknown ease: {0}")]
    InvalidEase(String),
}
