use serde::{Deserialize, Serialize};

use super::{
    easing::Ease,
    props::PropertySet,
    timeline::{Segment, Timeline, Track},
};

/// Word-by-word paragraph reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub base_opacity: f64,
    pub enable_blur: bool,
    pub blur_strength: f64,
    /// Tilt of the whole block before it settles; 0 disables the tilt.
    pub base_rotation: f64,
    pub stagger: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            base_opacity: 0.1,
            enable_blur: true,
            blur_strength: 4.0,
            base_rotation: 3.0,
            stagger: 0.05,
        }
    }
}

impl RevealConfig {
    pub fn hidden(&self) -> PropertySet {
        let blur = if self.enable_blur {
            self.blur_strength
        } else {
            0.0
        };
        PropertySet::IDENTITY
            .with_opacity(self.base_opacity)
            .with_blur(blur)
    }

    /// One track per word.
    pub fn timeline(&self, words: usize) -> Timeline {
        SequencedReveal::stagger(self.stagger).timeline(
            &vec![self.hidden(); words],
            PropertySet::IDENTITY,
            PropertySet::IDENTITY,
            Ease::Linear,
        )
    }

    /// The block tilt, if any.
    pub fn tilt(&self) -> Option<Track> {
        if self.base_rotation == 0.0 {
            return None;
        }
        Some(Track::new(Segment::new(
            0.0,
            1.0,
            PropertySet::IDENTITY.with_rotate(self.base_rotation),
            PropertySet::IDENTITY,
            Ease::Linear,
        )))
    }
}

/// Character float-in for headings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatConfig {
    pub from: PropertySet,
    pub ease: Ease,
    pub stagger: f64,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            from: PropertySet::IDENTITY
                .with_opacity(0.0)
                .with_y_percent(200.0)
                .with_scale(0.5, 3.0)
                .with_blur(10.0),
            ease: Ease::BackInOut(2.0),
            stagger: 0.03,
        }
    }
}

impl FloatConfig {
    pub fn timeline(&self, chars: usize) -> Timeline {
        SequencedReveal::stagger(self.stagger).timeline(
            &vec![self.from; chars],
            PropertySet::IDENTITY,
            PropertySet::IDENTITY,
            self.ease,
        )
    }
}

/// The slice of the progress window one item occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealWindow {
    pub enter: (f64, f64),
    pub exit: Option<(f64, f64)>,
}

/// Staged per-item reveal driven by one progress value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SequencedReveal {
    /// Every item animates for one unit, item `i` shifted by `i * stagger`
    /// units; the whole run is normalized into [0, 1].
    Stagger { stagger: f64 },
    /// Items take turns: `enter`, then `exit`, then an empty `gap`. The last
    /// item enters and holds.
    Sequential { enter: f64, exit: f64, gap: f64 },
}

impl SequencedReveal {
    pub fn stagger(stagger: f64) -> Self {
        SequencedReveal::Stagger { stagger }
    }

    pub fn sequential(enter: f64, exit: f64, gap: f64) -> Self {
        SequencedReveal::Sequential { enter, exit, gap }
    }

    pub fn windows(&self, n: usize) -> Vec<RevealWindow> {
        if n == 0 {
            return Vec::new();
        }
        let scale = |a: f64, b: f64, total: f64| {
            if total <= 0.0 {
                (0.0, 0.0)
            } else {
                (a / total, b / total)
            }
        };
        match *self {
            SequencedReveal::Stagger { stagger } => {
                let stagger = stagger.max(0.0);
                let total = 1.0 + (n - 1) as f64 * stagger;
                (0..n)
                    .map(|i| {
                        let start = i as f64 * stagger;
                        RevealWindow {
                            enter: scale(start, start + 1.0, total),
                            exit: None,
                        }
                    })
                    .collect()
            }
            SequencedReveal::Sequential { enter, exit, gap } => {
                let (enter, exit, gap) = (enter.max(0.0), exit.max(0.0), gap.max(0.0));
                let total = n as f64 * enter + (n - 1) as f64 * (exit + gap);
                let mut cursor = 0.0;
                (0..n)
                    .map(|i| {
                        let last = i + 1 == n;
                        // pin the final entrance to the end of the window
                        let end = if last { total } else { cursor + enter };
                        let window_enter = scale(cursor, end, total);
                        cursor += enter;
                        let window_exit = if !last {
                            let w = scale(cursor, cursor + exit, total);
                            cursor += exit + gap;
                            Some(w)
                        } else {
                            None
                        };
                        RevealWindow {
                            enter: window_enter,
                            exit: window_exit,
                        }
                    })
                    .collect()
            }
        }
    }

    /// Build one track per entry of `from`: enter `from[i] -> to`, and in
    /// sequential mode exit `to -> exit_to`.
    pub fn timeline(&self, from: &[PropertySet], to: PropertySet, exit_to: PropertySet, ease: Ease) -> Timeline {
        let tracks = self
            .windows(from.len())
            .into_iter()
            .zip(from.iter())
            .map(|(window, from)| {
                let (start, end) = window.enter;
                let track = Track::new(Segment::new(start, end, *from, to, ease));
                match window.exit {
                    Some((start, end)) => {
                        track.then_exit(Segment::new(start, end, to, exit_to, ease))
                    }
                    None => track,
                }
            })
            .collect();
        Timeline::new(tracks)
    }
}
