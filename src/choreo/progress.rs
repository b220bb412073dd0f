use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{pins::PinRegistry, ChoreoError};

/// A read-only layout snapshot, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measure {
    pub trigger_top: f64,
    pub trigger_height: f64,
    pub viewport_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    fn resolve(&self, size: f64) -> f64 {
        match *self {
            Length::Px(px) => px,
            Length::Percent(pct) => size * pct / 100.0,
        }
    }

    fn negate(self) -> Self {
        match self {
            Length::Px(px) => Length::Px(-px),
            Length::Percent(pct) => Length::Percent(-pct),
        }
    }
}

impl FromStr for Length {
    type Err = ChoreoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChoreoError::InvalidRule(s.to_string());
        let s = s.trim();
        if let Some(n) = s.strip_suffix('%') {
            n.parse().map(Length::Percent).map_err(|_| invalid())
        } else {
            s.strip_suffix("px")
                .unwrap_or(s)
                .parse()
                .map(Length::Px)
                .map_err(|_| invalid())
        }
    }
}

/// A point on either the trigger or the viewport, e.g. `bottom-=20%`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub base: Length,
    pub offset: Length,
}

impl Edge {
    fn resolve(&self, size: f64) -> f64 {
        self.base.resolve(size) + self.offset.resolve(size)
    }
}

impl FromStr for Edge {
    type Err = ChoreoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, offset) = match s.find("+=").or_else(|| s.find("-=")) {
            Some(i) if i > 0 => {
                let offset: Length = s[i + 2..].parse()?;
                let offset = if &s[i..i + 1] == "-" {
                    offset.negate()
                } else {
                    offset
                };
                (&s[..i], offset)
            }
            Some(_) => return Err(ChoreoError::InvalidRule(s.to_string())),
            None => (s, Length::Px(0.0)),
        };
        let base = match base {
            "top" => Length::Percent(0.0),
            "center" => Length::Percent(50.0),
            "bottom" => Length::Percent(100.0),
            other => other.parse()?,
        };
        Ok(Edge { base, offset })
    }
}

/// Where a scroll window starts or ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScrollRule {
    /// "`trigger` point of the trigger reaches `viewport` point of the viewport".
    Anchor { trigger: Edge, viewport: Edge },
    /// `+=N%` / `+=Npx` from the resolved start; only valid as an end rule.
    /// Percentages are of the viewport height.
    Relative(Length),
    Absolute(f64),
    /// A registered pin's start plus a percentage of viewport height.
    Pinned { pin: String, offset_vh: f64 },
}

impl ScrollRule {
    pub fn pinned(pin: impl Into<String>, offset_vh: f64) -> Self {
        ScrollRule::Pinned {
            pin: pin.into(),
            offset_vh,
        }
    }

    fn resolve(&self, measure: &Measure, pins: &PinRegistry) -> Result<f64, ChoreoError> {
        match self {
            ScrollRule::Anchor { trigger, viewport } => Ok(measure.trigger_top
                + trigger.resolve(measure.trigger_height)
                - viewport.resolve(measure.viewport_height)),
            ScrollRule::Relative(_) => Err(ChoreoError::InvalidRule(
                "relative rule used as a start".to_string(),
            )),
            ScrollRule::Absolute(px) => Ok(*px),
            ScrollRule::Pinned { pin, offset_vh } => {
                let region = pins.lookup(pin)?;
                Ok(region.start + measure.viewport_height * offset_vh / 100.0)
            }
        }
    }
}

impl FromStr for ScrollRule {
    type Err = ChoreoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix("+=") {
            return rest.parse().map(ScrollRule::Relative);
        }
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(trigger), Some(viewport), None) => Ok(ScrollRule::Anchor {
                trigger: trigger.parse()?,
                viewport: viewport.parse()?,
            }),
            (Some(px), None, None) => px
                .parse()
                .map(ScrollRule::Absolute)
                .map_err(|_| ChoreoError::InvalidRule(s.to_string())),
            _ => Err(ChoreoError::InvalidRule(s.to_string())),
        }
    }
}

/// A start/end pair of rules that together produce progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSource {
    pub start: ScrollRule,
    pub end: ScrollRule,
}

impl ProgressSource {
    pub fn new(start: ScrollRule, end: ScrollRule) -> Self {
        Self { start, end }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ChoreoError> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    /// Sync to a pin: the window is `[pin.start + start_vh%, pin.start + end_vh%]`.
    pub fn pinned(pin: &str, start_vh: f64, end_vh: f64) -> Self {
        Self::new(
            ScrollRule::pinned(pin, start_vh),
            ScrollRule::pinned(pin, end_vh),
        )
    }

    /// Resolve both rules to absolute offsets.
    ///
    /// Fails with [`ChoreoError::PinNotReady`] if a referenced pin has not
    /// been registered; callers should hold their base state and retry once
    /// the registry changes rather than resolving against zero.
    pub fn resolve(&self, measure: &Measure, pins: &PinRegistry) -> Result<ScrollRange, ChoreoError> {
        let start = self.start.resolve(measure, pins)?;
        let end = match &self.end {
            ScrollRule::Relative(len) => start + len.resolve(measure.viewport_height),
            rule => rule.resolve(measure, pins)?,
        };
        Ok(ScrollRange { start, end })
    }
}

/// Resolved scroll bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRange {
    pub start: f64,
    pub end: f64,
}

impl ScrollRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Normalized progress of `offset` through the range, clamped to [0, 1].
    pub fn progress(&self, offset: f64) -> f64 {
        let len = self.end - self.start;
        if len <= 0.0 {
            return if offset >= self.start { 1.0 } else { 0.0 };
        }
        ((offset - self.start) / len).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure() -> Measure {
        Measure {
            trigger_top: 2000.0,
            trigger_height: 500.0,
            viewport_height: 800.0,
        }
    }

    #[test]
    fn test_parse_anchor() {
        let rule: ScrollRule = "top bottom-=20%".parse().unwrap();
        assert_eq!(
            rule,
            ScrollRule::Anchor {
                trigger: Edge {
                    base: Length::Percent(0.0),
                    offset: Length::Px(0.0)
                },
                viewport: Edge {
                    base: Length::Percent(100.0),
                    offset: Length::Percent(-20.0)
                },
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("top".parse::<ScrollRule>().is_err());
        assert!("top bottom center".parse::<ScrollRule>().is_err());
        assert!("middle top".parse::<ScrollRule>().is_err());
        assert!("+=lots".parse::<ScrollRule>().is_err());
        assert!("-=20% top".parse::<ScrollRule>().is_err());
    }

    #[test]
    fn test_anchor_offsets() {
        let pins = PinRegistry::new();
        let m = measure();
        let resolve = |s: &str| s.parse::<ScrollRule>().unwrap().resolve(&m, &pins).unwrap();
        assert_eq!(resolve("top top"), 2000.0);
        assert_eq!(resolve("top bottom"), 1200.0);
        assert_eq!(resolve("top center"), 1600.0);
        assert_eq!(resolve("bottom bottom"), 1700.0);
        assert_eq!(resolve("top bottom-=20%"), 1360.0);
        assert_eq!(resolve("top+=40% top"), 2200.0);
        assert_eq!(resolve("center bottom+=50%"), 1050.0);
        assert_eq!(resolve("top+=100px top"), 2100.0);
        assert_eq!(resolve("1234"), 1234.0);
    }

    #[test]
    fn test_relative_end() {
        let pins = PinRegistry::new();
        let source = ProgressSource::parse("top top", "+=240%").unwrap();
        let range = source.resolve(&measure(), &pins).unwrap();
        assert_eq!(range, ScrollRange::new(2000.0, 3920.0));
    }

    #[test]
    fn test_relative_start_is_rejected() {
        let pins = PinRegistry::new();
        let source = ProgressSource::parse("+=10%", "top top").unwrap();
        assert!(matches!(
            source.resolve(&measure(), &pins),
            Err(ChoreoError::InvalidRule(_))
        ));
    }

    #[test]
    fn test_pinned_not_ready_then_ready() {
        let pins = PinRegistry::new();
        let source = ProgressSource::pinned("aboutPin", 50.0, 90.0);
        assert_eq!(
            source.resolve(&measure(), &pins),
            Err(ChoreoError::PinNotReady("aboutPin".to_string()))
        );

        pins.register("aboutPin", 1000.0, 3000.0);
        let range = source.resolve(&measure(), &pins).unwrap();
        assert_eq!(range, ScrollRange::new(1400.0, 1720.0));
    }

    #[test]
    fn test_progress_clamped_and_monotonic() {
        let range = ScrollRange::new(100.0, 300.0);
        assert_eq!(range.progress(0.0), 0.0);
        assert_eq!(range.progress(100.0), 0.0);
        assert_eq!(range.progress(200.0), 0.5);
        assert_eq!(range.progress(300.0), 1.0);
        assert_eq!(range.progress(10_000.0), 1.0);

        let mut prev = 0.0;
        for offset in (0..400).step_by(7) {
            let p = range.progress(offset as f64);
            assert!(p >= prev);
            prev = p;
        }
    }

    #[test]
    fn test_degenerate_range_is_a_step() {
        let range = ScrollRange::new(500.0, 500.0);
        assert_eq!(range.progress(499.0), 0.0);
        assert_eq!(range.progress(500.0), 1.0);
    }
}
