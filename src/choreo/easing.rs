use std::{f64::consts::PI, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ChoreoError;

/// Easing curves, named after the animation-library presets the site was
/// tuned with.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    #[default]
    Linear,
    Power1In,
    Power2In,
    Power2Out,
    SineInOut,
    BackOut(f64),
    BackInOut(f64),
}

impl Ease {
    /// Map `t` in [0, 1] onto the curve. Input outside the range is clamped.
    ///
    /// The back curves overshoot, so their output may leave [0, 1] in the
    /// middle of the range; the endpoints are always exact.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match *self {
            Ease::Linear => t,
            Ease::Power1In => t * t,
            Ease::Power2In => t * t * t,
            Ease::Power2Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Ease::BackOut(s) => {
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
            Ease::BackInOut(s) => {
                let s = s * 1.525;
                let u = t * 2.0;
                if u < 1.0 {
                    (u * u * ((s + 1.0) * u - s)) / 2.0
                } else {
                    let u = u - 2.0;
                    (u * u * ((s + 1.0) * u + s) + 2.0) / 2.0
                }
            }
        }
    }
}

fn overshoot(name: &str, prefix: &str) -> Result<f64, ChoreoError> {
    let inner = &name[prefix.len()..];
    if inner.is_empty() {
        return Ok(1.70158);
    }
    inner
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| ChoreoError::InvalidEase(name.to_string()))
}

impl FromStr for Ease {
    type Err = ChoreoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name {
            "none" | "linear" => Ok(Ease::Linear),
            "power1.in" => Ok(Ease::Power1In),
            "power2.in" => Ok(Ease::Power2In),
            "power2.out" => Ok(Ease::Power2Out),
            "sine.inOut" | "easeInOut" => Ok(Ease::SineInOut),
            x if x.starts_with("back.inOut") => overshoot(x, "back.inOut").map(Ease::BackInOut),
            x if x.starts_with("back.out") => overshoot(x, "back.out").map(Ease::BackOut),
            _ => Err(ChoreoError::InvalidEase(name.to_string())),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = ChoreoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => write!(f, "none"),
            Ease::Power1In => write!(f, "power1.in"),
            Ease::Power2In => write!(f, "power2.in"),
            Ease::Power2Out => write!(f, "power2.out"),
            Ease::SineInOut => write!(f, "sine.inOut"),
            Ease::BackOut(s) => write!(f, "back.out({s})"),
            Ease::BackInOut(s) => write!(f, "back.inOut({s})"),
        }
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.to_string()
    }
}
