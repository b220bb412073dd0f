use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Linear interpolation between two values, exact at both ends.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

/// The animated visual properties of one element.
///
/// `x`/`y` are pixels, `y_percent` is relative to the element's own height,
/// `blur` is a radius in pixels and `rotate` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertySet {
    pub opacity: f64,
    pub blur: f64,
    pub x: f64,
    pub y: f64,
    pub y_percent: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotate: f64,
}

impl Default for PropertySet {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PropertySet {
    pub const IDENTITY: PropertySet = PropertySet {
        opacity: 1.0,
        blur: 0.0,
        x: 0.0,
        y: 0.0,
        y_percent: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        rotate: 0.0,
    };

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_blur(mut self, blur: f64) -> Self {
        self.blur = blur;
        self
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_y_percent(mut self, y_percent: f64) -> Self {
        self.y_percent = y_percent;
        self
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    pub fn with_rotate(mut self, rotate: f64) -> Self {
        self.rotate = rotate;
        self
    }

    /// Per-field linear blend; `t` is not clamped so overshooting eases carry
    /// through.
    pub fn blend(from: &PropertySet, to: &PropertySet, t: f64) -> PropertySet {
        PropertySet {
            opacity: lerp(from.opacity, to.opacity, t),
            blur: lerp(from.blur, to.blur, t),
            x: lerp(from.x, to.x, t),
            y: lerp(from.y, to.y, t),
            y_percent: lerp(from.y_percent, to.y_percent, t),
            scale_x: lerp(from.scale_x, to.scale_x, t),
            scale_y: lerp(from.scale_y, to.scale_y, t),
            rotate: lerp(from.rotate, to.rotate, t),
        }
    }

    /// Render as an inline style declaration.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        // blur can dip below zero under an overshooting ease
        let opacity = self.opacity.clamp(0.0, 1.0);
        let blur = self.blur.max(0.0);
        let _ = write!(css, "opacity:{};", round(opacity));
        let _ = write!(css, "filter:blur({}px);", round(blur));
        let _ = write!(
            css,
            "transform:translate({}px,{}px) translateY({}%) scale({},{}) rotate({}deg);",
            round(self.x),
            round(self.y),
            round(self.y_percent),
            round(self.scale_x),
            round(self.scale_y),
            round(self.rotate),
        );
        css
    }
}

fn round(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    // avoid "-0" in the output
    if r == 0.0 {
        0.0
    } else {
        r
    }
}
