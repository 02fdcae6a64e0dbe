//! Blend library: image-editor style operators that combine an existing
//! (destination) color with an incoming (source) color at a given factor.
//!
//! Every function takes `(destination, source, factor)` in linear space. Most
//! modes compute a fully blended color and then move from the destination
//! toward it by `factor` with [`blend_mix`]. Add, Subtract, LinearBurn and
//! LinearLight scale the source term by `factor` instead. The four HSV modes
//! ignore `factor` entirely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;
use crate::space::Linear;

/// Smallest divisor allowed when a formula divides by a source channel.
const MIN_DIVISOR: f64 = 1e-10;
/// Largest source channel allowed when a formula divides by `1 - source`.
const MAX_DIVIDEND_SOURCE: f64 = 1.0 - 1e-10;
/// HSV modes leave colors at or below this saturation alone.
const GRAY_SATURATION: f64 = 0.0005;

/// `clamp((1 - t)·a + t·b)`.
pub fn blend_mix(dst: Color, src: Color, factor: f64) -> Color {
    ((1.0 - factor) * dst + factor * src).clamp01()
}

/// Linear dodge.
pub fn blend_add(dst: Color, src: Color, factor: f64) -> Color {
    (dst + factor * src).clamp01()
}

pub fn blend_subtract(dst: Color, src: Color, factor: f64) -> Color {
    (dst - factor * src).clamp01()
}

pub fn blend_multiply(dst: Color, src: Color, factor: f64) -> Color {
    blend_mix(dst, dst * src, factor)
}

pub fn blend_screen(dst: Color, src: Color, factor: f64) -> Color {
    let full = dst.zip_map(src, |o, b| 1.0 - (1.0 - o) * (1.0 - b));
    blend_mix(dst, full, factor)
}

pub fn blend_lighten(dst: Color, src: Color, factor: f64) -> Color {
    blend_mix(dst, dst.zip_map(src, f64::max), factor)
}

pub fn blend_darken(dst: Color, src: Color, factor: f64) -> Color {
    blend_mix(dst, dst.zip_map(src, f64::min), factor)
}

pub fn blend_color_dodge(dst: Color, src: Color, factor: f64) -> Color {
    let full = dst.zip_map(src, |o, b| o / (1.0 - b.min(MAX_DIVIDEND_SOURCE)));
    blend_mix(dst, full, factor)
}

pub fn blend_color_burn(dst: Color, src: Color, factor: f64) -> Color {
    let full = dst.zip_map(src, |o, b| 1.0 - (1.0 - o) / b.max(MIN_DIVISOR));
    blend_mix(dst, full, factor)
}

pub fn blend_linear_burn(dst: Color, src: Color, factor: f64) -> Color {
    (dst + factor * (src - Color::WHITE)).clamp01()
}

pub fn blend_overlay(dst: Color, src: Color, factor: f64) -> Color {
    let full = dst.zip_map(src, |o, b| {
        if o > 0.5 {
            1.0 - 2.0 * (1.0 - o) * (1.0 - b)
        } else {
            2.0 * o * b
        }
    });
    blend_mix(dst, full, factor)
}

/// Overlay with the roles of the two layers swapped in the test.
pub fn blend_hard_light(dst: Color, src: Color, factor: f64) -> Color {
    let full = dst.zip_map(src, |o, b| {
        if b > 0.5 {
            1.0 - 2.0 * (1.0 - o) * (1.0 - b)
        } else {
            2.0 * o * b
        }
    });
    blend_mix(dst, full, factor)
}

pub fn blend_soft_light(dst: Color, src: Color, factor: f64) -> Color {
    let full = dst.zip_map(src, |o, b| {
        if b > 0.5 {
            1.0 - (1.0 - o) * (1.5 - b)
        } else {
            o * (b + 0.5)
        }
    });
    blend_mix(dst, full, factor)
}

pub fn blend_pin_light(dst: Color, src: Color, factor: f64) -> Color {
    let full = dst.zip_map(src, |o, b| {
        if b > 0.5 {
            o.max(2.0 * b - 1.0)
        } else {
            o.min(2.0 * b)
        }
    });
    blend_mix(dst, full, factor)
}

pub fn blend_vivid_light(dst: Color, src: Color, factor: f64) -> Color {
    let full = dst.zip_map(src, |o, b| {
        if b > 0.5 {
            o / (2.0 * (1.0 - b.min(MAX_DIVIDEND_SOURCE)))
        } else {
            1.0 - (1.0 - o) / (2.0 * b.max(MIN_DIVISOR))
        }
    });
    blend_mix(dst, full, factor)
}

pub fn blend_linear_light(dst: Color, src: Color, factor: f64) -> Color {
    (dst + factor * (2.0 * src - Color::WHITE)).clamp01()
}

pub fn blend_difference(dst: Color, src: Color, factor: f64) -> Color {
    blend_mix(dst, dst.zip_map(src, |o, b| (o - b).abs()), factor)
}

pub fn blend_exclusion(dst: Color, src: Color, factor: f64) -> Color {
    blend_mix(dst, dst.zip_map(src, |o, b| o + b - 2.0 * o * b), factor)
}

/// Source hue and saturation at the destination's value. Ignores `factor`.
pub fn blend_color(dst: Color, src: Color, _factor: f64) -> Color {
    src.with_value(dst.to_hsv().v)
}

/// Destination with the source's hue. Ignores `factor`.
pub fn blend_hue(dst: Color, src: Color, _factor: f64) -> Color {
    dst.with_hue(src.to_hsv().h)
}

/// Destination with the source's saturation, unless the destination is
/// (near) gray. Ignores `factor`.
pub fn blend_saturation(dst: Color, src: Color, _factor: f64) -> Color {
    if dst.to_hsv().s > GRAY_SATURATION {
        dst.with_saturation(src.to_hsv().s)
    } else {
        dst
    }
}

/// Destination with the source's value. Ignores `factor`.
pub fn blend_luminosity(dst: Color, src: Color, _factor: f64) -> Color {
    dst.with_value(src.to_hsv().v)
}

// ---------------------------------------------------------------------------
// BlendMode
// ---------------------------------------------------------------------------

/// A blend function: `(destination, source, factor) -> result`.
pub type BlendFn = fn(Color, Color, f64) -> Color;

/// How an incoming color is combined with the color already stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendMode {
    /// Overwrite the destination; factor is ignored.
    #[default]
    Replace,
    Mix,
    Add,
    Subtract,
    Multiply,
    Screen,
    Lighten,
    Darken,
    ColorDodge,
    ColorBurn,
    LinearBurn,
    Overlay,
    HardLight,
    SoftLight,
    PinLight,
    VividLight,
    LinearLight,
    Difference,
    Exclusion,
    Color,
    Hue,
    Saturation,
    Luminosity,
}

impl BlendMode {
    /// Every mode in declaration order.
    pub const ALL: [BlendMode; 23] = [
        Self::Replace,
        Self::Mix,
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Screen,
        Self::Lighten,
        Self::Darken,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::LinearBurn,
        Self::Overlay,
        Self::HardLight,
        Self::SoftLight,
        Self::PinLight,
        Self::VividLight,
        Self::LinearLight,
        Self::Difference,
        Self::Exclusion,
        Self::Color,
        Self::Hue,
        Self::Saturation,
        Self::Luminosity,
    ];

    /// Upper-case identifier, e.g. `"COLORDODGE"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Replace => "REPLACE",
            Self::Mix => "MIX",
            Self::Add => "ADD",
            Self::Subtract => "SUBTRACT",
            Self::Multiply => "MULTIPLY",
            Self::Screen => "SCREEN",
            Self::Lighten => "LIGHTEN",
            Self::Darken => "DARKEN",
            Self::ColorDodge => "COLORDODGE",
            Self::ColorBurn => "COLORBURN",
            Self::LinearBurn => "LINEARBURN",
            Self::Overlay => "OVERLAY",
            Self::HardLight => "HARDLIGHT",
            Self::SoftLight => "SOFTLIGHT",
            Self::PinLight => "PINLIGHT",
            Self::VividLight => "VIVIDLIGHT",
            Self::LinearLight => "LINEARLIGHT",
            Self::Difference => "DIFFERENCE",
            Self::Exclusion => "EXCLUSION",
            Self::Color => "COLOR",
            Self::Hue => "HUE",
            Self::Saturation => "SATURATION",
            Self::Luminosity => "LUMINOSITY",
        }
    }

    /// The blend function for this mode, or `None` for [`BlendMode::Replace`].
    pub fn function(self) -> Option<BlendFn> {
        let f: BlendFn = match self {
            Self::Replace => return None,
            Self::Mix => blend_mix,
            Self::Add => blend_add,
            Self::Subtract => blend_subtract,
            Self::Multiply => blend_multiply,
            Self::Screen => blend_screen,
            Self::Lighten => blend_lighten,
            Self::Darken => blend_darken,
            Self::ColorDodge => blend_color_dodge,
            Self::ColorBurn => blend_color_burn,
            Self::LinearBurn => blend_linear_burn,
            Self::Overlay => blend_overlay,
            Self::HardLight => blend_hard_light,
            Self::SoftLight => blend_soft_light,
            Self::PinLight => blend_pin_light,
            Self::VividLight => blend_vivid_light,
            Self::LinearLight => blend_linear_light,
            Self::Difference => blend_difference,
            Self::Exclusion => blend_exclusion,
            Self::Color => blend_color,
            Self::Hue => blend_hue,
            Self::Saturation => blend_saturation,
            Self::Luminosity => blend_luminosity,
        };
        Some(f)
    }

    /// Returns `true` for Color, Hue, Saturation and Luminosity.
    pub fn is_hsv(self) -> bool {
        matches!(
            self,
            Self::Color | Self::Hue | Self::Saturation | Self::Luminosity
        )
    }

    /// Returns `false` for modes that apply fully whatever the factor is:
    /// Replace and the HSV modes.
    pub fn uses_factor(self) -> bool {
        !(self == Self::Replace || self.is_hsv())
    }

    /// Combines two linear colors. Replace returns `src` unchanged.
    pub fn apply(self, dst: Linear, src: Linear, factor: f64) -> Linear {
        match self.function() {
            Some(f) => Linear::new(f(dst.color(), src.color(), factor)),
            None => src,
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no blend mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown blend mode: {0:?}")]
pub struct ParseBlendModeError(pub String);

impl FromStr for BlendMode {
    type Err = ParseBlendModeError;

    /// Accepts any case, with or without `-`, `_` or spaces between words:
    /// `"color-dodge"`, `"ColorDodge"` and `"COLORDODGE"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_uppercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == key)
            .ok_or_else(|| ParseBlendModeError(s.to_string()))
    }
}
