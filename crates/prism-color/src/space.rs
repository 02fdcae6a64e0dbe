//! Linear and sRGB encodings.
//!
//! Blend arithmetic is defined over linear values while vertex color layers
//! and palettes hold sRGB. Colors are tagged with their encoding using a
//! zero-sized marker so the compiler rejects arithmetic on mixed encodings:
//!
//! ```rust
//! use prism_color::{Color, Linear, Srgb};
//!
//! let stored = Srgb::new(Color::new(0.5, 0.5, 0.5));
//! let linear: Linear = stored.to_linear();
//!
//! // This would not compile:
//! // let mixed: Linear = stored;
//! # let _ = linear;
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Linear-to-sRGB threshold below which the transfer is a straight line.
const LINEAR_KNEE: f64 = 0.003_130_8;
/// sRGB-to-linear threshold, the image of [`LINEAR_KNEE`].
const SRGB_KNEE: f64 = 0.040_45;

/// Encodes one linear channel as sRGB.
#[inline]
pub fn linear_to_srgb_channel(l: f64) -> f64 {
    if l <= LINEAR_KNEE {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Decodes one sRGB channel to linear.
#[inline]
pub fn srgb_to_linear_channel(s: f64) -> f64 {
    if s <= SRGB_KNEE {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// Per-channel linear → sRGB.
pub fn linear_to_srgb(c: Color) -> Color {
    c.map(linear_to_srgb_channel)
}

/// Per-channel sRGB → linear.
pub fn srgb_to_linear(c: Color) -> Color {
    c.map(srgb_to_linear_channel)
}

/// Per-channel clamp to `[0.0, 1.0]`.
pub fn clamp(c: Color) -> Color {
    c.clamp01()
}

// Encoding marker types (zero-sized)
/// Marker for linear-light values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LinearSpace;

/// Marker for sRGB-encoded values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SrgbSpace;

/// Runtime view of an encoding, for logging and inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    Linear,
    Srgb,
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Srgb => f.write_str("sRGB"),
        }
    }
}

/// Implemented by the encoding markers.
pub trait Encoding {
    /// The runtime tag for this marker.
    const SPACE: ColorSpace;
}

impl Encoding for LinearSpace {
    const SPACE: ColorSpace = ColorSpace::Linear;
}

impl Encoding for SrgbSpace {
    const SPACE: ColorSpace = ColorSpace::Srgb;
}

/// A [`Color`] tagged with the encoding it is expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Encoded<E> {
    color: Color,
    #[serde(skip)]
    _space: PhantomData<E>,
}

/// A linear-light color.
pub type Linear = Encoded<LinearSpace>;

/// An sRGB-encoded color.
pub type Srgb = Encoded<SrgbSpace>;

impl<E> Encoded<E> {
    /// Tags `color` with encoding `E`. The caller asserts the values really
    /// are in that encoding.
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            _space: PhantomData,
        }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Color::new(r, g, b))
    }

    /// The untagged channel values.
    pub fn color(self) -> Color {
        self.color
    }

    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(self.color.clamp01())
    }
}

impl<E: Encoding> Encoded<E> {
    pub fn space(self) -> ColorSpace {
        E::SPACE
    }
}

impl Linear {
    /// Encodes as sRGB.
    pub fn to_srgb(self) -> Srgb {
        Srgb::new(linear_to_srgb(self.color))
    }
}

impl Srgb {
    /// Decodes to linear.
    pub fn to_linear(self) -> Linear {
        Linear::new(srgb_to_linear(self.color))
    }
}

impl<E: Encoding> fmt::Display for Encoded<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", E::SPACE, self.color)
    }
}
