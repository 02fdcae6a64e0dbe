//! RGB color value with component-wise arithmetic and an HSV view.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An RGB triple in `f64`.
///
/// Channels are nominally in `[0.0, 1.0]` but may leave that range while a
/// blend is being computed; [`Color::clamp01`] brings them back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(DVec3);

/// Hue, saturation and value, each in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    /// Hue as a fraction of the full turn.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Value (the largest channel).
    pub v: f64,
}

impl Color {
    /// (0, 0, 0).
    pub const BLACK: Self = Self(DVec3::ZERO);
    /// (1, 1, 1).
    pub const WHITE: Self = Self(DVec3::ONE);

    /// Creates a color from its three channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self(DVec3::new(r, g, b))
    }

    /// All three channels set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self(DVec3::splat(v))
    }

    pub fn r(self) -> f64 {
        self.0.x
    }

    pub fn g(self) -> f64 {
        self.0.y
    }

    pub fn b(self) -> f64 {
        self.0.z
    }

    pub fn to_array(self) -> [f64; 3] {
        self.0.to_array()
    }

    pub fn from_array(rgb: [f64; 3]) -> Self {
        Self(DVec3::from_array(rgb))
    }

    /// Applies `f` to each channel.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.0.x), f(self.0.y), f(self.0.z))
    }

    /// Applies `f` to each pair of corresponding channels.
    #[must_use]
    pub fn zip_map(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self::new(
            f(self.0.x, other.0.x),
            f(self.0.y, other.0.y),
            f(self.0.z, other.0.z),
        )
    }

    /// Negative channels become 0, channels above 1 become 1.
    #[must_use]
    pub fn clamp01(self) -> Self {
        Self(self.0.clamp(DVec3::ZERO, DVec3::ONE))
    }

    /// Returns `true` if every channel lies in `[0.0, 1.0]`.
    pub fn is_normalized(self) -> bool {
        self.0.cmpge(DVec3::ZERO).all() && self.0.cmple(DVec3::ONE).all()
    }

    /// Largest absolute channel difference to `other`.
    pub fn max_abs_diff(self, other: Self) -> f64 {
        (self.0 - other.0).abs().max_element()
    }

    /// Converts to hue/saturation/value.
    ///
    /// Gray colors (all channels equal) report a hue of 0.
    pub fn to_hsv(self) -> Hsv {
        let max = self.0.max_element();
        let min = self.0.min_element();
        let v = max;
        if max == min {
            return Hsv { h: 0.0, s: 0.0, v };
        }

        let chroma = max - min;
        let s = chroma / max;
        let (r, g, b) = (self.0.x, self.0.y, self.0.z);
        let rc = (max - r) / chroma;
        let gc = (max - g) / chroma;
        let bc = (max - b) / chroma;

        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Hsv {
            h: (h / 6.0).rem_euclid(1.0),
            s,
            v,
        }
    }

    /// Builds a color from hue/saturation/value. Each component is clamped to
    /// `[0.0, 1.0]` first.
    pub fn from_hsv(hsv: Hsv) -> Self {
        let h = hsv.h.clamp(0.0, 1.0);
        let s = hsv.s.clamp(0.0, 1.0);
        let v = hsv.v.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::splat(v);
        }

        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match (sector as i64).rem_euclid(6) {
            0 => Self::new(v, t, p),
            1 => Self::new(q, v, p),
            2 => Self::new(p, v, t),
            3 => Self::new(p, q, v),
            4 => Self::new(t, p, v),
            _ => Self::new(v, p, q),
        }
    }

    /// Same color with the hue replaced.
    #[must_use]
    pub fn with_hue(self, h: f64) -> Self {
        Self::from_hsv(Hsv { h, ..self.to_hsv() })
    }

    /// Same color with the saturation replaced.
    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self::from_hsv(Hsv { s, ..self.to_hsv() })
    }

    /// Same color with the value replaced.
    #[must_use]
    pub fn with_value(self, v: f64) -> Self {
        Self::from_hsv(Hsv { v, ..self.to_hsv() })
    }
}

impl From<DVec3> for Color {
    fn from(v: DVec3) -> Self {
        Self(v)
    }
}

impl From<[f64; 3]> for Color {
    fn from(rgb: [f64; 3]) -> Self {
        Self::from_array(rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.0.x, self.0.y, self.0.z)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Color(self * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: Color, b: Color) {
        assert!(a.max_abs_diff(b) < EPS, "expected {b}, got {a}");
    }

    #[test]
    fn test_clamp01_limits_each_channel() {
        let c = Color::new(-0.5, 0.25, 3.0).clamp01();
        assert_eq!(c, Color::new(0.0, 0.25, 1.0));
        assert!(c.is_normalized());
    }

    #[test]
    fn test_componentwise_arithmetic() {
        let a = Color::new(0.2, 0.4, 0.6);
        let b = Color::new(0.5, 0.5, 0.5);
        assert_close(a + b, Color::new(0.7, 0.9, 1.1));
        assert_close(a - b, Color::new(-0.3, -0.1, 0.1));
        assert_close(a * b, Color::new(0.1, 0.2, 0.3));
        assert_close(a * 2.0, Color::new(0.4, 0.8, 1.2));
        assert_close(0.5 * a, Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_primary_hues() {
        let red = Color::new(1.0, 0.0, 0.0).to_hsv();
        let green = Color::new(0.0, 1.0, 0.0).to_hsv();
        let blue = Color::new(0.0, 0.0, 1.0).to_hsv();
        assert!((red.h - 0.0).abs() < EPS);
        assert!((green.h - 1.0 / 3.0).abs() < EPS);
        assert!((blue.h - 2.0 / 3.0).abs() < EPS);
        assert_eq!(red.s, 1.0);
        assert_eq!(red.v, 1.0);
    }

    #[test]
    fn test_gray_has_zero_saturation() {
        let hsv = Color::splat(0.4).to_hsv();
        assert_eq!(hsv.s, 0.0);
        assert_eq!(hsv.v, 0.4);
    }

    #[test]
    fn test_hsv_roundtrip_preserves_color() {
        let samples = [
            Color::new(0.9, 0.1, 0.3),
            Color::new(0.2, 0.7, 0.4),
            Color::new(0.15, 0.25, 0.95),
            Color::new(0.5, 0.5, 0.1),
            Color::new(0.0, 0.3, 0.3),
        ];
        for c in samples {
            assert_close(Color::from_hsv(c.to_hsv()), c);
        }
    }

    #[test]
    fn test_with_value_keeps_hue_and_saturation() {
        let c = Color::new(0.8, 0.4, 0.2);
        let darker = c.with_value(0.4);
        let before = c.to_hsv();
        let after = darker.to_hsv();
        assert!((before.h - after.h).abs() < EPS);
        assert!((before.s - after.s).abs() < EPS);
        assert!((after.v - 0.4).abs() < EPS);
    }

    #[test]
    fn test_with_hue_rotates_red_to_green() {
        let c = Color::new(1.0, 0.0, 0.0).with_hue(1.0 / 3.0);
        assert_close(c, Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_from_hsv_clamps_inputs() {
        let c = Color::from_hsv(Hsv {
            h: 0.0,
            s: 2.0,
            v: 1.5,
        });
        assert_close(c, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_serializes_as_tuple() {
        let c = Color::new(0.25, 0.5, 1.0);
        let s = ron::to_string(&c).unwrap();
        let back: Color = ron::from_str(&s).unwrap();
        assert_eq!(back, c);
        let parsed: Color = ron::from_str("(0.1, 0.2, 0.3)").unwrap();
        assert_eq!(parsed, Color::new(0.1, 0.2, 0.3));
    }
}
