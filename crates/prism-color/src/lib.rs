//! Color math: RGB/HSV values, linear and sRGB encodings, and the blend mode library.

pub mod blend;
mod color;
pub mod space;

pub use blend::{BlendFn, BlendMode, ParseBlendModeError};
pub use color::{Color, Hsv};
pub use space::{
    ColorSpace, Encoded, Encoding, Linear, LinearSpace, Srgb, SrgbSpace, clamp, linear_to_srgb,
    srgb_to_linear,
};
