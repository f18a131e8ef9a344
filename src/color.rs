//! Pixel types and color conversions.
//!
//! Frame buffers hold [`Rgbw`] pixels; on RGB-only strips the white component
//! stays zero and is never put on the wire. Palette keys use the plain
//! [`Rgb`] type from `smart-leds`.

use libm::floorf;
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// One frame-buffer pixel with an optional white component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Sum of all components, used for power estimation.
    pub const fn energy(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32 + self.w as u32
    }
}

impl From<Rgb> for Rgbw {
    fn from(c: Rgb) -> Self {
        Self::new(c.r, c.g, c.b, 0)
    }
}

/// Convert HSV (all components 0.0-1.0) to a frame pixel.
///
/// With `extract_white` the minimum RGB component is moved into the white
/// channel, for SK6812-class strips with a dedicated white die.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgbw(h: f32, s: f32, v: f32, extract_white: bool) -> Rgbw {
    let mut h = libm::fmodf(h, 1.0);
    if h < 0.0 {
        h += 1.0;
    }

    let i = floorf(h * 6.0);
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (i as i32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    let mut c = Rgbw::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, 0);
    if extract_white {
        let w = c.r.min(c.g).min(c.b);
        c.r -= w;
        c.g -= w;
        c.b -= w;
        c.w = w;
    }
    c
}

/// Extract a scaled white component out of an RGB pixel.
///
/// `wmix` (0.0-1.0) controls how much of the common white content moves to
/// the white channel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb_to_rgbw(mut px: Rgbw, wmix: f32) -> Rgbw {
    let w = px.r.min(px.g).min(px.b);
    let ws = (f32::from(w) * wmix) as u8;
    px.r -= ws;
    px.g -= ws;
    px.b -= ws;
    px.w = ws;
    px
}
