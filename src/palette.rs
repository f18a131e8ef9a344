//! Built-in color palettes.
//!
//! Palettes are static key tables sampled with linear interpolation. An
//! unknown palette id falls back to the first entry rather than failing.

use libm::floorf;

use crate::color::Rgb;
use crate::math::lerp8;

/// A named palette: a list of key colors spread evenly across 0.0-1.0.
#[derive(Debug)]
pub struct Palette {
    pub name: &'static str,
    pub keys: &'static [Rgb],
}

const PAL_OCEAN: [Rgb; 3] = [
    Rgb { r: 0, g: 64, b: 128 },
    Rgb { r: 0, g: 160, b: 255 },
    Rgb { r: 0, g: 64, b: 128 },
];

const PAL_SUNSET: [Rgb; 3] = [
    Rgb { r: 255, g: 80, b: 0 },
    Rgb { r: 255, g: 0, b: 64 },
    Rgb { r: 64, g: 0, b: 96 },
];

const PAL_RAINBOW: [Rgb; 7] = [
    Rgb { r: 255, g: 0, b: 0 },
    Rgb { r: 255, g: 127, b: 0 },
    Rgb { r: 255, g: 255, b: 0 },
    Rgb { r: 0, g: 255, b: 0 },
    Rgb { r: 0, g: 0, b: 255 },
    Rgb { r: 75, g: 0, b: 130 },
    Rgb { r: 148, g: 0, b: 211 },
];

static PALETTES: [Palette; 3] = [
    Palette {
        name: "ocean",
        keys: &PAL_OCEAN,
    },
    Palette {
        name: "sunset",
        keys: &PAL_SUNSET,
    },
    Palette {
        name: "rainbow",
        keys: &PAL_RAINBOW,
    },
];

/// Look up a palette by id; out-of-range ids fall back to palette 0.
pub fn palette_by_id(id: u32) -> &'static Palette {
    PALETTES
        .get(id as usize)
        .unwrap_or(&PALETTES[0])
}

impl Palette {
    /// Sample the palette at `t` (0.0-1.0) with linear interpolation between
    /// adjacent keys.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn sample(&self, t: f32) -> Rgb {
        if self.keys.is_empty() {
            return Rgb {
                r: 255,
                g: 255,
                b: 255,
            };
        }

        let x = t * (self.keys.len() - 1) as f32;
        let i = floorf(x) as usize;
        let u = x - floorf(x);

        if i >= self.keys.len() - 1 {
            return self.keys[self.keys.len() - 1];
        }

        let a = self.keys[i];
        let b = self.keys[i + 1];
        Rgb {
            r: lerp8(a.r, b.r, u),
            g: lerp8(a.g, b.g, u),
            b: lerp8(a.b, b.b, u),
        }
    }
}
