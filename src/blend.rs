//! Overlay blend modes.
//!
//! Blending is applied per RGB component; the white component always combines
//! additively with clamping, independent of the selected mode, so a white
//! overlay never darkens a white base.

use crate::color::Rgbw;
use crate::math::clamp8;

/// How an overlay layer combines with the base frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BlendMode {
    #[default]
    Normal = 0,
    Add = 1,
    Screen = 2,
    Multiply = 3,
    Lighten = 4,
}

impl BlendMode {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::Normal,
            1 => Self::Add,
            2 => Self::Screen,
            3 => Self::Multiply,
            4 => Self::Lighten,
            _ => return None,
        })
    }
}

/// Combine `over` onto `base` with the given mode.
pub const fn blend_apply(mode: BlendMode, base: Rgbw, over: Rgbw) -> Rgbw {
    let w = clamp8(base.w as i32 + over.w as i32);
    match mode {
        BlendMode::Normal => over,
        BlendMode::Add => Rgbw {
            r: clamp8(base.r as i32 + over.r as i32),
            g: clamp8(base.g as i32 + over.g as i32),
            b: clamp8(base.b as i32 + over.b as i32),
            w,
        },
        BlendMode::Screen => Rgbw {
            r: (255 - ((255 - base.r as u16) * (255 - over.r as u16) / 255)) as u8,
            g: (255 - ((255 - base.g as u16) * (255 - over.g as u16) / 255)) as u8,
            b: (255 - ((255 - base.b as u16) * (255 - over.b as u16) / 255)) as u8,
            w,
        },
        BlendMode::Multiply => Rgbw {
            r: (base.r as u16 * over.r as u16 / 255) as u8,
            g: (base.g as u16 * over.g as u16 / 255) as u8,
            b: (base.b as u16 * over.b as u16 / 255) as u8,
            w,
        },
        BlendMode::Lighten => Rgbw {
            r: if base.r > over.r { base.r } else { over.r },
            g: if base.g > over.g { base.g } else { over.g },
            b: if base.b > over.b { base.b } else { over.b },
            w,
        },
    }
}

/// Scale every component of the overlay by its opacity before blending.
pub const fn scale_opacity(px: Rgbw, opacity: u8) -> Rgbw {
    Rgbw {
        r: ((px.r as u16 * opacity as u16) / 255) as u8,
        g: ((px.g as u16 * opacity as u16) / 255) as u8,
        b: ((px.b as u16 * opacity as u16) / 255) as u8,
        w: ((px.w as u16 * opacity as u16) / 255) as u8,
    }
}
