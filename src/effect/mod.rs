//! Effect registry and renderer contract.
//!
//! The effect set is closed and compiled in; instances are addressed by a
//! stable numeric id so presets survive firmware updates. Renderers are pure
//! functions of `(params, now_ms, pixel index, seed)`: repeated calls with
//! identical inputs produce identical pixels.

mod chase;
mod fire;
mod gradient;
mod noise;
mod rainbow;
mod solid;
mod twinkle;
mod waves;

use crate::blend::BlendMode;
use crate::color::Rgbw;
use crate::encoder::StripType;
use crate::gamma::GammaLut;

// Stable wire ids. The basic set starts at 1, procedural effects at 1001.
pub const FX_SOLID: u32 = 1;
pub const FX_GRADIENT: u32 = 2;
pub const FX_CHASE: u32 = 3;
pub const FX_TWINKLE: u32 = 4;
pub const FX_RAINBOW: u32 = 1001;
pub const FX_NOISE: u32 = 1002;
pub const FX_FIRE: u32 = 1003;
pub const FX_WAVES: u32 = 1004;

/// Parameters of one effect instance.
///
/// A plain value type: setters copy it into channel state, renderers read it
/// immutably. The field set is the stable record external preset persistence
/// round-trips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams {
    pub effect_id: u32,
    /// Effect-defined unit (px/s for chase, cycles/s for rainbow).
    pub speed: f32,
    /// Normalized 0.0-1.0 scalar; values <= 0 are treated as 1.0.
    pub intensity: f32,
    pub palette_id: u32,
    pub color1: Rgbw,
    pub color2: Rgbw,
    pub color3: Rgbw,
    /// Stable per-instance seed for deterministic pseudo-randomness.
    pub seed: u32,
    /// Overlay blending mode; ignored for base effects.
    pub blend: BlendMode,
    /// Overlay opacity. Zero is the "unset" sentinel and sanitizes to 255.
    pub opacity: u8,
    pub seg_start: u16,
    /// Segment length; 0 means the full channel.
    pub seg_len: u16,
}

impl EffectParams {
    pub const DEFAULT: Self = Self {
        effect_id: 0,
        speed: 0.0,
        intensity: 1.0,
        palette_id: 0,
        color1: Rgbw::new(0, 0, 0, 0),
        color2: Rgbw::new(0, 0, 0, 0),
        color3: Rgbw::new(0, 0, 0, 0),
        seed: 0,
        blend: BlendMode::Normal,
        opacity: 255,
        seg_start: 0,
        seg_len: 0,
    };

    /// Normalize the sentinel fields before the params enter channel state.
    pub fn sanitized(mut self) -> Self {
        if self.opacity == 0 {
            self.opacity = 255;
        }
        if self.intensity <= 0.0 {
            self.intensity = 1.0;
        }
        self
    }
}

impl Default for EffectParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The channel view a renderer writes into.
pub struct RenderTarget<'a> {
    /// Physical channel index, used as a dither cell coordinate.
    pub index: u8,
    pub strip: StripType,
    pub gamma: &'a GammaLut,
    pub pixels: &'a mut [Rgbw],
}

impl RenderTarget<'_> {
    pub fn pixel_count(&self) -> u16 {
        u16::try_from(self.pixels.len()).unwrap_or(u16::MAX)
    }
}

/// Renderer entry point.
///
/// Writes only within the resolved segment (the caller pre-zeroes the
/// buffer) and returns the summed component energy of the emitted pixels, so
/// power estimation needs no second pass over renderer output.
pub type RenderFn =
    fn(target: &mut RenderTarget<'_>, params: &EffectParams, now_ms: u32, end_ms: u32) -> u32;

/// One registry entry.
pub struct EffectDescriptor {
    pub id: u32,
    pub name: &'static str,
    pub render: RenderFn,
}

static EFFECTS: [EffectDescriptor; 8] = [
    EffectDescriptor {
        id: FX_SOLID,
        name: "solid",
        render: solid::render,
    },
    EffectDescriptor {
        id: FX_GRADIENT,
        name: "gradient",
        render: gradient::render,
    },
    EffectDescriptor {
        id: FX_CHASE,
        name: "chase",
        render: chase::render,
    },
    EffectDescriptor {
        id: FX_TWINKLE,
        name: "twinkle",
        render: twinkle::render,
    },
    EffectDescriptor {
        id: FX_RAINBOW,
        name: "rainbow",
        render: rainbow::render,
    },
    EffectDescriptor {
        id: FX_NOISE,
        name: "noise",
        render: noise::render,
    },
    EffectDescriptor {
        id: FX_FIRE,
        name: "fire",
        render: fire::render,
    },
    EffectDescriptor {
        id: FX_WAVES,
        name: "waves",
        render: waves::render,
    },
];

/// Look up an effect by id. Unknown ids are not an error; the compositor
/// treats them as "off".
pub fn lookup(id: u32) -> Option<&'static EffectDescriptor> {
    EFFECTS.iter().find(|fx| fx.id == id)
}
