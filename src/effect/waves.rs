//! Two-color sinusoidal waves.
//!
//! The phase term includes the global beat phase, so an external trigger
//! (e.g. a beat detector on another node) shifts every channel's waves in
//! step without touching per-channel state.

use libm::sinf;

use super::{EffectParams, RenderTarget};
use crate::color::Rgbw;
use crate::math::lerp8;
use crate::segment;
use crate::trigger::beat_phase;

const TWO_PI: f32 = 6.283;
const PI: f32 = 3.1415;

#[allow(clippy::cast_precision_loss)]
pub(super) fn render(
    target: &mut RenderTarget<'_>,
    params: &EffectParams,
    now_ms: u32,
    _end_ms: u32,
) -> u32 {
    let seg = segment::resolve(params, target.pixel_count());
    if seg.len == 0 {
        return 0;
    }

    let t = now_ms as f32 / 1000.0;
    let inten = if params.intensity > 0.0 {
        params.intensity
    } else {
        1.0
    };
    let phase = beat_phase() * PI;

    let mut energy = 0;
    for (i, px) in target.pixels[seg.range()].iter_mut().enumerate() {
        let x = i as f32 / f32::from(seg.len);
        let w = 0.5 + 0.5 * sinf(x * TWO_PI * (1.5 + inten * 2.0) + t * 2.0 + phase);
        *px = Rgbw {
            r: lerp8(params.color1.r, params.color2.r, w),
            g: lerp8(params.color1.g, params.color2.g, w),
            b: lerp8(params.color1.b, params.color2.b, w),
            w: 0,
        };
        energy += px.energy();
    }
    energy
}
