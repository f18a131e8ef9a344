//! Per-pixel pseudo-random twinkle.
//!
//! Brightness comes from a linear-congruential hash of time and pixel index,
//! squared for contrast. The seed offsets the time base so two instances with
//! different seeds never twinkle in step.

use super::{EffectParams, RenderTarget};
use crate::color::Rgbw;
use crate::segment;

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn render(
    target: &mut RenderTarget<'_>,
    params: &EffectParams,
    now_ms: u32,
    _end_ms: u32,
) -> u32 {
    let seg = segment::resolve(params, target.pixel_count());
    let t = now_ms.wrapping_add(params.seed.wrapping_mul(977));

    let mut energy = 0;
    for (i, px) in target.pixels[seg.range()].iter_mut().enumerate() {
        let x = t
            .wrapping_mul(1_664_525)
            .wrapping_add((i as u32).wrapping_mul(1_013_904_223));
        let v = ((x >> 8) & 0xFFFF) as f32 / 65535.0;
        let a = v * v * params.intensity;
        *px = Rgbw {
            r: (f32::from(params.color1.r) * a) as u8,
            g: (f32::from(params.color1.g) * a) as u8,
            b: (f32::from(params.color1.b) * a) as u8,
            w: (f32::from(params.color1.w) * a) as u8,
        };
        energy += px.energy();
    }
    energy
}
