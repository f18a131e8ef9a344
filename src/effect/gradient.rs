//! Linear two-color gradient across the segment.

use super::{EffectParams, RenderTarget};
use crate::color::Rgbw;
use crate::math::lerp8;
use crate::segment;

pub(super) fn render(
    target: &mut RenderTarget<'_>,
    params: &EffectParams,
    _now_ms: u32,
    _end_ms: u32,
) -> u32 {
    let seg = segment::resolve(params, target.pixel_count());
    let mut energy = 0;
    for (i, px) in target.pixels[seg.range()].iter_mut().enumerate() {
        // Single-pixel segments sit at the start color.
        #[allow(clippy::cast_precision_loss)]
        let t = if seg.len > 1 {
            i as f32 / f32::from(seg.len - 1)
        } else {
            0.0
        };
        let c = Rgbw {
            r: lerp8(params.color1.r, params.color2.r, t),
            g: lerp8(params.color1.g, params.color2.g, t),
            b: lerp8(params.color1.b, params.color2.b, t),
            w: lerp8(params.color1.w, params.color2.w, t),
        };
        *px = c;
        energy += c.energy();
    }
    energy
}
