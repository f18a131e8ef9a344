//! Solid fill: every pixel in the segment takes `color1`.

use super::{EffectParams, RenderTarget};
use crate::segment;

pub(super) fn render(
    target: &mut RenderTarget<'_>,
    params: &EffectParams,
    _now_ms: u32,
    _end_ms: u32,
) -> u32 {
    let seg = segment::resolve(params, target.pixel_count());
    let mut energy = 0;
    for px in &mut target.pixels[seg.range()] {
        *px = params.color1;
        energy += params.color1.energy();
    }
    energy
}
