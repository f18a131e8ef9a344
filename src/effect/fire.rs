//! Fire simulation.
//!
//! Heat falls off quadratically with normalized position and flickers with
//! time-driven value noise; the hue drifts toward orange as heat rises. On
//! RGBW strips the white die carries the common white content of the flame.

use libm::powf;

use super::{EffectParams, RenderTarget};
use crate::color::hsv_to_rgbw;
use crate::math::value_noise;
use crate::segment;

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

    let inten = if params.intensity > 0.0 {
        params.intensity
    } else {
        1.0
    };
    let extract_white = target.strip.is_rgbw();

    let mut energy = 0;
    for (i, px) in target.pixels[seg.range()].iter_mut().enumerate() {
        let y = i as f32 / f32::from(seg.len);
        let flick =
            value_noise(i as f32 * 0.15 + now_ms as f32 * 0.006 + params.seed as f32) * 0.7 + 0.3;
        let heat = powf(1.0 - y, 2.0) * flick * inten;
        let hue = 0.08 + 0.05 * (1.0 - heat);
        *px = hsv_to_rgbw(hue, 1.0, heat, extract_white);
        energy += px.energy();
    }
    energy
}
