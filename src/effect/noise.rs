//! 1-D value-noise brightness flow over `color1`.

use libm::powf;

use super::{EffectParams, RenderTarget};
use crate::color::Rgbw;
use crate::math::value_noise;
use crate::segment;

const DEFAULT_SPEED: f32 = 1.2;
const SPATIAL_SCALE: f32 = 0.08;

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn render(
    target: &mut RenderTarget<'_>,
    params: &EffectParams,
    now_ms: u32,
    _end_ms: u32,
) -> u32 {
    let seg = segment::resolve(params, target.pixel_count());
    let speed = if params.speed > 0.0 {
        params.speed
    } else {
        DEFAULT_SPEED
    };
    let t = now_ms as f32 / 1000.0 * speed + params.seed as f32 * 0.1;
    let inten = if params.intensity > 0.0 {
        params.intensity
    } else {
        1.0
    };

    let mut energy = 0;
    for (i, px) in target.pixels[seg.range()].iter_mut().enumerate() {
        let n = value_noise(i as f32 * SPATIAL_SCALE + t);
        let v = powf(n, 1.5) * inten;
        *px = Rgbw {
            r: (f32::from(params.color1.r) * v) as u8,
            g: (f32::from(params.color1.g) * v) as u8,
            b: (f32::from(params.color1.b) * v) as u8,
            w: 0,
        };
        energy += px.energy();
    }
    energy
}
