//! Moving dot with a triangular falloff tail.

use libm::{fabsf, fmodf};

use super::{EffectParams, RenderTarget};
use crate::color::Rgbw;
use crate::segment;

const DEFAULT_SPEED_PX_S: f32 = 60.0;
const TAIL_PIXELS: f32 = 10.0;

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
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

    let speed = if params.speed > 0.0 {
        params.speed
    } else {
        DEFAULT_SPEED_PX_S
    };
    let head = fmodf(now_ms as f32 / 1000.0 * speed, f32::from(seg.len));

    let mut energy = 0;
    for (i, px) in target.pixels[seg.range()].iter_mut().enumerate() {
        let d = fabsf(i as f32 - head);
        let a = (1.0 - d / TAIL_PIXELS).max(0.0);
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
