//! Palette-sampled hue scroll.
//!
//! Each component is ordered-dithered (pixel index and physical channel index
//! as cell coordinates) and then gamma-corrected, which keeps slow scrolls
//! free of visible banding on long strips.

use super::{EffectParams, RenderTarget};
use crate::color::Rgbw;
use crate::math::{dither_ordered, fracf};
use crate::palette::palette_by_id;
use crate::segment;

const DEFAULT_SPEED_CYCLES_S: f32 = 0.2;

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub(super) fn render(
    target: &mut RenderTarget<'_>,
    params: &EffectParams,
    now_ms: u32,
    _end_ms: u32,
) -> u32 {
    let pal = palette_by_id(params.palette_id);
    let seg = segment::resolve(params, target.pixel_count());
    if seg.len == 0 {
        return 0;
    }

    let speed = if params.speed > 0.0 {
        params.speed
    } else {
        DEFAULT_SPEED_CYCLES_S
    };
    let t = now_ms as f32 / 1000.0 * speed;
    let y = u16::from(target.index);

    let mut energy = 0;
    for (i, px) in target.pixels[seg.range()].iter_mut().enumerate() {
        let u = fracf(i as f32 / f32::from(seg.len) + t);
        let c = pal.sample(u);
        let corrected = Rgbw {
            r: target.gamma.correct(dither_ordered(c.r, i as u16, y, now_ms)),
            g: target.gamma.correct(dither_ordered(c.g, i as u16, y, now_ms)),
            b: target.gamma.correct(dither_ordered(c.b, i as u16, y, now_ms)),
            w: 0,
        };
        *px = corrected;
        energy += corrected.energy();
    }
    energy
}
