//! Small numeric helpers shared by the renderers.

/// Clamp an integer into the 0-255 byte range.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn clamp8(v: i32) -> u8 {
    if v < 0 {
        0
    } else if v > 255 {
        255
    } else {
        v as u8
    }
}

/// Linear interpolation between two bytes, `t` in 0.0-1.0.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lerp8(a: u8, b: u8, t: f32) -> u8 {
    (f32::from(a) + (f32::from(b) - f32::from(a)) * t) as u8
}

/// Fractional part of `x`.
#[inline]
pub fn fracf(x: f32) -> f32 {
    x - libm::floorf(x)
}

/// Deterministic sine hash, returns 0.0-1.0.
#[inline]
pub fn hash11(p: f32) -> f32 {
    fracf(libm::sinf(p * 127.1) * 43758.5453)
}

/// 1-D value noise: lerp of a hashed lattice, smoothed with a cubic ease.
#[inline]
pub fn value_noise(x: f32) -> f32 {
    let i = libm::floorf(x);
    let f = x - i;
    let a = hash11(i);
    let b = hash11(i + 1.0);
    a + (b - a) * (f * f * (3.0 - 2.0 * f))
}

// 4x4 Bayer matrix for ordered dithering.
const BAYER4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Ordered dithering with temporal jitter.
///
/// `x` is the pixel index, `y` the channel's physical index. Adds at most +1
/// to the input value, clamped to 255.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn dither_ordered(v: u8, x: u16, y: u16, t_ms: u32) -> u8 {
    let b = BAYER4[(y & 3) as usize][(x & 3) as usize];
    let jitter = ((t_ms >> 4) & 3) as u8;
    if b + jitter > 8 { v.saturating_add(1) } else { v }
}
