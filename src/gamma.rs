//! Gamma correction lookup table.

/// Precomputed 256-entry gamma LUT.
///
/// Built once per channel at startup; lookups in the render path are a plain
/// array index.
#[derive(Debug, Clone)]
pub struct GammaLut {
    table: [u8; 256],
}

impl GammaLut {
    /// Build a LUT for the given gamma exponent (2.2 is the usual value for
    /// WS2812-class strips).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(gamma: f32) -> Self {
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let corrected = libm::powf(i as f32 / 255.0, gamma) * 255.0 + 0.5;
            *entry = corrected as u8;
        }
        Self { table }
    }

    #[inline]
    pub const fn correct(&self, v: u8) -> u8 {
        self.table[v as usize]
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new(2.2)
    }
}
