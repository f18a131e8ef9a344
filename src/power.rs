//! Power budget estimation and clamping.
//!
//! The configuration is process-wide and read every frame without locking;
//! a setter racing a render means at most one frame rendered with the stale
//! values.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::color::Rgbw;

const DEFAULT_PER_LED_MA: f32 = 60.0;
const DEFAULT_LIMIT_MA: f32 = 8000.0;

/// A scale this close to unity is treated as "no clamp".
pub const NO_CLAMP_THRESHOLD: f32 = 0.999;

static PER_LED_MA: AtomicU32 = AtomicU32::new(DEFAULT_PER_LED_MA.to_bits());
static LIMIT_MA: AtomicU32 = AtomicU32::new(DEFAULT_LIMIT_MA.to_bits());

/// Per-LED current estimate and the supply ceiling, both in milliamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerConfig {
    pub per_led_ma: f32,
    pub limit_ma: f32,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            per_led_ma: DEFAULT_PER_LED_MA,
            limit_ma: DEFAULT_LIMIT_MA,
        }
    }
}

/// Read the current configuration.
pub fn config() -> PowerConfig {
    PowerConfig {
        per_led_ma: f32::from_bits(PER_LED_MA.load(Ordering::Relaxed)),
        limit_ma: f32::from_bits(LIMIT_MA.load(Ordering::Relaxed)),
    }
}

/// Update the configuration. Non-positive fields keep their previous value.
pub fn set_config(cfg: PowerConfig) {
    if cfg.per_led_ma > 0.0 {
        PER_LED_MA.store(cfg.per_led_ma.to_bits(), Ordering::Relaxed);
    }
    if cfg.limit_ma > 0.0 {
        LIMIT_MA.store(cfg.limit_ma.to_bits(), Ordering::Relaxed);
    }
}

/// Estimate the frame's current draw and derive a dimming factor.
///
/// Every component byte contributes `per_led_ma / 4 / 255` milliamps: each of
/// the up to four components is treated as an equal fraction of one LED's
/// rated full-brightness draw. This under-weights RGBW strips relative to
/// their true draw; the approximation is long-standing and downstream safety
/// margins assume it.
///
/// Returns a factor < 1.0 when the estimate exceeds the ceiling, 1.0
/// otherwise.
#[allow(clippy::cast_precision_loss)]
pub fn scale_for_frame(frame: &[Rgbw], cfg: &PowerConfig) -> f32 {
    if frame.is_empty() {
        return 1.0;
    }

    let mut sum: u32 = 0;
    for px in frame {
        sum += px.energy();
    }

    let est_ma = (sum as f32 / 255.0) * (cfg.per_led_ma / 4.0);
    if est_ma <= 0.0 {
        return 1.0;
    }
    if est_ma > cfg.limit_ma {
        cfg.limit_ma / est_ma
    } else {
        1.0
    }
}

/// Multiply every component in place by `scale`.
///
/// A scale at or above [`NO_CLAMP_THRESHOLD`] is a no-op. Returns the scale
/// that was effectively applied (1.0 for the no-op case), for stats
/// reporting.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn apply_scale(frame: &mut [Rgbw], scale: f32) -> f32 {
    if scale >= NO_CLAMP_THRESHOLD {
        return 1.0;
    }
    for px in frame {
        px.r = (f32::from(px.r) * scale) as u8;
        px.g = (f32::from(px.g) * scale) as u8;
        px.b = (f32::from(px.b) * scale) as u8;
        px.w = (f32::from(px.w) * scale) as u8;
    }
    scale
}
