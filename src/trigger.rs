//! Cross-context trigger scalars.
//!
//! The beat phase and strobe deadline are written by the control plane and
//! read by the render loop. Both are continuously-updated scalars, not
//! discrete commands, so plain relaxed atomics are enough; a racy read is at
//! worst one frame stale.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_time::{Duration, Instant};

use crate::math::fracf;

static BEAT_PHASE: AtomicU32 = AtomicU32::new(0);
static STROBE_UNTIL_MS: AtomicU32 = AtomicU32::new(0);

/// Set the global beat phase; wrapped into [0, 1).
pub fn set_beat_phase(phase: f32) {
    let wrapped = fracf(phase);
    BEAT_PHASE.store(wrapped.to_bits(), Ordering::Relaxed);
}

/// Current beat phase in [0, 1), consumed by the waves renderer.
pub fn beat_phase() -> f32 {
    f32::from_bits(BEAT_PHASE.load(Ordering::Relaxed))
}

/// Arm the strobe for `duration` starting at `now`.
#[allow(clippy::cast_possible_truncation)]
pub fn strobe_for(now: Instant, duration: Duration) {
    let until = (now.as_millis() + duration.as_millis()) as u32;
    STROBE_UNTIL_MS.store(until, Ordering::Relaxed);
}

/// 1.0 while the strobe window is armed, 0.0 otherwise.
#[allow(clippy::cast_possible_truncation)]
pub fn strobe_level(now: Instant) -> f32 {
    let now_ms = now.as_millis() as u32;
    if now_ms < STROBE_UNTIL_MS.load(Ordering::Relaxed) {
        1.0
    } else {
        0.0
    }
}
