//! Time-windowed crossfade between two base effects.

use embassy_time::{Duration, Instant};

/// Completion threshold: the compositor promotes the pending effect once the
/// mix reaches this value, so a fade finishes cleanly regardless of where the
/// last frame lands inside the window.
pub const COMPLETE_THRESHOLD: f32 = 0.995;

/// Crossfade window state.
#[derive(Debug, Clone, Copy)]
pub struct Crossfade {
    start: Instant,
    end: Instant,
    active: bool,
}

impl Crossfade {
    pub const IDLE: Self = Self {
        start: Instant::from_millis(0),
        end: Instant::from_millis(0),
        active: false,
    };

    /// Start a fade window at `now`. A zero duration leaves the fade
    /// inactive; the caller applies the new effect immediately instead.
    pub fn begin(&mut self, now: Instant, duration: Duration) {
        self.start = now;
        self.end = now + duration;
        self.active = duration.as_millis() > 0;
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Normalized progress at `now`, eased with smoother-step.
    ///
    /// Clamped to 0.0 before the window and 1.0 at or after its end; an
    /// inactive fade reports 1.0.
    #[allow(clippy::cast_precision_loss)]
    pub fn mix(&self, now: Instant) -> f32 {
        if !self.active || now >= self.end {
            return 1.0;
        }
        if now <= self.start {
            return 0.0;
        }
        let elapsed = (now - self.start).as_millis() as f32;
        let window = (self.end - self.start).as_millis() as f32;
        let u = elapsed / window;
        u * u * (3.0 - 2.0 * u)
    }
}

impl Default for Crossfade {
    fn default() -> Self {
        Self::IDLE
    }
}
