//! Analog PWM fixture driver.
//!
//! The structurally simpler sibling of the LED compositor: one animation
//! record per PWM channel, a periodic tick that evaluates the active mode
//! and pushes a duty cycle to the PWM peripheral. Static modes write their
//! duty once on set and are skipped by the tick.

use embassy_time::Instant;
use heapless::{FnvIndexMap, String};
use libm::cosf;

/// Abstract duty-cycle sink (e.g. a PCA9685 behind I2C).
pub trait PwmBackend {
    /// Write a duty cycle (0.0-1.0) to one channel.
    fn set_duty(&mut self, channel: u8, duty: f32);
}

/// Per-channel animation mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PwmMode {
    /// Constant duty, written once on set.
    Static { duty: f32 },
    /// Raised-cosine breathing between `min` and `max` over `period_ms`.
    Breathe { min: f32, max: f32, period_ms: f32 },
    /// Random flicker around `base`, spread `flicker`, seeded.
    Candle { base: f32, flicker: f32, seed: u32 },
    /// Perceptually warm dimming: output duty is the square of the level.
    WarmDim { level: f32 },
}

/// Logical fixture kind a group maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmGroupKind {
    Rgb,
    Rgbw,
}

/// Mapping from one logical RGB(W) control to physical PWM channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmGroup {
    pub kind: PwmGroupKind,
    pub map_r: u8,
    pub map_g: u8,
    pub map_b: u8,
    pub map_w: u8,
}

const MAX_GROUPS: usize = 8;
const MAX_GROUP_NAME: usize = 24;

/// Animation state for `N` PWM channels plus the named group registry.
pub struct PwmDriver<const N: usize> {
    modes: [PwmMode; N],
    groups: FnvIndexMap<String<MAX_GROUP_NAME>, PwmGroup, MAX_GROUPS>,
}

impl<const N: usize> PwmDriver<N> {
    pub fn new() -> Self {
        Self {
            modes: [PwmMode::Static { duty: 0.0 }; N],
            groups: FnvIndexMap::new(),
        }
    }

    /// Hold a constant duty. Written immediately, not re-pushed each tick.
    pub fn set_static(&mut self, backend: &mut impl PwmBackend, ch: u8, duty: f32) {
        if usize::from(ch) >= N {
            return;
        }
        let duty = duty.clamp(0.0, 1.0);
        self.modes[usize::from(ch)] = PwmMode::Static { duty };
        backend.set_duty(ch, duty);
    }

    /// Warm-dim a channel: the linear `level` input maps to `level²` duty.
    pub fn set_warm_dim(&mut self, backend: &mut impl PwmBackend, ch: u8, level: f32) {
        if usize::from(ch) >= N {
            return;
        }
        let level = level.clamp(0.0, 1.0);
        self.modes[usize::from(ch)] = PwmMode::WarmDim { level };
        backend.set_duty(ch, level * level);
    }

    pub fn set_breathe(&mut self, ch: u8, min: f32, max: f32, period_ms: f32) {
        if usize::from(ch) >= N || period_ms <= 0.0 {
            return;
        }
        self.modes[usize::from(ch)] = PwmMode::Breathe {
            min: min.clamp(0.0, 1.0),
            max: max.clamp(0.0, 1.0),
            period_ms,
        };
    }

    pub fn set_candle(&mut self, ch: u8, base: f32, flicker: f32, seed: u32) {
        if usize::from(ch) >= N {
            return;
        }
        self.modes[usize::from(ch)] = PwmMode::Candle {
            base,
            flicker,
            seed,
        };
    }

    pub fn mode(&self, ch: u8) -> Option<PwmMode> {
        self.modes.get(usize::from(ch)).copied()
    }

    /// Evaluate all animated channels at `now` and push their duties.
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick(&mut self, now: Instant, backend: &mut impl PwmBackend) {
        let t_ms = now.as_millis() as u32;
        for (i, mode) in self.modes.iter().enumerate() {
            if let Some(duty) = Self::animated_duty(*mode, t_ms) {
                backend.set_duty(i as u8, duty);
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn animated_duty(mode: PwmMode, t_ms: u32) -> Option<f32> {
        match mode {
            PwmMode::Breathe {
                min,
                max,
                period_ms,
            } => {
                let phase = libm::fmodf(t_ms as f32 / period_ms, 1.0);
                let s = 0.5 - 0.5 * cosf(phase * 6.283);
                Some(min + (max - min) * s)
            }
            PwmMode::Candle {
                base,
                flicker,
                seed,
            } => {
                let x = t_ms
                    .wrapping_mul(1_664_525)
                    .wrapping_add(seed.wrapping_mul(1_013_904_223));
                let n = ((x >> 8) & 0xFFFF) as f32 / 65535.0;
                Some((base + (n - 0.5) * flicker).clamp(0.0, 1.0))
            }
            PwmMode::Static { .. } | PwmMode::WarmDim { .. } => None,
        }
    }

    /// Register or replace a named group. Fails when the registry is full or
    /// the name does not fit.
    pub fn define_group(&mut self, name: &str, group: PwmGroup) -> bool {
        let Ok(key) = String::try_from(name) else {
            return false;
        };
        self.groups.insert(key, group).is_ok()
    }

    pub fn group(&self, name: &str) -> Option<&PwmGroup> {
        let key = String::<MAX_GROUP_NAME>::try_from(name).ok()?;
        self.groups.get(&key)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Fan an RGB value out to a named group's mapped channels.
    pub fn group_set_rgb(
        &mut self,
        backend: &mut impl PwmBackend,
        name: &str,
        r: f32,
        g: f32,
        b: f32,
    ) -> bool {
        let Some(group) = self.group(name).copied() else {
            return false;
        };
        self.set_static(backend, group.map_r, r);
        self.set_static(backend, group.map_g, g);
        self.set_static(backend, group.map_b, b);
        true
    }

    /// Fan an RGBW value out; the white channel only applies to RGBW groups.
    pub fn group_set_rgbw(
        &mut self,
        backend: &mut impl PwmBackend,
        name: &str,
        r: f32,
        g: f32,
        b: f32,
        w: f32,
    ) -> bool {
        let Some(group) = self.group(name).copied() else {
            return false;
        };
        self.set_static(backend, group.map_r, r);
        self.set_static(backend, group.map_g, g);
        self.set_static(backend, group.map_b, b);
        if group.kind == PwmGroupKind::Rgbw {
            self.set_static(backend, group.map_w, w);
        }
        true
    }
}

impl<const N: usize> Default for PwmDriver<N> {
    fn default() -> Self {
        Self::new()
    }
}
