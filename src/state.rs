//! Shared channel state and the control-plane command surface.
//!
//! Two execution contexts touch this state: control-plane handlers (REST,
//! MQTT, sync receiver) calling the setters, and the render loop taking a
//! per-frame snapshot. Everything mutable sits behind a `critical-section`
//! mutex; every access is a brief copy-in or copy-out, never a render.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};

use crate::crossfade::Crossfade;
use crate::effect::EffectParams;
use crate::encoder::{ColorOrder, StripType};

/// Static configuration of one output channel.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    pub strip: StripType,
    pub order: ColorOrder,
    pub pixel_count: u16,
    pub gamma: f32,
    /// Brightness cap exposed on the control surface; not applied in the
    /// render hot path.
    pub max_brightness: u8,
    pub frame_interval: Duration,
}

impl ChannelConfig {
    pub const DEFAULT: Self = Self {
        strip: StripType::Ws2812b,
        order: ColorOrder::Grb,
        pixel_count: 120,
        gamma: 2.2,
        max_brightness: 255,
        frame_interval: Duration::from_millis(16),
    };
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Read-only channel summary for the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelInfo {
    pub strip: StripType,
    pub order: ColorOrder,
    pub pixel_count: u16,
}

/// Control-plane command failures. All are rejected before any state
/// mutation; `Contended` is transient and worth a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    InvalidChannel,
    Contended,
}

#[derive(Clone, Copy)]
pub(crate) struct ChannelShared {
    pub(crate) config: ChannelConfig,
    pub(crate) current: Option<EffectParams>,
    pub(crate) pending: Option<EffectParams>,
    pub(crate) overlay: Option<EffectParams>,
    pub(crate) xfade: Crossfade,
    pub(crate) last_power_scale: f32,
}

impl ChannelShared {
    const DEFAULT: Self = Self {
        config: ChannelConfig::DEFAULT,
        current: None,
        pending: None,
        overlay: None,
        xfade: Crossfade::IDLE,
        last_power_scale: 1.0,
    };
}

/// Copy of one channel's effect state, taken under the lock and consumed
/// outside it.
#[derive(Clone, Copy)]
pub(crate) struct StateSnapshot {
    pub(crate) current: Option<EffectParams>,
    pub(crate) pending: Option<EffectParams>,
    pub(crate) overlay: Option<EffectParams>,
    pub(crate) xfade: Crossfade,
}

/// Shared compositor state for `CH` channels.
///
/// Lives in a `static`; the control plane holds `&self`, the render-side
/// [`Compositor`](crate::compositor::Compositor) borrows it for its lifetime.
pub struct CompositorState<const CH: usize> {
    channels: Mutex<RefCell<[ChannelShared; CH]>>,
}

impl<const CH: usize> CompositorState<CH> {
    pub const fn new() -> Self {
        Self {
            channels: Mutex::new(RefCell::new([ChannelShared::DEFAULT; CH])),
        }
    }

    fn with_channel<R>(
        &self,
        ch: usize,
        f: impl FnOnce(&mut ChannelShared) -> R,
    ) -> Result<R, CommandError> {
        if ch >= CH {
            return Err(CommandError::InvalidChannel);
        }
        critical_section::with(|cs| {
            let mut channels = self
                .channels
                .borrow(cs)
                .try_borrow_mut()
                .map_err(|_| CommandError::Contended)?;
            Ok(f(&mut channels[ch]))
        })
    }

    /// Set the base effect of a channel.
    ///
    /// With a zero fade, or when the channel shows nothing yet, the params
    /// apply immediately and any fade in flight is cancelled. Otherwise the
    /// params go to the pending slot and a crossfade window starts at `now`.
    pub fn set_base(
        &self,
        ch: usize,
        params: EffectParams,
        fade: Duration,
        now: Instant,
    ) -> Result<(), CommandError> {
        let sanitized = params.sanitized();
        self.with_channel(ch, |shared| {
            if shared.current.is_none() || fade.as_millis() == 0 {
                shared.current = Some(sanitized);
                shared.pending = None;
                shared.xfade.cancel();
            } else {
                shared.pending = Some(sanitized);
                shared.xfade.begin(now, fade);
            }
        })
    }

    /// Set or clear the overlay layer.
    pub fn set_overlay(
        &self,
        ch: usize,
        params: Option<EffectParams>,
    ) -> Result<(), CommandError> {
        self.with_channel(ch, |shared| {
            shared.overlay = params.map(EffectParams::sanitized);
        })
    }

    pub fn clear_overlay(&self, ch: usize) -> Result<(), CommandError> {
        self.set_overlay(ch, None)
    }

    /// Fill `out` with each channel's last-applied power scale. Channels
    /// never rendered report 1.0, as do slots past the channel count.
    pub fn power_scales(&self, out: &mut [f32]) {
        for slot in out.iter_mut() {
            *slot = 1.0;
        }
        critical_section::with(|cs| {
            if let Ok(channels) = self.channels.borrow(cs).try_borrow() {
                for (slot, shared) in out.iter_mut().zip(channels.iter()) {
                    *slot = shared.last_power_scale;
                }
            }
        });
    }

    pub const fn channel_count(&self) -> usize {
        CH
    }

    pub fn channel_info(&self, ch: usize) -> Option<ChannelInfo> {
        self.with_channel(ch, |shared| ChannelInfo {
            strip: shared.config.strip,
            order: shared.config.order,
            pixel_count: shared.config.pixel_count,
        })
        .ok()
    }

    /// Re-type a channel's strip family and color order at runtime. The
    /// pixel count is fixed for the channel's lifetime and stays unchanged.
    pub fn set_channel_type(
        &self,
        ch: usize,
        strip: StripType,
        order: ColorOrder,
    ) -> Result<(), CommandError> {
        self.with_channel(ch, |shared| {
            shared.config.strip = strip;
            shared.config.order = order;
        })
    }

    pub(crate) fn configure(&self, configs: &[ChannelConfig; CH]) {
        critical_section::with(|cs| {
            if let Ok(mut channels) = self.channels.borrow(cs).try_borrow_mut() {
                for (shared, config) in channels.iter_mut().zip(configs.iter()) {
                    shared.config = *config;
                }
            }
        });
    }

    pub(crate) fn snapshot(&self, ch: usize) -> Option<(ChannelConfig, StateSnapshot)> {
        self.with_channel(ch, |shared| {
            (
                shared.config,
                StateSnapshot {
                    current: shared.current,
                    pending: shared.pending,
                    overlay: shared.overlay,
                    xfade: shared.xfade,
                },
            )
        })
        .ok()
    }

    /// Promote the pending effect after a completed crossfade. Brief; runs
    /// under the same lock as the setters.
    pub(crate) fn complete_crossfade(&self, ch: usize, promoted: EffectParams) {
        let _ = self.with_channel(ch, |shared| {
            shared.current = Some(promoted);
            shared.pending = None;
            shared.xfade.cancel();
        });
    }

    pub(crate) fn record_power_scale(&self, ch: usize, scale: f32) {
        let _ = self.with_channel(ch, |shared| {
            shared.last_power_scale = scale;
        });
    }
}

impl<const CH: usize> Default for CompositorState<CH> {
    fn default() -> Self {
        Self::new()
    }
}
