//! Per-channel frame compositor and render loop.
//!
//! Each tick walks the channels whose deadline has passed and runs the frame
//! pipeline: snapshot shared state, render the base effect, mix a pending
//! crossfade, blend the overlay, clamp to the power budget, and hand the
//! frame to the protocol encoder. State is only ever held for the snapshot
//! and the crossfade promotion, never across a render.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PulseTransport;
use crate::blend::{blend_apply, scale_opacity};
use crate::color::Rgbw;
use crate::crossfade::COMPLETE_THRESHOLD;
use crate::effect::{self, EffectParams, RenderTarget};
use crate::encoder::{StripEncoder, StripType};
use crate::gamma::GammaLut;
use crate::power;
use crate::state::{ChannelConfig, CompositorState};

/// Timing result of one tick, in the frame-scheduler shape: the caller
/// sleeps until `next_deadline` (or for `sleep_duration`) before ticking
/// again.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    pub next_deadline: Instant,
    pub sleep_duration: Duration,
}

struct RenderChannel<const MAX_PIXELS: usize> {
    framebuf: [Rgbw; MAX_PIXELS],
    xfade_buf: [Rgbw; MAX_PIXELS],
    overlay_buf: [Rgbw; MAX_PIXELS],
    gamma: GammaLut,
    /// Pixels actually in use; fixed at construction.
    len: usize,
    next_deadline: Instant,
    /// Cleared permanently when the configured pixel count does not fit the
    /// compiled-in buffers; the channel is skipped every cycle.
    enabled: bool,
}

/// Render-side engine: owns the frame buffers and the strip encoder, borrows
/// the shared [`CompositorState`].
pub struct Compositor<'a, const MAX_PIXELS: usize, const CH: usize> {
    state: &'a CompositorState<CH>,
    channels: [RenderChannel<MAX_PIXELS>; CH],
    encoder: StripEncoder,
}

impl<'a, const MAX_PIXELS: usize, const CH: usize> Compositor<'a, MAX_PIXELS, CH> {
    /// Create the render side and apply the per-channel configuration.
    ///
    /// A channel whose `pixel_count` exceeds `MAX_PIXELS` is disabled for
    /// the process lifetime; all other channels render normally.
    pub fn new(state: &'a CompositorState<CH>, configs: [ChannelConfig; CH]) -> Self {
        state.configure(&configs);
        let channels = core::array::from_fn(|i| {
            let config = &configs[i];
            let enabled = (config.pixel_count as usize) <= MAX_PIXELS;
            #[cfg(feature = "esp32-log")]
            if !enabled {
                println!(
                    "channel {} disabled: {} pixels exceed buffer capacity {}",
                    i, config.pixel_count, MAX_PIXELS
                );
            }
            RenderChannel {
                framebuf: [Rgbw::default(); MAX_PIXELS],
                xfade_buf: [Rgbw::default(); MAX_PIXELS],
                overlay_buf: [Rgbw::default(); MAX_PIXELS],
                gamma: GammaLut::new(config.gamma),
                len: (config.pixel_count as usize).min(MAX_PIXELS),
                next_deadline: Instant::from_millis(0),
                enabled,
            }
        });
        Self {
            state,
            channels,
            encoder: StripEncoder::new(),
        }
    }

    /// Process every channel whose deadline has elapsed, then report when
    /// the next one is due.
    pub fn tick<T: PulseTransport>(&mut self, now: Instant, transport: &mut T) -> FrameResult {
        for ch in 0..CH {
            if now >= self.channels[ch].next_deadline {
                self.render_channel(ch, now, transport);
            }
        }

        let next_deadline = self
            .channels
            .iter()
            .map(|c| c.next_deadline)
            .min()
            .unwrap_or(now);
        let sleep_duration = if next_deadline > now {
            next_deadline - now
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline,
            sleep_duration,
        }
    }

    /// The last frame rendered for a channel, for previews and tests.
    pub fn frame(&self, ch: usize) -> Option<&[Rgbw]> {
        let channel = self.channels.get(ch)?;
        Some(&channel.framebuf[..channel.len])
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_channel<T: PulseTransport>(&mut self, ch: usize, now: Instant, transport: &mut T) {
        let Some((config, snap)) = self.state.snapshot(ch) else {
            return;
        };

        let channel = &mut self.channels[ch];
        channel.next_deadline = now + config.frame_interval;
        if !channel.enabled {
            return;
        }

        let now_ms = now.as_millis() as u32;
        let index = ch as u8;
        let n = channel.len;
        let frame = &mut channel.framebuf[..n];

        match snap.current {
            None => frame.fill(Rgbw::default()),
            Some(current) => {
                render_layer(frame, &channel.gamma, index, config.strip, &current, now_ms);

                if snap.xfade.is_active() {
                    if let Some(pending) = snap.pending {
                        let scratch = &mut channel.xfade_buf[..n];
                        render_layer(scratch, &channel.gamma, index, config.strip, &pending, now_ms);

                        let mix = snap.xfade.mix(now).clamp(0.0, 1.0);
                        mix_frames(frame, scratch, mix);

                        if mix >= COMPLETE_THRESHOLD {
                            self.state.complete_crossfade(ch, pending);
                        }
                    }
                }

                if let Some(overlay) = snap.overlay {
                    let base = &mut channel.overlay_buf[..n];
                    base.copy_from_slice(frame);

                    let compose = &mut channel.xfade_buf[..n];
                    render_layer(compose, &channel.gamma, index, config.strip, &overlay, now_ms);

                    for i in 0..n {
                        let over = scale_opacity(compose[i], overlay.opacity);
                        frame[i] = blend_apply(overlay.blend, base[i], over);
                    }
                }
            }
        }

        let scale = power::scale_for_frame(frame, &power::config());
        let applied = power::apply_scale(frame, scale);
        self.state.record_power_scale(ch, applied);

        // A failed transmit drops this frame; the next deadline retries
        // naturally.
        if let Err(_err) = self
            .encoder
            .transmit(transport, frame, config.strip, config.order)
        {
            #[cfg(feature = "esp32-log")]
            println!("transmit failed on channel {}", ch);
        }
    }
}

/// Zero `dest`, then run the renderer for `params` into it. Unknown effect
/// ids leave the layer dark. Returns the renderer's energy sum.
fn render_layer(
    dest: &mut [Rgbw],
    gamma: &GammaLut,
    index: u8,
    strip: StripType,
    params: &EffectParams,
    now_ms: u32,
) -> u32 {
    dest.fill(Rgbw::default());
    let Some(fx) = effect::lookup(params.effect_id) else {
        return 0;
    };
    let mut target = RenderTarget {
        index,
        strip,
        gamma,
        pixels: dest,
    };
    (fx.render)(&mut target, params, now_ms, 0)
}

/// Per-component crossfade mix: `frame = frame * (1 - mix) + next * mix`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mix_frames(frame: &mut [Rgbw], next: &[Rgbw], mix: f32) {
    let inv = 1.0 - mix;
    for (dst, src) in frame.iter_mut().zip(next.iter()) {
        dst.r = (f32::from(dst.r) * inv + f32::from(src.r) * mix) as u8;
        dst.g = (f32::from(dst.g) * inv + f32::from(src.g) * mix) as u8;
        dst.b = (f32::from(dst.b) * inv + f32::from(src.b) * mix) as u8;
        dst.w = (f32::from(dst.w) * inv + f32::from(src.w) * mix) as u8;
    }
}
