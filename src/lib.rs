#![no_std]

pub mod blend;
pub mod color;
pub mod compositor;
pub mod crossfade;
pub mod effect;
pub mod encoder;
pub mod gamma;
pub mod math;
pub mod palette;
pub mod power;
pub mod pwm;
pub mod segment;
pub mod state;
pub mod trigger;

pub use blend::BlendMode;
pub use color::{Rgb, Rgbw};
pub use compositor::{Compositor, FrameResult};
pub use crossfade::Crossfade;
pub use effect::{EffectParams, RenderTarget, lookup};
pub use encoder::{ColorOrder, PulseSymbol, StripEncoder, StripType};
pub use gamma::GammaLut;
pub use power::PowerConfig;
pub use pwm::{PwmBackend, PwmDriver, PwmGroup, PwmGroupKind, PwmMode};
pub use segment::Segment;
pub use state::{ChannelConfig, ChannelInfo, CommandError, CompositorState};

pub use embassy_time::{Duration, Instant};

/// Abstract pulse-train transport
///
/// Implement this trait to support different hardware platforms (e.g. an RMT
/// peripheral). The encoder hands over one bounded window of pulse symbols at
/// a time; `transmit` may block for the duration of that window.
pub trait PulseTransport {
    type Error;

    /// Transmit one window of pulse symbols, preserving their order.
    fn transmit(&mut self, symbols: &[PulseSymbol]) -> Result<(), Self::Error>;

    /// Hold the line idle for at least `duration` (strip latch/reset).
    fn hold(&mut self, duration: Duration);
}
