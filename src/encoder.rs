//! Bit-level strip protocol encoder.
//!
//! Turns a frame buffer into a pulse train for two-wire addressable strips:
//! each pixel becomes 3 or 4 wire bytes (color order per strip wiring), each
//! byte expands MSB-first into one pulse pair per bit. The full bit stream is
//! pushed to the transport in bounded windows using a global bit index, so a
//! window boundary landing mid-byte cannot disturb ordering. A latch hold
//! follows the last window.

use embassy_time::Duration;

use crate::PulseTransport;
use crate::color::Rgbw;

/// Default transport window, in pulse symbols (bits).
pub const DEFAULT_SYMBOL_WINDOW: usize = 512;

/// Supported two-wire strip families. Their bit timings differ; do not mix
/// them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripType {
    /// WS2812B-class RGB strips, 3 wire bytes per pixel.
    Ws2812b,
    /// SK6812 RGBW strips, 4 wire bytes per pixel.
    Sk6812Rgbw,
}

/// Per-family bit timings in nanoseconds.
#[derive(Debug, Clone, Copy)]
pub struct BitTiming {
    pub t1h_ns: u16,
    pub t1l_ns: u16,
    pub t0h_ns: u16,
    pub t0l_ns: u16,
    pub reset_us: u16,
}

impl StripType {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Ws2812b => 3,
            Self::Sk6812Rgbw => 4,
        }
    }

    pub const fn is_rgbw(self) -> bool {
        matches!(self, Self::Sk6812Rgbw)
    }

    /// Datasheet bit timings for the family.
    pub const fn timing(self) -> BitTiming {
        match self {
            Self::Ws2812b => BitTiming {
                t1h_ns: 800,
                t1l_ns: 350,
                t0h_ns: 350,
                t0l_ns: 800,
                reset_us: 50,
            },
            Self::Sk6812Rgbw => BitTiming {
                t1h_ns: 600,
                t1l_ns: 600,
                t0h_ns: 300,
                t0l_ns: 900,
                reset_us: 80,
            },
        }
    }

    /// Latch hold after a frame: the datasheet reset interval, rounded up to
    /// the 1 ms granularity a task scheduler can actually guarantee.
    pub fn latch_hold(self) -> Duration {
        let reset = Duration::from_micros(u64::from(self.timing().reset_us));
        let floor = Duration::from_millis(1);
        if reset > floor { reset } else { floor }
    }

    pub const fn default_order(self) -> ColorOrder {
        match self {
            Self::Ws2812b => ColorOrder::Grb,
            Self::Sk6812Rgbw => ColorOrder::Grbw,
        }
    }
}

/// Wire-level byte sequence a strip expects per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOrder {
    Rgb,
    Grb,
    Rgbw,
    Grbw,
}

/// One transmitted bit: high for `high_ns`, then low for `low_ns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PulseSymbol {
    pub high_ns: u16,
    pub low_ns: u16,
}

/// The `offset`-th wire byte of a pixel under the given color order.
///
/// Offsets past the order's byte count fall back to the white component,
/// which is zero on RGB strips.
pub const fn wire_byte(px: Rgbw, order: ColorOrder, offset: usize) -> u8 {
    match order {
        ColorOrder::Rgb | ColorOrder::Rgbw => match offset {
            0 => px.r,
            1 => px.g,
            2 => px.b,
            _ => px.w,
        },
        ColorOrder::Grb | ColorOrder::Grbw => match offset {
            0 => px.g,
            1 => px.r,
            2 => px.b,
            _ => px.w,
        },
    }
}

/// Errors surfaced by a transmit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError<E> {
    /// The frame slice was empty.
    EmptyFrame,
    /// The transport rejected a window.
    Transport(E),
}

/// Fixed-window strip encoder.
///
/// Owns the symbol scratch buffer so transmits never allocate. `WINDOW` is
/// the transport's maximum burst size in symbols.
pub struct StripEncoder<const WINDOW: usize = DEFAULT_SYMBOL_WINDOW> {
    symbols: [PulseSymbol; WINDOW],
}

impl<const WINDOW: usize> StripEncoder<WINDOW> {
    pub const fn new() -> Self {
        const { assert!(WINDOW > 0, "symbol window must hold at least one bit") };
        Self {
            symbols: [PulseSymbol {
                high_ns: 0,
                low_ns: 0,
            }; WINDOW],
        }
    }

    /// Encode and transmit a full frame, then hold for the strip's latch
    /// interval.
    pub fn transmit<T: PulseTransport>(
        &mut self,
        transport: &mut T,
        frame: &[Rgbw],
        strip: StripType,
        order: ColorOrder,
    ) -> Result<(), EncodeError<T::Error>> {
        if frame.is_empty() {
            return Err(EncodeError::EmptyFrame);
        }

        let timing = strip.timing();
        let one = PulseSymbol {
            high_ns: timing.t1h_ns,
            low_ns: timing.t1l_ns,
        };
        let zero = PulseSymbol {
            high_ns: timing.t0h_ns,
            low_ns: timing.t0l_ns,
        };

        let stride = strip.bytes_per_pixel();
        let total_bits = frame.len() * stride * 8;

        let mut base_bit = 0usize;
        while base_bit < total_bits {
            let take = (total_bits - base_bit).min(WINDOW);

            for k in 0..take {
                // Global bit index keeps byte/bit ordering stable across
                // window boundaries, including boundaries inside a byte.
                let global_bit = base_bit + k;
                let byte_index = global_bit / 8;
                let bit_pos = 7 - (global_bit % 8);

                let px = frame[byte_index / stride];
                let byte = wire_byte(px, order, byte_index % stride);

                self.symbols[k] = if (byte >> bit_pos) & 1 != 0 { one } else { zero };
            }

            transport
                .transmit(&self.symbols[..take])
                .map_err(EncodeError::Transport)?;
            base_bit += take;
        }

        transport.hold(strip.latch_hold());
        Ok(())
    }
}

impl<const WINDOW: usize> Default for StripEncoder<WINDOW> {
    fn default() -> Self {
        Self::new()
    }
}
