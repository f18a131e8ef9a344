//! Segment resolution.
//!
//! Effects address a contiguous sub-range of a channel's pixels. Resolution
//! clamps the requested range into the channel; an out-of-range start falls
//! back to the full channel (long-standing behavior that downstream presets
//! rely on, kept as-is).

use crate::effect::EffectParams;

/// Resolved pixel sub-range within a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: u16,
    pub len: u16,
}

impl Segment {
    pub const fn range(self) -> core::ops::Range<usize> {
        self.start as usize..(self.start + self.len) as usize
    }

    pub const fn is_full(self, n_pixels: u16) -> bool {
        self.start == 0 && self.len == n_pixels
    }
}

/// Resolve the segment requested by `params` against a channel of
/// `n_pixels`. `seg_len == 0` means "full channel".
pub const fn resolve(params: &EffectParams, n_pixels: u16) -> Segment {
    let mut s = Segment {
        start: params.seg_start,
        len: if params.seg_len != 0 {
            params.seg_len
        } else {
            n_pixels
        },
    };

    if n_pixels == 0 {
        return Segment { start: 0, len: 0 };
    }

    if s.start >= n_pixels {
        return Segment {
            start: 0,
            len: n_pixels,
        };
    }

    if s.start as u32 + s.len as u32 > n_pixels as u32 {
        s.len = n_pixels - s.start;
    }

    s
}
