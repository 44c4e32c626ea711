use core::ops::BitOr;

use crate::Side;

/// A set of channels, by byte position within a 4-byte pixel.
///
/// Position 0 is called red, 1 green, 2 blue, 3 alpha. Nothing here looks
/// at the actual pixel format, so a BGRA buffer simply swaps the meaning of
/// [`ChannelMask::RED`] and [`ChannelMask::BLUE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelMask(u8);

impl ChannelMask {
    pub const NONE: Self = Self(0);
    pub const RED: Self = Self(1 << 0);
    pub const GREEN: Self = Self(1 << 1);
    pub const BLUE: Self = Self(1 << 2);
    pub const ALPHA: Self = Self(1 << 3);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Per-byte AND mask that zeroes the channels in this set.
    pub const fn keep_bytes(self) -> [u8; 4] {
        let mut out = [0xFF; 4];
        let mut i = 0;
        while i < 4 {
            if self.0 & (1 << i) != 0 {
                out[i] = 0;
            }
            i += 1;
        }
        out
    }

    /// [`keep_bytes`](Self::keep_bytes) as a native-endian pixel word.
    pub const fn keep_word(self) -> u32 {
        u32::from_ne_bytes(self.keep_bytes())
    }
}

impl BitOr for ChannelMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Channels cleared on each side of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tint {
    pub above: ChannelMask,
    pub below: ChannelMask,
}

impl Tint {
    /// The texture split tint: above keeps red, below keeps blue, green is
    /// cleared everywhere and alpha is never touched.
    pub const SPLIT: Self = Self {
        above: ChannelMask::GREEN.union(ChannelMask::BLUE),
        below: ChannelMask::RED.union(ChannelMask::GREEN),
    };

    /// Make `side` fully transparent and leave the other side untouched.
    pub const fn fade(side: Side) -> Self {
        match side {
            Side::Above => Self {
                above: ChannelMask::ALPHA,
                below: ChannelMask::NONE,
            },
            Side::Below => Self {
                above: ChannelMask::NONE,
                below: ChannelMask::ALPHA,
            },
        }
    }

    pub const fn clears(&self, side: Side) -> ChannelMask {
        match side {
            Side::Above => self.above,
            Side::Below => self.below,
        }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::SPLIT
    }
}
