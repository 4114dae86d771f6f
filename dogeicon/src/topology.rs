//! Tile topologies and the luma sample tables behind them.
//!
//! ```plain
//!  0 = 0/   1 = \1   2 = 00   3 = 01
//!      /3       2\       22       01
//! ```
//!
//! Each topology keeps two of the four quantized corner lumas. The other two corners are either
//! copies of a kept sample ([`Style::Flat`]) or averages of samples ([`Style::Linear`]).

use crate::Style;

/// Corner order used throughout the codec.
pub const TOP_LEFT: usize = 0;
pub const TOP_RIGHT: usize = 1;
pub const BOTTOM_LEFT: usize = 2;
pub const BOTTOM_RIGHT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Topology {
    /// `/` diagonal: keeps top-left and bottom-right.
    Slash = 0,
    /// `\` diagonal: keeps top-right and bottom-left.
    Backslash = 1,
    /// `-` horizontal: keeps top-left and bottom-left.
    Horizontal = 2,
    /// `|` vertical: keeps top-left and top-right.
    Vertical = 3,
}

impl Topology {
    pub const ALL: [Topology; 4] = [
        Topology::Slash,
        Topology::Backslash,
        Topology::Horizontal,
        Topology::Vertical,
    ];

    /// Maps the low two bits to a topology. Total over every input.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Topology::Slash,
            1 => Topology::Backslash,
            2 => Topology::Horizontal,
            _ => Topology::Vertical,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Indices into [`YSamples`] reconstructing `[TL, TR, BL, BR]` for the given style.
    #[inline]
    pub const fn reconstruction(self, style: Style) -> [usize; 4] {
        RECONSTRUCTION[style.index()][self as usize]
    }

    /// The two raw corners that are transmitted as `(Y0, Y1)`. Independent of the style.
    #[inline]
    pub const fn transmitted(self) -> [usize; 2] {
        TRANSMITTED[self as usize]
    }
}

const RECONSTRUCTION: [[[usize; 4]; 4]; 2] = [
    // flat
    [
        [0, 0, 0, 3], // 0 0 / 0 3
        [2, 1, 2, 2], // 2 1 / 2 2
        [0, 0, 2, 2], // 0 0 / 2 2
        [0, 1, 0, 1], // 0 1 / 0 1
    ],
    // linear
    [
        [0, 4, 4, 3], // lerp along /
        [5, 1, 2, 5], // lerp along \
        [6, 6, 7, 7], // centres of the top and bottom edges
        [8, 9, 8, 9], // centres of the left and right edges
    ],
];

const TRANSMITTED: [[usize; 2]; 4] = [
    [TOP_LEFT, BOTTOM_RIGHT],
    [TOP_RIGHT, BOTTOM_LEFT],
    [TOP_LEFT, BOTTOM_LEFT],
    [TOP_LEFT, TOP_RIGHT],
];

/// The ten quantized luma samples a tile can be reconstructed from.
///
/// - 0..=3: raw corners (TL, TR, BL, BR)
/// - 4: `/` diagonal average, 5: `\` diagonal average
/// - 6: top edge, 7: bottom edge
/// - 8: left edge, 9: right edge
///
/// Averages are taken over the quantization codes, rounding down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YSamples(pub [u8; 10]);

impl YSamples {
    pub const fn from_corners([tl, tr, bl, br]: [u8; 4]) -> Self {
        Self([
            tl,
            tr,
            bl,
            br,
            avg(tl, br),
            avg(tr, bl),
            avg(tl, tr),
            avg(bl, br),
            avg(tl, bl),
            avg(tr, br),
        ])
    }

    /// Luma codes of the four corners as rebuilt by a topology.
    #[inline]
    pub fn reconstruct(&self, topology: Topology, style: Style) -> [u8; 4] {
        topology.reconstruction(style).map(|i| self.0[i])
    }

    /// The `(Y0, Y1)` pair sent for a topology.
    #[inline]
    pub fn transmitted(&self, topology: Topology) -> (u8, u8) {
        let [a, b] = topology.transmitted();
        (self.0[a], self.0[b])
    }
}

/// Floor of the mean of two quantization codes.
#[inline]
pub const fn avg(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) >> 1) as u8
}
