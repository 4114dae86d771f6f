//! Reference implementation for the DogeIcon avatar format.
//!
//! A DogeIcon is a lossy, fixed-ratio encoding of a 48x48 sRGB image, small enough to be embedded
//! in identity documents that are gossiped between untrusted peers. Every encoder must produce the
//! same bytes and every decoder the same pixels, so all arithmetic below is fixed by the format.
//!
//! # Layout
//!
//! - 1 style byte (see [`Style`])
//! - 1584 payload bytes: 576 tile records of 22 bits each, packed MSB-first without padding
//!
//! # Tiles
//!
//! The image is split into 24x24 tiles of 2x2 pixels, visited in row-major order. Each tile is
//! converted to full-range Y'CbCr (BT.709 coefficients), and stores a single chroma pair plus two
//! of its four luma samples. The remaining two corners are rebuilt from the transmitted ones
//! according to one of four [topologies](topology::Topology), chosen per tile by the encoder.
//!
//! ```plain
//! .- tile record (22 bits) -------------------------------.
//! |   Y0 (5)   |   Y1 (5)   |   Cb (5)   |   Cr (5)   | T |
//! `-------------------------------------------------------`
//! ```
//!
//! See [consts] for the sizes involved.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod bits;
pub mod decode;
pub mod encode;
pub mod options;
pub mod record;
pub mod topology;
pub mod utils;

pub use decode::{decompress, DecodeError};
pub use encode::{compress, EncodeError, IconEncodeContext};
pub use options::{ChromaPolicy, EncodeOptions};
pub use record::TileRecord;
pub use topology::Topology;

/// An encoded icon, style byte included.
pub type EncodedIcon = [u8; consts::ICON_LEN];

/// A decoded 48x48 RGB image, 3 bytes per pixel, row-major.
pub type Raster = [u8; consts::RASTER_LEN];

pub mod consts {
    /// Width and height of an icon, in pixels.
    pub const ICON_SIZE: usize = 48;

    /// Width and height of a tile, in pixels.
    pub const TILE_SIZE: usize = 2;

    /// Number of tiles per row and per column.
    pub const TILES_PER_SIDE: usize = ICON_SIZE / TILE_SIZE;

    /// Total number of tiles in an icon.
    pub const TILE_COUNT: usize = TILES_PER_SIDE * TILES_PER_SIDE;

    /// Width of a single packed tile record.
    pub const TILE_BITS: usize = 22;

    /// Size of the packed tile records: `576 * 22 / 8`.
    pub const PAYLOAD_LEN: usize = TILE_COUNT * TILE_BITS / 8;

    /// Size of an encoded icon: style byte plus payload.
    pub const ICON_LEN: usize = 1 + PAYLOAD_LEN;

    /// Size of a decoded icon, 3 bytes per pixel.
    pub const RASTER_LEN: usize = ICON_SIZE * ICON_SIZE * 3;

    /// Bit 0 of the style byte. The other 7 bits are reserved for visual effects.
    pub const STYLE_MASK: u8 = 0b0000_0001;

    const _: () = assert!(TILE_COUNT * TILE_BITS % 8 == 0);
    const _: () = assert!(PAYLOAD_LEN == 1584);
}

/// Global interpolation style of an icon, stored in bit 0 of the leading byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Style {
    /// Missing corners copy one of the transmitted samples.
    #[default]
    Flat = 0,
    /// Missing corners are interpolated between the transmitted samples.
    Linear = 1,
}

impl Style {
    pub const ALL: [Style; 2] = [Style::Flat, Style::Linear];

    /// Reads the style from a style byte. Reserved bits are ignored.
    #[inline]
    pub const fn from_byte(byte: u8) -> Self {
        if byte & consts::STYLE_MASK == 0 {
            Style::Flat
        } else {
            Style::Linear
        }
    }

    #[inline]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_style_bits_are_ignored() {
        assert_eq!(Style::from_byte(0b1111_1110), Style::Flat);
        assert_eq!(Style::from_byte(0b1000_0001), Style::Linear);
        assert_eq!(Style::from_byte(Style::Linear.to_byte()), Style::Linear);
    }

    #[test]
    fn sizes() {
        assert_eq!(consts::TILE_COUNT, 576);
        assert_eq!(consts::ICON_LEN, 1585);
        assert_eq!(consts::RASTER_LEN, 6912);
    }
}
