use crate::{bits::BitReader, consts::*, record::TileRecord, EncodedIcon, Raster, Style};
use itertools::iproduct;
use snafu::{ensure, Snafu};

pub mod tile;

#[cfg(feature = "alloc")]
mod alloc_api;
#[cfg(feature = "alloc")]
pub use alloc_api::*;

pub use tile::decode_tile;

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum DecodeError {
    #[snafu(display("Icon is truncated: {len} bytes given, {} required", ICON_LEN))]
    UnexpectedEof { len: usize },
}

/// Decodes an icon into a 48x48 RGB raster.
///
/// Only the first [`ICON_LEN`] bytes are read; anything after them is ignored. Any input of at
/// least that length decodes successfully. Returns the icon's style.
pub fn decompress(icon: &[u8], output: &mut Raster) -> Result<Style, DecodeError> {
    let icon = as_icon(icon)?;
    decompress_into(icon, output);
    Ok(Style::from_byte(icon[0]))
}

/// Iterates over the tile records of an icon in row-major tile order.
pub fn records(icon: &[u8]) -> Result<TileRecords<'_>, DecodeError> {
    let icon = as_icon(icon)?;
    Ok(TileRecords::new(icon))
}

fn as_icon(icon: &[u8]) -> Result<&EncodedIcon, DecodeError> {
    ensure!(
        icon.len() >= ICON_LEN,
        decode_error::UnexpectedEofSnafu { len: icon.len() }
    );

    icon[..ICON_LEN]
        .try_into()
        .map_err(|_| DecodeError::UnexpectedEof { len: icon.len() })
}

pub(crate) fn decompress_into(icon: &EncodedIcon, output: &mut Raster) {
    let style = Style::from_byte(icon[0]);
    let stride = ICON_SIZE * 3;

    let tiles = iproduct!(
        (0..ICON_SIZE).step_by(TILE_SIZE),
        (0..ICON_SIZE).step_by(TILE_SIZE)
    );
    for ((y, x), record) in tiles.zip(TileRecords::new(icon)) {
        let [tl, tr, bl, br] = decode_tile(&record, style);

        let top = y * stride + x * 3;
        let bottom = top + stride;
        output[top..top + 3].copy_from_slice(&tl);
        output[top + 3..top + 6].copy_from_slice(&tr);
        output[bottom..bottom + 3].copy_from_slice(&bl);
        output[bottom + 3..bottom + 6].copy_from_slice(&br);
    }
}

/// Iterator over the packed tile records of an icon.
#[derive(Debug, Clone)]
pub struct TileRecords<'a> {
    reader: BitReader<'a>,
}

impl<'a> TileRecords<'a> {
    #[inline]
    fn new(icon: &'a EncodedIcon) -> Self {
        Self {
            reader: BitReader::new(&icon[1..]),
        }
    }

    /// Bit offset of the next record within the payload.
    #[inline]
    pub fn bit_position(&self) -> usize {
        self.reader.bit_position()
    }
}

impl Iterator for TileRecords<'_> {
    type Item = TileRecord;

    #[inline]
    fn next(&mut self) -> Option<TileRecord> {
        self.reader
            .read(TILE_BITS as u32)
            .map(TileRecord::from_bits)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.reader.remaining_bits() / TILE_BITS;
        (n, Some(n))
    }
}

impl ExactSizeIterator for TileRecords<'_> {}
