use crate::{
    bits::BitWriter, consts::*, decode::decompress_into, options::EncodeOptions, utils::luma_error,
    EncodedIcon, Raster, Style,
};
use itertools::iproduct;
use snafu::{ensure, Snafu};

pub mod tile;

#[cfg(feature = "alloc")]
mod alloc_api;
#[cfg(feature = "alloc")]
pub use alloc_api::*;

#[cfg(feature = "std")]
mod std_api;
#[cfg(feature = "std")]
pub use std_api::*;

pub use tile::encode_tile;

#[derive(Debug, Snafu)]
pub enum EncodeError {
    #[snafu(display(
        "Unsupported pixel layout: {components} components per pixel (expected 3 or 4)"
    ))]
    InvalidComponents { components: usize },
    #[snafu(display(
        "Raster is not 48x48: expected {expected} bytes, but {actual} bytes were given"
    ))]
    InvalidRasterLength { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IconEncodeContext {
    pub options: EncodeOptions,
}

impl IconEncodeContext {
    pub const fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Encodes a 48x48 raster with 3 or 4 bytes per pixel (the 4th byte is skipped).
    ///
    /// Both styles are tried and the one whose reconstruction is closest to the input is kept,
    /// preferring [`Style::Flat`] on ties, unless the options force a style. The decoded preview of
    /// the selected encoding is written to `preview`.
    ///
    /// Returns the selected style.
    pub fn compress(
        &self,
        raster: &[u8],
        components: usize,
        icon: &mut EncodedIcon,
        preview: &mut Raster,
    ) -> Result<Style, EncodeError> {
        check_raster(raster, components)?;

        if let Some(style) = self.options.force_style {
            log::trace!("encoding with forced {style:?} style");
            self.compress_unchecked(raster, components, style, icon);
            decompress_into(icon, preview);
            return Ok(style);
        }

        let mut flat = [0; ICON_LEN];
        let mut flat_preview = [0; RASTER_LEN];
        self.compress_unchecked(raster, components, Style::Flat, &mut flat);
        decompress_into(&flat, &mut flat_preview);

        self.compress_unchecked(raster, components, Style::Linear, icon);
        decompress_into(icon, preview);

        let flat_error = luma_error_strided(raster, components, &flat_preview);
        let linear_error = luma_error_strided(raster, components, preview);
        log::debug!("style error: flat {flat_error}, linear {linear_error}");

        if flat_error <= linear_error {
            *icon = flat;
            *preview = flat_preview;
            return Ok(Style::Flat);
        }

        Ok(Style::Linear)
    }

    /// Encodes a raster with a single style, without decoding it back.
    pub fn compress_style(
        &self,
        raster: &[u8],
        components: usize,
        style: Style,
        icon: &mut EncodedIcon,
    ) -> Result<(), EncodeError> {
        check_raster(raster, components)?;
        self.compress_unchecked(raster, components, style, icon);
        Ok(())
    }

    fn compress_unchecked(
        &self,
        raster: &[u8],
        components: usize,
        style: Style,
        icon: &mut EncodedIcon,
    ) {
        icon.fill(0);
        icon[0] = style.to_byte();

        let stride = ICON_SIZE * components;
        let pixel = |offset: usize| [raster[offset], raster[offset + 1], raster[offset + 2]];

        let mut w = BitWriter::new(&mut icon[1..]);
        for (y, x) in iproduct!(
            (0..ICON_SIZE).step_by(TILE_SIZE),
            (0..ICON_SIZE).step_by(TILE_SIZE)
        ) {
            let top = y * stride + x * components;
            let bottom = top + stride;
            let corners = [
                pixel(top),
                pixel(top + components),
                pixel(bottom),
                pixel(bottom + components),
            ];

            let record = tile::encode_tile(&corners, style, self.options.chroma);
            if !w.write(record.to_bits(), TILE_BITS as u32) {
                // the payload holds exactly TILE_COUNT records
                unreachable!("tile record overflows the payload");
            }
        }
        debug_assert_eq!(w.bit_position(), PAYLOAD_LEN * 8);
    }
}

/// Encodes a raster with the given options. See [`IconEncodeContext::compress`].
pub fn compress(
    raster: &[u8],
    components: usize,
    options: EncodeOptions,
    icon: &mut EncodedIcon,
    preview: &mut Raster,
) -> Result<Style, EncodeError> {
    IconEncodeContext::new(options).compress(raster, components, icon, preview)
}

fn check_raster(raster: &[u8], components: usize) -> Result<(), EncodeError> {
    ensure!(
        matches!(components, 3 | 4),
        InvalidComponentsSnafu { components }
    );

    let expected = ICON_SIZE * ICON_SIZE * components;
    ensure!(
        raster.len() == expected,
        InvalidRasterLengthSnafu {
            expected,
            actual: raster.len()
        }
    );

    Ok(())
}

/// [`luma_error`] for an input that may carry a 4th component per pixel.
fn luma_error_strided(raster: &[u8], components: usize, reconstructed: &Raster) -> u32 {
    if components == 3 {
        return luma_error(raster, reconstructed);
    }

    raster
        .chunks_exact(components)
        .zip(reconstructed.chunks_exact(3))
        .map(|(a, b)| luma_error(&a[..3], b))
        .sum()
}
