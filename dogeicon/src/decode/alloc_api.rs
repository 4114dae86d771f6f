use crate::{consts::RASTER_LEN, decode::decompress, DecodeError, Style};
use alloc::vec::Vec;

/// Decodes an icon into a freshly allocated 48x48 RGB raster.
pub fn decompress_to_vec(icon: &[u8]) -> Result<(Style, Vec<u8>), DecodeError> {
    let mut raster = [0; RASTER_LEN];
    let style = decompress(icon, &mut raster)?;
    Ok((style, raster.to_vec()))
}
