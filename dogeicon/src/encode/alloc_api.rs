use crate::{
    consts::{ICON_LEN, RASTER_LEN},
    encode::{EncodeError, IconEncodeContext},
    Style,
};
use alloc::vec::Vec;

/// An encoded icon together with what a decoder will make of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedIcon {
    /// The 1585 encoded bytes, style byte first.
    pub icon: Vec<u8>,
    /// The decoded 48x48 RGB preview.
    pub preview: Vec<u8>,
    pub style: Style,
}

impl IconEncodeContext {
    pub fn compress_to_vec(
        &self,
        raster: &[u8],
        components: usize,
    ) -> Result<CompressedIcon, EncodeError> {
        let mut icon = [0; ICON_LEN];
        let mut preview = [0; RASTER_LEN];
        let style = self.compress(raster, components, &mut icon, &mut preview)?;

        Ok(CompressedIcon {
            icon: icon.to_vec(),
            preview: preview.to_vec(),
            style,
        })
    }
}
