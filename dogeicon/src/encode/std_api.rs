use crate::{
    consts::{ICON_LEN, RASTER_LEN},
    encode::{EncodeError, IconEncodeContext},
    Style,
};
use snafu::{ResultExt, Snafu};
use std::io::Write;

#[derive(Debug, Snafu)]
pub enum WriteError {
    #[snafu(context(false))]
    Encode {
        source: EncodeError,
    },
    WriteIo {
        source: std::io::Error,
    },
}

impl IconEncodeContext {
    /// Encodes a raster and writes the 1585 icon bytes to `w`.
    pub fn compress_to_writer<W: Write>(
        &self,
        raster: &[u8],
        components: usize,
        mut w: W,
    ) -> Result<Style, WriteError> {
        let mut icon = [0; ICON_LEN];
        let mut preview = [0; RASTER_LEN];
        let style = self.compress(raster, components, &mut icon, &mut preview)?;

        w.write_all(&icon).context(WriteIoSnafu)?;
        Ok(style)
    }
}
