use crate::{
    record::TileRecord,
    topology::{avg, Topology},
    utils::{clamp_channel, dequantize_luma, ChromaOffsets},
    Style,
};

/// Rebuilds the four corner lumas `[TL, TR, BL, BR]` of a tile.
///
/// Linear diagonals fill the off-axis corners with the mean of the two transmitted codes.
#[inline]
pub fn corner_lumas(record: &TileRecord, style: Style) -> [f32; 4] {
    let TileRecord { y0, y1, .. } = *record;
    let (ya, yb) = (dequantize_luma(y0), dequantize_luma(y1));

    match (style, record.topology) {
        (Style::Flat, Topology::Slash) => [ya, ya, ya, yb],
        (Style::Flat, Topology::Backslash) => [yb, ya, yb, yb],
        (Style::Linear, Topology::Slash) => {
            let mid = dequantize_luma(avg(y0, y1));
            [ya, mid, mid, yb]
        }
        (Style::Linear, Topology::Backslash) => {
            let mid = dequantize_luma(avg(y0, y1));
            [mid, ya, yb, mid]
        }
        (_, Topology::Horizontal) => [ya, ya, yb, yb],
        (_, Topology::Vertical) => [ya, yb, ya, yb],
    }
}

/// Decodes one tile record into its four corner pixels, `[TL, TR, BL, BR]`.
#[inline]
pub fn decode_tile(record: &TileRecord, style: Style) -> [[u8; 3]; 4] {
    let offsets = ChromaOffsets::from_codes(record.cb, record.cr);
    corner_lumas(record, style).map(|y| offsets.apply(y).map(clamp_channel))
}
