use crate::{
    options::ChromaPolicy,
    record::TileRecord,
    topology::{Topology, YSamples},
    utils::{
        channel_error, dequantize_luma, quantize_chroma, quantize_luma, rgb_to_ycbcr, ChromaOffsets,
    },
    Style,
};

/// Encodes one 2x2 tile, corners in `[TL, TR, BL, BR]` order.
///
/// Every topology is tried against the true pixels and the one with the smallest summed
/// per-channel error wins. Ties go to the lowest topology index.
pub fn encode_tile(corners: &[[u8; 3]; 4], style: Style, chroma: ChromaPolicy) -> TileRecord {
    let ycc = corners.map(rgb_to_ycbcr);

    let (cb, cr) = chroma.select(&ycc);
    let (cb, cr) = (quantize_chroma(cb), quantize_chroma(cr));
    let offsets = ChromaOffsets::from_codes(cb, cr);

    let samples = YSamples::from_corners(ycc.map(|c| quantize_luma(c.y)));

    let mut best = Topology::Slash;
    let mut best_error = u32::MAX;
    for topology in Topology::ALL {
        let error = topology_error(corners, &samples, topology, style, &offsets);
        if error < best_error {
            best_error = error;
            best = topology;
        }
    }

    let (y0, y1) = samples.transmitted(best);
    TileRecord {
        y0,
        y1,
        cb,
        cr,
        topology: best,
    }
}

/// Summed absolute channel error of reconstructing `corners` with a topology.
pub fn topology_error(
    corners: &[[u8; 3]; 4],
    samples: &YSamples,
    topology: Topology,
    style: Style,
    offsets: &ChromaOffsets,
) -> u32 {
    samples
        .reconstruct(topology, style)
        .iter()
        .zip(corners)
        .map(|(&code, &truth)| channel_error(truth, offsets.apply(dequantize_luma(code))))
        .sum()
}
