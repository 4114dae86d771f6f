use dogeicon::{
    consts::{ICON_LEN, RASTER_LEN, TILE_COUNT},
    decode::{decompress, records},
    encode::encode_tile,
    utils::{dequantize_chroma, dequantize_luma, quantize_chroma, quantize_luma},
    ChromaPolicy, EncodeOptions, IconEncodeContext, Style, Topology,
};
use proptest::prelude::*;

fn style() -> impl Strategy<Value = Style> {
    prop_oneof![Just(Style::Flat), Just(Style::Linear)]
}

fn chroma_policy() -> impl Strategy<Value = ChromaPolicy> {
    prop::sample::select(ChromaPolicy::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn any_buffer_decodes(icon in prop::collection::vec(any::<u8>(), ICON_LEN..ICON_LEN + 16)) {
        let mut output = [0; RASTER_LEN];
        prop_assert!(decompress(&icon, &mut output).is_ok());
        prop_assert_eq!(records(&icon).unwrap().count(), TILE_COUNT);
    }

    #[test]
    fn short_buffers_fail(icon in prop::collection::vec(any::<u8>(), 0..ICON_LEN)) {
        let mut output = [0; RASTER_LEN];
        prop_assert!(decompress(&icon, &mut output).is_err());
    }

    #[test]
    fn any_raster_encodes_to_fixed_size(
        raster in prop::collection::vec(any::<u8>(), RASTER_LEN),
        chroma in chroma_policy(),
    ) {
        let compressed = IconEncodeContext::new(EncodeOptions::new().with_chroma(chroma))
            .compress_to_vec(&raster, 3)
            .unwrap();
        prop_assert_eq!(compressed.icon.len(), ICON_LEN);
        prop_assert!(compressed.icon[0] <= 1);
    }

    #[test]
    fn luma_quantization_is_stable(y in -64.0f32..512.0) {
        let once = dequantize_luma(quantize_luma(y));
        prop_assert_eq!(dequantize_luma(quantize_luma(once)), once);
    }

    #[test]
    fn chroma_quantization_is_stable(c in -256.0f32..256.0) {
        let once = dequantize_chroma(quantize_chroma(c));
        prop_assert_eq!(dequantize_chroma(quantize_chroma(once)), once);
    }

    #[test]
    fn uniform_tiles_pick_the_first_topology(
        color in any::<[u8; 3]>(),
        style in style(),
        chroma in chroma_policy(),
    ) {
        let record = encode_tile(&[color; 4], style, chroma);
        prop_assert_eq!(record.topology, Topology::Slash);
        prop_assert_eq!(record.y0, record.y1);
    }
}
