use dogeicon::{
    consts::{ICON_LEN, ICON_SIZE, PAYLOAD_LEN, RASTER_LEN, TILE_BITS, TILE_COUNT},
    decode::{decompress_to_vec, records},
    ChromaPolicy, EncodeOptions, IconEncodeContext, Style, TileRecord, Topology,
};
use image::{Rgb, RgbImage, Rgba, RgbaImage};

const SIZE: u32 = ICON_SIZE as u32;

fn test_images() -> Vec<(&'static str, RgbImage)> {
    vec![
        (
            "gradient",
            RgbImage::from_fn(SIZE, SIZE, |x, y| {
                Rgb([(x * 5) as u8, (y * 5) as u8, ((x + y) * 2) as u8])
            }),
        ),
        (
            "checker",
            RgbImage::from_fn(SIZE, SIZE, |x, y| {
                if (x / 3 + y / 3) % 2 == 0 {
                    Rgb([250, 240, 10])
                } else {
                    Rgb([20, 30, 200])
                }
            }),
        ),
        (
            "noise",
            RgbImage::from_fn(SIZE, SIZE, |x, y| {
                let v = (x * 7919 + y * 104729).wrapping_mul(2654435761);
                Rgb([(v >> 8) as u8, (v >> 16) as u8, (v >> 24) as u8])
            }),
        ),
        (
            "stripes",
            RgbImage::from_fn(SIZE, SIZE, |x, _| {
                if x % 4 < 2 {
                    Rgb([0, 0, 0])
                } else {
                    Rgb([255, 255, 255])
                }
            }),
        ),
    ]
}

fn bit(payload: &[u8], i: usize) -> u32 {
    u32::from(payload[i / 8] >> (7 - i % 8) & 1)
}

#[test]
fn roundtrip() {
    for (name, image) in test_images() {
        let raster = image.into_raw();

        for chroma in ChromaPolicy::ALL {
            let ctx = IconEncodeContext::new(EncodeOptions::new().with_chroma(chroma));
            let compressed = ctx.compress_to_vec(&raster, 3).unwrap();
            assert_eq!(compressed.icon.len(), ICON_LEN, "{name}");
            assert_eq!(compressed.icon[0], compressed.style.to_byte(), "{name}");

            let (style, decoded) = decompress_to_vec(&compressed.icon).unwrap();
            assert_eq!(style, compressed.style, "{name}");
            assert_eq!(decoded.len(), RASTER_LEN, "{name}");
            assert_eq!(decoded, compressed.preview, "preview mismatch for {name}");

            let mut written = Vec::new();
            let style = ctx.compress_to_writer(&raster, 3, &mut written).unwrap();
            assert_eq!(style, compressed.style);
            assert_eq!(written, compressed.icon, "writer mismatch for {name}");
        }
    }
}

#[test]
fn rgba_input_matches_rgb_input() {
    let rgba = RgbaImage::from_fn(SIZE, SIZE, |x, y| {
        Rgba([(x * 5) as u8, 90, (y * 5) as u8, (x ^ y) as u8])
    });
    let rgb = RgbImage::from_fn(SIZE, SIZE, |x, y| {
        Rgb([(x * 5) as u8, 90, (y * 5) as u8])
    });

    let ctx = IconEncodeContext::default();
    let a = ctx.compress_to_vec(&rgba.into_raw(), 4).unwrap();
    let b = ctx.compress_to_vec(&rgb.into_raw(), 3).unwrap();
    assert_eq!(a, b);
}

#[test]
fn uniform_image_prefers_flat() {
    for color in [[0, 0, 0], [255, 255, 255], [97, 3, 180], [128, 128, 128]] {
        let raster = RgbImage::from_pixel(SIZE, SIZE, Rgb(color)).into_raw();
        let compressed = IconEncodeContext::default()
            .compress_to_vec(&raster, 3)
            .unwrap();

        assert_eq!(compressed.style, Style::Flat, "{color:?}");
        assert!(records(&compressed.icon)
            .unwrap()
            .all(|r| r.topology == Topology::Slash));

        // every tile decodes the same way
        let first = &compressed.preview[..3];
        assert!(compressed.preview.chunks_exact(3).all(|p| p == first));
    }
}

#[test]
fn records_are_packed_without_gaps() {
    let raster = test_images().remove(2).1.into_raw();
    let compressed = IconEncodeContext::default()
        .compress_to_vec(&raster, 3)
        .unwrap();
    let payload = &compressed.icon[1..];
    assert_eq!(payload.len(), PAYLOAD_LEN);

    let mut iter = records(&compressed.icon).unwrap();
    for n in 0..TILE_COUNT {
        assert_eq!(iter.bit_position(), n * TILE_BITS);
        let record = iter.next().unwrap();

        // rebuild record n bit by bit: it must start right where record n - 1 ended
        let mut bits = 0;
        for i in n * TILE_BITS..(n + 1) * TILE_BITS {
            bits = bits << 1 | bit(payload, i);
        }
        assert_eq!(TileRecord::from_bits(bits), record, "record {n}");
    }
    assert_eq!(iter.bit_position(), PAYLOAD_LEN * 8);
    assert!(iter.next().is_none());
}

#[test]
fn forced_style_via_legacy_flags() {
    let raster = test_images().remove(0).1.into_raw();
    for (flags, style) in [(0b100, Style::Flat), (0b101, Style::Linear)] {
        let compressed = IconEncodeContext::new(EncodeOptions::from_flags(flags))
            .compress_to_vec(&raster, 3)
            .unwrap();
        assert_eq!(compressed.style, style);
        assert_eq!(compressed.icon[0], style.to_byte());
    }
}

#[test]
fn black_white_tiles_do_not_wrap() {
    let raster = RgbImage::from_fn(SIZE, SIZE, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    })
    .into_raw();

    for style in Style::ALL {
        let compressed = IconEncodeContext::new(EncodeOptions::new().with_forced_style(style))
            .compress_to_vec(&raster, 3)
            .unwrap();

        // each decoded pixel is either near black or near white, never a wrapped value
        let preview = &compressed.preview;
        for (pixel, truth) in preview.chunks_exact(3).zip(raster.chunks_exact(3)) {
            let spread = pixel.iter().max().unwrap() - pixel.iter().min().unwrap();
            assert!(spread <= 2, "{style:?} {pixel:?} for {truth:?}");
        }
    }
}
