//! Color transform and scalar quantizer.
//!
//! All constants are part of the format and must not be changed: two independent implementations
//! have to agree on every quantization code.

// RGB -> Y'CbCr (BT.709, full range)
pub const KR: f32 = 0.2126;
pub const KG: f32 = 0.7152;
pub const KB: f32 = 0.0722;
pub const CB_R: f32 = -0.1146;
pub const CB_G: f32 = -0.3854;
pub const CB_B: f32 = 0.5;
pub const CR_R: f32 = 0.5;
pub const CR_G: f32 = -0.4542;
pub const CR_B: f32 = -0.0458;

// Y'CbCr -> RGB
pub const R_CR: f32 = 1.5748;
pub const G_CB: f32 = -0.1873;
pub const G_CR: f32 = -0.4681;
pub const B_CB: f32 = 1.8556;

pub const LUMA_BIAS: f32 = 2.0;
pub const LUMA_SCALE: f32 = 0.1254;
pub const LUMA_UNSCALE: f32 = 8.0;
pub const CHROMA_BIAS: f32 = 127.5 + 2.0;
pub const CHROMA_SCALE: f32 = 0.1254;
pub const CHROMA_UNSCALE: f32 = 8.0;
pub const CHROMA_UNBIAS: f32 = -127.984;

/// Largest 5-bit quantization code.
pub const MAX_CODE: u8 = 31;

/// A pixel in Y'CbCr.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YCbCr {
    pub y: f32,
    pub cb: f32,
    pub cr: f32,
}

/// Additive RGB offsets derived from a dequantized chroma pair.
///
/// A reconstructed channel is `luma + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChromaOffsets {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl ChromaOffsets {
    #[inline]
    pub fn new(cb: f32, cr: f32) -> Self {
        Self {
            red: cr * R_CR,
            green: cr * G_CR + cb * G_CB,
            blue: cb * B_CB,
        }
    }

    /// Offsets for a pair of chroma quantization codes.
    #[inline]
    pub fn from_codes(cb: u8, cr: u8) -> Self {
        Self::new(dequantize_chroma(cb), dequantize_chroma(cr))
    }

    #[inline]
    pub fn apply(&self, y: f32) -> [f32; 3] {
        [y + self.red, y + self.green, y + self.blue]
    }
}

#[inline]
pub fn luma([r, g, b]: [u8; 3]) -> f32 {
    let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
    r * KR + g * KG + b * KB
}

#[inline]
pub fn rgb_to_ycbcr(pixel: [u8; 3]) -> YCbCr {
    let [r, g, b] = pixel.map(f32::from);

    YCbCr {
        y: luma(pixel),
        cb: r * CB_R + g * CB_G + b * CB_B,
        cr: r * CR_R + g * CR_G + b * CR_B,
    }
}

/// Truncates towards zero and saturates into a 5-bit code.
///
/// Negative inputs saturate to 0, which makes truncation and flooring equivalent here.
#[inline]
fn saturate_code(scaled: f32) -> u8 {
    (scaled as i32).clamp(0, i32::from(MAX_CODE)) as u8
}

#[inline]
pub fn quantize_luma(y: f32) -> u8 {
    saturate_code((y + LUMA_BIAS) * LUMA_SCALE)
}

#[inline]
pub fn dequantize_luma(code: u8) -> f32 {
    f32::from(code) * LUMA_UNSCALE
}

#[inline]
pub fn quantize_chroma(c: f32) -> u8 {
    saturate_code((c + CHROMA_BIAS) * CHROMA_SCALE)
}

#[inline]
pub fn dequantize_chroma(code: u8) -> f32 {
    f32::from(code) * CHROMA_UNSCALE + CHROMA_UNBIAS
}

/// Converts a reconstructed channel value into a byte, saturating at both ends.
#[inline]
pub fn clamp_channel(value: f32) -> u8 {
    (value as i32).clamp(0, 255) as u8
}

/// Sum of absolute differences between the true and reconstructed channels of one pixel.
///
/// The reconstruction is truncated towards zero but not clamped.
#[inline]
pub fn channel_error(truth: [u8; 3], reconstructed: [f32; 3]) -> u32 {
    truth
        .iter()
        .zip(reconstructed)
        .map(|(&t, r)| i32::from(t).abs_diff(r as i32))
        .sum()
}

/// Whole-image error between two RGB buffers: the summed absolute difference of the integer part
/// of each pixel's luma.
///
/// Both buffers use 3 bytes per pixel. Extra trailing bytes of the longer buffer are ignored.
pub fn luma_error(original: &[u8], reconstructed: &[u8]) -> u32 {
    original
        .chunks_exact(3)
        .zip(reconstructed.chunks_exact(3))
        .map(|(a, b)| {
            let a = luma([a[0], a[1], a[2]]) as u32;
            let b = luma([b[0], b[1], b[2]]) as u32;
            a.abs_diff(b)
        })
        .sum()
}
