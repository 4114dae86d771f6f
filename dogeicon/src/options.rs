//! Encoder configuration.

use crate::{utils::YCbCr, Style};

/// How a tile's single chroma pair is derived from its four corners.
///
/// Only [`ChromaPolicy::TopLeft`] is used by default; the others exist for parity with encoders
/// that were built with a different setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChromaPolicy {
    /// Use the top-left corner's chroma as is.
    #[default]
    TopLeft,
    /// Mean of all four corners.
    Average4,
    /// Mean of the two top corners.
    AverageTop2,
    /// Bilinear blend weighted by corner darkness.
    IntensityWeighted,
}

impl ChromaPolicy {
    pub const ALL: [ChromaPolicy; 4] = [
        ChromaPolicy::TopLeft,
        ChromaPolicy::Average4,
        ChromaPolicy::AverageTop2,
        ChromaPolicy::IntensityWeighted,
    ];

    /// Picks the representative `(Cb, Cr)` for a tile, corners in `[TL, TR, BL, BR]` order.
    pub fn select(self, [c0, c1, c2, c3]: &[YCbCr; 4]) -> (f32, f32) {
        match self {
            ChromaPolicy::TopLeft => (c0.cb, c0.cr),
            ChromaPolicy::Average4 => (
                (c0.cb + c1.cb + c2.cb + c3.cb) / 4.0,
                (c0.cr + c1.cr + c2.cr + c3.cr) / 4.0,
            ),
            ChromaPolicy::AverageTop2 => ((c0.cb + c1.cb) / 2.0, (c0.cr + c1.cr) / 2.0),
            ChromaPolicy::IntensityWeighted => {
                let b = 1.0 / (1021.0 - (c0.y + c1.y + c2.y + c3.y));
                let wx = b * ((255.0 - c1.y) + (255.0 - c3.y));
                let wy = b * ((255.0 - c2.y) + (255.0 - c3.y));
                // the bottom-right weight uses wx twice; existing encoders do the same
                let blend = |v0: f32, v1: f32, v2: f32, v3: f32| {
                    (v0 * wx * wy)
                        + (v1 * (1.0 - wx) * wy)
                        + (v2 * wx * (1.0 - wy))
                        + (v3 * (1.0 - wx) * (1.0 - wx))
                };
                (
                    blend(c0.cb, c1.cb, c2.cb, c3.cb),
                    blend(c0.cr, c1.cr, c2.cr, c3.cr),
                )
            }
        }
    }

    /// Bits 3-4 of the legacy option word.
    #[inline]
    pub const fn from_flags(flags: u8) -> Self {
        match flags & FLAG_CHROMA_MASK {
            8 => ChromaPolicy::Average4,
            16 => ChromaPolicy::AverageTop2,
            24 => ChromaPolicy::IntensityWeighted,
            _ => ChromaPolicy::TopLeft,
        }
    }

    #[inline]
    pub const fn to_flags(self) -> u8 {
        match self {
            ChromaPolicy::TopLeft => 0,
            ChromaPolicy::Average4 => 8,
            ChromaPolicy::AverageTop2 => 16,
            ChromaPolicy::IntensityWeighted => 24,
        }
    }
}

/// Forced style, when [`FLAG_FORCE_STYLE`] is set.
pub const FLAG_STYLE: u8 = 0b0000_0001;
/// Skip the two-style trial and encode with [`FLAG_STYLE`] only.
pub const FLAG_FORCE_STYLE: u8 = 0b0000_0100;
/// Chroma policy selector, see [`ChromaPolicy::from_flags`].
pub const FLAG_CHROMA_MASK: u8 = 0b0001_1000;

/// Options for [`IconEncodeContext`](crate::IconEncodeContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    pub chroma: ChromaPolicy,
    /// Encode with this style only instead of keeping the better of both.
    pub force_style: Option<Style>,
}

impl EncodeOptions {
    pub const fn new() -> Self {
        Self {
            chroma: ChromaPolicy::TopLeft,
            force_style: None,
        }
    }

    pub const fn with_chroma(mut self, chroma: ChromaPolicy) -> Self {
        self.chroma = chroma;
        self
    }

    pub const fn with_forced_style(mut self, style: Style) -> Self {
        self.force_style = Some(style);
        self
    }

    /// Parses the option word accepted by existing encoders. Unknown bits are ignored.
    pub const fn from_flags(flags: u8) -> Self {
        Self {
            chroma: ChromaPolicy::from_flags(flags),
            force_style: if flags & FLAG_FORCE_STYLE != 0 {
                Some(Style::from_byte(flags & FLAG_STYLE))
            } else {
                None
            },
        }
    }

    pub const fn to_flags(self) -> u8 {
        let style = match self.force_style {
            Some(style) => FLAG_FORCE_STYLE | style.to_byte(),
            None => 0,
        };
        self.chroma.to_flags() | style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::rgb_to_ycbcr;

    #[test]
    fn legacy_flags() {
        assert_eq!(EncodeOptions::from_flags(0), EncodeOptions::default());
        assert_eq!(
            EncodeOptions::from_flags(0b101),
            EncodeOptions::new().with_forced_style(Style::Linear)
        );
        // style bit without the force bit does nothing
        assert_eq!(EncodeOptions::from_flags(0b1).force_style, None);

        for chroma in ChromaPolicy::ALL {
            for force_style in [None, Some(Style::Flat), Some(Style::Linear)] {
                let options = EncodeOptions {
                    chroma,
                    force_style,
                };
                assert_eq!(EncodeOptions::from_flags(options.to_flags()), options);
            }
        }
    }

    #[test]
    fn uniform_tiles_keep_their_chroma() {
        let c = rgb_to_ycbcr([200, 40, 90]);
        let corners = [c; 4];
        for policy in [
            ChromaPolicy::TopLeft,
            ChromaPolicy::Average4,
            ChromaPolicy::AverageTop2,
        ] {
            let (cb, cr) = policy.select(&corners);
            assert!((cb - c.cb).abs() < 1e-3, "{policy:?}");
            assert!((cr - c.cr).abs() < 1e-3, "{policy:?}");
        }
    }

    #[test]
    fn top_left_ignores_other_corners() {
        let tl = rgb_to_ycbcr([255, 0, 0]);
        let other = rgb_to_ycbcr([0, 0, 255]);
        let (cb, cr) = ChromaPolicy::TopLeft.select(&[tl, other, other, other]);
        assert_eq!((cb, cr), (tl.cb, tl.cr));

        let (cb, _) = ChromaPolicy::AverageTop2.select(&[tl, other, tl, tl]);
        assert!((cb - (tl.cb + other.cb) / 2.0).abs() < 1e-3);
    }
}
