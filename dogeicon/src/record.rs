use crate::topology::Topology;

/// One packed tile: two luma codes, a chroma pair and a topology.
///
/// ```plain
/// .- TileRecord -----------------------------------------------------------.
/// | 21 .. 17 | 16 .. 12 | 11 ..  7 |  6 ..  2 |  1  0 |
/// |----------+----------+----------+----------+-------|
/// |    Y0    |    Y1    |    Cb    |    Cr    | topo  |
/// `------------------------------------------------------------------------`
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRecord {
    pub y0: u8,
    pub y1: u8,
    pub cb: u8,
    pub cr: u8,
    pub topology: Topology,
}

const FIELD_MASK: u32 = 0b1_1111;

impl TileRecord {
    /// Packs the record into the low 22 bits. Codes are masked to 5 bits.
    #[inline]
    pub const fn to_bits(self) -> u32 {
        (self.y0 as u32 & FIELD_MASK) << 17
            | (self.y1 as u32 & FIELD_MASK) << 12
            | (self.cb as u32 & FIELD_MASK) << 7
            | (self.cr as u32 & FIELD_MASK) << 2
            | self.topology as u32
    }

    /// Unpacks the low 22 bits. Every bit pattern is a valid record.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            y0: ((bits >> 17) & FIELD_MASK) as u8,
            y1: ((bits >> 12) & FIELD_MASK) as u8,
            cb: ((bits >> 7) & FIELD_MASK) as u8,
            cr: ((bits >> 2) & FIELD_MASK) as u8,
            topology: Topology::from_bits(bits as u8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_layout() {
        let record = TileRecord {
            y0: 0b10001,
            y1: 0b00011,
            cb: 0b11111,
            cr: 0b00000,
            topology: Topology::Horizontal,
        };

        assert_eq!(record.to_bits(), 0b10001_00011_11111_00000_10);
        assert_eq!(TileRecord::from_bits(record.to_bits()), record);
    }

    #[test]
    fn upper_bits_are_ignored() {
        let record = TileRecord::from_bits(0xFFC0_0000);
        assert_eq!(record.to_bits(), 0);
    }
}
