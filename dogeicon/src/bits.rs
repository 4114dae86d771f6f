//! MSB-first bit packing over a byte buffer.
//!
//! Records are written back to back without padding: a record starts at the bit right after the
//! previous one ends, regardless of byte boundaries.

use byteorder::{BigEndian, ByteOrder};

/// Widest field that can be written or read in one call.
pub(crate) const MAX_FIELD_BITS: u32 = 25;

#[inline]
fn valid_width(width: u32) -> bool {
    (1..=MAX_FIELD_BITS).contains(&width)
}

/// Writes fixed-width fields into a zero-initialized byte buffer.
#[derive(Debug)]
pub(crate) struct BitWriter<'a> {
    buf: &'a mut [u8],
    bit_pos: usize,
}

impl<'a> BitWriter<'a> {
    /// The buffer is expected to be zeroed; bits are OR-ed in.
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, bit_pos: 0 }
    }

    /// Number of bits written so far.
    #[inline]
    pub fn bit_position(&self) -> usize {
        self.bit_pos
    }

    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.buf.len() * 8 - self.bit_pos
    }

    /// Appends the low `width` bits of `value`.
    ///
    /// Returns `false` without writing anything if the field does not fit, or if `width` is
    /// outside `1..=MAX_FIELD_BITS`.
    #[must_use]
    pub fn write(&mut self, value: u32, width: u32) -> bool {
        if !valid_width(width) || width as usize > self.remaining_bits() {
            return false;
        }

        let byte = self.bit_pos / 8;
        let shift = self.bit_pos % 8;
        let mask = (1u32 << width) - 1;
        // left-align the field inside a 32-bit window starting at `byte`
        let field = (value & mask) << (32 - width as usize - shift);

        let mut window = [0u8; 4];
        let end = (byte + 4).min(self.buf.len());
        window[..end - byte].copy_from_slice(&self.buf[byte..end]);
        let merged = BigEndian::read_u32(&window) | field;
        BigEndian::write_u32(&mut window, merged);
        self.buf[byte..end].copy_from_slice(&window[..end - byte]);

        self.bit_pos += width as usize;
        true
    }
}

/// Reads fixed-width fields from a byte buffer.
///
/// Never reads past the end of the buffer: missing trailing bits read as zero.
#[derive(Debug, Clone)]
pub(crate) struct BitReader<'a> {
    buf: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, bit_pos: 0 }
    }

    #[inline]
    pub fn bit_position(&self) -> usize {
        self.bit_pos
    }

    #[inline]
    pub fn remaining_bits(&self) -> usize {
        (self.buf.len() * 8).saturating_sub(self.bit_pos)
    }

    /// Reads the next `width` bits, or `None` if fewer remain or `width` is outside
    /// `1..=MAX_FIELD_BITS`.
    pub fn read(&mut self, width: u32) -> Option<u32> {
        if !valid_width(width) || width as usize > self.remaining_bits() {
            return None;
        }

        let byte = self.bit_pos / 8;
        let shift = self.bit_pos % 8;

        let mut window = [0u8; 4];
        let end = (byte + 4).min(self.buf.len());
        window[..end - byte].copy_from_slice(&self.buf[byte..end]);
        let bits = (BigEndian::read_u32(&window) << shift) >> (32 - width);

        self.bit_pos += width as usize;
        Some(bits)
    }
}
