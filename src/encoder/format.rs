/// Format information for QR code symbols
use crate::encoder::bch::BchEncoder;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// XOR mask applied to the BCH codeword so it is never all-zero (7.9.1)
const FORMAT_MASK: u32 = 0x5412;

/// Format info is 15 bits (5 data + 10 ECC)
/// Written twice: around the top-left finder, and split between the other two
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Level written into the word
    pub ec_level: ECLevel,
    /// Mask written into the word
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Format information for a level and mask
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    /// Masked 15-bit format word
    pub fn bits(&self) -> u16 {
        let data = (u32::from(self.ec_level.format_bits()) << 3) | u32::from(self.mask_pattern.bits());
        (BchEncoder::encode(data, BchEncoder::FORMAT_GENERATOR) ^ FORMAT_MASK) as u16
    }

    /// Module coordinates `(x, y)` of bit `i` (0 = least significant) in both copies
    pub fn positions(size: usize, i: usize) -> [(usize, usize); 2] {
        let first = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
        let second = if i < 8 {
            (size - 1 - i, 8)
        } else {
            (8, size - 15 + i)
        };
        [first, second]
    }

    /// Write both copies and the always-dark module into a symbol matrix
    pub fn write(&self, matrix: &mut BitMatrix) {
        let size = matrix.width();
        let bits = self.bits();
        for i in 0..15 {
            let dark = (bits >> i) & 1 != 0;
            for (x, y) in Self::positions(size, i) {
                matrix.set(x, y, dark);
            }
        }
        let (x, y) = dark_module(size);
        matrix.set(x, y, true);
    }
}

/// The single always-dark module beside the bottom-left finder
pub fn dark_module(size: usize) -> (usize, usize) {
    (8, size - 8)
}
