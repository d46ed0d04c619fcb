/// Numeric mode encoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::encoder::bit_buffer::BitBuffer;

/// Packs decimal digits in groups of three
pub struct NumericEncoder;

impl NumericEncoder {
    /// True for ASCII digits
    pub fn can_encode(byte: u8) -> bool {
        byte.is_ascii_digit()
    }

    /// Bits needed for `count` digits
    pub fn bit_len(count: usize) -> usize {
        count / 3 * 10
            + match count % 3 {
                2 => 7,
                1 => 4,
                _ => 0,
            }
    }

    /// Pack digits into the buffer; callers guarantee every byte is a digit
    pub fn encode(digits: &[u8], buf: &mut BitBuffer) {
        for group in digits.chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
            buf.append_bits(value, group.len() as u8 * 3 + 1);
        }
    }
}
