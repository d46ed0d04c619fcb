/// Alphanumeric mode encoder (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::encoder::bit_buffer::BitBuffer;

const ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Index of a byte in the 45-character set
    pub fn value_of(byte: u8) -> Option<u8> {
        ALPHANUMERIC_CHARSET
            .iter()
            .position(|&c| c == byte)
            .map(|i| i as u8)
    }

    /// True for bytes in the 45-character set
    pub fn can_encode(byte: u8) -> bool {
        Self::value_of(byte).is_some()
    }

    /// Bits needed for `count` characters
    pub fn bit_len(count: usize) -> usize {
        count / 2 * 11 + count % 2 * 6
    }

    /// Pack characters into the buffer; callers guarantee every byte is in the set
    pub fn encode(chars: &[u8], buf: &mut BitBuffer) {
        for pair in chars.chunks(2) {
            let value = pair.iter().fold(0u32, |acc, &c| {
                let v = Self::value_of(c);
                debug_assert!(v.is_some(), "byte {c:#04x} outside the alphanumeric set");
                acc * 45 + u32::from(v.unwrap_or(0))
            });
            buf.append_bits(value, if pair.len() == 2 { 11 } else { 6 });
        }
    }
}
