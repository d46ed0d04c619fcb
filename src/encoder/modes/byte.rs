/// Byte mode encoder (Mode 0100) for 8-bit data
use crate::encoder::bit_buffer::BitBuffer;

/// Packs bytes verbatim
pub struct ByteEncoder;

impl ByteEncoder {
    /// Bits for `count` bytes
    pub fn bit_len(count: usize) -> usize {
        count * 8
    }

    /// Append each byte as 8 bits
    pub fn encode(bytes: &[u8], buf: &mut BitBuffer) {
        for &b in bytes {
            buf.append_bits(u32::from(b), 8);
        }
    }
}
