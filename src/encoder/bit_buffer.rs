/// Append-only bit writer, most significant bit first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    len: usize,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Number of bits written so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// True before the first bit is written
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append the low `count` bits of `value`, high bit first
    pub fn append_bits(&mut self, value: u32, count: u8) {
        assert!(count <= 31 && value >> count == 0, "value out of range");
        for i in (0..count).rev() {
            self.push((value >> i) & 1 != 0);
        }
    }

    /// Append a single bit
    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    /// Zero bits needed to reach the next byte boundary
    pub fn bits_to_byte_boundary(&self) -> usize {
        (8 - self.len % 8) % 8
    }

    /// Packed bytes; a trailing partial byte is zero-padded
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Written bytes, the last one zero-filled on the right
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_bits_msb_first() {
        let mut buf = BitBuffer::new();
        buf.append_bits(0b0001, 4);
        buf.append_bits(8, 10);
        assert_eq!(buf.len(), 14);
        assert_eq!(buf.as_bytes(), &[0b0001_0000, 0b0010_0000]);
        assert_eq!(buf.bits_to_byte_boundary(), 2);
    }

    #[test]
    fn test_zero_count_is_noop() {
        let mut buf = BitBuffer::new();
        buf.append_bits(0, 0);
        assert!(buf.is_empty());
        assert_eq!(buf.bits_to_byte_boundary(), 0);
    }

    #[test]
    #[should_panic(expected = "value out of range")]
    fn test_value_wider_than_count() {
        BitBuffer::new().append_bits(0b100, 2);
    }
}
