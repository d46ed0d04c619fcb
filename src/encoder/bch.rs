/// BCH codes protecting the format and version information
pub struct BchEncoder;

impl BchEncoder {
    /// BCH(15,5) generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
    pub const FORMAT_GENERATOR: u32 = 0x537;
    /// BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
    pub const VERSION_GENERATOR: u32 = 0x1F25;

    /// Systematic codeword: `data` followed by the remainder of
    /// `data * x^deg` modulo `generator`
    pub fn encode(data: u32, generator: u32) -> u32 {
        let degree = Self::degree(generator);
        (data << degree) | Self::remainder(data << degree, generator)
    }

    /// Polynomial remainder of `value` modulo `generator` over GF(2)
    pub fn remainder(mut value: u32, generator: u32) -> u32 {
        let degree = Self::degree(generator);
        while value != 0 && Self::degree(value) >= degree {
            value ^= generator << (Self::degree(value) - degree);
        }
        value
    }

    fn degree(poly: u32) -> u32 {
        31 - poly.leading_zeros()
    }
}
