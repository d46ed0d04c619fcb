/// Version information for QR codes v7+
use crate::encoder::bch::BchEncoder;
use crate::models::Version;

/// Version info is 18 bits (6 data + 12 ECC) for versions 7-40
pub struct VersionInfo;

impl VersionInfo {
    /// Number of bits in a version word
    pub const LEN: usize = 18;

    /// 18-bit version word, or `None` below version 7
    pub fn bits(version: Version) -> Option<u32> {
        (version.number() >= 7)
            .then(|| BchEncoder::encode(u32::from(version.number()), BchEncoder::VERSION_GENERATOR))
    }

    /// (x, y) of bit `i` in both 6x3 blocks: left of the top-right finder,
    /// then its transpose above the bottom-left finder
    pub fn positions(size: usize, i: usize) -> [(usize, usize); 2] {
        let a = size - 11 + i % 3;
        let b = i / 3;
        [(a, b), (b, a)]
    }
}
