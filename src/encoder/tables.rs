//! Constant tables of ISO/IEC 18004:2015 (Model 2)
//!
//! Every lookup here is indexed by version and/or error correction level;
//! nothing is recomputed per encode call.

use crate::models::{ECLevel, Version, VersionTier};

// Error correction codewords per block (Table 9). Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

// Number of error correction blocks (Table 9). Index: [ec_level][version]
const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

// Character count indicator widths (Table 3). Index: [mode][tier]
// Modes: numeric, alphanumeric, byte. Tiers: 1-9, 10-26, 27-40.
const CHAR_COUNT_BITS: [[u8; 3]; 3] = [[10, 12, 14], [9, 11, 13], [8, 16, 16]];

// Alignment pattern centre coordinates, identical for rows and columns (Annex E)
const ALIGNMENT_PATTERN_POSITIONS: [&[usize]; 41] = [
    &[],
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

/// Block structure for one (version, level) pair
///
/// Blocks come in at most two groups: `short_blocks` blocks of
/// `short_data_len` data codewords followed by blocks holding one more.
/// Every block carries the same number of correction codewords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Total number of blocks
    pub num_blocks: usize,
    /// Correction codewords in every block
    pub ecc_per_block: usize,
    /// Blocks in the short group
    pub short_blocks: usize,
    /// Data codewords in a short block
    pub short_data_len: usize,
}

impl BlockLayout {
    /// Number of blocks in the long group
    pub fn long_blocks(&self) -> usize {
        self.num_blocks - self.short_blocks
    }

    /// Data codewords held by block `index`
    pub fn data_len(&self, index: usize) -> usize {
        if index < self.short_blocks {
            self.short_data_len
        } else {
            self.short_data_len + 1
        }
    }

    /// Data codewords over all blocks
    pub fn data_codewords(&self) -> usize {
        self.num_blocks * self.short_data_len + self.long_blocks()
    }

    /// Correction codewords over all blocks
    pub fn ecc_codewords(&self) -> usize {
        self.num_blocks * self.ecc_per_block
    }

    /// All codewords in the symbol
    pub fn total_codewords(&self) -> usize {
        self.data_codewords() + self.ecc_codewords()
    }
}

/// Block structure for a version and level
pub fn block_layout(version: Version, ec_level: ECLevel) -> BlockLayout {
    let v = version.number() as usize;
    let idx = ec_level.index();
    let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][v] as usize;
    let ecc_per_block = ECC_CODEWORDS_PER_BLOCK[idx][v] as usize;
    let total = total_codewords(version);
    BlockLayout {
        num_blocks,
        ecc_per_block,
        short_blocks: num_blocks - total % num_blocks,
        short_data_len: total / num_blocks - ecc_per_block,
    }
}

/// Modules available for codewords once all function patterns are placed,
/// including the remainder bits that never carry a codeword
pub fn raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            // two 6x3 version information blocks
            result -= 36;
        }
    }
    result
}

/// Total codewords (data + correction) a version holds
pub fn total_codewords(version: Version) -> usize {
    raw_data_modules(version) / 8
}

/// Leftover data modules that are always light (0, 3, 4 or 7)
pub fn remainder_bits(version: Version) -> usize {
    raw_data_modules(version) % 8
}

/// Data codewords available at a version and level
pub fn data_codewords(version: Version, ec_level: ECLevel) -> usize {
    let v = version.number() as usize;
    let idx = ec_level.index();
    total_codewords(version)
        - ECC_CODEWORDS_PER_BLOCK[idx][v] as usize * NUM_ERROR_CORRECTION_BLOCKS[idx][v] as usize
}

/// Character count field width for a mode index and version tier
pub(crate) fn char_count_bits(mode_index: usize, tier: VersionTier) -> u8 {
    CHAR_COUNT_BITS[mode_index][tier.index()]
}

/// Alignment pattern centres for a given version
pub fn alignment_pattern_positions(version: Version) -> &'static [usize] {
    ALIGNMENT_PATTERN_POSITIONS[version.number() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_raw_data_modules() {
        assert_eq!(raw_data_modules(v(1)), 208);
        assert_eq!(raw_data_modules(v(2)), 359);
        assert_eq!(raw_data_modules(v(7)), 1568);
        assert_eq!(raw_data_modules(v(40)), 29648);
        assert_eq!(remainder_bits(v(1)), 0);
        assert_eq!(remainder_bits(v(2)), 7);
        assert_eq!(remainder_bits(v(14)), 3);
        assert_eq!(remainder_bits(v(21)), 4);
    }

    #[test]
    fn test_data_codewords() {
        assert_eq!(data_codewords(v(1), ECLevel::L), 19);
        assert_eq!(data_codewords(v(1), ECLevel::M), 16);
        assert_eq!(data_codewords(v(1), ECLevel::Q), 13);
        assert_eq!(data_codewords(v(1), ECLevel::H), 9);
        assert_eq!(data_codewords(v(40), ECLevel::L), 2956);
        assert_eq!(data_codewords(v(40), ECLevel::H), 1276);
    }

    #[test]
    fn test_block_layout_two_groups() {
        // 5-Q: 2 blocks of 15 and 2 blocks of 16 data codewords, 18 ECC each
        let layout = block_layout(v(5), ECLevel::Q);
        assert_eq!(layout.num_blocks, 4);
        assert_eq!(layout.ecc_per_block, 18);
        assert_eq!(layout.short_blocks, 2);
        assert_eq!(layout.short_data_len, 15);
        assert_eq!(layout.data_len(1), 15);
        assert_eq!(layout.data_len(2), 16);
        assert_eq!(layout.data_codewords(), 62);
    }

    #[test]
    fn test_block_layouts_fill_every_version() {
        for version in Version::all() {
            for level in ECLevel::ALL {
                let layout = block_layout(version, level);
                assert!(layout.num_blocks > 0 && layout.ecc_per_block > 0);
                assert!(layout.short_blocks >= 1);
                assert_eq!(layout.total_codewords(), total_codewords(version));
                assert_eq!(layout.data_codewords(), data_codewords(version, level));
                let summed: usize = (0..layout.num_blocks)
                    .map(|b| layout.data_len(b) + layout.ecc_per_block)
                    .sum();
                assert_eq!(summed, total_codewords(version));
            }
        }
    }

    #[test]
    fn test_alignment_positions() {
        assert!(alignment_pattern_positions(v(1)).is_empty());
        assert_eq!(alignment_pattern_positions(v(2)), &[6, 18]);
        assert_eq!(alignment_pattern_positions(v(7)), &[6, 22, 38]);
        assert_eq!(
            alignment_pattern_positions(v(32)),
            &[6, 34, 60, 86, 112, 138]
        );
        for version in Version::all().skip(1) {
            let positions = alignment_pattern_positions(version);
            assert_eq!(positions.len(), version.number() as usize / 7 + 2);
            assert_eq!(positions.first(), Some(&6));
            assert_eq!(positions.last(), Some(&(version.size() - 7)));
        }
    }

    #[test]
    fn test_char_count_bits() {
        assert_eq!(char_count_bits(0, VersionTier::Small), 10);
        assert_eq!(char_count_bits(1, VersionTier::Medium), 11);
        assert_eq!(char_count_bits(2, VersionTier::Large), 16);
    }
}
