//! Block split and interleaving (ISO/IEC 18004:2015 7.5.2 and 7.6)

use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::tables::{self, BlockLayout};
use crate::models::{ECLevel, Version};

/// One error correction block: its share of the data plus correction codewords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Data codewords of this block
    pub data: &'a [u8],
    /// Correction codewords computed for `data`
    pub ecc: Vec<u8>,
}

/// Split `data` into blocks per the layout and compute each block's correction codewords
pub fn split_blocks<'a>(data: &'a [u8], layout: &BlockLayout) -> Vec<Block<'a>> {
    assert_eq!(
        data.len(),
        layout.data_codewords(),
        "data length does not match block layout"
    );
    let rs = ReedSolomonEncoder::new(layout.ecc_per_block);
    let mut blocks = Vec::with_capacity(layout.num_blocks);
    let mut offset = 0;
    for index in 0..layout.num_blocks {
        let len = layout.data_len(index);
        let chunk = &data[offset..offset + len];
        blocks.push(Block {
            data: chunk,
            ecc: rs.encode(chunk),
        });
        offset += len;
    }
    blocks
}

/// Round-robin interleave: data codewords column by column (short blocks
/// simply run out one column early), then correction codewords the same way
pub fn interleave(blocks: &[Block<'_>]) -> Vec<u8> {
    let max_data = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    let ecc_len = blocks.first().map_or(0, |b| b.ecc.len());
    let total: usize = blocks.iter().map(|b| b.data.len() + b.ecc.len()).sum();

    let mut out = Vec::with_capacity(total);
    for i in 0..max_data {
        out.extend(blocks.iter().filter_map(|b| b.data.get(i)));
    }
    for i in 0..ecc_len {
        out.extend(blocks.iter().filter_map(|b| b.ecc.get(i)));
    }
    debug_assert_eq!(out.len(), total);
    out
}

/// Full final codeword sequence for a version and level
pub fn add_error_correction(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let layout = tables::block_layout(version, ec_level);
    let blocks = split_blocks(data, &layout);
    let codewords = interleave(&blocks);
    assert_eq!(
        codewords.len(),
        tables::total_codewords(version),
        "interleaved stream does not fill the symbol"
    );
    codewords
}
