//! Reference reader used by the integration tests
//!
//! Reads a finished symbol back without going through the encoder's own
//! placement, masking or Reed-Solomon code: format information is matched
//! against all 32 valid words, modules are unmasked and walked column pair
//! by column pair, blocks are de-interleaved and checked for zero syndromes,
//! and the segment headers are parsed back into the payload.

#![allow(dead_code)]

use qr_encode::encoder::tables;
use qr_encode::{ECLevel, Symbol, Version};

/// Everything recovered from a symbol
#[derive(Debug)]
pub struct Decoded {
    pub version: u8,
    pub ec_level: ECLevel,
    pub mask: u8,
    pub data_codewords: Vec<u8>,
    /// (mode indicator, character count) per segment
    pub segments: Vec<(u8, usize)>,
    pub payload: Vec<u8>,
}

const ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

fn poly_rem(mut value: u32, generator: u32) -> u32 {
    let deg = 31 - generator.leading_zeros();
    for bit in (deg..32).rev() {
        if value & (1 << bit) != 0 {
            value ^= generator << (bit - deg);
        }
    }
    value
}

fn format_word(data: u32) -> u32 {
    ((data << 10) | poly_rem(data << 10, 0x537)) ^ 0x5412
}

fn version_word(version: u32) -> u32 {
    (version << 12) | poly_rem(version << 12, 0x1F25)
}

fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= 0x1D;
        }
        b >>= 1;
    }
    product
}

/// True if every syndrome of `block` (data then correction codewords) is zero
pub fn block_is_valid(block: &[u8], ecc_len: usize) -> bool {
    let mut alpha = 1u8;
    for _ in 0..ecc_len {
        let syndrome = block.iter().fold(0u8, |acc, &c| gf_mul(acc, alpha) ^ c);
        if syndrome != 0 {
            return false;
        }
        alpha = gf_mul(alpha, 2);
    }
    true
}

fn alignment_positions(version: usize) -> Vec<usize> {
    if version == 1 {
        return Vec::new();
    }
    let count = version / 7 + 2;
    let size = version * 4 + 17;
    let step = if version == 32 {
        26
    } else {
        (version * 4 + count * 2 + 1) / (count * 2 - 2) * 2
    };
    let mut positions: Vec<usize> = (0..count - 1).map(|i| size - 7 - i * step).collect();
    positions.push(6);
    positions.sort_unstable();
    positions
}

/// Function-module predicate written from the layout rules directly
pub fn is_function(version: usize, x: usize, y: usize) -> bool {
    let size = version * 4 + 17;
    let in_corner = |cx: usize, cy: usize| x + 1 >= cx && x <= cx + 7 && y + 1 >= cy && y <= cy + 7;
    if in_corner(0, 0) || in_corner(size - 7, 0) || in_corner(0, size - 7) {
        return true;
    }
    if x == 6 || y == 6 {
        return true;
    }
    // format areas and the dark module
    if (y == 8 && (x <= 8 || x >= size - 8)) || (x == 8 && (y <= 8 || y >= size - 8)) {
        return true;
    }
    if version >= 7 && ((x >= size - 11 && x < size - 8 && y < 6) || (y >= size - 11 && y < size - 8 && x < 6)) {
        return true;
    }
    let positions = alignment_positions(version);
    let last = positions.len().saturating_sub(1);
    for (i, &ay) in positions.iter().enumerate() {
        for (j, &ax) in positions.iter().enumerate() {
            let corner = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            if !corner && x.abs_diff(ax) <= 2 && y.abs_diff(ay) <= 2 {
                return true;
            }
        }
    }
    false
}

fn mask_bit(mask: u8, row: usize, col: usize) -> bool {
    let (i, j) = (row, col);
    match mask {
        0 => (i + j) % 2 == 0,
        1 => i % 2 == 0,
        2 => j % 3 == 0,
        3 => (i + j) % 3 == 0,
        4 => (i / 2 + j / 3) % 2 == 0,
        5 => (i * j) % 2 + (i * j) % 3 == 0,
        6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
        _ => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
    }
}

/// Read both format copies; they must agree and be a valid masked BCH word
pub fn read_format(symbol: &Symbol) -> (ECLevel, u8) {
    let size = symbol.module_count();
    let dark = |x: usize, y: usize| symbol.is_dark(y, x) as u32;

    let mut first = 0u32;
    for x in [0, 1, 2, 3, 4, 5, 7, 8] {
        first = (first << 1) | dark(x, 8);
    }
    for y in [7, 5, 4, 3, 2, 1, 0] {
        first = (first << 1) | dark(8, y);
    }

    let mut second = 0u32;
    for y in (size - 7..size).rev() {
        second = (second << 1) | dark(8, y);
    }
    for x in size - 8..size {
        second = (second << 1) | dark(x, 8);
    }

    assert_eq!(first, second, "format copies disagree");
    let data = (0..32)
        .find(|&d| format_word(d) == first)
        .unwrap_or_else(|| panic!("invalid format word {first:#06x}"));
    let level = match data >> 3 {
        0b01 => ECLevel::L,
        0b00 => ECLevel::M,
        0b11 => ECLevel::Q,
        _ => ECLevel::H,
    };
    (level, (data & 7) as u8)
}

fn read_version_blocks(symbol: &Symbol, version: usize) {
    let size = symbol.module_count();
    let expected = version_word(version as u32);
    for i in 0..18 {
        let bit = (expected >> i) & 1 != 0;
        let a = size - 11 + i % 3;
        let b = i / 3;
        assert_eq!(symbol.is_dark(b, a), bit, "top-right version bit {i}");
        assert_eq!(symbol.is_dark(a, b), bit, "bottom-left version bit {i}");
    }
}

fn read_data_bits(symbol: &Symbol, version: usize, mask: u8) -> Vec<bool> {
    let size = symbol.module_count();
    let mut bits = Vec::new();
    let mut upward = true;
    let mut col = size as isize - 1;
    while col > 0 {
        if col == 6 {
            col -= 1;
        }
        let rows: Vec<usize> = if upward {
            (0..size).rev().collect()
        } else {
            (0..size).collect()
        };
        for row in rows {
            for c in [col as usize, col as usize - 1] {
                if !is_function(version, c, row) {
                    bits.push(symbol.is_dark(row, c) ^ mask_bit(mask, row, c));
                }
            }
        }
        upward = !upward;
        col -= 2;
    }
    bits
}

struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl BitReader<'_> {
    fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    fn read(&mut self, count: usize) -> u32 {
        let mut value = 0;
        for _ in 0..count {
            let bit = (self.data[self.pos / 8] >> (7 - self.pos % 8)) & 1;
            value = (value << 1) | u32::from(bit);
            self.pos += 1;
        }
        value
    }
}

fn count_bits(mode: u8, version: usize) -> usize {
    let tier = match version {
        1..=9 => 0,
        10..=26 => 1,
        _ => 2,
    };
    match mode {
        0b0001 => [10, 12, 14][tier],
        0b0010 => [9, 11, 13][tier],
        _ => [8, 16, 16][tier],
    }
}

fn parse_segments(data: &[u8], version: usize) -> (Vec<(u8, usize)>, Vec<u8>) {
    let mut reader = BitReader { data, pos: 0 };
    let mut segments = Vec::new();
    let mut payload = Vec::new();
    while reader.remaining() >= 4 {
        let mode = reader.read(4) as u8;
        if mode == 0 {
            break;
        }
        let count = reader.read(count_bits(mode, version)) as usize;
        match mode {
            0b0001 => {
                let mut left = count;
                while left > 0 {
                    let digits = left.min(3);
                    let value = reader.read(digits * 3 + 1);
                    let text = format!("{value:0width$}", width = digits);
                    payload.extend_from_slice(text.as_bytes());
                    left -= digits;
                }
            }
            0b0010 => {
                let mut left = count;
                while left > 0 {
                    if left >= 2 {
                        let value = reader.read(11) as usize;
                        payload.push(ALPHANUMERIC[value / 45]);
                        payload.push(ALPHANUMERIC[value % 45]);
                        left -= 2;
                    } else {
                        payload.push(ALPHANUMERIC[reader.read(6) as usize]);
                        left -= 1;
                    }
                }
            }
            0b0100 => {
                for _ in 0..count {
                    payload.push(reader.read(8) as u8);
                }
            }
            other => panic!("unexpected mode indicator {other:#06b}"),
        }
        segments.push((mode, count));
    }

    // terminator and padding
    let pad_start = reader.pos.div_ceil(8);
    for (i, &b) in data[pad_start..].iter().enumerate() {
        assert_eq!(b, if i % 2 == 0 { 0xEC } else { 0x11 }, "pad codeword {i}");
    }
    (segments, payload)
}

/// Decode a symbol, asserting every structural check along the way
pub fn read_symbol(symbol: &Symbol) -> Decoded {
    let size = symbol.module_count();
    assert_eq!((size - 17) % 4, 0);
    let version = (size - 17) / 4;
    assert_eq!(symbol.version().number() as usize, version);
    assert!(symbol.is_dark(size - 8, 8), "dark module");

    let (ec_level, mask) = read_format(symbol);
    if version >= 7 {
        read_version_blocks(symbol, version);
    }

    let bits = read_data_bits(symbol, version, mask);
    let v = Version::new(version as u8).unwrap();
    let total = tables::total_codewords(v);
    assert_eq!(bits.len(), tables::raw_data_modules(v));
    assert!(bits[total * 8..].iter().all(|&b| !b), "remainder bits must be light");
    let codewords: Vec<u8> = bits[..total * 8]
        .chunks(8)
        .map(|c| c.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
        .collect();

    let layout = tables::block_layout(v, ec_level);
    let num_blocks = layout.num_blocks;
    let ecc_len = layout.ecc_per_block;
    let data_total = total - num_blocks * ecc_len;
    let short_len = data_total / num_blocks;
    let long_blocks = data_total % num_blocks;
    let mut blocks: Vec<Vec<u8>> = vec![Vec::new(); num_blocks];
    let mut idx = 0;
    for i in 0..=short_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            let len = if b >= num_blocks - long_blocks { short_len + 1 } else { short_len };
            if i < len {
                block.push(codewords[idx]);
                idx += 1;
            }
        }
    }
    let data_blocks: Vec<Vec<u8>> = blocks.clone();
    for _ in 0..ecc_len {
        for block in blocks.iter_mut() {
            block.push(codewords[idx]);
            idx += 1;
        }
    }
    assert_eq!(idx, total);
    for (b, block) in blocks.iter().enumerate() {
        assert!(block_is_valid(block, ecc_len), "block {b} has non-zero syndromes");
    }

    let data_codewords: Vec<u8> = data_blocks.concat();
    let (segments, payload) = parse_segments(&data_codewords, version);
    Decoded {
        version: version as u8,
        ec_level,
        mask,
        data_codewords,
        segments,
        payload,
    }
}

/// Parse a grid of `1`/`0` rows into a row-major boolean matrix
pub fn parse_grid(rows: &[&str]) -> Vec<Vec<bool>> {
    rows.iter()
        .map(|r| r.bytes().map(|b| b == b'1').collect())
        .collect()
}
