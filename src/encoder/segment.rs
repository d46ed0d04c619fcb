//! Segment encoder
//!
//! Splits a payload into mode segments and packs them, together with the
//! terminator and pad codewords, into the exact data codeword sequence of a
//! version/level pair.

use crate::encoder::bit_buffer::BitBuffer;
use crate::encoder::modes::{
    alphanumeric::AlphanumericEncoder, byte::ByteEncoder, numeric::NumericEncoder,
};
use crate::encoder::tables;
use crate::error::EncodeError;
use crate::models::{ECLevel, Version};

/// Pad codewords appended alternately after the terminator (ISO/IEC 18004:2015 7.4.10)
const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Maximum terminator length in bits (7.4.9)
const TERMINATOR_BITS: usize = 4;

/// Data encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Digits 0-9, three per 10 bits
    Numeric,
    /// 45-character set, two per 11 bits
    Alphanumeric,
    /// Any byte, 8 bits each
    Byte,
}

// Candidate order for segmentation; Byte first so it is always reachable.
const MODES: [Mode; 3] = [Mode::Byte, Mode::Alphanumeric, Mode::Numeric];

impl Mode {
    /// 4-bit mode indicator (Table 2)
    pub fn indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
        }
    }

    /// Width of the character count field at `version`
    pub fn char_count_bits(self, version: Version) -> u8 {
        let row = match self {
            Mode::Numeric => 0,
            Mode::Alphanumeric => 1,
            Mode::Byte => 2,
        };
        tables::char_count_bits(row, version.tier())
    }

    /// Whether `byte` belongs to this mode's character set
    pub fn can_encode(self, byte: u8) -> bool {
        match self {
            Mode::Numeric => NumericEncoder::can_encode(byte),
            Mode::Alphanumeric => AlphanumericEncoder::can_encode(byte),
            Mode::Byte => true,
        }
    }

    /// Payload bits for `count` characters, excluding header
    pub fn data_bits(self, count: usize) -> usize {
        match self {
            Mode::Numeric => NumericEncoder::bit_len(count),
            Mode::Alphanumeric => AlphanumericEncoder::bit_len(count),
            Mode::Byte => ByteEncoder::bit_len(count),
        }
    }

    // Cost of one character in sixths of a bit
    fn sixths_per_char(self) -> usize {
        match self {
            Mode::Numeric => 20,
            Mode::Alphanumeric => 33,
            Mode::Byte => 48,
        }
    }
}

/// Contiguous run of the payload encoded in a single mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    mode: Mode,
    data: &'a [u8],
}

impl<'a> Segment<'a> {
    /// Numeric segment; every byte must be an ASCII digit
    pub fn numeric(data: &'a [u8]) -> Result<Self, EncodeError> {
        Self::checked(Mode::Numeric, data)
    }

    /// Alphanumeric segment; every byte must be in the 45-character set
    pub fn alphanumeric(data: &'a [u8]) -> Result<Self, EncodeError> {
        Self::checked(Mode::Alphanumeric, data)
    }

    /// Byte segment; any data is valid
    pub fn bytes(data: &'a [u8]) -> Self {
        Self {
            mode: Mode::Byte,
            data,
        }
    }

    fn checked(mode: Mode, data: &'a [u8]) -> Result<Self, EncodeError> {
        match data.iter().position(|&b| !mode.can_encode(b)) {
            Some(offset) => Err(EncodeError::UnsupportedCharacter {
                mode,
                byte: data[offset],
                offset,
            }),
            None => Ok(Self { mode, data }),
        }
    }

    /// Encoding mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Payload bytes covered by this segment
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Characters in this segment (bytes for every supported mode)
    pub fn char_count(&self) -> usize {
        self.data.len()
    }

    /// Header plus payload bits at `version`, or `None` when the character
    /// count does not fit the length field
    pub fn encoded_bits(&self, version: Version) -> Option<usize> {
        let count_bits = self.mode.char_count_bits(version);
        if self.char_count() >= 1 << count_bits {
            return None;
        }
        Some(4 + count_bits as usize + self.mode.data_bits(self.char_count()))
    }

    /// Append mode indicator, character count and packed payload
    pub fn write(&self, version: Version, buf: &mut BitBuffer) {
        buf.append_bits(self.mode.indicator(), 4);
        buf.append_bits(self.char_count() as u32, self.mode.char_count_bits(version));
        match self.mode {
            Mode::Numeric => NumericEncoder::encode(self.data, buf),
            Mode::Alphanumeric => AlphanumericEncoder::encode(self.data, buf),
            Mode::Byte => ByteEncoder::encode(self.data, buf),
        }
    }
}

/// Total bits of all segments at `version`
pub fn total_bits(segments: &[Segment<'_>], version: Version) -> Option<usize> {
    segments
        .iter()
        .try_fold(0usize, |acc, seg| acc.checked_add(seg.encoded_bits(version)?))
}

/// Split a payload into the segment list with the fewest bits at `version`
///
/// The result depends only on the version tier. Digits never end up in a
/// Byte segment unless sharing its header is cheaper than opening a new one.
pub fn make_segments(payload: &[u8], version: Version) -> Vec<Segment<'_>> {
    let modes = optimal_modes(payload, version);
    let mut segments = Vec::new();
    let mut start = 0;
    for end in 1..=payload.len() {
        if end == payload.len() || modes[end] != modes[start] {
            segments.push(Segment {
                mode: modes[start],
                data: &payload[start..end],
            });
            start = end;
        }
    }
    tracing::trace!(version = version.number(), segments = segments.len(), "segmented payload");
    segments
}

// Dynamic programme over (position, mode of the open segment). Costs are in
// sixths of a bit so the 10/3 and 11/2 bit densities stay integral.
fn optimal_modes(payload: &[u8], version: Version) -> Vec<Mode> {
    if payload.is_empty() {
        return Vec::new();
    }
    let head_costs: [usize; 3] = MODES.map(|m| (4 + m.char_count_bits(version) as usize) * 6);
    let mut prev_costs = head_costs;
    // char_modes[i][j]: mode of byte i on the cheapest path ending in state j
    let mut char_modes: Vec<[Mode; 3]> = Vec::with_capacity(payload.len());

    for &byte in payload {
        let mut extended = [None; 3];
        for (j, mode) in MODES.iter().enumerate() {
            if mode.can_encode(byte) {
                extended[j] = Some(prev_costs[j] + mode.sixths_per_char());
            }
        }

        let mut costs = [usize::MAX; 3];
        let mut modes = [Mode::Byte; 3];
        for j in 0..MODES.len() {
            if let Some(cost) = extended[j] {
                costs[j] = cost;
                modes[j] = MODES[j];
            }
            // Close a segment of mode k after this byte and open mode j
            for (k, ext) in extended.iter().enumerate() {
                let Some(cost) = *ext else { continue };
                let switched = cost.div_ceil(6) * 6 + head_costs[j];
                if switched < costs[j] {
                    costs[j] = switched;
                    modes[j] = MODES[k];
                }
            }
        }
        char_modes.push(modes);
        prev_costs = costs;
    }

    // Byte can always extend, so every state carries a finite cost
    let mut state = (0..MODES.len())
        .min_by_key(|&j| prev_costs[j])
        .unwrap_or(0);
    let mut result = vec![Mode::Byte; payload.len()];
    for (i, modes) in char_modes.iter().enumerate().rev() {
        result[i] = modes[state];
        state = MODES
            .iter()
            .position(|&m| m == result[i])
            .unwrap_or(0);
    }
    result
}

/// Pack segments into exactly `data_codewords(version, ec_level)` codewords
///
/// Appends up to four terminator bits, zero bits to the byte boundary and
/// then alternating pad codewords. Callers have already checked capacity.
pub fn pack_codewords(segments: &[Segment<'_>], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let capacity_bits = tables::data_codewords(version, ec_level) * 8;
    let mut buf = BitBuffer::with_capacity(capacity_bits);
    for seg in segments {
        seg.write(version, &mut buf);
    }
    assert!(buf.len() <= capacity_bits, "segments exceed planned capacity");

    let terminator = TERMINATOR_BITS.min(capacity_bits - buf.len());
    buf.append_bits(0, terminator as u8);
    buf.append_bits(0, buf.bits_to_byte_boundary() as u8);

    let mut codewords = buf.into_bytes();
    let pad = PAD_CODEWORDS.iter().cycle();
    let missing = capacity_bits / 8 - codewords.len();
    codewords.extend(pad.take(missing));
    debug_assert_eq!(codewords.len() * 8, capacity_bits);
    codewords
}
