//! QR code encoding modules
//!
//! This module contains every stage between a payload and a finished symbol:
//! - Segmentation and bit packing (numeric, alphanumeric, byte)
//! - Capacity planning over versions 1-40
//! - Error correction (Reed-Solomon, BCH) and block interleaving
//! - Function patterns, zig-zag placement and mask selection

/// BCH codes for format and version info
pub mod bch;
/// MSB-first bit writer
pub mod bit_buffer;
/// Smallest-version search
pub mod capacity;
pub(crate) mod config;
/// Block split and interleaving
pub mod ecc;
/// Format information (mask pattern, EC level)
pub mod format;
/// Function module mask builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// Mask application and penalty-based selection
pub mod mask;
/// Structural patterns and codeword placement
pub mod matrix_builder;
/// Data mode packers (numeric, alphanumeric, byte)
pub mod modes;
/// Mask penalty rules
pub mod penalty;
/// Zig-zag traversal of data modules
pub mod placement;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Mode segmentation and codeword packing
pub mod segment;
/// QR specification tables (ECC codewords/blocks, count widths, alignment)
pub mod tables;
/// Version information (versions 7-40)
pub mod version;
