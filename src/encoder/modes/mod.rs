//! Per-mode payload packers
//!
//! - Numeric: 3 digits per 10 bits
//! - Alphanumeric: 2 characters per 11 bits from the 45-character set
//! - Byte: 8 bits per input byte

/// Alphanumeric packer
pub mod alphanumeric;
/// Byte packer
pub mod byte;
/// Numeric packer
pub mod numeric;
