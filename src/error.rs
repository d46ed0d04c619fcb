//! Error taxonomy for the encoder
//!
//! Every public entry point returns [`EncodeError`]; nothing is logged and
//! swallowed, and no partially built symbol is ever handed out.

use crate::encoder::segment::Mode;
use thiserror::Error;

/// Error returned when a payload cannot be turned into a symbol.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The payload does not fit in the largest allowed version at the requested level.
    ///
    /// `required_bits` is `None` when a segment's character count overflows its
    /// length field, so no bit total exists for the last version tried.
    #[error("data too long: symbol holds at most {capacity_bits} data bits")]
    DataTooLong {
        /// Bits the segments need in the last version tried.
        required_bits: Option<usize>,
        /// Data bits available in the last version tried.
        capacity_bits: usize,
    },
    /// A byte cannot be represented in the mode a segment was built for.
    #[error("byte {byte:#04x} at offset {offset} cannot be encoded in {mode:?} mode")]
    UnsupportedCharacter {
        /// Mode the segment was built for.
        mode: Mode,
        /// Offending byte.
        byte: u8,
        /// Offset of the byte inside the segment data.
        offset: usize,
    },
    /// An option is outside its valid domain (version not in 1..=40, unknown level).
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EncodeError::DataTooLong {
            required_bits: Some(300),
            capacity_bits: 272,
        };
        assert_eq!(
            err.to_string(),
            "data too long: symbol holds at most 272 data bits"
        );

        let err = EncodeError::UnsupportedCharacter {
            mode: Mode::Numeric,
            byte: b'a',
            offset: 3,
        };
        assert_eq!(
            err.to_string(),
            "byte 0x61 at offset 3 cannot be encoded in Numeric mode"
        );

        let err = EncodeError::InvalidOption("version 41 outside 1..=40".into());
        assert!(err.to_string().contains("version 41"));
    }
}
