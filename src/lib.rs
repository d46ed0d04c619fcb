//! qr_encode - QR code symbol encoder
//!
//! A pure Rust QR code (Model 2) encoder: payload segmentation, capacity
//! planning, Reed-Solomon error correction, matrix layout and mask selection.
//! Every call is independent; shared tables are built once and read-only.
//!
//! ```
//! use qr_encode::{encode, ECLevel, EncodeOptions};
//!
//! let symbol = encode("01234567", &EncodeOptions::new().ec_level(ECLevel::M)).unwrap();
//! assert_eq!(symbol.version().number(), 1);
//! assert_eq!(symbol.module_count(), 21);
//! let top_left_is_dark = symbol.is_dark(0, 0);
//! assert!(top_left_is_dark);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code encoding modules (segmentation, error correction, layout, masking)
pub mod encoder;
/// Error type returned by every entry point
pub mod error;
/// Core data structures (Symbol, BitMatrix, Version, etc.)
pub mod models;
mod pipeline;
/// Rendering helpers (PNG, SVG, text)
pub mod tools;

pub use encoder::segment::{Mode, Segment};
pub use error::EncodeError;
pub use models::{BitMatrix, ECLevel, MaskPattern, Symbol, Version};

use encoder::capacity::{self, PlanRequest};

/// Options controlling a single encode call
///
/// Defaults: level M, smallest fitting version, automatic mask, no boosting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    ec_level: ECLevel,
    version: Option<u8>,
    mask: Option<MaskPattern>,
    boost_error_correction: bool,
}

impl EncodeOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum error correction level
    pub fn ec_level(mut self, level: ECLevel) -> Self {
        self.ec_level = level;
        self
    }

    /// Force a version (1-40); checked when encoding
    pub fn version(mut self, version: u8) -> Self {
        self.version = Some(version);
        self
    }

    /// Force a mask pattern instead of searching for the lowest penalty
    pub fn mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Raise the level as far as the chosen version still allows
    pub fn boost_error_correction(mut self, boost: bool) -> Self {
        self.boost_error_correction = boost;
        self
    }

    fn plan_request(&self) -> Result<PlanRequest, EncodeError> {
        Ok(PlanRequest {
            min_level: self.ec_level,
            forced_version: self.version.map(Version::new).transpose()?,
            boost_error_correction: self.boost_error_correction,
        })
    }
}

/// Encode a text payload
///
/// Text outside the numeric and alphanumeric sets is stored as UTF-8 bytes.
///
/// # Errors
/// * `InvalidOption` - forced version outside 1-40
/// * `DataTooLong` - the payload does not fit (the forced version, or version 40)
pub fn encode(payload: &str, options: &EncodeOptions) -> Result<Symbol, EncodeError> {
    encode_bytes(payload.as_bytes(), options)
}

/// Encode a binary payload
///
/// Runs of digits or alphanumeric characters still get their compact modes.
pub fn encode_bytes(payload: &[u8], options: &EncodeOptions) -> Result<Symbol, EncodeError> {
    let request = options.plan_request()?;
    let plan = capacity::plan_payload(payload, &request)?;
    Ok(pipeline::build_symbol(&plan, options.mask))
}

/// Encode caller-built segments in the given order and modes
pub fn encode_segments(
    segments: &[Segment<'_>],
    options: &EncodeOptions,
) -> Result<Symbol, EncodeError> {
    let request = options.plan_request()?;
    let plan = capacity::plan_segments(segments, &request)?;
    Ok(pipeline::build_symbol(&plan, options.mask))
}
