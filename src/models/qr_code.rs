use super::BitMatrix;
use crate::error::EncodeError;
use std::fmt;
use std::str::FromStr;

/// QR code version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest version (21x21 modules)
    pub const MIN: Version = Version(1);
    /// Largest version (177x177 modules)
    pub const MAX: Version = Version(40);

    /// Validate a version number
    pub fn new(number: u8) -> Result<Self, EncodeError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&number) {
            Ok(Self(number))
        } else {
            Err(EncodeError::InvalidOption(format!(
                "version {number} outside 1..=40"
            )))
        }
    }

    /// Get the version number (1-40)
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Length-field tier this version belongs to
    pub fn tier(&self) -> VersionTier {
        match self.0 {
            1..=9 => VersionTier::Small,
            10..=26 => VersionTier::Medium,
            _ => VersionTier::Large,
        }
    }

    /// All versions in increasing order
    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN.0..=Self::MAX.0).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Version ranges sharing the same character-count field widths
/// (ISO/IEC 18004:2015 Table 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionTier {
    /// Versions 1-9
    Small = 0,
    /// Versions 10-26
    Medium = 1,
    /// Versions 27-40
    Large = 2,
}

impl VersionTier {
    /// Column index into per-tier tables
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Error correction level, ordered by strength (L < M < Q < H)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    #[default]
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// All levels from weakest to strongest
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Row index into per-level tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Two-bit indicator stored in the format information (01=L, 00=M, 11=Q, 10=H)
    pub fn format_bits(self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Inverse of [`ECLevel::format_bits`]
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        };
        f.write_str(name)
    }
}

impl FromStr for ECLevel {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(ECLevel::L),
            "m" | "medium" => Ok(ECLevel::M),
            "q" | "quartile" => Ok(ECLevel::Q),
            "h" | "high" => Ok(ECLevel::H),
            _ => Err(EncodeError::InvalidOption(format!(
                "unknown error correction level {s:?}"
            ))),
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All patterns in index order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its 3-bit index
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get(bits as usize).copied()
    }

    /// 3-bit index written into the format information
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Whether the module at row `i`, column `j` is flipped by this pattern
    /// (ISO/IEC 18004:2015 Table 10)
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => (i * j) % 2 + (i * j) % 3 == 0,
            MaskPattern::Pattern6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            MaskPattern::Pattern7 => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
        }
    }
}

impl FromStr for MaskPattern {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::from_bits)
            .ok_or_else(|| EncodeError::InvalidOption(format!("unknown mask pattern {s:?}")))
    }
}

/// Finished, masked QR code symbol
///
/// Immutable once built; the only output of the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    version: Version,
    error_correction: ECLevel,
    mask_pattern: MaskPattern,
    modules: BitMatrix,
}

impl Symbol {
    pub(crate) fn new(
        version: Version,
        error_correction: ECLevel,
        mask_pattern: MaskPattern,
        modules: BitMatrix,
    ) -> Self {
        debug_assert_eq!(modules.width(), version.size());
        Self {
            version,
            error_correction,
            mask_pattern,
            modules,
        }
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level actually used (may exceed the requested minimum when boosted)
    pub fn error_correction_level(&self) -> ECLevel {
        self.error_correction
    }

    /// Mask pattern committed into the format information
    pub fn mask_pattern(&self) -> MaskPattern {
        self.mask_pattern
    }

    /// Side length in modules
    pub fn module_count(&self) -> usize {
        self.modules.width()
    }

    /// Whether the module at (`row`, `col`) is dark; outside the symbol is light
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules.get(col, row)
    }

    /// Underlying module matrix
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_size() {
        assert_eq!(Version::MIN.size(), 21);
        assert_eq!(Version::new(2).unwrap().size(), 25);
        assert_eq!(Version::MAX.size(), 177);
        assert_eq!(Version::all().count(), 40);
    }

    #[test]
    fn test_version_bounds() {
        assert!(matches!(Version::new(0), Err(EncodeError::InvalidOption(_))));
        assert!(matches!(Version::new(41), Err(EncodeError::InvalidOption(_))));
        assert!(Version::new(40).is_ok());
    }

    #[test]
    fn test_version_tiers() {
        assert_eq!(Version::new(9).unwrap().tier(), VersionTier::Small);
        assert_eq!(Version::new(10).unwrap().tier(), VersionTier::Medium);
        assert_eq!(Version::new(26).unwrap().tier(), VersionTier::Medium);
        assert_eq!(Version::new(27).unwrap().tier(), VersionTier::Large);
    }

    #[test]
    fn test_ec_level_format_bits() {
        assert_eq!(ECLevel::L.format_bits(), 0b01);
        assert_eq!(ECLevel::M.format_bits(), 0b00);
        assert_eq!(ECLevel::Q.format_bits(), 0b11);
        assert_eq!(ECLevel::H.format_bits(), 0b10);
        for level in ECLevel::ALL {
            assert_eq!(ECLevel::from_format_bits(level.format_bits()), level);
        }
        assert!(ECLevel::L < ECLevel::M && ECLevel::Q < ECLevel::H);
        assert_eq!(ECLevel::default(), ECLevel::M);
    }

    #[test]
    fn test_ec_level_parse() {
        assert_eq!("q".parse::<ECLevel>().unwrap(), ECLevel::Q);
        assert_eq!("High".parse::<ECLevel>().unwrap(), ECLevel::H);
        assert!(matches!(
            "X".parse::<ECLevel>(),
            Err(EncodeError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_mask_pattern() {
        let mask = MaskPattern::Pattern0;
        assert!(mask.is_masked(0, 0));
        assert!(!mask.is_masked(0, 1));
        assert!(mask.is_masked(1, 1));

        // Row-only and column-only patterns keep their orientation
        assert!(MaskPattern::Pattern1.is_masked(2, 1));
        assert!(!MaskPattern::Pattern1.is_masked(1, 2));
        assert!(MaskPattern::Pattern2.is_masked(1, 3));
        assert!(!MaskPattern::Pattern2.is_masked(3, 1));

        assert_eq!(MaskPattern::from_bits(5), Some(MaskPattern::Pattern5));
        assert_eq!(MaskPattern::from_bits(8), None);
        assert_eq!("7".parse::<MaskPattern>().unwrap(), MaskPattern::Pattern7);
        assert!("9".parse::<MaskPattern>().is_err());
    }
}
