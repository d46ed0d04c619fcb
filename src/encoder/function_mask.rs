use crate::encoder::tables;
use crate::encoder::version::VersionInfo;
use crate::models::{BitMatrix, Version};
use std::sync::OnceLock;

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
#[derive(Debug)]
pub struct FunctionMask {
    mask: BitMatrix,
    version: Version,
}

static MASKS: [OnceLock<FunctionMask>; 41] = [const { OnceLock::new() }; 41];

impl FunctionMask {
    /// Build the mask for `version` from the layout rules
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut mask = BitMatrix::square(size);

        // Finder patterns + separators (8x8 areas, clipped at the symbol edge)
        Self::mark_finder_area(&mut mask, 0, 0);
        Self::mark_finder_area(&mut mask, size - 7, 0);
        Self::mark_finder_area(&mut mask, 0, size - 7);

        // Timing patterns (row 6 and column 6)
        for i in 0..size {
            mask.set(6, i, true);
            mask.set(i, 6, true);
        }

        for (cx, cy) in alignment_centres(version) {
            for y in cy - 2..=cy + 2 {
                for x in cx - 2..=cx + 2 {
                    mask.set(x, y, true);
                }
            }
        }

        // Format info areas, dark module included
        for i in 0..9 {
            mask.set(8, i, true);
            mask.set(i, 8, true);
        }
        for i in 0..8 {
            mask.set(size - 1 - i, 8, true);
            mask.set(8, size - 1 - i, true);
        }

        // Version info (v7+)
        if version.number() >= 7 {
            for i in 0..VersionInfo::LEN {
                for (x, y) in VersionInfo::positions(size, i) {
                    mask.set(x, y, true);
                }
            }
        }

        Self { mask, version }
    }

    /// Shared mask for `version`, built on first use
    pub fn for_version(version: Version) -> &'static FunctionMask {
        MASKS[version.number() as usize].get_or_init(|| Self::new(version))
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.mask.width()
    }

    /// Version this mask was built for
    pub fn version(&self) -> Version {
        self.version
    }

    /// True for finder, separator, timing, alignment, format and version cells
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    fn mark_finder_area(mask: &mut BitMatrix, x: usize, y: usize) {
        let size = mask.width();
        let start_x = x.saturating_sub(1);
        let start_y = y.saturating_sub(1);
        let end_x = (x + 7 + 1).min(size);
        let end_y = (y + 7 + 1).min(size);
        for yy in start_y..end_y {
            for xx in start_x..end_x {
                mask.set(xx, yy, true);
            }
        }
    }
}

/// Alignment pattern centres as (x, y), skipping the three that would
/// overlap a finder pattern
pub fn alignment_centres(version: Version) -> impl Iterator<Item = (usize, usize)> {
    let positions = tables::alignment_pattern_positions(version);
    let last = positions.len().saturating_sub(1);
    positions.iter().enumerate().flat_map(move |(i, &cy)| {
        positions
            .iter()
            .enumerate()
            .filter(move |&(j, _)| {
                !((i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0))
            })
            .map(move |(_, &cx)| (cx, cy))
    })
}
