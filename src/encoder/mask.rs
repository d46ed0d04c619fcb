//! Mask application and selection

use crate::encoder::config;
use crate::encoder::format::FormatInfo;
use crate::encoder::function_mask::FunctionMask;
use crate::encoder::penalty;
use crate::models::{BitMatrix, ECLevel, MaskPattern};
use rayon::prelude::*;

/// Flip every data module selected by `pattern`; function modules are untouched
pub fn apply_mask(matrix: &mut BitMatrix, pattern: MaskPattern, func: &FunctionMask) {
    let size = matrix.width();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && pattern.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Masked copy of `base` with the matching format information written
pub fn candidate(
    base: &BitMatrix,
    func: &FunctionMask,
    ec_level: ECLevel,
    pattern: MaskPattern,
) -> BitMatrix {
    let mut matrix = base.clone();
    apply_mask(&mut matrix, pattern, func);
    FormatInfo::new(ec_level, pattern).write(&mut matrix);
    matrix
}

/// Try all eight patterns and keep the lowest penalty, ties to the lowest index
///
/// `base` must be unmasked with every function pattern drawn.
pub fn select_mask(
    base: &BitMatrix,
    func: &FunctionMask,
    ec_level: ECLevel,
) -> (MaskPattern, BitMatrix) {
    let score = |pattern: MaskPattern| {
        let matrix = candidate(base, func, ec_level, pattern);
        let penalty = penalty::score(&matrix);
        tracing::trace!(mask = pattern.bits(), penalty, "scored mask candidate");
        (penalty, pattern, matrix)
    };

    let parallel = config::parallel_masks()
        && func.version().number() >= config::parallel_mask_min_version();
    let scored: Vec<(u32, MaskPattern, BitMatrix)> = if parallel {
        MaskPattern::ALL.par_iter().map(|&p| score(p)).collect()
    } else {
        MaskPattern::ALL.iter().map(|&p| score(p)).collect()
    };

    // min_by_key keeps the first minimum, and `scored` is in index order
    let (penalty, pattern, matrix) = scored
        .into_iter()
        .min_by_key(|(penalty, pattern, _)| (*penalty, *pattern))
        .unwrap_or_else(|| score(MaskPattern::Pattern0));
    tracing::debug!(mask = pattern.bits(), penalty, "mask committed");
    (pattern, matrix)
}
