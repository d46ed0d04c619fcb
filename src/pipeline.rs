use crate::encoder::capacity::CapacityPlan;
use crate::encoder::ecc;
use crate::encoder::mask;
use crate::encoder::matrix_builder::MatrixBuilder;
use crate::encoder::segment;
use crate::models::{MaskPattern, Symbol};

/// Run every stage after capacity planning: packing, error correction,
/// structural layout, data placement and masking
///
/// Nothing past the plan can fail; broken invariants panic.
pub(crate) fn build_symbol(plan: &CapacityPlan<'_>, forced_mask: Option<MaskPattern>) -> Symbol {
    let version = plan.version;
    let ec_level = plan.ec_level;

    for seg in &plan.segments {
        tracing::trace!(
            mode = ?seg.mode(),
            chars = seg.char_count(),
            "segment"
        );
    }
    let data = segment::pack_codewords(&plan.segments, version, ec_level);
    let codewords = ecc::add_error_correction(&data, version, ec_level);

    let mut builder = MatrixBuilder::new(version);
    builder.draw_function_patterns();
    builder.place_codewords(&codewords);
    let func = builder.function_mask();
    let unmasked = builder.finish();

    let (pattern, modules) = match forced_mask {
        Some(pattern) => {
            tracing::debug!(mask = pattern.bits(), "mask forced");
            (pattern, mask::candidate(&unmasked, func, ec_level, pattern))
        }
        None => mask::select_mask(&unmasked, func, ec_level),
    };

    Symbol::new(version, ec_level, pattern, modules)
}
