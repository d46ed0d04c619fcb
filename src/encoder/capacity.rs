//! Capacity planner: picks the smallest version that holds the segments

use crate::encoder::segment::{self, Segment};
use crate::encoder::tables;
use crate::error::EncodeError;
use crate::models::{ECLevel, Version, VersionTier};

/// Outcome of capacity planning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityPlan<'a> {
    /// Smallest version that fits
    pub version: Version,
    /// Level used, boosted if requested
    pub ec_level: ECLevel,
    /// Segments packed at `version`
    pub segments: Vec<Segment<'a>>,
    /// Segment bits before terminator and padding
    pub data_bits: usize,
}

impl CapacityPlan<'_> {
    /// Data bits available at the planned version and level
    pub fn capacity_bits(&self) -> usize {
        tables::data_codewords(self.version, self.ec_level) * 8
    }
}

/// Constraints passed from the caller's options
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanRequest {
    /// Lowest acceptable error correction level
    pub min_level: ECLevel,
    /// Use exactly this version instead of searching
    pub forced_version: Option<Version>,
    /// Raise the level while the version still fits
    pub boost_error_correction: bool,
}

impl PlanRequest {
    fn candidates(&self) -> impl Iterator<Item = Version> + '_ {
        Version::all().filter(|v| self.forced_version.is_none_or(|forced| forced == *v))
    }
}

/// Plan a raw payload, re-segmenting whenever the version tier changes
pub fn plan_payload<'a>(
    payload: &'a [u8],
    request: &PlanRequest,
) -> Result<CapacityPlan<'a>, EncodeError> {
    let mut cached: Option<(VersionTier, Vec<Segment<'a>>)> = None;
    search(request, |version| {
        let tier = version.tier();
        if cached.as_ref().is_none_or(|(t, _)| *t != tier) {
            cached = Some((tier, segment::make_segments(payload, version)));
        }
        cached
            .as_ref()
            .map(|(_, segments)| segments.clone())
            .unwrap_or_default()
    })
}

/// Plan caller-supplied segments as given
pub fn plan_segments<'a>(
    segments: &[Segment<'a>],
    request: &PlanRequest,
) -> Result<CapacityPlan<'a>, EncodeError> {
    search(request, |_| segments.to_vec())
}

fn search<'a, F>(request: &PlanRequest, mut segments_for: F) -> Result<CapacityPlan<'a>, EncodeError>
where
    F: FnMut(Version) -> Vec<Segment<'a>>,
{
    let mut last_failure = None;
    for version in request.candidates() {
        let segments = segments_for(version);
        let capacity_bits = tables::data_codewords(version, request.min_level) * 8;
        let required_bits = segment::total_bits(&segments, version);
        match required_bits {
            Some(bits) if bits <= capacity_bits => {
                let ec_level = if request.boost_error_correction {
                    boosted_level(version, request.min_level, bits)
                } else {
                    request.min_level
                };
                tracing::debug!(
                    version = version.number(),
                    ec_level = %ec_level,
                    data_bits = bits,
                    capacity_bits = tables::data_codewords(version, ec_level) * 8,
                    segments = segments.len(),
                    "capacity plan selected"
                );
                return Ok(CapacityPlan {
                    version,
                    ec_level,
                    segments,
                    data_bits: bits,
                });
            }
            _ => {
                last_failure = Some(EncodeError::DataTooLong {
                    required_bits,
                    capacity_bits,
                })
            }
        }
    }
    Err(last_failure.unwrap_or(EncodeError::DataTooLong {
        required_bits: None,
        capacity_bits: 0,
    }))
}

// Strongest level at or above `min_level` that still holds `bits` at `version`
fn boosted_level(version: Version, min_level: ECLevel, bits: usize) -> ECLevel {
    ECLevel::ALL
        .into_iter()
        .filter(|&level| level >= min_level)
        .filter(|&level| bits <= tables::data_codewords(version, level) * 8)
        .max()
        .unwrap_or(min_level)
}
