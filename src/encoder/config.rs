use std::sync::OnceLock;

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static PARALLEL_MASKS: OnceLock<bool> = OnceLock::new();

/// Score mask candidates on the rayon pool
pub(crate) fn parallel_masks() -> bool {
    *PARALLEL_MASKS.get_or_init(|| parse_env_bool_u8("QR_PARALLEL_MASKS", true))
}

static PARALLEL_MASK_MIN_VERSION: OnceLock<u8> = OnceLock::new();

/// Smallest version whose mask candidates are scored in parallel
pub(crate) fn parallel_mask_min_version() -> u8 {
    *PARALLEL_MASK_MIN_VERSION
        .get_or_init(|| parse_env_u8("QR_PARALLEL_MASK_MIN_VERSION", 7).clamp(1, 40))
}
