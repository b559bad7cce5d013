// Centralized tolerances for edge length checks

pub const PPM: f64 = 1_000_000.0; // tolerance unit: parts per million
pub const EPS_LEN: f64 = 1e-9;    // zero-length edge threshold

#[inline]
pub fn ratio_bound(tolerance: u32) -> f64 {
    tolerance as f64 / PPM
}

/// Absolute fractional deviation of `current` from `original`.
#[inline]
pub fn stretch_ratio(original: f64, current: f64) -> f64 {
    if original <= EPS_LEN {
        if current <= EPS_LEN {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        (current / original - 1.0).abs()
    }
}

#[inline]
pub fn within_tolerance(original: f64, current: f64, tolerance: u32) -> bool {
    stretch_ratio(original, current) <= ratio_bound(tolerance)
}
