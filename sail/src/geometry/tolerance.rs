// Centralized tolerances and helpers for sail geometry

pub const EPS_POS: f64 = 1e-6;            // point coincidence threshold (px)
pub const EPS_LEN: f64 = 1e-9;            // zero-length vector threshold
pub const EPS_DENOM: f64 = 1e-10;         // parallel-segment guard for intersection
pub const EPS_PARAM: f64 = 1e-9;          // slack when comparing segment parameters to 0/1

// Edges shorter than this are skipped by the path builder (px)
pub const MIN_EDGE_LEN: f64 = 1.0;

// Adaptive flattening cap
pub const MAX_FLATTEN_DEPTH: u32 = 16;

#[inline] pub fn near_zero(x: f64, eps: f64) -> bool { x.abs() <= eps }

#[inline]
pub fn safe_div(num: f64, den: f64, fallback: f64) -> f64 {
    if den.abs() <= EPS_DENOM { fallback } else { num / den }
}
