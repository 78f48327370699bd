// Caps and default thresholds for sail creation and capture

// Scene size cap (simultaneous sails)
pub const MAX_SAILS: usize = 10;

// Polygon complexity
pub const MAX_POLYGON_POINTS: usize = 12;
pub const MIN_POLYGON_POINTS: usize = 3;
pub const MIN_POLYGON_AREA: f64 = 500.0;          // px^2
pub const MAX_CAPTURE_POINTS: usize = 4_096;      // raw points in one draw session

// Simplification
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 4.0;

// Curves
pub const DEFAULT_SAG_RATIO: f64 = 0.06;

// Capture
pub const DEFAULT_CLOSE_RADIUS: f64 = 10.0;

// Perspective
pub const SKEW_DEGREES: f64 = 45.0;
pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SKEW_DEGREES: f64 = 85.0;    // keeps tan() finite
pub const DEPTH_SCALE_PER_UNIT: f64 = 0.01;

// Numeric bounds
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 =  10_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }
