use serde::{Deserialize, Serialize};

use crate::error::SailError;
use crate::geometry::limits;

/// Runtime-tunable engine parameters. Deserializes from partial JSON; any
/// missing key keeps its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Inward bow of curved edges as a fraction of edge length. Not clamped;
    /// values much above 0.1 give visibly over-concave sails.
    pub sag_ratio: f64,
    /// Initial RDP tolerance for freehand capture (px).
    pub simplify_tolerance: f64,
    /// Upper bound on sail vertices. Captured outlines are re-simplified with
    /// a doubled tolerance until they fit; direct polygon input above it is
    /// rejected.
    pub max_polygon_points: usize,
    /// Minimum enclosed area for a sail (px^2).
    pub min_polygon_area: f64,
    pub max_sails: usize,
    /// Clicking within this radius of the first point completes a drawing.
    pub close_radius: f64,
    /// Maps the dimensionless skew ratio to degrees.
    pub skew_degrees: f64,
    pub min_scale: f64,
    /// Extra uniform scale per unit of simulated Z depth.
    pub depth_scale_per_unit: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sag_ratio: limits::DEFAULT_SAG_RATIO,
            simplify_tolerance: limits::DEFAULT_SIMPLIFY_TOLERANCE,
            max_polygon_points: limits::MAX_POLYGON_POINTS,
            min_polygon_area: limits::MIN_POLYGON_AREA,
            max_sails: limits::MAX_SAILS,
            close_radius: limits::DEFAULT_CLOSE_RADIUS,
            skew_degrees: limits::SKEW_DEGREES,
            min_scale: limits::MIN_SCALE,
            depth_scale_per_unit: limits::DEPTH_SCALE_PER_UNIT,
        }
    }
}

impl EngineConfig {
    pub fn from_json(s: &str) -> Result<Self, SailError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
