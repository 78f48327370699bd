use thiserror::Error;

/// Errors raised by sail editing operations. All are recoverable: the
/// operation is rejected and scene state is left unchanged.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SailError {
    #[error("insufficient geometry: {points} points, area {area:.1}")]
    InsufficientGeometry { points: usize, area: f64 },

    #[error("sail capacity of {max} reached")]
    CapacityExceeded { max: usize },

    #[error("polygon has {points} vertices, limit is {max}")]
    TooManyPoints { points: usize, max: usize },

    #[error("draw session is full at {max} points")]
    CaptureFull { max: usize },

    #[error("invalid {kind} id {id}")]
    InvalidId { kind: &'static str, id: u32 },

    #[error("edge profile has {got} flags, sail has {expected} edges")]
    ProfileMismatch { expected: usize, got: usize },

    #[error("edge {index} out of range for {count} edges")]
    InvalidEdge { index: usize, count: usize },

    #[error("parameter '{param}' must be finite")]
    NonFinite { param: &'static str },

    #[error("no active session")]
    NoActiveSession,

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl SailError {
    /// Stable machine-readable code for host bindings.
    pub fn code(&self) -> &'static str {
        match self {
            SailError::InsufficientGeometry { .. } => "insufficient_geometry",
            SailError::CapacityExceeded { .. } => "capacity_exceeded",
            SailError::TooManyPoints { .. } => "too_many_points",
            SailError::CaptureFull { .. } => "capture_full",
            SailError::InvalidId { .. } => "invalid_id",
            SailError::ProfileMismatch { .. } => "profile_mismatch",
            SailError::InvalidEdge { .. } => "invalid_edge",
            SailError::NonFinite { .. } => "non_finite",
            SailError::NoActiveSession => "no_session",
            SailError::Config(_) => "invalid_config",
        }
    }
}

pub(crate) fn check_finite(param: &'static str, v: f64) -> Result<f64, SailError> {
    if crate::geometry::limits::in_coord_bounds(v) {
        Ok(v)
    } else {
        Err(SailError::NonFinite { param })
    }
}
