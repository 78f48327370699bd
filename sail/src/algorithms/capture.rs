//! Point-by-point polygon capture with self-intersection auto-completion.
//!
//! Every pointer event is handled to completion (point checked, appended,
//! session possibly finished) before the call returns, so callers that
//! serialize events per session always observe the latest point set.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithms::simplify::simplify_ring;
use crate::config::EngineConfig;
use crate::error::{check_finite, SailError};
use crate::geometry::intersect::segments_intersect;
use crate::geometry::limits::{MAX_CAPTURE_POINTS, MIN_POLYGON_POINTS};
use crate::model::{Point, Polygon};

/// True when the edge from the last captured point to `candidate` crosses any
/// earlier edge other than the one it continues from. Needs at least three
/// captured points.
pub fn would_auto_close(candidate: Point, history: &[Point]) -> bool {
    let n = history.len();
    if n < MIN_POLYGON_POINTS {
        return false;
    }
    let last = history[n - 1];
    (0..n - 2).any(|i| segments_intersect(last, candidate, history[i], history[i + 1]))
}

#[derive(Clone, Debug, Default)]
pub struct DrawSession {
    points: Vec<Point>,
    active: bool,
}

impl DrawSession {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CloseReason {
    Intersection,
    NearStart,
    Explicit,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CaptureOutcome {
    /// Same position as the previous point.
    Ignored,
    Added { count: usize },
    Completed { polygon: Polygon, reason: CloseReason },
}

/// Provisional segment shown while hovering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturePreview {
    pub from: Point,
    pub to: Point,
    pub would_close: bool,
}

#[derive(Debug, Default)]
pub struct CaptureController {
    session: Option<DrawSession>,
}

impl CaptureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh session, discarding any previous one.
    pub fn begin(&mut self) {
        debug!("draw session started");
        self.session = Some(DrawSession { points: Vec::new(), active: true });
    }

    pub fn cancel(&mut self) -> bool {
        let had = self.session.take().is_some();
        if had {
            debug!("draw session cancelled");
        }
        had
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().map_or(false, |s| s.active)
    }

    pub fn session(&self) -> Option<&DrawSession> {
        self.session.as_ref()
    }

    pub fn points(&self) -> &[Point] {
        self.session.as_ref().map_or(&[], |s| s.points.as_slice())
    }

    pub fn add_point(&mut self, p: Point, cfg: &EngineConfig) -> Result<CaptureOutcome, SailError> {
        check_finite("x", p.x)?;
        check_finite("y", p.y)?;
        let session = self.session.as_mut().ok_or(SailError::NoActiveSession)?;
        let pts = &session.points;
        if pts.last().map_or(false, |last| last.coincides(p)) {
            return Ok(CaptureOutcome::Ignored);
        }
        if pts.len() >= MIN_POLYGON_POINTS && p.distance(pts[0]) <= cfg.close_radius {
            return self.complete(cfg, CloseReason::NearStart);
        }
        if would_auto_close(p, pts) {
            return self.complete(cfg, CloseReason::Intersection);
        }
        if pts.len() >= MAX_CAPTURE_POINTS {
            warn!("draw session full at {} points", MAX_CAPTURE_POINTS);
            return Err(SailError::CaptureFull { max: MAX_CAPTURE_POINTS });
        }
        session.points.push(p);
        trace!("captured ({:.1}, {:.1}), {} points", p.x, p.y, session.points.len());
        Ok(CaptureOutcome::Added { count: session.points.len() })
    }

    pub fn preview(&self, hover: Point) -> Option<CapturePreview> {
        let pts = self.points();
        let from = *pts.last()?;
        Some(CapturePreview { from, to: hover, would_close: would_auto_close(hover, pts) })
    }

    /// Explicitly closes the current drawing.
    pub fn finish(&mut self, cfg: &EngineConfig) -> Result<Polygon, SailError> {
        match self.complete(cfg, CloseReason::Explicit)? {
            CaptureOutcome::Completed { polygon, .. } => Ok(polygon),
            _ => Err(SailError::NoActiveSession),
        }
    }

    // On failure the session (and its points) stays so the user can keep drawing.
    fn complete(&mut self, cfg: &EngineConfig, reason: CloseReason) -> Result<CaptureOutcome, SailError> {
        let session = self.session.as_ref().ok_or(SailError::NoActiveSession)?;
        let simplified = simplify_ring(&session.points, cfg.simplify_tolerance, cfg.max_polygon_points);
        let polygon = Polygon::new(simplified).and_then(|poly| {
            poly.require_area(cfg.min_polygon_area)?;
            Ok(poly)
        });
        match polygon {
            Ok(polygon) => {
                debug!(
                    "draw session completed ({:?}): {} -> {} points",
                    reason,
                    session.points.len(),
                    polygon.len()
                );
                self.session = None;
                Ok(CaptureOutcome::Completed { polygon, reason })
            }
            Err(e) => {
                warn!("cannot close drawing: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_without_session_fails() {
        let mut c = CaptureController::new();
        let r = c.add_point(Point::new(1.0, 1.0), &EngineConfig::default());
        assert!(matches!(r, Err(SailError::NoActiveSession)));
    }

    #[test]
    fn repeated_point_is_ignored() {
        let mut c = CaptureController::new();
        let cfg = EngineConfig::default();
        c.begin();
        c.add_point(Point::new(1.0, 1.0), &cfg).unwrap();
        assert_eq!(c.add_point(Point::new(1.0, 1.0), &cfg).unwrap(), CaptureOutcome::Ignored);
        assert_eq!(c.points().len(), 1);
    }

    #[test]
    fn two_points_never_close() {
        assert!(!would_auto_close(Point::new(0.0, 0.0), &[Point::new(1.0, 1.0), Point::new(5.0, 5.0)]));
    }
}
