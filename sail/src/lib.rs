pub mod config;
pub mod error;
pub mod model;
pub mod presets;
pub mod geometry {
    pub mod flatten;
    pub mod intersect;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod capture;
    pub mod curved_path;
    pub mod perspective;
    pub mod simplify;
}

use algorithms::capture::{CaptureController, CaptureOutcome, CapturePreview, CloseReason};
use algorithms::curved_path::{build_sail_path, to_svg_d};
use algorithms::perspective::{AxisAdjust, Corner, PerspectivePreset, PerspectiveSession, RenderTransform};
use config::EngineConfig;
use error::{check_finite, SailError};
use geometry::flatten::flatten_path;
use geometry::math::point_in_polygon;
use log::{debug, warn};
use model::{EdgeCurveProfile, EdgeProfileInfo, PathCommand, Point, Polygon, Sail, SailStyle, ShapeSource};
use presets::PresetShape;

// Flattening tolerance for hit testing (px)
const PICK_FLATTEN_TOL: f64 = 0.5;

/// Result of feeding one pointer-down event to the drawing session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawEvent {
    Ignored,
    Added { count: usize },
    SailCreated { id: u32, reason: CloseReason },
}

/// Owns every sail on the canvas plus the transient drawing and perspective
/// sessions. All mutation goes through `&mut self`, so events are naturally
/// serialized.
pub struct Scene {
    pub(crate) sails: Vec<Option<Sail>>, // id is index
    pub(crate) config: EngineConfig,
    pub(crate) capture: CaptureController,
    pub(crate) perspective: Option<PerspectiveSession>,
    pub(crate) geom_ver: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Scene {
            sails: Vec::new(),
            config,
            capture: CaptureController::new(),
            perspective: None,
            geom_ver: 1,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// New sails pick up the new defaults; existing sails keep their sag ratio.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        self.bump();
    }

    pub fn version(&self) -> u64 {
        self.geom_ver
    }

    fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }

    // Sails

    pub fn sail_count(&self) -> usize {
        self.sails.iter().filter(|s| s.is_some()).count()
    }

    pub fn sail_ids(&self) -> Vec<u32> {
        self.sails
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|_| i as u32))
            .collect()
    }

    pub fn sail(&self, id: u32) -> Option<&Sail> {
        self.sails.get(id as usize).and_then(|s| s.as_ref())
    }

    fn sail_mut(&mut self, id: u32) -> Result<&mut Sail, SailError> {
        self.sails
            .get_mut(id as usize)
            .and_then(|s| s.as_mut())
            .ok_or(SailError::InvalidId { kind: "sail", id })
    }

    fn check_capacity(&self) -> Result<(), SailError> {
        let max = self.config.max_sails;
        if self.sail_count() >= max {
            warn!("sail limit of {} reached", max);
            return Err(SailError::CapacityExceeded { max });
        }
        Ok(())
    }

    fn check_vertex_limit(&self, polygon: &Polygon) -> Result<(), SailError> {
        let max = self.config.max_polygon_points;
        if polygon.len() > max {
            warn!("rejected polygon with {} vertices (limit {})", polygon.len(), max);
            return Err(SailError::TooManyPoints { points: polygon.len(), max });
        }
        Ok(())
    }

    fn insert_sail(&mut self, polygon: Polygon, source: ShapeSource) -> Result<u32, SailError> {
        self.check_capacity()?;
        if let Err(e) = polygon.require_area(self.config.min_polygon_area) {
            warn!("rejected sail: {}", e);
            return Err(e);
        }
        let profile = EdgeCurveProfile::uniform(polygon.edge_count(), source.default_curved());
        let sail = Sail::new(polygon, profile, self.config.sag_ratio, source);
        let id = self.sails.len() as u32;
        debug!("sail {} created from {:?} with {} edges", id, source, sail.edge_count());
        self.sails.push(Some(sail));
        self.bump();
        Ok(id)
    }

    /// Places a preset with its box's top-left corner at (x, y).
    pub fn add_preset_sail(&mut self, shape: PresetShape, x: f64, y: f64) -> Result<u32, SailError> {
        check_finite("x", x)?;
        check_finite("y", y)?;
        let polygon = Polygon::new(shape.points(Point::new(x, y)))?;
        self.insert_sail(polygon, ShapeSource::Preset { shape })
    }

    /// Creates a sail from an already captured outline. No simplification;
    /// outlines above `max_polygon_points` are rejected.
    pub fn add_polygon_sail(&mut self, points: &[Point]) -> Result<u32, SailError> {
        let polygon = Polygon::new(points.to_vec())?;
        self.check_vertex_limit(&polygon)?;
        self.insert_sail(polygon, ShapeSource::Freehand)
    }

    pub fn remove_sail(&mut self, id: u32) -> bool {
        let Some(slot) = self.sails.get_mut(id as usize) else {
            return false;
        };
        if slot.take().is_none() {
            return false;
        }
        self.end_perspective_for(id);
        self.bump();
        true
    }

    fn end_perspective_for(&mut self, id: u32) {
        if self.perspective.as_ref().map_or(false, |p| p.sail_id == id) {
            debug!("perspective session for sail {} ended", id);
            self.perspective = None;
        }
    }

    /// Drops all sails and any open drawing or perspective session. Ids are
    /// not reused afterwards.
    pub fn clear(&mut self) {
        self.sails.iter_mut().for_each(|slot| *slot = None);
        self.capture.cancel();
        self.perspective = None;
        self.bump();
    }

    /// Swaps a sail's outline. The curve profile is regenerated when the
    /// vertex count changes and kept otherwise. Ends a perspective session
    /// open on this sail, since its anchors no longer describe the outline.
    pub fn replace_polygon(&mut self, id: u32, points: &[Point]) -> Result<(), SailError> {
        let polygon = Polygon::new(points.to_vec())?;
        self.check_vertex_limit(&polygon)?;
        polygon.require_area(self.config.min_polygon_area)?;
        let sail = self.sail_mut(id)?;
        if polygon.edge_count() != sail.profile.len() {
            sail.profile = EdgeCurveProfile::uniform(polygon.edge_count(), sail.source.default_curved());
        }
        sail.polygon = polygon;
        self.end_perspective_for(id);
        self.bump();
        Ok(())
    }

    pub fn translate_sail(&mut self, id: u32, dx: f64, dy: f64) -> Result<(), SailError> {
        check_finite("dx", dx)?;
        check_finite("dy", dy)?;
        let sail = self.sail_mut(id)?;
        sail.polygon = sail.polygon.translated(dx, dy);
        if let Some(session) = self.perspective.as_mut().filter(|p| p.sail_id == id) {
            session.translate(dx, dy);
        }
        self.bump();
        Ok(())
    }

    // Edge profiles

    pub fn edge_profile(&self, id: u32) -> Result<EdgeProfileInfo, SailError> {
        let sail = self.sail(id).ok_or(SailError::InvalidId { kind: "sail", id })?;
        Ok(EdgeProfileInfo {
            curved_edges: sail.profile.flags().to_vec(),
            edge_count: sail.edge_count(),
            source_kind: sail.source,
        })
    }

    pub fn set_edge_profile(&mut self, id: u32, profile: EdgeCurveProfile) -> Result<&Sail, SailError> {
        let sail = self.sail_mut(id)?;
        if profile.len() != sail.edge_count() {
            return Err(SailError::ProfileMismatch { expected: sail.edge_count(), got: profile.len() });
        }
        sail.profile = profile;
        self.bump();
        self.sail(id).ok_or(SailError::InvalidId { kind: "sail", id })
    }

    /// Flips one edge and returns its new state.
    pub fn toggle_edge(&mut self, id: u32, edge: usize) -> Result<bool, SailError> {
        let sail = self.sail_mut(id)?;
        let count = sail.edge_count();
        if !sail.profile.toggle(edge) {
            return Err(SailError::InvalidEdge { index: edge, count });
        }
        let curved = sail.profile.is_curved(edge);
        self.bump();
        Ok(curved)
    }

    pub fn set_all_edges(&mut self, id: u32, curved: bool) -> Result<(), SailError> {
        let sail = self.sail_mut(id)?;
        sail.profile = EdgeCurveProfile::uniform(sail.edge_count(), curved);
        self.bump();
        Ok(())
    }

    /// Not clamped: large ratios produce over-concave outlines.
    pub fn set_sag_ratio(&mut self, id: u32, sag_ratio: f64) -> Result<(), SailError> {
        check_finite("sagRatio", sag_ratio)?;
        self.sail_mut(id)?.sag_ratio = sag_ratio;
        self.bump();
        Ok(())
    }

    pub fn set_style(&mut self, id: u32, style: SailStyle) -> Result<(), SailError> {
        if !style.opacity.is_finite() {
            return Err(SailError::NonFinite { param: "opacity" });
        }
        if !style.stroke_width.is_finite() {
            return Err(SailError::NonFinite { param: "strokeWidth" });
        }
        self.sail_mut(id)?.style = style;
        self.bump();
        Ok(())
    }

    // Rendering

    pub fn sail_path(&self, id: u32) -> Result<Vec<PathCommand>, SailError> {
        let sail = self.sail(id).ok_or(SailError::InvalidId { kind: "sail", id })?;
        Ok(build_sail_path(sail))
    }

    pub fn to_svg_paths(&self) -> Vec<String> {
        self.sails.iter().flatten().map(|s| to_svg_d(&build_sail_path(s))).collect()
    }

    /// Topmost sail whose rendered outline contains (x, y).
    pub fn pick(&self, x: f64, y: f64) -> Option<u32> {
        let p = Point::new(x, y);
        self.sails.iter().enumerate().rev().find_map(|(i, s)| {
            let sail = s.as_ref()?;
            if !sail.polygon.bounding_box().contains(p) {
                return None;
            }
            let ring = flatten_path(&build_sail_path(sail), PICK_FLATTEN_TOL);
            point_in_polygon(p, &ring).then_some(i as u32)
        })
    }

    // Drawing

    pub fn begin_drawing(&mut self) -> Result<(), SailError> {
        self.check_capacity()?;
        self.capture.begin();
        Ok(())
    }

    pub fn cancel_drawing(&mut self) -> bool {
        self.capture.cancel()
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_active()
    }

    pub fn draw_points(&self) -> &[Point] {
        self.capture.points()
    }

    pub fn draw_preview(&self, x: f64, y: f64) -> Option<CapturePreview> {
        self.capture.preview(Point::new(x, y))
    }

    pub fn add_draw_point(&mut self, x: f64, y: f64) -> Result<DrawEvent, SailError> {
        if !self.capture.is_active() {
            return Err(SailError::NoActiveSession);
        }
        self.check_capacity()?;
        match self.capture.add_point(Point::new(x, y), &self.config)? {
            CaptureOutcome::Ignored => Ok(DrawEvent::Ignored),
            CaptureOutcome::Added { count } => Ok(DrawEvent::Added { count }),
            CaptureOutcome::Completed { polygon, reason } => {
                let id = self.insert_sail(polygon, ShapeSource::Freehand)?;
                Ok(DrawEvent::SailCreated { id, reason })
            }
        }
    }

    pub fn finish_drawing(&mut self) -> Result<u32, SailError> {
        if !self.capture.is_active() {
            return Err(SailError::NoActiveSession);
        }
        self.check_capacity()?;
        let polygon = self.capture.finish(&self.config)?;
        self.insert_sail(polygon, ShapeSource::Freehand)
    }

    // Perspective

    /// Opens anchor editing on a sail, replacing any other session.
    pub fn begin_perspective(&mut self, id: u32) -> Result<RenderTransform, SailError> {
        let sail = self.sail(id).ok_or(SailError::InvalidId { kind: "sail", id })?;
        let session = PerspectiveSession::new(id, sail.polygon.bounding_box());
        let rt = session.render_transform(&self.config);
        self.perspective = Some(session);
        Ok(rt)
    }

    pub fn end_perspective(&mut self) -> bool {
        self.perspective.take().is_some()
    }

    pub fn perspective(&self) -> Option<&PerspectiveSession> {
        self.perspective.as_ref()
    }

    fn perspective_edit(
        &mut self,
        f: impl FnOnce(&mut PerspectiveSession) -> Result<(), SailError>,
    ) -> Result<RenderTransform, SailError> {
        let session = self.perspective.as_mut().ok_or(SailError::NoActiveSession)?;
        f(session)?;
        let rt = session.render_transform(&self.config);
        self.bump();
        Ok(rt)
    }

    pub fn drag_anchor(&mut self, corner: Corner, x: f64, y: f64) -> Result<RenderTransform, SailError> {
        self.perspective_edit(|s| s.drag_anchor(corner, Point::new(x, y)))
    }

    pub fn apply_perspective_preset(&mut self, kind: PerspectivePreset) -> Result<RenderTransform, SailError> {
        self.perspective_edit(|s| {
            s.apply_preset(kind);
            Ok(())
        })
    }

    pub fn set_axis_adjust(&mut self, adjust: AxisAdjust) -> Result<RenderTransform, SailError> {
        self.perspective_edit(|s| s.set_adjust(adjust))
    }

    pub fn reset_perspective(&mut self) -> Result<RenderTransform, SailError> {
        self.perspective_edit(|s| {
            s.reset();
            Ok(())
        })
    }

    pub fn perspective_transform(&self) -> Result<RenderTransform, SailError> {
        let session = self.perspective.as_ref().ok_or(SailError::NoActiveSession)?;
        Ok(session.render_transform(&self.config))
    }

    /// The sail's outline mapped through the active perspective session, or
    /// the plain outline if the session is for another sail (or absent).
    /// Quadratic segments stay exact under the affine map.
    pub fn perspective_path(&self, id: u32) -> Result<Vec<PathCommand>, SailError> {
        let cmds = self.sail_path(id)?;
        match self.perspective.as_ref().filter(|p| p.sail_id == id) {
            Some(session) => {
                let rt = session.render_transform(&self.config);
                Ok(cmds.iter().map(|c| c.map_points(|p| rt.apply(p))).collect())
            }
            None => Ok(cmds),
        }
    }
}
