//! Four-anchor perspective approximation.
//!
//! The dragged corners are reduced to independent per-axis scale and shear
//! relative to the object's axis-aligned box. This cannot express converging
//! vanishing points; it is a cheap stand-in for a homography that keeps drag
//! feedback immediate.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{check_finite, SailError};
use crate::geometry::limits::MAX_SKEW_DEGREES;
use crate::geometry::tolerance::safe_div;
use crate::model::{BoundingBox, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn from_index(i: u8) -> Option<Corner> {
        match i {
            0 => Some(Corner::TopLeft),
            1 => Some(Corner::TopRight),
            2 => Some(Corner::BottomLeft),
            3 => Some(Corner::BottomRight),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorSet {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl AnchorSet {
    pub fn from_box(bb: &BoundingBox) -> Self {
        Self {
            top_left: Point::new(bb.min_x, bb.min_y),
            top_right: Point::new(bb.max_x, bb.min_y),
            bottom_left: Point::new(bb.min_x, bb.max_y),
            bottom_right: Point::new(bb.max_x, bb.max_y),
        }
    }

    pub fn get(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomLeft => self.bottom_left,
            Corner::BottomRight => self.bottom_right,
        }
    }

    pub fn set(&mut self, corner: Corner, p: Point) {
        match corner {
            Corner::TopLeft => self.top_left = p,
            Corner::TopRight => self.top_right = p,
            Corner::BottomLeft => self.bottom_left = p,
            Corner::BottomRight => self.bottom_right = p,
        }
    }

    /// TL, TR, BL, BR.
    pub fn to_array(&self) -> [Point; 4] {
        [self.top_left, self.top_right, self.bottom_left, self.bottom_right]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PerspectivePreset {
    Normal,
    TiltLeft,
    TiltRight,
    Stretch,
    Perspective,
}

impl PerspectivePreset {
    pub fn from_name(name: &str) -> Option<PerspectivePreset> {
        match name {
            "normal" => Some(PerspectivePreset::Normal),
            "tiltLeft" => Some(PerspectivePreset::TiltLeft),
            "tiltRight" => Some(PerspectivePreset::TiltRight),
            "stretch" => Some(PerspectivePreset::Stretch),
            "perspective" => Some(PerspectivePreset::Perspective),
            _ => None,
        }
    }
}

/// Stock corner layouts; offsets are fractions of the box size.
pub fn preset_corners(kind: PerspectivePreset, bb: &BoundingBox) -> AnchorSet {
    let (w, h) = (bb.width(), bb.height());
    let mut a = AnchorSet::from_box(bb);
    match kind {
        PerspectivePreset::Normal => {}
        PerspectivePreset::TiltLeft => {
            // left side recedes
            a.top_left = a.top_left + Point::new(0.05 * w, 0.1 * h);
            a.bottom_left = a.bottom_left + Point::new(0.0, -0.1 * h);
        }
        PerspectivePreset::TiltRight => {
            a.top_right = a.top_right + Point::new(-0.05 * w, 0.1 * h);
            a.bottom_right = a.bottom_right + Point::new(0.0, -0.1 * h);
        }
        PerspectivePreset::Stretch => {
            a.top_left.x -= 0.1 * w;
            a.bottom_left.x -= 0.1 * w;
            a.top_right.x += 0.1 * w;
            a.bottom_right.x += 0.1 * w;
        }
        PerspectivePreset::Perspective => {
            // top edge narrower, as seen from below
            a.top_left.x += 0.15 * w;
            a.top_right.x -= 0.15 * w;
        }
    }
    a
}

/// Scale/shear estimate. Skews are dimensionless ratios.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerspectiveTransform {
    pub center_x: f64,
    pub center_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
}

pub fn estimate_transform(corners: &AnchorSet, reference: &BoundingBox, min_scale: f64) -> PerspectiveTransform {
    let AnchorSet { top_left: tl, top_right: tr, bottom_left: bl, bottom_right: br } = *corners;
    let (w, h) = (reference.width(), reference.height());

    let skew_x = safe_div((tr.x - tl.x) - (br.x - bl.x), h, 0.0);
    let skew_y = safe_div((bl.x - tl.x) - (br.x - tr.x), w, 0.0);

    let top_width = (tr.x - tl.x).abs();
    let bottom_width = (br.x - bl.x).abs();
    let left_height = (bl.y - tl.y).abs();
    let right_height = (br.y - tr.y).abs();
    let scale_x = safe_div(top_width + bottom_width, 2.0 * w, 1.0).max(min_scale);
    let scale_y = safe_div(left_height + right_height, 2.0 * h, 1.0).max(min_scale);

    let c = [tl, tr, bl, br].iter().fold(Point::default(), |acc, p| acc + *p) * 0.25;

    PerspectiveTransform { center_x: c.x, center_y: c.y, scale_x, scale_y, skew_x, skew_y }
}

/// Slider adjustments applied on top of the anchor estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisAdjust {
    pub translate_x: f64,
    pub translate_y: f64,
    /// Simulated Z; only changes the uniform scale.
    pub depth: f64,
    pub tilt_degrees: f64,
    pub perspective_degrees: f64,
}

/// What a skew-capable renderer consumes: skews in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTransform {
    pub center_x: f64,
    pub center_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x_degrees: f64,
    pub skew_y_degrees: f64,
    /// Center of the untransformed object box.
    pub origin_x: f64,
    pub origin_y: f64,
}

impl RenderTransform {
    /// Canvas-style `[a, b, c, d, e, f]` for absolute coordinates, composed
    /// as translate * scale * skewX * skewY about the object's own center.
    pub fn matrix(&self) -> [f64; 6] {
        let tx = self.skew_x_degrees.to_radians().tan();
        let ty = self.skew_y_degrees.to_radians().tan();
        let a = self.scale_x * (1.0 + tx * ty);
        let c = self.scale_x * tx;
        let b = self.scale_y * ty;
        let d = self.scale_y;
        let e = self.center_x - (a * self.origin_x + c * self.origin_y);
        let f = self.center_y - (b * self.origin_x + d * self.origin_y);
        [a, b, c, d, e, f]
    }

    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.matrix();
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }
}

impl PerspectiveTransform {
    pub fn to_render(
        &self,
        reference: &BoundingBox,
        adjust: &AxisAdjust,
        cfg: &EngineConfig,
    ) -> RenderTransform {
        let depth = 1.0 + adjust.depth * cfg.depth_scale_per_unit;
        let clamp_deg = |d: f64| d.clamp(-MAX_SKEW_DEGREES, MAX_SKEW_DEGREES);
        let origin = reference.center();
        RenderTransform {
            center_x: self.center_x + adjust.translate_x,
            center_y: self.center_y + adjust.translate_y,
            scale_x: (self.scale_x * depth).max(cfg.min_scale),
            scale_y: (self.scale_y * depth).max(cfg.min_scale),
            skew_x_degrees: clamp_deg(self.skew_x * cfg.skew_degrees + adjust.tilt_degrees),
            skew_y_degrees: clamp_deg(self.skew_y * cfg.skew_degrees + adjust.perspective_degrees),
            origin_x: origin.x,
            origin_y: origin.y,
        }
    }
}

/// Anchor-editing state for one sail. Dropping it discards the anchors.
#[derive(Clone, Debug)]
pub struct PerspectiveSession {
    pub sail_id: u32,
    reference: BoundingBox,
    anchors: AnchorSet,
    adjust: AxisAdjust,
}

impl PerspectiveSession {
    pub fn new(sail_id: u32, reference: BoundingBox) -> Self {
        debug!("perspective session for sail {} over {:?}", sail_id, reference);
        Self { sail_id, reference, anchors: AnchorSet::from_box(&reference), adjust: AxisAdjust::default() }
    }

    pub fn reference(&self) -> &BoundingBox {
        &self.reference
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub fn adjust(&self) -> &AxisAdjust {
        &self.adjust
    }

    pub fn drag_anchor(&mut self, corner: Corner, to: Point) -> Result<(), SailError> {
        check_finite("x", to.x)?;
        check_finite("y", to.y)?;
        self.anchors.set(corner, to);
        Ok(())
    }

    pub fn apply_preset(&mut self, kind: PerspectivePreset) {
        self.anchors = preset_corners(kind, &self.reference);
    }

    pub fn set_adjust(&mut self, adjust: AxisAdjust) -> Result<(), SailError> {
        check_finite("translateX", adjust.translate_x)?;
        check_finite("translateY", adjust.translate_y)?;
        check_finite("depth", adjust.depth)?;
        check_finite("tilt", adjust.tilt_degrees)?;
        check_finite("perspective", adjust.perspective_degrees)?;
        self.adjust = adjust;
        Ok(())
    }

    pub fn estimate(&self, cfg: &EngineConfig) -> PerspectiveTransform {
        estimate_transform(&self.anchors, &self.reference, cfg.min_scale)
    }

    pub fn render_transform(&self, cfg: &EngineConfig) -> RenderTransform {
        self.estimate(cfg).to_render(&self.reference, &self.adjust, cfg)
    }

    /// Moves the reference box and every anchor with the sail.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let d = Point::new(dx, dy);
        self.reference = BoundingBox::new(
            self.reference.min_x + dx,
            self.reference.min_y + dy,
            self.reference.width(),
            self.reference.height(),
        );
        for corner in [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft, Corner::BottomRight] {
            self.anchors.set(corner, self.anchors.get(corner) + d);
        }
    }

    pub fn reset(&mut self) {
        self.anchors = AnchorSet::from_box(&self.reference);
        self.adjust = AxisAdjust::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_render_leaves_points_alone() {
        let bb = BoundingBox::new(10.0, 20.0, 200.0, 100.0);
        let cfg = EngineConfig::default();
        let s = PerspectiveSession::new(0, bb);
        let rt = s.render_transform(&cfg);
        let p = rt.apply(Point::new(35.0, 60.0));
        assert!((p.x - 35.0).abs() < 1e-9 && (p.y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_reference_does_not_divide_by_zero() {
        let bb = BoundingBox::new(0.0, 0.0, 0.0, 0.0);
        let t = estimate_transform(&AnchorSet::from_box(&bb), &bb, 0.1);
        assert_eq!((t.scale_x, t.scale_y, t.skew_x, t.skew_y), (1.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn translate_keeps_the_estimate() {
        let cfg = EngineConfig::default();
        let mut s = PerspectiveSession::new(0, BoundingBox::new(0.0, 0.0, 200.0, 100.0));
        s.apply_preset(PerspectivePreset::Stretch);
        let before = s.estimate(&cfg);
        s.translate(30.0, -10.0);
        let after = s.estimate(&cfg);
        assert_eq!(s.reference().min_x, 30.0);
        assert!((after.scale_x - before.scale_x).abs() < 1e-12);
        assert!((after.center_x - before.center_x - 30.0).abs() < 1e-9);
        assert!((after.center_y - before.center_y + 10.0).abs() < 1e-9);
    }

    #[test]
    fn corner_index_mapping() {
        assert_eq!(Corner::from_index(3), Some(Corner::BottomRight));
        assert_eq!(Corner::from_index(4), None);
    }
}
