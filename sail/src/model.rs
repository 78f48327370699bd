use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::error::SailError;
use crate::geometry::limits::MIN_POLYGON_POINTS;
use crate::geometry::math;
use crate::geometry::tolerance::{EPS_LEN, EPS_POS};
use crate::presets::PresetShape;

/// A 2D point (or vector) in canvas space.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, o: Point) -> f64 {
        self.x * o.x + self.y * o.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(self, o: Point) -> f64 {
        self.x * o.y - self.y * o.x
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance_sq(self, o: Point) -> f64 {
        (self - o).dot(self - o)
    }

    pub fn distance(self, o: Point) -> f64 {
        self.distance_sq(o).sqrt()
    }

    pub fn midpoint(self, o: Point) -> Point {
        Point::new(0.5 * (self.x + o.x), 0.5 * (self.y + o.y))
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        if len > EPS_LEN {
            Some(Point::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Rotated +90 degrees.
    pub fn perp(self) -> Point {
        Point::new(-self.y, self.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn coincides(self, o: Point) -> bool {
        (self.x - o.x).abs() < EPS_POS && (self.y - o.y).abs() < EPS_POS
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, o: Point) -> Point {
        Point::new(self.x + o.x, self.y + o.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, o: Point) -> Point {
        Point::new(self.x - o.x, self.y - o.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { min_x: x, min_y: y, max_x: x + width, max_y: y + height }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.min_x + self.max_x), 0.5 * (self.min_y + self.max_y))
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// An implicitly closed polygon: edge `i` runs from vertex `i` to vertex
/// `(i + 1) % n`. The closing vertex is never stored twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polygon {
    points: Vec<Point>,
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = SailError;

    fn try_from(points: Vec<Point>) -> Result<Self, SailError> {
        Polygon::new(points)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(p: Polygon) -> Self {
        p.points
    }
}

impl Polygon {
    /// Normalizes the ring (drops consecutive coincident points and an
    /// explicit closing duplicate) and requires at least three vertices.
    pub fn new(points: Vec<Point>) -> Result<Self, SailError> {
        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            return Err(SailError::NonFinite { param: if points[bad].x.is_finite() { "y" } else { "x" } });
        }
        let mut pts = points;
        pts.dedup_by(|a, b| a.coincides(*b));
        while pts.len() > 1 && pts[0].coincides(pts[pts.len() - 1]) {
            pts.pop();
        }
        if pts.len() < MIN_POLYGON_POINTS {
            return Err(SailError::InsufficientGeometry {
                points: pts.len(),
                area: 0.0,
            });
        }
        Ok(Self { points: pts })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of edges; equals the vertex count.
    pub fn edge_count(&self) -> usize {
        self.points.len()
    }

    pub fn edge(&self, i: usize) -> (Point, Point) {
        let n = self.points.len();
        (self.points[i % n], self.points[(i + 1) % n])
    }

    pub fn centroid(&self) -> Point {
        math::centroid(&self.points)
    }

    /// Positive for counter-clockwise winding in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        math::signed_area(&self.points)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Rejects slivers whose enclosed area is at or below `min_area`.
    pub fn require_area(&self, min_area: f64) -> Result<(), SailError> {
        let area = self.area();
        if area <= min_area {
            return Err(SailError::InsufficientGeometry { points: self.len(), area });
        }
        Ok(())
    }

    pub fn bounding_box(&self) -> BoundingBox {
        math::bounding_box(&self.points)
    }

    pub fn contains(&self, p: Point) -> bool {
        math::point_in_polygon(p, &self.points)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Polygon {
        Polygon {
            points: self.points.iter().map(|p| Point::new(p.x + dx, p.y + dy)).collect(),
        }
    }
}

/// One straight/curved flag per polygon edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCurveProfile {
    curved: Vec<bool>,
}

impl EdgeCurveProfile {
    pub fn new(curved: Vec<bool>) -> Self {
        Self { curved }
    }

    pub fn uniform(edge_count: usize, curved: bool) -> Self {
        Self { curved: vec![curved; edge_count] }
    }

    pub fn straight(edge_count: usize) -> Self {
        Self::uniform(edge_count, false)
    }

    pub fn curved(edge_count: usize) -> Self {
        Self::uniform(edge_count, true)
    }

    pub fn len(&self) -> usize {
        self.curved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curved.is_empty()
    }

    /// Out-of-range edges read as straight.
    pub fn is_curved(&self, edge: usize) -> bool {
        self.curved.get(edge).copied().unwrap_or(false)
    }

    pub fn set(&mut self, edge: usize, curved: bool) -> bool {
        match self.curved.get_mut(edge) {
            Some(flag) => {
                *flag = curved;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, edge: usize) -> bool {
        match self.curved.get_mut(edge) {
            Some(flag) => {
                *flag = !*flag;
                true
            }
            None => false,
        }
    }

    pub fn flags(&self) -> &[bool] {
        &self.curved
    }

    pub fn curved_count(&self) -> usize {
        self.curved.iter().filter(|c| **c).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a as f32 / 255.0)
    }
}

/// Fill and stroke handed to the rendering surface alongside the path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SailStyle {
    pub fill: Color,
    pub stroke: Color,
    pub opacity: f32,
    pub stroke_width: f32,
}

impl Default for SailStyle {
    fn default() -> Self {
        Self {
            fill: Color::rgba(240, 240, 235, 255),
            stroke: Color::rgba(60, 60, 60, 255),
            opacity: 0.85,
            stroke_width: 2.0,
        }
    }
}

/// Where a sail's polygon came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShapeSource {
    Preset { shape: PresetShape },
    Freehand,
}

impl ShapeSource {
    /// Curve flag used when a profile has to be regenerated.
    pub fn default_curved(&self) -> bool {
        matches!(self, ShapeSource::Preset { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sail {
    pub polygon: Polygon,
    pub profile: EdgeCurveProfile,
    pub sag_ratio: f64,
    pub style: SailStyle,
    pub source: ShapeSource,
}

impl Sail {
    pub fn new(polygon: Polygon, profile: EdgeCurveProfile, sag_ratio: f64, source: ShapeSource) -> Self {
        Self { polygon, profile, sag_ratio, style: SailStyle::default(), source }
    }

    pub fn edge_count(&self) -> usize {
        self.polygon.edge_count()
    }
}

/// Snapshot of a sail's edge flags for the shape/style selection UI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeProfileInfo {
    pub curved_edges: Vec<bool>,
    pub edge_count: usize,
    pub source_kind: ShapeSource,
}

/// Draw command consumed by the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo { to: Point },
    LineTo { to: Point },
    QuadTo { ctrl: Point, to: Point },
    Close,
}

impl PathCommand {
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathCommand::MoveTo { to } | PathCommand::LineTo { to } | PathCommand::QuadTo { to, .. } => Some(to),
            PathCommand::Close => None,
        }
    }

    /// Applies `f` to every coordinate, including control points.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> PathCommand {
        match *self {
            PathCommand::MoveTo { to } => PathCommand::MoveTo { to: f(to) },
            PathCommand::LineTo { to } => PathCommand::LineTo { to: f(to) },
            PathCommand::QuadTo { ctrl, to } => PathCommand::QuadTo { ctrl: f(ctrl), to: f(to) },
            PathCommand::Close => PathCommand::Close,
        }
    }
}
