use crate::model::{BoundingBox, Point};

use super::tolerance::EPS_LEN;

/// Distance from `p` to the infinite line through `a` and `b`.
/// Falls back to the point distance when `a` and `b` coincide.
pub fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len = ab.length();
    if len <= EPS_LEN {
        return p.distance(a);
    }
    ab.cross(p - a).abs() / len
}

/// Squared distance from `p` to the closed segment `ab` and the clamped parameter.
pub fn seg_distance_sq(p: Point, a: Point, b: Point) -> (f64, f64) {
    let v = b - a;
    let w = p - a;
    let vv = v.dot(v);
    let t = if vv > 0.0 { (w.dot(v) / vv).clamp(0.0, 1.0) } else { 0.0 };
    let proj = a + v * t;
    (p.distance_sq(proj), t)
}

/// Mean of the vertices (not the area centroid).
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::default();
    }
    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Shoelace area of the implicitly closed ring.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        acc += a.cross(b);
    }
    0.5 * acc
}

pub fn bounding_box(points: &[Point]) -> BoundingBox {
    let mut bb = BoundingBox {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };
    for p in points {
        bb.min_x = bb.min_x.min(p.x);
        bb.min_y = bb.min_y.min(p.y);
        bb.max_x = bb.max_x.max(p.x);
        bb.max_y = bb.max_y.max(p.y);
    }
    if points.is_empty() {
        return BoundingBox { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 };
    }
    bb
}

/// Even-odd ray cast.
pub fn point_in_polygon(p: Point, ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
