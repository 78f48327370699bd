use crate::geometry::math::seg_distance_sq;
use crate::model::{PathCommand, Point};

use super::tolerance::MAX_FLATTEN_DEPTH;

pub fn quad_point(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t)
}

pub fn flatten_quad(points: &mut Vec<Point>, p0: Point, p1: Point, p2: Point, tol: f64, depth: u32) {
    let (d2, _) = seg_distance_sq(p1, p0, p2);
    // Curve deviation is half the control point's
    if 0.25 * d2 <= tol * tol || depth > MAX_FLATTEN_DEPTH {
        points.push(p2);
        return;
    }
    let p01 = p0.midpoint(p1);
    let p12 = p1.midpoint(p2);
    let mid = p01.midpoint(p12);
    flatten_quad(points, p0, p01, mid, tol, depth + 1);
    flatten_quad(points, mid, p12, p2, tol, depth + 1);
}

/// Flattens a single closed path into a ring (closing point not repeated).
pub fn flatten_path(commands: &[PathCommand], tol: f64) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::new();
    let mut cur = Point::default();
    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo { to } | PathCommand::LineTo { to } => out.push(to),
            PathCommand::QuadTo { ctrl, to } => flatten_quad(&mut out, cur, ctrl, to, tol, 0),
            PathCommand::Close => {}
        }
        if let Some(end) = cmd.end_point() {
            cur = end;
        }
    }
    if out.len() > 1 && out[0].coincides(out[out.len() - 1]) {
        out.pop();
    }
    out
}
