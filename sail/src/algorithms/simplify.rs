//! Ramer–Douglas–Peucker point reduction for captured strokes.

use log::debug;

use crate::geometry::limits::MIN_POLYGON_POINTS;
use crate::geometry::math::perpendicular_distance;
use crate::model::Point;

/// Reduces an open point sequence to a subsequence whose dropped points all
/// lie within `tolerance` of the kept chords. Endpoints are kept exactly;
/// inputs of two or fewer points are returned unchanged.
pub fn simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    fn rec(slice: &[Point], tol: f64, out: &mut Vec<Point>) {
        let n = slice.len();
        if n <= 2 {
            out.push(slice[0]);
            return;
        }
        let a = slice[0];
        let b = slice[n - 1];
        let mut idx = 0usize;
        let mut max_d = 0.0f64;
        for (i, p) in slice.iter().enumerate().take(n - 1).skip(1) {
            let d = perpendicular_distance(*p, a, b);
            if d > max_d {
                max_d = d;
                idx = i;
            }
        }
        if max_d > tol {
            // left half pushes everything except its last point, which is
            // the right half's first
            rec(&slice[..=idx], tol, out);
            rec(&slice[idx..], tol, out);
        } else {
            out.push(a);
        }
    }
    let mut out = Vec::new();
    rec(points, tolerance.max(0.0), &mut out);
    out.push(points[points.len() - 1]);
    out
}

/// Simplifies an implicitly closed ring, doubling the tolerance until the
/// result has at most `max_points` vertices. The ring is treated as the open
/// path `p0..pn-1, p0` so the wrap-around edge is simplified too.
///
/// Always terminates: once the tolerance exceeds the ring's extent every
/// vertex but `p0` is dropped. Results under three points are returned as is
/// and rejected by `Polygon::new`.
pub fn simplify_ring(ring: &[Point], tolerance: f64, max_points: usize) -> Vec<Point> {
    if ring.len() < MIN_POLYGON_POINTS {
        return ring.to_vec();
    }
    let mut path: Vec<Point> = ring.to_vec();
    path.push(ring[0]);

    let mut tol = tolerance.max(0.0);
    let mut pass = 0u32;
    loop {
        let mut out = simplify(&path, tol);
        out.pop();
        pass += 1;
        debug!("simplify pass {} tol={:.2}: {} -> {} points", pass, tol, ring.len(), out.len());
        if out.len() <= max_points || out.len() < MIN_POLYGON_POINTS || tol.is_infinite() {
            return out;
        }
        tol = if tol > 0.0 { tol * 2.0 } else { 1.0 };
    }
}
