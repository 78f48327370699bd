// Parametric segment-segment intersection.
// Classifies proper crossings and endpoint touches; parallel and collinear
// segments report no intersection.

use crate::model::Point;

use super::tolerance::{near_zero, EPS_DENOM, EPS_PARAM};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegIntersection {
    None,
    // Interior crossing on both segments
    Proper { t: f64, u: f64, at: Point },
    // At least one parameter sits on an endpoint (0 or 1 within tolerance)
    Touch { t: f64, u: f64, at: Point },
}

#[inline]
fn on_end(x: f64) -> bool { near_zero(x, EPS_PARAM) || near_zero(1.0 - x, EPS_PARAM) }

/// Solves `a0 + t*(a1-a0) == b0 + u*(b1-b0)`.
pub fn intersect_segments(a0: Point, a1: Point, b0: Point, b1: Point) -> SegIntersection {
    let r = a1 - a0;
    let s = b1 - b0;
    let rxs = r.cross(s);
    if near_zero(rxs, EPS_DENOM) {
        return SegIntersection::None;
    }
    let qp = b0 - a0;
    let t = qp.cross(s) / rxs;
    let u = qp.cross(r) / rxs;
    if t < -EPS_PARAM || t > 1.0 + EPS_PARAM || u < -EPS_PARAM || u > 1.0 + EPS_PARAM {
        return SegIntersection::None;
    }
    let at = a0 + r * t;
    if on_end(t) || on_end(u) {
        SegIntersection::Touch { t, u, at }
    } else {
        SegIntersection::Proper { t, u, at }
    }
}

/// True when the segments cross or one touches the other's interior.
/// Segments meeting only at a shared endpoint do not count.
pub fn segments_intersect(a0: Point, a1: Point, b0: Point, b1: Point) -> bool {
    match intersect_segments(a0, a1, b0, b1) {
        SegIntersection::None => false,
        SegIntersection::Proper { .. } => true,
        SegIntersection::Touch { t, u, .. } => !(on_end(t) && on_end(u)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point { Point::new(x, y) }

    #[test]
    fn proper_cross() {
        let r = intersect_segments(p(0.0,0.0), p(2.0,2.0), p(0.0,2.0), p(2.0,0.0));
        match r { SegIntersection::Proper{t,u,at} => { assert!((t-0.5).abs()<1e-12 && (u-0.5).abs()<1e-12); assert_eq!(at, p(1.0,1.0)); }, _ => panic!("expected proper") }
    }

    #[test]
    fn shared_endpoint_is_not_crossing() {
        let r = intersect_segments(p(0.0,0.0), p(1.0,0.0), p(1.0,0.0), p(1.0,1.0));
        assert!(matches!(r, SegIntersection::Touch{..}));
        assert!(!segments_intersect(p(0.0,0.0), p(1.0,0.0), p(1.0,0.0), p(1.0,1.0)));
    }

    #[test]
    fn t_junction_counts() {
        assert!(segments_intersect(p(0.0,0.0), p(2.0,0.0), p(1.0,0.0), p(1.0,3.0)));
    }

    #[test]
    fn parallel_and_collinear_are_none() {
        assert!(!segments_intersect(p(0.0,0.0), p(3.0,0.0), p(0.0,1.0), p(3.0,1.0)));
        assert!(!segments_intersect(p(0.0,0.0), p(3.0,0.0), p(1.0,0.0), p(2.0,0.0)));
    }

    #[test]
    fn disjoint_lines_beyond_range() {
        assert!(!segments_intersect(p(0.0,0.0), p(1.0,1.0), p(3.0,0.0), p(2.0,1.5)));
    }
}
