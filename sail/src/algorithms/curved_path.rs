//! Polygon + per-edge curve flags -> draw commands.
//!
//! Curved edges become a single quadratic segment whose control point sits
//! on the edge's inward normal, so the rendered edge sags toward the sail's
//! interior by `sag_ratio * edge_length` at its midpoint.

use crate::geometry::tolerance::MIN_EDGE_LEN;
use crate::model::{EdgeCurveProfile, PathCommand, Point, Polygon, Sail};

/// Control point for a curved edge `a -> b`, or `None` for edges shorter than
/// `MIN_EDGE_LEN`. The bow direction is picked by comparing distances to
/// `centroid`, which makes it independent of winding.
pub fn curve_control(a: Point, b: Point, centroid: Point, sag_ratio: f64) -> Option<Point> {
    let chord = b - a;
    let len = chord.length();
    if len < MIN_EDGE_LEN {
        return None;
    }
    let mid = a.midpoint(b);
    let tangent = chord.normalized()?;
    let n1 = tangent.perp();
    let n2 = n1 * -1.0;
    let inward = if (mid + n1).distance_sq(centroid) <= (mid + n2).distance_sq(centroid) {
        n1
    } else {
        n2
    };
    let depth = len * sag_ratio;
    // A quadratic's midpoint deviates half as far as its control point
    Some(mid + inward * (2.0 * depth))
}

/// Builds the closed outline. Output is deterministic for a given input.
pub fn build_path(polygon: &Polygon, profile: &EdgeCurveProfile, sag_ratio: f64) -> Vec<PathCommand> {
    let pts = polygon.points();
    let n = pts.len();
    let mut cmds = Vec::with_capacity(n + 2);
    if n == 0 {
        return cmds;
    }
    let centroid = polygon.centroid();
    cmds.push(PathCommand::MoveTo { to: pts[0] });
    for i in 0..n {
        let (a, b) = polygon.edge(i);
        if a.distance(b) < MIN_EDGE_LEN {
            continue;
        }
        if profile.is_curved(i) {
            if let Some(ctrl) = curve_control(a, b, centroid, sag_ratio) {
                cmds.push(PathCommand::QuadTo { ctrl, to: b });
            }
        } else {
            cmds.push(PathCommand::LineTo { to: b });
        }
    }
    cmds.push(PathCommand::Close);
    cmds
}

pub fn build_sail_path(sail: &Sail) -> Vec<PathCommand> {
    build_path(&sail.polygon, &sail.profile, sail.sag_ratio)
}

/// SVG path data (`M`, `L`, `Q`, `Z`) for a command list.
pub fn to_svg_d(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for cmd in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match *cmd {
            PathCommand::MoveTo { to } => d.push_str(&format!("M {} {}", to.x, to.y)),
            PathCommand::LineTo { to } => d.push_str(&format!("L {} {}", to.x, to.y)),
            PathCommand::QuadTo { ctrl, to } => {
                d.push_str(&format!("Q {} {}, {} {}", ctrl.x, ctrl.y, to.x, to.y))
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn straight_square_svg() {
        let cmds = build_path(&square(), &EdgeCurveProfile::straight(4), 0.06);
        assert_eq!(to_svg_d(&cmds), "M 0 0 L 100 0 L 100 100 L 0 100 L 0 0 Z");
    }

    #[test]
    fn mixed_profile_emits_one_quad() {
        let mut prof = EdgeCurveProfile::straight(4);
        prof.set(0, true);
        let cmds = build_path(&square(), &prof, 0.05);
        assert_eq!(cmds[1], PathCommand::QuadTo { ctrl: Point::new(50.0, 10.0), to: Point::new(100.0, 0.0) });
        assert!(matches!(cmds[2], PathCommand::LineTo { .. }));
    }

    #[test]
    fn zero_sag_puts_control_on_chord() {
        let c = curve_control(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 5.0), 0.0).unwrap();
        assert_eq!(c, Point::new(5.0, 0.0));
    }

    #[test]
    fn sub_pixel_edge_has_no_control() {
        assert!(curve_control(Point::new(0.0, 0.0), Point::new(0.5, 0.0), Point::new(5.0, 5.0), 0.1).is_none());
    }
}
