use approx::assert_abs_diff_eq;
use sail::algorithms::curved_path::{build_path, to_svg_d};
use sail::model::{EdgeCurveProfile, PathCommand, Point, Polygon};

fn poly(pts: &[(f64, f64)]) -> Polygon {
    Polygon::new(pts.iter().map(|&p| Point::from(p)).collect()).unwrap()
}

fn square() -> Polygon {
    poly(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)])
}

fn controls(cmds: &[PathCommand]) -> Vec<Point> {
    cmds.iter()
        .filter_map(|c| match c {
            PathCommand::QuadTo { ctrl, .. } => Some(*ctrl),
            _ => None,
        })
        .collect()
}

#[test]
fn curved_square_controls_sit_sixteen_units_inside() {
    let sq = square();
    let cmds = build_path(&sq, &EdgeCurveProfile::curved(4), 0.08);
    assert_eq!(cmds.len(), 6, "move + 4 quads + close");
    assert!(matches!(cmds[0], PathCommand::MoveTo { to } if to == Point::new(0.0, 0.0)));
    assert_eq!(cmds[5], PathCommand::Close);

    let ctrls = controls(&cmds);
    assert_eq!(ctrls.len(), 4);
    let expected = [(50.0, 16.0), (84.0, 50.0), (50.0, 84.0), (16.0, 50.0)];
    for (i, (c, e)) in ctrls.iter().zip(expected.iter()).enumerate() {
        assert_abs_diff_eq!(c.x, e.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, e.1, epsilon = 1e-9);
        let (a, b) = sq.edge(i);
        assert_abs_diff_eq!(c.distance(a.midpoint(b)), 16.0, epsilon = 1e-9);
        assert!(c.x > 0.0 && c.x < 100.0 && c.y > 0.0 && c.y < 100.0);
    }
}

#[test]
fn all_straight_reduces_to_polyline_closure() {
    let pts = [(10.0, 10.0), (120.0, 30.0), (90.0, 140.0), (5.0, 80.0)];
    let cmds = build_path(&poly(&pts), &EdgeCurveProfile::straight(4), 0.08);
    let mut expected = vec![PathCommand::MoveTo { to: Point::from(pts[0]) }];
    for p in pts.iter().skip(1) {
        expected.push(PathCommand::LineTo { to: Point::from(*p) });
    }
    expected.push(PathCommand::LineTo { to: Point::from(pts[0]) });
    expected.push(PathCommand::Close);
    assert_eq!(cmds, expected);
}

#[test]
fn bow_is_inward_for_both_windings() {
    let ccw = [(0.0, 0.0), (200.0, 0.0), (150.0, 120.0), (20.0, 90.0)];
    let cw: Vec<(f64, f64)> = ccw.iter().rev().copied().collect();
    for pts in [ccw.to_vec(), cw] {
        let p = poly(&pts);
        let c = p.centroid();
        let ctrls = controls(&build_path(&p, &EdgeCurveProfile::curved(4), 0.06));
        for (i, ctrl) in ctrls.iter().enumerate() {
            let (a, b) = p.edge(i);
            let side_ctrl = (b - a).cross(*ctrl - a);
            let side_centroid = (b - a).cross(c - a);
            assert!(side_ctrl * side_centroid > 0.0, "edge {} bows outward", i);
        }
    }
}

#[test]
fn sub_pixel_edge_is_skipped() {
    let p = poly(&[(0.0, 0.0), (100.0, 0.0), (100.0, 0.5), (100.0, 100.0), (0.0, 100.0)]);
    let cmds = build_path(&p, &EdgeCurveProfile::curved(5), 0.05);
    // move + 4 drawable edges + close
    assert_eq!(cmds.len(), 6);
    assert_eq!(controls(&cmds).len(), 4);
}

#[test]
fn output_is_deterministic() {
    let p = poly(&[(3.5, 7.25), (180.125, 12.0), (140.0, 160.75), (12.0, 99.0)]);
    let mut prof = EdgeCurveProfile::straight(4);
    prof.set(1, true);
    prof.set(3, true);
    let a = to_svg_d(&build_path(&p, &prof, 0.07));
    let b = to_svg_d(&build_path(&p, &prof, 0.07));
    assert_eq!(a, b);
    assert_eq!(a.matches('Q').count(), 2);
    assert!(a.ends_with('Z'));
}
