use approx::assert_abs_diff_eq;
use sail::algorithms::perspective::{
    estimate_transform, preset_corners, AnchorSet, AxisAdjust, Corner, PerspectivePreset, PerspectiveSession,
};
use sail::config::EngineConfig;
use sail::model::{BoundingBox, Point};

fn bb() -> BoundingBox {
    BoundingBox::new(0.0, 0.0, 200.0, 100.0)
}

#[test]
fn untouched_rectangle_is_identity() {
    let t = estimate_transform(&AnchorSet::from_box(&bb()), &bb(), 0.1);
    assert_eq!(t.scale_x, 1.0);
    assert_eq!(t.scale_y, 1.0);
    assert_eq!(t.skew_x, 0.0);
    assert_eq!(t.skew_y, 0.0);
    assert_eq!((t.center_x, t.center_y), (100.0, 50.0));
}

#[test]
fn stretch_preset_widens() {
    let t = estimate_transform(&preset_corners(PerspectivePreset::Stretch, &bb()), &bb(), 0.1);
    assert_abs_diff_eq!(t.scale_x, 1.2, epsilon = 1e-12);
    assert_abs_diff_eq!(t.scale_y, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(t.skew_x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(t.skew_y, 0.0, epsilon = 1e-12);
}

#[test]
fn perspective_preset_narrows_the_top() {
    let t = estimate_transform(&preset_corners(PerspectivePreset::Perspective, &bb()), &bb(), 0.1);
    assert_abs_diff_eq!(t.scale_x, 0.85, epsilon = 1e-12);
    assert_abs_diff_eq!(t.skew_x, -0.6, epsilon = 1e-12);
    assert_abs_diff_eq!(t.skew_y, -0.3, epsilon = 1e-12);
    assert_abs_diff_eq!(t.center_x, 100.0, epsilon = 1e-12);
}

#[test]
fn tilt_left_shortens_the_left_side() {
    let t = estimate_transform(&preset_corners(PerspectivePreset::TiltLeft, &bb()), &bb(), 0.1);
    assert_abs_diff_eq!(t.scale_x, 0.975, epsilon = 1e-12);
    assert_abs_diff_eq!(t.scale_y, 0.9, epsilon = 1e-12);
    assert_abs_diff_eq!(t.skew_x, -0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(t.skew_y, -0.05, epsilon = 1e-12);
}

#[test]
fn normal_preset_matches_the_box() {
    assert_eq!(preset_corners(PerspectivePreset::Normal, &bb()), AnchorSet::from_box(&bb()));
}

#[test]
fn dragging_a_corner_updates_skew_and_scale() {
    let cfg = EngineConfig::default();
    let mut s = PerspectiveSession::new(7, bb());
    s.drag_anchor(Corner::TopRight, Point::new(240.0, 0.0)).unwrap();
    let t = s.estimate(&cfg);
    assert_abs_diff_eq!(t.scale_x, 1.1, epsilon = 1e-12);
    assert_abs_diff_eq!(t.skew_x, 0.4, epsilon = 1e-12);
    assert_abs_diff_eq!(t.skew_y, 0.2, epsilon = 1e-12);
    assert_abs_diff_eq!(t.center_x, 110.0, epsilon = 1e-12);

    let rt = s.render_transform(&cfg);
    assert_abs_diff_eq!(rt.skew_x_degrees, 18.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rt.skew_y_degrees, 9.0, epsilon = 1e-9);
}

#[test]
fn collapsed_width_is_floored() {
    let mut s = PerspectiveSession::new(0, bb());
    s.drag_anchor(Corner::TopRight, Point::new(0.0, 0.0)).unwrap();
    s.drag_anchor(Corner::BottomRight, Point::new(0.0, 100.0)).unwrap();
    let t = s.estimate(&EngineConfig::default());
    assert_eq!(t.scale_x, 0.1);
}

#[test]
fn axis_adjust_translates_scales_and_tilts() {
    let cfg = EngineConfig::default();
    let mut s = PerspectiveSession::new(0, bb());
    s.set_adjust(AxisAdjust { translate_x: 5.0, translate_y: -5.0, depth: 50.0, tilt_degrees: 10.0, perspective_degrees: 0.0 })
        .unwrap();
    let rt = s.render_transform(&cfg);
    assert_abs_diff_eq!(rt.center_x, 105.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rt.center_y, 45.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rt.scale_x, 1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(rt.scale_y, 1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(rt.skew_x_degrees, 10.0, epsilon = 1e-12);

    // the box center lands on the translated center
    let c = rt.apply(Point::new(100.0, 50.0));
    assert_abs_diff_eq!(c.x, 105.0, epsilon = 1e-9);
    assert_abs_diff_eq!(c.y, 45.0, epsilon = 1e-9);

    s.reset();
    assert_eq!(*s.adjust(), AxisAdjust::default());
}

#[test]
fn non_finite_drag_is_rejected() {
    let mut s = PerspectiveSession::new(0, bb());
    assert!(s.drag_anchor(Corner::TopLeft, Point::new(f64::INFINITY, 0.0)).is_err());
    assert_eq!(*s.anchors(), AnchorSet::from_box(&bb()));
}

#[test]
fn preset_names_parse() {
    assert_eq!(PerspectivePreset::from_name("tiltRight"), Some(PerspectivePreset::TiltRight));
    assert_eq!(PerspectivePreset::from_name("fisheye"), None);
}
