use js_sys::Reflect;
use sail_wasm::SailEngine;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn error_data(v: &JsValue, key: &str) -> JsValue {
    let err = Reflect::get(v, &JsValue::from_str("error")).unwrap();
    let data = Reflect::get(&err, &JsValue::from_str("data")).unwrap();
    Reflect::get(&data, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn invalid_ids_return_typed_errors() {
    let mut e = SailEngine::new();
    let ver = e.version();
    let r = e.toggle_edge_res(42, 0);
    assert!(is_err(&r, "invalid_id"));
    assert_eq!(e.version(), ver, "state mutated on error");

    let r = e.sail_path_res(7);
    assert!(is_err(&r, "invalid_id"));
    let r = e.begin_perspective_res(3);
    assert!(is_err(&r, "invalid_id"));
    assert_eq!(e.version(), ver);
}

#[wasm_bindgen_test]
fn edge_errors_carry_data() {
    let mut e = SailEngine::new();
    let id = e.add_preset_sail("square", 0.0, 0.0).unwrap();
    let ver = e.version();

    let r = e.toggle_edge_res(id, 9);
    assert!(is_err(&r, "invalid_edge"));
    assert_eq!(error_data(&r, "count").as_f64(), Some(4.0));

    let r = e.set_edge_profile_res(id, &[1, 0, 1]);
    assert!(is_err(&r, "profile_mismatch"));
    assert_eq!(error_data(&r, "expected").as_f64(), Some(4.0));
    assert_eq!(error_data(&r, "got").as_f64(), Some(3.0));
    assert_eq!(e.version(), ver, "state mutated on error");
}

#[wasm_bindgen_test]
fn bad_inputs_are_rejected_before_the_core() {
    let mut e = SailEngine::new();
    let ver = e.version();
    assert!(is_err(&e.add_preset_sail_res("circle", 0.0, 0.0), "unknown_name"));
    assert!(is_err(&e.add_preset_sail_res("square", f64::NAN, 0.0), "non_finite"));
    assert!(is_err(&e.add_polygon_sail_res(&[0.0, 0.0, 100.0]), "invalid_points"));
    assert!(is_err(&e.add_polygon_sail_res(&[0.0, 0.0, f64::INFINITY, 0.0, 0.0, 50.0]), "non_finite"));
    assert!(is_err(&e.set_config_json_res("{\"sagRatio\": \"deep\"}"), "invalid_config"));
    assert_eq!(e.version(), ver);
}

#[wasm_bindgen_test]
fn small_polygons_are_insufficient() {
    let mut e = SailEngine::new();
    let r = e.add_polygon_sail_res(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0]);
    assert!(is_err(&r, "insufficient_geometry"));
    assert_eq!(error_data(&r, "points").as_f64(), Some(3.0));
    assert_eq!(e.sail_count(), 0);
}

#[wasm_bindgen_test]
fn drawing_and_perspective_need_a_session() {
    let mut e = SailEngine::new();
    assert!(is_err(&e.add_draw_point_res(1.0, 1.0), "no_session"));
    assert!(is_err(&e.finish_drawing_res(), "no_session"));
    assert!(is_err(&e.drag_anchor_res(0, 1.0, 1.0), "no_session"));
    assert!(is_err(&e.perspective_transform_res(), "no_session"));
    assert!(e.perspective_matrix().is_none());
}

#[wasm_bindgen_test]
fn perspective_inputs_are_validated() {
    let mut e = SailEngine::new();
    let id = e.add_preset_sail("rectangle", 0.0, 0.0).unwrap();
    assert!(!is_err(&e.begin_perspective_res(id), "invalid_id"));
    let ver = e.version();
    assert!(is_err(&e.drag_anchor_res(4, 0.0, 0.0), "out_of_range"));
    assert!(is_err(&e.apply_perspective_preset_res("fisheye"), "unknown_name"));
    assert!(is_err(&e.drag_anchor_res(1, f64::NAN, 0.0), "non_finite"));
    assert_eq!(e.version(), ver, "state mutated on error");
}

#[wasm_bindgen_test]
fn sail_limit_is_capacity_exceeded() {
    let mut e = SailEngine::new();
    for i in 0..10 {
        assert!(e.add_preset_sail("triangle", i as f64 * 10.0, 0.0).is_some());
    }
    let r = e.add_preset_sail_res("triangle", 0.0, 0.0);
    assert!(is_err(&r, "capacity_exceeded"));
    assert_eq!(error_data(&r, "max").as_f64(), Some(10.0));
    assert!(is_err(&e.begin_drawing_res(), "capacity_exceeded"));
}

#[wasm_bindgen_test]
fn oversized_outlines_are_too_many_points() {
    let mut e = SailEngine::new();
    let ver = e.version();
    let xy: Vec<f64> = (0..40)
        .flat_map(|i| {
            let a = i as f64 * std::f64::consts::TAU / 40.0;
            [300.0 + 200.0 * a.cos(), 300.0 + 200.0 * a.sin()]
        })
        .collect();
    let r = e.add_polygon_sail_res(&xy);
    assert!(is_err(&r, "too_many_points"));
    assert_eq!(error_data(&r, "points").as_f64(), Some(40.0));
    assert_eq!(error_data(&r, "max").as_f64(), Some(12.0));
    assert_eq!(e.version(), ver, "state mutated on error");
}
