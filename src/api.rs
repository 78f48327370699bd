use crate::error;
use crate::interop::{arr_f64, arr_u32, arr_u8, new_obj, set_kv, to_js};
use crate::SailEngine;
use js_sys::{Float64Array, Uint32Array, Uint8Array};
use sail::algorithms::perspective::{AxisAdjust, Corner, PerspectivePreset};
use sail::config::EngineConfig;
use sail::model::{EdgeCurveProfile, Point, SailStyle};
use sail::presets::PresetShape;
use sail::DrawEvent;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Names accepted by `add_preset_sail`.
#[wasm_bindgen]
pub fn preset_names() -> JsValue {
    let names: Vec<&str> = PresetShape::ALL.iter().map(|s| s.name()).collect();
    to_js(&names)
}

// Flat [x0, y0, x1, y1, ...] input.
fn points_from_flat(xy: &[f64]) -> Result<Vec<Point>, JsValue> {
    if xy.len() % 2 != 0 {
        return Err(error::err("invalid_points", "point array must have an even length", None));
    }
    if xy.iter().any(|v| !v.is_finite()) {
        return Err(error::non_finite("points"));
    }
    Ok(xy.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect())
}

fn flat_points(points: &[Point]) -> Float64Array {
    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    arr_f64(&flat)
}

fn draw_event_js(ev: DrawEvent) -> JsValue {
    let o = new_obj();
    match ev {
        DrawEvent::Ignored => set_kv(&o, "kind", &JsValue::from_str("ignored")),
        DrawEvent::Added { count } => {
            set_kv(&o, "kind", &JsValue::from_str("added"));
            set_kv(&o, "count", &JsValue::from_f64(count as f64));
        }
        DrawEvent::SailCreated { id, reason } => {
            set_kv(&o, "kind", &JsValue::from_str("sailCreated"));
            set_kv(&o, "id", &JsValue::from_f64(id as f64));
            set_kv(&o, "reason", &to_js(&reason));
        }
    }
    o.into()
}

#[wasm_bindgen]
impl SailEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SailEngine {
        crate::SailEngine::rs_new()
    }
    pub fn version(&self) -> u64 {
        self.rs_version()
    }

    // Config
    pub fn get_config(&self) -> JsValue {
        to_js(self.inner.config())
    }
    pub fn config_json(&self) -> String {
        serde_json::to_string(self.inner.config()).unwrap_or_default()
    }
    pub fn set_config_json_res(&mut self, json: &str) -> JsValue {
        match EngineConfig::from_json(json) {
            Ok(cfg) => {
                self.inner.set_config(cfg);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::from_sail_error(&e),
        }
    }

    // Sails
    pub fn sail_count(&self) -> u32 {
        self.inner.sail_count() as u32
    }
    pub fn sail_ids(&self) -> Uint32Array {
        arr_u32(&self.inner.sail_ids())
    }
    pub fn get_sail(&self, id: u32) -> JsValue {
        match self.inner.sail(id) {
            Some(s) => to_js(s),
            None => JsValue::NULL,
        }
    }
    pub fn get_sail_res(&self, id: u32) -> JsValue {
        match self.inner.sail(id) {
            Some(s) => error::ok(to_js(s)),
            None => error::invalid_id("sail", id),
        }
    }
    pub fn add_preset_sail(&mut self, name: &str, x: f64, y: f64) -> Option<u32> {
        let shape = PresetShape::from_name(name)?;
        self.inner.add_preset_sail(shape, x, y).ok()
    }
    pub fn add_preset_sail_res(&mut self, name: &str, x: f64, y: f64) -> JsValue {
        let Some(shape) = PresetShape::from_name(name) else {
            return error::unknown_name("preset", name);
        };
        error::from_result(self.inner.add_preset_sail(shape, x, y), |id| JsValue::from_f64(id as f64))
    }
    pub fn add_polygon_sail_res(&mut self, xy: &[f64]) -> JsValue {
        let pts = match points_from_flat(xy) {
            Ok(p) => p,
            Err(e) => return e,
        };
        error::from_result(self.inner.add_polygon_sail(&pts), |id| JsValue::from_f64(id as f64))
    }
    pub fn remove_sail(&mut self, id: u32) -> bool {
        self.inner.remove_sail(id)
    }
    pub fn clear(&mut self) {
        self.inner.clear()
    }
    pub fn replace_polygon_res(&mut self, id: u32, xy: &[f64]) -> JsValue {
        let pts = match points_from_flat(xy) {
            Ok(p) => p,
            Err(e) => return e,
        };
        error::from_result(self.inner.replace_polygon(id, &pts), |_| JsValue::TRUE)
    }
    pub fn translate_sail_res(&mut self, id: u32, dx: f64, dy: f64) -> JsValue {
        error::from_result(self.inner.translate_sail(id, dx, dy), |_| JsValue::TRUE)
    }
    pub fn sail_points(&self, id: u32) -> Option<Float64Array> {
        self.inner.sail(id).map(|s| flat_points(s.polygon.points()))
    }

    // Edge profiles
    pub fn edge_profile_res(&self, id: u32) -> JsValue {
        error::from_result(self.inner.edge_profile(id), |info| to_js(&info))
    }
    /// 0/1 per edge, or undefined for an unknown id.
    pub fn edge_flags(&self, id: u32) -> Option<Uint8Array> {
        let sail = self.inner.sail(id)?;
        let flags: Vec<u8> = sail.profile.flags().iter().map(|&c| c as u8).collect();
        Some(arr_u8(&flags))
    }
    pub fn set_edge_profile_res(&mut self, id: u32, flags: &[u8]) -> JsValue {
        let profile = EdgeCurveProfile::new(flags.iter().map(|&f| f != 0).collect());
        error::from_result(self.inner.set_edge_profile(id, profile), |s| to_js(s))
    }
    pub fn toggle_edge_res(&mut self, id: u32, edge: u32) -> JsValue {
        error::from_result(self.inner.toggle_edge(id, edge as usize), JsValue::from_bool)
    }
    pub fn set_all_edges_res(&mut self, id: u32, curved: bool) -> JsValue {
        error::from_result(self.inner.set_all_edges(id, curved), |_| JsValue::TRUE)
    }
    pub fn set_sag_ratio_res(&mut self, id: u32, sag_ratio: f64) -> JsValue {
        error::from_result(self.inner.set_sag_ratio(id, sag_ratio), |_| JsValue::TRUE)
    }
    pub fn set_style_res(&mut self, id: u32, style: JsValue) -> JsValue {
        let style: SailStyle = match serde_wasm_bindgen::from_value(style) {
            Ok(s) => s,
            Err(e) => return error::err("invalid_style", e.to_string(), None),
        };
        error::from_result(self.inner.set_style(id, style), |_| JsValue::TRUE)
    }

    // Rendering
    pub fn sail_path_res(&self, id: u32) -> JsValue {
        error::from_result(self.inner.sail_path(id), |cmds| to_js(&cmds))
    }
    pub fn sail_svg_res(&self, id: u32) -> JsValue {
        error::from_result(self.inner.sail_path(id), |cmds| {
            JsValue::from_str(&sail::algorithms::curved_path::to_svg_d(&cmds))
        })
    }
    pub fn to_svg_paths(&self) -> JsValue {
        to_js(&self.inner.to_svg_paths())
    }
    pub fn pick(&self, x: f64, y: f64) -> Option<u32> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        self.inner.pick(x, y)
    }

    // Drawing
    pub fn begin_drawing_res(&mut self) -> JsValue {
        error::from_result(self.inner.begin_drawing(), |_| JsValue::TRUE)
    }
    pub fn cancel_drawing(&mut self) -> bool {
        self.inner.cancel_drawing()
    }
    pub fn is_drawing(&self) -> bool {
        self.inner.is_drawing()
    }
    pub fn draw_points(&self) -> Float64Array {
        flat_points(self.inner.draw_points())
    }
    pub fn draw_preview(&self, x: f64, y: f64) -> JsValue {
        match self.inner.draw_preview(x, y) {
            Some(p) => to_js(&p),
            None => JsValue::NULL,
        }
    }
    pub fn add_draw_point_res(&mut self, x: f64, y: f64) -> JsValue {
        error::from_result(self.inner.add_draw_point(x, y), draw_event_js)
    }
    pub fn finish_drawing_res(&mut self) -> JsValue {
        error::from_result(self.inner.finish_drawing(), |id| JsValue::from_f64(id as f64))
    }

    // Perspective
    pub fn begin_perspective_res(&mut self, id: u32) -> JsValue {
        error::from_result(self.inner.begin_perspective(id), |rt| to_js(&rt))
    }
    pub fn end_perspective(&mut self) -> bool {
        self.inner.end_perspective()
    }
    pub fn perspective_anchors(&self) -> JsValue {
        match self.inner.perspective() {
            Some(s) => to_js(s.anchors()),
            None => JsValue::NULL,
        }
    }
    pub fn drag_anchor_res(&mut self, corner: u8, x: f64, y: f64) -> JsValue {
        let Some(corner) = Corner::from_index(corner) else {
            return error::out_of_range("corner", 0.0, 3.0, corner as f64);
        };
        error::from_result(self.inner.drag_anchor(corner, x, y), |rt| to_js(&rt))
    }
    pub fn apply_perspective_preset_res(&mut self, name: &str) -> JsValue {
        let Some(kind) = PerspectivePreset::from_name(name) else {
            return error::unknown_name("perspective preset", name);
        };
        error::from_result(self.inner.apply_perspective_preset(kind), |rt| to_js(&rt))
    }
    pub fn set_axis_adjust_res(&mut self, adjust: JsValue) -> JsValue {
        let adjust: AxisAdjust = match serde_wasm_bindgen::from_value(adjust) {
            Ok(a) => a,
            Err(e) => return error::err("invalid_adjust", e.to_string(), None),
        };
        error::from_result(self.inner.set_axis_adjust(adjust), |rt| to_js(&rt))
    }
    pub fn reset_perspective_res(&mut self) -> JsValue {
        error::from_result(self.inner.reset_perspective(), |rt| to_js(&rt))
    }
    pub fn perspective_transform_res(&self) -> JsValue {
        error::from_result(self.inner.perspective_transform(), |rt| to_js(&rt))
    }
    /// Canvas `setTransform(a, b, c, d, e, f)` arguments.
    pub fn perspective_matrix(&self) -> Option<Float64Array> {
        let rt = self.inner.perspective_transform().ok()?;
        Some(arr_f64(&rt.matrix()))
    }
    pub fn perspective_path_res(&self, id: u32) -> JsValue {
        error::from_result(self.inner.perspective_path(id), |cmds| to_js(&cmds))
    }
}

impl Default for SailEngine {
    fn default() -> Self {
        Self::new()
    }
}
