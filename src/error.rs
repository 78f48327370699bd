use crate::interop::{new_obj, set_kv};
use sail::error::SailError;
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f64, max: f64, got: f64) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "min", &JsValue::from_f64(min));
    set_kv(&d, "max", &JsValue::from_f64(max));
    set_kv(&d, "got", &JsValue::from_f64(got));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("unknown {} id {}", kind, id), Some(d.into()))
}

#[inline]
pub fn unknown_name(kind: &str, got: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "got", &JsValue::from_str(got));
    err("unknown_name", format!("unknown {} '{}'", kind, got), Some(d.into()))
}

/// Envelope for a core error, with the variant's fields as `data`.
pub fn from_sail_error(e: &SailError) -> JsValue {
    let d = new_obj();
    match e {
        SailError::InsufficientGeometry { points, area } => {
            set_kv(&d, "points", &JsValue::from_f64(*points as f64));
            set_kv(&d, "area", &JsValue::from_f64(*area));
        }
        SailError::CapacityExceeded { max } | SailError::CaptureFull { max } => {
            set_kv(&d, "max", &JsValue::from_f64(*max as f64));
        }
        SailError::TooManyPoints { points, max } => {
            set_kv(&d, "points", &JsValue::from_f64(*points as f64));
            set_kv(&d, "max", &JsValue::from_f64(*max as f64));
        }
        SailError::InvalidId { kind, id } => {
            set_kv(&d, "kind", &JsValue::from_str(kind));
            set_kv(&d, "id", &JsValue::from_f64(*id as f64));
        }
        SailError::ProfileMismatch { expected, got } => {
            set_kv(&d, "expected", &JsValue::from_f64(*expected as f64));
            set_kv(&d, "got", &JsValue::from_f64(*got as f64));
        }
        SailError::InvalidEdge { index, count } => {
            set_kv(&d, "index", &JsValue::from_f64(*index as f64));
            set_kv(&d, "count", &JsValue::from_f64(*count as f64));
        }
        SailError::NonFinite { param } => {
            set_kv(&d, "param", &JsValue::from_str(param));
        }
        _ => return err(e.code(), e.to_string(), None),
    }
    err(e.code(), e.to_string(), Some(d.into()))
}

pub fn from_result<T>(r: Result<T, SailError>, f: impl FnOnce(T) -> JsValue) -> JsValue {
    match r {
        Ok(v) => ok(f(v)),
        Err(e) => from_sail_error(&e),
    }
}
