use js_sys::{Float64Array, Object, Reflect, Uint32Array, Uint8Array};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }

pub fn set_kv(obj: &Object, key: &str, val: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), val);
}

pub fn arr_u32(data: &[u32]) -> Uint32Array { Uint32Array::from(data) }
pub fn arr_f64(data: &[f64]) -> Float64Array { Float64Array::from(data) }
pub fn arr_u8(data: &[u8]) -> Uint8Array { Uint8Array::from(data) }

// Plain objects (not Maps) so JS callers can use dot access.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    let ser = serde_wasm_bindgen::Serializer::json_compatible();
    v.serialize(&ser).unwrap_or(JsValue::NULL)
}
