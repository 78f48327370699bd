use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logging;

pub use logging::init_logging;

#[wasm_bindgen]
pub struct SailEngine { pub(crate) inner: sail::Scene }

impl SailEngine {
    pub fn rs_new() -> SailEngine { SailEngine { inner: sail::Scene::new() } }
    pub fn rs_version(&self) -> u64 { self.inner.version() }
}
