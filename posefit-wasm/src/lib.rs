use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

/// Browser handle over one editing session.
#[wasm_bindgen]
pub struct Editor {
    pub(crate) inner: posefit::Session,
}

impl Editor {
    pub fn rs_new(epsilon: u32) -> Editor {
        Editor {
            inner: posefit::Session::new(epsilon, Default::default()),
        }
    }
    pub fn rs_geom_version(&self) -> u64 {
        self.inner.graph().geom_version()
    }
}
