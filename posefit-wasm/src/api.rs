use crate::error;
use crate::interop::{arr_f64, arr_u32, new_obj, set_kv, to_js};
use crate::Editor;
use posefit::geometry::transform::Transform;
use posefit::model::Point;
use posefit::problem::Problem;
use posefit::{DragOutcome, Session};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn outcome_str(o: DragOutcome) -> &'static str {
    match o {
        DragOutcome::Applied => "applied",
        DragOutcome::Rejected => "rejected",
        DragOutcome::Ignored => "ignored",
    }
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new(epsilon: u32) -> Editor {
        crate::Editor::rs_new(epsilon)
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }
    pub fn epsilon(&self) -> u32 {
        self.inner.epsilon()
    }
    pub fn vertex_count(&self) -> u32 {
        self.inner.graph().vertex_count()
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.graph().edge_count()
    }
    pub fn figure_len(&self) -> u32 {
        self.inner.figure_len()
    }
    pub fn history_depth(&self) -> u32 {
        self.inner.history().depth() as u32
    }
    pub fn is_idle(&self) -> bool {
        self.inner.is_idle()
    }

    // Problem ingest. The current session survives any failure.
    pub fn load_problem_res(&mut self, text: &str, scale: f64, offset_x: f64, offset_y: f64) -> JsValue {
        let built = Transform::new(scale, offset_x, offset_y)
            .and_then(|t| Problem::from_json_str(text).and_then(|p| Session::from_problem(&p, t)));
        match built {
            Ok(session) => {
                self.inner = session;
                error::ok(JsValue::from_f64(self.inner.graph().vertex_count() as f64))
            }
            Err(e) => error::from_core(&e),
        }
    }

    // Drawing
    pub fn add_vertex(&mut self, x: f64, y: f64) -> Option<u32> {
        self.inner.add_vertex(Point::new(x, y)).ok()
    }
    pub fn add_vertex_res(&mut self, x: f64, y: f64) -> JsValue {
        if let Some(e) = error::check_xy(x, y) {
            return e;
        }
        error::result(self.inner.add_vertex(Point::new(x, y)), |id| JsValue::from_f64(id as f64))
    }
    pub fn add_edge(&mut self, a: u32, b: u32) -> Option<u32> {
        self.inner.add_edge(a, b).ok()
    }
    pub fn add_edge_res(&mut self, a: u32, b: u32) -> JsValue {
        error::result(self.inner.add_edge(a, b), |id| JsValue::from_f64(id as f64))
    }
    pub fn get_vertex(&self, id: u32) -> JsValue {
        match self.inner.graph().position(id) {
            Some(p) => to_js(&[p.x, p.y]),
            None => JsValue::NULL,
        }
    }
    pub fn get_vertex_res(&self, id: u32) -> JsValue {
        match self.inner.graph().position(id) {
            Some(p) => error::ok(to_js(&[p.x, p.y])),
            None => error::invalid_id("vertex", id),
        }
    }

    // Typed arrays getters
    pub fn get_vertex_data(&self) -> JsValue {
        let (ids, pos) = self.inner.graph().get_vertex_arrays();
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "positions", &arr_f64(&pos).into());
        obj.into()
    }
    pub fn get_edge_data(&self) -> JsValue {
        let ea = self.inner.graph().get_edge_arrays();
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ea.ids).into());
        set_kv(&obj, "endpoints", &arr_u32(&ea.endpoints).into());
        set_kv(&obj, "lengths", &arr_f64(&ea.lengths).into());
        set_kv(&obj, "ratios", &arr_f64(&ea.ratios).into());
        obj.into()
    }
    pub fn get_boundary(&self) -> JsValue {
        let Some(b) = self.inner.graph().boundary() else {
            return JsValue::NULL;
        };
        let flat: Vec<f64> = b.points.iter().flat_map(|p| [p.x, p.y]).collect();
        arr_f64(&flat).into()
    }

    // Picking
    pub fn pick(&self, x: f64, y: f64, tol: f64) -> JsValue {
        let Some(p) = self.inner.pick(Point::new(x, y), tol) else {
            return JsValue::NULL;
        };
        // Flatten to { kind: 'vertex'|'edge', ... }
        let obj = new_obj();
        match p {
            posefit::Pick::Vertex { id, dist } => {
                set_kv(&obj, "kind", &JsValue::from_str("vertex"));
                set_kv(&obj, "id", &JsValue::from_f64(id as f64));
                set_kv(&obj, "dist", &JsValue::from_f64(dist));
            }
            posefit::Pick::Edge { id, t, dist } => {
                set_kv(&obj, "kind", &JsValue::from_str("edge"));
                set_kv(&obj, "id", &JsValue::from_f64(id as f64));
                set_kv(&obj, "t", &JsValue::from_f64(t));
                set_kv(&obj, "dist", &JsValue::from_f64(dist));
            }
        }
        obj.into()
    }
    pub fn pick_res(&self, x: f64, y: f64, tol: f64) -> JsValue {
        if let Some(e) = error::check_xy(x, y) {
            return e;
        }
        if !tol.is_finite() {
            return error::non_finite("tol");
        }
        if tol < 0.0 {
            return error::out_of_range("tol", 0.0, f64::INFINITY, tol);
        }
        error::ok(self.pick(x, y, tol))
    }

    // Gestures
    pub fn begin_drag_res(&mut self, id: u32) -> JsValue {
        error::result(self.inner.begin_drag(id), |()| JsValue::TRUE)
    }
    /// Value is the grabbed entity id, or null when nothing was hit.
    pub fn begin_drag_at_res(&mut self, x: f64, y: f64, tol: f64) -> JsValue {
        if let Some(e) = error::check_xy(x, y) {
            return e;
        }
        if !tol.is_finite() || tol < 0.0 {
            return error::out_of_range("tol", 0.0, f64::INFINITY, tol);
        }
        error::result(self.inner.begin_drag_at(Point::new(x, y), tol), |hit| match hit {
            Some(id) => JsValue::from_f64(id as f64),
            None => JsValue::NULL,
        })
    }
    /// Errors also read as "ignored"; use `drag_to_res` to tell them apart.
    pub fn drag_to(&mut self, x: f64, y: f64) -> String {
        match self.inner.drag_to(Point::new(x, y)) {
            Ok(o) => outcome_str(o).to_string(),
            Err(_) => outcome_str(DragOutcome::Ignored).to_string(),
        }
    }
    pub fn drag_to_res(&mut self, x: f64, y: f64) -> JsValue {
        if let Some(e) = error::check_xy(x, y) {
            return e;
        }
        error::result(self.inner.drag_to(Point::new(x, y)), |o| {
            JsValue::from_str(outcome_str(o))
        })
    }
    pub fn begin_pan_res(&mut self, x: f64, y: f64) -> JsValue {
        if let Some(e) = error::check_xy(x, y) {
            return e;
        }
        error::result(self.inner.begin_pan(Point::new(x, y)), |()| JsValue::TRUE)
    }
    pub fn pan_to(&mut self, x: f64, y: f64) -> String {
        outcome_str(self.inner.pan_to(Point::new(x, y))).to_string()
    }
    pub fn end_gesture(&mut self) {
        self.inner.end_gesture();
    }
    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    // Persistence
    pub fn to_state(&self) -> JsValue {
        match self.inner.to_state_json() {
            Ok(v) => to_js(&v),
            Err(_) => JsValue::NULL,
        }
    }
    pub fn to_state_res(&self) -> JsValue {
        error::result(self.inner.to_state_json(), |v| to_js(&v))
    }
    /// Replaces the session on success only.
    pub fn from_state_res(&mut self, v: JsValue) -> JsValue {
        let value = match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => val,
            Err(e) => return error::err("json_parse", format!("{}", e), None),
        };
        match Session::from_state_json(value, *self.inner.transform()) {
            Ok(session) => {
                self.inner = session;
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::from_core(&e),
        }
    }
    pub fn export_solution(&self) -> JsValue {
        to_js(&self.inner.export_solution())
    }
    pub fn export_solution_json(&self) -> Option<String> {
        self.inner.export_solution().to_json_string().ok()
    }
}
