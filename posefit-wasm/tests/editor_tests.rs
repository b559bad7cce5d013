#![cfg(target_arch = "wasm32")]

use js_sys::{Float64Array, Reflect};
use posefit_wasm::Editor;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const TRIANGLE: &str = r#"{
    "epsilon": 150000,
    "hole": [[0,0],[40,0],[40,40],[0,40]],
    "figure": {"vertices": [[10,10],[20,10],[10,20]], "edges": [[0,1],[0,2]]}
}"#;

fn get(v: &JsValue, k: &str) -> JsValue {
    Reflect::get(v, &JsValue::from_str(k)).unwrap()
}

fn is_ok(v: &JsValue) -> bool {
    get(v, "ok").as_bool() == Some(true)
}

fn is_err(v: &JsValue, code: &str) -> bool {
    if is_ok(v) {
        return false;
    }
    get(&get(v, "error"), "code").as_string().as_deref() == Some(code)
}

fn positions(ed: &Editor) -> Vec<f64> {
    Float64Array::from(get(&ed.get_vertex_data(), "positions")).to_vec()
}

#[wasm_bindgen_test]
fn load_problem_builds_the_figure() {
    let mut ed = Editor::new(0);
    let r = ed.load_problem_res(TRIANGLE, 1.0, 0.0, 0.0);
    assert!(is_ok(&r));
    assert_eq!(ed.vertex_count(), 3);
    assert_eq!(ed.edge_count(), 2);
    assert_eq!(ed.epsilon(), 150000);
    assert_eq!(Float64Array::from(ed.get_boundary()).length(), 8);
}

#[wasm_bindgen_test]
fn failed_load_keeps_session() {
    let mut ed = Editor::new(0);
    ed.add_vertex(1.0, 1.0);
    let ver = ed.geom_version();
    assert!(is_err(&ed.load_problem_res("{not json", 1.0, 0.0, 0.0), "json_parse"));
    assert!(is_err(&ed.load_problem_res(TRIANGLE, 0.0, 0.0, 0.0), "out_of_bounds"));
    assert_eq!(ed.vertex_count(), 1);
    assert_eq!(ed.geom_version(), ver);
}

#[wasm_bindgen_test]
fn typed_errors_do_not_mutate() {
    let mut ed = Editor::new(0);
    let ver = ed.geom_version();
    assert!(is_err(&ed.add_edge_res(7, 8), "invalid_id"));
    assert!(is_err(&ed.begin_drag_res(42), "invalid_id"));
    assert!(is_err(&ed.add_vertex_res(f64::NAN, 0.0), "non_finite"));
    assert_eq!(ed.add_vertex(f64::INFINITY, 0.0), None);
    assert_eq!(ed.vertex_count(), 0);
    assert!(is_err(&ed.pick_res(0.0, 0.0, -1.0), "out_of_range"));
    assert_eq!(ed.geom_version(), ver);
    assert_eq!(ed.history_depth(), 0);
}

#[wasm_bindgen_test]
fn drag_rejects_illegal_and_undoes_as_one() {
    let mut ed = Editor::new(0);
    assert!(is_ok(&ed.load_problem_res(TRIANGLE, 1.0, 0.0, 0.0)));
    let before = positions(&ed);
    // vertex 0 of the figure sits at (10,10)
    let hit = ed.begin_drag_at_res(10.0, 10.0, 1.0);
    assert!(is_ok(&hit));
    assert!(get(&hit, "value").as_f64().is_some());
    assert!(is_err(&ed.begin_pan_res(0.0, 0.0), "gesture_active"));
    // tiny moves stay within 15%
    assert_eq!(ed.drag_to(10.5, 10.0), "applied");
    assert_eq!(ed.drag_to(11.0, 10.0), "applied");
    // far away stretches both edges
    assert_eq!(ed.drag_to(0.0, 0.0), "rejected");
    ed.end_gesture();
    assert_eq!(ed.history_depth(), 1);
    assert!(ed.undo());
    assert_eq!(positions(&ed), before);
}

#[wasm_bindgen_test]
fn state_round_trip_and_solution() {
    let mut ed = Editor::new(0);
    assert!(is_ok(&ed.load_problem_res(TRIANGLE, 2.0, 5.0, 5.0)));
    let state = ed.to_state();
    let mut other = Editor::new(0);
    assert!(is_ok(&other.from_state_res(state)));
    assert_eq!(positions(&other), positions(&ed));
    assert_eq!(
        other.export_solution_json().as_deref(),
        Some(r#"{"vertices":[[10,10],[20,10],[10,20]]}"#)
    );
    assert!(is_err(&other.from_state_res(JsValue::from_str("nope")), "json_parse"));
    assert_eq!(other.vertex_count(), 3);
}

#[wasm_bindgen_test]
fn drawn_vertices_stay_out_of_the_solution() {
    let mut ed = Editor::new(0);
    assert!(is_ok(&ed.load_problem_res(TRIANGLE, 1.0, 0.0, 0.0)));
    assert!(ed.add_vertex(5.0, 5.0).is_some());
    assert_eq!(ed.vertex_count(), 4);
    assert_eq!(ed.figure_len(), 3);
    assert_eq!(
        ed.export_solution_json().as_deref(),
        Some(r#"{"vertices":[[10,10],[20,10],[10,20]]}"#)
    );
}
