use posefit::model::{Point, ShapeKind};
use posefit::{Error, Graph};

#[test]
fn adjacency_is_symmetric() {
    let mut g = Graph::new();
    let a = g.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = g.add_vertex(Point::new(3.0, 4.0)).unwrap();
    let c = g.add_vertex(Point::new(6.0, 0.0)).unwrap();
    let ab = g.add_edge(a, b, 0).unwrap();
    let bc = g.add_edge(b, c, 0).unwrap();
    let vb = g.vertex(b).unwrap();
    assert!(vb.adjacent.contains(&a) && vb.adjacent.contains(&c));
    assert!(vb.incident.contains(&ab) && vb.incident.contains(&bc));
    assert!(g.vertex(a).unwrap().adjacent.contains(&b));
    assert!(g.vertex(c).unwrap().incident.contains(&bc));
    assert_eq!(g.edge(ab).unwrap().original_length, 5.0);
}

#[test]
fn unknown_ids_do_not_mutate() {
    let mut g = Graph::new();
    let a = g.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let ver = g.geom_version();
    assert!(matches!(g.add_edge(a, 99, 0), Err(Error::UnknownEntity { kind: "vertex", id: 99 })));
    assert!(matches!(g.add_edge(a, a, 0), Err(Error::InvalidStructure { .. })));
    assert!(matches!(g.move_vertex(42, Point::new(1.0, 1.0)), Err(Error::UnknownEntity { .. })));
    assert!(matches!(g.move_vertex(a, Point::new(f64::NAN, 0.0)), Err(Error::OutOfBounds { .. })));
    assert_eq!(g.geom_version(), ver);
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.position(a), Some(Point::new(0.0, 0.0)));
    assert!(g.vertex(a).unwrap().incident.is_empty());
}

#[test]
fn second_boundary_rejected() {
    let mut g = Graph::new();
    let h = g.set_boundary(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).unwrap();
    assert!(matches!(g.set_boundary(vec![]), Err(Error::InvalidStructure { .. })));
    assert_eq!(g.boundary_id(), Some(h));
    assert_eq!(g.kind_of(h), Some(ShapeKind::Boundary));
}

#[test]
fn edge_drag_moves_nearer_endpoint() {
    let mut g = Graph::new();
    let a = g.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = g.add_vertex(Point::new(10.0, 0.0)).unwrap();
    let e = g.add_edge(a, b, 0).unwrap();
    assert_eq!(g.move_edge_endpoint(e, Point::new(9.0, 1.0)).unwrap(), b);
    assert_eq!(g.position(b), Some(Point::new(9.0, 1.0)));
    assert_eq!(g.position(a), Some(Point::new(0.0, 0.0)));
    // length is measured from the moved end to the fixed one
    let len = g.length_if_moved(e, Point::new(1.0, 0.0)).unwrap();
    assert!((len - (65.0f64).sqrt()).abs() < 1e-12);
    let ratio = g.stretch_ratio_if_moved(e, Point::new(1.0, 0.0)).unwrap();
    assert!((ratio - ((65.0f64).sqrt() / 10.0 - 1.0)).abs() < 1e-12);
    // queries never mutate
    assert_eq!(g.position(a), Some(Point::new(0.0, 0.0)));
}

#[test]
fn creation_order_is_stable() {
    let mut g = Graph::new();
    g.set_boundary(vec![Point::new(0.0, 0.0)]).unwrap();
    let a = g.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = g.add_vertex(Point::new(1.0, 0.0)).unwrap();
    g.add_edge(a, b, 0).unwrap();
    let c = g.add_vertex(Point::new(2.0, 0.0)).unwrap();
    assert_eq!(g.vertex_ids().collect::<Vec<_>>(), vec![a, b, c]);
    assert_eq!(g.vertex_at_order(2), Some(c));
    assert_eq!(g.order_of(c), Some(2));
    assert_eq!(g.vertex_at_order(3), None);
}

#[test]
fn translation_keeps_lengths() {
    let mut g = Graph::new();
    let a = g.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = g.add_vertex(Point::new(3.0, 4.0)).unwrap();
    let e = g.add_edge(a, b, 0).unwrap();
    g.translate_all(2.5, -7.0);
    assert_eq!(g.position(a), Some(Point::new(2.5, -7.0)));
    assert!((g.edge_length(e).unwrap() - 5.0).abs() < 1e-12);
    g.translate_edge(e, 1.0, 1.0).unwrap();
    assert_eq!(g.position(b), Some(Point::new(6.5, -2.0)));
}

#[test]
fn pick_prefers_vertices_and_skips_boundary() {
    let mut g = Graph::new();
    g.set_boundary(vec![Point::new(-50.0, -50.0), Point::new(50.0, -50.0)]).unwrap();
    let a = g.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = g.add_vertex(Point::new(20.0, 0.0)).unwrap();
    let e = g.add_edge(a, b, 0).unwrap();
    assert_eq!(g.pick(Point::new(1.0, 1.0), 0.0).map(|p| p.id()), Some(a));
    assert_eq!(g.pick(Point::new(10.0, 1.0), 2.0).map(|p| p.id()), Some(e));
    assert!(g.pick(Point::new(0.0, -50.0), 1.0).is_none());
    assert!(g.pick(Point::new(10.0, 30.0), 2.0).is_none());
}

#[test]
fn clear_destroys_everything() {
    let mut g = Graph::new();
    let a = g.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = g.add_vertex(Point::new(1.0, 0.0)).unwrap();
    g.add_edge(a, b, 0).unwrap();
    g.clear();
    assert_eq!(g.vertex_count(), 0);
    assert_eq!(g.edge_count(), 0);
    assert!(g.boundary().is_none());
    assert!(g.shape(a).is_none());
}

#[test]
fn unpersistable_positions_create_nothing() {
    let mut g = Graph::new();
    let ver = g.geom_version();
    for p in [Point::new(f64::NAN, 1.0), Point::new(0.0, f64::INFINITY), Point::new(1e13, 0.0)] {
        assert!(matches!(g.add_vertex(p), Err(Error::OutOfBounds { what: "position" })));
    }
    assert_eq!(g.vertex_count(), 0);
    assert!(g.shape(0).is_none());
    assert_eq!(g.geom_version(), ver);
    // the next id is still the first slot
    assert_eq!(g.add_vertex(Point::new(1.0, 1.0)).unwrap(), 0);
}
