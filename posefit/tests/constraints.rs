use posefit::algorithms::constraint::{check_vertex_move, is_legal_length, strain_report, StrainKind};
use posefit::geometry::tolerance::stretch_ratio;
use posefit::model::Point;
use posefit::Graph;

fn bar(len: f64, tol: u32) -> (Graph, u32, u32, u32) {
    let mut g = Graph::new();
    let a = g.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = g.add_vertex(Point::new(len, 0.0)).unwrap();
    let e = g.add_edge(a, b, tol).unwrap();
    (g, a, b, e)
}

#[test]
fn large_tolerance_allows_half_stretch() {
    let (mut g, _, b, _) = bar(100.0, 1_000_000);
    assert!(g.move_vertex_checked(b, Point::new(150.0, 0.0)).unwrap());
    assert_eq!(g.position(b), Some(Point::new(150.0, 0.0)));
}

#[test]
fn illegal_move_leaves_vertex_in_place() {
    let (mut g, _, b, e) = bar(100.0, 100_000);
    let ver = g.geom_version();
    assert!(!g.move_vertex_checked(b, Point::new(115.0, 0.0)).unwrap());
    assert_eq!(g.position(b), Some(Point::new(100.0, 0.0)));
    assert_eq!(g.geom_version(), ver);
    assert_eq!(g.edge(e).unwrap().original_length, 100.0);
    // compression is symmetric
    assert!(!g.move_vertex_checked(b, Point::new(85.0, 0.0)).unwrap());
    assert!(g.move_vertex_checked(b, Point::new(95.0, 0.0)).unwrap());
}

#[test]
fn every_incident_edge_must_pass() {
    let mut g = Graph::new();
    let hub = g.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let east = g.add_vertex(Point::new(10.0, 0.0)).unwrap();
    let north = g.add_vertex(Point::new(0.0, 10.0)).unwrap();
    g.add_edge(hub, east, 100_000).unwrap();
    g.add_edge(hub, north, 100_000).unwrap();
    // fine for hub-east (length 10), far too long for hub-north
    let to = Point::new(0.0, -2.0);
    assert!(!check_vertex_move(&g, hub, to).unwrap().is_legal());
    assert!(!g.move_vertex_checked(hub, to).unwrap());
    assert_eq!(g.position(hub), Some(Point::new(0.0, 0.0)));
}

#[test]
fn zero_tolerance_only_allows_rigid_moves() {
    let (mut g, _, b, _) = bar(10.0, 0);
    assert!(g.move_vertex_checked(b, Point::new(6.0, 8.0)).unwrap());
    assert!(!g.move_vertex_checked(b, Point::new(6.0, 9.0)).unwrap());
}

#[test]
fn degenerate_original_length() {
    assert_eq!(stretch_ratio(0.0, 0.0), 0.0);
    assert!(stretch_ratio(0.0, 1.0).is_infinite());
    assert!(is_legal_length(0.0, 0.0, 0));
    assert!(!is_legal_length(0.0, 0.5, 1_000_000));
}

#[test]
fn report_classifies_strain() {
    let (mut g, _, b, e) = bar(100.0, 50_000);
    g.move_vertex(b, Point::new(120.0, 0.0)).unwrap();
    let report = strain_report(&g);
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].edge, e);
    assert!((report[0].ratio - 0.2).abs() < 1e-12);
    assert_eq!(report[0].kind(), StrainKind::Stretched);
    g.move_vertex(b, Point::new(50.0, 0.0)).unwrap();
    assert_eq!(strain_report(&g)[0].kind(), StrainKind::Compressed);
    g.move_vertex(b, Point::new(101.0, 0.0)).unwrap();
    assert_eq!(strain_report(&g)[0].kind(), StrainKind::Within);
}
