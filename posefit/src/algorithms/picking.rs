use crate::geometry::math::{distance_sq, seg_distance_sq};
use crate::model::Shape;
use crate::model::Point;
use crate::{Graph, Pick};

pub fn pick_impl(g: &Graph, p: Point, tol: f64) -> Option<Pick> {
    let tol = tol.max(0.0);
    // Vertices first: hit inside radius + tol
    let mut best_vertex: Option<(u32, f64)> = None;
    for id in g.vertex_ids() {
        let Some(v) = g.vertex(id) else { continue };
        let reach = v.style.radius.max(0.0) + tol;
        let d2 = distance_sq(v.position, p);
        if d2 <= reach * reach && best_vertex.map_or(true, |(_, bd)| d2 < bd) {
            best_vertex = Some((id, d2));
        }
    }
    if let Some((id, d2)) = best_vertex {
        return Some(Pick::Vertex { id, dist: d2.sqrt() });
    }
    // Edges
    let tol2 = tol * tol;
    let mut best_edge: Option<(u32, f64, f64)> = None;
    for (i, s) in g.shapes.iter().enumerate() {
        let Some(Shape::Edge(e)) = s else { continue };
        let (Some(a), Some(b)) = (g.position(e.a), g.position(e.b)) else {
            continue;
        };
        let (d2, t) = seg_distance_sq(p, a, b);
        if d2 <= tol2 && best_edge.map_or(true, |(_, bd, _)| d2 < bd) {
            best_edge = Some((i as u32, d2, t));
        }
    }
    best_edge.map(|(id, d2, t)| Pick::Edge {
        id,
        t,
        dist: d2.sqrt(),
    })
}
