pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod problem;
pub mod session;
pub mod store;
pub mod submit;
pub mod geometry {
    pub mod limits;
    pub mod math;
    pub mod tolerance;
    pub mod transform;
}
pub mod algorithms {
    pub mod constraint;
    pub mod picking;
}
mod json;

pub use error::{Error, Result};
pub use history::{Snapshot, UndoHistory};
pub use json::STATE_VERSION;
pub use session::{DragOutcome, DragState, Session};

use geometry::math::distance;
use model::{Boundary, Edge, EdgeEnd, Point, Shape, ShapeKind, Vertex, VertexStyle};
use serde::{Deserialize, Serialize};

/// Owns every entity of one figure: vertices, edges and the boundary polygon.
pub struct Graph {
    pub(crate) shapes: Vec<Option<Shape>>, // id is index
    pub(crate) vertex_order: Vec<u32>,     // creation order -> vertex id
    pub(crate) boundary: Option<u32>,
    pub(crate) geom_ver: u64,
}

pub struct EdgeArrays {
    pub ids: Vec<u32>,
    pub endpoints: Vec<u32>,
    pub lengths: Vec<f64>,
    pub ratios: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Pick {
    #[serde(rename = "vertex")]
    Vertex { id: u32, dist: f64 },
    #[serde(rename = "edge")]
    Edge { id: u32, t: f64, dist: f64 },
}

impl Pick {
    pub fn id(&self) -> u32 {
        match *self {
            Pick::Vertex { id, .. } | Pick::Edge { id, .. } => id,
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            shapes: Vec::new(),
            vertex_order: Vec::new(),
            boundary: None,
            geom_ver: 1,
        }
    }

    /// Monotonic counter bumped on every mutation, rollback included.
    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    pub(crate) fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }

    fn next_id(&self) -> u32 {
        self.shapes.len() as u32
    }

    // Lookups
    pub fn shape(&self, id: u32) -> Option<&Shape> {
        self.shapes.get(id as usize).and_then(|s| s.as_ref())
    }
    pub fn kind_of(&self, id: u32) -> Option<ShapeKind> {
        self.shape(id).map(Shape::kind)
    }
    pub fn vertex(&self, id: u32) -> Option<&Vertex> {
        match self.shape(id) {
            Some(Shape::Vertex(v)) => Some(v),
            _ => None,
        }
    }
    pub fn edge(&self, id: u32) -> Option<&Edge> {
        match self.shape(id) {
            Some(Shape::Edge(e)) => Some(e),
            _ => None,
        }
    }
    pub fn boundary(&self) -> Option<&Boundary> {
        match self.boundary.and_then(|id| self.shape(id)) {
            Some(Shape::Boundary(b)) => Some(b),
            _ => None,
        }
    }
    pub fn boundary_id(&self) -> Option<u32> {
        self.boundary
    }
    pub fn position(&self, id: u32) -> Option<Point> {
        self.vertex(id).map(|v| v.position)
    }

    pub(crate) fn vertex_mut(&mut self, id: u32) -> Result<&mut Vertex> {
        match self.shapes.get_mut(id as usize) {
            Some(Some(Shape::Vertex(v))) => Ok(v),
            _ => Err(Error::unknown("vertex", id)),
        }
    }
    pub(crate) fn edge_ref(&self, id: u32) -> Result<&Edge> {
        self.edge(id).ok_or(Error::unknown("edge", id))
    }
    fn endpoints_of(&self, e: &Edge) -> Result<(Point, Point)> {
        let a = self.position(e.a).ok_or(Error::unknown("vertex", e.a))?;
        let b = self.position(e.b).ok_or(Error::unknown("vertex", e.b))?;
        Ok((a, b))
    }

    /// Vertex ids in creation order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.vertex_order.iter().copied()
    }
    pub fn edge_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.shapes.iter().enumerate().filter_map(|(i, s)| match s {
            Some(Shape::Edge(_)) => Some(i as u32),
            _ => None,
        })
    }
    pub fn vertex_count(&self) -> u32 {
        self.vertex_order.len() as u32
    }
    pub fn edge_count(&self) -> u32 {
        self.edge_ids().count() as u32
    }
    pub fn order_of(&self, vertex: u32) -> Option<u32> {
        self.vertex(vertex).map(|v| v.order)
    }
    pub fn vertex_at_order(&self, order: u32) -> Option<u32> {
        self.vertex_order.get(order as usize).copied()
    }

    // Vertices
    pub fn add_vertex(&mut self, position: Point) -> Result<u32> {
        self.add_vertex_styled(position, VertexStyle::default())
    }
    /// Rejects positions that could not be persisted, before anything is created.
    pub fn add_vertex_styled(&mut self, position: Point, style: VertexStyle) -> Result<u32> {
        if !geometry::limits::in_edit_bounds(position.x) || !geometry::limits::in_edit_bounds(position.y) {
            return Err(Error::OutOfBounds { what: "position" });
        }
        let id = self.next_id();
        let order = self.vertex_order.len() as u32;
        self.shapes.push(Some(Shape::Vertex(Vertex {
            position,
            order,
            adjacent: Default::default(),
            incident: Default::default(),
            style,
        })));
        self.vertex_order.push(id);
        self.bump();
        Ok(id)
    }

    /// Overwrites the position; legality is the caller's concern.
    pub fn move_vertex(&mut self, id: u32, to: Point) -> Result<()> {
        if !to.is_finite() {
            return Err(Error::OutOfBounds { what: "position" });
        }
        self.vertex_mut(id)?.position = to;
        self.bump();
        Ok(())
    }

    /// Shifts every vertex by the same delta. Edge lengths are unchanged.
    pub fn translate_all(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        for slot in self.shapes.iter_mut() {
            if let Some(Shape::Vertex(v)) = slot {
                v.position = v.position.offset(dx, dy);
            }
        }
        self.bump();
    }

    // Boundary
    pub fn set_boundary(&mut self, points: Vec<Point>) -> Result<u32> {
        if self.boundary.is_some() {
            return Err(Error::invalid("boundary", "already set"));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(Error::OutOfBounds { what: "boundary point" });
        }
        let id = self.next_id();
        self.shapes.push(Some(Shape::Boundary(Boundary { points })));
        self.boundary = Some(id);
        self.bump();
        Ok(id)
    }

    // Edges
    pub fn add_edge(&mut self, a: u32, b: u32, tolerance: u32) -> Result<u32> {
        let pa = self.position(a).ok_or(Error::unknown("vertex", a))?;
        let pb = self.position(b).ok_or(Error::unknown("vertex", b))?;
        if a == b {
            return Err(Error::invalid("edge", "endpoints equal"));
        }
        self.insert_edge(a, b, distance(pa, pb), tolerance)
    }

    /// Inserts an edge with an already frozen length (state reload).
    pub(crate) fn insert_edge(&mut self, a: u32, b: u32, original_length: f64, tolerance: u32) -> Result<u32> {
        let id = self.next_id();
        self.vertex_mut(a)?;
        self.vertex_mut(b)?;
        self.shapes.push(Some(Shape::Edge(Edge {
            a,
            b,
            original_length,
            tolerance,
        })));
        let va = self.vertex_mut(a)?;
        va.adjacent.insert(b);
        va.incident.insert(id);
        let vb = self.vertex_mut(b)?;
        vb.adjacent.insert(a);
        vb.incident.insert(id);
        self.bump();
        Ok(id)
    }

    pub fn edge_length(&self, id: u32) -> Result<f64> {
        let e = self.edge_ref(id)?;
        let (a, b) = self.endpoints_of(e)?;
        Ok(distance(a, b))
    }

    /// Endpoint geometrically closer to `p`; the primary endpoint wins ties.
    pub fn nearer_end(&self, id: u32, p: Point) -> Result<EdgeEnd> {
        let e = self.edge_ref(id)?;
        let (a, b) = self.endpoints_of(e)?;
        if distance(a, p) <= distance(b, p) {
            Ok(EdgeEnd::Primary)
        } else {
            Ok(EdgeEnd::Secondary)
        }
    }

    /// Length the edge would have if its endpoint nearer to `p` were moved there.
    pub fn length_if_moved(&self, id: u32, p: Point) -> Result<f64> {
        let e = self.edge_ref(id)?;
        let (a, b) = self.endpoints_of(e)?;
        Ok(match self.nearer_end(id, p)? {
            EdgeEnd::Primary => distance(p, b),
            EdgeEnd::Secondary => distance(a, p),
        })
    }

    pub fn stretch_ratio_if_moved(&self, id: u32, p: Point) -> Result<f64> {
        let original = self.edge_ref(id)?.original_length;
        let len = self.length_if_moved(id, p)?;
        Ok(geometry::tolerance::stretch_ratio(original, len))
    }

    /// Moves the endpoint nearer to `p` (re-evaluated on every call) and
    /// returns the moved vertex id.
    pub fn move_edge_endpoint(&mut self, id: u32, p: Point) -> Result<u32> {
        let end = self.nearer_end(id, p)?;
        let vertex = self.edge_ref(id)?.endpoint(end);
        self.move_vertex(vertex, p)?;
        Ok(vertex)
    }

    /// Rigidly shifts both endpoints of an edge.
    pub fn translate_edge(&mut self, id: u32, dx: f64, dy: f64) -> Result<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(Error::OutOfBounds { what: "delta" });
        }
        let (a, b) = {
            let e = self.edge_ref(id)?;
            (e.a, e.b)
        };
        for v in [a, b] {
            let vertex = self.vertex_mut(v)?;
            vertex.position = vertex.position.offset(dx, dy);
        }
        self.bump();
        Ok(())
    }

    // Flat exports
    pub fn get_vertex_arrays(&self) -> (Vec<u32>, Vec<f64>) {
        let mut ids = Vec::with_capacity(self.vertex_order.len());
        let mut pos = Vec::with_capacity(self.vertex_order.len() * 2);
        for id in self.vertex_ids() {
            if let Some(p) = self.position(id) {
                ids.push(id);
                pos.push(p.x);
                pos.push(p.y);
            }
        }
        (ids, pos)
    }
    pub fn get_edge_arrays(&self) -> EdgeArrays {
        let mut out = EdgeArrays {
            ids: Vec::new(),
            endpoints: Vec::new(),
            lengths: Vec::new(),
            ratios: Vec::new(),
        };
        for s in algorithms::constraint::strain_report(self) {
            let Some(e) = self.edge(s.edge) else { continue };
            out.ids.push(s.edge);
            out.endpoints.push(e.a);
            out.endpoints.push(e.b);
            out.lengths.push(s.length);
            out.ratios.push(s.ratio);
        }
        out
    }

    pub fn pick(&self, p: Point, tol: f64) -> Option<Pick> {
        algorithms::picking::pick_impl(self, p, tol)
    }

    /// Full reset: every entity is destroyed.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.vertex_order.clear();
        self.boundary = None;
        self.bump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_tie_prefers_primary() {
        let mut g = Graph::new();
        let a = g.add_vertex(Point::new(0.0, 0.0)).unwrap();
        let b = g.add_vertex(Point::new(10.0, 0.0)).unwrap();
        let e = g.add_edge(a, b, 0).unwrap();
        assert_eq!(g.nearer_end(e, Point::new(5.0, 3.0)).unwrap(), EdgeEnd::Primary);
        assert_eq!(g.move_edge_endpoint(e, Point::new(5.0, 3.0)).unwrap(), a);
    }

    #[test]
    fn ids_share_one_space() {
        let mut g = Graph::new();
        let h = g.set_boundary(vec![Point::new(0.0, 0.0)]).unwrap();
        let a = g.add_vertex(Point::new(0.0, 0.0)).unwrap();
        let b = g.add_vertex(Point::new(1.0, 0.0)).unwrap();
        let e = g.add_edge(a, b, 0).unwrap();
        assert_eq!(g.kind_of(h), Some(ShapeKind::Boundary));
        assert_eq!(g.kind_of(a), Some(ShapeKind::Vertex));
        assert_eq!(g.kind_of(e), Some(ShapeKind::Edge));
        assert_eq!(g.order_of(b), Some(1));
        assert!(matches!(g.move_vertex(e, Point::new(0.0, 0.0)), Err(Error::UnknownEntity { .. })));
    }
}
