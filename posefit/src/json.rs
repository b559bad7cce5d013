use crate::error::{Error, Result};
use crate::geometry::limits;
use crate::geometry::math::distance;
use crate::geometry::transform::Transform;
use crate::model::{Point, VertexStyle};
use crate::Graph;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const STATE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct VertexDoc {
    x: f64,
    y: f64,
    #[serde(flatten)]
    style: VertexStyle,
}

#[derive(Serialize, Deserialize)]
struct StateDoc {
    version: u32,
    epsilon: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transform: Option<Transform>,
    boundary: Vec<Point>,
    vertices: Vec<VertexDoc>,
    edges: Vec<[u32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lengths: Option<Vec<f64>>,
    /// Leading vertices that belong to the problem figure; absent means all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    figure: Option<u32>,
}

pub(crate) struct LoadedState {
    pub graph: Graph,
    pub epsilon: u32,
    pub transform: Option<Transform>,
    pub figure: Option<u32>,
}

pub(crate) fn to_json_impl(g: &Graph, epsilon: u32, transform: &Transform, figure: Option<u32>) -> Result<Value> {
    let boundary = g.boundary().map(|b| b.points.clone()).unwrap_or_default();
    let vertices: Vec<VertexDoc> = g
        .vertex_ids()
        .filter_map(|id| g.vertex(id))
        .map(|v| VertexDoc {
            x: v.position.x,
            y: v.position.y,
            style: v.style,
        })
        .collect();
    // Canonical edge list: sorted, de-duplicated creation-order pairs.
    let mut pairs: BTreeMap<[u32; 2], f64> = BTreeMap::new();
    for id in g.edge_ids() {
        let Some(e) = g.edge(id) else { continue };
        let (Some(oa), Some(ob)) = (g.order_of(e.a), g.order_of(e.b)) else {
            continue;
        };
        pairs.entry([oa.min(ob), oa.max(ob)]).or_insert(e.original_length);
    }
    let (edges, lengths): (Vec<[u32; 2]>, Vec<f64>) = pairs.into_iter().unzip();
    let doc = StateDoc {
        version: STATE_VERSION,
        epsilon,
        transform: Some(*transform),
        boundary,
        vertices,
        edges,
        lengths: Some(lengths),
        figure,
    };
    serde_json::to_value(doc).map_err(|e| Error::parse("state", e))
}

pub(crate) fn from_json_impl_strict(v: Value) -> Result<LoadedState> {
    let doc: StateDoc = serde_json::from_value(v).map_err(|e| Error::parse("state", e))?;
    if doc.version > STATE_VERSION {
        return Err(Error::UnsupportedVersion {
            what: "state",
            found: doc.version,
            max_supported: STATE_VERSION,
        });
    }
    if doc.vertices.len() > limits::MAX_VERTICES {
        return Err(Error::CapsExceeded {
            what: "vertices",
            limit: limits::MAX_VERTICES,
        });
    }
    if doc.edges.len() > limits::MAX_EDGES {
        return Err(Error::CapsExceeded {
            what: "edges",
            limit: limits::MAX_EDGES,
        });
    }
    if doc.boundary.len() > limits::MAX_HOLE_POINTS {
        return Err(Error::CapsExceeded {
            what: "boundary",
            limit: limits::MAX_HOLE_POINTS,
        });
    }
    for p in &doc.boundary {
        if !limits::in_edit_bounds(p.x) || !limits::in_edit_bounds(p.y) {
            return Err(Error::OutOfBounds { what: "boundary point" });
        }
    }
    for v in &doc.vertices {
        if !limits::in_edit_bounds(v.x) || !limits::in_edit_bounds(v.y) {
            return Err(Error::OutOfBounds { what: "vertex coordinate" });
        }
    }
    let n = doc.vertices.len() as u32;
    for [i, j] in &doc.edges {
        if *i >= n || *j >= n {
            return Err(Error::invalid("state", "edge references unknown vertex order"));
        }
        if i == j {
            return Err(Error::invalid("state", "edge endpoints equal"));
        }
    }
    if let Some(lengths) = &doc.lengths {
        if lengths.len() != doc.edges.len() {
            return Err(Error::invalid("state", "lengths do not match edges"));
        }
        if lengths.iter().any(|l| !l.is_finite() || *l < 0.0) {
            return Err(Error::OutOfBounds { what: "edge length" });
        }
    }
    if doc.figure.is_some_and(|f| f > n) {
        return Err(Error::invalid("state", "figure count exceeds vertices"));
    }
    if let Some(t) = &doc.transform {
        t.validate()?;
    }

    let mut g = Graph::new();
    if !doc.boundary.is_empty() {
        g.set_boundary(doc.boundary)?;
    }
    let ids = doc
        .vertices
        .iter()
        .map(|v| g.add_vertex_styled(Point::new(v.x, v.y), v.style))
        .collect::<Result<Vec<u32>>>()?;
    for (k, [i, j]) in doc.edges.iter().enumerate() {
        let a = ids[*i as usize];
        let b = ids[*j as usize];
        let frozen = match &doc.lengths {
            Some(lengths) => lengths[k],
            None => match (g.position(a), g.position(b)) {
                (Some(pa), Some(pb)) => distance(pa, pb),
                _ => return Err(Error::invalid("state", "edge endpoint missing")),
            },
        };
        g.insert_edge(a, b, frozen, doc.epsilon)?;
    }
    Ok(LoadedState {
        graph: g,
        epsilon: doc.epsilon,
        transform: doc.transform,
        figure: doc.figure,
    })
}
