//! Problem input and solution output documents.

use crate::error::{Error, Result};
use crate::geometry::limits;
use crate::geometry::transform::Transform;
use crate::model::Point;
use crate::Graph;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub vertices: Vec<[i64; 2]>,
    pub edges: Vec<[usize; 2]>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub epsilon: u32,
    pub hole: Vec<[i64; 2]>,
    pub figure: Figure,
}

impl Problem {
    pub fn from_json_str(s: &str) -> Result<Problem> {
        let p: Problem = serde_json::from_str(s).map_err(|e| Error::parse("problem", e))?;
        p.validate()?;
        Ok(p)
    }

    pub fn from_json_value(v: Value) -> Result<Problem> {
        let p: Problem = serde_json::from_value(v).map_err(|e| Error::parse("problem", e))?;
        p.validate()?;
        Ok(p)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hole.len() > limits::MAX_HOLE_POINTS {
            return Err(Error::CapsExceeded {
                what: "hole",
                limit: limits::MAX_HOLE_POINTS,
            });
        }
        if self.figure.vertices.len() > limits::MAX_VERTICES {
            return Err(Error::CapsExceeded {
                what: "vertices",
                limit: limits::MAX_VERTICES,
            });
        }
        if self.figure.edges.len() > limits::MAX_EDGES {
            return Err(Error::CapsExceeded {
                what: "edges",
                limit: limits::MAX_EDGES,
            });
        }
        let in_bounds = |p: &[i64; 2]| limits::in_problem_bounds(p[0]) && limits::in_problem_bounds(p[1]);
        if !self.hole.iter().all(in_bounds) {
            return Err(Error::OutOfBounds { what: "hole point" });
        }
        if !self.figure.vertices.iter().all(in_bounds) {
            return Err(Error::OutOfBounds { what: "vertex" });
        }
        let n = self.figure.vertices.len();
        for (k, &[i, j]) in self.figure.edges.iter().enumerate() {
            if i >= n || j >= n {
                return Err(Error::invalid(
                    "problem",
                    format!("edge {} references vertex outside 0..{}", k, n),
                ));
            }
            if i == j {
                return Err(Error::invalid("problem", format!("edge {} endpoints equal", k)));
            }
        }
        Ok(())
    }

    /// (min_x, min_y, max_x, max_y) over hole and figure.
    pub fn bounds(&self) -> Option<(i64, i64, i64, i64)> {
        self.hole
            .iter()
            .chain(self.figure.vertices.iter())
            .fold(None, |acc, p| match acc {
                None => Some((p[0], p[1], p[0], p[1])),
                Some((x0, y0, x1, y1)) => Some((x0.min(p[0]), y0.min(p[1]), x1.max(p[0]), y1.max(p[1]))),
            })
    }

    /// Builds a fresh graph in edit space: boundary, then vertices in figure
    /// order, then edges carrying the problem epsilon.
    pub fn build_graph(&self, transform: &Transform) -> Result<Graph> {
        transform.validate()?;
        let mut g = Graph::new();
        g.set_boundary(self.hole.iter().map(|p| transform.to_edit(*p)).collect())?;
        let ids = self
            .figure
            .vertices
            .iter()
            .map(|p| g.add_vertex(transform.to_edit(*p)))
            .collect::<Result<Vec<u32>>>()?;
        for &[i, j] in &self.figure.edges {
            let a = *ids.get(i).ok_or(Error::invalid("problem", "edge index"))?;
            let b = *ids.get(j).ok_or(Error::invalid("problem", "edge index"))?;
            g.add_edge(a, b, self.epsilon)?;
        }
        tracing::debug!(
            vertices = ids.len(),
            edges = self.figure.edges.len(),
            epsilon = self.epsilon,
            "problem loaded"
        );
        Ok(g)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub vertices: Vec<[i64; 2]>,
}

impl Solution {
    /// The first `figure_len` vertex positions in creation order, mapped back
    /// to solution space. Vertices drawn after the figure are not part of it.
    pub fn from_graph(g: &Graph, transform: &Transform, figure_len: u32) -> Solution {
        let vertices = g
            .vertex_ids()
            .take(figure_len as usize)
            .filter_map(|id| g.position(id))
            .map(|p: Point| transform.to_solution(p))
            .collect();
        Solution { vertices }
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::parse("solution", e))
    }

    pub fn from_json_str(s: &str) -> Result<Solution> {
        serde_json::from_str(s).map_err(|e| Error::parse("solution", e))
    }
}
