//! Edge stretch checks. Nothing here mutates the graph: callers ask whether a
//! hypothetical move is legal and apply or discard it themselves.

use crate::geometry::math::distance;
use crate::geometry::tolerance::{ratio_bound, stretch_ratio, within_tolerance};
use crate::model::Point;
use crate::{Error, Graph, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrainKind {
    Within,
    Stretched,
    Compressed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStrain {
    pub edge: u32,
    pub original_length: f64,
    pub length: f64,
    pub ratio: f64,
    pub bound: f64,
}

impl EdgeStrain {
    pub fn is_legal(&self) -> bool {
        self.ratio <= self.bound
    }

    pub fn kind(&self) -> StrainKind {
        if self.is_legal() {
            StrainKind::Within
        } else if self.length > self.original_length {
            StrainKind::Stretched
        } else {
            StrainKind::Compressed
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveVerdict {
    Legal,
    /// First incident edge found out of tolerance.
    Illegal { edge: u32, ratio: f64 },
}

impl MoveVerdict {
    pub fn is_legal(&self) -> bool {
        matches!(self, MoveVerdict::Legal)
    }
}

#[inline]
pub fn is_legal_length(original: f64, candidate: f64, tolerance: u32) -> bool {
    within_tolerance(original, candidate, tolerance)
}

/// Checks every edge incident to `vertex` against the vertex sitting at `to`.
/// Stops at the first failing edge.
pub fn check_vertex_move(g: &Graph, vertex: u32, to: Point) -> Result<MoveVerdict> {
    let v = g.vertex(vertex).ok_or(Error::unknown("vertex", vertex))?;
    for &eid in &v.incident {
        let e = g.edge_ref(eid)?;
        let Some(other) = e.other(vertex) else {
            continue;
        };
        let anchor = g.position(other).ok_or(Error::unknown("vertex", other))?;
        let candidate = distance(to, anchor);
        if !is_legal_length(e.original_length, candidate, e.tolerance) {
            return Ok(MoveVerdict::Illegal {
                edge: eid,
                ratio: stretch_ratio(e.original_length, candidate),
            });
        }
    }
    Ok(MoveVerdict::Legal)
}

pub fn edge_strain(g: &Graph, edge: u32) -> Result<EdgeStrain> {
    let e = g.edge_ref(edge)?;
    let length = g.edge_length(edge)?;
    Ok(EdgeStrain {
        edge,
        original_length: e.original_length,
        length,
        ratio: stretch_ratio(e.original_length, length),
        bound: ratio_bound(e.tolerance),
    })
}

/// Strain of every edge whose endpoints are live, in id order.
pub fn strain_report(g: &Graph) -> Vec<EdgeStrain> {
    g.edge_ids().filter_map(|id| edge_strain(g, id).ok()).collect()
}

impl Graph {
    /// Applies the move only if every incident edge stays within tolerance.
    /// Returns whether the vertex moved.
    pub fn move_vertex_checked(&mut self, vertex: u32, to: Point) -> Result<bool> {
        if !to.is_finite() {
            return Err(Error::OutOfBounds { what: "position" });
        }
        match check_vertex_move(self, vertex, to)? {
            MoveVerdict::Legal => {
                self.move_vertex(vertex, to)?;
                Ok(true)
            }
            MoveVerdict::Illegal { edge, ratio } => {
                tracing::trace!(vertex, edge, ratio, "move rejected");
                Ok(false)
            }
        }
    }
}
