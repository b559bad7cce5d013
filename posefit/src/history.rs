//! Snapshot-based undo.
//!
//! A snapshot is a deep copy of every live entity's mutable fields, stored
//! under an explicit versioned schema so it can be written out and migrated.
//! The history trusts its caller to capture before the first mutation of a
//! gesture; the session state machine enforces that ordering.

use crate::error::{Error, Result};
use crate::model::{Point, Shape};
use crate::Graph;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityState {
    Vertex { id: u32, position: Point },
    Edge { id: u32, a: u32, b: u32, tolerance: u32 },
    Boundary { id: u32, points: Vec<Point> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub entities: Vec<EntityState>,
}

impl Snapshot {
    pub fn capture(g: &Graph) -> Snapshot {
        let mut entities = Vec::with_capacity(g.shapes.len());
        for (i, s) in g.shapes.iter().enumerate() {
            let id = i as u32;
            match s {
                Some(Shape::Vertex(v)) => entities.push(EntityState::Vertex {
                    id,
                    position: v.position,
                }),
                Some(Shape::Edge(e)) => entities.push(EntityState::Edge {
                    id,
                    a: e.a,
                    b: e.b,
                    tolerance: e.tolerance,
                }),
                Some(Shape::Boundary(b)) => entities.push(EntityState::Boundary {
                    id,
                    points: b.points.clone(),
                }),
                None => {}
            }
        }
        Snapshot {
            version: SNAPSHOT_VERSION,
            entities,
        }
    }

    /// Writes captured fields back. Ids, adjacency and original lengths are
    /// left as they are; entries that no longer match a live entity are skipped.
    pub(crate) fn restore(&self, g: &mut Graph) {
        for state in &self.entities {
            match state {
                EntityState::Vertex { id, position } => match g.shapes.get_mut(*id as usize) {
                    Some(Some(Shape::Vertex(v))) => v.position = *position,
                    _ => tracing::warn!(id, "snapshot vertex no longer present"),
                },
                EntityState::Edge {
                    id,
                    a,
                    b,
                    tolerance,
                } => match g.shapes.get_mut(*id as usize) {
                    Some(Some(Shape::Edge(e))) if e.a == *a && e.b == *b => e.tolerance = *tolerance,
                    _ => tracing::warn!(id, "snapshot edge no longer present"),
                },
                EntityState::Boundary { id, points } => match g.shapes.get_mut(*id as usize) {
                    Some(Some(Shape::Boundary(bd))) => bd.points = points.clone(),
                    _ => tracing::warn!(id, "snapshot boundary no longer present"),
                },
            }
        }
        g.bump();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn to_json_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::parse("snapshot", e))
    }

    pub fn from_json_value(v: Value) -> Result<Snapshot> {
        let snap: Snapshot = serde_json::from_value(v).map_err(|e| Error::parse("snapshot", e))?;
        if snap.version > SNAPSHOT_VERSION {
            return Err(Error::UnsupportedVersion {
                what: "snapshot",
                found: snap.version,
                max_supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snap)
    }
}

/// LIFO stack of snapshots, unbounded.
#[derive(Debug, Default)]
pub struct UndoHistory {
    stack: Vec<Snapshot>,
}

impl UndoHistory {
    pub fn new() -> Self {
        UndoHistory::default()
    }

    pub fn snapshot(&mut self, g: &Graph) {
        self.stack.push(Snapshot::capture(g));
    }

    /// Pops and restores the newest snapshot. An empty stack is a no-op.
    pub fn rollback(&mut self, g: &mut Graph) -> bool {
        match self.stack.pop() {
            Some(snap) => {
                snap.restore(g);
                true
            }
            None => false,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.stack.last()
    }
}
