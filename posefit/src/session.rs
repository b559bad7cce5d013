//! One editing session: the graph, its undo history and the gesture state.
//!
//! Every gesture takes exactly one snapshot, at its start, before any
//! mutation. A multi-step drag therefore undoes as a single unit.

use crate::algorithms::constraint::{self, EdgeStrain};
use crate::error::{Error, Result};
use crate::geometry::transform::Transform;
use crate::history::UndoHistory;
use crate::json;
use crate::model::{Point, ShapeKind};
use crate::problem::{Problem, Solution};
use crate::{Graph, Pick};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { target: u32 },
    Panning { last: Point },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    Applied,
    /// Illegal vertex move, silently discarded.
    Rejected,
    /// No gesture in progress, or the target cannot move.
    Ignored,
}

pub struct Session {
    graph: Graph,
    history: UndoHistory,
    state: DragState,
    epsilon: u32,
    transform: Transform,
    /// Leading vertices that form the problem figure. `None` when the figure
    /// was drawn from scratch, in which case every vertex belongs to it.
    figure: Option<u32>,
}

impl Session {
    pub fn new(epsilon: u32, transform: Transform) -> Self {
        Session::with_graph(Graph::new(), epsilon, transform, None)
    }

    fn with_graph(graph: Graph, epsilon: u32, transform: Transform, figure: Option<u32>) -> Self {
        Session {
            graph,
            history: UndoHistory::new(),
            state: DragState::Idle,
            epsilon,
            transform,
            figure,
        }
    }

    pub fn from_problem(problem: &Problem, transform: Transform) -> Result<Self> {
        let graph = problem.build_graph(&transform)?;
        let figure = graph.vertex_count();
        Ok(Session::with_graph(graph, problem.epsilon, transform, Some(figure)))
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }
    pub fn epsilon(&self) -> u32 {
        self.epsilon
    }
    pub fn transform(&self) -> &Transform {
        &self.transform
    }
    pub fn state(&self) -> DragState {
        self.state
    }
    pub fn history(&self) -> &UndoHistory {
        &self.history
    }
    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }
    /// Number of vertices exported as the solution.
    pub fn figure_len(&self) -> u32 {
        self.figure.unwrap_or_else(|| self.graph.vertex_count())
    }

    // Drawing
    pub fn add_vertex(&mut self, p: Point) -> Result<u32> {
        self.graph.add_vertex(p)
    }
    pub fn add_edge(&mut self, a: u32, b: u32) -> Result<u32> {
        self.graph.add_edge(a, b, self.epsilon)
    }

    pub fn pick(&self, p: Point, tol: f64) -> Option<Pick> {
        self.graph.pick(p, tol)
    }

    // Gestures
    pub fn begin_drag(&mut self, target: u32) -> Result<()> {
        if !self.is_idle() {
            return Err(Error::GestureActive);
        }
        let Some(kind) = self.graph.kind_of(target) else {
            return Err(Error::unknown("entity", target));
        };
        self.history.snapshot(&self.graph);
        self.state = DragState::Dragging { target };
        tracing::debug!(entity = target, kind = kind.as_str(), depth = self.history.depth(), "drag started");
        Ok(())
    }

    /// Picks at `p` and starts dragging whatever was hit. Nothing hit means
    /// no gesture and no snapshot.
    pub fn begin_drag_at(&mut self, p: Point, tol: f64) -> Result<Option<u32>> {
        if !self.is_idle() {
            return Err(Error::GestureActive);
        }
        match self.pick(p, tol) {
            Some(hit) => {
                self.begin_drag(hit.id())?;
                Ok(Some(hit.id()))
            }
            None => Ok(None),
        }
    }

    pub fn drag_to(&mut self, p: Point) -> Result<DragOutcome> {
        let DragState::Dragging { target } = self.state else {
            return Ok(DragOutcome::Ignored);
        };
        match self.graph.kind_of(target) {
            Some(ShapeKind::Vertex) => {
                if self.graph.move_vertex_checked(target, p)? {
                    Ok(DragOutcome::Applied)
                } else {
                    Ok(DragOutcome::Rejected)
                }
            }
            Some(ShapeKind::Edge) => {
                self.graph.move_edge_endpoint(target, p)?;
                Ok(DragOutcome::Applied)
            }
            Some(ShapeKind::Boundary) => Ok(DragOutcome::Ignored),
            None => Err(Error::unknown("entity", target)),
        }
    }

    /// Whole-figure pan. Rigid translation, so no legality check.
    pub fn begin_pan(&mut self, at: Point) -> Result<()> {
        if !self.is_idle() {
            return Err(Error::GestureActive);
        }
        if !at.is_finite() {
            return Err(Error::OutOfBounds { what: "position" });
        }
        self.history.snapshot(&self.graph);
        self.state = DragState::Panning { last: at };
        tracing::debug!(depth = self.history.depth(), "pan started");
        Ok(())
    }

    pub fn pan_to(&mut self, p: Point) -> DragOutcome {
        let DragState::Panning { last } = self.state else {
            return DragOutcome::Ignored;
        };
        if !p.is_finite() {
            return DragOutcome::Ignored;
        }
        self.graph.translate_all(p.x - last.x, p.y - last.y);
        self.state = DragState::Panning { last: p };
        DragOutcome::Applied
    }

    pub fn end_gesture(&mut self) {
        if !self.is_idle() {
            tracing::debug!(state = ?self.state, "gesture ended");
        }
        self.state = DragState::Idle;
    }

    /// Ends any active gesture, then restores the newest snapshot.
    pub fn undo(&mut self) -> bool {
        self.end_gesture();
        self.history.rollback(&mut self.graph)
    }

    /// Destroys every entity and drops the history.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.history.clear();
        self.graph.clear();
        self.figure = None;
    }

    pub fn strain_report(&self) -> Vec<EdgeStrain> {
        constraint::strain_report(&self.graph)
    }

    pub fn export_solution(&self) -> Solution {
        Solution::from_graph(&self.graph, &self.transform, self.figure_len())
    }

    // Persisted state
    pub fn to_state_json(&self) -> Result<Value> {
        json::to_json_impl(&self.graph, self.epsilon, &self.transform, self.figure)
    }

    /// Rebuilds a session from a state document. A document without a
    /// transform uses `fallback`.
    pub fn from_state_json(v: Value, fallback: Transform) -> Result<Session> {
        let loaded = json::from_json_impl_strict(v)?;
        let transform = loaded.transform.unwrap_or(fallback);
        Ok(Session::with_graph(loaded.graph, loaded.epsilon, transform, loaded.figure))
    }
}
