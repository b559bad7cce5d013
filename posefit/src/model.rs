use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
}

/// Position in edit space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Display attributes of a vertex. Stored and persisted, never consulted by
/// the constraint engine (the radius is only used for hit testing).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexStyle {
    pub radius: f64,
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub width: f64,
}

impl Default for VertexStyle {
    fn default() -> Self {
        VertexStyle {
            radius: 3.0,
            stroke: Some(Color::BLACK),
            fill: None,
            width: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub position: Point,
    /// Creation-order index, assigned once.
    pub order: u32,
    pub adjacent: BTreeSet<u32>,
    pub incident: BTreeSet<u32>,
    pub style: VertexStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeEnd {
    Primary,
    Secondary,
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub a: u32,
    pub b: u32,
    pub original_length: f64,
    /// Parts per million.
    pub tolerance: u32,
}

impl Edge {
    pub fn endpoint(&self, end: EdgeEnd) -> u32 {
        match end {
            EdgeEnd::Primary => self.a,
            EdgeEnd::Secondary => self.b,
        }
    }

    /// The endpoint opposite `vertex`, if `vertex` is one of them.
    pub fn other(&self, vertex: u32) -> Option<u32> {
        if self.a == vertex {
            Some(self.b)
        } else if self.b == vertex {
            Some(self.a)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    pub points: Vec<Point>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Vertex,
    Edge,
    Boundary,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Vertex => "vertex",
            ShapeKind::Edge => "edge",
            ShapeKind::Boundary => "boundary",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Shape {
    Vertex(Vertex),
    Edge(Edge),
    Boundary(Boundary),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Vertex(_) => ShapeKind::Vertex,
            Shape::Edge(_) => ShapeKind::Edge,
            Shape::Boundary(_) => ShapeKind::Boundary,
        }
    }
}
