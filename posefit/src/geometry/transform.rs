//! Scale + translate mapping between problem space (integral) and edit space.

use crate::error::{Error, Result};
use crate::model::Point;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Transform {
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Result<Self> {
        let t = Transform {
            scale,
            offset_x,
            offset_y,
        };
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::OutOfBounds { what: "scale" });
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(Error::OutOfBounds { what: "offset" });
        }
        Ok(())
    }

    /// Largest uniform scale that places `bounds` (min_x, min_y, max_x, max_y)
    /// inside a `width` x `height` viewport with `margin` on every side.
    pub fn fit(bounds: (i64, i64, i64, i64), width: f64, height: f64, margin: f64) -> Result<Self> {
        let (min_x, min_y, max_x, max_y) = bounds;
        let avail_w = width - 2.0 * margin;
        let avail_h = height - 2.0 * margin;
        if !(avail_w > 0.0 && avail_h > 0.0) {
            return Err(Error::OutOfBounds { what: "viewport" });
        }
        let span_x = (max_x - min_x) as f64;
        let span_y = (max_y - min_y) as f64;
        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (avail_w / span_x).min(avail_h / span_y),
            (true, false) => avail_w / span_x,
            (false, true) => avail_h / span_y,
            (false, false) => 1.0,
        };
        Transform::new(
            scale,
            margin - min_x as f64 * scale,
            margin - min_y as f64 * scale,
        )
    }

    pub fn to_edit(&self, p: [i64; 2]) -> Point {
        Point::new(
            p[0] as f64 * self.scale + self.offset_x,
            p[1] as f64 * self.scale + self.offset_y,
        )
    }

    /// Inverse mapping; rounds half away from zero.
    pub fn to_solution(&self, p: Point) -> [i64; 2] {
        [
            ((p.x - self.offset_x) / self.scale).round() as i64,
            ((p.y - self.offset_y) / self.scale).round() as i64,
        ]
    }
}
