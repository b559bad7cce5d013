use crate::model::Point;

#[inline]
pub fn distance_sq(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    distance_sq(a, b).sqrt()
}

/// Squared distance from `p` to segment `a..b` and the clamped projection parameter.
pub fn seg_distance_sq(p: Point, a: Point, b: Point) -> (f64, f64) {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let wx = p.x - a.x;
    let wy = p.y - a.y;
    let vv = vx * vx + vy * vy;
    let mut t = if vv > 0.0 { (wx * vx + wy * vy) / vv } else { 0.0 };
    if t < 0.0 {
        t = 0.0;
    } else if t > 1.0 {
        t = 1.0;
    }
    let proj = Point::new(a.x + t * vx, a.y + t * vy);
    (distance_sq(p, proj), t)
}
