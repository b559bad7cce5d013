// Centralized ingestion limits to harden against untrusted input (problem/state JSON)

// Scene size caps
pub const MAX_VERTICES: usize = 200_000;
pub const MAX_EDGES: usize = 300_000;
pub const MAX_HOLE_POINTS: usize = 100_000;

// Numeric bounds
pub const PROBLEM_COORD_MAX: i64 = 10_000_000; // problem/solution space, symmetric
pub const EDIT_COORD_MAX: f64 = 1e12;          // edit space, symmetric

#[inline]
pub fn in_problem_bounds(v: i64) -> bool {
    (-PROBLEM_COORD_MAX..=PROBLEM_COORD_MAX).contains(&v)
}

#[inline]
pub fn in_edit_bounds(v: f64) -> bool {
    v.is_finite() && v.abs() <= EDIT_COORD_MAX
}
