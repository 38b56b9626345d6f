//! CCW test and segment intersection.
//!
//! These are the two primitives everything else in the crate is built on
//! of: the minimum enclosing triangle, polygon validity, and polygon
//! containment all reduce to one or both of these.

use crate::data::Point;

/// Tests whether the turn `A -> B -> C` is counter-clockwise.
///
/// Collinear triples return `false`. This asymmetry is intentional
/// (see spec): downstream code only ever compares `ccw(...) == ccw(...)`,
/// which is stable under collinear ties.
pub fn ccw(a: &Point, b: &Point, c: &Point) -> bool {
  (b.x - a.x) * (c.y - a.y) > (b.y - a.y) * (c.x - a.x)
}

/// True if segments `a1 b1` and `a2 b2` properly intersect (shared
/// endpoints don't count as an intersection).
pub fn segments_intersect(a1: &Point, b1: &Point, a2: &Point, b2: &Point) -> bool {
  ccw(a1, b1, a2) != ccw(a1, b1, b2) && ccw(a2, b2, a1) != ccw(a2, b2, b1)
}
