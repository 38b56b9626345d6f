//! Graham scan convex hull, the crate's default `PointSetTriangulator::convex_hull`.
//!
//! Ported from `rgeometry`'s `algorithms::convex_hull::graham_scan`,
//! monomorphized to `f64` points (the teacher is generic over an exact
//! `PolygonScalar`; we trade that precision for the plain `f64` the
//! spec's data model calls for, and lean on the `ε` tolerance elsewhere
//! to absorb the resulting float slop).

use crate::data::{Point, Polygon};
use crate::orientation::ccw;
use crate::Error;
use std::cmp::Ordering;

/// O(n log n) convex hull of a point set. Returns a CCW-wound polygon.
pub fn convex_hull(mut pts: Vec<Point>) -> Result<Polygon, Error> {
  if pts.len() < 3 {
    return Err(Error::ConvexHullFailure {
      context: format!("need at least 3 points, got {}", pts.len()),
    });
  }
  let smallest = smallest_point(&pts);
  pts.sort_by(|a, b| ccw_cmp_around(&smallest, a, b));

  let mut known_good = 2;
  let mut at = known_good;
  while at < pts.len() {
    if at != known_good {
      pts.swap(at, known_good);
    }
    let p1 = pts[known_good];
    let p2 = pts[known_good - 1];
    let p3 = pts[known_good - 2];
    if ccw(&p3, &p2, &p1) {
      at += 1;
      known_good += 1;
    } else {
      pts.swap(at, known_good - 1);
      at += 1;
    }
  }
  pts.truncate(known_good);
  if pts.len() < 3 {
    return Err(Error::ConvexHullFailure {
      context: "collinear input has no non-degenerate hull".into(),
    });
  }
  Polygon::new(pts)
}

fn smallest_point(pts: &[Point]) -> Point {
  *pts
    .iter()
    .min_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal).then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)))
    .expect("non-empty point set")
}

/// Orders `a` and `b` by polar angle around `center`, breaking ties by
/// distance. Used to seed the Graham scan's initial sort.
fn ccw_cmp_around(center: &Point, a: &Point, b: &Point) -> Ordering {
  if a == b {
    return Ordering::Equal;
  }
  let angle = |p: &Point| (p.y - center.y).atan2(p.x - center.x);
  angle(a)
    .partial_cmp(&angle(b))
    .unwrap_or(Ordering::Equal)
    .then_with(|| center.sqr_dist(a).partial_cmp(&center.sqr_dist(b)).unwrap_or(Ordering::Equal))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hull_of_square_with_interior_point() {
    let pts = vec![
      Point::new(0.0, 0.0),
      Point::new(4.0, 0.0),
      Point::new(4.0, 4.0),
      Point::new(0.0, 4.0),
      Point::new(2.0, 2.0),
    ];
    let hull = convex_hull(pts).unwrap();
    assert_eq!(hull.n(), 4);
    assert!(hull.ccw());
  }

  #[test]
  fn hull_of_triangle_is_itself() {
    let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
    let hull = convex_hull(pts).unwrap();
    assert_eq!(hull.n(), 3);
  }

  #[test]
  fn empty_input_fails() {
    assert!(convex_hull(vec![]).is_err());
  }
}
