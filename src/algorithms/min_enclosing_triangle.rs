//! Minimum-area enclosing triangle (Klee & Laskowski, 1985), ported
//! directly from `original_source/min_triangle.py`'s per-edge rotating
//! calipers construction. Runs in O(n) for a convex polygon.
//!
//! The algorithm walks each edge `C` of the polygon and builds the
//! candidate triangle whose side is flush with `C`, using the
//! "double-distance" construction `gamma` to find where the opposite
//! triangle side must touch. Each candidate is validated (its midpoints
//! must touch the polygon on the expected side, within `ε`); the
//! minimum-area valid candidate over all edges is the answer.

use crate::algorithms::convex_hull::convex_hull;
use crate::data::{Line, Point, Polygon};
use crate::orientation::ccw;
use crate::Error;

/// Perpendicular-distance tolerance for the midpoint validator. Source
/// repeats this exact constant; documented here per spec §4.1.
const EPSILON: f64 = 0.01;

/// Triangle of minimum area enclosing `poly`. Concave input is hulled
/// first, matching `original_source/min_triangle.py`'s
/// `if not poly.isConvex(): poly = convexHull(poly.points)`.
pub fn min_triangle(poly: &Polygon) -> Result<Polygon, Error> {
  let hulled;
  let poly = if poly.is_convex() {
    poly
  } else {
    hulled = convex_hull(poly.as_slice().to_vec())?;
    &hulled
  };
  let points = poly.as_slice();
  let n = points.len();
  if n < 3 {
    return Err(Error::DegeneratePolygon { n });
  }
  if n == 3 {
    return Ok(Polygon::Triangle([points[0], points[1], points[2]]));
  }
  let ctx = Ctx { points, n };

  let mut best: Option<Polygon> = None;
  let mut best_area = f64::INFINITY;
  let mut a = 1usize;
  let mut b = 2usize;
  for c in 0..n {
    let (triangle, next_a, next_b) = triangle_for_index(&ctx, c, a, b)?;
    a = next_a;
    b = next_b;
    if let Some(t) = triangle {
      let area = t.area();
      if area < best_area {
        best_area = area;
        best = Some(t);
      }
    }
  }
  best.ok_or_else(|| Error::TriangulatorFailure {
    context: "minimum enclosing triangle: no edge produced a valid local minimum".into(),
  })
}

/// Pushes each vertex of `triangle` outward along the reverse of the
/// bisector of its two incident edges by `factor`, then rounds away from
/// zero, so the result strictly contains whatever `triangle` bounded.
pub fn inflate(triangle: &Polygon, factor: f64) -> Polygon {
  let pts = triangle.as_slice();
  let n = pts.len();
  let adjusted: Vec<Point> = (0..n)
    .map(|i| {
      let a = pts[i];
      let b = pts[(i + n - 1) % n];
      let c = pts[(i + 1) % n];
      bisect(a, b, c, factor)
    })
    .collect();
  Polygon::Triangle([adjusted[0], adjusted[1], adjusted[2]])
}

fn bisect(a: Point, b: Point, c: Point, factor: f64) -> Point {
  let normalize = |dx: f64, dy: f64| -> (f64, f64) {
    let mag = (dx * dx + dy * dy).sqrt();
    (dx / mag, dy / mag)
  };
  let (vb_x, vb_y) = normalize(b.x - a.x, b.y - a.y);
  let (vc_x, vc_y) = normalize(c.x - a.x, c.y - a.y);
  let bisector_x = -((vb_x + vc_x) / 2.0);
  let bisector_y = -((vb_y + vc_y) / 2.0);
  let x = a.x + factor * bisector_x;
  let y = a.y + factor * bisector_y;
  Point::new(abs_round(x), abs_round(y))
}

fn abs_round(v: f64) -> f64 {
  if v < 0.0 {
    v.floor()
  } else {
    v.ceil()
  }
}

struct Ctx<'a> {
  points: &'a [Point],
  n: usize,
}

impl<'a> Ctx<'a> {
  fn point(&self, i: isize) -> Point {
    self.points[i.rem_euclid(self.n as isize) as usize]
  }

  fn side(&self, i: isize) -> Line {
    Line::new(self.point(i - 1), self.point(i))
  }
}

fn gamma(point: &Point, on: &Line, base: &Line) -> Point {
  let intersection = on
    .intersection(base)
    .expect("`on` and `base` are non-parallel by construction");
  let dist = 2.0 * base.distance(point);
  let guess_pair = if on.vertical {
    let ddist = base.distance(&Point::new(intersection.x, intersection.y + 1.0));
    let plus = Point::new(intersection.x, intersection.y + dist / ddist);
    let minus = Point::new(intersection.x, intersection.y - dist / ddist);
    (plus, minus)
  } else {
    let ddist = base.distance(&on.at_x(intersection.x + 1.0).unwrap());
    let plus = on.at_x(intersection.x + dist / ddist).unwrap();
    let minus = on.at_x(intersection.x - dist / ddist).unwrap();
    (plus, minus)
  };
  if ccw(&base.p1, &base.p2, &guess_pair.0) == ccw(&base.p1, &base.p2, point) {
    guess_pair.0
  } else {
    guess_pair.1
  }
}

/// Two adjacent vertices on the same side of the line through `gamma_b`
/// and `b` implies tangency; otherwise test whether `gamma_b` and vertex
/// `b` fall on the same side of the chord through `b`'s neighbours.
fn high(ctx: &Ctx, b: usize, gamma_b: &Point, side_c: &Line) -> bool {
  let pb = ctx.point(b as isize);
  let pb_prev = ctx.point(b as isize - 1);
  let pb_next = ctx.point(b as isize + 1);
  if ccw(gamma_b, &pb, &pb_prev) == ccw(gamma_b, &pb, &pb_next) {
    return false;
  }
  if ccw(&pb_prev, &pb_next, gamma_b) == ccw(&pb_prev, &pb_next, &pb) {
    side_c.distance(gamma_b) > side_c.distance(&pb)
  } else {
    false
  }
}

fn low(ctx: &Ctx, b: usize, gamma_b: &Point, side_c: &Line) -> bool {
  let pb = ctx.point(b as isize);
  let pb_prev = ctx.point(b as isize - 1);
  let pb_next = ctx.point(b as isize + 1);
  if ccw(gamma_b, &pb, &pb_prev) == ccw(gamma_b, &pb, &pb_next) {
    return false;
  }
  if ccw(&pb_prev, &pb_next, gamma_b) == ccw(&pb_prev, &pb_next, &pb) {
    false
  } else {
    side_c.distance(gamma_b) > side_c.distance(&pb)
  }
}

fn on_left_chain(ctx: &Ctx, b: usize, side_c: &Line) -> bool {
  side_c.distance(&ctx.point(b as isize + 1)) >= side_c.distance(&ctx.point(b as isize))
}

fn increment_low_high(ctx: &Ctx, a: usize, b: usize, side_c: &Line) -> (usize, usize) {
  let gamma_a = gamma(&ctx.point(a as isize), &ctx.side(a as isize), side_c);
  if high(ctx, b, &gamma_a, side_c) {
    (a, (b + 1) % ctx.n)
  } else {
    ((a + 1) % ctx.n, b)
  }
}

fn tangency(ctx: &Ctx, a: usize, b: usize, side_c: &Line) -> bool {
  let gamma_b = gamma(&ctx.point(b as isize), &ctx.side(a as isize), side_c);
  side_c.distance(&ctx.point(b as isize)) >= side_c.distance(&ctx.point(a as isize - 1)) && high(ctx, b, &gamma_b, side_c)
}

/// Returns the minimal triangle with edge `C` flush to vertex `c`, plus
/// the `(a, b)` state to seed the next edge's search.
fn triangle_for_index(ctx: &Ctx, c: usize, a0: usize, b0: usize) -> Result<(Option<Polygon>, usize, usize), Error> {
  let n = ctx.n;
  let mut a = a0.max(c + 1) % n;
  let mut b = b0.max(c + 2) % n;
  let side_c = ctx.side(c as isize);

  while on_left_chain(ctx, b, &side_c) {
    b = (b + 1) % n;
  }
  while side_c.distance(&ctx.point(b as isize)) > side_c.distance(&ctx.point(a as isize)) {
    let (na, nb) = increment_low_high(ctx, a, b, &side_c);
    a = na;
    b = nb;
  }
  while tangency(ctx, a, b, &side_c) {
    b = (b + 1) % n;
  }

  let gamma_b = gamma(&ctx.point(b as isize), &ctx.side(a as isize), &side_c);
  let (side_a, side_b);
  if low(ctx, b, &gamma_b, &side_c) || side_c.distance(&ctx.point(b as isize)) < side_c.distance(&ctx.point(a as isize - 1)) {
    let candidate_b = ctx.side(b as isize);
    let candidate_a = ctx.side(a as isize);
    let bridged_b = Line::new(
      side_c.intersection(&candidate_b).expect("C meets candidate B side"),
      candidate_a.intersection(&candidate_b).expect("A meets candidate B side"),
    );
    if side_c.distance(&bridged_b.midpoint()) < side_c.distance(&ctx.point(a as isize - 1)) {
      let gamma_a = gamma(&ctx.point(a as isize - 1), &bridged_b, &side_c);
      side_a = Line::new(gamma_a, ctx.point(a as isize - 1));
    } else {
      side_a = candidate_a;
    }
    side_b = bridged_b;
  } else {
    side_b = Line::new(gamma_b, ctx.point(b as isize));
    side_a = Line::new(gamma_b, ctx.point(a as isize - 1));
  }

  let vertex_a = side_c.intersection(&side_b);
  let vertex_b = side_c.intersection(&side_a);
  let vertex_c = side_a.intersection(&side_b);

  let triangle = match (vertex_a, vertex_b, vertex_c) {
    (Some(va), Some(vb), Some(vc)) if is_valid_triangle(ctx, &va, &vb, &vc, a, b, c) => Some(Polygon::Triangle([va, vb, vc])),
    _ => None,
  };
  Ok((triangle, a, b))
}

fn is_valid_triangle(ctx: &Ctx, vertex_a: &Point, vertex_b: &Point, vertex_c: &Point, a: usize, b: usize, c: usize) -> bool {
  let midpoint_a = Line::new(*vertex_c, *vertex_b).midpoint();
  let midpoint_b = Line::new(*vertex_a, *vertex_c).midpoint();
  let midpoint_c = Line::new(*vertex_a, *vertex_b).midpoint();
  validate_midpoint(ctx, &midpoint_a, a as isize) && validate_midpoint(ctx, &midpoint_b, b as isize) && validate_midpoint(ctx, &midpoint_c, c as isize)
}

/// Checks that `midpoint` touches the polygon on the side at `index`.
fn validate_midpoint(ctx: &Ctx, midpoint: &Point, index: isize) -> bool {
  let s = ctx.side(index);
  if s.vertical {
    if midpoint.x != s.p1.x {
      return false;
    }
    let max_y = s.p1.y.max(s.p2.y) + EPSILON;
    let min_y = s.p1.y.min(s.p2.y) - EPSILON;
    midpoint.y <= max_y && midpoint.y >= min_y
  } else {
    let max_x = s.p1.x.max(s.p2.x) + EPSILON;
    let min_x = s.p1.x.min(s.p2.x) - EPSILON;
    if !(midpoint.x <= max_x && midpoint.x >= min_x) {
      return false;
    }
    match s.at_x(midpoint.x) {
      Some(p) => p.close(midpoint, EPSILON),
      None => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::f64::consts::PI;

  fn regular_hexagon() -> Polygon {
    let pts: Vec<Point> = (0..6)
      .map(|i| {
        let theta = (i as f64) * PI / 3.0;
        Point::new(theta.cos(), theta.sin())
      })
      .collect();
    Polygon::new(pts).unwrap()
  }

  #[test]
  fn min_triangle_of_triangle_is_itself() {
    let t = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]).unwrap();
    let mt = min_triangle(&t).unwrap();
    assert!((mt.area() - t.area()).abs() < 1e-9);
  }

  #[test]
  fn concave_input_is_hulled_before_use() {
    // "House with a notch" pentagon, concave at (0.5, 0.5).
    let concave = Polygon::new(vec![
      Point::new(0.0, 0.0),
      Point::new(2.0, 0.0),
      Point::new(2.0, 2.0),
      Point::new(0.5, 0.5),
      Point::new(0.0, 2.0),
    ])
    .unwrap();
    let mt = min_triangle(&concave).unwrap();
    for v in concave.as_slice() {
      assert!(mt.contains(v) || mt.as_slice().contains(v));
    }
    assert!(mt.area() >= concave.area());
  }

  #[test]
  fn min_triangle_encloses_every_vertex_of_a_square() {
    let square = Polygon::new(vec![
      Point::new(0.0, 0.0),
      Point::new(1.0, 0.0),
      Point::new(1.0, 1.0),
      Point::new(0.0, 1.0),
    ])
    .unwrap();
    let mt = min_triangle(&square).unwrap();
    for v in square.as_slice() {
      assert!(mt.contains(v) || mt.as_slice().contains(v));
    }
    assert!(mt.area() >= square.area());
  }

  #[test]
  fn min_triangle_of_regular_hexagon_matches_known_optimum() {
    let hexagon = regular_hexagon();
    let mt = min_triangle(&hexagon).unwrap();
    let expected = 3.0 * 3f64.sqrt() / 2.0;
    assert!((mt.area() - expected).abs() / expected < 0.01, "area = {}", mt.area());
  }

  #[test]
  fn inflated_triangle_strictly_contains_the_original() {
    let t = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 4.0)]).unwrap();
    let inflated = inflate(&t, 10.0);
    assert!(inflated.area() > t.area());
    for v in t.as_slice() {
      assert!(inflated.contains(v));
    }
  }
}
