//! Ear-clipping triangulation, ported from `rgeometry`'s
//! `algorithms::triangulation::earclip` (a linked list of vertices plus a
//! pool of "possible ears", from which one is picked at random each
//! step). The teacher's version triangulates a plain simple polygon; the
//! crate's constrained-triangulation contract also needs one polygonal
//! hole, so `triangulate` first bridges the hole into the outer ring
//! (a standard "polygon with hole -> simple polygon" reduction) before
//! handing the combined ring to the same ear-clipping core.

use crate::data::{Point, Polygon};
use crate::orientation::{ccw, segments_intersect};
use crate::Error;
use rand::Rng;

/// Triangulates `poly`, optionally cutting out `hole`. Both must be CCW
/// simple polygons; `hole` is bridged into `poly`'s boundary via a
/// zero-width channel to the nearest visible vertex.
pub fn triangulate(poly: &Polygon, hole: Option<&Polygon>, rng: &mut impl Rng) -> Result<Vec<Polygon>, Error> {
  match hole {
    None => triangulate_simple(poly.as_slice(), rng),
    Some(hole) => {
      let (points, ring) = bridge_hole(poly.as_slice(), hole.as_slice())?;
      let triangles = triangulate_indices(&points, &ring, rng)?;
      Ok(triangles
        .into_iter()
        .map(|[a, b, c]| Polygon::triangle(points[a], points[b], points[c]))
        .collect())
    }
  }
}

/// Triangulates a simple CCW polygon with no holes.
pub fn triangulate_simple(points: &[Point], rng: &mut impl Rng) -> Result<Vec<Polygon>, Error> {
  if points.len() < 3 {
    return Err(Error::DegeneratePolygon { n: points.len() });
  }
  let order: Vec<usize> = (0..points.len()).collect();
  let triangles = triangulate_indices(points, &order, rng)?;
  Ok(triangles.into_iter().map(|[a, b, c]| Polygon::triangle(points[a], points[b], points[c])).collect())
}

/// Ear-clips the closed ring `order` (indices into `points`, CCW, may
/// repeat an index exactly twice for a bridged hole channel).
fn triangulate_indices(points: &[Point], order: &[usize], rng: &mut impl Rng) -> Result<Vec<[usize; 3]>, Error> {
  let n = order.len();
  if n < 3 {
    return Err(Error::DegeneratePolygon { n });
  }
  if n == 3 {
    return Ok(vec![[order[0], order[1], order[2]]]);
  }

  let mut prev: Vec<usize> = (0..n).map(|i| (i + n - 1) % n).collect();
  let mut next: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
  let mut alive = vec![true; n];
  let mut queued = vec![true; n];
  let mut pool: Vec<usize> = (0..n).collect();
  let mut remaining = n;
  let mut triangles = Vec::with_capacity(n - 2);

  // An ear-clip can never take more than `n` unsuccessful probes per
  // remaining vertex before some ear becomes available; this bounds
  // retries for (and surfaces) self-intersecting input instead of
  // looping forever.
  let mut stalls = 0usize;
  let stall_budget = n * n + 16;

  while remaining > 3 {
    if pool.is_empty() {
      return Err(Error::TriangulatorFailure {
        context: "ear pool exhausted before triangulation completed".into(),
      });
    }
    let idx = rng.gen_range(0..pool.len());
    let pos = pool.swap_remove(idx);
    if !alive[pos] {
      continue;
    }
    queued[pos] = false;
    let p = prev[pos];
    let q = next[pos];
    if is_ear(points, order, &prev, &next, &alive, p, pos, q) {
      triangles.push([order[p], order[pos], order[q]]);
      alive[pos] = false;
      next[p] = q;
      prev[q] = p;
      remaining -= 1;
      stalls = 0;
      for v in [p, q] {
        if !queued[v] {
          queued[v] = true;
          pool.push(v);
        }
      }
    } else {
      queued[pos] = true;
      pool.push(pos);
      stalls += 1;
      if stalls > stall_budget {
        return Err(Error::TriangulatorFailure {
          context: "ear clipping failed to converge (input may self-intersect)".into(),
        });
      }
    }
  }

  let last = (0..n).find(|&i| alive[i]).expect("three vertices remain");
  let b = next[last];
  let c = next[b];
  triangles.push([order[last], order[b], order[c]]);
  Ok(triangles)
}

fn is_ear(points: &[Point], order: &[usize], prev: &[usize], next: &[usize], alive: &[bool], a: usize, b: usize, c: usize) -> bool {
  let pa = points[order[a]];
  let pb = points[order[b]];
  let pc = points[order[c]];
  if !ccw(&pa, &pb, &pc) {
    return false;
  }
  let mut cursor = next[c];
  while cursor != a {
    if alive[cursor] && cursor != b {
      if triangle_contains_or_touches(&pa, &pb, &pc, &points[order[cursor]]) {
        return false;
      }
    }
    cursor = next[cursor];
  }
  true
}

/// True if `p` lies inside or on the boundary of CCW triangle `abc`.
fn triangle_contains_or_touches(a: &Point, b: &Point, c: &Point, p: &Point) -> bool {
  cross_sign(a, b, p) >= 0 && cross_sign(b, c, p) >= 0 && cross_sign(c, a, p) >= 0
}

fn cross_sign(a: &Point, b: &Point, p: &Point) -> i32 {
  let v = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
  if v > 0.0 {
    1
  } else if v < 0.0 {
    -1
  } else {
    0
  }
}

/// Cuts `hole` out of `poly` by bridging its rightmost vertex to the
/// nearest mutually-visible vertex on `poly`'s boundary, producing one
/// combined simple ring suitable for plain ear clipping.
fn bridge_hole(outer: &[Point], hole: &[Point]) -> Result<(Vec<Point>, Vec<usize>), Error> {
  if hole.len() < 3 {
    return Err(Error::DegeneratePolygon { n: hole.len() });
  }
  let no = outer.len();
  let mut hole_rev: Vec<Point> = hole.to_vec();
  hole_rev.reverse();
  let nh = hole_rev.len();

  let h = (0..nh)
    .max_by(|&i, &j| hole_rev[i].x.partial_cmp(&hole_rev[j].x).unwrap())
    .unwrap();
  let h_point = hole_rev[h];

  let mut order_by_dist: Vec<usize> = (0..no).collect();
  order_by_dist.sort_by(|&i, &j| h_point.sqr_dist(&outer[i]).partial_cmp(&h_point.sqr_dist(&outer[j])).unwrap());

  let m = order_by_dist
    .into_iter()
    .find(|&i| bridge_is_visible(outer, &hole_rev, i, h, &h_point))
    .ok_or_else(|| Error::TriangulatorFailure {
      context: "no visible bridge vertex between outline and hole".into(),
    })?;

  let mut points = outer.to_vec();
  points.extend(hole_rev.iter().copied());

  let mut ring = Vec::with_capacity(no + nh + 2);
  ring.extend(0..=m);
  for k in 0..=nh {
    ring.push(no + (h + k) % nh);
  }
  ring.extend(m..no);

  Ok((points, ring))
}

fn bridge_is_visible(outer: &[Point], hole_rev: &[Point], m: usize, h: usize, h_point: &Point) -> bool {
  let m_point = outer[m];
  let crosses_ring = |ring: &[Point], skip: usize| -> bool {
    let n = ring.len();
    (0..n).any(|i| {
      if i == skip || (i + 1) % n == skip {
        return false;
      }
      segments_intersect(&m_point, h_point, &ring[i], &ring[(i + 1) % n])
    })
  };
  !crosses_ring(outer, m) && !crosses_ring(hole_rev, h)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;
  use rand_chacha::ChaCha8Rng;

  fn areas_sum(triangles: &[Polygon]) -> f64 {
    triangles.iter().map(Polygon::area).sum()
  }

  #[test]
  fn triangulating_a_square_preserves_area() {
    let square = Polygon::new(vec![
      Point::new(0.0, 0.0),
      Point::new(1.0, 0.0),
      Point::new(1.0, 1.0),
      Point::new(0.0, 1.0),
    ])
    .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let triangles = triangulate_simple(square.as_slice(), &mut rng).unwrap();
    assert_eq!(triangles.len(), 2);
    assert!((areas_sum(&triangles) - square.area()).abs() < 1e-9);
  }

  #[test]
  fn triangulating_a_concave_pentagon_preserves_area() {
    let poly = Polygon::new(vec![
      Point::new(0.0, 0.0),
      Point::new(2.0, 0.0),
      Point::new(2.0, 2.0),
      Point::new(0.5, 0.5),
      Point::new(0.0, 2.0),
    ])
    .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let triangles = triangulate_simple(poly.as_slice(), &mut rng).unwrap();
    assert_eq!(triangles.len(), 3);
    assert!((areas_sum(&triangles) - poly.area()).abs() < 1e-6);
  }

  #[test]
  fn bridging_a_square_hole_preserves_annulus_area() {
    let outer = Polygon::new(vec![
      Point::new(0.0, 0.0),
      Point::new(10.0, 0.0),
      Point::new(10.0, 10.0),
      Point::new(0.0, 10.0),
    ])
    .unwrap();
    let hole = Polygon::new(vec![
      Point::new(4.0, 4.0),
      Point::new(6.0, 4.0),
      Point::new(6.0, 6.0),
      Point::new(4.0, 6.0),
    ])
    .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let triangles = triangulate(&outer, Some(&hole), &mut rng).unwrap();
    let expected = outer.area() - hole.area();
    assert!((areas_sum(&triangles) - expected).abs() < 1e-6);
  }
}
