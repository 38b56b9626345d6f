use super::Point;
use crate::orientation::{ccw, segments_intersect};
use crate::Error;

/// An ordered, cyclic sequence of >= 3 vertices, assumed simple
/// (non-self-intersecting) and CCW-wound by convention.
///
/// Re-architected from the teacher's class-inheritance `Triangle(Polygon)`
/// into a tagged variant (see spec redesign notes): `Triangle` carries its
/// closed-form area and is what the triangulator returns natively;
/// `General` is anything else. Both variants deref to a vertex slice, so
/// most algorithms are written once against `Polygon` without caring
/// which variant they hold.
#[derive(Debug, Clone)]
pub enum Polygon {
  Triangle([Point; 3]),
  General(Vec<Point>),
}

impl Polygon {
  pub fn new(points: Vec<Point>) -> Result<Polygon, Error> {
    if points.len() < 3 {
      return Err(Error::DegeneratePolygon { n: points.len() });
    }
    let poly = if points.len() == 3 {
      Polygon::Triangle([points[0], points[1], points[2]])
    } else {
      Polygon::General(points)
    };
    Ok(poly)
  }

  pub fn triangle(a: Point, b: Point, c: Point) -> Polygon {
    Polygon::Triangle([a, b, c])
  }

  pub fn as_slice(&self) -> &[Point] {
    match self {
      Polygon::Triangle(pts) => &pts[..],
      Polygon::General(pts) => &pts[..],
    }
  }

  pub fn n(&self) -> usize {
    self.as_slice().len()
  }

  pub fn is_triangle(&self) -> bool {
    matches!(self, Polygon::Triangle(_))
  }

  /// The vertex at `idx`, wrapped cyclically (negative indices allowed).
  pub fn vertex(&self, idx: isize) -> Point {
    let pts = self.as_slice();
    let n = pts.len() as isize;
    pts[idx.rem_euclid(n) as usize]
  }

  pub fn iter_boundary_edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
    let pts = self.as_slice();
    let n = pts.len();
    (0..n).map(move |i| (pts[i], pts[(i + 1) % n]))
  }

  /// Signed area * 2 via the shoelace formula; positive iff CCW-wound.
  pub fn signed_area_2x(&self) -> f64 {
    self
      .iter_boundary_edges()
      .map(|(p, q)| p.x * q.y - q.x * p.y)
      .sum()
  }

  /// The actual winding of the polygon's vertex order.
  pub fn ccw(&self) -> bool {
    self.signed_area_2x() > 0.0
  }

  /// All consecutive CCW triples must agree in sign.
  pub fn is_convex(&self) -> bool {
    let pts = self.as_slice();
    let n = pts.len() as isize;
    let mut target = None;
    for i in 0..n {
      let a = self.vertex(i);
      let b = self.vertex(i + 1);
      let c = self.vertex(i + 2);
      let turn = ccw(&a, &b, &c);
      match target {
        None => target = Some(turn),
        Some(t) if t != turn => return false,
        _ => {}
      }
    }
    true
  }

  /// Area via closed form for triangles, else via triangulation (summed).
  pub fn area(&self) -> f64 {
    match self {
      Polygon::Triangle(pts) => triangle_area(&pts[0], &pts[1], &pts[2]),
      Polygon::General(_) => {
        let mut rng = crate::rng::default_rng();
        match crate::algorithms::triangulation::ear_clipping::triangulate_simple(self.as_slice(), &mut rng) {
          Ok(triangles) => triangles.iter().map(Polygon::area).sum(),
          Err(_) => self.signed_area_2x().abs() / 2.0,
        }
      }
    }
  }

  /// Ray-casting point-in-polygon for convex polygons; dispatches to
  /// triangulation-and-OR for concave ones. A point exactly on an edge
  /// has unspecified membership (inherited from the original
  /// implementation, which has the same ambiguity).
  pub fn contains(&self, p: &Point) -> bool {
    if self.is_convex() {
      self.contains_convex(p)
    } else {
      let mut rng = crate::rng::default_rng();
      match crate::algorithms::triangulation::ear_clipping::triangulate_simple(self.as_slice(), &mut rng) {
        Ok(triangles) => triangles.iter().any(|t| t.contains(p)),
        Err(_) => false,
      }
    }
  }

  fn contains_convex(&self, p: &Point) -> bool {
    let pts = self.as_slice();
    let n = pts.len();
    let mut inside = false;
    let mut p1 = pts[0];
    for i in 0..=n {
      let p2 = pts[i % n];
      if p.y > p1.y.min(p2.y) && p.y <= p1.y.max(p2.y) && p.x <= p1.x.max(p2.x) {
        let xints = if p1.y != p2.y {
          Some((p.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x)
        } else {
          None
        };
        if p1.x == p2.x || xints.map(|x| p.x <= x).unwrap_or(false) {
          inside = !inside;
        }
      }
      p1 = p2;
    }
    inside
  }

  /// Random interior point via rejection sampling in the bounding box.
  /// Unbounded worst case for thin polygons; intended for test generation.
  pub fn interior_point<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Point {
    let (min, max) = self.bounding_box();
    loop {
      let x = rng.gen_range(min.x..=max.x);
      let y = rng.gen_range(min.y..=max.y);
      let p = Point::new(x, y);
      if self.contains(&p) {
        return p;
      }
    }
  }

  /// Random point just outside the polygon, near its bounding box.
  pub fn exterior_point<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Point {
    let (min, max) = self.bounding_box();
    loop {
      let off_x = 1.0 - 2.0 * rng.gen::<f64>();
      let off_y = 1.0 - 2.0 * rng.gen::<f64>();
      let x = min.x + rng.gen::<f64>() * (max.x - min.x) + off_x;
      let y = min.y + rng.gen::<f64>() * (max.y - min.y) + off_y;
      let p = Point::new(x, y);
      if !self.contains(&p) {
        return p;
      }
    }
  }

  pub fn bounding_box(&self) -> (Point, Point) {
    let pts = self.as_slice();
    let min_x = pts.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = pts.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = pts.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = pts.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    (Point::new(min_x, min_y), Point::new(max_x, max_y))
  }

  /// Vertices as a sorted-by-x-then-y tuple. Set-of-vertices identity for
  /// test utilities only (`locate` itself uses arena-handle identity, not
  /// this). Collides for polygons sharing a vertex set in a different
  /// cyclic order; documented, not fixed, per spec design notes.
  pub fn vertex_set_key(&self) -> Vec<Point> {
    let mut pts = self.as_slice().to_vec();
    pts.sort();
    pts
  }
}

fn triangle_area(a: &Point, b: &Point, c: &Point) -> f64 {
  ((b.x * a.y - a.x * b.y) + (c.x * b.y - b.x * c.y) + (a.x * c.y - c.x * a.y)).abs() / 2.0
}

/// `(1-√r1)A + √r1(1-r2)B + r2√r1·C` — uniform sampling inside a triangle
/// via barycentric coordinates.
pub fn triangle_interior_point<R: rand::Rng + ?Sized>(a: &Point, b: &Point, c: &Point, rng: &mut R) -> Point {
  let r1: f64 = rng.gen();
  let r2: f64 = rng.gen();
  let sr1 = r1.sqrt();
  *a * (1.0 - sr1) + *b * (sr1 * (1.0 - r2)) + *c * (r2 * sr1)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;

  fn square() -> Polygon {
    Polygon::new(vec![
      Point::new(0.0, 0.0),
      Point::new(1.0, 0.0),
      Point::new(1.0, 1.0),
      Point::new(0.0, 1.0),
    ])
    .unwrap()
  }

  #[test]
  fn square_is_convex_and_ccw() {
    let s = square();
    assert!(s.is_convex());
    assert!(s.ccw());
  }

  #[test]
  fn square_area_is_one() {
    assert_eq!(square().area(), 1.0);
  }

  #[test]
  fn contains_interior_not_exterior() {
    let s = square();
    assert!(s.contains(&Point::new(0.5, 0.5)));
    assert!(!s.contains(&Point::new(2.0, 2.0)));
  }

  #[test]
  fn concave_dent_point_still_inside() {
    // A "house with a notch" pentagon: concave at (0.5, 0.5).
    let poly = Polygon::new(vec![
      Point::new(0.0, 0.0),
      Point::new(2.0, 0.0),
      Point::new(2.0, 2.0),
      Point::new(0.5, 0.5),
      Point::new(0.0, 2.0),
    ])
    .unwrap();
    assert!(!poly.is_convex());
    assert!(poly.contains(&Point::new(1.8, 0.2)));
    // Just past the notch vertex, still inside the right-hand lobe.
    assert!(poly.contains(&Point::new(1.5, 1.0)));
    // Inside the notch itself: outside the polygon.
    assert!(!poly.contains(&Point::new(0.5, 1.4)));
  }

  #[test]
  fn interior_point_sampling_stays_inside() {
    let s = square();
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    for _ in 0..50 {
      let p = s.interior_point(&mut rng);
      assert!(s.contains(&p));
    }
  }

  #[test]
  fn exterior_point_sampling_stays_outside() {
    let s = square();
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
    for _ in 0..50 {
      let p = s.exterior_point(&mut rng);
      assert!(!s.contains(&p));
    }
  }
}
