//! End-to-end scenarios for `Locator`, ported from the concrete scenarios
//! and stress tests in the specification's testable-properties section.

use kirklocate::algorithms::convex_hull::convex_hull;
use kirklocate::algorithms::polygon_ops::smart_interior_point;
use kirklocate::{Locator, Point, Polygon};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn unit_square_split_into_two_triangles() {
  let a = Point::new(0.0, 0.0);
  let b = Point::new(1.0, 0.0);
  let c = Point::new(1.0, 1.0);
  let d = Point::new(0.0, 1.0);
  let t1 = Polygon::triangle(a, b, c);
  let t2 = Polygon::triangle(a, c, d);

  let locator = Locator::build(vec![t1.clone(), t2.clone()], None).unwrap();
  assert!(locator.dag_is_acyclic());

  assert_eq!(locator.locate(&Point::new(0.25, 0.75)).unwrap().vertex_set_key(), t2.vertex_set_key());
  assert_eq!(locator.locate(&Point::new(0.75, 0.25)).unwrap().vertex_set_key(), t1.vertex_set_key());
  assert_eq!(locator.locate(&Point::new(2.0, 2.0)), None);
}

#[test]
fn single_lone_region_still_builds_and_locates() {
  let a = Point::new(0.0, 0.0);
  let b = Point::new(1.0, 0.0);
  let c = Point::new(0.0, 1.0);
  let t = Polygon::triangle(a, b, c);

  let locator = Locator::build(vec![t.clone()], None).unwrap();
  assert!(locator.dag_is_acyclic());

  assert_eq!(locator.locate(&Point::new(0.25, 0.25)).unwrap().vertex_set_key(), t.vertex_set_key());

  // Inside the fabricated bounding triangle but outside the one real
  // region: resolves to filler, not to the region.
  let (leaf, is_original) = locator.annotated_locate(&Point::new(5.0, 5.0));
  assert!(leaf.is_some());
  assert!(!is_original);
  assert_eq!(locator.locate(&Point::new(5.0, 5.0)), None);

  // Outside the bounding triangle entirely.
  assert_eq!(locator.annotated_locate(&Point::new(1e6, 1e6)), (None, false));
}

#[test]
fn three_triangle_fan() {
  let a = Point::new(0.0, 0.0);
  let b = Point::new(1.5, 0.0);
  let c = Point::new(1.0, 1.0);
  let d = Point::new(1.0, -1.0);
  let e = Point::new(0.0, 1.0);

  let abc = Polygon::triangle(a, b, c);
  let abd = Polygon::triangle(a, d, b);
  let ace = Polygon::triangle(a, c, e);

  let locator = Locator::build(vec![abc.clone(), abd.clone(), ace.clone()], None).unwrap();
  assert!(locator.dag_is_acyclic());

  assert_eq!(locator.locate(&Point::new(0.9, 0.1)).unwrap().vertex_set_key(), abc.vertex_set_key());
  assert_eq!(locator.locate(&Point::new(0.5, -0.2)).unwrap().vertex_set_key(), abd.vertex_set_key());
  assert_eq!(locator.locate(&Point::new(0.3, 0.5)).unwrap().vertex_set_key(), ace.vertex_set_key());
}

#[test]
fn concave_pentagon_dent_still_resolves_to_its_region() {
  // "House with a notch" pentagon, concave at (0.5, 0.5); paired with a
  // large outer triangle so it isn't the only region in play.
  let pentagon = Polygon::new(vec![
    Point::new(0.0, 0.0),
    Point::new(2.0, 0.0),
    Point::new(2.0, 2.0),
    Point::new(0.5, 0.5),
    Point::new(0.0, 2.0),
  ])
  .unwrap();

  let locator = Locator::build(vec![pentagon.clone()], None).unwrap();
  assert!(locator.dag_is_acyclic());

  // Just past the notch vertex, still inside the pentagon's right lobe.
  let in_dent_lobe = Point::new(1.5, 1.0);
  assert_eq!(locator.locate(&in_dent_lobe).unwrap().vertex_set_key(), pentagon.vertex_set_key());
}

fn fan_triangulate(poly: &Polygon) -> Vec<Polygon> {
  let pts = poly.as_slice();
  let n = pts.len();
  (1..n - 1).map(|i| Polygon::triangle(pts[0], pts[i], pts[i + 1])).collect()
}

#[test]
fn random_convex_polygon_triangulated_samples_locate_to_their_own_triangle() {
  let mut rng = ChaCha8Rng::seed_from_u64(100);
  let pts: Vec<Point> = (0..12)
    .map(|i| {
      let theta = (i as f64) * std::f64::consts::TAU / 12.0;
      Point::new(theta.cos() * 5.0, theta.sin() * 5.0)
    })
    .collect();
  let polygon = convex_hull(pts).unwrap();
  let triangles = fan_triangulate(&polygon);

  let locator = Locator::build(triangles.clone(), None).unwrap();
  assert!(locator.dag_is_acyclic());

  for triangle in &triangles {
    for _ in 0..50 {
      let p = smart_interior_point(triangle, &mut rng).unwrap();
      let found = locator.locate(&p).expect("sampled interior point must resolve to some region");
      assert_eq!(found.vertex_set_key(), triangle.vertex_set_key());
    }
  }
}

#[test]
fn dag_acyclicity_stress_over_random_tilings() {
  let mut rng = ChaCha8Rng::seed_from_u64(200);
  for n_regions in [20usize, 60, 120] {
    let pts: Vec<Point> = (0..n_regions)
      .map(|i| {
        let theta = (i as f64) * std::f64::consts::TAU / (n_regions as f64);
        let jitter = 1.0 + 0.01 * rng.gen::<f64>();
        Point::new(theta.cos() * 10.0 * jitter, theta.sin() * 10.0 * jitter)
      })
      .collect();
    let hull = convex_hull(pts).unwrap();
    let regions = fan_triangulate(&hull);

    let locator = Locator::build(regions, None).unwrap();
    assert!(locator.dag_is_acyclic(), "DAG not acyclic for {} regions", n_regions);
  }
}
