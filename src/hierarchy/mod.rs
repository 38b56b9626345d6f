//! Kirkpatrick's hierarchy: preprocessing (`builder`) and the
//! [`Locator`] it produces.

mod builder;

use crate::data::{Point, Polygon};
use crate::graph::DirectedGraph;
use crate::{Error, HierarchyOptions};
use builder::HierarchyBuilder;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A preprocessed planar point-location structure.
///
/// Immutable once built: the DAG, arena, and region list never change
/// after [`Locator::build`]/[`Locator::build_with`] return, so `locate`
/// and `annotated_locate` are plain reads and safe to call concurrently
/// from multiple threads (`Locator` is `Send + Sync`).
#[derive(Debug)]
pub struct Locator {
  dag: DirectedGraph<usize>,
  arena: Vec<Polygon>,
  is_original: Vec<bool>,
  root: usize,
  filler: Vec<Polygon>,
  config: HierarchyOptions,
}

impl Locator {
  /// Builds a locator with default options and a fixed RNG seed (see
  /// [`crate::rng::default_rng`]) — deterministic, suitable whenever the
  /// caller doesn't need to vary the construction RNG across runs.
  pub fn build(regions: Vec<Polygon>, outline: Option<Polygon>) -> Result<Locator, Error> {
    Locator::build_with(regions, outline, HierarchyOptions::default(), &mut crate::rng::default_rng())
  }

  /// Builds a locator with explicit options and RNG, for reproducible
  /// tests or to vary the independent-set degree bound / inflation
  /// factor.
  pub fn build_with(regions: Vec<Polygon>, outline: Option<Polygon>, config: HierarchyOptions, rng: &mut ChaCha8Rng) -> Result<Locator, Error> {
    log::debug!("building locator: {} input regions, outline {}", regions.len(), outline.is_some());
    let seed_rng = ChaCha8Rng::from_rng(rng).expect("ChaCha8Rng reseed from an existing RNG cannot fail");
    HierarchyBuilder::new(config, seed_rng).build(regions, outline)
  }

  /// Descends the DAG from the root, returning the leaf triangle/region
  /// containing `p` and whether it's one of the original input regions.
  /// `(None, false)` means `p` is outside the bounding triangle entirely.
  pub fn annotated_locate(&self, p: &Point) -> (Option<&Polygon>, bool) {
    if !self.arena[self.root].contains(p) {
      return (None, false);
    }
    let mut curr = self.root;
    loop {
      let mut next = None;
      for &child in self.dag.successors(curr) {
        if self.arena[child].contains(p) {
          next = Some(child);
          break;
        }
      }
      match next {
        Some(child) => curr = child,
        None => break,
      }
    }
    (Some(&self.arena[curr]), self.is_original[curr])
  }

  /// `annotated_locate(p)` projected to the leaf only when it's an
  /// original input region; `None` for filler and out-of-bounds points.
  pub fn locate(&self, p: &Point) -> Option<&Polygon> {
    let (leaf, is_original) = self.annotated_locate(p);
    if is_original {
      leaf
    } else {
      None
    }
  }

  /// The filler triangles fabricated between the bounding triangle and
  /// the input outline, for inspection/debugging.
  pub fn boundary(&self) -> &[Polygon] {
    &self.filler
  }

  pub fn dag_is_acyclic(&self) -> bool {
    self.dag.acyclic()
  }

  pub fn config(&self) -> &HierarchyOptions {
    &self.config
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn unit_square_two_triangles() -> (Polygon, Polygon) {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 0.0);
    let c = Point::new(1.0, 1.0);
    let d = Point::new(0.0, 1.0);
    (Polygon::triangle(a, b, c), Polygon::triangle(a, c, d))
  }

  #[test]
  fn unit_square_as_two_triangles_locates_correctly() {
    let (t1, t2) = unit_square_two_triangles();
    let locator = Locator::build(vec![t1.clone(), t2.clone()], None).unwrap();
    assert!(locator.dag_is_acyclic());

    let in_t2 = Point::new(0.25, 0.75);
    let in_t1 = Point::new(0.75, 0.25);
    let outside = Point::new(2.0, 2.0);

    assert_eq!(locator.locate(&in_t2).unwrap().vertex_set_key(), t2.vertex_set_key());
    assert_eq!(locator.locate(&in_t1).unwrap().vertex_set_key(), t1.vertex_set_key());
    assert_eq!(locator.locate(&outside), None);
    assert_eq!(locator.annotated_locate(&outside), (None, false));
  }

  #[test]
  fn point_between_square_and_hull_is_filler_not_original() {
    let (t1, t2) = unit_square_two_triangles();
    let locator = Locator::build(vec![t1, t2], None).unwrap();
    let (leaf, is_original) = locator.annotated_locate(&Point::new(5.0, 5.0));
    assert!(leaf.is_some());
    assert!(!is_original);
    assert_eq!(locator.locate(&Point::new(5.0, 5.0)), None);
  }
}
