//! Triangulation is treated as an external collaborator (spec §6): the
//! hierarchy builder only needs *some* constrained Delaunay triangulator
//! and *some* point-cloud convex-hull/Delaunay primitive. These traits
//! are the contract; `ear_clipping` and `super::convex_hull` are the
//! concrete defaults the crate ships so it runs standalone. Callers may
//! supply their own (e.g. a real CDT library) by implementing the traits.

pub mod ear_clipping;

use crate::data::{Point, Polygon};
use crate::Error;

/// Triangulates a simple polygon, optionally with one polygonal hole.
/// Implementations may return vertices that are not bit-identical to the
/// input; callers that need object identity should snap the result back
/// onto the input vertex set (see [`snap_to_nearest`]).
pub trait ConstrainedTriangulator {
  fn triangulate(&self, poly: &Polygon, hole: Option<&Polygon>) -> Result<Vec<Polygon>, Error>;
}

/// Triangulates (or hulls) an unordered point cloud.
pub trait PointSetTriangulator {
  fn convex_hull(&self, pts: &[Point]) -> Result<Polygon, Error>;
}

pub struct EarClippingTriangulator;

impl ConstrainedTriangulator for EarClippingTriangulator {
  fn triangulate(&self, poly: &Polygon, hole: Option<&Polygon>) -> Result<Vec<Polygon>, Error> {
    let mut rng = crate::rng::default_rng();
    ear_clipping::triangulate(poly, hole, &mut rng)
  }
}

pub struct GrahamScanHull;

impl PointSetTriangulator for GrahamScanHull {
  fn convex_hull(&self, pts: &[Point]) -> Result<Polygon, Error> {
    crate::algorithms::convex_hull::convex_hull(pts.to_vec())
  }
}

/// Snaps every point in `produced` to its nearest point in `valid`, by
/// object identity. Triangulators occasionally return coordinates that
/// differ from their inputs in the last few bits; downstream code (the
/// hierarchy builder) relies on exact vertex identity, so every output
/// vertex is mapped back onto the nearest input vertex.
pub fn snap_to_nearest(produced: &[Point], valid: &[Point]) -> Vec<Point> {
  produced.iter().map(|p| *nearest_point(p, valid)).collect()
}

/// Linear-scan nearest-point lookup. A k-d tree would be the natural
/// upgrade for large inputs; out of scope for the core's size budget.
pub fn nearest_point<'a>(query: &Point, set: &'a [Point]) -> &'a Point {
  set
    .iter()
    .min_by(|a, b| query.sqr_dist(a).partial_cmp(&query.sqr_dist(b)).unwrap())
    .expect("non-empty point set")
}
