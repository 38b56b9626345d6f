//! Kirkpatrick hierarchical planar point location.
//!
//! Given a set of non-overlapping polygons tiling part of the plane,
//! [`hierarchy::Locator`] preprocesses them into a DAG of progressively
//! coarser triangulations so that `locate(p)` finds the region
//! containing `p` in `O(log n)`. See [`algorithms::min_enclosing_triangle`]
//! for the linear-time bounding triangle construction and
//! [`hierarchy::builder`] for the preprocessing pipeline itself.

pub mod algorithms;
pub mod data;
pub mod graph;
pub mod hierarchy;
pub mod orientation;
pub mod rng;

pub use data::{Line, Point, Polygon};
pub use hierarchy::Locator;

/// Construction-time knobs for [`hierarchy::Locator::build_with`].
///
/// The ambient tolerance and inflation factor are not meant to be tuned
/// per query; they exist as named fields (not constants) so tests can
/// probe edge cases without touching the algorithms themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyOptions {
  /// Maximum vertex degree eligible for independent-set removal. `8` is
  /// the value the planar-graph theorem underlying Kirkpatrick's
  /// `O(log n)` depth bound requires; changing it voids that guarantee.
  pub k: usize,
  /// How far the minimum enclosing triangle is pushed outward so the
  /// input tiling lies strictly inside it.
  pub inflation_factor: f64,
}

impl Default for HierarchyOptions {
  fn default() -> Self {
    HierarchyOptions {
      k: 8,
      inflation_factor: 10.0,
    }
  }
}

/// Errors raised during construction. Queries (`locate`/`annotated_locate`)
/// never fail; "point outside the hierarchy" is encoded in their return
/// types, not as an `Err`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
  #[error("polygon has {n} vertices, need at least 3")]
  DegeneratePolygon { n: usize },

  #[error("input regions are not simple/non-overlapping: {detail}")]
  NonSimpleInput { detail: String },

  #[error("triangulator failure: {context}")]
  TriangulatorFailure { context: String },

  #[error("convex hull failure: {context}")]
  ConvexHullFailure { context: String },
}
