//! The preprocessing pipeline behind [`super::Locator::build`], ported
//! from `original_source/kirkpatrick.py`'s `preprocess` nested-function
//! structure. Each nested function there (`process_boundary`,
//! `triangulate_regions`, `remove_independent_set`,
//! `calculate_bounding_polygon`) becomes a named method here taking and
//! returning explicit state (spec §9's redesign note), operating on a
//! `HierarchyBuilder` context that owns the arena and DAG under
//! construction.

use crate::algorithms::convex_hull::convex_hull;
use crate::algorithms::min_enclosing_triangle::{inflate, min_triangle};
use crate::algorithms::triangulation::ear_clipping;
use crate::algorithms::triangulation::snap_to_nearest;
use crate::data::{Point, Polygon};
use crate::graph::{DirectedGraph, UndirectedGraph};
use crate::{Error, HierarchyOptions};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use super::Locator;

/// Arena-backed DAG under construction. Nodes are arena indices rather
/// than the polygons themselves, so the DAG stays cheap to traverse and
/// the same triangle can be a child of many parents without cloning.
pub(crate) struct HierarchyBuilder {
  arena: Vec<Polygon>,
  is_original: Vec<bool>,
  dag: DirectedGraph<usize>,
  config: HierarchyOptions,
  rng: ChaCha8Rng,
}

/// Safety valve on the peeling loop: Kirkpatrick's planar-graph guarantee
/// bounds the round count at `O(log n)`, so this is generous headroom,
/// not a real expectation — it exists to turn a broken invariant (e.g.
/// non-simple input leaving a disconnected frontier) into an error
/// instead of a hang.
fn max_peeling_rounds(n: usize) -> usize {
  64 + n * 2
}

impl HierarchyBuilder {
  pub(crate) fn new(config: HierarchyOptions, rng: ChaCha8Rng) -> Self {
    HierarchyBuilder {
      arena: Vec::new(),
      is_original: Vec::new(),
      dag: DirectedGraph::new(),
      config,
      rng,
    }
  }

  fn push(&mut self, poly: Polygon, is_original: bool) -> usize {
    let idx = self.arena.len();
    self.arena.push(poly);
    self.is_original.push(is_original);
    self.dag.add_node(idx);
    idx
  }

  /// Computes the inflated bounding triangle and the filler triangulation
  /// of the annulus between it and `outline` (or the convex hull of all
  /// region vertices, if `outline` is absent).
  fn process_boundary(&mut self, regions: &[Polygon], outline: Option<Polygon>) -> Result<(Polygon, Polygon, Vec<Polygon>), Error> {
    let outline = match outline {
      Some(o) => o,
      None => {
        let pts: Vec<Point> = regions.iter().flat_map(|r| r.as_slice().iter().copied()).collect();
        log::debug!("no outline given, hulling {} region vertices", pts.len());
        convex_hull(pts)?
      }
    };
    let hull_for_triangle = if outline.is_convex() {
      outline.clone()
    } else {
      convex_hull(outline.as_slice().to_vec())?
    };
    let bounding = min_triangle(&hull_for_triangle)?;
    let inflated = inflate(&bounding, self.config.inflation_factor);
    log::debug!("bounding triangle inflated by factor {}", self.config.inflation_factor);
    let filler = ear_clipping::triangulate(&inflated, Some(&outline), &mut self.rng)?;
    log::debug!("filler triangulation has {} triangles", filler.len());
    Ok((inflated, outline, filler))
  }

  /// Adds every region (and filler triangle) as a DAG node, triangulating
  /// any non-triangular region and connecting its pieces to it. Returns
  /// the initial frontier.
  fn triangulate_regions(&mut self, regions: Vec<Polygon>, filler: Vec<Polygon>) -> Result<Vec<usize>, Error> {
    let mut frontier = Vec::new();
    for region in regions {
      let region_node = self.push(region.clone(), true);
      if region.n() > 3 {
        let triangles = ear_clipping::triangulate_simple(region.as_slice(), &mut self.rng)?;
        for t in triangles {
          let snapped = snap_to_nearest(t.as_slice(), region.as_slice());
          let t = Polygon::new(snapped)?;
          let tnode = self.push(t, false);
          self.dag.connect(tnode, region_node);
          frontier.push(tnode);
        }
      } else {
        frontier.push(region_node);
      }
    }
    for t in filler {
      frontier.push(self.push(t, false));
    }
    Ok(frontier)
  }

  /// One independent-set peeling round: picks a low-degree vertex set,
  /// retriangulates each removed vertex's star, and returns the next
  /// frontier (carried-over triangles plus the freshly retriangulated
  /// ones).
  fn remove_independent_set(&mut self, frontier: &[usize], frame: &BTreeSet<Point>) -> Result<Vec<usize>, Error> {
    let mut vg: UndirectedGraph<Point> = UndirectedGraph::new();
    for &node in frontier {
      for (a, b) in self.arena[node].iter_boundary_edges() {
        vg.connect(a, b);
      }
    }
    let removed = vg.independent_set(self.config.k, frame);
    log::trace!("independent set of size {} out of {} frontier triangles", removed.len(), frontier.len());
    if removed.is_empty() {
      return Err(Error::TriangulatorFailure {
        context: "independent-set peeling made no progress (frontier may be disconnected or all vertices exceed the degree bound)".into(),
      });
    }

    let mut star_map: BTreeMap<Point, Vec<usize>> = BTreeMap::new();
    let mut next_frontier = Vec::new();
    for &node in frontier {
      let touched = self.arena[node].as_slice().iter().find(|p| removed.contains(p)).copied();
      match touched {
        Some(p) => star_map.entry(p).or_default().push(node),
        None => next_frontier.push(node),
      }
    }

    for (p, star_nodes) in star_map {
      let star_polygon = calculate_bounding_polygon(&self.arena, p, &star_nodes)?;
      let new_triangles = ear_clipping::triangulate_simple(star_polygon.as_slice(), &mut self.rng)?;
      for t in new_triangles {
        let snapped = snap_to_nearest(t.as_slice(), star_polygon.as_slice());
        let t = Polygon::new(snapped)?;
        let new_node = self.push(t, false);
        for &old in &star_nodes {
          self.dag.connect(new_node, old);
        }
        next_frontier.push(new_node);
      }
    }
    Ok(next_frontier)
  }

  pub(crate) fn build(mut self, regions: Vec<Polygon>, outline: Option<Polygon>) -> Result<Locator, Error> {
    let (inflated, outline, filler) = self.process_boundary(&regions, outline)?;
    let filler_copy = filler.clone();
    let mut frontier = self.triangulate_regions(regions, filler)?;
    let _ = outline;
    if frontier.is_empty() {
      return Err(Error::NonSimpleInput {
        detail: "no regions or filler triangles to build a hierarchy from".into(),
      });
    }

    let frame: BTreeSet<Point> = inflated.as_slice().iter().copied().collect();
    let bound = max_peeling_rounds(frontier.len());
    let mut round = 0;
    while frontier.len() > 1 {
      round += 1;
      if round > bound {
        return Err(Error::TriangulatorFailure {
          context: "hierarchy peeling did not converge to a single frontier triangle within the round budget".into(),
        });
      }
      frontier = self.remove_independent_set(&frontier, &frame)?;
    }
    let root = frontier[0];
    self.dag.add_node(root);
    log::debug!("hierarchy built: {} DAG nodes, {} peeling rounds", self.arena.len(), round);

    Ok(Locator {
      dag: self.dag,
      arena: self.arena,
      is_original: self.is_original,
      root,
      filler: filler_copy,
      config: self.config,
    })
  }
}

/// Reconstructs the polygonal boundary of the star around `p` (the
/// region vacated by removing `p` and every triangle incident to it).
///
/// Each star triangle is CCW-wound and contributes its edge opposite `p`
/// (the other two vertices, in the triangle's own cyclic order); chaining
/// these directed edges end-to-start traces the star's boundary, also
/// CCW. The original reconstructs the same boundary from an unordered
/// vertex chain (`calculate_bounding_polygon` in `kirkpatrick.py`), which
/// leaves its winding direction to Python set-iteration order; using each
/// triangle's own orientation instead makes the result deterministic and
/// guaranteed CCW, which the ear clipper requires.
fn calculate_bounding_polygon(arena: &[Polygon], p: Point, star_nodes: &[usize]) -> Result<Polygon, Error> {
  if star_nodes.len() < 3 {
    return Err(Error::TriangulatorFailure {
      context: format!("vertex star has only {} triangles, need at least 3 to form a hole", star_nodes.len()),
    });
  }
  let mut edges: Vec<(Point, Point)> = Vec::with_capacity(star_nodes.len());
  for &node in star_nodes {
    edges.push(outer_edge(&arena[node], p)?);
  }

  let mut remaining = edges;
  let (start, first_end) = remaining.remove(0);
  let mut boundary = vec![start];
  let mut cursor = first_end;
  while cursor != start {
    boundary.push(cursor);
    let idx = remaining.iter().position(|&(a, _)| a == cursor).ok_or_else(|| Error::TriangulatorFailure {
      context: "star polygon boundary chain is broken (vertex star may be non-manifold)".into(),
    })?;
    let (_, b) = remaining.remove(idx);
    cursor = b;
  }
  if !remaining.is_empty() {
    return Err(Error::TriangulatorFailure {
      context: "star polygon boundary has disconnected components".into(),
    });
  }
  Polygon::new(boundary)
}

/// The directed edge of `triangle` opposite vertex `p`, in the triangle's
/// own CCW order.
fn outer_edge(triangle: &Polygon, p: Point) -> Result<(Point, Point), Error> {
  let pts = triangle.as_slice();
  let i = pts.iter().position(|&v| v == p).ok_or_else(|| Error::TriangulatorFailure {
    context: "star triangle does not actually contain the removed vertex".into(),
  })?;
  let n = pts.len();
  Ok((pts[(i + 1) % n], pts[(i + 2) % n]))
}
