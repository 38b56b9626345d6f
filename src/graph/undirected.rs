//! Undirected vertex-adjacency graph, used by the hierarchy builder to
//! pick the low-degree independent set peeled at each round.
//!
//! Re-architected from the teacher's class-inheritance
//! (`UndirectedGraph(DirectedGraph)`, `connect` overridden to write both
//! directions) into composition, per spec §9: an undirected graph wraps
//! a directed one and always writes both directions on `connect`.

use super::directed::DirectedGraph;
use std::collections::BTreeSet;
use std::hash::Hash;

#[derive(Debug, Clone, Default)]
pub struct UndirectedGraph<N> {
  inner: DirectedGraph<N>,
}

impl<N: Copy + Eq + Hash + Ord> UndirectedGraph<N> {
  pub fn new() -> Self {
    UndirectedGraph { inner: DirectedGraph::new() }
  }

  pub fn add_node(&mut self, n: N) {
    self.inner.add_node(n);
  }

  pub fn connect(&mut self, u: N, v: N) {
    self.inner.connect(u, v);
    self.inner.connect(v, u);
  }

  pub fn degree(&self, n: N) -> usize {
    self.inner.successors(n).count()
  }

  pub fn neighbours(&self, n: N) -> impl Iterator<Item = &N> {
    self.inner.successors(n)
  }

  pub fn nodes(&self) -> impl Iterator<Item = &N> {
    self.inner.nodes()
  }

  /// Greedily extracts a low-degree (`deg(v) <= k`), pairwise
  /// non-adjacent vertex set, excluding anything in `avoid`.
  ///
  /// Deterministic: candidates are walked in a fixed (`BTreeSet`) order
  /// rather than hash-map iteration order, so the result only depends on
  /// the graph's contents, not on incidental hashing.
  pub fn independent_set(&self, k: usize, avoid: &BTreeSet<N>) -> BTreeSet<N> {
    let mut candidates: BTreeSet<N> = self.nodes().copied().filter(|v| !avoid.contains(v) && self.degree(*v) <= k).collect();
    let mut result = BTreeSet::new();
    while let Some(&v) = candidates.iter().next() {
      candidates.remove(&v);
      result.insert(v);
      for n in self.neighbours(v).copied().collect::<Vec<_>>() {
        candidates.remove(&n);
      }
    }
    result
  }
}
