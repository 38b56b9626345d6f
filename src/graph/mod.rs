//! Graph structures backing the hierarchy DAG and its per-round vertex
//! adjacency (spec §4.4).

mod directed;
mod undirected;

pub use directed::DirectedGraph;
pub use undirected::UndirectedGraph;
