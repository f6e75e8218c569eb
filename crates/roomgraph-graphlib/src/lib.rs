#![forbid(unsafe_code)]

//! Graph container APIs used by `roomgraph`.
//!
//! A small string-keyed graph with the handful of operations the crawl pipeline needs:
//! idempotent edge add/remove, components, induced subgraphs, relabeling, reciprocated-edge
//! extraction and hop-distance queries. `node_link` converts graphs to and from a serializable
//! node-link document.

pub mod alg;
mod graph;
pub mod node_link;

pub use graph::{EdgeKey, Graph, GraphOptions};
pub use node_link::{NodeLinkData, NodeLinkEdge, NodeLinkNode};

/// Graph without node or edge payloads, the shape used throughout the crawl pipeline.
pub type SimpleGraph = Graph<(), ()>;
