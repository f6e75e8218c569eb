#![forbid(unsafe_code)]

//! Headless 2D graph layout algorithms and circle packing.
//!
//! `roomgraph-layout` is used by `roomgraph-render` to position each connected component of the
//! room graph before the components are packed next to each other. Every algorithm treats edges
//! as undirected and returns coordinates centered on the origin.

pub mod algo;
pub mod error;
pub mod graph;
pub mod pack;

pub use algo::{
    Algorithm, ArfOptions, BfsOptions, ForceAtlas2Options, KamadaKawaiOptions, SpiralOptions, SpringOptions,
};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, LayoutResult, Node, Point};
pub use pack::{Circle, pack_circles};

/// Headless layout entry point.
pub fn layout(graph: &Graph, algorithm: &Algorithm) -> Result<LayoutResult> {
    graph.validate()?;
    let adj = algo::Adjacency::new(graph);
    let coords = match algorithm {
        Algorithm::KamadaKawai(opts) => algo::kamada_kawai::layout(&adj, opts),
        Algorithm::Spring(opts) => algo::spring::layout(&adj, opts),
        Algorithm::Spiral(opts) => algo::spiral::layout(&adj, opts),
        Algorithm::Spectral => algo::spectral::layout(&adj),
        Algorithm::ForceAtlas2(opts) => algo::forceatlas2::layout(&adj, opts),
        Algorithm::Bfs(opts) => algo::bfs::layout(&adj, opts),
        Algorithm::Arf(opts) => algo::arf::layout(&adj, opts),
    };
    Ok(adj.into_result(coords))
}
