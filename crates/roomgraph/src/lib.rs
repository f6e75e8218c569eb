#![forbid(unsafe_code)]

//! `roomgraph` crawls the AdventureQuest Worlds wiki into a directed graph of rooms and the
//! ways between them, then draws that graph.
//!
//! # Features
//!
//! - `render`: region coloring, layout and SVG output (`roomgraph::render`, `pipeline::run_plot`)
//! - `raster`: PNG output next to every SVG via pure-Rust rasterization

pub use roomgraph_core::*;
pub use roomgraph_graphlib as graphlib;
pub use roomgraph_layout as layout;

pub mod pipeline;

#[cfg(feature = "render")]
pub mod render {
    pub use roomgraph_render::*;

    #[cfg(feature = "raster")]
    pub mod raster;
}
