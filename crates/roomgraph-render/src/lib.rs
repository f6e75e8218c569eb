#![forbid(unsafe_code)]

//! Drawing for `roomgraph` crawl results.
//!
//! - `color`: region membership, neighbor-vote propagation and the region color map
//! - `place`: per-component layout and circle packing of the components
//! - `svg`: static SVG output of a placed graph
//! - `elements`: JSON element list for interactive viewers
//! - `chart`: reach-by-hop chart

pub mod chart;
pub mod color;
pub mod elements;
pub mod error;
pub mod place;
pub mod svg;

pub use chart::{ReachSeries, reach_counts, render_reach_svg};
pub use color::{
    DEFAULT_COLOR, NodeColoring, RegionColors, UNKNOWN_REGION, assign_by_neighbor, assign_regions,
    regions_by_name,
};
pub use elements::Elements;
pub use error::{Error, Result};
pub use place::{Placement, PlotOptions, multi_component_layout};
pub use svg::{SvgOptions, render_graph_svg};
