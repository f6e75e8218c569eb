#![forbid(unsafe_code)]

//! Crawler core for `roomgraph`.
//!
//! Fetches wiki location pages, decides which access points are real geographic connections,
//! walks the access-point graph from the rooms of every region and derives the cleaned-up graphs
//! the renderer consumes.

pub mod classify;
pub mod crawl;
pub mod document;
pub mod error;
pub mod fetch;
pub mod page;
pub mod patch;
pub mod process;
pub mod regions;

pub use classify::{Condition, is_access_geographic, is_location_geographic};
pub use crawl::{CrawlConfig, CrawlOutput, CrawlParams, crawl};
pub use document::CrawlDocument;
pub use error::{Error, Result};
pub use fetch::{FetchError, HttpPageSource, PageSource, StaticPageSource};
pub use page::{LocationPage, fetch_location, parse_location};
pub use patch::{EdgePatch, PatchList};
pub use process::{prune_unreciprocated_hubs, processed_graph, reciprocated_graph};
pub use regions::{RegionIndex, build_region_index};
