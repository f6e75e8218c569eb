//! On-disk crawl document (`crawl_data.json`).

use crate::crawl::{CrawlOutput, CrawlParams};
use crate::error::Result;
use crate::process::{processed_graph, reciprocated_graph};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use roomgraph_graphlib::{NodeLinkData, SimpleGraph};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlDocument {
    pub crawl_params: CrawlParams,
    pub crawl_time: f64,
    pub requests: u64,
    #[serde(default)]
    pub crawled_at: Option<DateTime<Utc>>,
    pub link_to_name: IndexMap<String, String>,
    pub link_to_permanence: IndexMap<String, bool>,
    pub digraph_raw: NodeLinkData,
    pub digraph_proc: NodeLinkData,
    pub graph_undir: NodeLinkData,
}

impl CrawlDocument {
    /// Captures a crawl together with its processed and reciprocated graphs.
    pub fn from_output(output: &CrawlOutput) -> Self {
        let processed = processed_graph(
            &output.graph,
            &output.link_to_name,
            &output.link_to_permanence,
        );
        let undirected = reciprocated_graph(&processed);
        Self {
            crawl_params: output.params.clone(),
            crawl_time: output.crawl_time,
            requests: output.requests,
            crawled_at: Some(output.crawled_at),
            link_to_name: output.link_to_name.clone(),
            link_to_permanence: output.link_to_permanence.clone(),
            digraph_raw: NodeLinkData::from_graph(&output.graph),
            digraph_proc: NodeLinkData::from_graph(&processed),
            graph_undir: NodeLinkData::from_graph(&undirected),
        }
    }

    pub fn raw_graph(&self) -> SimpleGraph {
        self.digraph_raw.to_graph()
    }

    pub fn processed_graph(&self) -> SimpleGraph {
        self.digraph_proc.to_graph()
    }

    pub fn undirected_graph(&self) -> SimpleGraph {
        self.graph_undir.to_graph()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}
