//! Post-crawl graph corrections for links the wiki gets wrong.

use crate::error::Result;
use roomgraph_graphlib::SimpleGraph;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgePatch {
    pub source: String,
    pub target: String,
}

impl EdgePatch {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Edges to add, then edges to remove, after traversal has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchList {
    #[serde(default)]
    pub add: Vec<EdgePatch>,
    #[serde(default)]
    pub remove: Vec<EdgePatch>,
}

static BUILTIN: OnceLock<PatchList> = OnceLock::new();

impl PatchList {
    /// Corrections for the live wiki, embedded from `assets/patches.json`.
    pub fn builtin() -> PatchList {
        BUILTIN
            .get_or_init(|| {
                let json_text = include_str!("../assets/patches.json");
                serde_json::from_str(json_text).expect("embedded patch list JSON is valid")
            })
            .clone()
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }

    /// Applies additions then removals. Removing an edge that is not there does nothing, so
    /// applying the same list twice gives the same graph as applying it once.
    ///
    /// Returns how many edges were actually removed.
    pub fn apply(&self, g: &mut SimpleGraph) -> usize {
        for e in &self.add {
            g.set_edge(e.source.as_str(), e.target.as_str());
        }
        self.remove
            .iter()
            .filter(|e| g.remove_edge(&e.source, &e.target))
            .count()
    }
}
