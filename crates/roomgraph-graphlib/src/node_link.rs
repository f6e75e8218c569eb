//! Node-link encoding: a serializable `{ nodes: [{id}], edges: [{source, target}] }` document.
//!
//! The shape follows the common "node-link" interchange format so crawl output can be read by
//! other graph tooling.

use crate::{Graph, GraphOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLinkNode {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLinkEdge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLinkData {
    pub directed: bool,
    #[serde(default)]
    pub multigraph: bool,
    pub nodes: Vec<NodeLinkNode>,
    #[serde(alias = "links")]
    pub edges: Vec<NodeLinkEdge>,
}

impl NodeLinkData {
    pub fn from_graph<N, E>(g: &Graph<N, E>) -> Self
    where
        N: Default + 'static,
        E: Default + 'static,
    {
        Self {
            directed: g.is_directed(),
            multigraph: false,
            nodes: g
                .nodes()
                .map(|id| NodeLinkNode { id: id.to_string() })
                .collect(),
            edges: g
                .edges()
                .map(|k| NodeLinkEdge {
                    source: k.v.clone(),
                    target: k.w.clone(),
                })
                .collect(),
        }
    }

    /// Rebuilds a graph. Edge endpoints missing from `nodes` are created on the fly.
    pub fn to_graph<N, E>(&self) -> Graph<N, E>
    where
        N: Default + 'static,
        E: Default + 'static,
    {
        let mut g: Graph<N, E> = Graph::new(GraphOptions {
            directed: self.directed,
        });
        for n in &self.nodes {
            g.ensure_node(n.id.as_str());
        }
        for e in &self.edges {
            g.set_edge(e.source.as_str(), e.target.as_str());
        }
        g
    }
}

impl<N, E> From<&Graph<N, E>> for NodeLinkData
where
    N: Default + 'static,
    E: Default + 'static,
{
    fn from(g: &Graph<N, E>) -> Self {
        Self::from_graph(g)
    }
}
