use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Builds a layout graph from node ids and `(source, target)` pairs.
    pub fn from_parts<I, S, J, A, B>(nodes: I, edges: J) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        Self {
            nodes: nodes.into_iter().map(|id| Node { id: id.into() }).collect(),
            edges: edges
                .into_iter()
                .map(|(s, t)| Edge {
                    source: s.into(),
                    target: t.into(),
                })
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut node_exists: std::collections::BTreeSet<&str> = std::collections::BTreeSet::new();
        for n in &self.nodes {
            node_exists.insert(n.id.as_str());
        }
        for e in &self.edges {
            if !node_exists.contains(e.source.as_str()) || !node_exists.contains(e.target.as_str())
            {
                return Err(Error::MissingEndpoint {
                    source_id: e.source.clone(),
                    target_id: e.target.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
}

/// Edges are treated as undirected by every algorithm in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    pub positions: std::collections::BTreeMap<String, Point>,
}
