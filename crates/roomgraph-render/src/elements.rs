//! Element export for interactive viewers.
//!
//! The shape is the usual `{ nodes: [{data, position}], edges: [{data}] }` element list, so the
//! file can be fed to a browser graph viewer as is.

use crate::color::NodeColoring;
use crate::error::Result;
use crate::place::Placement;
use roomgraph_graphlib::SimpleGraph;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub label: String,
    pub region: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeElement {
    pub data: NodeData,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeElement {
    pub data: EdgeData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Elements {
    pub directed: bool,
    pub nodes: Vec<NodeElement>,
    pub edges: Vec<EdgeElement>,
}

impl Elements {
    /// Placed nodes of `g` with their coloring, and the edges between placed nodes.
    ///
    /// Positions use screen orientation (y grows downwards) in layout units.
    pub fn build(g: &SimpleGraph, placement: &Placement, coloring: &NodeColoring) -> Self {
        let nodes = placement
            .positions
            .iter()
            .filter(|(id, _)| g.has_node(id))
            .map(|(id, p)| NodeElement {
                data: NodeData {
                    id: id.clone(),
                    label: id.clone(),
                    region: coloring.region_of(id).to_string(),
                    color: coloring.color_of(id).to_string(),
                },
                position: Position {
                    x: p.x,
                    y: if p.y == 0.0 { 0.0 } else { -p.y },
                },
            })
            .collect();
        let edges = g
            .edges()
            .filter(|k| placement.contains(&k.v) && placement.contains(&k.w))
            .map(|k| EdgeElement {
                data: EdgeData {
                    source: k.v.clone(),
                    target: k.w.clone(),
                },
            })
            .collect();
        Self {
            directed: g.is_directed(),
            nodes,
            edges,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
