//! Multi-component placement.
//!
//! Each connected component is laid out on its own, scaled so its shortest edge has unit length,
//! enclosed in a circle, and the circles are packed next to each other.

use crate::error::Result;
use indexmap::IndexMap;
use roomgraph_graphlib::{SimpleGraph, alg};
use roomgraph_layout::{Algorithm, Circle, Graph as LayoutGraph, Point, layout, pack_circles};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    /// One of `kamada_kawai`, `spring`, `spiral`, `spectral`, `forceatlas2`, `bfs`, `arf`.
    pub layout: String,
    /// Packing radius as a fraction of the component's bounding radius.
    pub r_fraction: f64,
    /// Added to each component's bounding radius.
    pub padding: f64,
    /// Components with fewer nodes are not drawn.
    pub min_component_size: usize,
    /// ForceAtlas2 only.
    pub strong_gravity: bool,
    /// Iteration cap for the iterative layouts.
    pub max_iter: Option<usize>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            layout: "kamada_kawai".to_string(),
            r_fraction: 1.0,
            padding: 2.0,
            min_component_size: 1,
            strong_gravity: false,
            max_iter: None,
        }
    }
}

impl PlotOptions {
    /// Resolves the layout name, applying the iteration and gravity overrides.
    pub fn algorithm(&self) -> Result<Algorithm> {
        let mut alg = Algorithm::from_name(&self.layout)?;
        match &mut alg {
            Algorithm::ForceAtlas2(o) => {
                o.strong_gravity = self.strong_gravity;
                if let Some(n) = self.max_iter {
                    o.max_iter = n;
                }
            }
            Algorithm::Spring(o) => {
                if let Some(n) = self.max_iter {
                    o.iterations = n;
                }
            }
            Algorithm::KamadaKawai(o) => {
                if let Some(n) = self.max_iter {
                    o.max_iterations = n;
                }
            }
            Algorithm::Arf(o) => {
                if let Some(n) = self.max_iter {
                    o.max_iter = n;
                }
            }
            Algorithm::Spiral(_) | Algorithm::Spectral | Algorithm::Bfs(_) => {}
        }
        Ok(alg)
    }
}

/// Positions of every drawn node plus the circle each component was packed into.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    pub positions: IndexMap<String, Point>,
    pub circles: Vec<Circle>,
}

impl Placement {
    pub fn contains(&self, node: &str) -> bool {
        self.positions.contains_key(node)
    }
}

struct ComponentLayout {
    positions: Vec<(String, Point)>,
    radius: f64,
}

/// Lays out and packs the components of `g` (weak components for directed graphs).
///
/// An unknown layout name fails before any component is processed.
pub fn multi_component_layout(g: &SimpleGraph, opts: &PlotOptions) -> Result<Placement> {
    let algorithm = opts.algorithm()?;

    let mut comps: Vec<ComponentLayout> = Vec::new();
    for members in alg::components(g) {
        if members.len() < opts.min_component_size {
            continue;
        }
        comps.push(layout_component(g, members, &algorithm, opts.padding)?);
    }
    debug!(
        components = comps.len(),
        layout = algorithm.name(),
        "laid out components"
    );
    if comps.is_empty() {
        return Ok(Placement::default());
    }

    let mut order: Vec<usize> = (0..comps.len()).collect();
    order.sort_by(|&a, &b| comps[a].radius.total_cmp(&comps[b].radius));
    let radii: Vec<f64> = order
        .iter()
        .map(|&i| opts.r_fraction * comps[i].radius)
        .collect();
    let circles = pack_circles(&radii);

    let mut placement = Placement {
        positions: IndexMap::new(),
        circles: circles.clone(),
    };
    for (&i, circle) in order.iter().zip(&circles) {
        for (id, p) in &comps[i].positions {
            placement
                .positions
                .insert(id.clone(), Point::new(p.x + circle.x, p.y + circle.y));
        }
    }
    Ok(placement)
}

fn layout_component(
    g: &SimpleGraph,
    members: Vec<String>,
    algorithm: &Algorithm,
    padding: f64,
) -> Result<ComponentLayout> {
    let members: BTreeSet<String> = members.into_iter().collect();
    let sub = alg::subgraph(g, |id| members.contains(id));
    let input = LayoutGraph::from_parts(
        sub.nodes().map(str::to_string),
        sub.edges().map(|k| (k.v.clone(), k.w.clone())),
    );
    let res = layout(&input, algorithm)?;

    let min_edge = sub
        .edges()
        .filter_map(|k| {
            let d = res.positions.get(&k.v)?.distance(*res.positions.get(&k.w)?);
            (d > 0.0).then_some(d)
        })
        .fold(f64::INFINITY, f64::min);
    let scale = if min_edge.is_finite() { min_edge } else { 1.0 };

    let n = res.positions.len().max(1) as f64;
    let cx = res.positions.values().map(|p| p.x).sum::<f64>() / n;
    let cy = res.positions.values().map(|p| p.y).sum::<f64>() / n;

    let positions: Vec<(String, Point)> = sub
        .nodes()
        .filter_map(|id| {
            let p = res.positions.get(id)?;
            Some((
                id.to_string(),
                Point::new((p.x - cx) / scale, (p.y - cy) / scale),
            ))
        })
        .collect();
    let reach = positions
        .iter()
        .map(|(_, p)| p.norm())
        .fold(0.0f64, f64::max);

    Ok(ComponentLayout {
        positions,
        radius: reach + padding,
    })
}
