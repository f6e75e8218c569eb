//! Node coloring by wiki region.
//!
//! Rooms listed on a region page take that region (the largest region wins when a room is
//! listed on several). Rooms that no region lists are colored after their neighbors by majority
//! vote, repeated until a full pass assigns nothing new.

use crate::error::Result;
use indexmap::IndexMap;
use roomgraph_core::RegionIndex;
use roomgraph_graphlib::{SimpleGraph, alg};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const UNKNOWN_REGION: &str = "Unknown";
pub const DEFAULT_COLOR: &str = "lightblue";

const PALETTE: [&str; 12] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe", "#008080", "#e6beff",
];

/// Region name -> display names of its rooms that were crawled, in region order.
pub fn regions_by_name(
    index: &RegionIndex,
    link_to_name: &IndexMap<String, String>,
) -> IndexMap<String, Vec<String>> {
    index
        .regions
        .iter()
        .map(|(region, slugs)| {
            let names = slugs
                .iter()
                .filter_map(|slug| link_to_name.get(slug).cloned())
                .collect();
            (region.clone(), names)
        })
        .collect()
}

/// Room -> region, visiting regions from smallest to largest so larger regions overwrite.
pub fn assign_regions(regions: &IndexMap<String, Vec<String>>) -> BTreeMap<String, String> {
    let mut order: Vec<(&String, &Vec<String>)> = regions.iter().collect();
    order.sort_by_key(|(_, rooms)| rooms.len());

    let mut out = BTreeMap::new();
    for (region, rooms) in order {
        for room in rooms {
            out.insert(room.clone(), region.clone());
        }
    }
    out
}

/// Labels unlabeled nodes of `g` with the strict majority label of their labeled neighbors.
///
/// Each pass votes with the labels known at the start of the pass. Ties and nodes without
/// labeled neighbors stay unlabeled; components without any labeled node are not visited.
/// Returns how many nodes were labeled.
pub fn assign_by_neighbor(g: &SimpleGraph, assignment: &mut BTreeMap<String, String>) -> usize {
    let mut pending: Vec<String> = Vec::new();
    for comp in alg::components(g) {
        if comp.iter().any(|n| assignment.contains_key(n)) {
            pending.extend(comp.into_iter().filter(|n| !assignment.contains_key(n)));
        }
    }

    let mut labeled = 0;
    loop {
        let mut decided: Vec<(String, String)> = Vec::new();
        for node in &pending {
            let mut votes: BTreeMap<&str, usize> = BTreeMap::new();
            for nb in g.neighbors(node) {
                if let Some(label) = assignment.get(nb) {
                    *votes.entry(label.as_str()).or_default() += 1;
                }
            }
            if let Some(winner) = majority(&votes) {
                decided.push((node.clone(), winner.to_string()));
            }
        }
        if decided.is_empty() {
            break;
        }
        labeled += decided.len();
        for (node, label) in decided {
            assignment.insert(node, label);
        }
        pending.retain(|n| !assignment.contains_key(n));
    }
    labeled
}

fn majority<'a>(votes: &BTreeMap<&'a str, usize>) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;
    let mut tied = false;
    for (&label, &count) in votes {
        match best {
            Some((_, c)) if count == c => tied = true,
            Some((_, c)) if count < c => {}
            _ => {
                best = Some((label, count));
                tied = false;
            }
        }
    }
    if tied { None } else { best.map(|(l, _)| l) }
}

/// Region -> fill color, as read from `region_color_map.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionColors {
    pub colors: IndexMap<String, String>,
}

impl RegionColors {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Like [`RegionColors::load`], but a missing file yields an empty map.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Gives every region without a color one from the built-in palette, in order.
    pub fn fill_missing<'a, I>(&mut self, regions: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut next = 0usize;
        for region in regions {
            if region == UNKNOWN_REGION || self.colors.contains_key(region) {
                continue;
            }
            self.colors
                .insert(region.to_string(), PALETTE[next % PALETTE.len()].to_string());
            next += 1;
        }
    }

    pub fn color(&self, region: &str) -> &str {
        self.colors.get(region).map_or(DEFAULT_COLOR, String::as_str)
    }
}

/// Final region and color of every node that gets drawn.
#[derive(Debug, Clone, Default)]
pub struct NodeColoring {
    pub region: BTreeMap<String, String>,
    pub color: BTreeMap<String, String>,
}

impl NodeColoring {
    /// Seeds from region membership, then votes on the reciprocated graph and afterwards on the
    /// hub-pruned processed graph. Nodes of `undirected` still unlabeled become `Unknown`.
    pub fn build(
        undirected: &SimpleGraph,
        pruned: &SimpleGraph,
        regions: &IndexMap<String, Vec<String>>,
        colors: &RegionColors,
    ) -> Self {
        let mut region = assign_regions(regions);
        assign_by_neighbor(undirected, &mut region);
        assign_by_neighbor(&alg::to_undirected(pruned), &mut region);
        for node in undirected.nodes() {
            region
                .entry(node.to_string())
                .or_insert_with(|| UNKNOWN_REGION.to_string());
        }
        let color = region
            .iter()
            .map(|(node, r)| (node.clone(), colors.color(r).to_string()))
            .collect();
        Self { region, color }
    }

    pub fn color_of(&self, node: &str) -> &str {
        self.color.get(node).map_or(DEFAULT_COLOR, String::as_str)
    }

    pub fn region_of(&self, node: &str) -> &str {
        self.region.get(node).map_or(UNKNOWN_REGION, String::as_str)
    }
}
