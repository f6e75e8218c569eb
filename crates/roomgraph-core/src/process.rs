//! Derived graphs built from a finished crawl.

use indexmap::IndexMap;
use roomgraph_graphlib::{SimpleGraph, alg};
use std::collections::BTreeMap;

/// Rooms whose incoming links are mostly one-way shortcuts from utility menus.
pub const DEFAULT_HUBS: [&str; 3] = ["battleon", "battleontown", "castle"];

/// Marker carried by the display name of pages that are not locations.
pub const NOT_A_LOCATION: &str = "N/A";

/// Permanent rooms only, relabeled from slug to display name, without non-location pages.
///
/// Rooms sharing a display name are merged into one node.
pub fn processed_graph(
    raw: &SimpleGraph,
    link_to_name: &IndexMap<String, String>,
    link_to_permanence: &IndexMap<String, bool>,
) -> SimpleGraph {
    let permanent = alg::subgraph(raw, |slug| {
        link_to_permanence.get(slug).copied().unwrap_or(false)
    });
    let mapping: BTreeMap<String, String> = link_to_name
        .iter()
        .map(|(slug, name)| (slug.clone(), name.clone()))
        .collect();
    let relabeled = alg::relabel(&permanent, &mapping);
    alg::subgraph(&relabeled, |name| !name.contains(NOT_A_LOCATION))
}

/// Undirected graph of the edges present in both directions.
pub fn reciprocated_graph(processed: &SimpleGraph) -> SimpleGraph {
    alg::reciprocated_undirected(processed)
}

/// For each hub present in `g`, drops incoming edges that are not matched by an outgoing edge,
/// then removes nodes left without any edge. Hubs missing from `g` are ignored.
pub fn prune_unreciprocated_hubs<'a, I>(g: &SimpleGraph, hubs: I) -> SimpleGraph
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = g.clone();
    for hub in hubs {
        if !out.has_node(hub) {
            continue;
        }
        let one_way: Vec<String> = out
            .predecessors(hub)
            .into_iter()
            .filter(|p| !out.has_edge(hub, p))
            .map(str::to_string)
            .collect();
        for p in one_way {
            out.remove_edge(&p, hub);
        }
    }
    alg::remove_isolates(&mut out);
    out
}
