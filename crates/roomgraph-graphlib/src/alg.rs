//! Graph algorithms used by the crawl post-processor and the layout pipeline.

use crate::Graph;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Connected components ignoring edge direction (weak components for directed graphs).
///
/// Components and their members are ordered by first appearance in node insertion order.
pub fn components<N, E>(g: &Graph<N, E>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
{
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut out: Vec<Vec<String>> = Vec::new();

    for start in g.node_ids() {
        if !seen.insert(start.clone()) {
            continue;
        }
        let mut comp: Vec<String> = Vec::new();
        let mut q: VecDeque<String> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            for n in g.neighbors(&v) {
                if seen.insert(n.to_string()) {
                    q.push_back(n.to_string());
                }
            }
            comp.push(v);
        }
        out.push(comp);
    }

    out
}

/// Nodes with no incident edges.
pub fn isolates<N, E>(g: &Graph<N, E>) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
{
    g.nodes()
        .filter(|v| g.degree(v) == 0)
        .map(str::to_string)
        .collect()
}

pub fn remove_isolates<N, E>(g: &mut Graph<N, E>)
where
    N: Default + 'static,
    E: Default + 'static,
{
    let isolated = isolates(g);
    g.remove_nodes(isolated.iter().map(String::as_str));
}

/// Induced subgraph on `keep`, preserving the insertion order of the source graph.
pub fn subgraph<N, E, F>(g: &Graph<N, E>, mut keep: F) -> Graph<N, E>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
    F: FnMut(&str) -> bool,
{
    let mut out: Graph<N, E> = Graph::new(g.options());
    g.for_each_node(|id, label| {
        if keep(id) {
            out.set_node(id, label.clone());
        }
    });
    g.for_each_edge(|key, label| {
        if out.has_node(&key.v) && out.has_node(&key.w) {
            out.set_edge_with_label(key.v.as_str(), key.w.as_str(), label.clone());
        }
    });
    out
}

/// Copy of `g` with node ids passed through `mapping`. Ids missing from the mapping are kept.
///
/// Nodes mapping to the same id are merged; their edges are unioned.
pub fn relabel<N, E>(g: &Graph<N, E>, mapping: &BTreeMap<String, String>) -> Graph<N, E>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
{
    let map_id = |id: &str| -> String { mapping.get(id).cloned().unwrap_or_else(|| id.to_string()) };

    let mut out: Graph<N, E> = Graph::new(g.options());
    g.for_each_node(|id, label| {
        out.set_node(map_id(id), label.clone());
    });
    g.for_each_edge(|key, label| {
        out.set_edge_with_label(map_id(&key.v), map_id(&key.w), label.clone());
    });
    out
}

/// Undirected view of `g`. Antiparallel directed edges collapse onto one undirected edge.
pub fn to_undirected<N, E>(g: &Graph<N, E>) -> Graph<N, E>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
{
    let mut out: Graph<N, E> = Graph::new_undirected();
    g.for_each_node(|id, label| {
        out.set_node(id, label.clone());
    });
    g.for_each_edge(|key, label| {
        out.set_edge_with_label(key.v.as_str(), key.w.as_str(), label.clone());
    });
    out
}

/// Undirected graph holding only the edges of `g` that exist in both directions.
///
/// Nodes without a reciprocated edge do not appear in the result.
pub fn reciprocated_undirected<N, E>(g: &Graph<N, E>) -> Graph<N, E>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
{
    let mut out: Graph<N, E> = Graph::new_undirected();
    g.for_each_edge(|key, label| {
        if g.has_edge(&key.w, &key.v) {
            out.set_edge_with_label(key.v.as_str(), key.w.as_str(), label.clone());
        }
    });
    out
}

/// Hop distances from `source` following edge direction (successors), optionally bounded by
/// `cutoff`. The source itself is at distance 0. Unknown sources yield an empty map.
pub fn single_source_shortest_path_length<N, E>(
    g: &Graph<N, E>,
    source: &str,
    cutoff: Option<usize>,
) -> BTreeMap<String, usize>
where
    N: Default + 'static,
    E: Default + 'static,
{
    let mut dist: BTreeMap<String, usize> = BTreeMap::new();
    if !g.has_node(source) {
        return dist;
    }
    dist.insert(source.to_string(), 0);
    let mut q: VecDeque<(String, usize)> = VecDeque::new();
    q.push_back((source.to_string(), 0));
    while let Some((v, d)) = q.pop_front() {
        if cutoff.is_some_and(|c| d >= c) {
            continue;
        }
        for w in g.successors(&v) {
            if !dist.contains_key(w) {
                dist.insert(w.to_string(), d + 1);
                q.push_back((w.to_string(), d + 1));
            }
        }
    }
    dist
}

/// Longest shortest path of a connected graph, ignoring edge direction.
///
/// Returns `None` for an empty graph or one that is not connected.
pub fn diameter<N, E>(g: &Graph<N, E>) -> Option<usize>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
{
    if g.node_count() == 0 {
        return None;
    }
    let undirected = if g.is_directed() {
        to_undirected(g)
    } else {
        g.clone()
    };
    let n = undirected.node_count();
    let mut best = 0usize;
    for v in undirected.nodes() {
        let dist = single_source_shortest_path_length(&undirected, v, None);
        if dist.len() != n {
            return None;
        }
        best = best.max(dist.values().copied().max().unwrap_or(0));
    }
    Some(best)
}

/// Node with the largest degree; ties go to the earliest inserted node.
pub fn max_degree_node<N, E>(g: &Graph<N, E>) -> Option<String>
where
    N: Default + 'static,
    E: Default + 'static,
{
    let mut best: Option<(&str, usize)> = None;
    for v in g.nodes() {
        let d = g.degree(v);
        if best.is_none_or(|(_, bd)| d > bd) {
            best = Some((v, d));
        }
    }
    best.map(|(v, _)| v.to_string())
}
