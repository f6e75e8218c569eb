use roomgraph_graphlib::{SimpleGraph, alg};
use std::collections::BTreeMap;

fn directed(edges: &[(&str, &str)]) -> SimpleGraph {
    let mut g = SimpleGraph::new_directed();
    for (v, w) in edges {
        g.set_edge(*v, *w);
    }
    g
}

#[test]
fn components_ignore_direction() {
    let mut g = directed(&[("a", "b"), ("c", "b"), ("d", "e")]);
    g.ensure_node("f");

    let mut comps: Vec<Vec<String>> = alg::components(&g)
        .into_iter()
        .map(|mut c| {
            c.sort();
            c
        })
        .collect();
    comps.sort();

    assert_eq!(
        comps,
        vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["d".to_string(), "e".to_string()],
            vec!["f".to_string()],
        ]
    );
}

#[test]
fn subgraph_keeps_only_edges_between_kept_nodes() {
    let g = directed(&[("a", "b"), ("b", "c"), ("c", "a")]);
    let sub = alg::subgraph(&g, |v| v != "c");

    assert_eq!(sub.node_ids(), vec!["a", "b"]);
    assert!(sub.has_edge("a", "b"));
    assert_eq!(sub.edge_count(), 1);
}

#[test]
fn relabel_merges_nodes_with_the_same_target() {
    let g = directed(&[("x1", "y"), ("x2", "y"), ("y", "z")]);
    let mapping: BTreeMap<String, String> = [
        ("x1".to_string(), "X".to_string()),
        ("x2".to_string(), "X".to_string()),
        ("y".to_string(), "Y".to_string()),
    ]
    .into();

    let out = alg::relabel(&g, &mapping);

    assert_eq!(out.node_ids(), vec!["X", "Y", "z"]);
    assert!(out.has_edge("X", "Y"));
    assert!(out.has_edge("Y", "z"));
    assert_eq!(out.edge_count(), 2);
}

#[test]
fn reciprocated_undirected_drops_one_way_edges() {
    let g = directed(&[("a", "b"), ("b", "a"), ("b", "c"), ("d", "e"), ("e", "d")]);
    let out = alg::reciprocated_undirected(&g);

    assert!(!out.is_directed());
    assert!(out.has_edge("a", "b"));
    assert!(out.has_edge("d", "e"));
    assert!(!out.has_edge("b", "c"));
    assert!(!out.has_node("c"));
    assert_eq!(out.edge_count(), 2);
}

#[test]
fn remove_isolates_keeps_connected_nodes() {
    let mut g = directed(&[("a", "b")]);
    g.ensure_node("lonely");

    alg::remove_isolates(&mut g);

    assert_eq!(g.node_ids(), vec!["a", "b"]);
}

#[test]
fn shortest_path_lengths_follow_direction_and_cutoff() {
    let g = directed(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]);

    let all = alg::single_source_shortest_path_length(&g, "a", None);
    assert_eq!(all.get("d"), Some(&3));

    let near = alg::single_source_shortest_path_length(&g, "a", Some(1));
    assert_eq!(near.len(), 2);
    assert_eq!(near.get("b"), Some(&1));

    assert!(alg::single_source_shortest_path_length(&g, "missing", None).is_empty());
}

#[test]
fn diameter_of_a_path_and_of_a_disconnected_graph() {
    let path = directed(&[("a", "b"), ("b", "c"), ("c", "d")]);
    assert_eq!(alg::diameter(&path), Some(3));

    let split = directed(&[("a", "b"), ("c", "d")]);
    assert_eq!(alg::diameter(&split), None);
}

#[test]
fn max_degree_node_prefers_first_on_ties() {
    let g = directed(&[("a", "b"), ("c", "d"), ("b", "e")]);
    assert_eq!(alg::max_degree_node(&g).as_deref(), Some("b"));
}

#[test]
fn subgraph_carries_edge_labels() {
    let mut g: roomgraph_graphlib::Graph<(), u32> =
        roomgraph_graphlib::Graph::new(roomgraph_graphlib::GraphOptions::directed());
    g.set_edge_with_label("a", "b", 3);
    g.set_edge_with_label("b", "c", 5);

    let sub = alg::subgraph(&g, |id| id != "c");
    assert_eq!(sub.node_ids(), vec!["a", "b"]);
    assert_eq!(sub.edge("a", "b"), Some(&3));
    assert!(!sub.has_node("c"));
}
