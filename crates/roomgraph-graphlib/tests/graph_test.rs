use roomgraph_graphlib::{Graph, GraphOptions, SimpleGraph};

#[test]
fn undirected_edges_are_symmetric() {
    let mut g: Graph<(), i32> = Graph::new(GraphOptions::undirected());

    g.set_edge_with_label("b", "a", 7);

    assert!(g.has_edge("a", "b"));
    assert!(g.has_edge("b", "a"));
    assert_eq!(g.edge("a", "b"), Some(&7));
    assert_eq!(g.edge("b", "a"), Some(&7));
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn undirected_successors_predecessors_and_neighbors_are_the_same() {
    let mut g = SimpleGraph::new_undirected();
    g.set_edge("a", "b");
    g.set_edge("b", "c");

    let mut succ = g.successors("b");
    let mut pred = g.predecessors("b");
    let mut neigh = g.neighbors("b");
    succ.sort();
    pred.sort();
    neigh.sort();

    assert_eq!(succ, vec!["a", "c"]);
    assert_eq!(pred, vec!["a", "c"]);
    assert_eq!(neigh, vec!["a", "c"]);
    assert_eq!(g.out_edges("b").len(), 2);
    assert_eq!(g.in_edges("b").len(), 2);
}

#[test]
fn directed_successors_and_predecessors_respect_direction() {
    let mut g = SimpleGraph::new_directed();
    g.set_edge("a", "b");

    assert_eq!(g.successors("a"), vec!["b"]);
    assert_eq!(g.successors("b"), Vec::<&str>::new());
    assert_eq!(g.predecessors("b"), vec!["a"]);
    assert_eq!(g.predecessors("a"), Vec::<&str>::new());
    assert!(!g.has_edge("b", "a"));
}

#[test]
fn set_edge_creates_endpoints_and_ignores_duplicates() {
    let mut g = SimpleGraph::new_directed();
    g.set_edge("a", "b");
    g.set_edge("a", "b");

    assert_eq!(g.node_ids(), vec!["a", "b"]);
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn removing_a_missing_edge_is_a_noop() {
    let mut g = SimpleGraph::new_directed();
    g.set_edge("a", "b");

    assert!(!g.remove_edge("b", "a"));
    assert!(!g.remove_edge("x", "y"));
    assert_eq!(g.edge_count(), 1);
    assert!(!g.has_node("x"));

    assert!(g.remove_edge("a", "b"));
    assert!(!g.remove_edge("a", "b"));
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.node_count(), 2);
}

#[test]
fn remove_node_drops_incident_edges_and_keeps_lookups_consistent() {
    let mut g = SimpleGraph::new_directed();
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    g.set_edge("c", "a");

    assert!(g.remove_node("b"));
    assert!(!g.remove_node("b"));

    assert_eq!(g.node_ids(), vec!["a", "c"]);
    assert!(g.has_edge("c", "a"));
    assert!(!g.has_edge("a", "b"));
    assert_eq!(g.successors("c"), vec!["a"]);
    assert_eq!(g.predecessors("a"), vec!["c"]);
}

#[test]
fn degree_counts_both_directions() {
    let mut g = SimpleGraph::new_directed();
    g.set_edge("a", "b");
    g.set_edge("b", "a");
    g.set_edge("c", "b");

    assert_eq!(g.degree("b"), 3);
    assert_eq!(g.degree("missing"), 0);
    assert_eq!(g.neighbors("b"), vec!["a", "c"]);
}
