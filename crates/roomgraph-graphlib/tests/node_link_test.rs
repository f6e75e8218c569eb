use roomgraph_graphlib::{NodeLinkData, SimpleGraph};

fn sorted_edges(g: &SimpleGraph) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = g.edges().map(|k| (k.v.clone(), k.w.clone())).collect();
    out.sort();
    out
}

#[test]
fn node_link_round_trip_preserves_nodes_and_edges() {
    let mut g = SimpleGraph::new_directed();
    g.set_edge("mobius", "greenguard-west");
    g.set_edge("greenguard-west", "mobius");
    g.set_edge("battleon", "yulgar");
    g.ensure_node("isolated");

    let doc = NodeLinkData::from_graph(&g);
    let text = serde_json::to_string(&doc).expect("serialize");
    let parsed: NodeLinkData = serde_json::from_str(&text).expect("parse");
    let back: SimpleGraph = parsed.to_graph();

    assert!(back.is_directed());
    assert_eq!(back.node_ids(), g.node_ids());
    assert_eq!(sorted_edges(&back), sorted_edges(&g));
}

#[test]
fn node_link_accepts_links_key_and_undirected_graphs() {
    let text = r#"{
        "directed": false,
        "nodes": [{"id": "a"}, {"id": "b"}],
        "links": [{"source": "b", "target": "a"}]
    }"#;
    let parsed: NodeLinkData = serde_json::from_str(text).expect("parse");
    let g: SimpleGraph = parsed.to_graph();

    assert!(!g.is_directed());
    assert!(g.has_edge("a", "b"));
    assert_eq!(g.edge_count(), 1);
}
