use roomgraph_graphlib::SimpleGraph;
use roomgraph_render::{reach_counts, render_reach_svg};

#[test]
fn reach_grows_from_the_best_connected_room() {
    let mut g = SimpleGraph::new_directed();
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    g.set_edge("b", "a");
    g.set_edge("c", "d");
    g.set_edge("x", "y");

    let series = reach_counts(&g).unwrap();
    assert_eq!(series.start, "b");
    assert_eq!(series.counts, vec![1, 3, 4, 4]);
}

#[test]
fn edge_direction_limits_reach() {
    let mut g = SimpleGraph::new_directed();
    g.set_edge("leaf", "hub");
    g.set_edge("other", "hub");
    g.set_edge("hub", "exit");

    let series = reach_counts(&g).unwrap();
    assert_eq!(series.start, "hub");
    assert_eq!(series.counts, vec![1, 2, 2]);
}

#[test]
fn empty_graph_has_no_series() {
    assert!(reach_counts(&SimpleGraph::new_directed()).is_none());
}

#[test]
fn chart_is_labeled() {
    let mut g = SimpleGraph::new_directed();
    g.set_edge("Yulgar's Inn", "Battleon");
    g.set_edge("Battleon", "Yulgar's Inn");
    let series = reach_counts(&g).unwrap();
    let svg = render_reach_svg(&series);
    assert!(svg.contains("Degrees from Yulgar&#39;s Inn"));
    assert!(svg.contains(">Locations</text>"));
    assert_eq!(svg.matches(r#"r="4""#).count(), series.counts.len());
}
