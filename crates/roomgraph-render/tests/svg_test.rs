use roomgraph_graphlib::SimpleGraph;
use roomgraph_render::{
    Elements, NodeColoring, PlotOptions, SvgOptions, multi_component_layout, render_graph_svg,
};

fn coloring(pairs: &[(&str, &str, &str)]) -> NodeColoring {
    let mut c = NodeColoring::default();
    for (node, region, color) in pairs {
        c.region.insert(node.to_string(), region.to_string());
        c.color.insert(node.to_string(), color.to_string());
    }
    c
}

fn directed() -> SimpleGraph {
    let mut g = SimpleGraph::new_directed();
    g.set_edge("Battleon", "Yulgar's Inn");
    g.set_edge("Yulgar's Inn", "Battleon");
    g.set_edge("Battleon", "<Cellar>");
    g.set_edge("Far", "Away");
    g
}

#[test]
fn directed_graphs_get_arrow_heads() {
    let g = directed();
    let placement = multi_component_layout(&g, &PlotOptions::default()).unwrap();
    let svg = render_graph_svg(&g, &placement, &NodeColoring::default(), &SvgOptions::default());

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r#"<marker id="arrow""#));
    assert_eq!(svg.matches("marker-end=\"url(#arrow)\"").count(), 4);
    assert_eq!(svg.matches("<circle ").count(), 5);
    assert!(svg.contains("Yulgar&#39;s Inn"));
    assert!(svg.contains("&lt;Cellar&gt;"));
    assert!(!svg.contains("<Cellar>"));
}

#[test]
fn undirected_graphs_have_plain_edges_and_region_fills() {
    let mut g = SimpleGraph::new_undirected();
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    let placement = multi_component_layout(&g, &PlotOptions::default()).unwrap();
    let colors = coloring(&[("a", "North", "gold"), ("b", "North", "gold")]);
    let svg = render_graph_svg(&g, &placement, &colors, &SvgOptions::default());

    assert!(!svg.contains("marker"));
    assert_eq!(svg.matches("<line ").count(), 2);
    assert_eq!(svg.matches(r#"fill="gold""#).count(), 2);
    assert_eq!(svg.matches(r#"fill="lightblue""#).count(), 1);
}

#[test]
fn only_placed_nodes_are_drawn() {
    let g = directed();
    let opts = PlotOptions {
        min_component_size: 3,
        ..PlotOptions::default()
    };
    let placement = multi_component_layout(&g, &opts).unwrap();
    let svg = render_graph_svg(
        &g,
        &placement,
        &NodeColoring::default(),
        &SvgOptions {
            with_labels: false,
            ..SvgOptions::default()
        },
    );
    assert_eq!(svg.matches("<circle ").count(), 3);
    assert_eq!(svg.matches("<line ").count(), 3);
    assert!(!svg.contains(">Far<"));
    assert!(!svg.contains("<text"));
}

#[test]
fn empty_placement_still_renders_a_document() {
    let g = SimpleGraph::new_undirected();
    let placement = multi_component_layout(&g, &PlotOptions::default()).unwrap();
    let svg = render_graph_svg(&g, &placement, &NodeColoring::default(), &SvgOptions::default());
    assert!(svg.contains("viewBox=\"-48 -48 96 96\""));
    assert!(!svg.contains("<circle"));
}

#[test]
fn elements_carry_positions_and_regions() {
    let g = directed();
    let opts = PlotOptions {
        min_component_size: 3,
        ..PlotOptions::default()
    };
    let placement = multi_component_layout(&g, &opts).unwrap();
    let colors = coloring(&[("Battleon", "Battleon", "gold")]);
    let elements = Elements::build(&g, &placement, &colors);

    assert!(elements.directed);
    assert_eq!(elements.nodes.len(), 3);
    assert_eq!(elements.edges.len(), 3);
    let battleon = elements
        .nodes
        .iter()
        .find(|n| n.data.id == "Battleon")
        .unwrap();
    assert_eq!(battleon.data.color, "gold");
    assert_eq!(battleon.data.label, "Battleon");
    let cellar = elements
        .nodes
        .iter()
        .find(|n| n.data.id == "<Cellar>")
        .unwrap();
    assert_eq!(cellar.data.region, "Unknown");
    assert_eq!(cellar.data.color, "lightblue");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("elements.json");
    elements.save(&path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(value["nodes"][0]["position"]["x"].is_number());
    assert_eq!(value["edges"][0]["data"]["source"], "Battleon");
}

#[test]
fn fill_colors_are_escaped() {
    let mut g = SimpleGraph::new_undirected();
    g.set_edge("a", "b");
    let placement = multi_component_layout(&g, &PlotOptions::default()).unwrap();
    let colors = coloring(&[("a", "North", r#"red" onload="x"#)]);
    let svg = render_graph_svg(&g, &placement, &colors, &SvgOptions::default());

    assert!(svg.contains(r#"fill="red&quot; onload=&quot;x""#));
    assert!(!svg.contains(r#"onload="x""#));
}
