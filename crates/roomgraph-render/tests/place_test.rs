use roomgraph_graphlib::SimpleGraph;
use roomgraph_render::{Error, PlotOptions, multi_component_layout};

fn sample() -> SimpleGraph {
    let mut g = SimpleGraph::new_undirected();
    for (v, w) in [("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")] {
        g.set_edge(v, w);
    }
    g.set_edge("x", "y");
    g.ensure_node("lonely");
    g
}

fn min_edge(g: &SimpleGraph, placement: &roomgraph_render::Placement, nodes: &[&str]) -> f64 {
    g.edges()
        .filter(|k| nodes.contains(&k.v.as_str()) && nodes.contains(&k.w.as_str()))
        .map(|k| placement.positions[&k.v].distance(placement.positions[&k.w]))
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn unknown_layout_name_is_rejected() {
    let opts = PlotOptions {
        layout: "circular".to_string(),
        ..PlotOptions::default()
    };
    let err = multi_component_layout(&sample(), &opts).unwrap_err();
    assert!(matches!(
        err,
        Error::Layout(roomgraph_layout::Error::UnknownLayout { .. })
    ));
    assert!(err.to_string().contains("circular not a recognized layout"));
}

#[test]
fn small_components_are_dropped() {
    let opts = PlotOptions {
        min_component_size: 3,
        ..PlotOptions::default()
    };
    let placement = multi_component_layout(&sample(), &opts).unwrap();
    assert_eq!(placement.positions.len(), 4);
    assert_eq!(placement.circles.len(), 1);
    assert!(!placement.contains("x"));
    assert!(!placement.contains("lonely"));
}

#[test]
fn shortest_edge_has_unit_length() {
    let g = sample();
    let placement = multi_component_layout(&g, &PlotOptions::default()).unwrap();
    assert_eq!(placement.positions.len(), 7);

    let big = min_edge(&g, &placement, &["a", "b", "c", "d"]);
    assert!((big - 1.0).abs() < 1e-6, "{big}");
    let pair = min_edge(&g, &placement, &["x", "y"]);
    assert!((pair - 1.0).abs() < 1e-6, "{pair}");
}

#[test]
fn packed_components_stay_inside_their_circles() {
    let g = sample();
    for layout in ["kamada_kawai", "spiral", "spectral", "bfs", "spring", "forceatlas2", "arf"] {
        let opts = PlotOptions {
            layout: layout.to_string(),
            ..PlotOptions::default()
        };
        let placement = multi_component_layout(&g, &opts).unwrap();
        assert_eq!(placement.circles.len(), 3, "{layout}");
        assert_eq!((placement.circles[0].x, placement.circles[0].y), (0.0, 0.0));

        for (id, p) in &placement.positions {
            assert!(p.x.is_finite() && p.y.is_finite(), "{layout}: {id}");
            let inside = placement
                .circles
                .iter()
                .any(|c| (p.x - c.x).hypot(p.y - c.y) <= c.r + 1e-6);
            assert!(inside, "{layout}: {id} at {p:?} is outside every circle");
        }
        for (i, c) in placement.circles.iter().enumerate() {
            for d in &placement.circles[i + 1..] {
                assert!((c.x - d.x).hypot(c.y - d.y) + 1e-6 >= c.r + d.r, "{layout}");
            }
        }
    }
}

#[test]
fn options_override_iterative_layouts() {
    let opts = PlotOptions {
        layout: "forceatlas2".to_string(),
        strong_gravity: true,
        max_iter: Some(7),
        ..PlotOptions::default()
    };
    match opts.algorithm().unwrap() {
        roomgraph_layout::Algorithm::ForceAtlas2(o) => {
            assert!(o.strong_gravity);
            assert_eq!(o.max_iter, 7);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn empty_graph_places_nothing() {
    let placement =
        multi_component_layout(&SimpleGraph::new_directed(), &PlotOptions::default()).unwrap();
    assert!(placement.positions.is_empty());
    assert!(placement.circles.is_empty());
}
