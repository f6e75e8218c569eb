use roomgraph_core::{
    Condition, CrawlConfig, EdgePatch, PageSource, PatchList, StaticPageSource, crawl,
};
use std::path::PathBuf;

fn wiki() -> StaticPageSource {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/wiki");
    let mut source = StaticPageSource::new();
    for entry in std::fs::read_dir(&dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|e| e == "html") {
            let slug = path.file_stem().unwrap().to_string_lossy().into_owned();
            source.insert(slug, std::fs::read_to_string(&path).unwrap());
        }
    }
    source
}

fn config(max_depth: Option<u32>, condition: Condition) -> CrawlConfig {
    CrawlConfig {
        max_depth,
        condition,
        sleep_duration: 0.0,
        verbose: 0,
        patches: PatchList::default(),
        ..Default::default()
    }
}

fn starts(slugs: &[&str]) -> Vec<String> {
    slugs.iter().map(|s| s.to_string()).collect()
}

#[test]
fn depth_zero_fetches_only_the_start() {
    let mut source = wiki();
    let out = crawl(&mut source, &starts(&["battleon"]), &config(Some(0), Condition::Geo));

    assert_eq!(out.requests, 1);
    assert_eq!(source.request_log(), ["battleon"]);
    assert_eq!(out.visited(), 1);
    let mut edges: Vec<(String, String)> = out
        .graph
        .edges()
        .map(|k| (k.v.clone(), k.w.clone()))
        .collect();
    edges.sort();
    assert_eq!(
        edges,
        vec![
            ("battleontown".to_string(), "battleon".to_string()),
            ("yulgar-s-inn".to_string(), "battleon".to_string()),
        ]
    );
}

#[test]
fn unbounded_geo_crawl_reaches_everything_connected() {
    let mut source = wiki();
    let out = crawl(&mut source, &starts(&["battleon"]), &config(None, Condition::Geo));

    let mut visited: Vec<&str> = out.link_to_name.keys().map(String::as_str).collect();
    visited.sort();
    assert_eq!(visited, ["battleon", "battleontown", "foo", "yulgar-s-inn"]);
    assert_eq!(out.link_to_name["foo"], "foo: N/A");
    assert_eq!(out.requests, out.visited() as u64);

    let g = &out.graph;
    assert!(g.is_directed());
    assert!(g.has_edge("yulgar-s-inn", "battleon"));
    assert!(g.has_edge("battleon", "yulgar-s-inn"));
    assert!(g.has_edge("battleontown", "battleon"));
    assert!(g.has_edge("battleon", "battleontown"));
    assert!(g.has_edge("foo", "battleontown"));
    assert!(!g.has_edge("oaklore", "battleon"));
    assert_eq!(g.edge_count(), 5);
}

#[test]
fn no_condition_follows_ui_links_but_not_impermanent_rooms() {
    let mut source = wiki();
    let out = crawl(
        &mut source,
        &starts(&["battleon", "unnamed-cave"]),
        &config(None, Condition::None),
    );

    assert!(out.graph.has_edge("oaklore", "battleon"));
    assert!(!out.link_to_permanence["oaklore"]);
    // Seasonal page is recorded but contributes no edges.
    assert!(!out.link_to_permanence["unnamed-cave"]);
    assert_eq!(out.link_to_name["unnamed-cave"], "/unnamed-cave");
    assert!(!out.graph.has_node("unnamed-cave"));
}

#[test]
fn pursuing_impermanent_rooms_adds_their_edges() {
    let mut source = wiki();
    let cfg = CrawlConfig {
        pursue_impermanent: true,
        ..config(Some(0), Condition::Geo)
    };
    let out = crawl(&mut source, &starts(&["unnamed-cave"]), &cfg);
    assert!(out.graph.has_edge("yulgar-s-inn", "unnamed-cave"));
    assert!(!out.graph.has_edge("battleon", "unnamed-cave"));
}

#[test]
fn excluded_and_repeated_starts_are_skipped() {
    let mut source = wiki();
    let out = crawl(
        &mut source,
        &starts(&["game-menu", "maps", "battleon", "yulgar-s-inn", "battleon"]),
        &config(None, Condition::Geo),
    );
    assert!(!source.request_log().iter().any(|s| s == "game-menu" || s == "maps"));
    assert_eq!(out.params.starting_rooms.len(), 5);
    assert_eq!(out.requests, 4);
}

#[test]
fn pages_are_never_fetched_twice() {
    let mut source = wiki();
    let slugs = starts(&["battleon", "battleontown", "yulgar-s-inn", "oaklore", "foo"]);
    crawl(&mut source, &slugs, &config(None, Condition::None));

    let mut log = source.request_log().to_vec();
    let total = log.len();
    log.sort();
    log.dedup();
    assert_eq!(log.len(), total);
}

#[test]
fn failed_pages_are_dropped_and_not_visited() {
    let mut source = wiki();
    source.fail_times("battleontown", 2);
    let out = crawl(&mut source, &starts(&["battleon"]), &config(None, Condition::Geo));

    assert!(out.failed.contains("battleontown"));
    assert!(!out.link_to_name.contains_key("battleontown"));
    // Two attempts for the failed page on top of one per visited page.
    assert_eq!(out.requests, out.visited() as u64 + 2);
    // Edges listed on battleon's own page remain.
    assert!(out.graph.has_edge("battleontown", "battleon"));
    assert!(!out.graph.has_edge("foo", "battleontown"));
}

#[test]
fn revisiting_with_larger_budget_uses_cached_links() {
    // yulgar-s-inn is expanded first with budget 0 (via battleon) and later with budget 1
    // (directly from the start), which must not fetch it again.
    let mut source = wiki();
    let cfg = CrawlConfig {
        pursue_impermanent: true,
        ..config(Some(2), Condition::None)
    };
    let out = crawl(&mut source, &starts(&["unnamed-cave"]), &cfg);

    let mut visited: Vec<&str> = out.link_to_name.keys().map(String::as_str).collect();
    visited.sort();
    assert_eq!(
        visited,
        ["battleon", "battleontown", "oaklore", "unnamed-cave", "yulgar-s-inn"]
    );
    assert_eq!(out.requests, 5);
    let yulgar_fetches = source
        .request_log()
        .iter()
        .filter(|s| s.as_str() == "yulgar-s-inn")
        .count();
    assert_eq!(yulgar_fetches, 1);
    assert!(out.graph.has_edge("battleon", "yulgar-s-inn"));
    assert!(out.graph.has_edge("oaklore", "battleon"));
}

#[test]
fn patches_apply_after_traversal() {
    let mut source = wiki();
    let cfg = CrawlConfig {
        patches: PatchList {
            add: vec![EdgePatch::new("mobius", "greenguard-west")],
            remove: vec![
                EdgePatch::new("battleontown", "battleon"),
                EdgePatch::new("nowhere", "battleon"),
            ],
        },
        ..config(Some(0), Condition::Geo)
    };
    let out = crawl(&mut source, &starts(&["battleon"]), &cfg);
    assert!(out.graph.has_edge("mobius", "greenguard-west"));
    assert!(!out.graph.has_edge("battleontown", "battleon"));
    assert!(out.graph.has_edge("yulgar-s-inn", "battleon"));
    // Patched-in rooms are never fetched.
    assert_eq!(source.requests(), 1);
}

#[test]
fn visit_order_does_not_change_the_graph() {
    let cfg = config(Some(1), Condition::Geo);
    let mut a = wiki();
    let out_a = crawl(&mut a, &starts(&["battleon", "battleontown"]), &cfg);
    let mut b = wiki();
    let out_b = crawl(&mut b, &starts(&["battleontown", "battleon"]), &cfg);

    let edges = |g: &roomgraph_graphlib::SimpleGraph| {
        let mut e: Vec<(String, String)> =
            g.edges().map(|k| (k.v.clone(), k.w.clone())).collect();
        e.sort();
        e
    };
    assert_eq!(edges(&out_a.graph), edges(&out_b.graph));
    let mut va: Vec<_> = out_a.link_to_name.keys().cloned().collect();
    let mut vb: Vec<_> = out_b.link_to_name.keys().cloned().collect();
    va.sort();
    vb.sort();
    assert_eq!(va, vb);
}
