use roomgraph_core::{Condition, FetchError, PageSource, StaticPageSource, fetch_location, parse_location};
use std::path::PathBuf;

fn fixture(slug: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/wiki")
        .join(format!("{slug}.html"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

#[test]
fn plain_list_follows_header_paragraph() {
    let page = parse_location("battleon", &fixture("battleon"), Condition::None).unwrap();
    assert!(page.is_location);
    assert!(page.is_permanent);
    assert_eq!(page.name, "Battleon");
    // The external guide link contains a '.' and is dropped.
    assert_eq!(page.links, vec!["yulgar-s-inn", "oaklore", "battleontown"]);
    assert_eq!(page.descriptions.len(), 4);
}

#[test]
fn geo_condition_filters_list_items() {
    let page = parse_location("battleon", &fixture("battleon"), Condition::Geo).unwrap();
    assert_eq!(page.links, vec!["yulgar-s-inn", "battleontown"]);
    assert!(
        page.descriptions
            .iter()
            .all(|d| !d.contains("Click the button"))
    );
}

#[test]
fn collapsible_block_is_descended() {
    let page = parse_location("yulgar-s-inn", &fixture("yulgar-s-inn"), Condition::Geo).unwrap();
    assert_eq!(page.name, "Yulgar's Inn");
    assert_eq!(page.links, vec!["battleon"]);
}

#[test]
fn list_is_found_after_ascending_from_header() {
    let page = parse_location("battleontown", &fixture("battleontown"), Condition::Geo).unwrap();
    assert_eq!(page.links, vec!["battleon", "foo"]);
}

#[test]
fn inline_access_points_yield_no_links() {
    let page = parse_location("oaklore", &fixture("oaklore"), Condition::None).unwrap();
    assert!(page.is_location);
    assert!(!page.is_permanent);
    assert_eq!(page.name, "Oaklore");
    assert!(page.links.is_empty());
}

#[test]
fn blank_map_name_falls_back_to_slug() {
    let page = parse_location("unnamed-cave", &fixture("unnamed-cave"), Condition::Geo).unwrap();
    assert_eq!(page.name, "/unnamed-cave");
    assert!(!page.is_permanent);
    assert_eq!(page.links, vec!["yulgar-s-inn"]);
}

#[test]
fn non_location_pages_are_flagged_by_name() {
    let page = parse_location("foo", &fixture("foo"), Condition::Geo).unwrap();
    assert!(!page.is_location);
    assert!(page.is_permanent);
    assert_eq!(page.name, "foo: N/A");
    assert!(page.links.is_empty());
}

#[test]
fn page_without_tags_is_not_parsed() {
    assert!(parse_location("no-tags", &fixture("no-tags"), Condition::Geo).is_none());
}

#[test]
fn location_without_access_points_keeps_the_page() {
    let html = r#"<html><body><div id="page-content">
        <p><strong>Map Name:</strong> Quiet Room</p>
        </div><div class="page-tags"><span>location</span></div></body></html>"#;
    let page = parse_location("quiet-room", html, Condition::None).unwrap();
    assert_eq!(page.name, "Quiet Room");
    assert!(page.links.is_empty());
}

#[test]
fn missing_tags_are_retried_once() {
    let mut source = StaticPageSource::new().with_page("no-tags", fixture("no-tags"));
    assert!(fetch_location(&mut source, "no-tags", Condition::Geo).is_none());
    assert_eq!(source.request_log(), ["no-tags", "no-tags"]);
}

#[test]
fn transient_fetch_failure_recovers_on_retry() {
    let mut source = StaticPageSource::new().with_page("battleon", fixture("battleon"));
    source.fail_times("battleon", 1);
    let page = fetch_location(&mut source, "battleon", Condition::Geo).unwrap();
    assert_eq!(page.slug, "battleon");
    assert_eq!(source.requests(), 2);
}

#[test]
fn repeated_fetch_failure_gives_up() {
    let mut source = StaticPageSource::new();
    assert!(fetch_location(&mut source, "nowhere", Condition::Geo).is_none());
    assert_eq!(source.requests(), 2);
}

/// Serves the given responses in order, then reports every slug as missing.
struct Scripted {
    responses: Vec<Result<String, FetchError>>,
    requests: u64,
}

impl PageSource for Scripted {
    fn fetch(&mut self, slug: &str) -> Result<String, FetchError> {
        self.requests += 1;
        if self.responses.is_empty() {
            return Err(FetchError::NotFound {
                slug: slug.to_string(),
            });
        }
        self.responses.remove(0)
    }

    fn requests(&self) -> u64 {
        self.requests
    }
}

#[test]
fn missing_tags_then_fetch_failure_gives_up_after_two_requests() {
    let mut source = Scripted {
        responses: vec![Ok(fixture("no-tags"))],
        requests: 0,
    };
    assert!(fetch_location(&mut source, "no-tags", Condition::Geo).is_none());
    assert_eq!(source.requests(), 2);
}
