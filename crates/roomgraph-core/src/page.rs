//! Location page parsing.
//!
//! Wiki pages carry a `div.page-tags` block (`location`, `seasonal`, `rare`, ...) and, for
//! locations, an "Access Points" header followed by a list of the rooms that lead here. The list
//! may sit directly after the header's container, further up the tree, or inside a collapsible
//! block.

use crate::classify::Condition;
use crate::fetch::PageSource;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::warn;

const MAX_LIST_ASCENTS: usize = 5;
const INLINE_TEXT_THRESHOLD: usize = 4;

/// Parsed summary of a wiki page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPage {
    pub slug: String,
    pub name: String,
    pub is_location: bool,
    pub is_permanent: bool,
    /// Slugs of the rooms listed as access points (after condition filtering).
    pub links: Vec<String>,
    /// Full text of every accepted access-point list item.
    pub descriptions: Vec<String>,
}

struct Selectors {
    page_tags: Selector,
    page_content: Selector,
    strong: Selector,
    unfolded: Selector,
    folded_content: Selector,
    list: Selector,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| {
        let parse = |s: &str| Selector::parse(s).expect("static selector is valid");
        Selectors {
            page_tags: parse("div.page-tags"),
            page_content: parse("div#page-content"),
            strong: parse("strong"),
            unfolded: parse("div.collapsible-block-unfolded"),
            folded_content: parse("div.collapsible-block-content"),
            list: parse("ul"),
        }
    })
}

/// Fetches and parses `slug`.
///
/// A failed request or a page without a tag block is retried once; if the second attempt fails
/// too, a warning is logged and `None` is returned.
pub fn fetch_location<S: PageSource + ?Sized>(
    source: &mut S,
    slug: &str,
    condition: Condition,
) -> Option<LocationPage> {
    for attempt in 0..2 {
        match source.fetch(slug) {
            Ok(html) => {
                if let Some(page) = parse_location(slug, &html, condition) {
                    return Some(page);
                }
                if attempt == 0 {
                    tracing::debug!(slug, "page tags missing, retrying");
                }
            }
            Err(err) => {
                if attempt == 0 {
                    tracing::debug!(slug, error = %err, "fetch failed, retrying");
                } else {
                    warn!(slug, error = %err, "fetch failed on retry, skipping page");
                    return None;
                }
            }
        }
    }
    warn!(slug, "page tags missing after retry, skipping page");
    None
}

/// Parses a page that has already been fetched. Returns `None` when the page has no tag block,
/// which is how failed or truncated responses show up.
pub fn parse_location(slug: &str, html: &str, condition: Condition) -> Option<LocationPage> {
    let sel = selectors();
    let doc = Html::parse_document(html);

    let tags: String = doc.select(&sel.page_tags).next()?.text().collect();
    let is_location = tags.contains("location");
    let is_permanent = !(tags.contains("seasonal") || tags.contains("rare"));

    if !is_location {
        return Some(LocationPage {
            slug: slug.to_string(),
            name: format!("{slug}: N/A"),
            is_location,
            is_permanent,
            links: Vec::new(),
            descriptions: Vec::new(),
        });
    }

    let name = map_name(&doc).unwrap_or_else(|| format!("/{slug}"));
    let mut page = LocationPage {
        slug: slug.to_string(),
        name,
        is_location,
        is_permanent,
        links: Vec::new(),
        descriptions: Vec::new(),
    };

    let Some(list) = access_point_list(slug, &doc) else {
        return Some(page);
    };

    for item in list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "li")
    {
        let text: String = item.text().collect();
        if !condition.accepts(&text) {
            continue;
        }
        for link in item
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|e| e.value().name() == "a")
        {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let href = href.trim_matches('/');
            if !href.contains('.') {
                page.links.push(href.to_string());
            }
        }
        page.descriptions.push(text);
    }

    Some(page)
}

/// Locates the `ul` holding the access points. Inline sections and missing structure yield
/// `None`; the latter is logged.
fn access_point_list<'a>(slug: &str, doc: &'a Html) -> Option<ElementRef<'a>> {
    let sel = selectors();
    let Some(content) = doc.select(&sel.page_content).next() else {
        warn!(slug, "location page has no page content");
        return None;
    };
    let Some(header) = content.select(&sel.strong).find(|s| {
        s.text()
            .collect::<String>()
            .to_lowercase()
            .contains("access points")
    }) else {
        warn!(slug, "location page has no access points header");
        return None;
    };

    let mut container = header.parent().and_then(ElementRef::wrap)?;
    let container_text = container.text().collect::<String>().to_lowercase();
    let trailing = container_text
        .rsplit("access points")
        .next()
        .unwrap_or_default();
    if trailing.chars().count() > INLINE_TEXT_THRESHOLD {
        return None;
    }

    let mut list = next_element_sibling(container);
    let mut ascents = 0;
    while list.is_none() && ascents < MAX_LIST_ASCENTS {
        let Some(parent) = container.parent().and_then(ElementRef::wrap) else {
            break;
        };
        container = parent;
        list = next_element_sibling(container);
        ascents += 1;
    }
    let Some(mut list) = list else {
        warn!(slug, "access points header has no following list");
        return None;
    };

    if list.value().name() == "div" {
        let nested = list
            .select(&sel.unfolded)
            .next()
            .and_then(|e| e.select(&sel.folded_content).next())
            .and_then(|e| e.select(&sel.list).next());
        let Some(nested) = nested else {
            warn!(slug, "collapsible access points block has no list");
            return None;
        };
        list = nested;
    }
    Some(list)
}

fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Text right after the `strong` label containing "map name".
fn map_name(doc: &Html) -> Option<String> {
    let sel = selectors();
    let label = doc.select(&sel.strong).find(|s| {
        s.text()
            .collect::<String>()
            .to_lowercase()
            .contains("map name")
    })?;
    let next = label.next_sibling()?;
    let text = match next.value() {
        Node::Text(t) => {
            let s: &str = t;
            s.to_string()
        }
        Node::Element(_) => ElementRef::wrap(next)?.text().collect(),
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
