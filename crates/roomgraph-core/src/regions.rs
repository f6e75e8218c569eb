//! Region index: which location pages belong to which top-level region of the wiki.

use crate::error::{Error, Result};
use crate::fetch::PageSource;
use indexmap::{IndexMap, IndexSet};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_ROOT_SLUG: &str = "locations";

/// Ordered mapping region name -> location slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionIndex {
    pub regions: IndexMap<String, Vec<String>>,
}

impl RegionIndex {
    /// Every slug of every region, deduplicated, in region order.
    pub fn seed_slugs(&self) -> Vec<String> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for slugs in self.regions.values() {
            seen.extend(slugs.iter().map(String::as_str));
        }
        seen.into_iter().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// Builds the region index from the root listing page.
///
/// The root page's first paragraph links every region. A region page that cannot be fetched is
/// logged and left out; a root page that cannot be fetched or parsed is an error.
pub fn build_region_index<S: PageSource + ?Sized>(
    source: &mut S,
    root_slug: &str,
) -> Result<RegionIndex> {
    let root_html = source.fetch(root_slug)?;
    let region_pages = region_links(root_slug, &root_html)?;

    let mut index = RegionIndex::default();
    for (name, slug) in region_pages {
        let html = match source.fetch(&slug) {
            Ok(html) => html,
            Err(err) => {
                warn!(region = %name, error = %err, "region page fetch failed, skipping region");
                continue;
            }
        };
        match location_links(&slug, &html) {
            Ok(slugs) => {
                info!(region = %name, locations = slugs.len(), "region indexed");
                index.regions.insert(name, slugs);
            }
            Err(err) => warn!(region = %name, error = %err, "region page unreadable, skipping region"),
        }
    }
    Ok(index)
}

fn page_content_selector() -> Selector {
    Selector::parse("div#page-content").expect("static selector is valid")
}

/// Region name -> region slug, from the anchors of the first paragraph of the page content.
fn region_links(slug: &str, html: &str) -> Result<Vec<(String, String)>> {
    let doc = Html::parse_document(html);
    let content = doc
        .select(&page_content_selector())
        .next()
        .ok_or_else(|| Error::MissingElement {
            slug: slug.to_string(),
            what: "page content",
        })?;
    let p = Selector::parse("p").expect("static selector is valid");
    let first = content
        .select(&p)
        .next()
        .ok_or_else(|| Error::MissingElement {
            slug: slug.to_string(),
            what: "a region paragraph",
        })?;
    let a = Selector::parse("a").expect("static selector is valid");
    Ok(first
        .select(&a)
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            Some((link.text().collect::<String>(), drop_first_char(href).to_string()))
        })
        .collect())
}

/// Internal links (hrefs containing `/`) of the page content, without the leading character,
/// deduplicated in first-seen order.
fn location_links(slug: &str, html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let content = doc
        .select(&page_content_selector())
        .next()
        .ok_or_else(|| Error::MissingElement {
            slug: slug.to_string(),
            what: "page content",
        })?;
    let a = Selector::parse("a").expect("static selector is valid");
    let mut out: IndexSet<String> = IndexSet::new();
    for link in content.select(&a) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if href.contains('/') {
            out.insert(drop_first_char(href).to_string());
        }
    }
    Ok(out.into_iter().collect())
}

fn drop_first_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}
