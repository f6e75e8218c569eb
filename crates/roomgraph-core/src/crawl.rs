//! Depth-bounded traversal of the wiki's access-point graph.
//!
//! Traversal is an explicit worklist. Each slug remembers the largest remaining depth budget it
//! has been expanded with; reaching it again with a larger budget re-expands it from the cached
//! link list without another request, so the final graph does not depend on visiting order.

use crate::classify::Condition;
use crate::fetch::PageSource;
use crate::page::fetch_location;
use crate::patch::PatchList;
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use roomgraph_graphlib::SimpleGraph;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};
use tracing::info;

pub const DEFAULT_EXCLUDED_STARTS: [&str; 2] = ["game-menu", "maps"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Maximum hops away from a starting room. `None` crawls until nothing new is reachable.
    pub max_depth: Option<u32>,
    /// Follow access points of seasonal and rare rooms too.
    pub pursue_impermanent: bool,
    pub condition: Condition,
    /// Seconds to wait before each request.
    pub sleep_duration: f64,
    /// 0: quiet, 1: summary, 2: one line per discovered room.
    pub verbose: u8,
    /// Index pages that are never used as starting rooms.
    pub excluded_starts: Vec<String>,
    #[serde(default = "PatchList::builtin")]
    pub patches: PatchList,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            pursue_impermanent: false,
            condition: Condition::Geo,
            sleep_duration: 1.0,
            verbose: 2,
            excluded_starts: DEFAULT_EXCLUDED_STARTS.map(str::to_string).to_vec(),
            patches: PatchList::builtin(),
        }
    }
}

impl CrawlConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.sleep_duration.max(0.0))
    }
}

/// Crawl parameters as recorded in the crawl document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlParams {
    pub starting_rooms: Vec<String>,
    pub degree: Option<u32>,
    pub pursue_impermanent: bool,
    pub condition: Condition,
    pub sleep_duration: f64,
    pub verbose: u8,
}

#[derive(Debug, Clone)]
pub struct CrawlOutput {
    pub params: CrawlParams,
    /// Wall-clock duration in seconds.
    pub crawl_time: f64,
    /// HTTP requests issued during the crawl, retries included.
    pub requests: u64,
    pub crawled_at: DateTime<Utc>,
    pub link_to_name: IndexMap<String, String>,
    pub link_to_permanence: IndexMap<String, bool>,
    /// Edge `(a, b)`: `a` is listed as an access point on `b`'s page.
    pub graph: SimpleGraph,
    /// Slugs whose page could not be fetched or parsed.
    pub failed: BTreeSet<String>,
}

impl CrawlOutput {
    pub fn visited(&self) -> usize {
        self.link_to_name.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Budget {
    Limited(u32),
    Unbounded,
}

impl Budget {
    fn from_depth(depth: Option<u32>) -> Self {
        depth.map_or(Budget::Unbounded, Budget::Limited)
    }

    /// Budget handed to access points, or `None` when expansion stops here.
    fn child(self) -> Option<Budget> {
        match self {
            Budget::Limited(0) => None,
            Budget::Limited(n) => Some(Budget::Limited(n - 1)),
            Budget::Unbounded => Some(Budget::Unbounded),
        }
    }
}

/// Mutable state of one crawl run.
#[derive(Debug, Default)]
struct TraversalContext {
    visited: IndexSet<String>,
    failed: BTreeSet<String>,
    names: IndexMap<String, String>,
    permanence: IndexMap<String, bool>,
    links: HashMap<String, Vec<String>>,
    expanded: HashMap<String, Budget>,
    graph: SimpleGraph,
}

impl TraversalContext {
    fn new() -> Self {
        Self {
            graph: SimpleGraph::new_directed(),
            ..Default::default()
        }
    }

    fn needs_expansion(&self, slug: &str, budget: Budget) -> bool {
        !self.failed.contains(slug) && self.expanded.get(slug).is_none_or(|best| *best < budget)
    }

    /// Visits every room reachable from `start` within `budget`.
    fn run<S: PageSource + ?Sized>(
        &mut self,
        source: &mut S,
        start: &str,
        budget: Budget,
        config: &CrawlConfig,
    ) {
        let mut stack: Vec<(String, Budget)> = vec![(start.to_string(), budget)];
        while let Some((room, budget)) = stack.pop() {
            if !self.needs_expansion(&room, budget) {
                continue;
            }

            if !self.visited.contains(&room) {
                let Some(page) = fetch_location(source, &room, config.condition) else {
                    self.failed.insert(room);
                    continue;
                };
                self.visited.insert(room.clone());
                self.names.insert(room.clone(), page.name);
                self.permanence.insert(room.clone(), page.is_permanent);
                self.links.insert(room.clone(), page.links);
            }
            self.expanded.insert(room.clone(), budget);

            let permanent = self.permanence.get(&room).copied().unwrap_or(false);
            if !permanent && !config.pursue_impermanent {
                continue;
            }

            let access_points = self.links.get(&room).cloned().unwrap_or_default();
            for ap in &access_points {
                self.graph.set_edge(ap.as_str(), room.as_str());
            }

            let Some(child) = budget.child() else {
                continue;
            };
            let mut pushed: BTreeSet<&str> = BTreeSet::new();
            for ap in access_points.iter().rev() {
                if pushed.insert(ap.as_str()) && self.needs_expansion(ap, child) {
                    if config.verbose > 1 {
                        info!("[{}] {}<={}", self.visited.len(), room, ap);
                    }
                    stack.push((ap.clone(), child));
                }
            }
        }
    }
}

/// Crawls outward from `starting_slugs` and applies the configured patch list to the result.
pub fn crawl<S: PageSource + ?Sized>(
    source: &mut S,
    starting_slugs: &[String],
    config: &CrawlConfig,
) -> CrawlOutput {
    let started = Instant::now();
    let crawled_at = Utc::now();
    let requests_before = source.requests();
    let budget = Budget::from_depth(config.max_depth);

    let mut ctx = TraversalContext::new();
    for start in starting_slugs {
        // A start already expanded with the full budget has nothing left to contribute.
        if config.excluded_starts.iter().any(|x| x == start) || !ctx.needs_expansion(start, budget)
        {
            continue;
        }
        ctx.run(source, start, budget, config);
    }

    let crawl_time = started.elapsed().as_secs_f64();
    let requests = source.requests() - requests_before;
    if config.verbose > 0 {
        info!("{requests} webpages crawled.");
        let degree = config
            .max_depth
            .map_or_else(|| "inf".to_string(), |d| d.to_string());
        info!("Crawl of degree {degree} complete in {crawl_time:.2} seconds.");
    }

    let removed = config.patches.apply(&mut ctx.graph);
    tracing::debug!(
        added = config.patches.add.len(),
        removed,
        "applied graph patches"
    );

    CrawlOutput {
        params: CrawlParams {
            starting_rooms: starting_slugs.to_vec(),
            degree: config.max_depth,
            pursue_impermanent: config.pursue_impermanent,
            condition: config.condition,
            sleep_duration: config.sleep_duration,
            verbose: config.verbose,
        },
        crawl_time,
        requests,
        crawled_at,
        link_to_name: ctx.names,
        link_to_permanence: ctx.permanence,
        graph: ctx.graph,
        failed: ctx.failed,
    }
}
