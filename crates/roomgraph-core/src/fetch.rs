//! Page sources: where raw wiki HTML comes from.
//!
//! The crawler only sees the [`PageSource`] trait. [`HttpPageSource`] talks to the live wiki with
//! a politeness delay before every request; [`StaticPageSource`] serves in-memory pages for tests
//! and offline runs.

use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://aqwwiki.wikidot.com";

const USER_AGENT: &str = concat!("roomgraph/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("invalid page url: {0}")]
    Url(#[from] url::ParseError),
    #[error("no page stored for `{slug}`")]
    NotFound { slug: String },
}

/// Source of wiki pages, addressed by slug.
pub trait PageSource {
    /// Fetches the HTML of `<base>/<slug>`. Every call counts as one request.
    fn fetch(&mut self, slug: &str) -> Result<String, FetchError>;

    /// Number of requests issued so far, failed ones included.
    fn requests(&self) -> u64;
}

impl<T: PageSource + ?Sized> PageSource for &mut T {
    fn fetch(&mut self, slug: &str) -> Result<String, FetchError> {
        (**self).fetch(slug)
    }

    fn requests(&self) -> u64 {
        (**self).requests()
    }
}

/// Blocking HTTP page source.
#[derive(Debug)]
pub struct HttpPageSource {
    client: reqwest::blocking::Client,
    base: String,
    delay: Duration,
    requests: u64,
}

impl HttpPageSource {
    pub fn new(base: impl Into<String>, delay: Duration) -> Result<Self, FetchError> {
        let base = base.into();
        let url = base.clone();
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| FetchError::Http { url, source })?;
        Ok(Self {
            client,
            base,
            delay,
            requests: 0,
        })
    }

    pub fn page_url(&self, slug: &str) -> Result<Url, FetchError> {
        Ok(Url::parse(&format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            slug
        ))?)
    }
}

impl PageSource for HttpPageSource {
    fn fetch(&mut self, slug: &str) -> Result<String, FetchError> {
        let url = self.page_url(slug)?;
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.requests += 1;
        debug!(url = %url, request = self.requests, "GET");

        let http_err = |source| FetchError::Http {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url.clone()).send().map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(http_err)
    }

    fn requests(&self) -> u64 {
        self.requests
    }
}

/// In-memory page source keyed by slug.
///
/// Slugs registered with [`StaticPageSource::fail_times`] fail that many times before being
/// served, which exercises the retry path.
#[derive(Debug, Clone, Default)]
pub struct StaticPageSource {
    pages: BTreeMap<String, String>,
    failures: BTreeMap<String, u32>,
    requests: u64,
    log: Vec<String>,
}

impl StaticPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, slug: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(slug, html);
        self
    }

    pub fn insert(&mut self, slug: impl Into<String>, html: impl Into<String>) {
        self.pages.insert(slug.into(), html.into());
    }

    pub fn fail_times(&mut self, slug: impl Into<String>, times: u32) {
        self.failures.insert(slug.into(), times);
    }

    /// Slugs in the order they were requested.
    pub fn request_log(&self) -> &[String] {
        &self.log
    }
}

impl PageSource for StaticPageSource {
    fn fetch(&mut self, slug: &str) -> Result<String, FetchError> {
        self.requests += 1;
        self.log.push(slug.to_string());
        if let Some(left) = self.failures.get_mut(slug) {
            if *left > 0 {
                *left -= 1;
                return Err(FetchError::NotFound {
                    slug: slug.to_string(),
                });
            }
        }
        self.pages
            .get(slug)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                slug: slug.to_string(),
            })
    }

    fn requests(&self) -> u64 {
        self.requests
    }
}
