use crate::fetch::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("page `{slug}` is missing {what}")]
    MissingElement { slug: String, what: &'static str },
    #[error("{name} not a recognized crawl condition (expected `none` or `geo`)")]
    UnknownCondition { name: String },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
