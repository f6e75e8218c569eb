#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph contains an edge with a missing endpoint: {source_id} -> {target_id}")]
    MissingEndpoint {
        source_id: String,
        target_id: String,
    },
    #[error("{name} not a recognized layout")]
    UnknownLayout { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
