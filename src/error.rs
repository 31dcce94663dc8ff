use thiserror::Error;

use crate::transport::TransportError;
use crate::types::RepositoryName;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Page size {page_size} exceeds the registry maximum of {max}")]
    Validation { page_size: u32, max: u32 },

    #[error("Unable to retrieve auth token from registry for {repository}")]
    Authentication { repository: RepositoryName },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Malformed {what} response: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest for {repository} has unsupported schema version {version}")]
    UnsupportedSchema {
        repository: RepositoryName,
        version: u64,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
