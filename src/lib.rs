//! Client for the Docker Hub repository catalog and the OCI distribution API.
//!
//! [`CatalogClient`] lists an owner's repositories and normalizes them into
//! [`Repository`] values. [`ManifestClient`] fetches the multi-architecture
//! manifest list for a repository, minting a pull token for every request.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hub;
pub mod manifest;
pub mod normalize;
pub mod transport;
pub mod types;


pub use auth::{AuthClient, AuthToken};
pub use catalog::CatalogClient;
pub use config::{Configuration, MAX_PAGE_SIZE};
pub use error::{Error, Result};
pub use hub::Hub;
pub use manifest::ManifestClient;
pub use normalize::normalize;
pub use transport::{HttpTransport, Request, Response, Transport, TransportError};
pub use types::{
    Architecture, Digest, Manifest, ManifestList, ManifestPayload, Platform, Repository,
    RepositoryName, RepositoryRecord, Tag,
};
