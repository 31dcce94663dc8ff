use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::auth::AuthClient;
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::transport::{Request, Transport};
use crate::types::{MANIFEST_LIST_V2, ManifestList, ManifestPayload, RepositoryName};

/// Fetches multi-architecture manifest lists from the distribution API.
///
/// Every fetch mints its own pull token first, so each call costs two
/// requests, or one when the token request fails.
pub struct ManifestClient<T> {
    transport: Arc<T>,
    auth: AuthClient<T>,
    registry_url: String,
}

impl<T> Clone for ManifestClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            auth: self.auth.clone(),
            registry_url: self.registry_url.clone(),
        }
    }
}

impl<T: Transport> ManifestClient<T> {
    pub fn new(transport: Arc<T>, config: &Configuration) -> Self {
        Self {
            auth: AuthClient::new(transport.clone(), config),
            transport,
            registry_url: config.registry_url.clone(),
        }
    }

    /// Fetches the manifest for `reference` (a tag or digest) without
    /// discarding legacy payloads.
    pub async fn fetch_manifest(
        &self,
        repository: &RepositoryName,
        reference: &str,
    ) -> Result<ManifestPayload> {
        let token = self.auth.fetch_token(repository).await?;

        let url = format!(
            "{}/v2/{}/{}/manifests/{reference}",
            self.registry_url, repository.namespace, repository.name
        );
        debug!(%repository, %url, "Fetching manifest list");

        let resp = self
            .transport
            .get(
                Request::new(url)
                    .header("Accept", MANIFEST_LIST_V2)
                    .header("Authorization", token.bearer()),
            )
            .await?;

        match resp.data.get("schemaVersion").and_then(Value::as_u64) {
            Some(1) => Ok(ManifestPayload::Legacy(resp.data)),
            Some(2) => {
                let list: ManifestList =
                    serde_json::from_value(resp.data).map_err(|source| Error::Malformed {
                        what: "manifest list",
                        source,
                    })?;
                Ok(ManifestPayload::List(list.stamp_schema_version()))
            }
            version => Err(Error::UnsupportedSchema {
                repository: repository.clone(),
                version: version.unwrap_or_default(),
            }),
        }
    }

    /// Fetches the manifest list for `reference`. Schema version 1 payloads
    /// are logged and skipped.
    pub async fn fetch_manifest_list_for(
        &self,
        repository: &RepositoryName,
        reference: &str,
    ) -> Result<Option<ManifestList>> {
        match self.fetch_manifest(repository, reference).await? {
            ManifestPayload::List(list) => Ok(Some(list)),
            ManifestPayload::Legacy(_) => {
                info!(%repository, reference, "Skipping schema version 1 manifest");
                Ok(None)
            }
        }
    }

    pub async fn fetch_manifest_list(
        &self,
        repository: &RepositoryName,
    ) -> Result<Option<ManifestList>> {
        self.fetch_manifest_list_for(repository, "latest").await
    }
}
