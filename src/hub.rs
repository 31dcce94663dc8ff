use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::catalog::CatalogClient;
use crate::config::Configuration;
use crate::error::Result;
use crate::manifest::ManifestClient;
use crate::transport::{HttpTransport, Transport};
use crate::types::Repository;

/// Catalog and manifest clients sharing one transport.
pub struct Hub<T = HttpTransport> {
    pub catalog: CatalogClient<T>,
    pub manifests: ManifestClient<T>,
}

impl<T> Clone for Hub<T> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            manifests: self.manifests.clone(),
        }
    }
}

impl Hub<HttpTransport> {
    pub fn from_config(config: &Configuration) -> Result<Self, reqwest::Error> {
        let transport = Arc::new(HttpTransport::from_config(config)?);
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> Hub<T> {
    pub fn with_transport(transport: Arc<T>, config: &Configuration) -> Self {
        Self {
            catalog: CatalogClient::new(transport.clone(), config),
            manifests: ManifestClient::new(transport, config),
        }
    }

    /// Lists `owner`'s repositories and attaches each one's `latest` manifest
    /// list, one repository at a time.
    ///
    /// The first failed manifest fetch fails the whole call. Repositories
    /// whose `latest` is a schema version 1 manifest keep no manifest list.
    pub async fn describe(
        &self,
        owner: &str,
        page_size: Option<u32>,
        updated_before: Option<DateTime<Utc>>,
    ) -> Result<Vec<Repository>> {
        let mut repos = self
            .catalog
            .list_repositories(owner, page_size, updated_before)
            .await?;

        for repo in &mut repos {
            let name = repo.repository_name();
            debug!(repository = %name, "Describing repository");
            if let Some(list) = self.manifests.fetch_manifest_list(&name).await? {
                repo.attach_manifest_list(list);
            }
        }

        Ok(repos)
    }
}
