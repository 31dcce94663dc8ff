use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{Configuration, MAX_PAGE_SIZE};
use crate::error::{Error, Result};
use crate::normalize::{normalize, normalize_tags};
use crate::transport::{Request, Transport};
use crate::types::{Repository, RepositoryName, RepositoryRecord, Tag, TagRecord};

#[derive(Deserialize)]
struct Page<R> {
    results: Option<Vec<R>>,
}

fn validate_page_size(page_size: Option<u32>) -> Result<u32> {
    let page_size = page_size.unwrap_or(MAX_PAGE_SIZE);
    if page_size > MAX_PAGE_SIZE {
        return Err(Error::Validation {
            page_size,
            max: MAX_PAGE_SIZE,
        });
    }
    Ok(page_size)
}

/// Client for the registry's repository listing API. Only the first page is
/// ever requested.
pub struct CatalogClient<T> {
    transport: Arc<T>,
    catalog_root: String,
}

impl<T> Clone for CatalogClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            catalog_root: self.catalog_root.clone(),
        }
    }
}

impl<T: Transport> CatalogClient<T> {
    pub fn new(transport: Arc<T>, config: &Configuration) -> Self {
        Self {
            transport,
            catalog_root: config.catalog_root.clone(),
        }
    }

    async fn first_page<R: DeserializeOwned>(
        &self,
        url: String,
        page_size: u32,
        what: &'static str,
    ) -> Result<Option<Vec<R>>> {
        debug!(%url, page_size, "Querying catalog");

        // TODO: back off and retry when the catalog answers 429.
        let resp = self
            .transport
            .get(
                Request::new(url)
                    .param("page", 1)
                    .param("page_size", page_size),
            )
            .await?;

        let page: Page<R> = serde_json::from_value(resp.data)
            .map_err(|source| Error::Malformed { what, source })?;

        Ok(page.results)
    }

    /// Lists the repositories owned by `owner`.
    ///
    /// `page_size` defaults to, and may not exceed, [`MAX_PAGE_SIZE`]. With
    /// `updated_before` set only repositories last updated strictly before it
    /// are returned.
    pub async fn list_repositories(
        &self,
        owner: &str,
        page_size: Option<u32>,
        updated_before: Option<DateTime<Utc>>,
    ) -> Result<Vec<Repository>> {
        let page_size = validate_page_size(page_size)?;

        let records: Option<Vec<RepositoryRecord>> = self
            .first_page(
                format!("{}repositories/{owner}", self.catalog_root),
                page_size,
                "repository listing",
            )
            .await?;

        Ok(normalize(records, updated_before))
    }

    pub async fn list_tags(
        &self,
        repository: &RepositoryName,
        page_size: Option<u32>,
    ) -> Result<Vec<Tag>> {
        let page_size = validate_page_size(page_size)?;

        let records: Option<Vec<TagRecord>> = self
            .first_page(
                format!(
                    "{}repositories/{}/{}/tags",
                    self.catalog_root, repository.namespace, repository.name
                ),
                page_size,
                "tag listing",
            )
            .await?;

        Ok(normalize_tags(records))
    }
}
