use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ManifestList, RepositoryName};

/// One entry of the catalog's `results` array, exactly as the registry sends it.
///
/// Everything but `namespace` and `name` may be left out by the registry and
/// stays `None` rather than picking up a default.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RepositoryRecord {
    pub user: Option<String>,
    pub namespace: String,
    pub name: String,
    pub description: Option<String>,
    pub is_automated: Option<bool>,
    pub is_migrated: Option<bool>,
    pub is_private: Option<bool>,
    pub can_edit: Option<bool>,
    pub last_updated: Option<String>,
    pub pull_count: Option<u64>,
    pub star_count: Option<u64>,
    pub repository_type: Option<String>,
    pub status: Option<i64>,
    /// Fields this crate does not model, keyed as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A catalog entry after normalization.
///
/// Only [`crate::normalize`] builds these. Unmodelled wire fields are kept in
/// `extra` with camelCase keys.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Repository {
    pub user: Option<String>,
    pub namespace: String,
    pub name: String,
    pub description: Option<String>,
    pub is_automated: Option<bool>,
    pub is_migrated: Option<bool>,
    pub is_private: Option<bool>,
    pub can_edit: Option<bool>,
    pub last_updated: Option<DateTime<Utc>>,
    pub pull_count: Option<u64>,
    pub star_count: Option<u64>,
    pub repository_type: Option<String>,
    pub status: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_list: Option<ManifestList>,
}

impl Repository {
    pub fn repository_name(&self) -> RepositoryName {
        RepositoryName::new(&self.namespace, &self.name)
    }

    pub fn attach_manifest_list(&mut self, manifest_list: ManifestList) {
        self.manifest_list = Some(manifest_list);
    }
}
