use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TagRecord {
    pub name: String,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub full_size: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Tag {
    pub name: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub full_size: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
