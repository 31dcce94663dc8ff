//! Reshapes catalog wire records into domain values.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::types::{Repository, RepositoryRecord, Tag, TagRecord};

/// Converts a snake_case key to camelCase. Keys without underscores are
/// returned unchanged.
pub fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;

    for c in key.chars() {
        if c == '_' {
            upper = !out.is_empty();
            continue;
        }

        if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }

    out
}

fn camel_case_keys(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter().map(|(k, v)| (camel_case(&k), v)).collect()
}

/// Parses an ISO-8601 timestamp. Offset-less timestamps are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.and_utc())
}

/// The recency rule: a timestamp passes a cutoff only when it is known and
/// strictly earlier. An unknown timestamp never passes.
pub fn updated_before(last_updated: Option<DateTime<Utc>>, cutoff: DateTime<Utc>) -> bool {
    match last_updated {
        Some(ts) => ts < cutoff,
        None => false,
    }
}

pub fn normalize_record(record: RepositoryRecord) -> Repository {
    Repository {
        last_updated: record.last_updated.as_deref().and_then(parse_timestamp),
        user: record.user,
        namespace: record.namespace,
        name: record.name,
        description: record.description,
        is_automated: record.is_automated,
        is_migrated: record.is_migrated,
        is_private: record.is_private,
        can_edit: record.can_edit,
        pull_count: record.pull_count,
        star_count: record.star_count,
        repository_type: record.repository_type,
        status: record.status,
        extra: camel_case_keys(record.extra),
        manifest_list: None,
    }
}

/// Normalizes a catalog page, one output per input in the same order.
///
/// With `cutoff` set, only repositories whose `last_updated` is known and
/// earlier than the cutoff are kept.
pub fn normalize(
    records: Option<Vec<RepositoryRecord>>,
    cutoff: Option<DateTime<Utc>>,
) -> Vec<Repository> {
    records
        .unwrap_or_default()
        .into_iter()
        .map(normalize_record)
        .filter(|repo| cutoff.is_none_or(|cutoff| updated_before(repo.last_updated, cutoff)))
        .collect()
}

pub fn normalize_tags(records: Option<Vec<TagRecord>>) -> Vec<Tag> {
    records
        .unwrap_or_default()
        .into_iter()
        .map(|record| Tag {
            last_updated: record.last_updated.as_deref().and_then(parse_timestamp),
            name: record.name,
            full_size: record.full_size,
            extra: camel_case_keys(record.extra),
        })
        .collect()
}
