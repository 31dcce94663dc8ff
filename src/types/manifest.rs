use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Digest;

pub const MANIFEST_LIST_V2: &str = "application/vnd.docker.distribution.manifest.list.v2+json";

/// The architectures seen most often in Docker Hub manifest lists. Anything
/// else is carried through as [`Architecture::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Architecture {
    Amd64,
    Arm,
    Arm64,
    Other(String),
}

impl From<String> for Architecture {
    fn from(value: String) -> Self {
        match value.as_str() {
            "amd64" => Architecture::Amd64,
            "arm" => Architecture::Arm,
            "arm64" => Architecture::Arm64,
            _ => Architecture::Other(value),
        }
    }
}

impl From<Architecture> for String {
    fn from(arch: Architecture) -> Self {
        arch.to_string()
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::Amd64 => write!(f, "amd64"),
            Architecture::Arm => write!(f, "arm"),
            Architecture::Arm64 => write!(f, "arm64"),
            Architecture::Other(other) => write!(f, "{other}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub os: String,
    pub architecture: Architecture,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

/// One platform-specific entry of a manifest list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub digest: Digest,
    pub media_type: String,
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Entries rarely carry this; the list's own version is stamped in when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u64>,
}

/// A schema version 2 "fat" manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestList {
    pub schema_version: u64,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub manifests: Vec<Manifest>,
}

impl ManifestList {
    pub(crate) fn stamp_schema_version(mut self) -> Self {
        for manifest in &mut self.manifests {
            manifest.schema_version.get_or_insert(self.schema_version);
        }
        self
    }

    /// Distinct architectures, in the order they first appear.
    pub fn architectures(&self) -> Vec<&Architecture> {
        let mut seen = Vec::new();
        for manifest in &self.manifests {
            if !seen.contains(&&manifest.platform.architecture) {
                seen.push(&manifest.platform.architecture);
            }
        }
        seen
    }

    pub fn supports(&self, os: &str, architecture: &Architecture) -> bool {
        self.manifests
            .iter()
            .any(|m| m.platform.os == os && &m.platform.architecture == architecture)
    }
}

/// What a manifest request produced, before any legacy filtering.
#[derive(Clone, Debug, PartialEq)]
pub enum ManifestPayload {
    List(ManifestList),
    Legacy(Value),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> ManifestList {
        serde_json::from_str(include_str!("../../fixtures/manifest_list.json")).unwrap()
    }

    #[test]
    fn parses_fixture() {
        let list = fixture();

        assert_eq!(list.schema_version, 2);
        assert_eq!(list.media_type, MANIFEST_LIST_V2);
        assert_eq!(list.manifests.len(), 3);
        assert_eq!(list.manifests[1].platform.architecture, Architecture::Arm);
        assert_eq!(list.manifests[1].platform.variant.as_deref(), Some("v6"));
    }

    #[test]
    fn stamps_schema_version() {
        let list = fixture().stamp_schema_version();
        assert!(list.manifests.iter().all(|m| m.schema_version == Some(2)));
    }

    #[test]
    fn architectures() {
        let list = fixture();
        assert_eq!(
            list.architectures(),
            vec![&Architecture::Amd64, &Architecture::Arm, &Architecture::Arm64]
        );
        assert!(list.supports("linux", &Architecture::Arm64));
        assert!(!list.supports("windows", &Architecture::Amd64));
    }

    #[test]
    fn unknown_architecture() {
        let arch: Architecture = serde_json::from_str(r#""s390x""#).unwrap();
        assert_eq!(arch, Architecture::Other("s390x".into()));
        assert_eq!(serde_json::to_string(&arch).unwrap(), r#""s390x""#);
    }

    #[test]
    fn serializes_without_renaming() {
        let value = serde_json::to_value(fixture()).unwrap();
        assert_eq!(value["schemaVersion"], 2);
        assert_eq!(
            value["manifests"][0]["mediaType"],
            "application/vnd.docker.distribution.manifest.v2+json"
        );
        assert_eq!(value["manifests"][0]["platform"]["architecture"], "amd64");
    }

    #[test]
    fn accepts_non_hex_digests() {
        let list: ManifestList = serde_json::from_value(serde_json::json!({
            "schemaVersion": 2,
            "mediaType": MANIFEST_LIST_V2,
            "manifests": [{
                "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
                "digest": "sha256+b64u:LCa0a2j_xo_5m0U8HTBBNBNCLXBkg7-g-YpeiGJm564",
                "platform": {"architecture": "amd64", "os": "linux"}
            }]
        }))
        .unwrap();

        assert_eq!(list.manifests.len(), 1);
        assert_eq!(list.manifests[0].digest.algo, "sha256+b64u");
    }
}
