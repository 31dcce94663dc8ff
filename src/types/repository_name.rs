use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies a repository on the distribution API as `namespace/name`.
#[derive(Clone, Debug, Hash, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryName {
    pub namespace: String,
    pub name: String,
}

impl RepositoryName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Token scope granting pull access to this repository.
    pub fn pull_scope(&self) -> String {
        format!("repository:{self}:pull")
    }
}

impl FromStr for RepositoryName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((namespace, name))
                if !namespace.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(RepositoryName::new(namespace, name))
            }
            _ => Err("Repository name must be of the form namespace/name"),
        }
    }
}

// We implement this so that serde_json can parse a RepositoryName from a straight string
impl TryFrom<String> for RepositoryName {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// We implement this so that serde_json can serialize a RepositoryName struct into a string
impl From<RepositoryName> for String {
    fn from(name: RepositoryName) -> Self {
        name.to_string()
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
