use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A content address such as `sha256:d0593f2b...`, following the OCI
/// `algorithm:encoded` grammar.
#[derive(Clone, Debug, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Digest {
    pub algo: String,
    pub hash: String,
}

fn valid_algorithm(algo: &str) -> bool {
    // component ([+._-] component)*, component = [a-z0-9]+
    !algo.is_empty()
        && algo
            .split(['+', '.', '_', '-'])
            .all(|c| !c.is_empty() && c.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()))
}

fn valid_encoded(hash: &str) -> bool {
    !hash.is_empty()
        && hash
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '=' | '_' | '-'))
}

impl FromStr for Digest {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (algo, hash) = s.split_once(':').ok_or("Digest is missing an algorithm")?;

        if !valid_algorithm(algo) {
            return Err("Digest algorithm is invalid");
        }

        if !valid_encoded(hash) {
            return Err("Digest encoding is invalid");
        }

        Ok(Digest {
            algo: algo.to_string(),
            hash: hash.to_string(),
        })
    }
}

// We implement this so that serde_json can parse a Digest from a straight string
impl TryFrom<String> for Digest {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// We implement this so that serde_json can serialize a Digest struct into a string
impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        format!("{}", digest)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algo, self.hash)
    }
}
