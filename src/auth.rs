use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::transport::{Request, Transport};
use crate::types::RepositoryName;

/// A pull token for a single repository. Tokens are short lived and are not
/// reused between requests.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

pub struct AuthClient<T> {
    transport: Arc<T>,
    auth_url: String,
    service: String,
}

impl<T> Clone for AuthClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            auth_url: self.auth_url.clone(),
            service: self.service.clone(),
        }
    }
}

impl<T: Transport> AuthClient<T> {
    pub fn new(transport: Arc<T>, config: &Configuration) -> Self {
        Self {
            transport,
            auth_url: config.auth_url.clone(),
            service: config.service.clone(),
        }
    }

    /// Requests a fresh pull token scoped to `repository`.
    pub async fn fetch_token(&self, repository: &RepositoryName) -> Result<AuthToken> {
        debug!(%repository, "Requesting pull token");

        let resp = self
            .transport
            .get(
                Request::new(&self.auth_url)
                    .param("scope", repository.pull_scope())
                    .param("service", &self.service),
            )
            .await?;

        match resp.data.get("token").and_then(|token| token.as_str()) {
            Some(token) if !token.is_empty() => Ok(AuthToken(token.to_string())),
            _ => Err(Error::Authentication {
                repository: repository.clone(),
            }),
        }
    }
}
