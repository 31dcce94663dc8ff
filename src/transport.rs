use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Configuration;

/// A GET request as seen by a [`Transport`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, key: &str, value: impl ToString) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub data: Value,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("Response from {url} was not valid JSON: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Issues GET requests on behalf of the registry clients.
///
/// Implementations decide what counts as a failure; [`HttpTransport`] treats
/// any non-2xx status as one.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Configuration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self::new(client))
    }
}

impl Transport for HttpTransport {
    async fn get(&self, request: Request) -> Result<Response, TransportError> {
        debug!(url = %request.url, params = ?request.params, "GET");

        let mut builder = self.client.get(&request.url).query(&request.params);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        let resp = builder
            .send()
            .await
            .map_err(|source| TransportError::Network {
                url: request.url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: request.url,
                status: status.as_u16(),
            });
        }

        let data = resp
            .json::<Value>()
            .await
            .map_err(|source| TransportError::Body {
                url: request.url.clone(),
                source,
            })?;

        Ok(Response {
            status: status.as_u16(),
            data,
        })
    }
}
