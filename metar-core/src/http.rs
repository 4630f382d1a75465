use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::fmt::Debug;

use crate::{Config, error::TransportError};

/// A request the fetcher wants executed. No body, no extra headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::GET, url: url.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Pluggable transport used by [`MetarFetcher`](crate::MetarFetcher).
///
/// Timeouts and cancellation are the implementation's business.
#[async_trait]
pub trait HttpClient: Send + Sync + Debug {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    http: Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// Build a client honoring the configured user agent and timeout.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let res = self.http.request(request.method, &request.url).send().await?;

        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok(HttpResponse { status, body })
    }
}
