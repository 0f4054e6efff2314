//! The **abstraction** over threat-intelligence lookups.
//!
//! High-level modules depend on [`IntelSource`] only. [`InternetDbClient`] is the
//! production implementation; tests plug in fakes.
//!
//! A lookup never fails from the caller's point of view: every error is downgraded
//! to [`LookupRecord::empty`] so the remaining targets keep going.

use anyhow::Context;
use async_trait::async_trait;
use ipintel_common::config::Config;
use ipintel_common::network::target::Target;
use ipintel_common::record::LookupRecord;
use reqwest::{Client, ClientBuilder, StatusCode};
use thiserror::Error;
use tracing::debug;

/// Anything that can answer "what is known about this address".
#[async_trait]
pub trait IntelSource: Send + Sync {
    /// Queries one target. Failures come back as an empty record.
    async fn lookup(&self, target: &Target) -> LookupRecord;
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("couldn't connect to the server: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("no information available")]
    NotFound,

    #[error("server answered with {0}")]
    Status(StatusCode),

    #[error("couldn't read the data: {0}")]
    Body(#[source] reqwest::Error),

    #[error("the data is incorrect: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct InternetDbClient {
    http: Client,
    endpoint: String,
}

impl InternetDbClient {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let http = ClientBuilder::new()
            .timeout(cfg.timeout)
            .user_agent(concat!("ipintel/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, target: &Target) -> String {
        format!("{}/{}", self.endpoint, target)
    }

    /// One GET, one parse. The response is owned here and released on every return path.
    async fn fetch(&self, target: &Target) -> Result<LookupRecord, LookupError> {
        let response = self
            .http
            .get(self.url_for(target))
            .send()
            .await
            .map_err(LookupError::Transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body = response.bytes().await.map_err(LookupError::Body)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl IntelSource for InternetDbClient {
    async fn lookup(&self, target: &Target) -> LookupRecord {
        match self.fetch(target).await {
            Ok(record) => record,
            Err(e) => {
                debug!("{target}: {e}");
                LookupRecord::empty()
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
