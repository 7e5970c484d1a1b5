// src/sources/mod.rs
//! Certificate Transparency search APIs that map a domain to hostnames

use crate::config::{HttpConfig, SourcesConfig};
use crate::types::{ResultSet, SourceError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub mod certspotter;
pub mod crtsh;

pub use certspotter::CertSpotterSource;
pub use crtsh::CrtShSource;

/// A CT search backend
#[async_trait]
pub trait CertSource: Send + Sync {
    /// Source name used in diagnostics (e.g., "crt.sh")
    fn name(&self) -> &str;

    /// Look up every hostname the source knows for `domain`
    async fn fetch(&self, domain: &str) -> Result<ResultSet, SourceError>;
}

/// Build the HTTP client shared by all sources
pub fn build_http_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .gzip(true);

    // No timeout unless configured
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().context("Failed to build HTTP client")
}

/// Instantiate the enabled sources in a stable order (crt.sh first)
pub fn from_config(config: &SourcesConfig, client: reqwest::Client) -> Vec<Arc<dyn CertSource>> {
    let mut sources: Vec<Arc<dyn CertSource>> = Vec::new();

    if config.crtsh {
        sources.push(Arc::new(CrtShSource::new(client.clone(), &config.crtsh_url)));
    }

    if config.certspotter {
        sources.push(Arc::new(CertSpotterSource::new(client, &config.certspotter_url)));
    }

    sources
}

/// Send a GET and decode a JSON body, classifying every failure
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, SourceError> {
    let response = request.send().await.map_err(SourceError::Transport)?;

    let status = response.status();
    debug!("{} -> {}", response.url(), status);

    if status != StatusCode::OK {
        return Err(SourceError::Status(status));
    }

    let body = response.text().await.map_err(SourceError::Transport)?;

    serde_json::from_str(&body).map_err(|e| SourceError::Malformed(e.to_string()))
}


/// In-memory source for exercising the resolver and batch layers
#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::collections::HashMap;

    pub(crate) struct StaticSource {
        name: String,
        answers: HashMap<String, Vec<String>>,
        failing: bool,
    }

    impl StaticSource {
        pub(crate) fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                answers: HashMap::new(),
                failing: false,
            }
        }

        /// Answer lookups for `domain` with `names`
        pub(crate) fn with(mut self, domain: &str, names: &[&str]) -> Self {
            self.answers.insert(
                domain.to_string(),
                names.iter().map(|n| n.to_string()).collect(),
            );
            self
        }

        /// A source that answers every lookup with HTTP 500
        pub(crate) fn failing(name: &str) -> Self {
            Self {
                name: name.to_string(),
                answers: HashMap::new(),
                failing: true,
            }
        }
    }

    #[async_trait]
    impl CertSource for StaticSource {
        fn name(&self) -> &str {
            &self.name
        }

        async fn fetch(&self, domain: &str) -> Result<ResultSet, SourceError> {
            if self.failing {
                return Err(SourceError::Status(StatusCode::INTERNAL_SERVER_ERROR));
            }

            Ok(self
                .answers
                .get(domain)
                .map(|names| names.iter().cloned().collect())
                .unwrap_or_default())
        }
    }
}
