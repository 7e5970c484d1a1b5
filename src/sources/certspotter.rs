// src/sources/certspotter.rs
//! SSLMate CertSpotter issuances API

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{get_json, CertSource};
use crate::types::{ResultSet, SourceError};

#[derive(Debug, Deserialize)]
struct Issuance {
    #[serde(default)]
    dns_names: Option<Vec<String>>,
}

/// Client for `https://api.certspotter.com/v1/issuances?domain=<domain>&expand=dns_names`
///
/// Unauthenticated requests are subject to CertSpotter's free-tier limits;
/// a 429 surfaces as a status error like any other non-200 reply.
pub struct CertSpotterSource {
    client: reqwest::Client,
    base_url: String,
}

impl CertSpotterSource {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CertSource for CertSpotterSource {
    fn name(&self) -> &str {
        "CertSpotter"
    }

    async fn fetch(&self, domain: &str) -> Result<ResultSet, SourceError> {
        let url = format!("{}/v1/issuances", self.base_url);

        debug!("Querying CertSpotter for {}", domain);

        let request = self
            .client
            .get(&url)
            .query(&[("domain", domain), ("expand", "dns_names")]);

        let issuances: Vec<Issuance> = get_json(request).await?;

        // Issuances without dns_names contribute nothing
        let names: ResultSet = issuances
            .into_iter()
            .filter_map(|issuance| issuance.dns_names)
            .flatten()
            .collect();

        debug!("CertSpotter returned {} names for {}", names.len(), domain);
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> CertSpotterSource {
        CertSpotterSource::new(reqwest::Client::new(), &server.uri())
    }

    #[tokio::test]
    async fn test_fetch_flattens_dns_names() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/issuances"))
            .and(query_param("domain", "example.com"))
            .and(query_param("expand", "dns_names"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "1", "dns_names": ["example.com", "www.example.com"] },
                { "id": "2", "dns_names": ["api.example.com", "www.example.com"] }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let names = source_for(&server).fetch("example.com").await.unwrap();

        assert_eq!(names.len(), 3);
        assert!(names.contains("example.com"));
        assert!(names.contains("www.example.com"));
        assert!(names.contains("api.example.com"));
    }

    #[tokio::test]
    async fn test_fetch_skips_issuances_without_dns_names() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/issuances"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "1" },
                { "id": "2", "dns_names": null },
                { "id": "3", "dns_names": ["vpn.example.com"] }
            ])))
            .mount(&server)
            .await;

        let names = source_for(&server).fetch("example.com").await.unwrap();

        assert_eq!(names.len(), 1);
        assert!(names.contains("vpn.example.com"));
    }

    #[tokio::test]
    async fn test_fetch_wrong_dns_names_type_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/issuances"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "1", "dns_names": "www.example.com" }
            ])))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch("example.com").await.unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[tokio::test]
    async fn test_fetch_rate_limited_is_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/issuances"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "code": "rate_limited",
                "message": "You have exceeded the domain search rate limit"
            })))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch("example.com").await.unwrap_err();
        assert!(matches!(err, SourceError::Status(s) if s == reqwest::StatusCode::TOO_MANY_REQUESTS));
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/issuances"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let source = CertSpotterSource::new(reqwest::Client::new(), &format!("{}/", server.uri()));
        assert!(source.fetch("example.com").await.unwrap().is_empty());
    }
}
