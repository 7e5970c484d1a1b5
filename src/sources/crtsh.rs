// src/sources/crtsh.rs
//! crt.sh certificate search

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{get_json, CertSource};
use crate::types::{ResultSet, SourceError};

/// One row of crt.sh's JSON output; only the name field is used
#[derive(Debug, Deserialize)]
struct CrtShRecord {
    name_value: Option<String>,
}

/// Client for `https://crt.sh/?q=%.<domain>&output=json`
pub struct CrtShSource {
    client: reqwest::Client,
    base_url: String,
}

impl CrtShSource {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CertSource for CrtShSource {
    fn name(&self) -> &str {
        "crt.sh"
    }

    async fn fetch(&self, domain: &str) -> Result<ResultSet, SourceError> {
        let url = format!("{}/", self.base_url);
        let query = format!("%.{}", domain);

        debug!("Querying crt.sh for {}", query);

        let request = self
            .client
            .get(&url)
            .query(&[("q", query.as_str()), ("output", "json")]);

        let records: Vec<CrtShRecord> = get_json(request).await?;

        // A name_value lists one name per line (the certificate's SANs).
        // Rows without one are skipped; each name is otherwise kept verbatim.
        let names: ResultSet = records
            .iter()
            .filter_map(|record| record.name_value.as_deref())
            .flat_map(|value| value.split('\n'))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        debug!("crt.sh returned {} names for {}", names.len(), domain);
        Ok(names)
    }
}
