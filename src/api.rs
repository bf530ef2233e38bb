//! HTTP client for the filename listing endpoint.
//!
//! Sends `GET {api.base_url}{api.filenames_path}` and accepts either of
//! the body shapes the backend has used:
//!
//! ```json
//! ["a.txt", "b.txt"]
//! {"filenames": ["a.txt", "b.txt"]}
//! ```
//!
//! No retries: the debug panel logs a failure and keeps its previous list.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::traits::FilenameLister;

/// [`FilenameLister`] backed by the search API.
pub struct HttpFilenameLister {
    client: reqwest::Client,
    url: String,
}

impl HttpFilenameLister {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: config.filenames_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FilenameLister for HttpFilenameLister {
    async fn fetch_filenames(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("GET {} failed", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("Filename API error {}: {}", status, body_text);
        }

        let json: serde_json::Value = response
            .json()
            .await
            .with_context(|| format!("Invalid JSON from {}", self.url))?;
        parse_filenames(&json)
    }
}

/// Extracts the filename list from a response body.
pub fn parse_filenames(json: &serde_json::Value) -> Result<Vec<String>> {
    let items = match json {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => map
            .get("filenames")
            .and_then(|f| f.as_array())
            .ok_or_else(|| anyhow::anyhow!("Invalid filename response: missing filenames array"))?,
        _ => bail!("Invalid filename response: expected an array or object"),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("Invalid filename at index {}: {}", i, item))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bare_array() {
        let names = parse_filenames(&json!(["a.txt", "b.txt"])).unwrap();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_parse_wrapped_array() {
        let names = parse_filenames(&json!({"filenames": ["report.pdf"]})).unwrap();
        assert_eq!(names, vec!["report.pdf"]);
    }

    #[test]
    fn test_parse_preserves_order_and_duplicates() {
        let names = parse_filenames(&json!(["z", "a", "z"])).unwrap();
        assert_eq!(names, vec!["z", "a", "z"]);
    }

    #[test]
    fn test_parse_rejects_non_string_entry() {
        let err = parse_filenames(&json!(["a.txt", 7])).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        assert!(parse_filenames(&json!({"files": []})).is_err());
        assert!(parse_filenames(&json!("a.txt")).is_err());
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            filenames_path: "/api/filenames".to_string(),
            timeout_secs: 5,
        };
        let lister = HttpFilenameLister::new(&config).unwrap();
        assert_eq!(lister.url(), "http://localhost:8000/api/filenames");
    }
}
