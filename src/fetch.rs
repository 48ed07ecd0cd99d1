// src/fetch.rs

//! Resource fetching.
//!
//! Pipelines talk to a `Fetch` trait so tests can substitute an in-memory
//! implementation; the production implementation joins relative resource
//! paths against the site base URL and always bypasses caches.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::HttpConfig;
use crate::error::{AppError, Result};

/// Trait for retrieving site resources by relative path.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch a resource as text, bypassing caches.
    async fn fetch_text(&self, path: &str) -> Result<String>;
}

/// Fetch a resource and parse it as JSON.
///
/// Transport failures surface as `Resource`/`Http` errors; a body that is
/// not valid JSON surfaces as a `Json` error.
pub async fn fetch_json<T: DeserializeOwned>(fetcher: &dyn Fetch, path: &str) -> Result<T> {
    let body = fetcher.fetch_text(path).await?;
    Ok(serde_json::from_str(&body)?)
}

/// HTTP-backed fetcher.
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Url,
}

impl HttpFetcher {
    /// Create a fetcher for the given site base URL.
    pub fn new(config: &HttpConfig, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base = Url::parse(base_url)?;
        Ok(Self { client, base })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.base.join(path)?;
        let response = self
            .client
            .get(url.clone())
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Resource {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// In-memory fetcher: known path → body, anything else → HTTP 404.
    pub(crate) struct StaticFetcher {
        responses: HashMap<String, String>,
        calls: AtomicUsize,
        requested: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        pub fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                responses: entries
                    .iter()
                    .map(|(path, body)| (path.to_string(), body.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn requested_paths(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetch for StaticFetcher {
        async fn fetch_text(&self, path: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().unwrap().push(path.to_string());
            self.responses
                .get(path)
                .cloned()
                .ok_or_else(|| AppError::Resource {
                    status: 404,
                    url: path.to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        assert!(HttpFetcher::new(&HttpConfig::default(), "not a url").is_err());
    }

    #[tokio::test]
    async fn fetch_json_distinguishes_parse_errors() {
        let fetcher = testing::StaticFetcher::new(&[("data/bad.json", "{ nope")]);
        let result: Result<serde_json::Value> = fetch_json(&fetcher, "data/bad.json").await;
        assert!(matches!(result, Err(AppError::Json(_))));

        let result: Result<serde_json::Value> = fetch_json(&fetcher, "data/missing.json").await;
        assert!(matches!(
            result,
            Err(AppError::Resource { status: 404, .. })
        ));
    }
}
