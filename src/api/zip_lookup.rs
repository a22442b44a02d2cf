//! ZIP code existence lookup.
//!
//! Asks an external directory (zippopotam.us by default) whether a
//! well-formed ZIP code is real. Every failure mode, including the directory
//! being unreachable, reads as "does not exist".

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

pub const DEFAULT_ZIP_LOOKUP_BASE_URL: &str = "https://api.zippopotam.us";
pub const DEFAULT_ZIP_LOOKUP_TIMEOUT: Duration = Duration::from_millis(3_000);

#[async_trait]
pub trait ZipLookup: Send + Sync {
    /// Returns true only when the directory confirms the ZIP exists.
    async fn exists(&self, zip: &str) -> bool;
}

/// Lookup against a zippopotam-compatible `GET <base>/us/<zip>` endpoint.
pub struct ZippopotamLookup {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ZippopotamLookup {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_ZIP_LOOKUP_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            base_url,
            timeout,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ZipLookup for ZippopotamLookup {
    async fn exists(&self, zip: &str) -> bool {
        let request = self
            .client
            .get(format!("{}/us/{}", self.base_url, zip))
            .send();

        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(response)) => {
                debug!("ZIP lookup for {zip}: HTTP {}", response.status());
                response.status().is_success()
            }
            Ok(Err(e)) => {
                warn!("ZIP lookup for {zip} failed, treating as nonexistent: {e}");
                false
            }
            Err(_) => {
                warn!(
                    "ZIP lookup for {zip} timed out after {}ms, treating as nonexistent",
                    self.timeout.as_millis()
                );
                false
            }
        }
    }
}

/// Used when the existence check is switched off: every ZIP exists.
pub struct SkipLookup;

#[async_trait]
impl ZipLookup for SkipLookup {
    async fn exists(&self, zip: &str) -> bool {
        info!("ZIP existence check disabled, accepting {zip}");
        true
    }
}
