//! Blocking HTTP content provider.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use tracing::{debug, warn};

use super::ContentProvider;
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::util::{charset_from_content_type, decode_text};

const USER_AGENT: &str = concat!("pireader/", env!("CARGO_PKG_VERSION"));

/// Fetches content over HTTP(S) with caching disabled.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    config: ProviderConfig,
    client: Client,
}

impl HttpProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { config, client })
    }
}

impl ContentProvider for HttpProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn fetch_text(&self, location: &str) -> Result<String> {
        let url = self.config.resolve(location)?;
        debug!(%url, "fetching");

        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "fetch failed");
            return Err(Error::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }

        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_from_content_type)
            .map(str::to_string);
        let bytes = response.bytes()?;
        debug!(%url, bytes = bytes.len(), "fetched");

        Ok(decode_text(&bytes, charset.as_deref()).into_owned())
    }
}
