//! In-memory content provider.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::debug;

use super::ContentProvider;
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::model::Manifest;

/// Serves canned responses keyed by location.
///
/// Locations without a response answer 404, like a static file server.
/// Requests are recorded so callers can check what was fetched.
#[derive(Debug, Default)]
pub struct StaticProvider {
    config: ProviderConfig,
    responses: HashMap<String, Response>,
    requests: RefCell<Vec<String>>,
}

#[derive(Debug, Clone)]
enum Response {
    Body(String),
    Status(u16),
}

impl StaticProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Serve `manifest` at the configured manifest location.
    pub fn with_manifest(self, manifest: &Manifest) -> Self {
        let location = self.config.manifest_location();
        // Serializing our own model types cannot fail
        let json = serde_json::to_string(manifest).unwrap_or_default();
        self.with_body(&location, json)
    }

    pub fn with_body(mut self, location: &str, body: impl Into<String>) -> Self {
        self.responses
            .insert(location.to_string(), Response::Body(body.into()));
        self
    }

    /// Answer `location` with a bare status code.
    pub fn with_status(mut self, location: &str, status: u16) -> Self {
        self.responses
            .insert(location.to_string(), Response::Status(status));
        self
    }

    /// Locations fetched so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ContentProvider for StaticProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn fetch_text(&self, location: &str) -> Result<String> {
        debug!(location, "static fetch");
        self.requests.borrow_mut().push(location.to_string());
        match self.responses.get(location) {
            Some(Response::Body(body)) => Ok(body.clone()),
            Some(Response::Status(status)) => Err(Error::Status {
                location: location.to_string(),
                status: *status,
            }),
            None => Err(Error::Status {
                location: location.to_string(),
                status: 404,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_bodies_and_statuses() {
        let provider = StaticProvider::default()
            .with_body("/a.html", "<p>A</p>")
            .with_status("/b.html", 500);

        assert_eq!(provider.fetch_text("/a.html").unwrap(), "<p>A</p>");
        assert!(matches!(
            provider.fetch_text("/b.html"),
            Err(Error::Status { status: 500, .. })
        ));
        assert!(matches!(
            provider.fetch_text("/missing.html"),
            Err(Error::Status { status: 404, .. })
        ));
        assert_eq!(
            provider.requests(),
            vec!["/a.html", "/b.html", "/missing.html"]
        );
    }

    #[test]
    fn load_manifest_roundtrips_through_json() {
        let manifest = Manifest {
            sections: vec![crate::model::Section {
                id: "s1".into(),
                title: "One".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let provider = StaticProvider::default().with_manifest(&manifest);
        assert_eq!(provider.load_manifest().unwrap(), manifest);
    }

    #[test]
    fn load_manifest_reports_bad_json() {
        let config = ProviderConfig::new();
        let location = config.manifest_location();
        let provider = StaticProvider::new(config).with_body(&location, "{ not json");
        assert!(matches!(provider.load_manifest(), Err(Error::Json(_))));
    }
}
