//! Section bodies fetched from the content service.
//!
//! An [`ExternalBody`] is mounted for one location. Loading takes a
//! [`LoadTicket`]; a result is applied only while the ticket is still live,
//! i.e. the body was neither unmounted nor retargeted in between. Once the
//! markup is loaded its table wrappers get a [`ShadowScope`].

use tracing::{debug, warn};

use super::html::escape_html;
use super::shadows::{ContainerKey, ShadowRegistry, ShadowScope};
use crate::error::{Error, Result};
use crate::model::BodyFormat;
use crate::provider::ContentProvider;

/// Load state of an external body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyState {
    Loading,
    Loaded(String),
    Failed(String),
}

/// Mount generations. Revoking invalidates every ticket issued before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Liveness {
    generation: u64,
    mounted: bool,
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            generation: 1,
            mounted: true,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Start a new mount, invalidating outstanding tickets.
    pub fn remount(&mut self) {
        self.generation += 1;
        self.mounted = true;
    }

    /// Tear down the current mount.
    pub fn revoke(&mut self) {
        self.generation += 1;
        self.mounted = false;
    }

    fn issue(&self, location: &str) -> LoadTicket {
        LoadTicket {
            location: location.to_string(),
            generation: self.generation,
        }
    }

    fn accepts(&self, ticket: &LoadTicket, location: &str) -> bool {
        self.mounted && ticket.generation == self.generation && ticket.location == location
    }
}

/// Proof that a load was started for a given mount and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    location: String,
    generation: u64,
}

impl LoadTicket {
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// A body whose HTML is fetched from `location`.
#[derive(Debug)]
pub struct ExternalBody {
    location: String,
    format: BodyFormat,
    state: BodyState,
    liveness: Liveness,
    registry: ShadowRegistry,
    shadows: Option<ShadowScope>,
}

impl ExternalBody {
    pub fn new(location: impl Into<String>, format: BodyFormat) -> Self {
        Self {
            location: location.into(),
            format,
            state: BodyState::Loading,
            liveness: Liveness::new(),
            registry: ShadowRegistry::default(),
            shadows: None,
        }
    }

    /// Track shadow scopes in `registry` instead of a private one.
    pub fn with_registry(mut self, registry: ShadowRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn format(&self) -> &BodyFormat {
        &self.format
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.liveness.is_mounted()
    }

    pub fn shadows(&self) -> Option<&ShadowScope> {
        self.shadows.as_ref()
    }

    pub fn shadows_mut(&mut self) -> Option<&mut ShadowScope> {
        self.shadows.as_mut()
    }

    /// Start a load for the current location.
    ///
    /// Returns `None` when there is nothing to fetch: the body is unmounted,
    /// or its format is not HTML, in which case it fails right away.
    pub fn begin(&mut self) -> Option<LoadTicket> {
        if !self.liveness.is_mounted() {
            return None;
        }
        self.state = BodyState::Loading;
        self.shadows = None;
        if self.format != BodyFormat::Html {
            let err = Error::UnsupportedFormat(self.format.to_string());
            warn!(location = %self.location, format = %self.format, "unsupported body format");
            self.state = BodyState::Failed(err.to_string());
            return None;
        }
        Some(self.liveness.issue(&self.location))
    }

    /// Apply the outcome of a load. Returns `false` if the ticket is stale
    /// and the result was discarded.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<String>) -> bool {
        if !self.liveness.accepts(&ticket, &self.location) {
            debug!(location = %ticket.location, "discarding stale body load");
            return false;
        }
        match result {
            Ok(html) => {
                let key = ContainerKey {
                    location: self.location.clone(),
                    mount: self.liveness.generation(),
                };
                self.shadows = Some(self.registry.attach(key, &html));
                self.state = BodyState::Loaded(html);
            }
            Err(err) => {
                warn!(location = %self.location, error = %err, "body load failed");
                self.state = BodyState::Failed(err.to_string());
            }
        }
        true
    }

    /// Fetch the body through `provider`.
    pub fn load<P: ContentProvider + ?Sized>(&mut self, provider: &P) {
        if let Some(ticket) = self.begin() {
            let result = provider.fetch_text(ticket.location());
            self.finish(ticket, result);
        }
    }

    /// Point the body at another location, dropping the current content.
    pub fn retarget(&mut self, location: impl Into<String>, format: BodyFormat) {
        self.location = location.into();
        self.format = format;
        self.state = BodyState::Loading;
        self.shadows = None;
        self.liveness.remount();
    }

    /// Tear the body down. Pending loads are discarded.
    pub fn unmount(&mut self) {
        self.liveness.revoke();
        self.shadows = None;
    }

    pub fn render(&self) -> String {
        match &self.state {
            BodyState::Loading => "<p>Loading content…</p>".to_string(),
            BodyState::Failed(message) => format!("<p>Error: {}</p>", escape_html(message)),
            BodyState::Loaded(html) => format!("<div class=\"external-body\">{html}</div>"),
        }
    }
}

impl Drop for ExternalBody {
    fn drop(&mut self) {
        self.unmount();
    }
}
