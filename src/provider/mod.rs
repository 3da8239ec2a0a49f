//! Content providers.
//!
//! The `ContentProvider` trait is the seam to the remote content service:
//! - **Manifest**: `{base}/products/{productId}/content.json`
//! - **Bodies**: pre-rendered HTML at a section's location
//!
//! Two implementations ship with the crate: [`HttpProvider`] (blocking HTTP,
//! behind the `http` feature) and [`StaticProvider`] (in-memory responses).

#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
mod http;
mod memory;

#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
pub use http::HttpProvider;
pub use memory::StaticProvider;

use tracing::info;

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::model::Manifest;

/// Polymorphic interface to the content service.
///
/// Every fetch bypasses caches and fails with [`Error::Status`] on a non-2xx
/// response. Nothing is retried.
///
/// [`Error::Status`]: crate::Error::Status
pub trait ContentProvider {
    /// Locations and product selection.
    fn config(&self) -> &ProviderConfig;

    /// Fetch the text at `location`.
    fn fetch_text(&self, location: &str) -> Result<String>;

    /// Fetch and parse the manifest for the configured product.
    fn load_manifest(&self) -> Result<Manifest> {
        let location = self.config().manifest_location();
        let text = self.fetch_text(&location)?;
        let manifest = Manifest::from_json(&text)?;
        info!(
            product = %manifest.product.id,
            sections = manifest.sections.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }
}

impl<P: ContentProvider + ?Sized> ContentProvider for &P {
    fn config(&self) -> &ProviderConfig {
        (**self).config()
    }

    fn fetch_text(&self, location: &str) -> Result<String> {
        (**self).fetch_text(location)
    }
}
