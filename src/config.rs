//! Content-service configuration.
//!
//! The content base URL comes from the environment (default `/content`), the
//! product id from the page query string (default `sample-product`). A
//! relative base is resolved against an origin when requests are made.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use crate::error::{Error, Result};

/// Default content base when none is configured.
pub const DEFAULT_CONTENT_BASE: &str = "/content";

/// Product loaded when the query string names none.
pub const DEFAULT_PRODUCT_ID: &str = "sample-product";

/// Environment variable overriding the content base URL.
pub const CONTENT_BASE_ENV: &str = "PIREADER_CONTENT_BASE_URL";

/// Environment variable giving the origin relative locations resolve against.
pub const ORIGIN_ENV: &str = "PIREADER_ORIGIN";

/// Characters escaped when an id is used as one URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Where the manifest and section bodies are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    base_url: String,
    product_id: String,
    origin: Option<Url>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CONTENT_BASE.to_string(),
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            origin: None,
        }
    }
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read [`CONTENT_BASE_ENV`] and [`ORIGIN_ENV`].
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(base) = std::env::var(CONTENT_BASE_ENV) {
            config = config.with_base_url(&base);
        }
        if let Ok(origin) = std::env::var(ORIGIN_ENV)
            && !origin.trim().is_empty()
        {
            config = config.with_origin(Url::parse(origin.trim())?);
        }
        Ok(config)
    }

    /// Set the content base. Trailing slashes are trimmed; a blank value
    /// keeps the default.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim();
        self.base_url = if base.is_empty() {
            DEFAULT_CONTENT_BASE.to_string()
        } else {
            base.trim_end_matches('/').to_string()
        };
        self
    }

    /// Set the product id; a blank id selects [`DEFAULT_PRODUCT_ID`].
    pub fn with_product_id(mut self, product_id: &str) -> Self {
        self.product_id = if product_id.is_empty() {
            DEFAULT_PRODUCT_ID.to_string()
        } else {
            product_id.to_string()
        };
        self
    }

    /// Take the product id from a query string such as `?productId=abc`.
    pub fn with_query(self, query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let product_id = url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "productId")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();
        self.with_product_id(&product_id)
    }

    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn origin(&self) -> Option<&Url> {
        self.origin.as_ref()
    }

    /// `{base}/products/{productId}/content.json`
    pub fn manifest_location(&self) -> String {
        format!(
            "{}/products/{}/content.json",
            self.base_url,
            encode_segment(&self.product_id)
        )
    }

    /// `{base}/products/{productId}/blocks/{sectionId}.html`
    pub fn block_location(&self, section_id: &str) -> String {
        format!(
            "{}/products/{}/blocks/{}.html",
            self.base_url,
            encode_segment(&self.product_id),
            encode_segment(section_id)
        )
    }

    /// Turn a location into an absolute URL.
    ///
    /// Absolute locations are used as-is; relative ones are joined onto the
    /// configured origin.
    pub fn resolve(&self, location: &str) -> Result<Url> {
        match Url::parse(location) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.origin {
                Some(origin) => Ok(origin.join(location)?),
                None => Err(Error::Config(format!(
                    "relative location '{location}' needs an origin (set {ORIGIN_ENV} or --origin)"
                ))),
            },
            Err(err) => Err(err.into()),
        }
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::new();
        assert_eq!(config.base_url(), "/content");
        assert_eq!(config.product_id(), "sample-product");
        assert_eq!(
            config.manifest_location(),
            "/content/products/sample-product/content.json"
        );
        assert_eq!(
            config.block_location("dosage"),
            "/content/products/sample-product/blocks/dosage.html"
        );
    }

    #[test]
    fn test_base_url_normalization() {
        let config = ProviderConfig::new().with_base_url("https://cdn.example/content///");
        assert_eq!(config.base_url(), "https://cdn.example/content");

        let config = ProviderConfig::new().with_base_url("   ");
        assert_eq!(config.base_url(), DEFAULT_CONTENT_BASE);
    }

    #[test]
    fn test_product_id_from_query() {
        let config = ProviderConfig::new().with_query("?productId=navsunli&lang=en");
        assert_eq!(config.product_id(), "navsunli");

        let config = ProviderConfig::new().with_query("lang=en");
        assert_eq!(config.product_id(), DEFAULT_PRODUCT_ID);

        let config = ProviderConfig::new().with_query("?productId=");
        assert_eq!(config.product_id(), DEFAULT_PRODUCT_ID);
    }

    #[test]
    fn test_block_ids_are_path_segments() {
        let config = ProviderConfig::new();
        assert_eq!(
            config.block_location("a/b c"),
            "/content/products/sample-product/blocks/a%2Fb%20c.html"
        );
    }

    #[test]
    fn test_resolve() {
        let config = ProviderConfig::new();
        assert!(matches!(
            config.resolve("/content/x.json"),
            Err(Error::Config(_))
        ));

        let config = config.with_origin(Url::parse("http://localhost:5173").unwrap());
        assert_eq!(
            config.resolve("/content/x.json").unwrap().as_str(),
            "http://localhost:5173/content/x.json"
        );
        assert_eq!(
            config.resolve("https://cdn.example/y.html").unwrap().as_str(),
            "https://cdn.example/y.html"
        );
    }
}
