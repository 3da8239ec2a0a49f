//! Body renderers.
//!
//! - [`SectionBody`]: inline markup, collapsed to a preview when long
//! - [`ExternalBody`]: markup fetched from the content service
//! - [`shadows`]: scroll indicators for wide tables in loaded bodies
//! - [`html_to_text`]: terminal rendering of any reader markup
//!
//! Provider markup is trusted and emitted without sanitization.

mod body;
mod dom;
mod external;
mod html;
pub mod shadows;
mod text;

pub use body::{ELLIPSIS, SectionBody, TRUNCATE_AT};
pub use external::{BodyState, ExternalBody, Liveness, LoadTicket};
pub use html::{class_list, escape_html};
pub use shadows::{ScrollMetrics, ShadowClasses, ShadowRegistry, ShadowScope};
pub use text::html_to_text;
