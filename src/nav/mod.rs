//! Navigation state engine.
//!
//! Maps the section tree to a single active view and keeps the URL hash, the
//! sidebar expansion set and the mobile drawer consistent with it:
//!
//! - [`ViewId`]: reserved views, sections and subsections
//! - [`Location`]: the hash and scroll side effects, injected by the caller
//! - [`Navigator`]: the state container that mediates every transition
//!
//! The derived values ([`show_content_nav`], [`accordion`]) are pure
//! functions of the active view so they can be tested without a navigator.

mod location;
mod navigator;
mod view;

pub use location::{Location, MemoryLocation, strip_hash};
pub use navigator::{NavState, Navigator, accordion, show_content_nav};
pub use view::{ReservedView, ViewId};
