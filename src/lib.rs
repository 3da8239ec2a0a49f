//! # pireader
//!
//! A reader for structured drug prescribing-information labels.
//!
//! A product's label is a JSON manifest (sections, optional subsections,
//! overview blocks, glossary, quiz summary, boxed warning) plus pre-rendered
//! HTML bodies, both served by a content service. The reader resolves every
//! navigation request to exactly one active view and keeps the URL hash,
//! sidebar expansion and rendered pane consistent with it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pireader::{Action, HttpProvider, MemoryLocation, ProviderConfig, Reader};
//!
//! let config = ProviderConfig::from_env()?.with_query("?productId=navsunli");
//! let provider = HttpProvider::new(config)?;
//! let mut reader = Reader::start(provider, MemoryLocation::new("#dosage"));
//!
//! reader.dispatch(Action::Navigate("glossary".into()));
//! println!("{}", reader.render_text());
//! # Ok::<(), pireader::Error>(())
//! ```
//!
//! ## Navigation without I/O
//!
//! The navigation engine only needs the section tree:
//!
//! ```
//! use pireader::model::{Section, Subsection};
//! use pireader::{Location, MemoryLocation, Navigator};
//!
//! let sections = vec![Section {
//!     id: "dosage".into(),
//!     title: "Dosage".into(),
//!     subsections: vec![Subsection {
//!         id: "renal".into(),
//!         title: "Renal".into(),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! }];
//!
//! let mut nav = Navigator::init(MemoryLocation::new(""), &sections);
//! assert!(nav.navigate_to(&sections, "renal"));
//! assert!(nav.state().is_expanded("dosage"));
//! assert_eq!(nav.location().hash(), "renal");
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod nav;
pub mod provider;
pub mod render;
pub(crate) mod util;
pub mod views;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use app::{Action, MountedBody, Reader};
pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use model::{Manifest, ref_number, section_number, sub_number};
pub use nav::{Location, MemoryLocation, NavState, Navigator, ReservedView, ViewId};
#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
pub use provider::HttpProvider;
pub use provider::{ContentProvider, StaticProvider};
