//! Views for the reserved pages.
//!
//! Each view is a pure render of a slice of the manifest. The only local UI
//! state, the glossary search text, is passed in.

mod blackbox;
mod glossary;
mod overview;
mod quiz;

pub use blackbox::render_black_box;
pub use glossary::{Glossary, filter_glossary};
pub use overview::Overview;
pub use quiz::render_quiz;
