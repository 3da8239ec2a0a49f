//! Content model for a product label.
//!
//! This module contains:
//! - The document manifest and its section tree
//! - Section lookups shared by navigation and rendering
//! - Display numbering for sections, subsections and cross-references

mod manifest;
mod numbering;

pub use manifest::{
    BodyFormat, Bullet, GlossaryEntry, Manifest, OverviewBlock, Product, QuestionKind, Quiz,
    QuizQuestion, Section, Submission, SubmissionChannel, Subsection, Theme, find_parent,
    find_section, find_subsection,
};

pub use numbering::{DANGLING_REF, ref_number, section_number, sub_number};
