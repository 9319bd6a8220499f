//! Feature modules - document-level helpers
//!
//! This module contains helpers that work over a whole document rather
//! than a caret position:
//! - Bibliography files declared by the document
//! - All citations and cited keys

pub mod bibliography;
pub mod document;

// Re-export commonly used functions
pub use bibliography::local_bib_files;
pub use document::{cited_keys, citations_in};
