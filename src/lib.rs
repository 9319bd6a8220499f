//! # texcite
//!
//! Locate, extract and insert citation keys in LaTeX source.
//!
//! ## Features
//!
//! - **Citation at point**: find the citation macro around a caret and list its keys
//! - **Key at point**: the single key under the caret, with its exact span
//! - **Insertion**: add keys to the citation being typed, or create a new
//!   citation with the right command and arguments
//! - **Configurable commands**: citation command table loaded from TOML
//! - **Host agnostic**: the macro engine, buffer and prompts are traits
//!
//! ## Usage Examples
//!
//! ### Queries
//!
//! ```rust
//! use texcite::{citation_at_point, key_at_point};
//!
//! let text = r"As shown by \cite{knuth84, lamport94}.";
//! let list = citation_at_point(text, 20).unwrap();
//! assert_eq!(list.keys, vec!["knuth84", "lamport94"]);
//!
//! let key = key_at_point(text, 28).unwrap();
//! assert_eq!(key.text, "lamport94");
//! ```
//!
//! ### Insertion
//!
//! ```rust
//! use texcite::{CitationEditor, CiteConfig, DefaultSelector, EditBuffer, TextBuffer};
//!
//! let mut editor = CitationEditor::latex(CiteConfig::non_interactive()).unwrap();
//! let mut buffer = TextBuffer::new(r"See \cite{knuth84", 17);
//! let keys = vec!["lamport94".to_string()];
//! editor
//!     .insert_citation(&mut buffer, &mut DefaultSelector, &keys, false, None)
//!     .unwrap();
//! assert_eq!(buffer.text(), r"See \cite{knuth84, lamport94}");
//! ```

/// Core citation logic
pub mod core;

/// Data layer - static command definitions
pub mod data;

/// Host collaborators: macro engine, buffers and prompts
pub mod engine;

/// Feature modules - document-level helpers
pub mod features;

/// Utility modules
pub mod utils;

// Re-export core types
pub use core::{
    ArgSlot, CitationEditor, CommandSpec, CommandTable, KeyList, KeyToken, MacroMatch, Span,
};

// Re-export host collaborators
pub use engine::{
    DefaultSelector, EditBuffer, LatexMacroEngine, MacroBounds, MacroEngine, NoopMacroEngine,
    ScriptedSelector, Selection, Selector, TextBuffer,
};

// Re-export feature modules
pub use features::bibliography;
pub use features::document;

// Re-export utilities
pub use utils::config::CiteConfig;
pub use utils::error::{CiteError, CiteResult};
pub use utils::position;

use data::commands::DEFAULT_COMMAND_TABLE;

/// All keys of the citation enclosing `pos`, using the built-in commands
pub fn citation_at_point(text: &str, pos: usize) -> Option<KeyList> {
    crate::core::citation::citation_at_point(&DEFAULT_COMMAND_TABLE, &LatexMacroEngine, text, pos)
        .ok()
        .flatten()
}

/// The citation key under the caret at `pos`, using the built-in commands
pub fn key_at_point(text: &str, pos: usize) -> Option<KeyToken> {
    crate::core::key::key_at_point(&DEFAULT_COMMAND_TABLE, &LatexMacroEngine, text, pos)
        .ok()
        .flatten()
}

/// Insert `keys` at `caret` without prompting
///
/// Uses `command` for a new citation, or the default command. Returns the
/// edited buffer.
pub fn insert_citation(
    text: &str,
    caret: usize,
    keys: &[String],
    command: Option<&str>,
) -> CiteResult<TextBuffer> {
    let mut editor = CitationEditor::latex(CiteConfig::non_interactive())?;
    let mut buffer = TextBuffer::new(text, caret);
    editor.insert_citation(&mut buffer, &mut DefaultSelector, keys, false, command)?;
    Ok(buffer)
}
