//! Core citation logic
//!
//! - `table`: citation command table
//! - `locator`: citation macro enclosing a position
//! - `key`: citation key under the caret
//! - `citation`: all keys of the enclosing citation
//! - `insert`: splicing keys into / synthesizing citation macros
//! - `editor`: `CitationEditor`, tying configuration, table and engine together

pub mod citation;
pub mod editor;
pub mod insert;
pub mod key;
pub mod locator;
pub mod span;
pub mod table;

pub use editor::CitationEditor;
pub use span::{KeyList, KeyToken, MacroMatch, Span};
pub use table::{ArgSlot, CommandSpec, CommandTable};
