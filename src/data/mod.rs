//! Data layer - Static command definitions
//!
//! This module contains the built-in data used by the citation logic:
//! - Default citation command table (biblatex/natbib)
//! - Bibliography-declaring commands

pub mod commands;

// Re-export commonly used items
pub use commands::{
    default_cite_commands, BibResourceKind, BARE_CITE_COMMANDS, BIBLIOGRAPHY_COMMANDS,
    DEFAULT_CITE_COMMAND, DEFAULT_CITE_COMMANDS, DEFAULT_COMMAND_TABLE, NOTE_CITE_COMMANDS,
};
