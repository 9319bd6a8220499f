//! Citation configuration
//!
//! The configuration is assembled once (from defaults or a TOML file) and
//! handed to [`CitationEditor`](crate::core::CitationEditor); nothing reads
//! it through global state.
//!
//! ```toml
//! default-command = "parencite"
//! prompt-for-cite-style = false
//!
//! [[commands]]
//! names = ["cite", "parencite"]
//! args = [
//!     { label = "Prenote", optional = true },
//!     { label = "Postnote", optional = true },
//!     { label = "Keys", key = true },
//! ]
//!
//! [[commands]]
//! names = ["nocite"]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::table::{CommandSpec, CommandTable};
use crate::data::commands::{default_cite_commands, DEFAULT_CITE_COMMAND};
use crate::utils::error::{CiteError, CiteResult};

/// Citation command configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CiteConfig {
    /// Recognized citation commands and their argument shapes
    pub commands: Vec<CommandSpec>,
    /// Command used for new citations when not prompting
    pub default_command: String,
    /// Ask for the command name when inserting a new citation
    pub prompt_for_cite_style: bool,
    /// Ask for optional/extra argument values when inserting a new citation
    pub prompt_for_extra_arguments: bool,
}

impl Default for CiteConfig {
    fn default() -> Self {
        Self {
            commands: default_cite_commands(),
            default_command: DEFAULT_CITE_COMMAND.to_string(),
            prompt_for_cite_style: true,
            prompt_for_extra_arguments: true,
        }
    }
}

impl CiteConfig {
    /// Defaults with every prompt disabled
    pub fn non_interactive() -> Self {
        Self {
            prompt_for_cite_style: false,
            prompt_for_extra_arguments: false,
            ..Default::default()
        }
    }

    /// Parse a TOML configuration; omitted keys keep their defaults
    pub fn from_toml_str(input: &str) -> CiteResult<Self> {
        let config: CiteConfig = toml::from_str(input)?;
        if config.default_command.trim().is_empty() {
            return Err(CiteError::config("default-command must not be empty"));
        }
        log::debug!(
            "loaded {} citation command group(s), default `{}`",
            config.commands.len(),
            config.default_command
        );
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> CiteResult<Self> {
        let input = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&input)
    }

    /// Build the validated command table for this configuration
    pub fn command_table(&self) -> CiteResult<CommandTable> {
        CommandTable::new(self.commands.iter().cloned())
    }
}
