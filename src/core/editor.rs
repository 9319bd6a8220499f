//! `CitationEditor`: the configured entry point for citation queries and edits

use crate::core::citation::citation_at_point;
use crate::core::key::key_at_point;
use crate::core::locator::locate;
use crate::core::span::{KeyList, KeyToken, MacroMatch};
use crate::core::table::CommandTable;
use crate::engine::{LatexMacroEngine, MacroEngine};
use crate::utils::config::CiteConfig;
use crate::utils::error::CiteResult;

/// Maximum number of remembered command choices
pub(crate) const HISTORY_LIMIT: usize = 100;

/// Citation queries and insertion over a host macro engine
///
/// Holds the configuration, the command table built from it, the engine
/// and the history of chosen citation commands.
///
/// ```rust
/// use texcite::{CitationEditor, CiteConfig};
///
/// let editor = CitationEditor::latex(CiteConfig::default()).unwrap();
/// let text = r"see \textcite{knuth84, lamport94}";
/// let list = editor.citation_at_point(text, 20).unwrap().unwrap();
/// assert_eq!(list.keys, vec!["knuth84", "lamport94"]);
/// ```
#[derive(Debug)]
pub struct CitationEditor<E = LatexMacroEngine> {
    pub(crate) config: CiteConfig,
    pub(crate) table: CommandTable,
    pub(crate) engine: E,
    pub(crate) history: Vec<String>,
}

impl CitationEditor<LatexMacroEngine> {
    /// Editor over plain LaTeX text using the built-in engine
    pub fn latex(config: CiteConfig) -> CiteResult<Self> {
        Self::new(config, LatexMacroEngine)
    }
}

impl<E: MacroEngine> CitationEditor<E> {
    /// Build an editor; fails if the configured command table is invalid
    pub fn new(config: CiteConfig, engine: E) -> CiteResult<Self> {
        let table = config.command_table()?;
        Ok(Self {
            config,
            table,
            engine,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &CiteConfig {
        &self.config
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Previously chosen commands, most recent first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The citation macro enclosing `pos`
    pub fn locate(&self, text: &str, pos: usize) -> CiteResult<Option<MacroMatch>> {
        locate(&self.table, &self.engine, text, pos)
    }

    /// The key the caret at `pos` sits on
    pub fn key_at_point(&self, text: &str, pos: usize) -> CiteResult<Option<KeyToken>> {
        key_at_point(&self.table, &self.engine, text, pos)
    }

    /// All keys of the citation macro enclosing `pos`
    pub fn citation_at_point(&self, text: &str, pos: usize) -> CiteResult<Option<KeyList>> {
        citation_at_point(&self.table, &self.engine, text, pos)
    }

    pub(crate) fn remember(&mut self, command: &str) {
        self.history.retain(|c| c != command);
        self.history.insert(0, command.to_string());
        self.history.truncate(HISTORY_LIMIT);
    }
}
