//! Built-in citation and bibliography command definitions
//!
//! The default table covers the biblatex and natbib citation commands.
//! Commands with prenote/postnote take `[Prenote][Postnote]{keys}`;
//! `\nocite` and `\supercite` take a bare key argument.

use lazy_static::lazy_static;
use phf::phf_map;

use crate::core::table::{ArgSlot, CommandSpec, CommandTable};

/// Citation commands accepting optional prenote and postnote arguments
pub const NOTE_CITE_COMMANDS: &[&str] = &[
    "cite",
    "Cite",
    "citet",
    "Citet",
    "parencite",
    "Parencite",
    "footcite",
    "footcitetext",
    "textcite",
    "Textcite",
    "smartcite",
    "Smartcite",
    "cite*",
    "parencite*",
    "autocite",
    "Autocite",
    "autocite*",
    "Autocite*",
    "citeauthor",
    "Citeauthor",
    "citeauthor*",
    "Citeauthor*",
    "citeyear",
    "citeyear*",
    "citedate",
    "citedate*",
    "citeurl",
    "fullcite",
    "footfullcite",
    "notecite",
    "Notecite",
    "pnotecite",
    "Pnotecite",
    "fnotecite",
];

/// Citation commands taking only the key argument
pub const BARE_CITE_COMMANDS: &[&str] = &["nocite", "supercite"];

/// Command used when none is chosen explicitly
pub const DEFAULT_CITE_COMMAND: &str = "cite";

lazy_static! {
    /// Default citation command table
    pub static ref DEFAULT_CITE_COMMANDS: Vec<CommandSpec> = vec![
        CommandSpec::new(
            NOTE_CITE_COMMANDS.iter().copied(),
            Some(vec![
                ArgSlot::optional("Prenote"),
                ArgSlot::optional("Postnote"),
                ArgSlot::keys(),
            ]),
        ),
        CommandSpec::new(BARE_CITE_COMMANDS.iter().copied(), None),
    ];

    /// Validated table over `DEFAULT_CITE_COMMANDS`
    pub static ref DEFAULT_COMMAND_TABLE: CommandTable =
        CommandTable::new(DEFAULT_CITE_COMMANDS.iter().cloned()).unwrap();
}

/// Owned copy of the default citation command table
pub fn default_cite_commands() -> Vec<CommandSpec> {
    DEFAULT_CITE_COMMANDS.clone()
}

/// How a bibliography-declaring command names its resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BibResourceKind {
    /// BibTeX style: comma-separated basenames, `.bib` implied
    Basenames,
    /// biblatex style: a single resource given with its extension
    Resource,
}

/// Commands that declare bibliography files
pub static BIBLIOGRAPHY_COMMANDS: phf::Map<&'static str, BibResourceKind> = phf_map! {
    "bibliography" => BibResourceKind::Basenames,
    "nobibliography" => BibResourceKind::Basenames,
    "addbibresource" => BibResourceKind::Resource,
    "addglobalbib" => BibResourceKind::Resource,
    "addsectionbib" => BibResourceKind::Resource,
};
