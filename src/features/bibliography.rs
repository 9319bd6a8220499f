//! Bibliography resources declared by a document
//!
//! Finds the files named by `\bibliography{...}` (BibTeX/natbib) and
//! `\addbibresource{...}` (biblatex) so a host can load the keys to offer
//! for insertion.

use indexmap::IndexSet;

use crate::core::citation::{blank_comments, brace_groups};
use crate::data::commands::{BibResourceKind, BIBLIOGRAPHY_COMMANDS};
use crate::engine::macros_in;

/// Bibliography files declared in `text`, in order, without duplicates
///
/// BibTeX basenames get a `.bib` extension; biblatex resources are kept
/// verbatim. Declarations in comments are ignored.
///
/// ```rust
/// use texcite::bibliography::local_bib_files;
///
/// let files = local_bib_files(r"\addbibresource{refs.bib} \bibliography{refs,extra}");
/// assert_eq!(files, vec!["refs.bib", "extra.bib"]);
/// ```
pub fn local_bib_files(text: &str) -> Vec<String> {
    let mut files = IndexSet::new();
    let code = blank_comments(text);

    for found in macros_in(text) {
        let Some(kind) = BIBLIOGRAPHY_COMMANDS.get(found.name.as_str()) else {
            continue;
        };
        // the resource is the last brace group; options come first
        let Some(group) = brace_groups(&code, found.span).pop() else {
            continue;
        };
        let contents = group.slice(&code);

        match kind {
            BibResourceKind::Basenames => {
                for name in contents.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                    if name.ends_with(".bib") {
                        files.insert(name.to_string());
                    } else {
                        files.insert(format!("{}.bib", name));
                    }
                }
            }
            BibResourceKind::Resource => {
                let resource = contents.trim();
                if !resource.is_empty() {
                    files.insert(resource.to_string());
                }
            }
        }
    }

    log::debug!("found {} bibliography file(s)", files.len());
    files.into_iter().collect()
}
