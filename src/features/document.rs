//! Document-wide citation listing

use crate::core::citation::{blank_comments, brace_groups, key_tokens};
use crate::core::span::{KeyToken, MacroMatch};
use crate::core::table::CommandTable;
use crate::engine::macros_in;

/// Every complete citation macro in `text`, in textual order
pub fn citations_in(text: &str, table: &CommandTable) -> Vec<MacroMatch> {
    macros_in(text)
        .into_iter()
        .filter(|m| table.contains(&m.name))
        .map(|m| MacroMatch {
            command: m.name,
            span: m.span,
        })
        .collect()
}

/// Every key cited in `text`, with its span, in textual order
///
/// Keys are gathered the same way as for a single citation: all brace
/// groups of each citation macro, split on commas. `%` comments inside a
/// citation are skipped.
pub fn cited_keys(text: &str, table: &CommandTable) -> Vec<KeyToken> {
    let code = blank_comments(text);
    citations_in(text, table)
        .into_iter()
        .flat_map(|found| brace_groups(&code, found.span))
        .flat_map(|group| key_tokens(&code, group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::commands::DEFAULT_COMMAND_TABLE;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cited_keys_across_document() {
        let text = "As \\textcite{knuth84} shows, see \\ref{fig:1}.\n\
                    % \\cite{ignored}\n\
                    Also \\parencite[p.~3]{lamport94, knuth84}.";
        let keys: Vec<_> = cited_keys(text, &DEFAULT_COMMAND_TABLE)
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(keys, vec!["knuth84", "lamport94", "knuth84"]);
    }

    #[test]
    fn test_key_spans_point_into_text() {
        let text = r"\cite{ a,bb }";
        for token in cited_keys(text, &DEFAULT_COMMAND_TABLE) {
            assert_eq!(token.span.slice(text), token.text);
        }
    }

    #[test]
    fn test_comment_inside_citation() {
        let text = "\\cite{a, % old}\n b}";
        let tokens = cited_keys(text, &DEFAULT_COMMAND_TABLE);
        let keys: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(tokens[1].span.slice(text), "b");
    }

    #[test]
    fn test_escaped_percent_is_kept() {
        let keys: Vec<_> = cited_keys(r"\cite{50\%off,b}", &DEFAULT_COMMAND_TABLE)
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(keys, vec![r"50\%off", "b"]);
    }

    #[test]
    fn test_citations_in() {
        let text = r"\cite{a} \emph{b} \nocite{c}";
        let found: Vec<_> = citations_in(text, &DEFAULT_COMMAND_TABLE)
            .into_iter()
            .map(|m| m.command)
            .collect();
        assert_eq!(found, vec!["cite", "nocite"]);
    }
}
