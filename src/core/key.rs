//! Key-at-point resolver
//!
//! A caret is "on a key" when it sits in a run of non-delimiter characters
//! that is preceded by `{` or `,` and followed by `}` or `,`, all within one
//! brace group of a citation macro.

use crate::core::locator::locate;
use crate::core::span::{KeyToken, Span};
use crate::core::table::CommandTable;
use crate::engine::MacroEngine;
use crate::utils::error::CiteResult;

fn is_delimiter(b: u8) -> bool {
    matches!(b, b'{' | b'}' | b',')
}

/// The first brace character (`{` or `}`) in `bytes`, searching backwards
fn last_brace(bytes: &[u8]) -> Option<u8> {
    bytes.iter().rev().copied().find(|&b| b == b'{' || b == b'}')
}

/// The first brace character in `bytes`, searching forwards
fn first_brace(bytes: &[u8]) -> Option<u8> {
    bytes.iter().copied().find(|&b| b == b'{' || b == b'}')
}

/// Resolve the key under the caret inside `macro_span`
pub fn key_in_span(text: &str, macro_span: Span, pos: usize) -> Option<KeyToken> {
    let bytes = text.as_bytes();
    if !macro_span.contains(pos) || is_delimiter(bytes[pos]) {
        return None;
    }

    let start = bytes[macro_span.start..pos]
        .iter()
        .rposition(|&b| is_delimiter(b))
        .map(|i| macro_span.start + i + 1)?;
    let end = bytes[pos..macro_span.end]
        .iter()
        .position(|&b| is_delimiter(b))
        .map(|i| pos + i)?;

    // Left: `{`, or `,` with the nearest brace before it being `{`
    let opened = match bytes[start - 1] {
        b'{' => true,
        b',' => last_brace(&bytes[macro_span.start..start]) == Some(b'{'),
        _ => false,
    };
    // Right: `}`, or `,` with the nearest brace after it being `}`
    let closed = match bytes[end] {
        b'}' => true,
        b',' => first_brace(&bytes[end..macro_span.end]) == Some(b'}'),
        _ => false,
    };
    if !opened || !closed {
        return None;
    }

    let run = &text[start..end];
    let key = run.trim();
    if key.is_empty() {
        return None;
    }

    let key_start = start + (run.len() - run.trim_start().len());
    Some(KeyToken {
        text: key.to_string(),
        span: Span::new(key_start, key_start + key.len()),
    })
}

/// The citation key the caret at `pos` sits on, if any
pub fn key_at_point<E: MacroEngine + ?Sized>(
    table: &CommandTable,
    engine: &E,
    text: &str,
    pos: usize,
) -> CiteResult<Option<KeyToken>> {
    Ok(locate(table, engine, text, pos)?.and_then(|found| key_in_span(text, found.span, pos)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::commands::DEFAULT_COMMAND_TABLE;
    use crate::engine::LatexMacroEngine;
    use pretty_assertions::assert_eq;

    fn key_at(text: &str, pos: usize) -> Option<KeyToken> {
        key_at_point(&DEFAULT_COMMAND_TABLE, &LatexMacroEngine, text, pos).unwrap()
    }

    #[test]
    fn test_key_inside_token() {
        let text = r"\cite{a,b,c}";
        assert_eq!(
            key_at(text, 8),
            Some(KeyToken {
                text: "b".to_string(),
                span: Span::new(8, 9),
            })
        );
    }

    #[test]
    fn test_caret_on_delimiter() {
        let text = r"\cite{a,b,c}";
        // on the comma between `a` and `b`
        assert_eq!(key_at(text, 7), None);
        // on the braces
        assert_eq!(key_at(text, 5), None);
        assert_eq!(key_at(text, 11), None);
    }

    #[test]
    fn test_key_is_trimmed() {
        let text = r"\cite{ a ,  knuth84 }";
        let token = key_at(text, 13).unwrap();
        assert_eq!(token.text, "knuth84");
        assert_eq!(token.span.slice(text), "knuth84");
        // caret on the padding still resolves the key
        assert_eq!(key_at(text, 10).unwrap().text, "knuth84");
    }

    #[test]
    fn test_empty_runs() {
        assert_eq!(key_at(r"\cite{a, ,b}", 8), None);
    }

    #[test]
    fn test_caret_outside_brace_groups() {
        let text = r"\parencite[see][p.~3]{a}";
        // in the command name
        assert_eq!(key_at(text, 3), None);
        // in an optional argument
        assert_eq!(key_at(text, 12), None);
        assert_eq!(key_at(text, 22).unwrap().text, "a");
    }

    #[test]
    fn test_comma_bounded_run_needs_enclosing_brace() {
        // commas inside an optional argument are not key separators
        assert_eq!(key_at(r"\cite[a,b,c]{k}", 8), None);

        let text = r"\cite[see {x, y}]{k}";
        let token = key_at(text, 11).unwrap();
        assert_eq!(token.text, "x");
        assert_eq!(token.span, Span::new(11, 12));
    }

    #[test]
    fn test_not_a_citation() {
        assert_eq!(key_at(r"\ref{fig:a}", 6), None);
        assert_eq!(key_at("no macros", 3), None);
    }

    #[test]
    fn test_non_ascii_keys() {
        let text = r"\cite{müller2020,ünal}";
        assert_eq!(key_at(text, 9).unwrap().text, "müller2020");
        let token = key_at(text, 20).unwrap();
        assert_eq!(token.text, "ünal");
        assert_eq!(token.span.slice(text), "ünal");
    }
}
