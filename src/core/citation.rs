//! Citation-at-point extractor
//!
//! Every innermost brace group `{...}` inside the citation macro is a key
//! source; its contents are split on commas and trimmed. Optional-argument
//! text in braces is not told apart from keys.

use std::borrow::Cow;

use crate::core::locator::locate;
use crate::core::span::{KeyList, KeyToken, Span};
use crate::core::table::CommandTable;
use crate::engine::MacroEngine;
use crate::utils::error::CiteResult;

/// `text` with every `%` line comment blanked to spaces
///
/// Byte offsets are unchanged, so spans found in the result index the
/// original text. `\%` is an escaped percent sign, not a comment.
pub fn blank_comments(text: &str) -> Cow<'_, str> {
    if !text.contains('%') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_comment = false;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                in_comment = false;
                out.push(c);
            }
            _ if in_comment => out.extend(std::iter::repeat(' ').take(c.len_utf8())),
            '%' => {
                in_comment = true;
                out.push(' ');
            }
            '\\' => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            _ => out.push(c),
        }
    }

    Cow::Owned(out)
}

/// Inner spans of every `{...}` group without nested braces inside `span`
pub fn brace_groups(text: &str, span: Span) -> Vec<Span> {
    let bytes = &text.as_bytes()[..span.end];
    let mut groups = Vec::new();
    let mut i = span.start;

    while i < span.end {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }
        let inner = i + 1;
        match bytes[inner..].iter().position(|&b| b == b'{' || b == b'}') {
            Some(offset) if bytes[inner + offset] == b'}' => {
                groups.push(Span::new(inner, inner + offset));
                i = inner + offset + 1;
            }
            // nested group: retry from the inner `{`
            Some(offset) => i = inner + offset,
            None => break,
        }
    }

    groups
}

/// Comma-separated keys of one group, trimmed, with their spans
pub fn key_tokens(text: &str, group: Span) -> Vec<KeyToken> {
    let mut tokens = Vec::new();
    let mut offset = group.start;

    for piece in group.slice(text).split(',') {
        let key = piece.trim();
        if !key.is_empty() {
            let start = offset + (piece.len() - piece.trim_start().len());
            tokens.push(KeyToken {
                text: key.to_string(),
                span: Span::new(start, start + key.len()),
            });
        }
        offset += piece.len() + 1;
    }

    tokens
}

/// Keys of all brace groups in `span`, in textual order
pub fn keys_in_span(text: &str, span: Span) -> Vec<String> {
    brace_groups(text, span)
        .into_iter()
        .flat_map(|group| key_tokens(text, group))
        .map(|token| token.text)
        .collect()
}

/// All keys of the citation macro enclosing `pos`
pub fn citation_at_point<E: MacroEngine + ?Sized>(
    table: &CommandTable,
    engine: &E,
    text: &str,
    pos: usize,
) -> CiteResult<Option<KeyList>> {
    Ok(locate(table, engine, text, pos)?.map(|found| KeyList {
        keys: keys_in_span(text, found.span),
        span: found.span,
    }))
}
