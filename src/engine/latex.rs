//! Built-in macro engine for plain LaTeX text
//!
//! The scanner recognizes control words (`\name`, `\name*`), control
//! symbols (`\\`, `\%`, `\{`, ...) and `%` line comments. A macro's
//! arguments are the `[...]` and `{...}` groups that directly follow its
//! name. Braces nest; a bracket group ends at the first `]` outside braces.
//!
//! ```rust
//! use texcite::engine::{LatexMacroEngine, MacroEngine};
//!
//! let text = r"See \cite[p.~4]{knuth84}.";
//! let found = LatexMacroEngine.find_enclosing_macro(text, 18).unwrap().unwrap();
//! assert_eq!(found.name, "cite");
//! assert_eq!(found.span.slice(text), r"\cite[p.~4]{knuth84}");
//! ```

use crate::core::span::Span;
use crate::core::table::ArgSlot;
use crate::utils::error::CiteResult;

use super::buffer::EditBuffer;
use super::selector::Selector;
use super::{MacroBounds, MacroEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKind {
    Brace,
    Bracket,
}

/// One argument group; `close` is `None` when the group runs to the end of text
#[derive(Debug, Clone, Copy)]
struct ArgGroup {
    open: usize,
    close: Option<usize>,
}

impl ArgGroup {
    /// Whether a caret at `pos` sits inside the group's delimiters
    fn holds(&self, pos: usize) -> bool {
        pos > self.open && self.close.map_or(true, |close| pos <= close)
    }
}

#[derive(Debug, Clone)]
struct ScannedMacro<'a> {
    start: usize,
    name: &'a str,
    name_end: usize,
    args: Vec<ArgGroup>,
}

impl ScannedMacro<'_> {
    /// Backslash through the last closed argument group
    fn span(&self) -> Span {
        let end = self
            .args
            .iter()
            .filter_map(|g| g.close)
            .last()
            .map_or(self.name_end, |close| close + 1);
        Span::new(self.start, end)
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'@'
}

fn group_kind(b: u8) -> Option<GroupKind> {
    match b {
        b'{' => Some(GroupKind::Brace),
        b'[' => Some(GroupKind::Bracket),
        _ => None,
    }
}

/// Index just past the comment starting at `pos`
fn skip_comment(bytes: &[u8], pos: usize) -> usize {
    match bytes[pos..].iter().position(|&b| b == b'\n') {
        Some(offset) => pos + offset + 1,
        None => bytes.len(),
    }
}

/// Index of the delimiter closing the group opened at `open`
fn find_group_close(bytes: &[u8], open: usize, kind: GroupKind) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'%' => {
                i = skip_comment(bytes, i);
                continue;
            }
            b'{' => depth += 1,
            b'}' if depth == 0 => {
                // A stray `}` ends a bracket group without closing it
                return (kind == GroupKind::Brace).then_some(i);
            }
            b'}' => depth -= 1,
            b']' if depth == 0 && kind == GroupKind::Bracket => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

fn scan_args(bytes: &[u8], mut pos: usize) -> Vec<ArgGroup> {
    let mut args = Vec::new();
    while let Some(kind) = bytes.get(pos).copied().and_then(group_kind) {
        let close = find_group_close(bytes, pos, kind);
        args.push(ArgGroup { open: pos, close });
        match close {
            Some(close) => pos = close + 1,
            None => break,
        }
    }
    args
}

/// All macros starting at or before `limit`, in textual order
fn scan_macros(text: &str, limit: usize) -> Vec<ScannedMacro<'_>> {
    let bytes = text.as_bytes();
    let mut macros = Vec::new();
    let mut i = 0;

    while i < bytes.len() && i <= limit {
        match bytes[i] {
            b'%' => i = skip_comment(bytes, i),
            b'\\' => {
                let name_start = i + 1;
                let mut j = name_start;
                while j < bytes.len() && is_name_byte(bytes[j]) {
                    j += 1;
                }
                if j == name_start {
                    // control symbol
                    i += 2;
                    continue;
                }
                if bytes.get(j) == Some(&b'*') {
                    j += 1;
                }
                macros.push(ScannedMacro {
                    start: i,
                    name: &text[name_start..j],
                    name_end: j,
                    args: scan_args(bytes, j),
                });
                // Arguments are scanned again so nested macros are found
                i = j;
            }
            _ => i += 1,
        }
    }

    macros
}

/// Every complete macro in `text` with its name and span, in textual order
pub fn macros_in(text: &str) -> Vec<MacroBounds> {
    scan_macros(text, text.len())
        .into_iter()
        .map(|m| MacroBounds {
            name: m.name.to_string(),
            span: m.span(),
        })
        .collect()
}

/// Render `[...]`/`{...}` groups for `slots`, splitting at the key group
///
/// A run of consecutive optional slots is written out in full (empty
/// members as `[]`) when any member has a value, and left out otherwise.
fn render_arguments(slots: &[ArgSlot], values: &[String]) -> (String, String) {
    let mut before = String::new();
    let mut after = String::new();
    let mut seen_key = false;
    let mut i = 0;

    while i < slots.len() {
        let out = if seen_key { &mut after } else { &mut before };

        if slots[i].optional {
            let run_end = slots[i..]
                .iter()
                .position(|s| !s.optional)
                .map_or(slots.len(), |offset| i + offset);
            if values[i..run_end].iter().any(|v| !v.is_empty()) {
                for value in &values[i..run_end] {
                    out.push('[');
                    out.push_str(value);
                    out.push(']');
                }
            }
            i = run_end;
            continue;
        }

        if slots[i].key_bearing && !seen_key {
            before.push('{');
            after.push('}');
            seen_key = true;
        } else {
            out.push('{');
            out.push_str(&values[i]);
            out.push('}');
        }
        i += 1;
    }

    (before, after)
}

/// Macro engine over plain LaTeX source text
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexMacroEngine;

impl MacroEngine for LatexMacroEngine {
    fn find_enclosing_macro(&self, text: &str, pos: usize) -> CiteResult<Option<MacroBounds>> {
        if pos > text.len() {
            return Ok(None);
        }

        let found = scan_macros(text, pos)
            .into_iter()
            .map(|m| (m.span(), m.name))
            .filter(|(span, _)| span.contains(pos))
            .min_by_key(|(span, _)| span.len())
            .map(|(span, name)| MacroBounds {
                name: name.to_string(),
                span,
            });

        log::trace!("enclosing macro at {}: {:?}", pos, found);
        Ok(found)
    }

    fn current_macro(&self, text: &str, pos: usize) -> CiteResult<Option<String>> {
        if pos > text.len() {
            return Ok(None);
        }

        let found = scan_macros(text, pos)
            .into_iter()
            .filter_map(|m| {
                m.args
                    .iter()
                    .filter(|g| g.holds(pos))
                    .map(|g| g.open)
                    .max()
                    .map(|open| (open, m.name))
            })
            .max_by_key(|(open, _)| *open)
            .map(|(_, name)| name.to_string());

        log::trace!("current macro at {}: {:?}", pos, found);
        Ok(found)
    }

    fn synthesize_macro(
        &self,
        buffer: &mut dyn EditBuffer,
        name: &str,
        shape: Option<&[ArgSlot]>,
        selector: &mut dyn Selector,
    ) -> CiteResult<()> {
        let mut slots = match shape {
            Some(slots) if !slots.is_empty() => slots.to_vec(),
            _ => vec![ArgSlot::keys()],
        };
        if !slots.iter().any(|s| s.key_bearing) {
            slots.push(ArgSlot::keys());
        }

        // Ask for everything before touching the buffer
        let mut values = Vec::with_capacity(slots.len());
        for slot in &slots {
            if slot.key_bearing {
                values.push(String::new());
            } else {
                let value = selector.read_argument(name, slot).into_result()?;
                values.push(value.trim().to_string());
            }
        }

        let (before, after) = render_arguments(&slots, &values);
        log::debug!("synthesizing \\{}{}|{}", name, before, after);

        buffer.insert(&format!("\\{}{}", name, before));
        let key_pos = buffer.caret();
        buffer.insert(&after);
        buffer.set_caret(key_pos);
        Ok(())
    }
}
