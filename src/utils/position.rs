//! Conversions between byte offsets and 1-indexed line/column positions
//!
//! Columns count characters, not bytes, so positions typed by a user in an
//! editor map onto valid char boundaries.

/// Byte offset of a 1-indexed `(line, column)` position
///
/// A column one past the end of a line addresses the line end. Returns
/// `None` for positions outside the text.
pub fn offset_at(text: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 || column == 0 {
        return None;
    }

    let mut line_start = 0;
    for _ in 1..line {
        line_start += text[line_start..].find('\n')? + 1;
    }

    let line_text = match text[line_start..].find('\n') {
        Some(end) => &text[line_start..line_start + end],
        None => &text[line_start..],
    };

    let mut chars = line_text.char_indices().map(|(i, _)| i);
    match chars.nth(column - 1) {
        Some(offset) => Some(line_start + offset),
        None if column - 1 == line_text.chars().count() => Some(line_start + line_text.len()),
        None => None,
    }
}

/// 1-indexed `(line, column)` of a byte offset
pub fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = text[line_start..offset].chars().count() + 1;
    (line, column)
}

/// Clamp `offset` into the text and back onto a char boundary
pub fn clamp_to_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
