//! Boundary locator: the citation macro enclosing a position

use crate::core::span::MacroMatch;
use crate::core::table::CommandTable;
use crate::engine::MacroEngine;
use crate::utils::error::CiteResult;

/// Find the citation macro enclosing `pos`
///
/// Returns `Ok(None)` when `pos` is outside every macro or the smallest
/// enclosing macro is not a citation command. Errors only when the engine
/// cannot discover macro boundaries at all.
pub fn locate<E: MacroEngine + ?Sized>(
    table: &CommandTable,
    engine: &E,
    text: &str,
    pos: usize,
) -> CiteResult<Option<MacroMatch>> {
    let Some(bounds) = engine.find_enclosing_macro(text, pos)? else {
        return Ok(None);
    };

    if !table.contains(&bounds.name) {
        log::trace!("`\\{}` at {} is not a citation command", bounds.name, pos);
        return Ok(None);
    }

    Ok(Some(MacroMatch {
        command: bounds.name,
        span: bounds.span,
    }))
}
