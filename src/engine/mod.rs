//! Host collaborators
//!
//! Citation editing needs three things from the host editor:
//! - a macro engine that knows where macros start and end (`MacroEngine`)
//! - an editable buffer with a caret (`EditBuffer`)
//! - prompts for command names and extra arguments (`Selector`)
//!
//! `LatexMacroEngine`, `TextBuffer` and `DefaultSelector` are ready-made
//! implementations for plain LaTeX text held in memory.

pub mod buffer;
pub mod latex;
pub mod selector;

pub use buffer::{EditBuffer, TextBuffer};
pub use latex::{macros_in, LatexMacroEngine};
pub use selector::{DefaultSelector, ScriptedSelector, Selection, Selector};

use crate::core::span::Span;
use crate::core::table::ArgSlot;
use crate::utils::error::{CiteError, CiteResult};

/// A macro found by the engine: its name (no backslash) and full span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroBounds {
    pub name: String,
    pub span: Span,
}

/// Macro parsing primitives provided by the host
///
/// Each capability a host lacks keeps its provided implementation, which
/// fails with `CiteError::MissingCapability`.
///
/// Implementations:
/// - `LatexMacroEngine`: scanner over LaTeX source text
/// - `NoopMacroEngine`: a host without any macro support
pub trait MacroEngine {
    /// The smallest complete macro whose span contains `pos`
    fn find_enclosing_macro(&self, _text: &str, _pos: usize) -> CiteResult<Option<MacroBounds>> {
        Err(CiteError::missing("macro boundary discovery"))
    }

    /// The macro whose argument the caret at `pos` is in, including macros
    /// still being typed (unclosed argument)
    fn current_macro(&self, _text: &str, _pos: usize) -> CiteResult<Option<String>> {
        Err(CiteError::missing("current macro detection"))
    }

    /// Insert a skeleton of `\name` at the caret and leave the caret inside
    /// its key argument
    ///
    /// `shape = None` means one mandatory key argument and no prompting.
    fn synthesize_macro(
        &self,
        _buffer: &mut dyn EditBuffer,
        _name: &str,
        _shape: Option<&[ArgSlot]>,
        _selector: &mut dyn Selector,
    ) -> CiteResult<()> {
        Err(CiteError::missing("macro synthesis"))
    }
}

/// Host without a macro engine
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMacroEngine;

impl MacroEngine for NoopMacroEngine {}
