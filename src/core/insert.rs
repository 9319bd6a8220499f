//! Citation inserter
//!
//! Keys are either spliced into the citation macro the caret is already in,
//! or written into a freshly synthesized macro. In both cases the caret ends
//! up just past the closing brace of the key group.

use crate::core::editor::CitationEditor;
use crate::engine::buffer::{last_char_before, skip_until, EditBuffer};
use crate::engine::{MacroEngine, Selector};
use crate::utils::error::CiteResult;

/// Move the caret past the `}` closing the key group, writing one if the
/// group is still open
fn leave_key_group(buffer: &mut dyn EditBuffer) {
    if skip_until(buffer, b"}") {
        let next = buffer.caret() + 1;
        buffer.set_caret(next);
    } else {
        buffer.insert("}");
    }
}

/// Add `keys` to the key list the caret is in
fn splice_keys(buffer: &mut dyn EditBuffer, keys: &[String]) {
    skip_until(buffer, b",}");
    if !matches!(last_char_before(buffer), None | Some('{' | ',' | '}')) {
        buffer.insert(", ");
    }
    buffer.insert_keys(keys);
    leave_key_group(buffer);
}

impl<E: MacroEngine> CitationEditor<E> {
    /// Insert `keys` at the caret
    ///
    /// - `invert_prompt` flips the configured `prompt_for_cite_style`
    /// - `command` forces the command name and skips the prompt
    ///
    /// Does nothing for an empty key list. A cancelled prompt returns
    /// `CiteError::UserAbort` before any text is written.
    pub fn insert_citation(
        &mut self,
        buffer: &mut dyn EditBuffer,
        selector: &mut dyn Selector,
        keys: &[String],
        invert_prompt: bool,
        command: Option<&str>,
    ) -> CiteResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let current = self.engine.current_macro(buffer.text(), buffer.caret())?;
        if let Some(name) = current.filter(|name| self.table.contains(name)) {
            log::debug!("adding {} key(s) to open `\\{}`", keys.len(), name);
            splice_keys(buffer, keys);
            return Ok(());
        }

        let name = self.choose_command(selector, invert_prompt, command)?;
        let shape = if self.config.prompt_for_extra_arguments {
            self.table
                .lookup(&name)
                .and_then(|spec| spec.arg_slots.as_deref())
        } else {
            None
        };

        log::debug!("inserting new `\\{}` with {} key(s)", name, keys.len());
        self.engine
            .synthesize_macro(buffer, &name, shape, selector)?;
        buffer.insert_keys(keys);
        leave_key_group(buffer);
        Ok(())
    }

    /// Command for a new citation: explicit, prompted, or the default
    fn choose_command(
        &mut self,
        selector: &mut dyn Selector,
        invert_prompt: bool,
        command: Option<&str>,
    ) -> CiteResult<String> {
        if let Some(command) = command {
            return Ok(command.to_string());
        }

        let default = &self.config.default_command;
        if invert_prompt == self.config.prompt_for_cite_style {
            return Ok(default.clone());
        }

        let candidates = self.table.names();
        let chosen = selector
            .choose_command(&candidates, &self.history, default)
            .into_result()?;
        let chosen = match chosen.trim() {
            "" => default.clone(),
            name => name.to_string(),
        };

        self.remember(&chosen);
        Ok(chosen)
    }
}
