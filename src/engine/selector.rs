//! Interactive selection
//!
//! Prompts are synchronous: the host blocks until the user picks a value
//! or cancels, and reports the outcome as a [`Selection`].

use std::collections::VecDeque;

use crate::core::table::ArgSlot;
use crate::utils::error::{CiteError, CiteResult};

/// Outcome of a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Selected(T),
    Aborted,
}

impl<T> Selection<T> {
    /// Turn a cancelled prompt into `CiteError::UserAbort`
    pub fn into_result(self) -> CiteResult<T> {
        match self {
            Selection::Selected(value) => Ok(value),
            Selection::Aborted => Err(CiteError::UserAbort),
        }
    }
}

/// Host-provided prompts
pub trait Selector {
    /// Pick a citation command from `candidates`
    ///
    /// `history` lists previously chosen commands, most recent first.
    fn choose_command(
        &mut self,
        candidates: &[String],
        history: &[String],
        default: &str,
    ) -> Selection<String>;

    /// Read the value of a non-key argument of `command`
    ///
    /// An empty value leaves an optional argument out.
    fn read_argument(&mut self, command: &str, slot: &ArgSlot) -> Selection<String>;
}

/// Answers every prompt with its default: the default command and empty
/// argument values
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSelector;

impl Selector for DefaultSelector {
    fn choose_command(
        &mut self,
        _candidates: &[String],
        _history: &[String],
        default: &str,
    ) -> Selection<String> {
        Selection::Selected(default.to_string())
    }

    fn read_argument(&mut self, _command: &str, _slot: &ArgSlot) -> Selection<String> {
        Selection::Selected(String::new())
    }
}

/// Replays queued answers, falling back to `DefaultSelector` behavior once
/// a queue runs dry. Records what was asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    commands: VecDeque<Selection<String>>,
    arguments: VecDeque<Selection<String>>,
    /// Candidate lists offered to `choose_command`, in call order
    pub command_prompts: Vec<Vec<String>>,
    /// Histories passed to `choose_command`, in call order
    pub histories: Vec<Vec<String>>,
    /// Labels of the arguments asked for, in call order
    pub argument_prompts: Vec<String>,
}

impl ScriptedSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a command-name answer
    pub fn with_command(mut self, answer: Selection<String>) -> Self {
        self.commands.push_back(answer);
        self
    }

    /// Queue an argument-value answer
    pub fn with_argument(mut self, answer: Selection<String>) -> Self {
        self.arguments.push_back(answer);
        self
    }
}

impl Selector for ScriptedSelector {
    fn choose_command(
        &mut self,
        candidates: &[String],
        history: &[String],
        default: &str,
    ) -> Selection<String> {
        self.command_prompts.push(candidates.to_vec());
        self.histories.push(history.to_vec());
        self.commands
            .pop_front()
            .unwrap_or_else(|| Selection::Selected(default.to_string()))
    }

    fn read_argument(&mut self, _command: &str, slot: &ArgSlot) -> Selection<String> {
        self.argument_prompts.push(slot.label.clone());
        self.arguments
            .pop_front()
            .unwrap_or_else(|| Selection::Selected(String::new()))
    }
}
