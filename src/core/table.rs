//! Citation command table
//!
//! Maps citation command names (aliases) to the argument shape they share.
//! The table is built once from configuration and is read-only afterwards.

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::error::{CiteError, CiteResult};

lazy_static! {
    /// Valid command names: letters (and `@` for internal macros), optionally starred
    static ref COMMAND_NAME: Regex = Regex::new(r"^[A-Za-z@]+\*?$").unwrap();
}

/// One argument position in a macro's declared shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSlot {
    /// Prompt label (e.g. "Prenote")
    pub label: String,
    /// Optional `[...]` argument vs mandatory `{...}` argument
    #[serde(default)]
    pub optional: bool,
    /// Whether citation keys go into this slot
    #[serde(default, rename = "key")]
    pub key_bearing: bool,
}

impl ArgSlot {
    pub fn optional(label: &str) -> Self {
        Self {
            label: label.to_string(),
            optional: true,
            key_bearing: false,
        }
    }

    pub fn mandatory(label: &str) -> Self {
        Self {
            label: label.to_string(),
            optional: false,
            key_bearing: false,
        }
    }

    pub fn keys() -> Self {
        Self {
            label: "Keys".to_string(),
            optional: false,
            key_bearing: true,
        }
    }
}

/// A family of citation commands sharing one argument shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command names without the backslash
    pub names: Vec<String>,
    /// Argument shape; `None` means a single mandatory key argument
    #[serde(default, rename = "args")]
    pub arg_slots: Option<Vec<ArgSlot>>,
}

impl CommandSpec {
    pub fn new<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        arg_slots: Option<Vec<ArgSlot>>,
    ) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            arg_slots,
        }
    }

    /// The slot citation keys are written into, if a shape is declared
    pub fn key_bearing_slot(&self) -> Option<&ArgSlot> {
        self.arg_slots
            .as_ref()
            .and_then(|slots| slots.iter().find(|s| s.key_bearing))
    }

    pub fn key_bearing_count(&self) -> usize {
        self.arg_slots
            .as_ref()
            .map_or(0, |slots| slots.iter().filter(|s| s.key_bearing).count())
    }

    fn display_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("<unnamed>")
    }

    /// Check the shape and designate the key-bearing slot when none is marked
    fn normalize(mut self) -> CiteResult<Self> {
        if self.names.is_empty() {
            return Err(CiteError::config("command entry without any names"));
        }
        if let Some(bad) = self.names.iter().find(|n| !COMMAND_NAME.is_match(n)) {
            return Err(CiteError::config(format!(
                "`{}` is not a valid command name",
                bad
            )));
        }

        let mut slots = match self.arg_slots.take() {
            Some(slots) if !slots.is_empty() => slots,
            _ => return Ok(self),
        };

        match slots.iter().filter(|s| s.key_bearing).count() {
            0 => {
                let last_mandatory = slots.iter().rposition(|s| !s.optional).ok_or_else(|| {
                    CiteError::config(format!(
                        "command `{}` has no mandatory argument to hold keys",
                        self.display_name()
                    ))
                })?;
                slots[last_mandatory].key_bearing = true;
            }
            1 => {
                if slots.iter().any(|s| s.key_bearing && s.optional) {
                    return Err(CiteError::config(format!(
                        "command `{}` marks an optional argument as the key argument",
                        self.display_name()
                    )));
                }
            }
            n => {
                return Err(CiteError::config(format!(
                    "command `{}` marks {} key arguments, expected one",
                    self.display_name(),
                    n
                )));
            }
        }

        self.arg_slots = Some(slots);
        Ok(self)
    }
}

/// Lookup table from command name to its `CommandSpec`
#[derive(Debug, Clone)]
pub struct CommandTable {
    specs: Vec<CommandSpec>,
    /// Command name -> index into `specs`, in configuration order
    index: IndexMap<String, usize, FxBuildHasher>,
}

impl CommandTable {
    /// Build a table, validating every entry
    pub fn new(specs: impl IntoIterator<Item = CommandSpec>) -> CiteResult<Self> {
        let mut table = Self {
            specs: Vec::new(),
            index: IndexMap::with_hasher(FxBuildHasher::default()),
        };

        for spec in specs {
            let spec = spec.normalize()?;
            let idx = table.specs.len();
            for name in &spec.names {
                if table.index.insert(name.clone(), idx).is_some() {
                    return Err(CiteError::config(format!(
                        "command `{}` is listed more than once",
                        name
                    )));
                }
            }
            table.specs.push(spec);
        }

        Ok(table)
    }

    /// Look up a command name; `None` means "not a citation command"
    pub fn lookup(&self, name: &str) -> Option<&CommandSpec> {
        self.index.get(name).map(|&idx| &self.specs[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All command names, flattened, in configuration order
    pub fn names(&self) -> Vec<String> {
        self.index.keys().cloned().collect()
    }

    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::commands::default_cite_commands;

    #[test]
    fn test_default_table_has_at_most_one_key_slot() {
        let table = CommandTable::new(default_cite_commands()).unwrap();
        for spec in table.specs() {
            assert!(spec.key_bearing_count() <= 1, "{:?}", spec.names);
        }
    }

    #[test]
    fn test_lookup_aliases_share_spec() {
        let table = CommandTable::new(default_cite_commands()).unwrap();
        let cite = table.lookup("cite").unwrap();
        let textcite = table.lookup("textcite").unwrap();
        assert_eq!(cite, textcite);
        assert!(table.lookup("nocite").unwrap().arg_slots.is_none());
        assert!(table.lookup("section").is_none());
    }

    #[test]
    fn test_names_follow_configuration_order() {
        let table = CommandTable::new(vec![
            CommandSpec::new(["citep", "citet"], None),
            CommandSpec::new(["nocite"], None),
        ])
        .unwrap();
        assert_eq!(table.names(), vec!["citep", "citet", "nocite"]);
    }

    #[test]
    fn test_last_mandatory_slot_becomes_key_slot() {
        let table = CommandTable::new(vec![CommandSpec::new(
            ["citefield"],
            Some(vec![
                ArgSlot::optional("Prenote"),
                ArgSlot::mandatory("Field"),
                ArgSlot::mandatory("Keys"),
            ]),
        )])
        .unwrap();
        let slot = table.lookup("citefield").unwrap().key_bearing_slot().unwrap();
        assert_eq!(slot.label, "Keys");
    }

    #[test]
    fn test_empty_shape_means_no_guidance() {
        let table = CommandTable::new(vec![CommandSpec::new(["cite"], Some(vec![]))]).unwrap();
        assert!(table.lookup("cite").unwrap().arg_slots.is_none());
    }

    #[test]
    fn test_two_key_slots_rejected() {
        let err = CommandTable::new(vec![CommandSpec::new(
            ["cite"],
            Some(vec![ArgSlot::keys(), ArgSlot::keys()]),
        )])
        .unwrap_err();
        assert!(err.to_string().contains("2 key arguments"));
    }

    #[test]
    fn test_optional_only_shape_rejected() {
        let err = CommandTable::new(vec![CommandSpec::new(
            ["cite"],
            Some(vec![ArgSlot::optional("Note")]),
        )])
        .unwrap_err();
        assert!(matches!(err, CiteError::InvalidConfig { .. }));
    }

    #[test]
    fn test_invalid_and_duplicate_names_rejected() {
        assert!(CommandTable::new(vec![CommandSpec::new(["\\cite"], None)]).is_err());
        assert!(CommandTable::new(vec![CommandSpec::new(["cite", "cite"], None)]).is_err());
        assert!(CommandTable::new(vec![CommandSpec::new(Vec::<String>::new(), None)]).is_err());
    }

    #[test]
    fn test_starred_names_allowed() {
        let table = CommandTable::new(vec![CommandSpec::new(["cite*", "c@cite"], None)]).unwrap();
        assert!(table.contains("cite*"));
        assert!(table.contains("c@cite"));
    }
}
