//! Integration tests for texcite citation queries and insertion

use texcite::{
    bibliography::local_bib_files, citation_at_point, document::cited_keys, insert_citation,
    key_at_point, ArgSlot, CitationEditor, CiteConfig, CiteError, CommandSpec, CommandTable,
    DefaultSelector, EditBuffer, NoopMacroEngine, ScriptedSelector, Selection, Span, TextBuffer,
};

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

// ============================================================================
// Locating the enclosing citation
// ============================================================================

mod locate {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_inner_position_finds_full_span() {
        let editor = CitationEditor::latex(CiteConfig::default()).unwrap();
        let text = r"Prior work \parencite[see {p.} 3][12]{knuth84, {lamport94}} agrees.";
        let start = text.find('\\').unwrap();
        let end = text.find(" agrees").unwrap();

        for pos in start + 1..end {
            let found = editor.locate(text, pos).unwrap().unwrap();
            assert_eq!(found.command, "parencite", "pos {}", pos);
            assert_eq!(found.span, Span::new(start, end), "pos {}", pos);
        }
    }

    #[test]
    fn test_positions_outside_macros() {
        let editor = CitationEditor::latex(CiteConfig::default()).unwrap();
        let text = r"one \cite{a} two";
        for pos in [0, 1, 3, 12, 13, text.len()] {
            assert!(editor.locate(text, pos).unwrap().is_none(), "pos {}", pos);
        }
    }

    #[test]
    fn test_innermost_non_citation_wins() {
        let editor = CitationEditor::latex(CiteConfig::default()).unwrap();
        let text = r"\cite[\emph{x}]{a}";
        assert!(editor.locate(text, 12).unwrap().is_none());
        assert_eq!(editor.locate(text, 16).unwrap().unwrap().command, "cite");
    }

    #[test]
    fn test_engine_without_boundaries_is_fatal() {
        let editor = CitationEditor::new(CiteConfig::default(), NoopMacroEngine).unwrap();
        let err = editor.locate(r"\cite{a}", 3).unwrap_err();
        assert!(matches!(err, CiteError::MissingCapability { .. }));
        assert!(err.to_string().starts_with("Missing dependency"));
    }
}

// ============================================================================
// Keys of a citation
// ============================================================================

mod extract {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keys_trimmed_in_order() {
        let list = citation_at_point(r"\cite{a, b , c}", 7).unwrap();
        assert_eq!(list.keys, vec!["a", "b", "c"]);
        assert_eq!(list.span, Span::new(0, 15));
    }

    #[test]
    fn test_repeated_extraction_is_stable() {
        let text = r"\textcite[ch.~2]{knuth84,lamport94}";
        let first = citation_at_point(text, 20);
        let second = citation_at_point(text, 20);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_prenote_commas_are_included() {
        // every brace group is split, notes included
        let list = citation_at_point(r"\cite[x]{p, q}{a}", 10).unwrap();
        assert_eq!(list.keys, vec!["p", "q", "a"]);
    }

    #[test]
    fn test_no_citation() {
        assert!(citation_at_point(r"\section{Intro}", 10).is_none());
        assert!(citation_at_point("no macros here", 3).is_none());
    }

    #[test]
    fn test_document_listing() {
        let text = "\\addbibresource{refs.bib}\n\
                    \\autocite{a,b} and \\nocite{c}\n\
                    % \\cite{hidden}\n";
        let found: Vec<_> = cited_keys(text, &CiteConfig::default().command_table().unwrap())
            .into_iter()
            .map(|k| k.text)
            .collect();
        assert_eq!(found, vec!["a", "b", "c"]);
        assert_eq!(local_bib_files(text), vec!["refs.bib"]);
    }
}

// ============================================================================
// Key at point
// ============================================================================

mod key {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_key_inside_token() {
        let text = r"\cite{a,b,c}";
        let token = key_at_point(text, 8).unwrap();
        assert_eq!(token.text, "b");
        assert_eq!(token.span, Span::new(8, 9));
    }

    #[test]
    fn test_caret_on_delimiter() {
        let text = r"\cite{a,b,c}";
        for pos in [5, 7, 9, 11] {
            assert!(key_at_point(text, pos).is_none(), "pos {}", pos);
        }
    }

    #[test]
    fn test_key_with_surrounding_space() {
        let text = r"\citep{ knuth84 , lamport94 }";
        let token = key_at_point(text, 19).unwrap();
        assert_eq!(token.text, "lamport94");
        assert_eq!(token.span.slice(text), "lamport94");
    }

    #[test]
    fn test_outside_citation() {
        assert!(key_at_point(r"\ref{a,b}", 7).is_none());
    }
}

// ============================================================================
// Insertion
// ============================================================================

mod insert {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_splice_into_unclosed_macro() {
        let buffer = insert_citation(r"\cite{a,b", 9, &keys(&["x"]), None).unwrap();
        assert_eq!(buffer.text(), r"\cite{a,b, x}");
        assert_eq!(buffer.caret(), buffer.text().len());
    }

    #[test]
    fn test_splice_ignores_explicit_command() {
        let buffer = insert_citation(r"\cite{a}", 7, &keys(&["x"]), Some("citet")).unwrap();
        assert_eq!(buffer.text(), r"\cite{a, x}");
    }

    #[test]
    fn test_new_macro_with_explicit_command() {
        let buffer = insert_citation("Shown by .", 9, &keys(&["x", "y"]), Some("citet")).unwrap();
        assert_eq!(buffer.text(), r"Shown by \citet{x, y}.");
        assert_eq!(&buffer.text()[buffer.caret()..], ".");
    }

    #[test]
    fn test_empty_keys_change_nothing() {
        let buffer = insert_citation(r"\cite{a", 3, &[], Some("citet")).unwrap();
        assert_eq!(buffer, TextBuffer::new(r"\cite{a", 3));
    }

    #[test]
    fn test_interactive_session() {
        let mut editor = CitationEditor::latex(CiteConfig::default()).unwrap();
        let mut selector = ScriptedSelector::new()
            .with_command(Selection::Selected("parencite".to_string()))
            .with_argument(Selection::Selected("see".to_string()))
            .with_argument(Selection::Selected(String::new()));

        let mut buffer = TextBuffer::at_end("As argued ");
        editor
            .insert_citation(&mut buffer, &mut selector, &keys(&["knuth84"]), false, None)
            .unwrap();
        assert_eq!(buffer.text(), r"As argued \parencite[see][]{knuth84}");
        assert_eq!(selector.argument_prompts, vec!["Prenote", "Postnote"]);

        // caret is past the macro, so a second insertion starts a new one
        editor
            .insert_citation(&mut buffer, &mut selector, &keys(&["b"]), true, None)
            .unwrap();
        assert_eq!(buffer.text(), r"As argued \parencite[see][]{knuth84}\cite{b}");
        assert_eq!(editor.history(), ["parencite"]);
    }

    #[test]
    fn test_abort_leaves_document_untouched() {
        let mut editor = CitationEditor::latex(CiteConfig::default()).unwrap();
        let mut selector = ScriptedSelector::new().with_command(Selection::Aborted);
        let mut buffer = TextBuffer::new("text", 2);

        let err = editor
            .insert_citation(&mut buffer, &mut selector, &keys(&["a"]), false, None)
            .unwrap_err();
        assert!(err.is_abort());
        assert_eq!(buffer, TextBuffer::new("text", 2));
    }

    #[test]
    fn test_custom_config_default_command() {
        let config = CiteConfig::from_toml_str(
            r#"
default-command = "citep"
prompt-for-cite-style = false
prompt-for-extra-arguments = false

[[commands]]
names = ["citep", "citet"]
args = [
    { label = "Prenote", optional = true },
    { label = "Keys" },
]
"#,
        )
        .unwrap();
        let mut editor = CitationEditor::latex(config).unwrap();
        let mut buffer = TextBuffer::at_end("");
        editor
            .insert_citation(&mut buffer, &mut DefaultSelector, &keys(&["a"]), false, None)
            .unwrap();
        assert_eq!(buffer.text(), r"\citep{a}");

        // `cite` is not configured, so its group is not spliced into
        let mut buffer = TextBuffer::new(r"\cite{z}", 7);
        editor
            .insert_citation(&mut buffer, &mut DefaultSelector, &keys(&["a"]), false, None)
            .unwrap();
        assert_eq!(buffer.text(), r"\cite{z\citep{a}}");
    }
}

// ============================================================================
// Command table
// ============================================================================

mod table {
    use super::*;

    #[test]
    fn test_default_table_has_one_key_slot_per_shape() {
        let table = CiteConfig::default().command_table().unwrap();
        assert!(!table.is_empty());
        for spec in table.specs() {
            assert!(spec.key_bearing_count() <= 1, "{:?}", spec.names);
        }
    }

    #[test]
    fn test_two_key_slots_rejected() {
        let spec = CommandSpec::new(
            ["doublecite"],
            Some(vec![ArgSlot::keys(), ArgSlot::keys()]),
        );
        let err = CommandTable::new([spec]).unwrap_err();
        assert!(matches!(err, CiteError::InvalidConfig { .. }));
    }

    #[test]
    fn test_config_rejects_two_key_slots() {
        let err = CiteConfig::from_toml_str(
            r#"
[[commands]]
names = ["doublecite"]
args = [{ label = "A", key = true }, { label = "B", key = true }]
"#,
        )
        .and_then(|config| config.command_table().map(|_| config))
        .unwrap_err();
        assert!(matches!(err, CiteError::InvalidConfig { .. }));
    }
}
