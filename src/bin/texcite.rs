//! texcite CLI - Locate, extract and insert LaTeX citation keys

use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use texcite::{
    bibliography::local_bib_files,
    document::cited_keys,
    position::{line_column, offset_at},
    ArgSlot, CitationEditor, CiteConfig, CiteError, CiteResult, DefaultSelector, EditBuffer,
    KeyList, KeyToken, MacroMatch, Selection, Selector, TextBuffer,
};

#[derive(Parser)]
#[command(name = "texcite")]
#[command(version)]
#[command(about = "texcite - Locate, extract and insert LaTeX citation keys", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// TOML file with citation commands and prompt settings
    #[arg(short, long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the citation, its keys and the key at a position
    At {
        /// Input file path (reads from stdin if not provided)
        input: Option<String>,

        #[command(flatten)]
        position: PositionArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Insert citation keys at a position
    Insert {
        /// Input file path
        input: String,

        /// Keys to insert
        #[arg(required = true)]
        keys: Vec<String>,

        #[command(flatten)]
        position: PositionArgs,

        /// Command for a new citation (skips the command prompt)
        #[arg(short = 'C', long = "command")]
        cite_command: Option<String>,

        /// Invert the configured "prompt for cite style" setting
        #[arg(short, long)]
        invert_prompt: bool,

        /// Never prompt; use defaults for every question
        #[arg(long)]
        no_prompt: bool,

        /// Output file path (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List every cited key in a document
    Keys {
        /// Input file path (reads from stdin if not provided)
        input: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the bibliography files a document declares
    Bib {
        /// Input file path (reads from stdin if not provided)
        input: Option<String>,
    },

    /// Show the configured citation commands
    Commands,
}

#[derive(Args)]
#[group(required = true, multiple = true)]
struct PositionArgs {
    /// Byte offset of the caret
    #[arg(long, conflicts_with_all = ["line", "column"])]
    offset: Option<usize>,

    /// Line of the caret (1-indexed)
    #[arg(short, long, requires = "column")]
    line: Option<usize>,

    /// Column of the caret (1-indexed, in characters)
    #[arg(long, requires = "line")]
    column: Option<usize>,
}

impl PositionArgs {
    /// Byte offset of the caret in `text`
    ///
    /// Exits with a usage error when the position is not in the document.
    fn resolve(&self, text: &str) -> usize {
        let (offset, described) = match (self.offset, self.line, self.column) {
            (Some(offset), _, _) => (
                Some(offset).filter(|&o| text.is_char_boundary(o)),
                format!("offset {}", offset),
            ),
            (None, Some(line), Some(column)) => (
                offset_at(text, line, column),
                format!("line {}, column {}", line, column),
            ),
            _ => (None, "no position".to_string()),
        };

        offset.unwrap_or_else(|| {
            Cli::command()
                .error(
                    ErrorKind::ValueValidation,
                    format!(
                        "{} is not a character position in the document ({} bytes)",
                        described,
                        text.len()
                    ),
                )
                .exit()
        })
    }
}

/// Prompts on the terminal: questions on stderr, answers from stdin
struct TerminalSelector;

fn prompt_line(prompt: &str) -> Selection<String> {
    eprint!("{}", prompt);
    let _ = io::stderr().flush();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => Selection::Aborted,
        Ok(_) => Selection::Selected(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

impl Selector for TerminalSelector {
    fn choose_command(
        &mut self,
        candidates: &[String],
        history: &[String],
        default: &str,
    ) -> Selection<String> {
        eprintln!("Citation commands: {}", candidates.join(" "));
        if !history.is_empty() {
            eprintln!("Recently used: {}", history.join(" "));
        }
        prompt_line(&format!("Citation command (default {}): ", default))
    }

    fn read_argument(&mut self, command: &str, slot: &ArgSlot) -> Selection<String> {
        let kind = if slot.optional { "optional" } else { "required" };
        prompt_line(&format!("\\{} {} ({}): ", command, slot.label, kind))
    }
}

#[derive(Serialize)]
struct PointReport {
    citation: Option<MacroMatch>,
    keys: Option<KeyList>,
    key: Option<KeyToken>,
}

fn read_input(input: Option<&str>) -> CiteResult<String> {
    match input {
        Some(path) if path != "-" => Ok(fs::read_to_string(path)?),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> CiteResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CiteError::IoError {
        message: e.to_string(),
    })
}

fn describe_shape(slots: Option<&[ArgSlot]>) -> String {
    match slots {
        None => "{Keys}".to_string(),
        Some(slots) => slots
            .iter()
            .map(|slot| match (slot.optional, slot.key_bearing) {
                (true, _) => format!("[{}]", slot.label),
                (false, true) => format!("{{{}*}}", slot.label),
                (false, false) => format!("{{{}}}", slot.label),
            })
            .collect(),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CiteResult<()> {
    let config = match cli.config {
        Some(ref path) => {
            log::debug!("Using config from: {}", path);
            CiteConfig::load(path)?
        }
        None => CiteConfig::default(),
    };

    match cli.command {
        Commands::At {
            input,
            position,
            json,
        } => {
            let text = read_input(input.as_deref())?;
            let pos = position.resolve(&text);
            let editor = CitationEditor::latex(config)?;

            let report = PointReport {
                citation: editor.locate(&text, pos)?,
                keys: editor.citation_at_point(&text, pos)?,
                key: editor.key_at_point(&text, pos)?,
            };

            if json {
                println!("{}", to_json(&report)?);
                return Ok(());
            }

            match (&report.citation, &report.keys) {
                (Some(found), Some(list)) => {
                    let (line, column) = line_column(&text, found.span.start);
                    println!("command: \\{}", found.command);
                    println!(
                        "span: {}..{} (line {}, column {})",
                        found.span.start, found.span.end, line, column
                    );
                    println!("keys: {}", list.keys.join(", "));
                    match report.key {
                        Some(key) => {
                            println!("key at point: {} ({}..{})", key.text, key.span.start, key.span.end)
                        }
                        None => println!("key at point: -"),
                    }
                }
                _ => println!("no citation at {}", pos),
            }
            Ok(())
        }

        Commands::Insert {
            input,
            keys,
            position,
            cite_command,
            invert_prompt,
            no_prompt,
            output,
        } => {
            let text = read_input(Some(&input))?;
            let pos = position.resolve(&text);
            let mut editor = CitationEditor::latex(config)?;
            let mut buffer = TextBuffer::new(text, pos);

            // stdin carries the document when the input is `-`
            let interactive = !no_prompt && input != "-";
            let mut terminal = TerminalSelector;
            let mut defaults = DefaultSelector;
            let selector: &mut dyn Selector = if interactive {
                &mut terminal
            } else {
                &mut defaults
            };

            editor.insert_citation(
                &mut buffer,
                selector,
                &keys,
                invert_prompt,
                cite_command.as_deref(),
            )?;

            let (line, column) = line_column(buffer.text(), buffer.caret());
            let edited = buffer.into_text();
            match output {
                Some(path) => {
                    fs::write(&path, &edited)?;
                    eprintln!(
                        "✓ Output written to: {} (caret at line {}, column {})",
                        path, line, column
                    );
                }
                None => {
                    print!("{}", edited);
                    io::stdout().flush()?;
                }
            }
            Ok(())
        }

        Commands::Keys { input, json } => {
            let text = read_input(input.as_deref())?;
            let table = config.command_table()?;
            let keys = cited_keys(&text, &table);

            if json {
                println!("{}", to_json(&keys)?);
            } else {
                for key in keys {
                    let (line, column) = line_column(&text, key.span.start);
                    println!("{}:{}\t{}", line, column, key.text);
                }
            }
            Ok(())
        }

        Commands::Bib { input } => {
            let text = read_input(input.as_deref())?;
            for file in local_bib_files(&text) {
                println!("{}", file);
            }
            Ok(())
        }

        Commands::Commands => {
            let table = config.command_table()?;
            println!("default: \\{}", config.default_command);
            println!("prompt for cite style: {}", config.prompt_for_cite_style);
            println!(
                "prompt for extra arguments: {}",
                config.prompt_for_extra_arguments
            );
            for spec in table.specs() {
                println!();
                println!("{}", describe_shape(spec.arg_slots.as_deref()));
                for name in &spec.names {
                    println!("  \\{}", name);
                }
            }
            Ok(())
        }
    }
}
