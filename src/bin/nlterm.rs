/*!
 * nlterm - interactive shell with a natural-language front end
 *
 * Type commands (`ls`, `mkdir demo`) or requests ("create a folder called
 * demo", "where am i"). The interactive shell completes command names and
 * paths on TAB and keeps its history in ~/.nlterm/history. One-shot
 * subcommands expose the resolver for scripting and emit JSON on request.
 */

use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use nlterm_core::config::default_history_path;
use nlterm_core::{Resolution, ShellConfig, Source, TaggerKind, Terminal};

#[derive(Parser)]
#[command(name = "nlterm")]
#[command(about = "Command shell that understands plain-English requests", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.nlterm/config.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Starting directory
    #[arg(long, global = true)]
    cwd: Option<PathBuf>,

    /// Disable part-of-speech tagging; phrase rules only
    #[arg(long, global = true)]
    no_tagger: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Repl,

    /// Interpret and execute a single line
    Run {
        line: Vec<String>,

        /// Emit the resolution and output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show what a line would be interpreted as, without running it
    Resolve {
        text: Vec<String>,

        #[arg(short, long)]
        json: bool,
    },

    /// List registered commands close to a mistyped word
    Suggest { word: String },

    /// Print completion candidates for a partial line
    Complete {
        #[arg(allow_hyphen_values = true)]
        line: String,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ShellConfig::load_or_default(cli.config.as_deref())?;
    if cli.cwd.is_some() {
        config.start_dir = cli.cwd;
    }
    if cli.no_tagger {
        config.tagger = TaggerKind::None;
    }

    init_logging(&config.log_level);

    let mut terminal = Terminal::from_config(&config)?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl(terminal)?,
        Commands::Run { line, json } => {
            let (resolution, output) = terminal.run(&line.join(" "));
            if json {
                let event = serde_json::json!({
                    "resolution": resolution,
                    "output": output,
                    "cwd": terminal.cwd_string(),
                });
                println!("{}", event);
            } else if !output.is_empty() {
                println!("{}", output);
            }
        }
        Commands::Resolve { text, json } => {
            let resolution = terminal.interpret(&text.join(" "));
            if json {
                println!("{}", serde_json::to_string(&resolution)?);
            } else {
                println!("{}", resolution.line);
            }
        }
        Commands::Suggest { word } => {
            let names: Vec<&str> = terminal.registry().names().collect();
            for s in nlterm_core::autocorrect::rank(&word.to_lowercase(), names) {
                println!("{}\t{}", s.command, s.distance);
            }
        }
        Commands::Complete { line } => {
            for candidate in terminal.complete(&line) {
                println!("{}", candidate);
            }
        }
        Commands::Version => {
            println!("nlterm v{}", env!("CARGO_PKG_VERSION"));
            println!("tagger: {}", terminal.tagger_name());
        }
    }

    Ok(())
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env("NLTERM_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Line-editor glue: TAB completion comes from the session itself
struct ShellHelper {
    terminal: Rc<RefCell<Terminal>>,
}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let head = &line[..pos];
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        Ok((start, self.terminal.borrow().complete(head)))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

fn repl(terminal: Terminal) -> Result<()> {
    let terminal = Rc::new(RefCell::new(terminal));

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();
    let mut editor: Editor<ShellHelper, DefaultHistory> = Editor::with_config(config)?;
    editor.set_helper(Some(ShellHelper {
        terminal: Rc::clone(&terminal),
    }));

    let history_path = default_history_path();
    if let Some(path) = history_path.as_deref().filter(|p| p.exists()) {
        if let Err(e) = editor.load_history(path) {
            warn!(path = %path.display(), error = %e, "could not load history");
        }
    }

    let mut out = io::stdout();
    writeln!(out, "nlterm - type 'help' for commands, or just say what you want")?;
    writeln!(out, "Type 'exit' to quit, TAB completes commands and paths")?;

    loop {
        let prompt = terminal.borrow().get_prompt();
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }
        if line.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        let mut session = terminal.borrow_mut();
        let resolution = session.interpret(&line);
        report(&mut out, &resolution)?;

        let output = session.execute(&resolution.line);
        if !output.is_empty() {
            writeln!(out, "{}", output)?;
        }
    }

    writeln!(out, "Goodbye!")?;
    if let Some(path) = history_path.as_deref() {
        save_history(&mut editor, path);
    }
    Ok(())
}

fn save_history(editor: &mut Editor<ShellHelper, DefaultHistory>, path: &Path) {
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            warn!(path = %dir.display(), error = %e, "could not create history directory");
            return;
        }
    }
    if let Err(e) = editor.save_history(path) {
        warn!(path = %path.display(), error = %e, "could not save history");
    }
}

/// Tell the user how their input was taken
fn report(out: &mut impl Write, resolution: &Resolution) -> io::Result<()> {
    if matches!(resolution.source, Source::Suggestion | Source::Unresolved) {
        match resolution.suggestions.as_slice() {
            [] => {}
            [only] => writeln!(out, "Did you mean: {}?", only)?,
            many => writeln!(out, "Did you mean one of these: {}?", many.join(", "))?,
        }
    }
    if resolution.is_rewritten() {
        writeln!(out, "Interpreted as: {}", resolution.line)?;
    }
    Ok(())
}
