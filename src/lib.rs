//! nlterm_core - command shell with a natural-language front end
//!
//! Modules:
//! - terminal: Session, dispatcher, history and prompt
//! - registry: Command name -> handler + help text
//! - commands: Default filesystem commands (pwd, ls, cd, mkdir, rm, ...)
//! - completions: TAB completion for command names and paths
//! - monitor: CPU / memory / disk / process snapshot for `monitor`
//! - cwd_tracker: Working directory state
//! - context: Last command / last created file and directory
//! - autocorrect: Edit-distance suggestions for mistyped commands
//! - tagger: Part-of-speech tagging capability and verb/noun intents
//! - patterns: Phrase rules and context references ("the file I just created")
//! - resolver: Natural-language resolution pipeline
//! - config: YAML session configuration
//! - error: Command faults

pub mod autocorrect;
pub mod commands;
pub mod completions;
pub mod config;
pub mod context;
pub mod cwd_tracker;
pub mod error;
pub mod monitor;
pub mod patterns;
pub mod registry;
pub mod resolver;
pub mod tagger;
pub mod terminal;

// Re-export key types for convenience
pub use autocorrect::{levenshtein_distance, suggest, Suggestion, MAX_DISTANCE};

pub use config::{ShellConfig, TaggerKind};

pub use context::ExecutionContext;

pub use cwd_tracker::CwdTracker;

pub use error::CommandError;

pub use monitor::SystemSnapshot;

pub use patterns::{resolve_anaphora, PatternRule, PatternRules};

pub use registry::{Command, CommandRegistry, Handler};

pub use resolver::{NlResolver, Resolution, Source};

pub use tagger::{LexiconTagger, NoopTagger, PartOfSpeech, Tagger, TaggerResolver, Token};

pub use terminal::{HistoryEntry, Terminal};
