//! One interactive session: registered commands, working directory,
//! history and execution context, plus the natural-language front door.
//!
//! Each `Terminal` owns its own state; run one per session.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::commands;
use crate::completions;
use crate::config::ShellConfig;
use crate::context::ExecutionContext;
use crate::cwd_tracker::CwdTracker;
use crate::registry::CommandRegistry;
use crate::resolver::{NlResolver, Resolution, Source};
use crate::tagger::Tagger;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub line: String,
    pub timestamp: DateTime<Utc>,
}

pub struct Terminal {
    cwd: CwdTracker,
    registry: CommandRegistry,
    history: Vec<HistoryEntry>,
    context: ExecutionContext,
    resolver: NlResolver,
    last_executed: Option<String>,
}

impl Terminal {
    /// Empty session: no commands registered
    pub fn new(start_dir: Option<PathBuf>, tagger: Box<dyn Tagger>) -> Result<Self> {
        Ok(Self {
            cwd: CwdTracker::new(start_dir),
            registry: CommandRegistry::new(),
            history: Vec::new(),
            context: ExecutionContext::new(),
            resolver: NlResolver::new(tagger)?,
            last_executed: None,
        })
    }

    /// Session with the default command set, configured from `config`
    pub fn from_config(config: &ShellConfig) -> Result<Self> {
        let mut terminal = Self::new(config.start_dir.clone(), config.tagger.build())?;
        terminal.resolver = terminal.resolver.with_autocorrect(config.autocorrect);
        commands::register_defaults(&mut terminal);
        Ok(terminal)
    }

    pub fn register<F>(&mut self, name: &str, handler: F, help: &str)
    where
        F: Fn(&mut Terminal, &[&str]) -> Result<String> + Send + Sync + 'static,
    {
        self.registry.register(name, handler, help);
    }

    /// Run one command line.
    ///
    /// Blank input does nothing. Anything else is recorded in history, then
    /// dispatched on its first word. Faults come back as `Error: ...` and
    /// leave the execution context untouched.
    pub fn execute(&mut self, line: &str) -> String {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        self.history.push(HistoryEntry {
            line: line.to_string(),
            timestamp: Utc::now(),
        });
        self.last_executed = Some(line.to_string());

        let mut parts = trimmed.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let handler = match self.registry.get(command) {
            Some(cmd) => cmd.handler(),
            None => {
                warn!(command, "command not found");
                return format!("Command not found: {}", command);
            }
        };

        match handler(self, args.as_slice()) {
            Ok(result) => {
                self.context.update(line, &result);
                info!(line = trimmed, "executed");
                result
            }
            Err(e) => {
                warn!(line = trimmed, error = %e, "command failed");
                format!("Error: {}", e)
            }
        }
    }

    pub fn get_prompt(&self) -> String {
        format!("{} $ ", self.cwd.get_cwd_string())
    }

    /// Natural-language rewrite of `text`; `text` itself when nothing applies
    pub fn resolve(&self, text: &str) -> String {
        self.resolver
            .resolve(text, &self.context, self.registry.names())
            .line
    }

    /// Registered commands close to the leading word of `text`
    pub fn suggest(&self, text: &str) -> Vec<String> {
        self.resolver.suggest(text, self.registry.names())
    }

    /// What a front end should dispatch for `input`.
    ///
    /// A line whose first word is a registered command is taken as typed.
    /// Otherwise the resolver runs; close command names are reported either
    /// way so the user can be told.
    pub fn interpret(&self, input: &str) -> Resolution {
        match input.split_whitespace().next() {
            Some(first) if self.registry.contains(first) => Resolution::unchanged(input, Source::Direct),
            Some(_) => {
                let mut resolution = self.resolver.resolve(input, &self.context, self.registry.names());
                if resolution.suggestions.is_empty() {
                    resolution.suggestions = self.suggest(input);
                }
                resolution
            }
            None => Resolution::unchanged(input, Source::Unresolved),
        }
    }

    /// TAB completion candidates for a partially typed line
    pub fn complete(&self, line: &str) -> Vec<String> {
        completions::complete(line, &self.registry, self.cwd.get_cwd())
    }

    /// Interpret then execute
    pub fn run(&mut self, input: &str) -> (Resolution, String) {
        let resolution = self.interpret(input);
        let output = self.execute(&resolution.line);
        (resolution, output)
    }

    pub fn cwd(&self) -> &CwdTracker {
        &self.cwd
    }

    pub fn cwd_mut(&mut self) -> &mut CwdTracker {
        &mut self.cwd
    }

    pub fn cwd_string(&self) -> String {
        self.cwd.get_cwd_string()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn tagger_name(&self) -> &'static str {
        self.resolver.tagger_name()
    }

    /// Executed lines, oldest first
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|e| e.line.as_str())
    }

    pub fn history_entries(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Last line handed to `execute`, whatever its outcome
    pub fn last_executed(&self) -> Option<&str> {
        self.last_executed.as_deref()
    }
}
