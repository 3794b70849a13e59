//! Command registry: name -> handler + help text.
//!
//! Filled by the host at startup, read by the dispatcher and the
//! suggestion engine afterwards.

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::terminal::Terminal;

/// A command implementation. Receives the session and the raw argument
/// tokens, returns the text to show (possibly empty) or a fault.
pub type Handler = Arc<dyn Fn(&mut Terminal, &[&str]) -> Result<String> + Send + Sync>;

#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub help: String,
    handler: Handler,
}

impl Command {
    pub fn handler(&self) -> Handler {
        Arc::clone(&self.handler)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `name`. The last registration wins.
    pub fn register<F>(&mut self, name: &str, handler: F, help: &str)
    where
        F: Fn(&mut Terminal, &[&str]) -> Result<String> + Send + Sync + 'static,
    {
        self.commands.insert(
            name.to_string(),
            Command {
                name: name.to_string(),
                help: help.to_string(),
                handler: Arc::new(handler),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn help(&self, name: &str) -> Option<&str> {
        self.commands.get(name).map(|c| c.help.as_str())
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
