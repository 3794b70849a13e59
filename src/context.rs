//! Execution context: what the session last did and last created.
//!
//! Owned by a [`Terminal`](crate::terminal::Terminal), one per session.
//! Updated only after a handler completes successfully. Nothing here checks
//! that a remembered file or directory still exists; a stale name is handed
//! to the next command as-is and fails there.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub last_command: String,
    pub last_created_file: String,
    pub last_created_dir: String,
    pub last_modified_file: String,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully executed line.
    ///
    /// `mkdir [-p] X` remembers the directory, `touch X` and `... > X`
    /// remember the file. Every other command only replaces `last_command`; fields it
    /// does not own keep their previous values.
    pub fn update(&mut self, command_line: &str, _result: &str) {
        let line = command_line.trim();
        self.last_command = line.to_string();

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        if let Some(file) = redirect_target(line) {
            self.remember_file(file);
            return;
        }

        // the name the handler acted on: first argument that is not a flag
        let operand = rest.split_whitespace().find(|a| !a.starts_with('-'));
        match (head, operand) {
            ("mkdir", Some(dir)) => {
                self.last_created_dir = dir.to_string();
            }
            ("touch", Some(file)) => {
                self.remember_file(file);
            }
            _ => {}
        }
    }

    fn remember_file(&mut self, name: &str) {
        self.last_created_file = name.to_string();
        self.last_modified_file = name.to_string();
    }
}

/// File name after a trailing `> name`, if the line ends in one
fn redirect_target(line: &str) -> Option<&str> {
    let (command, target) = line.rsplit_once('>')?;
    let target = target.trim();
    if command.trim().is_empty() || target.is_empty() || target.contains(char::is_whitespace) {
        return None;
    }
    Some(target)
}
