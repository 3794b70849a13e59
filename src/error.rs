//! Typed faults raised by command handlers.
//!
//! The dispatcher never lets these escape; they are rendered as
//! `Error: <message>` at the `Terminal::execute` boundary.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0} required")]
    MissingArgument(&'static str),

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("{0} is a directory. Use -r to remove directories.")]
    IsADirectory(String),

    #[error("No match for pattern: {0}")]
    NoMatch(String),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CommandError::MissingArgument("Directory name").to_string(),
            "Directory name required"
        );
        assert_eq!(
            CommandError::IsADirectory("demo".into()).to_string(),
            "demo is a directory. Use -r to remove directories."
        );
        assert_eq!(
            CommandError::DirectoryNotFound(PathBuf::from("/nope")).to_string(),
            "Directory not found: /nope"
        );
    }
}
