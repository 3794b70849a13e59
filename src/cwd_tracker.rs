//! cwdTracker - working directory state for one terminal session
//! - Resolves `cd` targets against the current directory
//! - Only ever points at a directory that existed when it was set

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CommandError;

/// Directory context tracker
#[derive(Debug, Clone)]
pub struct CwdTracker {
    cwd: PathBuf,
}

impl CwdTracker {
    /// Create a new CwdTracker
    /// - initial: starting directory (defaults to current dir)
    pub fn new(initial: Option<PathBuf>) -> Self {
        let cwd = initial
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("/"));

        let cwd = cwd.canonicalize().unwrap_or(cwd);

        Self { cwd }
    }

    /// Get current working directory
    pub fn get_cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get current working directory as string
    pub fn get_cwd_string(&self) -> String {
        self.cwd.display().to_string()
    }

    /// Resolve a path argument relative to the current directory
    pub fn resolve(&self, target: impl AsRef<Path>) -> PathBuf {
        let target = target.as_ref();
        if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.cwd.join(target)
        }
    }

    /// Change directory. `..` is lexical (parent of the current path),
    /// anything else must resolve to an existing directory.
    pub fn cd(&mut self, target_path: impl AsRef<Path>) -> Result<&Path, CommandError> {
        let target = target_path.as_ref();

        let resolved = if target == Path::new("..") {
            match self.cwd.parent() {
                Some(parent) => parent.to_path_buf(),
                None => self.cwd.clone(),
            }
        } else {
            self.resolve(target)
        };

        let metadata = match fs::metadata(&resolved) {
            Ok(m) => m,
            Err(_) => return Err(CommandError::DirectoryNotFound(resolved)),
        };
        if !metadata.is_dir() {
            return Err(CommandError::NotADirectory(resolved));
        }

        self.cwd = resolved.canonicalize().unwrap_or(resolved);
        Ok(&self.cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cwd_tracker_basic() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tracker = CwdTracker::new(Some(temp_dir.path().to_path_buf()));

        assert_eq!(tracker.get_cwd(), temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_cd_to_parent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        std::fs::create_dir(root.join("child")).unwrap();
        let mut tracker = CwdTracker::new(Some(root.join("child")));

        assert_eq!(tracker.cd("..").unwrap(), root.as_path());
        assert_eq!(tracker.get_cwd(), root.as_path());
    }

    #[test]
    fn test_cd_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut tracker = CwdTracker::new(Some(temp_dir.path().to_path_buf()));
        let before = tracker.get_cwd().to_path_buf();

        let err = tracker.cd("does-not-exist").unwrap_err();
        assert!(err.to_string().starts_with("Directory not found"));
        assert_eq!(tracker.get_cwd(), before.as_path());
    }

    #[test]
    fn test_cd_into_file_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("plain.txt"), "x").unwrap();
        let mut tracker = CwdTracker::new(Some(temp_dir.path().to_path_buf()));

        assert!(matches!(
            tracker.cd("plain.txt"),
            Err(CommandError::NotADirectory(_))
        ));
    }
}
