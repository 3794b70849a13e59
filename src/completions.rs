//! TAB completion candidates for a partially typed line.
//!
//! The first word completes against registered command names; later words
//! complete against paths relative to the session's working directory.

use std::fs;
use std::path::Path;

use crate::registry::CommandRegistry;

/// Candidates for the word being typed at the end of `line`, sorted.
/// Directories carry a trailing `/`.
pub fn complete(line: &str, registry: &CommandRegistry, cwd: &Path) -> Vec<String> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return complete_commands(registry, "");
    }

    if parts.len() == 1 && !line.ends_with(char::is_whitespace) {
        return complete_commands(registry, parts[0]);
    }

    let current = if line.ends_with(char::is_whitespace) {
        ""
    } else {
        parts.last().copied().unwrap_or("")
    };
    complete_files(cwd, current)
}

fn complete_commands(registry: &CommandRegistry, prefix: &str) -> Vec<String> {
    registry
        .names()
        .filter(|name| name.starts_with(prefix))
        .map(str::to_string)
        .collect()
}

fn complete_files(cwd: &Path, prefix: &str) -> Vec<String> {
    let (dir_part, file_prefix) = match prefix.rfind('/') {
        Some(idx) => (&prefix[..=idx], &prefix[idx + 1..]),
        None => ("", prefix),
    };

    let dir = if dir_part.is_empty() {
        cwd.to_path_buf()
    } else if Path::new(dir_part).is_absolute() {
        Path::new(dir_part).to_path_buf()
    } else {
        cwd.join(dir_part)
    };

    let Ok(entries) = fs::read_dir(&dir) else {
        return vec![];
    };

    let mut candidates: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(file_prefix) {
                return None;
            }
            let full = format!("{}{}", dir_part, name);
            Some(if entry.path().is_dir() {
                format!("{}/", full)
            } else {
                full
            })
        })
        .collect();
    candidates.sort();
    candidates
}
