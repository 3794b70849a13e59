//! Default commands: pwd, ls, cd, mkdir, rm, touch, cat, help, history,
//! monitor.
//!
//! Each handler resolves its path arguments against the session's working
//! directory and reports failures as `Err`, which the dispatcher turns into
//! an `Error: ...` line.

use anyhow::Result;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::error::CommandError;
use crate::monitor::SystemSnapshot;
use crate::terminal::Terminal;

/// Register every default command on `terminal`
pub fn register_defaults(terminal: &mut Terminal) {
    terminal.register("pwd", pwd, "Print working directory");
    terminal.register("ls", ls, "List directory contents");
    terminal.register("cd", cd, "Change directory");
    terminal.register("mkdir", mkdir, "Create a directory");
    terminal.register("rm", rm, "Remove files or directories");
    terminal.register("touch", touch, "Create an empty file");
    terminal.register("cat", cat, "Display file contents");
    terminal.register("help", help, "Display help information");
    terminal.register("history", history, "Show previously executed commands (-t: with times)");
    terminal.register("monitor", monitor, "Display system monitoring information");
}

/// First argument that is not a flag
pub fn operand<'a>(args: &[&'a str]) -> Option<&'a str> {
    args.iter().copied().find(|a| !a.starts_with('-'))
}

pub fn pwd(terminal: &mut Terminal, _args: &[&str]) -> Result<String> {
    Ok(terminal.cwd_string())
}

pub fn ls(terminal: &mut Terminal, args: &[&str]) -> Result<String> {
    let long = args.contains(&"-l");
    let target = args.iter().find(|a| **a != "-l");

    let dir = match target {
        Some(t) => terminal.cwd().resolve(t),
        None => terminal.cwd().get_cwd().to_path_buf(),
    };
    let shown = target.copied().unwrap_or(".");

    let mut names: Vec<String> = fs::read_dir(&dir)
        .map_err(|e| CommandError::io(shown, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    if !long {
        return Ok(names.join("  "));
    }

    let mut lines = Vec::with_capacity(names.len());
    for name in &names {
        let meta = fs::metadata(dir.join(name)).map_err(|e| CommandError::io(name.as_str(), e))?;
        let kind = if meta.is_dir() { 'd' } else { '-' };
        lines.push(format!("{} {:8} {}", kind, meta.len(), name));
    }
    Ok(lines.join("\n"))
}

pub fn cd(terminal: &mut Terminal, args: &[&str]) -> Result<String> {
    match args.first() {
        Some(path) => {
            terminal.cwd_mut().cd(path)?;
        }
        None => {
            let home = dirs::home_dir().ok_or(CommandError::MissingArgument("Home directory"))?;
            terminal.cwd_mut().cd(home)?;
        }
    }
    Ok(String::new())
}

pub fn mkdir(terminal: &mut Terminal, args: &[&str]) -> Result<String> {
    let name = operand(args).ok_or(CommandError::MissingArgument("Directory name"))?;
    let path = terminal.cwd().resolve(name);
    fs::create_dir_all(&path).map_err(|e| CommandError::io(name, e))?;
    Ok(format!("Directory created: {}", name))
}

pub fn rm(terminal: &mut Terminal, args: &[&str]) -> Result<String> {
    let recursive = args.contains(&"-r");
    let target = args
        .iter()
        .find(|a| **a != "-r")
        .ok_or(CommandError::MissingArgument("Path"))?;

    if target.contains(['*', '?', '[']) {
        return remove_matching(terminal, target, recursive);
    }

    let path = terminal.cwd().resolve(target);
    remove_path(&path, target, recursive)
}

/// `rm` with a glob pattern, expanded relative to the working directory.
/// Only `pattern` is a glob; the directory part is matched literally.
fn remove_matching(terminal: &Terminal, pattern: &str, recursive: bool) -> Result<String> {
    let cwd = terminal.cwd().get_cwd();
    let base = glob::Pattern::escape(&cwd.to_string_lossy());
    let full = Path::new(&base).join(pattern);
    let matches: Vec<_> = glob::glob(&full.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .collect();

    if matches.is_empty() {
        return Err(CommandError::NoMatch(pattern.to_string()).into());
    }

    let mut removed = Vec::with_capacity(matches.len());
    for path in &matches {
        let shown = path
            .strip_prefix(cwd)
            .unwrap_or(path)
            .display()
            .to_string();
        removed.push(remove_path(path, &shown, recursive)?);
    }
    Ok(removed.join("\n"))
}

fn remove_path(path: &Path, shown: &str, recursive: bool) -> Result<String> {
    let meta = fs::symlink_metadata(path).map_err(|e| CommandError::io(shown, e))?;
    if meta.is_dir() {
        if !recursive {
            return Err(CommandError::IsADirectory(shown.to_string()).into());
        }
        fs::remove_dir_all(path).map_err(|e| CommandError::io(shown, e))?;
        Ok(format!("Directory removed: {}", shown))
    } else {
        fs::remove_file(path).map_err(|e| CommandError::io(shown, e))?;
        Ok(format!("File removed: {}", shown))
    }
}

pub fn touch(terminal: &mut Terminal, args: &[&str]) -> Result<String> {
    let name = operand(args).ok_or(CommandError::MissingArgument("File name"))?;
    let path = terminal.cwd().resolve(name);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| CommandError::io(name, e))?;
    Ok(format!("Created file: {}", name))
}

pub fn cat(terminal: &mut Terminal, args: &[&str]) -> Result<String> {
    let name = args.first().ok_or(CommandError::MissingArgument("File name"))?;
    let path = terminal.cwd().resolve(name);
    let content = fs::read_to_string(&path).map_err(|e| CommandError::io(*name, e))?;
    Ok(content)
}

pub fn help(terminal: &mut Terminal, args: &[&str]) -> Result<String> {
    let registry = terminal.registry();
    if let Some(name) = args.first() {
        if let Some(text) = registry.help(name) {
            return Ok(format!("{}: {}", name, text));
        }
    }
    let names: Vec<&str> = registry.names().collect();
    Ok(format!("Available commands:\n{}", names.join("\n")))
}

pub fn history(terminal: &mut Terminal, args: &[&str]) -> Result<String> {
    let timed = args.contains(&"-t");
    let lines: Vec<String> = terminal
        .history_entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if timed {
                let at = entry.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
                format!("{:4}  {}  {}", i + 1, at, entry.line)
            } else {
                format!("{:4}  {}", i + 1, entry.line)
            }
        })
        .collect();
    Ok(lines.join("\n"))
}

pub fn monitor(_terminal: &mut Terminal, _args: &[&str]) -> Result<String> {
    Ok(SystemSnapshot::capture().render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ShellConfig, TaggerKind};
    use tempfile::TempDir;

    fn terminal_in(dir: &TempDir) -> Terminal {
        let config = ShellConfig {
            start_dir: Some(dir.path().to_path_buf()),
            tagger: TaggerKind::None,
            ..ShellConfig::default()
        };
        Terminal::from_config(&config).unwrap()
    }

    #[test]
    fn test_pwd() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = terminal_in(&dir);
        assert_eq!(t.execute("pwd"), t.cwd_string());
    }

    #[test]
    fn test_mkdir_and_ls() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = terminal_in(&dir);

        assert_eq!(t.execute("mkdir testdir"), "Directory created: testdir");
        assert!(dir.path().join("testdir").is_dir());
        fs::write(dir.path().join("a.txt"), "abc").unwrap();

        assert_eq!(t.execute("ls"), "a.txt  testdir");

        let long = t.execute("ls -l");
        assert!(long.contains("d "));
        assert!(long.lines().any(|l| l.starts_with('-') && l.ends_with("a.txt") && l.contains(" 3 ")));
    }

    #[test]
    fn test_ls_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("inner.txt"), "").unwrap();
        let mut t = terminal_in(&dir);

        assert_eq!(t.execute("ls sub"), "inner.txt");
        assert!(t.execute("ls missing").starts_with("Error: missing"));
    }

    #[test]
    fn test_cd() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("testdir")).unwrap();
        let mut t = terminal_in(&dir);
        let root = t.cwd_string();

        assert_eq!(t.execute("cd testdir"), "");
        assert!(t.cwd_string().ends_with("testdir"));

        assert_eq!(t.execute("cd .."), "");
        assert_eq!(t.cwd_string(), root);

        assert!(t.execute("cd nowhere").starts_with("Error: Directory not found"));
    }

    #[test]
    fn test_rm() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("testdir")).unwrap();
        fs::write(dir.path().join("testfile.txt"), "test content").unwrap();
        let mut t = terminal_in(&dir);

        assert_eq!(t.execute("rm testfile.txt"), "File removed: testfile.txt");
        assert!(!dir.path().join("testfile.txt").exists());

        assert_eq!(
            t.execute("rm testdir"),
            "Error: testdir is a directory. Use -r to remove directories."
        );
        assert!(dir.path().join("testdir").exists());

        assert_eq!(t.execute("rm -r testdir"), "Directory removed: testdir");
        assert!(!dir.path().join("testdir").exists());

        assert_eq!(t.execute("rm"), "Error: Path required");
    }

    #[test]
    fn test_rm_glob() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.txt", "b.txt", "keep.md"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let mut t = terminal_in(&dir);

        assert_eq!(t.execute("rm *.txt"), "File removed: a.txt\nFile removed: b.txt");
        assert!(dir.path().join("keep.md").exists());
        assert_eq!(t.execute("rm *.txt"), "Error: No match for pattern: *.txt");
    }

    #[test]
    fn test_rm_glob_under_bracketed_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("proj[1]");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("a.log"), "").unwrap();
        fs::write(project.join("b.txt"), "").unwrap();

        let config = ShellConfig {
            start_dir: Some(project.clone()),
            tagger: TaggerKind::None,
            ..ShellConfig::default()
        };
        let mut t = Terminal::from_config(&config).unwrap();

        assert_eq!(t.execute("rm *.log"), "File removed: a.log");
        assert!(!project.join("a.log").exists());
        assert!(project.join("b.txt").exists());
    }

    #[test]
    fn test_flags_are_not_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = terminal_in(&dir);

        assert_eq!(t.execute("mkdir -p demo"), "Directory created: demo");
        assert!(dir.path().join("demo").is_dir());
        assert!(!dir.path().join("-p").exists());
        assert_eq!(t.context().last_created_dir, "demo");

        assert_eq!(t.execute("mkdir -p"), "Error: Directory name required");
    }

    #[test]
    fn test_touch_and_cat() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = terminal_in(&dir);

        assert_eq!(t.execute("touch notes.txt"), "Created file: notes.txt");
        assert_eq!(t.execute("cat notes.txt"), "");

        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        assert_eq!(t.execute("touch notes.txt"), "Created file: notes.txt");
        assert_eq!(t.execute("cat notes.txt"), "hello");
        assert!(t.execute("cat absent.txt").starts_with("Error: absent.txt"));
    }

    #[test]
    fn test_mkdir_requires_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = terminal_in(&dir);
        assert_eq!(t.execute("mkdir"), "Error: Directory name required");
    }

    #[test]
    fn test_help() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = terminal_in(&dir);

        assert_eq!(t.execute("help mkdir"), "mkdir: Create a directory");
        let all = t.execute("help");
        assert!(all.starts_with("Available commands:\n"));
        assert!(all.contains("\nrm"));
        assert!(!all.contains("cp"));
    }

    #[test]
    fn test_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = terminal_in(&dir);
        t.execute("pwd");
        t.execute("bogus");

        let out = t.execute("history");
        assert_eq!(out, "   1  pwd\n   2  bogus\n   3  history");
    }

    #[test]
    fn test_history_with_times() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = terminal_in(&dir);
        t.execute("pwd");

        let out = t.execute("history -t");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        // "   1  YYYY-MM-DD HH:MM:SS  pwd"
        let first = lines[0].trim_start();
        assert!(first.starts_with("1  "));
        assert!(first.ends_with("  pwd"));
        let stamp = &first[3..first.len() - 5];
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_monitor_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = terminal_in(&dir);

        let out = t.execute("monitor");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "System Monitor");
        assert_eq!(lines[1], "==============");
        assert!(lines[2].starts_with("CPU Usage: "));
        assert!(lines[3].starts_with("Memory: "));
        assert!(lines[4].starts_with("Disk: "));
        assert!(lines.contains(&"Top Processes:"));
        assert_eq!(t.context().last_command, "monitor");
    }
}
