//! Phrase rules: ordered regular expressions that rewrite common requests
//! into command lines, plus the context-dependent ("the file I just
//! created", "undo") rules that run ahead of everything else.
//!
//! Input is expected lower-cased. The first matching rule wins.

use regex::{Captures, Regex};

use crate::context::ExecutionContext;

/// One rewrite: when `regex` matches, `build` produces the command line
pub struct PatternRule {
    pub name: &'static str,
    regex: Regex,
    build: fn(&Captures) -> String,
}

impl PatternRule {
    fn new(name: &'static str, pattern: &str, build: fn(&Captures) -> String) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
            build,
        })
    }

    pub fn apply(&self, text: &str) -> Option<String> {
        self.regex.captures(text).map(|caps| (self.build)(&caps))
    }
}

fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// The fixed rule table, highest priority first
pub struct PatternRules {
    rules: Vec<PatternRule>,
}

impl PatternRules {
    pub fn new() -> Result<Self, regex::Error> {
        let rules = vec![
            PatternRule::new(
                "create-directory",
                r"create (a )?(directory|folder|dir) (called |named )?([\w\d_-]+)",
                |caps| format!("mkdir {}", group(caps, 4)),
            )?,
            PatternRule::new(
                "move-copy",
                r"(move|copy) ([\w\d_.-]+) (to|into) ([\w\d_/\\-]+)",
                |caps| {
                    let action = if group(caps, 1) == "copy" { "cp" } else { "mv" };
                    format!("{} {} {}", action, group(caps, 2), group(caps, 4))
                },
            )?,
            PatternRule::new(
                "delete-by-extension",
                r"delete (all|the) ([\w\d_.-]+) files",
                |caps| format!("rm *.{}", group(caps, 2)),
            )?,
            PatternRule::new(
                "list",
                r"(list|show) (all |the )?(files|directories)",
                |_| "ls".to_string(),
            )?,
            PatternRule::new(
                "current-directory",
                r"(what|where).*current directory|where am i",
                |_| "pwd".to_string(),
            )?,
        ];

        Ok(Self { rules })
    }

    /// First matching rule's name and command line
    pub fn resolve(&self, text: &str) -> Option<(&'static str, String)> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(text).map(|line| (rule.name, line)))
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }
}

const FILE_REFERENCES: [&str; 2] = ["last file", "the file i just created"];
const DIR_REFERENCES: [&str; 4] = [
    "last directory",
    "last folder",
    "the folder i just created",
    "the directory i just created",
];

fn mentions(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

/// Rules that read the execution context. A rule whose referent was never
/// set does not fire.
pub fn resolve_anaphora(text: &str, ctx: &ExecutionContext) -> Option<String> {
    if mentions(text, &FILE_REFERENCES) {
        let file = &ctx.last_created_file;
        if mentions(text, &["delete", "remove"]) {
            if !file.is_empty() {
                return Some(format!("rm {}", file));
            }
        } else if mentions(text, &["show", "display", "cat"]) && !file.is_empty() {
            return Some(format!("cat {}", file));
        }
    }

    if mentions(text, &DIR_REFERENCES) {
        let dir = &ctx.last_created_dir;
        if mentions(text, &["delete", "remove"]) {
            if !dir.is_empty() {
                return Some(format!("rm -r {}", dir));
            }
        } else if mentions(text, &["go to", "change to", "cd"]) && !dir.is_empty() {
            return Some(format!("cd {}", dir));
        }
    }

    // single level only: never walks further back than the last command
    if mentions(text, &["undo", "revert"]) && ctx.last_command.starts_with("cd ") {
        return Some("cd ..".to_string());
    }

    None
}
