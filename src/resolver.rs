//! Natural-language front end.
//!
//! Stages, first hit wins:
//! 1. context rules (`rm <last file>`, `cd ..` after a `cd`, ...)
//! 2. tagger rules (`touch NAME`, `cd NAME`)
//! 3. pattern rules (`mkdir`, `mv`/`cp`, `rm *.ext`, `ls`, `pwd`)
//! 4. a single close command name replaces the leading word
//!
//! When nothing fires the input comes back untouched.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::autocorrect;
use crate::context::ExecutionContext;
use crate::patterns::{resolve_anaphora, PatternRules};
use crate::tagger::{Tagger, TaggerResolver};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Leading word is already a registered command
    Direct,
    Context,
    Tagger,
    Pattern,
    Suggestion,
    Unresolved,
}

/// Outcome of interpreting one line of input
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub input: String,
    /// What to hand to the dispatcher; never empty unless `input` was
    pub line: String,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// Command names close to the leading word
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub suggestions: Vec<String>,
}

impl Resolution {
    fn new(input: &str, line: String, source: Source) -> Self {
        Self {
            input: input.to_string(),
            line,
            source,
            rule: None,
            suggestions: Vec::new(),
        }
    }

    pub fn unchanged(input: &str, source: Source) -> Self {
        Self::new(input, input.to_string(), source)
    }

    /// True when the front end should say what the input was taken as
    pub fn is_rewritten(&self) -> bool {
        self.line != self.input
    }
}

pub struct NlResolver {
    tagger: TaggerResolver,
    patterns: PatternRules,
    autocorrect: bool,
}

impl NlResolver {
    pub fn new(tagger: Box<dyn Tagger>) -> Result<Self> {
        Ok(Self {
            tagger: TaggerResolver::new(tagger),
            patterns: PatternRules::new()?,
            autocorrect: true,
        })
    }

    pub fn with_autocorrect(mut self, enabled: bool) -> Self {
        self.autocorrect = enabled;
        self
    }

    pub fn tagger_name(&self) -> &'static str {
        self.tagger.tagger_name()
    }

    /// Suggestions for the leading word of `text`
    pub fn suggest<'a, I>(&self, text: &str, command_names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match text.split_whitespace().next() {
            Some(first) => autocorrect::suggest(&first.to_lowercase(), command_names),
            None => Vec::new(),
        }
    }

    pub fn resolve<'a, I>(&self, text: &str, ctx: &ExecutionContext, command_names: I) -> Resolution
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lower = text.trim().to_lowercase();
        if lower.is_empty() {
            return Resolution::unchanged(text, Source::Unresolved);
        }

        if let Some(line) = resolve_anaphora(&lower, ctx) {
            debug!(input = %text, %line, "resolved from context");
            return Resolution::new(text, line, Source::Context);
        }

        if let Some(line) = self.tagger.resolve(&lower) {
            debug!(input = %text, %line, tagger = self.tagger.tagger_name(), "resolved by tagger");
            return Resolution::new(text, line, Source::Tagger);
        }

        if let Some((rule, line)) = self.patterns.resolve(&lower) {
            debug!(input = %text, %line, rule, "resolved by pattern");
            let mut resolution = Resolution::new(text, line, Source::Pattern);
            resolution.rule = Some(rule.to_string());
            return resolution;
        }

        let suggestions = self.suggest(&lower, command_names);
        if self.autocorrect {
            if let [only] = suggestions.as_slice() {
                let line = autocorrect::rebuild_command(only, text);
                debug!(input = %text, %line, "substituted closest command");
                let mut resolution = Resolution::new(text, line, Source::Suggestion);
                resolution.suggestions = suggestions;
                return resolution;
            }
        }

        debug!(input = %text, candidates = suggestions.len(), "no resolution");
        let mut resolution = Resolution::unchanged(text, Source::Unresolved);
        resolution.suggestions = suggestions;
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::{LexiconTagger, NoopTagger};

    const NAMES: [&str; 5] = ["cd", "ls", "mkdir", "pwd", "touch"];

    fn resolver() -> NlResolver {
        NlResolver::new(Box::new(LexiconTagger::new())).unwrap()
    }

    #[test]
    fn test_pattern_resolution() {
        let r = resolver().resolve("Create a Folder called demo", &ExecutionContext::new(), NAMES);
        assert_eq!(r.line, "mkdir demo");
        assert_eq!(r.source, Source::Pattern);
        assert_eq!(r.rule.as_deref(), Some("create-directory"));
    }

    #[test]
    fn test_context_before_tagger_and_patterns() {
        let mut ctx = ExecutionContext::new();
        ctx.update("mkdir demo", "");
        let r = resolver().resolve("delete the folder I just created", &ctx, NAMES);
        assert_eq!(r.line, "rm -r demo");
        assert_eq!(r.source, Source::Context);
    }

    #[test]
    fn test_tagger_before_patterns() {
        let r = resolver().resolve("create a file called notes.txt", &ExecutionContext::new(), NAMES);
        assert_eq!(r.line, "touch notes.txt");
        assert_eq!(r.source, Source::Tagger);
    }

    #[test]
    fn test_without_tagger_falls_to_patterns() {
        let r = NlResolver::new(Box::new(NoopTagger)).unwrap();
        let ctx = ExecutionContext::new();
        assert_eq!(r.resolve("create a file called notes.txt", &ctx, NAMES).source, Source::Unresolved);
        assert_eq!(r.resolve("list all files", &ctx, NAMES).line, "ls");
    }

    #[test]
    fn test_single_suggestion_substitutes() {
        let r = resolver().resolve("mkdr Demo", &ExecutionContext::new(), NAMES);
        assert_eq!(r.line, "mkdir Demo");
        assert_eq!(r.source, Source::Suggestion);
        assert_eq!(r.suggestions, vec!["mkdir".to_string()]);
    }

    #[test]
    fn test_multiple_suggestions_leave_input() {
        let r = resolver().resolve("cs foo", &ExecutionContext::new(), NAMES);
        assert_eq!(r.line, "cs foo");
        assert_eq!(r.source, Source::Unresolved);
        assert!(r.suggestions.len() > 1);
    }

    #[test]
    fn test_autocorrect_disabled() {
        let r = resolver().with_autocorrect(false);
        let res = r.resolve("mkdr demo", &ExecutionContext::new(), NAMES);
        assert_eq!(res.line, "mkdr demo");
        assert_eq!(res.suggestions, vec!["mkdir".to_string()]);
    }

    #[test]
    fn test_unresolved_echoes_original() {
        let r = resolver().resolve("Make Me A Sandwich", &ExecutionContext::new(), NAMES);
        assert_eq!(r.line, "Make Me A Sandwich");
        assert!(!r.is_rewritten());
    }

    #[test]
    fn test_blank_input() {
        let r = resolver().resolve("   ", &ExecutionContext::new(), NAMES);
        assert_eq!(r.line, "   ");
        assert_eq!(r.source, Source::Unresolved);
    }
}
