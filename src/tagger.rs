//! Part-of-speech tagging and the intent rules built on it.
//!
//! Tagging is a capability chosen when the session is built: a
//! [`LexiconTagger`] that knows enough English to find verbs and nouns in
//! short shell requests, or a [`NoopTagger`] that tags nothing. With the
//! no-op tagger [`TaggerResolver::resolve`] always declines and resolution
//! falls through to the pattern rules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Verb,
    Noun,
    ProperNoun,
    Adjective,
    Adverb,
    Adposition,
    Auxiliary,
    Conjunction,
    Determiner,
    Interjection,
    Numeral,
    Pronoun,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form as it appeared in the input
    pub text: String,
    /// Dictionary form; equals `text` for anything but inflected verbs/nouns
    pub lemma: String,
    pub pos: PartOfSpeech,
}

pub trait Tagger: Send + Sync {
    fn name(&self) -> &'static str;

    fn tag(&self, text: &str) -> Vec<Token>;
}

/// Tags nothing. Selected when tagging is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTagger;

impl Tagger for NoopTagger {
    fn name(&self) -> &'static str {
        "none"
    }

    fn tag(&self, _text: &str) -> Vec<Token> {
        Vec::new()
    }
}

/// Dictionary-driven tagger for short imperative requests.
///
/// Words it does not know are nouns, or proper nouns when they look like
/// file names (contain `.`, `/`, `_` or a digit).
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: HashMap<&'static str, (PartOfSpeech, &'static str)>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        let mut lexicon = HashMap::new();

        let closed_classes: [(PartOfSpeech, &[&'static str]); 9] = [
            (
                PartOfSpeech::Determiner,
                &["a", "an", "the", "this", "that", "these", "those", "my", "your", "our", "some", "all", "every", "each", "any", "no"],
            ),
            (
                PartOfSpeech::Pronoun,
                &["i", "me", "you", "it", "we", "us", "they", "them", "he", "she", "him", "her", "one", "something"],
            ),
            (
                PartOfSpeech::Adposition,
                &["to", "into", "in", "inside", "on", "onto", "at", "from", "of", "for", "with", "within", "under", "over", "out", "up"],
            ),
            (
                PartOfSpeech::Auxiliary,
                &["is", "am", "are", "was", "were", "be", "been", "do", "does", "did", "can", "could", "will", "would", "should", "shall", "may", "might", "must"],
            ),
            (PartOfSpeech::Conjunction, &["and", "or", "but", "then"]),
            (
                PartOfSpeech::Adverb,
                &["just", "now", "back", "there", "here", "again", "where", "what", "how", "quickly", "also"],
            ),
            (
                PartOfSpeech::Adjective,
                &["new", "empty", "blank", "current", "parent", "previous", "last", "other", "main", "temporary", "another"],
            ),
            (PartOfSpeech::Interjection, &["please", "hey", "ok", "okay", "hi"]),
            (PartOfSpeech::Other, &["not"]),
        ];
        for (pos, words) in closed_classes {
            for word in words {
                lexicon.insert(*word, (pos, *word));
            }
        }

        let verbs: [(&'static str, &[&'static str]); 17] = [
            ("create", &["create", "creates", "created", "creating"]),
            ("make", &["make", "makes", "made", "making"]),
            ("add", &["add", "adds", "added", "adding"]),
            ("go", &["go", "goes", "went", "going", "gone"]),
            ("navigate", &["navigate", "navigates", "navigated", "navigating"]),
            ("change", &["change", "changes", "changed", "changing"]),
            ("switch", &["switch", "switches", "switched", "switching"]),
            ("move", &["move", "moves", "moved", "moving"]),
            ("copy", &["copy", "copies", "copied", "copying"]),
            ("delete", &["delete", "deletes", "deleted", "deleting"]),
            ("remove", &["remove", "removes", "removed", "removing"]),
            ("show", &["show", "shows", "showed", "shown", "showing"]),
            ("list", &["list", "lists", "listed", "listing"]),
            ("open", &["open", "opens", "opened", "opening"]),
            ("enter", &["enter", "enters", "entered", "entering"]),
            ("call", &["call", "calls", "called", "calling"]),
            ("name", &["named", "naming"]),
        ];
        for (lemma, forms) in verbs {
            for form in forms {
                lexicon.insert(*form, (PartOfSpeech::Verb, lemma));
            }
        }

        let nouns: [(&'static str, &[&'static str]); 5] = [
            ("file", &["file", "files"]),
            ("directory", &["directory", "directories", "dir", "dirs"]),
            ("folder", &["folder", "folders"]),
            ("path", &["path", "paths"]),
            ("name", &["name", "names"]),
        ];
        for (lemma, forms) in nouns {
            for form in forms {
                lexicon.insert(*form, (PartOfSpeech::Noun, lemma));
            }
        }

        Self { lexicon }
    }

    fn tag_word(&self, word: &str) -> Token {
        let lower = word.to_lowercase();
        if let Some((pos, lemma)) = self.lexicon.get(lower.as_str()) {
            return Token {
                text: word.to_string(),
                lemma: lemma.to_string(),
                pos: *pos,
            };
        }

        let pos = if lower.chars().all(|c| c.is_ascii_digit()) {
            PartOfSpeech::Numeral
        } else if lower.contains(['.', '/', '_']) || lower.chars().any(|c| c.is_ascii_digit()) {
            PartOfSpeech::ProperNoun
        } else {
            PartOfSpeech::Noun
        };

        Token {
            text: word.to_string(),
            lemma: lower,
            pos,
        }
    }
}

impl Tagger for LexiconTagger {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn tag(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .map(|w| w.trim_matches(|c: char| matches!(c, ',' | '?' | '!' | ';' | ':' | '"' | '\'')))
            .map(|w| w.trim_end_matches('.'))
            .filter(|w| !w.is_empty())
            .map(|w| self.tag_word(w))
            .collect()
    }
}

const CREATE_VERBS: [&str; 3] = ["create", "make", "add"];
const NAVIGATE_VERBS: [&str; 4] = ["go", "navigate", "change", "switch"];
const LOCATION_NOUNS: [&str; 3] = ["directory", "folder", "path"];

/// Maps tagged verb/noun structure to `touch` and `cd` requests
pub struct TaggerResolver {
    tagger: Box<dyn Tagger>,
}

impl TaggerResolver {
    pub fn new(tagger: Box<dyn Tagger>) -> Self {
        Self { tagger }
    }

    pub fn tagger_name(&self) -> &'static str {
        self.tagger.name()
    }

    /// `None` means no opinion; the caller moves on to the pattern rules.
    pub fn resolve(&self, text: &str) -> Option<String> {
        let tokens = self.tagger.tag(text);

        let verbs: Vec<&str> = tokens
            .iter()
            .filter(|t| t.pos == PartOfSpeech::Verb)
            .map(|t| t.lemma.as_str())
            .collect();
        let nouns: Vec<&str> = tokens
            .iter()
            .filter(|t| t.pos == PartOfSpeech::Noun)
            .map(|t| t.text.as_str())
            .collect();

        if verbs.is_empty() || nouns.is_empty() {
            return None;
        }

        if verbs.iter().any(|v| CREATE_VERBS.contains(v)) && nouns.contains(&"file") {
            if let Some(name) = first_name_token(&tokens, &["file"]) {
                return Some(format!("touch {}", name));
            }
        }

        if verbs.iter().any(|v| NAVIGATE_VERBS.contains(v))
            && nouns.iter().any(|n| LOCATION_NOUNS.contains(n))
        {
            if let Some(name) = first_name_token(&tokens, &LOCATION_NOUNS) {
                return Some(format!("cd {}", name));
            }
        }

        None
    }
}

/// First proper noun, or first noun whose surface form is not excluded
fn first_name_token<'a>(tokens: &'a [Token], excluded: &[&str]) -> Option<&'a str> {
    tokens
        .iter()
        .find(|t| {
            t.pos == PartOfSpeech::ProperNoun
                || (t.pos == PartOfSpeech::Noun && !excluded.contains(&t.text.as_str()))
        })
        .map(|t| t.text.as_str())
}
