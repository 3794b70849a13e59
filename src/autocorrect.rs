//! Command Autocorrect for nlterm_core
//!
//! Suggests registered command names for a mistyped leading token using
//! Levenshtein distance. The threshold is fixed: a name is a candidate when
//! its distance from the token is at most [`MAX_DISTANCE`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive edit-distance threshold for a suggestion
pub const MAX_DISTANCE: usize = 2;

/// A suggested correction
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    /// The suggested command name
    pub command: String,
    /// Edit distance from the original token
    pub distance: usize,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f64,
}

/// Names within [`MAX_DISTANCE`] of `token`, in name order.
///
/// The caller lower-cases `token` beforehand; comparison here is exact.
pub fn suggest<'a, I>(token: &str, command_names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    if token.is_empty() {
        return vec![];
    }

    command_names
        .into_iter()
        .filter(|name| levenshtein_distance(token, name) <= MAX_DISTANCE)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Same candidates as [`suggest`], ranked closest first with a confidence
/// score for front ends that want to show one.
pub fn rank<'a, I>(token: &str, command_names: I) -> Vec<Suggestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ranked: Vec<Suggestion> = suggest(token, command_names)
        .into_iter()
        .map(|command| {
            let distance = levenshtein_distance(token, &command);
            let longest = token.chars().count().max(command.chars().count());
            Suggestion {
                confidence: 1.0 - (distance as f64 / longest as f64),
                command,
                distance,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| a.command.cmp(&b.command))
    });
    ranked
}

/// Replace the leading word of `input` with `command`, keeping the rest
pub fn rebuild_command(command: &str, input: &str) -> String {
    let args: Vec<&str> = input.split_whitespace().skip(1).collect();
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}

/// Calculate Levenshtein edit distance between two strings
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0usize; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[len1][len2]
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 3] = ["mkdir", "ls", "cd"];

    #[test]
    fn test_single_typo() {
        assert_eq!(suggest("mkdr", NAMES), vec!["mkdir".to_string()]);
    }

    #[test]
    fn test_no_match() {
        assert!(suggest("xyz", NAMES).is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // "mkd" -> "mkdir" is two insertions
        assert_eq!(suggest("mkd", ["mkdir"]), vec!["mkdir".to_string()]);
        // "mk" -> "mkdir" is three
        assert!(suggest("mk", ["mkdir"]).is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(suggest("", NAMES).is_empty());
        assert!(suggest("ls", std::iter::empty::<&str>()).is_empty());
    }

    #[test]
    fn test_multiple_candidates_sorted() {
        // every two-letter command is within two edits of another
        assert_eq!(suggest("rm", NAMES), vec!["cd".to_string(), "ls".to_string()]);
    }

    #[test]
    fn test_rank_orders_by_distance() {
        let ranked = rank("cdd", ["cat", "cd", "mkdir"]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].command, "cd");
        assert_eq!(ranked[0].distance, 1);
        assert_eq!(ranked[1].command, "cat");
        assert!(ranked[0].confidence > ranked[1].confidence);
    }

    #[test]
    fn test_rebuild_command() {
        assert_eq!(rebuild_command("mkdir", "mkdr demo"), "mkdir demo");
        assert_eq!(rebuild_command("ls", "lss"), "ls");
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("cat", "cat"), 0);
        assert_eq!(levenshtein_distance("cat", "cta"), 2);
        assert_eq!(levenshtein_distance("cat", "cut"), 1);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("héllo", "hello"), 1);
    }
}
