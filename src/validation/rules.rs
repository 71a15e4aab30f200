use serde::Serialize;
use std::collections::HashSet;

use crate::generator::SYMBOLS;

pub const MIN_LENGTH: usize = 6;
pub const MAX_LENGTH: usize = 20;

/// Scores strictly above this are considered similar
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

fn has_letter(username: &str) -> bool {
    username.chars().any(|c| c.is_ascii_alphabetic())
}

fn has_digit(username: &str) -> bool {
    username.chars().any(|c| c.is_ascii_digit())
}

fn has_symbol(username: &str) -> bool {
    username.chars().any(|c| SYMBOLS.contains(c))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Length in characters is within `6..=20`
pub fn length_valid(username: &str) -> bool {
    (MIN_LENGTH..=MAX_LENGTH).contains(&username.chars().count())
}

/// At least one letter, one digit and one of `!@#$%^&*`
pub fn complexity_ok(username: &str) -> bool {
    has_letter(username) && has_digit(username) && has_symbol(username)
}

/// Anything outside `[A-Za-z0-9_]`
pub fn has_special_characters(username: &str) -> bool {
    !username.chars().all(is_word_char)
}

pub fn strip_special_characters(username: &str) -> String {
    username.chars().filter(|c| is_word_char(*c)).collect()
}

/// Valid length plus a letter and a digit; no symbol required
pub fn meets_custom_criteria(username: &str) -> bool {
    length_valid(username) && has_letter(username) && has_digit(username)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Similarity {
    pub score: f64,
    pub similar: bool,
}

/// Shared distinct characters over the larger distinct-character set.
/// Two empty strings score 0.
pub fn similarity(a: &str, b: &str) -> Similarity {
    let left: HashSet<char> = a.chars().collect();
    let right: HashSet<char> = b.chars().collect();

    let denominator = left.len().max(right.len());
    if denominator == 0 {
        return Similarity {
            score: 0.0,
            similar: false,
        };
    }

    let common = left.intersection(&right).count();
    let score = common as f64 / denominator as f64;
    Similarity {
        score,
        similar: score > SIMILARITY_THRESHOLD,
    }
}
