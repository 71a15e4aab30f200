//! Candidate username builders.
//!
//! Every function here is pure apart from the injected [`RandomSource`]:
//! nothing is validated against the blacklist and nothing is persisted.

use thiserror::Error;

use super::random::{choose, RandomSource};
use super::words::{ADJECTIVES, NOUNS};

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
/// Symbols that satisfy the complexity rule
pub const SYMBOLS: &str = "!@#$%^&*";

pub const DEFAULT_PREFIX: &str = "CoolUser";
pub const DEFAULT_SUFFIX: &str = "User2023";

/// Length of plain random usernames when the caller does not ask for one
pub const DEFAULT_RANDOM_LENGTH: usize = 8;
pub const COMPLEX_LENGTH: usize = 10;
pub const SUGGESTION_COUNT: usize = 5;
/// Upper bound on any caller-supplied length
pub const MAX_GENERATED_LENGTH: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("length must be zero or greater, got {0}")]
    NegativeLength(i64),

    #[error("length must be at most {max}, got {length}")]
    LengthTooLarge { length: u64, max: usize },
}

fn bounded(length: usize) -> Result<usize, GeneratorError> {
    if length > MAX_GENERATED_LENGTH {
        return Err(GeneratorError::LengthTooLarge {
            length: length as u64,
            max: MAX_GENERATED_LENGTH,
        });
    }
    Ok(length)
}

fn draw_from(rng: &dyn RandomSource, alphabet: &[u8], length: usize) -> String {
    (0..length)
        .map(|_| alphabet[rng.index(alphabet.len())] as char)
        .collect()
}

/// `length` characters drawn uniformly from `[A-Za-z0-9]`
pub fn alphanumeric(rng: &dyn RandomSource, length: usize) -> String {
    let alphabet = format!("{LETTERS}{DIGITS}");
    draw_from(rng, alphabet.as_bytes(), length)
}

/// Checked variant of [`alphanumeric`] for caller-supplied lengths
pub fn random_alnum(rng: &dyn RandomSource, length: i64) -> Result<String, GeneratorError> {
    let length = usize::try_from(length).map_err(|_| GeneratorError::NegativeLength(length))?;
    Ok(alphanumeric(rng, bounded(length)?))
}

/// Letters, digits and symbols mixed; fixed length of [`COMPLEX_LENGTH`]
pub fn complex(rng: &dyn RandomSource) -> String {
    let alphabet = format!("{LETTERS}{DIGITS}{SYMBOLS}");
    draw_from(rng, alphabet.as_bytes(), COMPLEX_LENGTH)
}

pub fn from_first_name(rng: &dyn RandomSource, first_name: &str) -> String {
    format!("{}{}", first_name, rng.int_in(100..=999))
}

/// Splits camel case with underscores and stamps the year,
/// e.g. `SummerVacation` -> `Summer_Vacation2024`
pub fn from_phrase(rng: &dyn RandomSource, phrase: &str, unique: bool, year: i32) -> String {
    let mut username = String::with_capacity(phrase.len() + 8);
    for (i, c) in phrase.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            username.push('_');
        }
        username.push(c);
    }
    username.push_str(&year.to_string());
    if unique {
        username.push_str(&rng.int_in(10..=99).to_string());
    }
    username
}

pub fn adjective_noun_combo(rng: &dyn RandomSource) -> String {
    let adjective = choose(rng, &ADJECTIVES);
    let noun = choose(rng, &NOUNS);
    format!("{}{}{}", adjective, noun, rng.int_in(10..=99))
}

/// Adjective+noun stem cut or digit-padded to exactly `length` characters.
/// Lengths below 3 fall back to plain alphanumerics.
pub fn humanlike_exact_length(
    rng: &dyn RandomSource,
    length: usize,
) -> Result<String, GeneratorError> {
    let length = bounded(length)?;
    if length < 3 {
        return Ok(alphanumeric(rng, length));
    }

    let adjective = choose(rng, &ADJECTIVES);
    let noun = choose(rng, &NOUNS);

    let mut username = String::with_capacity(length);
    if adjective.len() >= length {
        username.push_str(&adjective[..length]);
    } else {
        username.push_str(adjective);
        let room = length - adjective.len();
        username.push_str(&noun[..room.min(noun.len())]);
    }

    while username.len() < length {
        let digit = rng.int_in(0..=9);
        username.push(char::from(b'0' + digit as u8));
    }
    Ok(username)
}

/// The five derived forms of `base`: numbered, lowercased, uppercased,
/// reversed and underscore-numbered. Availability filtering happens in the store.
pub fn variation_candidates(rng: &dyn RandomSource, base: &str) -> Vec<String> {
    vec![
        format!("{}{}", base, rng.int_in(10..=99)),
        base.to_lowercase(),
        base.to_uppercase(),
        base.chars().rev().collect(),
        format!("{}_{}", base, rng.int_in(1..=9)),
    ]
}

/// `seed` followed by a two digit number, [`SUGGESTION_COUNT`] times
pub fn numbered_suggestions(rng: &dyn RandomSource, seed: &str) -> Vec<String> {
    (0..SUGGESTION_COUNT)
        .map(|_| format!("{}{}", seed, rng.int_in(10..=99)))
        .collect()
}

/// Look-alike spellings of an existing username
pub fn similar_suggestions(rng: &dyn RandomSource, username: &str) -> Vec<String> {
    let spaced = username
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join("_");

    vec![
        format!("{}_", username),
        format!("_{}", username),
        spaced.trim_matches('_').to_string(),
        format!("{}{}", username, rng.int_in(10..=99)),
        username.to_lowercase(),
    ]
}

pub fn prefixed(rng: &dyn RandomSource, prefix: Option<&str>) -> String {
    let prefix = prefix.unwrap_or(DEFAULT_PREFIX);
    format!("{}{}", prefix, rng.int_in(100..=999))
}

pub fn suffixed(rng: &dyn RandomSource, suffix: Option<&str>) -> String {
    let suffix = suffix.unwrap_or(DEFAULT_SUFFIX);
    format!("{}{}", alphanumeric(rng, 5), suffix)
}

/// Distinct alternative offered when two names are too close
pub fn disambiguated(rng: &dyn RandomSource, username: &str) -> String {
    format!("{}_{}", username, alphanumeric(rng, 3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::random::{FixedRandom, ThreadRandom};

    fn is_alnum(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_alphanumeric())
    }

    #[test]
    fn test_random_alnum_exact_length_and_alphabet() {
        let rng = ThreadRandom::new();
        for length in [0, 1, 8, 37, 64] {
            let username = random_alnum(&rng, length).unwrap();
            assert_eq!(username.len(), length as usize);
            assert!(is_alnum(&username));
        }
    }

    #[test]
    fn test_random_alnum_rejects_negative_length() {
        let result = random_alnum(&ThreadRandom::new(), -1);
        assert_eq!(result, Err(GeneratorError::NegativeLength(-1)));
    }

    #[test]
    fn test_random_alnum_zero_length_is_empty() {
        assert_eq!(random_alnum(&ThreadRandom::new(), 0).unwrap(), "");
    }

    #[test]
    fn test_complex_draws_from_extended_alphabet() {
        let username = complex(&ThreadRandom::new());
        assert_eq!(username.len(), COMPLEX_LENGTH);
        assert!(username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SYMBOLS.contains(c)));
    }

    #[test]
    fn test_from_first_name() {
        assert_eq!(from_first_name(&FixedRandom(0), "alice"), "alice100");

        let username = from_first_name(&ThreadRandom::new(), "bob");
        let number: u32 = username["bob".len()..].parse().unwrap();
        assert!((100..=999).contains(&number));
    }

    #[test]
    fn test_from_phrase_splits_camel_case() {
        let username = from_phrase(&FixedRandom(0), "SummerVacation", false, 2024);
        assert_eq!(username, "Summer_Vacation2024");
    }

    #[test]
    fn test_from_phrase_unique_appends_two_digits() {
        let username = from_phrase(&FixedRandom(42), "SummerVacation", true, 2024);
        assert_eq!(username, "Summer_Vacation202442");
    }

    #[test]
    fn test_from_phrase_keeps_lowercase_and_leading_capital() {
        assert_eq!(from_phrase(&FixedRandom(0), "plain", false, 2030), "plain2030");
        assert_eq!(from_phrase(&FixedRandom(0), "ABC", false, 2030), "A_B_C2030");
    }

    #[test]
    fn test_adjective_noun_combo() {
        // index 0 of both lists, number clamped to 10
        assert_eq!(adjective_noun_combo(&FixedRandom(0)), "SwiftTiger10");
    }

    #[test]
    fn test_humanlike_short_lengths_fall_back_to_alnum() {
        let username = humanlike_exact_length(&ThreadRandom::new(), 2).unwrap();
        assert_eq!(username.len(), 2);
        assert!(is_alnum(&username));
        assert_eq!(humanlike_exact_length(&ThreadRandom::new(), 0).unwrap(), "");
    }

    #[test]
    fn test_humanlike_truncates_noun_then_adjective() {
        let rng = FixedRandom(0); // "Swift" + "Tiger"
        assert_eq!(humanlike_exact_length(&rng, 7).unwrap(), "SwiftTi");
        assert_eq!(humanlike_exact_length(&rng, 5).unwrap(), "Swift");
        assert_eq!(humanlike_exact_length(&rng, 3).unwrap(), "Swi");
    }

    #[test]
    fn test_humanlike_pads_with_digits() {
        let rng = FixedRandom(0);
        assert_eq!(humanlike_exact_length(&rng, 13).unwrap(), "SwiftTiger000");
    }

    #[test]
    fn test_humanlike_is_always_exact() {
        let rng = ThreadRandom::new();
        for length in 0..=MAX_GENERATED_LENGTH {
            assert_eq!(humanlike_exact_length(&rng, length).unwrap().len(), length);
        }
    }

    #[test]
    fn test_lengths_above_bound_are_rejected() {
        let rng = FixedRandom(0);
        let too_long = MAX_GENERATED_LENGTH + 1;

        assert_eq!(
            humanlike_exact_length(&rng, usize::MAX),
            Err(GeneratorError::LengthTooLarge {
                length: usize::MAX as u64,
                max: MAX_GENERATED_LENGTH,
            })
        );
        assert!(humanlike_exact_length(&rng, too_long).is_err());
        assert!(random_alnum(&rng, i64::MAX).is_err());
        assert!(random_alnum(&rng, too_long as i64).is_err());
        assert_eq!(
            random_alnum(&rng, MAX_GENERATED_LENGTH as i64).unwrap().len(),
            MAX_GENERATED_LENGTH
        );
    }

    #[test]
    fn test_variation_candidates() {
        let candidates = variation_candidates(&FixedRandom(0), "Neo");
        assert_eq!(candidates, vec!["Neo10", "neo", "NEO", "oeN", "Neo_1"]);
    }

    #[test]
    fn test_numbered_suggestions() {
        let suggestions = numbered_suggestions(&ThreadRandom::new(), "blue");
        assert_eq!(suggestions.len(), SUGGESTION_COUNT);
        for suggestion in suggestions {
            let number: u32 = suggestion["blue".len()..].parse().unwrap();
            assert!((10..=99).contains(&number));
        }
    }

    #[test]
    fn test_similar_suggestions() {
        let suggestions = similar_suggestions(&FixedRandom(50), "Abc");
        assert_eq!(suggestions, vec!["Abc_", "_Abc", "A_b_c", "Abc50", "abc"]);
    }

    #[test]
    fn test_prefixed_and_suffixed_defaults() {
        assert_eq!(prefixed(&FixedRandom(0), None), "CoolUser100");
        assert_eq!(prefixed(&FixedRandom(0), Some("gg")), "gg100");

        let username = suffixed(&ThreadRandom::new(), None);
        assert!(username.ends_with(DEFAULT_SUFFIX));
        assert_eq!(username.len(), 5 + DEFAULT_SUFFIX.len());
    }

    #[test]
    fn test_disambiguated() {
        let username = disambiguated(&ThreadRandom::new(), "alice");
        assert!(username.starts_with("alice_"));
        assert_eq!(username.len(), "alice_".len() + 3);
    }
}
