//! Case-insensitive blacklist of disallowed username fragments.
//!
//! Patterns are regex fragments compiled once when the blacklist is built,
//! so a malformed entry is reported as a [`ConfigError`] at startup rather
//! than surfacing during request handling.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::debug;

use crate::config::ConfigError;

/// Terms used when no blacklist is configured
pub const DEFAULT_BLACKLIST: [&str; 2] = ["badword", "inappropriate"];

#[derive(Debug, Clone)]
struct Pattern {
    source: String,
    regex: Regex,
}

#[derive(Debug, Clone)]
pub struct Blacklist {
    patterns: Vec<Pattern>,
}

/// Outcome of checking one username against the blacklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlacklistMatch {
    /// Patterns that matched, in configuration order
    pub matched: Vec<String>,
    /// The username with every match of every pattern removed
    pub cleaned: String,
}

impl BlacklistMatch {
    pub fn is_blacklisted(&self) -> bool {
        !self.matched.is_empty()
    }
}

impl Blacklist {
    /// Compiles every pattern case-insensitively; empty or invalid
    /// patterns are rejected
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let source = pattern.as_ref().trim();
            if source.is_empty() {
                return Err(ConfigError::EmptyPattern);
            }
            let regex = RegexBuilder::new(source)
                .case_insensitive(true)
                .build()
                .map_err(|error| ConfigError::InvalidPattern {
                    pattern: source.to_string(),
                    source: error,
                })?;
            compiled.push(Pattern {
                source: source.to_string(),
                regex,
            });
        }

        debug!(pattern_count = compiled.len(), "Blacklist compiled");
        Ok(Self { patterns: compiled })
    }

    /// Blacklist of [`DEFAULT_BLACKLIST`] matched literally
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(DEFAULT_BLACKLIST.map(regex::escape))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn check(&self, username: &str) -> BlacklistMatch {
        let matched = self
            .patterns
            .iter()
            .filter(|p| p.regex.is_match(username))
            .map(|p| p.source.clone())
            .collect();

        BlacklistMatch {
            matched,
            cleaned: self.clean(username),
        }
    }

    /// Removes all occurrences of every pattern, one pattern at a time
    pub fn clean(&self, username: &str) -> String {
        self.patterns
            .iter()
            .fold(username.to_string(), |current, p| {
                p.regex.replace_all(&current, "").into_owned()
            })
    }
}
