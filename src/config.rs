use std::env;
use thiserror::Error;

use crate::history::FavoriteMode;
use crate::validation::DEFAULT_BLACKLIST;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid blacklist pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("blacklist patterns must not be empty")]
    EmptyPattern,

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Case-insensitive regex fragments, validated when the blacklist is built
    pub blacklist: Vec<String>,
    pub favorite_mode: FavoriteMode,
    /// Names treated as claimed before anything is generated
    pub taken_usernames: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            blacklist: DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect(),
            favorite_mode: FavoriteMode::Exclusive,
            taken_usernames: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Reads `HOST`, `PORT`, `USERNAME_BLACKLIST`, `FAVORITE_MODE` and
    /// `TAKEN_USERNAMES`, falling back to defaults for unset keys
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: raw.clone(),
            })?,
            None => defaults.port,
        };

        let blacklist = lookup("USERNAME_BLACKLIST")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.blacklist);

        let favorite_mode = match lookup("FAVORITE_MODE") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "FAVORITE_MODE",
                    value: raw.clone(),
                })?,
            None => defaults.favorite_mode,
        };

        let taken_usernames = lookup("TAKEN_USERNAMES")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.taken_usernames);

        Ok(Self {
            host,
            port,
            blacklist,
            favorite_mode,
            taken_usernames,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
