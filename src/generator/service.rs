use chrono::{Datelike, Local};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    random::RandomSource,
    strategies::{self, DEFAULT_RANDOM_LENGTH},
    types::AvailabilityResponse,
};
use crate::history::{repository::HistoryRepository, HistoryService};
use crate::shared::AppError;

/// Service for username generation; persists what it hands out
pub struct GeneratorService {
    history: HistoryService,
    random: Arc<dyn RandomSource>,
}

fn current_year() -> i32 {
    Local::now().year()
}

impl GeneratorService {
    pub fn new(
        repository: Arc<dyn HistoryRepository + Send + Sync>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            history: HistoryService::new(repository),
            random,
        }
    }

    fn rng(&self) -> &dyn RandomSource {
        self.random.as_ref()
    }

    async fn persist(&self, username: String) -> Result<String, AppError> {
        self.history.record(&username).await?;
        Ok(username)
    }

    /// `first_name` plus three digits, or eight random alphanumerics
    #[instrument(skip(self))]
    pub async fn generate(&self, first_name: Option<&str>) -> Result<String, AppError> {
        let username = match first_name {
            Some(name) => strategies::from_first_name(self.rng(), name),
            None => strategies::alphanumeric(self.rng(), DEFAULT_RANDOM_LENGTH),
        };
        self.persist(username).await
    }

    /// Five numbered suggestions seeded by the first name, else the color
    pub fn suggestions(
        &self,
        first_name: Option<&str>,
        favorite_color: Option<&str>,
    ) -> Result<Vec<String>, AppError> {
        let seed = first_name.or(favorite_color).ok_or_else(|| {
            AppError::MissingParameter("first_name or favorite_color".to_string())
        })?;
        Ok(strategies::numbered_suggestions(self.rng(), seed))
    }

    pub fn hobby_suggestions(&self, hobby: &str) -> Vec<String> {
        strategies::numbered_suggestions(self.rng(), hobby)
    }

    /// Checks `username` (or a random candidate) and, if it is taken,
    /// retries exactly once with a fresh random candidate
    #[instrument(skip(self))]
    pub async fn availability(
        &self,
        username: Option<&str>,
    ) -> Result<AvailabilityResponse, AppError> {
        let candidate = match username {
            Some(name) => name.to_string(),
            None => strategies::alphanumeric(self.rng(), DEFAULT_RANDOM_LENGTH),
        };
        let fallback = strategies::alphanumeric(self.rng(), DEFAULT_RANDOM_LENGTH);

        let (record, available) = self.history.claim(&candidate, &fallback).await?;
        Ok(AvailabilityResponse {
            username: record.username,
            available,
        })
    }

    #[instrument(skip(self))]
    pub async fn from_phrase(&self, phrase: &str, unique: bool) -> Result<String, AppError> {
        let username = strategies::from_phrase(self.rng(), phrase, unique, current_year());
        self.persist(username).await
    }

    pub fn similar(&self, username: &str) -> Vec<String> {
        strategies::similar_suggestions(self.rng(), username)
    }

    pub async fn prefixed(&self, prefix: Option<&str>) -> Result<String, AppError> {
        self.persist(strategies::prefixed(self.rng(), prefix)).await
    }

    pub async fn suffixed(&self, suffix: Option<&str>) -> Result<String, AppError> {
        self.persist(strategies::suffixed(self.rng(), suffix)).await
    }

    /// Derived forms of `base` that are not taken; nothing is persisted
    #[instrument(skip(self))]
    pub async fn variations(&self, base: &str) -> Result<Vec<String>, AppError> {
        let candidates = strategies::variation_candidates(self.rng(), base);
        let available = self.history.filter_available(candidates).await?;
        debug!(available = available.len(), "Variations filtered");
        Ok(available)
    }

    /// Random alphanumerics of a caller-supplied length
    #[instrument(skip(self))]
    pub async fn random_of_length(&self, length: i64) -> Result<String, AppError> {
        let username = strategies::random_alnum(self.rng(), length)?;
        self.persist(username).await
    }

    pub async fn random_default(&self) -> Result<String, AppError> {
        let username = strategies::alphanumeric(self.rng(), DEFAULT_RANDOM_LENGTH);
        self.persist(username).await
    }

    pub async fn adjective_noun(&self) -> Result<String, AppError> {
        self.persist(strategies::adjective_noun_combo(self.rng()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn humanlike(&self, length: usize) -> Result<String, AppError> {
        let username = strategies::humanlike_exact_length(self.rng(), length)?;
        self.persist(username).await
    }

    /// Ten characters mixing letters, digits and symbols
    pub async fn complex(&self) -> Result<String, AppError> {
        let username = strategies::complex(self.rng());
        info!(username = %username, "Generated complex username");
        self.persist(username).await
    }
}
