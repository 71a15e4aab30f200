use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    blacklist::Blacklist,
    rules::{self, MAX_LENGTH, MIN_LENGTH},
    types::{
        ComplexityCheckResponse, CustomUsernameResponse, InappropriateWordsResponse,
        LengthCheckResponse, SimilarityResponse, SpecialCharactersResponse,
    },
};
use crate::generator::{strategies, GeneratorService, RandomSource};
use crate::generator::types::AvailabilityResponse;
use crate::history::{repository::HistoryRepository, HistoryService};
use crate::shared::AppError;

/// Service for username validation rules
pub struct ValidationService {
    history: HistoryService,
    generator: GeneratorService,
    random: Arc<dyn RandomSource>,
    blacklist: Arc<Blacklist>,
}

impl ValidationService {
    pub fn new(
        repository: Arc<dyn HistoryRepository + Send + Sync>,
        random: Arc<dyn RandomSource>,
        blacklist: Arc<Blacklist>,
    ) -> Self {
        Self {
            history: HistoryService::new(Arc::clone(&repository)),
            generator: GeneratorService::new(repository, Arc::clone(&random)),
            random,
            blacklist,
        }
    }

    /// Generation half of the action endpoints
    pub fn generator(&self) -> &GeneratorService {
        &self.generator
    }

    pub async fn check_availability(
        &self,
        username: &str,
    ) -> Result<AvailabilityResponse, AppError> {
        let available = self.history.is_available(username).await?;
        Ok(AvailabilityResponse {
            username: username.to_string(),
            available,
        })
    }

    pub fn check_length(&self, username: &str) -> LengthCheckResponse {
        LengthCheckResponse {
            username: username.to_string(),
            valid_length: rules::length_valid(username),
        }
    }

    pub fn check_complexity(&self, username: &str) -> ComplexityCheckResponse {
        ComplexityCheckResponse {
            username: username.to_string(),
            complexity_ok: rules::complexity_ok(username),
        }
    }

    pub fn special_characters(&self, username: &str) -> SpecialCharactersResponse {
        if rules::has_special_characters(username) {
            return SpecialCharactersResponse {
                username: None,
                original: Some(username.to_string()),
                alternative: Some(rules::strip_special_characters(username)),
                contains_special: true,
            };
        }

        SpecialCharactersResponse {
            username: Some(username.to_string()),
            original: None,
            alternative: None,
            contains_special: false,
        }
    }

    #[instrument(skip(self))]
    pub fn inappropriate_words(&self, username: &str) -> InappropriateWordsResponse {
        let result = self.blacklist.check(username);
        if !result.is_blacklisted() {
            return InappropriateWordsResponse {
                username: Some(username.to_string()),
                original: None,
                alternative: None,
                inappropriate: false,
                matched: Vec::new(),
            };
        }

        warn!(matched = ?result.matched, "Blacklisted terms found");
        InappropriateWordsResponse {
            username: None,
            original: Some(username.to_string()),
            alternative: Some(result.cleaned),
            inappropriate: true,
            matched: result.matched,
        }
    }

    /// Random name passed through the blacklist before it is persisted
    pub async fn filtered_random(&self) -> Result<String, AppError> {
        let candidate =
            strategies::alphanumeric(self.random.as_ref(), strategies::DEFAULT_RANDOM_LENGTH);
        let username = self.blacklist.clean(&candidate);
        self.history.record(&username).await?;
        Ok(username)
    }

    /// Persists the name only when it meets the custom criteria
    #[instrument(skip(self))]
    pub async fn custom(&self, username: &str) -> Result<CustomUsernameResponse, AppError> {
        if !rules::meets_custom_criteria(username) {
            warn!(username = %username, "Custom username rejected");
            return Ok(CustomUsernameResponse {
                username: username.to_string(),
                valid: false,
                error: Some(format!(
                    "Username does not meet criteria ({}-{} characters, includes at least one letter and one digit)",
                    MIN_LENGTH, MAX_LENGTH
                )),
            });
        }

        self.history.record(username).await?;
        info!(username = %username, "Custom username accepted");
        Ok(CustomUsernameResponse {
            username: username.to_string(),
            valid: true,
            error: None,
        })
    }

    pub fn similarity(&self, new_username: &str, existing_username: &str) -> SimilarityResponse {
        let result = rules::similarity(new_username, existing_username);
        let alternative = result
            .similar
            .then(|| strategies::disambiguated(self.random.as_ref(), new_username));

        SimilarityResponse {
            new_username: new_username.to_string(),
            existing_username: existing_username.to_string(),
            similar: result.similar,
            similarity_score: result.score,
            alternative,
        }
    }
}
