use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{HistoryRecord, HistorySummary, Preference},
    repository::HistoryRepository,
    types::{DeleteResponse, FavoriteResponse, FeedbackResponse},
};
use crate::shared::AppError;

/// Service for history and availability business logic
pub struct HistoryService {
    repository: Arc<dyn HistoryRepository + Send + Sync>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn HistoryRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Persists a generated or accepted username
    #[instrument(skip(self))]
    pub async fn record(&self, username: &str) -> Result<HistoryRecord, AppError> {
        let record = self.repository.append(username).await?;
        debug!(id = record.id, "Username recorded in history");
        Ok(record)
    }

    /// Records `candidate`, or `fallback` when the candidate is taken, in one step
    pub async fn claim(
        &self,
        candidate: &str,
        fallback: &str,
    ) -> Result<(HistoryRecord, bool), AppError> {
        self.repository.claim_available(candidate, fallback).await
    }

    pub async fn is_available(&self, username: &str) -> Result<bool, AppError> {
        Ok(!self.repository.is_taken(username).await?)
    }

    pub async fn filter_available(&self, candidates: Vec<String>) -> Result<Vec<String>, AppError> {
        self.repository.filter_available(candidates).await
    }

    pub async fn list(&self) -> Result<Vec<HistoryRecord>, AppError> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<HistoryRecord, AppError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Username id {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn mark_favorite(&self, id: u64) -> Result<FavoriteResponse, AppError> {
        let entry = self.repository.mark_favorite(id).await?;
        Ok(FavoriteResponse {
            message: format!("Username {} marked as favorite", entry.username),
            entry,
        })
    }

    /// Stores feedback and a normalized preference, reporting availability
    /// of the record's username
    #[instrument(skip(self, feedback))]
    pub async fn give_feedback(
        &self,
        id: u64,
        feedback: Option<String>,
        preference: Option<&str>,
    ) -> Result<FeedbackResponse, AppError> {
        let preference = Preference::normalize(preference);
        let record = self.repository.set_feedback(id, feedback, preference).await?;
        let available = self.is_available(&record.username).await?;

        info!(id, username = %record.username, preference = %preference, "Feedback recorded");

        Ok(FeedbackResponse {
            username: record.username,
            available,
            preference,
            feedback: record.feedback,
        })
    }

    pub async fn summary(&self) -> Result<HistorySummary, AppError> {
        self.repository.summary().await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<DeleteResponse, AppError> {
        let removed = self.repository.delete(id).await?;
        Ok(DeleteResponse {
            message: format!("Username {} deleted from history.", removed.username),
        })
    }
}
