use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, instrument, warn};

use super::models::{FavoriteMode, HistoryRecord, HistorySummary, Preference};
use super::registry::TakenRegistry;
use crate::shared::AppError;

/// Trait for username history storage
///
/// Every method is a single atomic step: implementations must not let a
/// concurrent caller observe a half-applied favorite reset or id assignment.
#[async_trait]
pub trait HistoryRepository {
    /// Stores a new record with the next id and claims the username
    async fn append(&self, username: &str) -> Result<HistoryRecord, AppError>;
    async fn get(&self, id: u64) -> Result<Option<HistoryRecord>, AppError>;
    /// All records in creation order
    async fn list(&self) -> Result<Vec<HistoryRecord>, AppError>;
    async fn mark_favorite(&self, id: u64) -> Result<HistoryRecord, AppError>;
    async fn set_feedback(
        &self,
        id: u64,
        feedback: Option<String>,
        preference: Preference,
    ) -> Result<HistoryRecord, AppError>;
    /// Removes the record for good and returns it
    async fn delete(&self, id: u64) -> Result<HistoryRecord, AppError>;
    async fn summary(&self) -> Result<HistorySummary, AppError>;
    async fn is_taken(&self, username: &str) -> Result<bool, AppError>;
    /// Keeps the candidates that are not taken, preserving order
    async fn filter_available(&self, candidates: Vec<String>) -> Result<Vec<String>, AppError>;
    /// Appends `candidate` if it is free, otherwise `fallback`, and reports
    /// whether the appended name was free before this call
    async fn claim_available(
        &self,
        candidate: &str,
        fallback: &str,
    ) -> Result<(HistoryRecord, bool), AppError>;
}

#[derive(Debug)]
struct HistoryState {
    records: Vec<HistoryRecord>,
    next_id: u64,
    taken: TakenRegistry,
}

impl HistoryState {
    fn push(&mut self, username: &str) -> HistoryRecord {
        let record = HistoryRecord::new(self.next_id, username.to_string());
        self.next_id += 1;
        self.records.push(record.clone());
        self.taken.insert(username);
        record
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut HistoryRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }
}

/// In-memory implementation of HistoryRepository
///
/// Records and the taken registry share one lock so an append claims its
/// username in the same step that assigns the id. Data is lost on restart.
pub struct InMemoryHistoryRepository {
    state: Mutex<HistoryState>,
    favorite_mode: FavoriteMode,
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHistoryRepository {
    /// Empty store with exclusive favorites
    pub fn new() -> Self {
        Self::with_config(FavoriteMode::Exclusive, TakenRegistry::new())
    }

    pub fn with_config(favorite_mode: FavoriteMode, taken: TakenRegistry) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                records: Vec::new(),
                next_id: 1,
                taken,
            }),
            favorite_mode,
        }
    }

    pub fn favorite_mode(&self) -> FavoriteMode {
        self.favorite_mode
    }

    /// Returns the current number of live records
    pub fn record_count(&self) -> usize {
        self.state.lock().map(|s| s.records.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HistoryState>, AppError> {
        self.state.lock().map_err(|_| {
            error!("History store lock poisoned");
            AppError::Internal
        })
    }
}

fn not_found(id: u64) -> AppError {
    AppError::NotFound(format!("Username id {} not found", id))
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    #[instrument(skip(self))]
    async fn append(&self, username: &str) -> Result<HistoryRecord, AppError> {
        let mut state = self.lock()?;
        let record = state.push(username);

        debug!(id = record.id, username = %username, "Appended history record");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: u64) -> Result<Option<HistoryRecord>, AppError> {
        let state = self.lock()?;
        let record = state.records.iter().find(|r| r.id == id).cloned();

        match &record {
            Some(r) => debug!(id, username = %r.username, "History record found"),
            None => debug!(id, "History record not found"),
        }

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<HistoryRecord>, AppError> {
        let state = self.lock()?;
        debug!(record_count = state.records.len(), "Listing history");
        Ok(state.records.clone())
    }

    #[instrument(skip(self))]
    async fn mark_favorite(&self, id: u64) -> Result<HistoryRecord, AppError> {
        let mut state = self.lock()?;

        if !state.records.iter().any(|r| r.id == id) {
            warn!(id, "Cannot mark favorite: record not found");
            return Err(not_found(id));
        }

        if self.favorite_mode == FavoriteMode::Exclusive {
            for record in state.records.iter_mut() {
                record.favorite = false;
            }
        }

        let record = state.find_mut(id).ok_or_else(|| not_found(id))?;
        record.favorite = true;

        info!(id, username = %record.username, mode = %self.favorite_mode, "Marked favorite");
        Ok(record.clone())
    }

    #[instrument(skip(self, feedback))]
    async fn set_feedback(
        &self,
        id: u64,
        feedback: Option<String>,
        preference: Preference,
    ) -> Result<HistoryRecord, AppError> {
        let mut state = self.lock()?;

        let record = match state.find_mut(id) {
            Some(record) => record,
            None => {
                warn!(id, "Cannot set feedback: record not found");
                return Err(not_found(id));
            }
        };

        record.feedback = feedback;
        record.preference = Some(preference);

        debug!(id, preference = %preference, "Feedback stored");
        Ok(record.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: u64) -> Result<HistoryRecord, AppError> {
        let mut state = self.lock()?;

        let position = match state.records.iter().position(|r| r.id == id) {
            Some(position) => position,
            None => {
                warn!(id, "Cannot delete: record not found");
                return Err(not_found(id));
            }
        };
        let removed = state.records.remove(position);

        info!(id, username = %removed.username, "Deleted history record");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn summary(&self) -> Result<HistorySummary, AppError> {
        let state = self.lock()?;
        Ok(HistorySummary {
            total: state.records.len(),
            usernames: state.records.iter().map(|r| r.username.clone()).collect(),
        })
    }

    #[instrument(skip(self))]
    async fn is_taken(&self, username: &str) -> Result<bool, AppError> {
        let state = self.lock()?;
        Ok(state.taken.contains(username))
    }

    #[instrument(skip(self))]
    async fn filter_available(&self, candidates: Vec<String>) -> Result<Vec<String>, AppError> {
        let state = self.lock()?;
        Ok(candidates
            .into_iter()
            .filter(|candidate| state.taken.is_available(candidate))
            .collect())
    }

    #[instrument(skip(self))]
    async fn claim_available(
        &self,
        candidate: &str,
        fallback: &str,
    ) -> Result<(HistoryRecord, bool), AppError> {
        let mut state = self.lock()?;

        let (username, available) = if state.taken.is_available(candidate) {
            (candidate, true)
        } else {
            warn!(taken = %candidate, retry = %fallback, "Username taken, retrying once");
            (fallback, state.taken.is_available(fallback))
        };

        let record = state.push(username);
        debug!(id = record.id, username = %username, available, "Claimed username");
        Ok((record, available))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_append_then_get() {
        let repo = InMemoryHistoryRepository::new();
        repo.append("alice").await.unwrap();

        let record = repo.get(1).await.unwrap().unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.username, "alice");
        assert!(!record.favorite);
    }

    #[tokio::test]
    async fn test_append_claims_username() {
        let repo = InMemoryHistoryRepository::new();
        assert!(!repo.is_taken("alice").await.unwrap());

        repo.append("alice").await.unwrap();
        assert!(repo.is_taken("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_claim_available_falls_back_once() {
        let repo = InMemoryHistoryRepository::new();

        let (record, available) = repo.claim_available("neo", "spare").await.unwrap();
        assert_eq!((record.username.as_str(), available), ("neo", true));

        let (record, available) = repo.claim_available("neo", "spare").await.unwrap();
        assert_eq!((record.username.as_str(), available), ("spare", true));

        let (record, available) = repo.claim_available("neo", "spare").await.unwrap();
        assert_eq!((record.username.as_str(), available), ("spare", false));
        assert_eq!(repo.record_count(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_free_a_name_once() {
        let repo = Arc::new(InMemoryHistoryRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    let fallback = format!("spare{}", i);
                    repo.claim_available("neo", &fallback).await.unwrap()
                })
            })
            .collect();

        let mut neo_claims = 0;
        for handle in handles {
            let (record, available) = handle.await.unwrap();
            assert!(available);
            if record.username == "neo" {
                neo_claims += 1;
            }
        }
        assert_eq!(neo_claims, 1);
        assert_eq!(repo.record_count(), 16);
    }

    #[tokio::test]
    async fn test_filter_available() {
        let repo = InMemoryHistoryRepository::new();
        repo.append("neo").await.unwrap();

        let candidates = vec!["Neo10".to_string(), "neo".to_string(), "NEO".to_string()];
        let available = repo.filter_available(candidates).await.unwrap();
        assert_eq!(available, vec!["Neo10", "NEO"]);
    }

    #[tokio::test]
    async fn test_seeded_taken_names() {
        let taken: TakenRegistry = ["admin"].into_iter().collect();
        let repo = InMemoryHistoryRepository::with_config(FavoriteMode::Exclusive, taken);
        assert!(repo.is_taken("admin").await.unwrap());
        assert_eq!(repo.record_count(), 0);
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let repo = InMemoryHistoryRepository::new();
        repo.append("alice").await.unwrap();

        let removed = repo.delete(1).await.unwrap();
        assert_eq!(removed.username, "alice");
        assert!(repo.get(1).await.unwrap().is_none());

        let next = repo.append("bob").await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_delete_keeps_username_claimed() {
        let repo = InMemoryHistoryRepository::new();
        repo.append("alice").await.unwrap();
        repo.delete(1).await.unwrap();
        assert!(repo.is_taken("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_favorite_missing_id() {
        let repo = InMemoryHistoryRepository::new();
        let result = repo.mark_favorite(999).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_exclusive_favorite() {
        let repo = InMemoryHistoryRepository::new();
        assert_eq!(repo.favorite_mode(), FavoriteMode::Exclusive);
        repo.append("alice").await.unwrap();
        repo.append("bob").await.unwrap();

        repo.mark_favorite(1).await.unwrap();
        let updated = repo.mark_favorite(2).await.unwrap();
        assert!(updated.favorite);

        let records = repo.list().await.unwrap();
        assert!(!records[0].favorite);
        assert!(records[1].favorite);
    }

    #[tokio::test]
    async fn test_additive_favorite() {
        let repo =
            InMemoryHistoryRepository::with_config(FavoriteMode::Additive, TakenRegistry::new());
        assert_eq!(repo.favorite_mode(), FavoriteMode::Additive);
        repo.append("alice").await.unwrap();
        repo.append("bob").await.unwrap();

        repo.mark_favorite(1).await.unwrap();
        repo.mark_favorite(2).await.unwrap();

        let records = repo.list().await.unwrap();
        assert!(records.iter().all(|r| r.favorite));
    }

    #[tokio::test]
    async fn test_failed_favorite_leaves_existing_favorite() {
        let repo = InMemoryHistoryRepository::new();
        repo.append("alice").await.unwrap();
        repo.mark_favorite(1).await.unwrap();

        assert!(repo.mark_favorite(42).await.is_err());
        assert!(repo.get(1).await.unwrap().unwrap().favorite);
    }

    #[tokio::test]
    async fn test_set_feedback() {
        let repo = InMemoryHistoryRepository::new();
        repo.append("alice").await.unwrap();

        let record = repo
            .set_feedback(1, Some("love it".to_string()), Preference::Approve)
            .await
            .unwrap();
        assert_eq!(record.feedback.as_deref(), Some("love it"));
        assert_eq!(record.preference, Some(Preference::Approve));

        let record = repo.set_feedback(1, None, Preference::Neutral).await.unwrap();
        assert!(record.feedback.is_none());
        assert_eq!(record.preference, Some(Preference::Neutral));
    }

    #[tokio::test]
    async fn test_set_feedback_missing_id() {
        let repo = InMemoryHistoryRepository::new();
        let result = repo.set_feedback(7, None, Preference::Reject).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_id() {
        let repo = InMemoryHistoryRepository::new();
        assert!(matches!(repo.delete(1).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_summary_and_list_keep_creation_order() {
        let repo = InMemoryHistoryRepository::new();
        for name in ["carol", "alice", "bob"] {
            repo.append(name).await.unwrap();
        }
        repo.delete(2).await.unwrap();

        let summary = repo.summary().await.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.usernames, vec!["carol", "bob"]);

        let ids: Vec<u64> = repo.list().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_timestamp_and_username_survive_updates() {
        let repo = InMemoryHistoryRepository::new();
        let created = repo.append("alice").await.unwrap();

        repo.mark_favorite(1).await.unwrap();
        let updated = repo
            .set_feedback(1, Some("ok".to_string()), Preference::Reject)
            .await
            .unwrap();

        assert_eq!(updated.username, created.username);
        assert_eq!(updated.timestamp, created.timestamp);
    }
}
