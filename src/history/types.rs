use serde::{Deserialize, Serialize};

use super::models::{HistoryRecord, HistorySummary, Preference};

/// Response for the full history listing
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryRecord>,
}

/// Response after marking a record as favorite
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub message: String,
    pub entry: HistoryRecord,
}

/// Response after storing feedback on a record
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub username: String,
    pub available: bool,
    pub preference: Preference,
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: HistorySummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// `?id=` on history deletion; the id may also come in the body
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}
