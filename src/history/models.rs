use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Reviewer verdict attached to a history record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Preference {
    Approve,
    Reject,
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    Neutral,
}

impl Preference {
    /// `approve` / `reject` in any case, everything else is neutral
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse().ok())
            .unwrap_or(Preference::Neutral)
    }
}

/// How marking a favorite affects the other records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FavoriteMode {
    /// Only one record may be favorite at a time
    #[default]
    Exclusive,
    /// Any number of records may be favorite
    Additive,
}

/// One generated or accepted username
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: u64,
    pub username: String,
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<Preference>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(id: u64, username: String) -> Self {
        Self {
            id,
            username,
            favorite: false,
            feedback: None,
            preference: None,
            timestamp: Utc::now(),
        }
    }
}

/// Count and usernames of every live record, in creation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total: usize,
    pub usernames: Vec<String>,
}
