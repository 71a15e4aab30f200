use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use thiserror::Error;

use crate::config::{AppConfig, ConfigError};
use crate::generator::{GeneratorError, RandomSource, ThreadRandom};
use crate::history::repository::{HistoryRepository, InMemoryHistoryRepository};
use crate::history::TakenRegistry;
use crate::validation::Blacklist;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub history_repository: Arc<dyn HistoryRepository + Send + Sync>,
    pub random: Arc<dyn RandomSource>,
    pub blacklist: Arc<Blacklist>,
}

impl AppState {
    pub fn new(
        history_repository: Arc<dyn HistoryRepository + Send + Sync>,
        random: Arc<dyn RandomSource>,
        blacklist: Arc<Blacklist>,
    ) -> Self {
        Self {
            history_repository,
            random,
            blacklist,
        }
    }

    /// Builds the in-memory store and blacklist described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let blacklist = Blacklist::new(&config.blacklist)?;
        let taken: TakenRegistry = config.taken_usernames.iter().cloned().collect();
        let history_repository =
            InMemoryHistoryRepository::with_config(config.favorite_mode, taken);

        Ok(Self::new(
            Arc::new(history_repository),
            Arc::new(ThreadRandom::new()),
            Arc::new(blacklist),
        ))
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} parameter required")]
    MissingParameter(String),

    #[error("{0}")]
    InvalidType(String),

    #[error("Invalid JSON: {0}")]
    MalformedInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    UnsupportedOperation(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Stable machine-readable code sent alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingParameter(_) => "MISSING_PARAMETER",
            AppError::InvalidType(_) => "INVALID_TYPE",
            AppError::MalformedInput(_) => "MALFORMED_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::UnsupportedOperation(_) => "UNSUPPORTED_OPERATION",
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::Internal => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<GeneratorError> for AppError {
    fn from(error: GeneratorError) -> Self {
        AppError::InvalidArgument(error.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
            "code": self.code(),
        }));

        (self.status(), body).into_response()
    }
}

/// Treats a present-but-empty query value as absent
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Parses a history id given as text
pub fn parse_id(raw: &str) -> Result<u64, AppError> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidType("id must be an integer".to_string()))?;
    u64::try_from(id).map_err(|_| AppError::NotFound(format!("Username id {} not found", id)))
}

/// JSON object body read regardless of `Content-Type`.
///
/// Anything that is not a JSON object is rejected as
/// [`AppError::MalformedInput`]; field accessors separate absent values
/// ([`AppError::MissingParameter`]) from mistyped ones ([`AppError::InvalidType`]).
#[derive(Debug, Clone, Default)]
pub struct JsonPayload(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::MalformedInput(rejection.body_text()))?;
        Self::from_slice(&bytes)
    }
}

impl JsonPayload {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AppError> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(AppError::MalformedInput(
                "expected a JSON object".to_string(),
            )),
            Err(error) => Err(AppError::MalformedInput(error.to_string())),
        }
    }

    fn present(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Absent, `null` and `""` all read as `None`
    pub fn optional_str(&self, key: &str) -> Result<Option<&str>, AppError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(AppError::InvalidType(format!("{} must be a string", key))),
        }
    }

    pub fn require_str(&self, key: &str) -> Result<&str, AppError> {
        self.optional_str(key)?
            .ok_or_else(|| AppError::MissingParameter(key.to_string()))
    }

    pub fn optional_int(&self, key: &str) -> Result<Option<i64>, AppError> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| {
                AppError::InvalidType(format!("{} must be an integer", key))
            }),
        }
    }

    pub fn require_int(&self, key: &str) -> Result<i64, AppError> {
        self.optional_int(key)?
            .ok_or_else(|| AppError::MissingParameter(key.to_string()))
    }

    pub fn require_id(&self, key: &str) -> Result<u64, AppError> {
        let id = self.require_int(key)?;
        u64::try_from(id).map_err(|_| AppError::NotFound(format!("Username id {} not found", id)))
    }
}
