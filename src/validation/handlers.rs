use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    service::ValidationService,
    types::{
        Action, ActionResponse, ComplexityCheckResponse, CustomUsernameResponse,
        InappropriateWordsResponse, LengthCheckResponse, SimilarityQuery, SimilarityResponse,
        SpecialCharactersResponse,
    },
};
use crate::generator::types::{AvailabilityResponse, UsernameQuery, UsernameResponse};
use crate::shared::{non_empty, AppError, AppState, JsonPayload};

/// Create validation API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check-username", get(check_username))
        .route("/username-length", post(username_length))
        .route("/username-complexity", post(username_complexity))
        .route(
            "/avoid-special-characters",
            get(clean_username).post(avoid_special_characters),
        )
        .route(
            "/filter-inappropriate-words",
            get(filtered_username).post(filter_inappropriate_words),
        )
        .route("/custom-username", post(custom_username))
        .route("/username-check-similarity", get(username_check_similarity))
}

fn service(state: &AppState) -> ValidationService {
    ValidationService::new(
        Arc::clone(&state.history_repository),
        Arc::clone(&state.random),
        Arc::clone(&state.blacklist),
    )
}

fn parse_action(payload: &JsonPayload) -> Result<Action, AppError> {
    let raw = payload.require_str("action")?;
    raw.parse().map_err(|_| {
        warn!(action = %raw, "Unsupported action");
        AppError::UnsupportedOperation(r#"Invalid action. Use "generate" or "check"."#.to_string())
    })
}

/// GET /check-username?username=
#[instrument(name = "check_username", skip(state))]
pub async fn check_username(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let username = non_empty(&query.username)
        .ok_or_else(|| AppError::MissingParameter("username".to_string()))?;
    let response = service(&state).check_availability(username).await?;
    Ok(Json(response))
}

/// POST /username-length `{"action": "generate", "length": 10}` or
/// `{"action": "check", "username": "..."}`
#[instrument(name = "username_length", skip(state, payload))]
pub async fn username_length(
    State(state): State<AppState>,
    payload: JsonPayload,
) -> Result<Json<ActionResponse<LengthCheckResponse>>, AppError> {
    let service = service(&state);

    let response = match parse_action(&payload)? {
        Action::Generate => {
            let length = payload.require_int("length")?;
            let username = service.generator().random_of_length(length).await?;
            info!(username = %username, "Generated username of requested length");
            ActionResponse::Generated(UsernameResponse { username })
        }
        Action::Check => {
            let username = payload.require_str("username")?;
            ActionResponse::Checked(service.check_length(username))
        }
    };

    Ok(Json(response))
}

/// POST /username-complexity `{"action": "generate"}` or
/// `{"action": "check", "username": "..."}`
#[instrument(name = "username_complexity", skip(state, payload))]
pub async fn username_complexity(
    State(state): State<AppState>,
    payload: JsonPayload,
) -> Result<Json<ActionResponse<ComplexityCheckResponse>>, AppError> {
    let service = service(&state);

    let response = match parse_action(&payload)? {
        Action::Generate => {
            let username = service.generator().complex().await?;
            ActionResponse::Generated(UsernameResponse { username })
        }
        Action::Check => {
            let username = payload.require_str("username")?;
            ActionResponse::Checked(service.check_complexity(username))
        }
    };

    Ok(Json(response))
}

/// GET /avoid-special-characters
///
/// Generates a username that only uses word characters
#[instrument(name = "clean_username", skip(state))]
pub async fn clean_username(
    State(state): State<AppState>,
) -> Result<Json<UsernameResponse>, AppError> {
    let username = service(&state).generator().random_default().await?;
    Ok(Json(UsernameResponse { username }))
}

/// POST /avoid-special-characters `{"username": "..."}`
#[instrument(name = "avoid_special_characters", skip(state, payload))]
pub async fn avoid_special_characters(
    State(state): State<AppState>,
    payload: JsonPayload,
) -> Result<Json<SpecialCharactersResponse>, AppError> {
    let username = payload.require_str("username")?;
    Ok(Json(service(&state).special_characters(username)))
}

/// GET /filter-inappropriate-words
///
/// Generates a random username with blacklisted terms removed
#[instrument(name = "filtered_username", skip(state))]
pub async fn filtered_username(
    State(state): State<AppState>,
) -> Result<Json<UsernameResponse>, AppError> {
    let username = service(&state).filtered_random().await?;
    Ok(Json(UsernameResponse { username }))
}

/// POST /filter-inappropriate-words `{"username": "..."}`
#[instrument(name = "filter_inappropriate_words", skip(state, payload))]
pub async fn filter_inappropriate_words(
    State(state): State<AppState>,
    payload: JsonPayload,
) -> Result<Json<InappropriateWordsResponse>, AppError> {
    let username = payload.require_str("username")?;
    Ok(Json(service(&state).inappropriate_words(username)))
}

/// POST /custom-username `{"username": "..."}`
///
/// A rejected name still answers 200 with `valid: false`
#[instrument(name = "custom_username", skip(state, payload))]
pub async fn custom_username(
    State(state): State<AppState>,
    payload: JsonPayload,
) -> Result<Json<CustomUsernameResponse>, AppError> {
    let username = payload.require_str("username")?;
    let response = service(&state).custom(username).await?;
    Ok(Json(response))
}

/// GET /username-check-similarity?new_username=&existing_username=
#[instrument(name = "username_check_similarity", skip(state))]
pub async fn username_check_similarity(
    State(state): State<AppState>,
    Query(query): Query<SimilarityQuery>,
) -> Result<Json<SimilarityResponse>, AppError> {
    let (new_username, existing_username) = match (
        non_empty(&query.new_username),
        non_empty(&query.existing_username),
    ) {
        (Some(new_username), Some(existing_username)) => (new_username, existing_username),
        _ => {
            return Err(AppError::MissingParameter(
                "new_username and existing_username".to_string(),
            ))
        }
    };

    let response = service(&state).similarity(new_username, existing_username);
    info!(
        score = response.similarity_score,
        similar = response.similar,
        "Similarity computed"
    );
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::repository::{HistoryRepository, InMemoryHistoryRepository};
    use crate::shared::test_utils::AppStateBuilder;
    use crate::validation::Blacklist;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt; // for `oneshot`

    fn app(repo: Arc<InMemoryHistoryRepository>) -> Router {
        let app_state = AppStateBuilder::new()
            .with_history_repository(repo)
            .with_fixed_random(0)
            .build();
        router().with_state(app_state)
    }

    async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_check_username() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        repo.append("taken1").await.unwrap();
        let app = app(repo);

        let (status, json) = send(app.clone(), "GET", "/check-username?username=free1", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({"username": "free1", "available": true}));

        let (_, json) = send(app.clone(), "GET", "/check-username?username=taken1", "").await;
        assert_eq!(json["available"], false);

        let (status, json) = send(app, "GET", "/check-username", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "username parameter required");
    }

    #[tokio::test]
    async fn test_username_length_actions() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let app = app(repo.clone());

        let (status, json) = send(
            app.clone(),
            "POST",
            "/username-length",
            r#"{"action": "generate", "length": 12}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["username"].as_str().unwrap().len(), 12);
        assert_eq!(repo.record_count(), 1);

        let (status, json) = send(
            app.clone(),
            "POST",
            "/username-length",
            r#"{"action": "check", "username": "short"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({"username": "short", "valid_length": false}));
        assert_eq!(repo.record_count(), 1);
    }

    #[tokio::test]
    async fn test_username_length_errors() {
        let app = app(Arc::new(InMemoryHistoryRepository::new()));

        let cases = [
            (r#"{"action": "generate", "length": "ten"}"#, "INVALID_TYPE"),
            (r#"{"action": "generate", "length": 9223372036854775807}"#, "INVALID_ARGUMENT"),
            (r#"{"action": "generate"}"#, "MISSING_PARAMETER"),
            (r#"{"action": "check"}"#, "MISSING_PARAMETER"),
            (r#"{"action": "explode"}"#, "UNSUPPORTED_OPERATION"),
            (r#"{}"#, "MISSING_PARAMETER"),
            (r#"{"action": "#, "MALFORMED_INPUT"),
        ];

        for (body, code) in cases {
            let (status, json) = send(app.clone(), "POST", "/username-length", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(json["code"], code, "{body}");
        }
    }

    #[tokio::test]
    async fn test_username_complexity_actions() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let app = app(repo.clone());

        let (status, json) = send(
            app.clone(),
            "POST",
            "/username-complexity",
            r#"{"action": "generate"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["username"].as_str().unwrap().len(), 10);
        assert_eq!(repo.record_count(), 1);

        let (_, json) = send(
            app,
            "POST",
            "/username-complexity",
            r#"{"action": "check", "username": "Ab1!"}"#,
        )
        .await;
        assert_eq!(json["complexity_ok"], true);
    }

    #[tokio::test]
    async fn test_avoid_special_characters() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let app = app(repo.clone());

        let (_, json) = send(app.clone(), "GET", "/avoid-special-characters", "").await;
        assert_eq!(json["username"], "aaaaaaaa");
        assert_eq!(repo.record_count(), 1);

        let (_, json) = send(
            app.clone(),
            "POST",
            "/avoid-special-characters",
            r#"{"username": "neo-one!"}"#,
        )
        .await;
        assert_eq!(
            json,
            serde_json::json!({"original": "neo-one!", "alternative": "neoone", "contains_special": true})
        );

        let (_, json) = send(
            app,
            "POST",
            "/avoid-special-characters",
            r#"{"username": "neo_one"}"#,
        )
        .await;
        assert_eq!(
            json,
            serde_json::json!({"username": "neo_one", "contains_special": false})
        );
    }

    #[tokio::test]
    async fn test_filter_inappropriate_words() {
        let app = app(Arc::new(InMemoryHistoryRepository::new()));

        let (status, json) = send(
            app.clone(),
            "POST",
            "/filter-inappropriate-words",
            r#"{"username": "xBadWordx"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["inappropriate"], true);
        assert_eq!(json["alternative"], "xx");
        assert_eq!(json["original"], "xBadWordx");

        let (_, json) = send(
            app.clone(),
            "POST",
            "/filter-inappropriate-words",
            r#"{"username": "polite"}"#,
        )
        .await;
        assert_eq!(json, serde_json::json!({"username": "polite", "inappropriate": false}));

        let (status, _) = send(app, "GET", "/filter-inappropriate-words", "").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_filtered_username_uses_configured_blacklist() {
        let app_state = AppStateBuilder::new()
            .with_fixed_random(0)
            .with_blacklist(Blacklist::new(["a{4}"]).unwrap())
            .build();
        let app = router().with_state(app_state);

        let (_, json) = send(app, "GET", "/filter-inappropriate-words", "").await;
        assert_eq!(json["username"], "");
    }

    #[tokio::test]
    async fn test_custom_username() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let app = app(repo.clone());

        let (status, json) =
            send(app.clone(), "POST", "/custom-username", r#"{"username": "trinity9"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["valid"], true);
        assert!(repo.is_taken("trinity9").await.unwrap());

        let (status, json) =
            send(app.clone(), "POST", "/custom-username", r#"{"username": "trin"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["valid"], false);
        assert!(json["error"].as_str().is_some());

        let (status, _) = send(app, "POST", "/custom-username", r#"{"username": 5}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_username_check_similarity() {
        let app = app(Arc::new(InMemoryHistoryRepository::new()));

        let (status, json) = send(
            app.clone(),
            "GET",
            "/username-check-similarity?new_username=abcd&existing_username=abc",
            "",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["similar"], true);
        assert_eq!(json["similarity_score"], 0.75);
        assert_eq!(json["alternative"], "abcd_aaa");

        let (_, json) = send(
            app.clone(),
            "GET",
            "/username-check-similarity?new_username=abc&existing_username=xyz",
            "",
        )
        .await;
        assert_eq!(json["similar"], false);
        assert!(json.get("alternative").is_none());

        let (status, _) = send(
            app,
            "GET",
            "/username-check-similarity?new_username=abc",
            "",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
