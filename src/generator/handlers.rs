use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::GeneratorService,
    types::{
        AvailabilityResponse, FirstNameQuery, HobbyQuery, HobbySuggestionsResponse, LengthQuery,
        PhraseQuery, PrefixQuery, SimilarSuggestionsResponse, SuffixQuery, SuggestionsQuery,
        SuggestionsResponse, UsernameQuery, UsernameResponse, VariationResponse,
    },
};
use crate::shared::{non_empty, AppError, AppState, JsonPayload};

/// Default size of `/humanlike-username` when no length is given
const DEFAULT_HUMANLIKE_LENGTH: usize = 10;

/// Create generation API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-username", get(generate_username))
        .route("/username-suggestions", get(username_suggestions))
        .route(
            "/username-suggestions-by-hobby",
            get(username_suggestions_by_hobby),
        )
        .route("/username-availability", get(username_availability))
        .route("/username-from-phrase", get(username_from_phrase))
        .route(
            "/similar-username-suggestions",
            get(similar_username_suggestions),
        )
        .route("/prefix-username", get(prefix_username))
        .route("/suffix-username", get(suffix_username))
        .route("/username-variation", get(username_variation))
        .route(
            "/random-username-idea",
            get(random_username_idea).post(random_username_idea_of_length),
        )
        .route("/adjective-noun-username", get(adjective_noun_username))
        .route("/humanlike-username", get(humanlike_username))
}

fn service(state: &AppState) -> GeneratorService {
    GeneratorService::new(
        Arc::clone(&state.history_repository),
        Arc::clone(&state.random),
    )
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    non_empty(value).ok_or_else(|| AppError::MissingParameter(name.to_string()))
}

/// GET /generate-username?first_name=
#[instrument(name = "generate_username", skip(state))]
pub async fn generate_username(
    State(state): State<AppState>,
    Query(query): Query<FirstNameQuery>,
) -> Result<Json<UsernameResponse>, AppError> {
    let username = service(&state)
        .generate(non_empty(&query.first_name))
        .await?;
    info!(username = %username, "Username generated");
    Ok(Json(UsernameResponse { username }))
}

/// GET /username-suggestions?first_name=&favorite_color=
#[instrument(name = "username_suggestions", skip(state))]
pub async fn username_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionsQuery>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let suggestions = service(&state).suggestions(
        non_empty(&query.first_name),
        non_empty(&query.favorite_color),
    )?;
    Ok(Json(SuggestionsResponse { suggestions }))
}

/// GET /username-suggestions-by-hobby?hobby=
#[instrument(name = "username_suggestions_by_hobby", skip(state))]
pub async fn username_suggestions_by_hobby(
    State(state): State<AppState>,
    Query(query): Query<HobbyQuery>,
) -> Result<Json<HobbySuggestionsResponse>, AppError> {
    let hobby = required(&query.hobby, "hobby")?;
    let suggestions = service(&state).hobby_suggestions(hobby);
    Ok(Json(HobbySuggestionsResponse {
        hobby: hobby.to_string(),
        suggestions,
    }))
}

/// GET /username-availability?username=
///
/// Checks the given name (or a random one) and retries once if taken
#[instrument(name = "username_availability", skip(state))]
pub async fn username_availability(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let response = service(&state)
        .availability(non_empty(&query.username))
        .await?;
    info!(username = %response.username, available = response.available, "Availability checked");
    Ok(Json(response))
}

/// GET /username-from-phrase?phrase=&unique=
#[instrument(name = "username_from_phrase", skip(state))]
pub async fn username_from_phrase(
    State(state): State<AppState>,
    Query(query): Query<PhraseQuery>,
) -> Result<Json<UsernameResponse>, AppError> {
    let phrase = required(&query.phrase, "phrase")?;
    let unique = query
        .unique
        .as_deref()
        .is_some_and(|value| value.eq_ignore_ascii_case("true"));

    let username = service(&state).from_phrase(phrase, unique).await?;
    Ok(Json(UsernameResponse { username }))
}

/// GET /similar-username-suggestions?username=
#[instrument(name = "similar_username_suggestions", skip(state))]
pub async fn similar_username_suggestions(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<SimilarSuggestionsResponse>, AppError> {
    let username = required(&query.username, "username")?;
    let suggestions = service(&state).similar(username);
    Ok(Json(SimilarSuggestionsResponse {
        original: username.to_string(),
        suggestions,
    }))
}

/// GET /prefix-username?prefix=
#[instrument(name = "prefix_username", skip(state))]
pub async fn prefix_username(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> Result<Json<UsernameResponse>, AppError> {
    let username = service(&state).prefixed(non_empty(&query.prefix)).await?;
    Ok(Json(UsernameResponse { username }))
}

/// GET /suffix-username?suffix=
#[instrument(name = "suffix_username", skip(state))]
pub async fn suffix_username(
    State(state): State<AppState>,
    Query(query): Query<SuffixQuery>,
) -> Result<Json<UsernameResponse>, AppError> {
    let username = service(&state).suffixed(non_empty(&query.suffix)).await?;
    Ok(Json(UsernameResponse { username }))
}

/// GET /username-variation?username=
#[instrument(name = "username_variation", skip(state))]
pub async fn username_variation(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<VariationResponse>, AppError> {
    let base = required(&query.username, "username")?;
    let variations = service(&state).variations(base).await?;
    Ok(Json(VariationResponse {
        base: base.to_string(),
        variations,
    }))
}

/// GET /random-username-idea
#[instrument(name = "random_username_idea", skip(state))]
pub async fn random_username_idea(
    State(state): State<AppState>,
) -> Result<Json<UsernameResponse>, AppError> {
    let username = service(&state).random_default().await?;
    Ok(Json(UsernameResponse { username }))
}

/// POST /random-username-idea `{"length": 12}`
#[instrument(name = "random_username_idea_of_length", skip(state, payload))]
pub async fn random_username_idea_of_length(
    State(state): State<AppState>,
    payload: JsonPayload,
) -> Result<Json<UsernameResponse>, AppError> {
    let length = payload.require_int("length")?;
    let username = service(&state).random_of_length(length).await?;
    Ok(Json(UsernameResponse { username }))
}

/// GET /adjective-noun-username
#[instrument(name = "adjective_noun_username", skip(state))]
pub async fn adjective_noun_username(
    State(state): State<AppState>,
) -> Result<Json<UsernameResponse>, AppError> {
    let username = service(&state).adjective_noun().await?;
    Ok(Json(UsernameResponse { username }))
}

/// GET /humanlike-username?length=
#[instrument(name = "humanlike_username", skip(state))]
pub async fn humanlike_username(
    State(state): State<AppState>,
    Query(query): Query<LengthQuery>,
) -> Result<Json<UsernameResponse>, AppError> {
    let length = match non_empty(&query.length) {
        Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
            AppError::InvalidType("length must be a non-negative integer".to_string())
        })?,
        None => DEFAULT_HUMANLIKE_LENGTH,
    };

    let username = service(&state).humanlike(length).await?;
    Ok(Json(UsernameResponse { username }))
}
