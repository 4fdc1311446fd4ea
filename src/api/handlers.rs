use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::BookResponse,
    services::selection,
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Returns one book picked at random from the whole table
pub async fn random_book(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<BookResponse>> {
    let book = state
        .select(|books, rng| selection::pick_random(books, rng).map(BookResponse::from))
        .inspect_err(|e| log_miss(&request_id, e))?;

    tracing::info!(request_id = %request_id, title = %book.title, "Random book picked");

    Ok(Json(book))
}

/// Returns one book picked at random among those tagged with `?tag=`
///
/// When `tag` is repeated the first occurrence is used.
pub async fn mood_book(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<BookResponse>> {
    let tag = first_param(&params, "tag");

    let book = state
        .select(|books, rng| selection::pick_by_mood(books, tag, rng).map(BookResponse::from))
        .inspect_err(|e| log_miss(&request_id, e))?;

    tracing::info!(
        request_id = %request_id,
        mood = %book.mood,
        title = %book.title,
        "Mood book picked"
    );

    Ok(Json(book))
}

fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn log_miss(request_id: &RequestId, error: &AppError) {
    if !matches!(error, AppError::Internal(_)) {
        tracing::info!(request_id = %request_id, error = error.code(), "No book returned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_param_takes_first_occurrence() {
        let params = pairs(&[("tag", "soft_slow"), ("other", "1"), ("tag", "thinky")]);
        assert_eq!(first_param(&params, "tag"), Some("soft_slow"));
    }

    #[test]
    fn test_first_param_absent() {
        let params = pairs(&[("mood", "soft_slow")]);
        assert_eq!(first_param(&params, "tag"), None);
        assert_eq!(first_param(&[], "tag"), None);
    }
}
