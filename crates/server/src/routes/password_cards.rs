use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::{PasswordCard, PasswordCardInput};
use tracing::warn;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// GET /password-cards/
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PasswordCard>>, JsonApiError> {
    let cards = state.cards.list().map_err(|e| {
        warn!(error = %e, "error listing password cards");
        JsonApiError::from(e)
    })?;
    Ok(Json(cards))
}

/// POST /password-cards/
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<PasswordCard>, JsonRejection>,
) -> Result<(StatusCode, Json<PasswordCard>), JsonApiError> {
    let Json(card) = payload.map_err(|e| JsonApiError::bad_request(e.body_text()))?;
    let created = state.cards.create(card).map_err(|e| {
        warn!(error = %e, "error creating password card");
        JsonApiError::from(e)
    })?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /password-cards/:id/ — any `id` in the body is ignored.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PasswordCardInput>, JsonRejection>,
) -> Result<Json<PasswordCard>, JsonApiError> {
    let Json(input) = payload.map_err(|e| JsonApiError::bad_request(e.body_text()))?;
    let updated = state.cards.update(input.into_card(id)).map_err(|e| {
        warn!(error = %e, "error updating password card");
        JsonApiError::from(e)
    })?;
    Ok(Json(updated))
}

/// DELETE /password-cards/:id/
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    state.cards.delete(&id).map_err(|e| {
        warn!(error = %e, "error deleting password card");
        JsonApiError::from(e)
    })?;
    Ok(StatusCode::NO_CONTENT)
}
