use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, CounterDto};
use crate::api::validation::{validate_counter_body, validate_counter_field};
use crate::domain::ContentKind;
use crate::services::CounterError;

impl From<CounterError> for ApiError {
    fn from(err: CounterError) -> Self {
        match err {
            CounterError::Validation(e) => e.into(),
            CounterError::NotFound { kind, id } => Self::not_found(kind, id),
            CounterError::Database(msg) => Self::database(msg),
        }
    }
}

async fn mutate(
    state: &AppState,
    kind: ContentKind,
    id: &str,
    counter: &str,
    body: &[u8],
) -> Result<Json<ApiResponse<CounterDto>>, ApiError> {
    let field = validate_counter_field(counter)?;
    let direction = validate_counter_body(body)?;
    let dto = state
        .counter_service()
        .mutate(kind, id, field, direction)
        .await?;
    Ok(Json(ApiResponse::success(dto)))
}

pub async fn mutate_post(
    State(state): State<Arc<AppState>>,
    Path((id, counter)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<ApiResponse<CounterDto>>, ApiError> {
    mutate(&state, ContentKind::BlogPost, &id, &counter, &body).await
}

pub async fn mutate_project(
    State(state): State<Arc<AppState>>,
    Path((id, counter)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<ApiResponse<CounterDto>>, ApiError> {
    mutate(&state, ContentKind::Project, &id, &counter, &body).await
}

pub async fn mutate_idea(
    State(state): State<Arc<AppState>>,
    Path((id, counter)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<ApiResponse<CounterDto>>, ApiError> {
    mutate(&state, ContentKind::Idea, &id, &counter, &body).await
}
