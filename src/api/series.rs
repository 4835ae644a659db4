use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, SeriesDto};
use crate::services::{SeriesError, SeriesQuery};

impl From<SeriesError> for ApiError {
    fn from(err: SeriesError) -> Self {
        match err {
            SeriesError::Validation(e) => e.into(),
            SeriesError::NotFound(id) => Self::not_found("Series", id),
            SeriesError::Database(msg) => Self::database(msg),
        }
    }
}

/// Returns a series with its episodes in reading order.
///
/// `completed` takes the ids the reader has finished; without it no episode
/// is marked completed.
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<ApiResponse<SeriesDto>>, ApiError> {
    let series = state.series_service().get_series(&id, &query).await?;
    Ok(Json(ApiResponse::success(series)))
}
