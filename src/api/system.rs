use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use super::{ApiError, ApiResponse, AppState, HealthDto, LanguageDto};

/// `GET /health`
///
/// Reports process uptime and database connectivity.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let db_ready = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    let status = if db_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::success(HealthDto {
            status: if db_ready { "ok" } else { "degraded" }.to_string(),
            database: if db_ready { "connected" } else { "unreachable" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime: state.start_time.elapsed().as_secs(),
        })),
    )
        .into_response()
}

/// `GET /api/languages`
pub async fn list_languages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<LanguageDto>>>, ApiError> {
    let languages = state.content_service().list_languages().await?;
    Ok(Json(ApiResponse::success(languages)))
}
