use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiResponse, AppState, LangQuery, ResumeDto};

pub async fn get_resume(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
) -> Json<ApiResponse<ResumeDto>> {
    let resume = state
        .resume_service()
        .get_resume(query.lang.as_deref())
        .await;
    Json(ApiResponse::success(resume))
}
