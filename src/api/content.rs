use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, BlogPostDto, IdeaDto, LangQuery, ProjectDto};
use crate::catalog::PageDto;
use crate::domain::ItemKey;
use crate::services::{ContentError, ListQuery};

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Validation(e) => e.into(),
            e @ ContentError::NotFound { .. } => Self::NotFound(e.to_string()),
            ContentError::Database(msg) => Self::database(msg),
        }
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PageDto<BlogPostDto>> {
    let page = state.content_service().list_posts(&query).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
) -> ApiResult<BlogPostDto> {
    let key = ItemKey::id(&id)?;
    let post = state
        .content_service()
        .get_post(&key, query.lang.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(post)))
}

pub async fn get_post_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LangQuery>,
) -> ApiResult<BlogPostDto> {
    let key = ItemKey::slug(&slug)?;
    let post = state
        .content_service()
        .get_post(&key, query.lang.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(post)))
}

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PageDto<ProjectDto>> {
    let page = state.content_service().list_projects(&query).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
) -> ApiResult<ProjectDto> {
    let key = ItemKey::id(&id)?;
    let project = state
        .content_service()
        .get_project(&key, query.lang.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(project)))
}

pub async fn get_project_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LangQuery>,
) -> ApiResult<ProjectDto> {
    let key = ItemKey::slug(&slug)?;
    let project = state
        .content_service()
        .get_project(&key, query.lang.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(project)))
}

pub async fn list_ideas(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PageDto<IdeaDto>> {
    let page = state.content_service().list_ideas(&query).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_idea(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
) -> ApiResult<IdeaDto> {
    let key = ItemKey::id(&id)?;
    let idea = state
        .content_service()
        .get_idea(&key, query.lang.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(idea)))
}

pub async fn get_idea_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LangQuery>,
) -> ApiResult<IdeaDto> {
    let key = ItemKey::slug(&slug)?;
    let idea = state
        .content_service()
        .get_idea(&key, query.lang.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(idea)))
}
