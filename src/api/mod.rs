use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod content;
mod counters;
mod error;
mod observability;
mod resume;
mod series;
mod system;
pub mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use crate::services::{ContentService, CounterService, ResumeService, SeriesService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn content_service(&self) -> &Arc<dyn ContentService + Send + Sync + 'static> {
        &self.shared.content_service
    }

    #[must_use]
    pub fn series_service(&self) -> &Arc<dyn SeriesService + Send + Sync + 'static> {
        &self.shared.series_service
    }

    #[must_use]
    pub fn counter_service(&self) -> &Arc<dyn CounterService + Send + Sync + 'static> {
        &self.shared.counter_service
    }

    #[must_use]
    pub fn resume_service(&self) -> &Arc<dyn ResumeService + Send + Sync + 'static> {
        &self.shared.resume_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/blog", get(content::list_posts))
        .route("/blog/{id}", get(content::get_post))
        .route("/blog/slug/{slug}", get(content::get_post_by_slug))
        .route("/blog/{id}/{counter}", post(counters::mutate_post))
        .route("/projects", get(content::list_projects))
        .route("/projects/{id}", get(content::get_project))
        .route("/projects/slug/{slug}", get(content::get_project_by_slug))
        .route("/projects/{id}/{counter}", post(counters::mutate_project))
        .route("/ideas", get(content::list_ideas))
        .route("/ideas/{id}", get(content::get_idea))
        .route("/ideas/slug/{slug}", get(content::get_idea_by_slug))
        .route("/ideas/{id}/{counter}", post(counters::mutate_idea))
        .route("/series/{id}", get(series::get_series))
        .route("/resume", get(resume::get_resume))
        .route("/languages", get(system::list_languages));

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
