use crate::api::types::{EpisodeDto, SeriesDto};
use crate::catalog::response::format_datetime;
use crate::catalog::series::{SeriesOutline, format_duration};
use crate::catalog::{Language, LocalizedText, RelationContext, ValidationError};
use crate::entities::{blog_posts, series};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Series {0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for SeriesError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

/// Query string of a series request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeriesQuery {
    pub lang: Option<String>,
    /// Id of the episode the reader is on.
    pub current: Option<String>,
    /// Comma-separated ids the reader has finished.
    pub completed: Option<String>,
}

#[async_trait::async_trait]
pub trait SeriesService: Send + Sync {
    /// Returns a series with its ordered episodes.
    ///
    /// # Errors
    ///
    /// - Returns [`SeriesError::Validation`] for a malformed id or completion list
    /// - Returns [`SeriesError::NotFound`] if the series does not exist
    /// - Returns [`SeriesError::Database`] on connection failures
    async fn get_series(&self, id: &str, query: &SeriesQuery) -> Result<SeriesDto, SeriesError>;
}

/// Projects an ordered outline into the series response.
#[must_use]
pub fn series_to_dto(
    series: series::Model,
    outline: &SeriesOutline<'_, blog_posts::Model>,
    ctx: &RelationContext,
    language: Language,
) -> SeriesDto {
    let episodes = outline
        .episodes
        .iter()
        .map(|episode| {
            let post = episode.item;
            let text = LocalizedText {
                title: post.title.clone(),
                excerpt: post.excerpt.clone(),
                body: String::new(),
            }
            .localize(ctx.translation(&post.id));

            EpisodeDto {
                id: post.id.clone(),
                slug: post.slug.clone(),
                title: text.title,
                excerpt: text.excerpt,
                order: episode.display_order,
                duration: format_duration(i64::from(post.reading_time)),
                reading_time: post.reading_time,
                published_at: post
                    .published_at
                    .as_ref()
                    .map(format_datetime)
                    .unwrap_or_default(),
                current: episode.is_current,
                completed: episode.is_completed,
            }
        })
        .collect();

    SeriesDto {
        id: series.id,
        slug: series.slug,
        title: series.title,
        description: series.description.unwrap_or_default(),
        post_count: series.post_count,
        is_completed: series.is_completed,
        total_duration: outline.total_duration(),
        completed_count: outline.completed_count,
        episodes,
        created_at: format_datetime(&series.created_at),
        updated_at: format_datetime(&series.updated_at),
        language: language.code().to_string(),
    }
}
