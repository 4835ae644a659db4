//! Domain service for catalog listings and detail lookups.
//!
//! Handlers hand over raw request values; the service validates them, plans
//! the page, loads relations in bulk and assembles localized projections.

use crate::api::types::{BlogPostDto, IdeaDto, LanguageDto, ProjectDto};
use crate::catalog::response::{format_date, format_datetime};
use crate::catalog::{
    FilterParams, Language, Locale, LocalizedText, PageDto, RelationContext, ValidationError,
};
use crate::domain::{ContentKind, ItemKey};
use crate::entities::{blog_posts, ideas, languages, projects};
use serde::Deserialize;
use thiserror::Error;

/// Domain errors for catalog reads.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{kind} {key} not found")]
    NotFound { kind: ContentKind, key: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl ContentError {
    pub fn not_found(kind: ContentKind, key: &ItemKey) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for ContentError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

/// Query string of a list request. Values stay textual until validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub lang: Option<String>,
    #[serde(flatten)]
    pub filter: FilterParams,
}

/// Listing defaults taken from the `[content]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSettings {
    pub default_language: Language,
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            default_language: Language::English,
            default_page_size: crate::constants::DEFAULT_PAGE_SIZE,
            max_page_size: crate::constants::MAX_PAGE_SIZE,
        }
    }
}

/// Domain service trait for catalog reads.
///
/// # Examples
///
/// ```rust,ignore
/// use folio::services::{ContentService, ContentError, ListQuery};
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn ContentService>) -> Result<(), ContentError> {
///     let page = service.list_posts(&ListQuery::default()).await?;
///     println!("{} posts", page.total);
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait ContentService: Send + Sync {
    /// Lists blog posts, newest first.
    ///
    /// # Errors
    ///
    /// - Returns [`ContentError::Validation`] for malformed paging or filter values
    /// - Returns [`ContentError::Database`] on connection failures
    async fn list_posts(&self, query: &ListQuery) -> Result<PageDto<BlogPostDto>, ContentError>;

    /// Fetches one blog post by id or slug.
    ///
    /// # Errors
    ///
    /// - Returns [`ContentError::NotFound`] if the post does not exist
    /// - Returns [`ContentError::Database`] on connection failures
    async fn get_post(&self, key: &ItemKey, lang: Option<&str>)
    -> Result<BlogPostDto, ContentError>;

    /// Lists projects in editorial order.
    async fn list_projects(&self, query: &ListQuery) -> Result<PageDto<ProjectDto>, ContentError>;

    async fn get_project(&self, key: &ItemKey, lang: Option<&str>)
    -> Result<ProjectDto, ContentError>;

    /// Lists research ideas, newest first.
    async fn list_ideas(&self, query: &ListQuery) -> Result<PageDto<IdeaDto>, ContentError>;

    async fn get_idea(&self, key: &ItemKey, lang: Option<&str>) -> Result<IdeaDto, ContentError>;

    /// Languages currently marked active.
    async fn list_languages(&self) -> Result<Vec<LanguageDto>, ContentError>;
}

fn optional_datetime(value: Option<&chrono::NaiveDateTime>) -> String {
    value.map(format_datetime).unwrap_or_default()
}

fn optional_date(value: Option<&chrono::NaiveDate>) -> String {
    value.map(format_date).unwrap_or_default()
}

/// Projects a blog post with its relations in the resolved language.
#[must_use]
pub fn post_to_dto(post: blog_posts::Model, ctx: &RelationContext, locale: Locale) -> BlogPostDto {
    let translation = ctx.translation(&post.id);
    let language = locale.served(translation);
    let text = LocalizedText {
        title: post.title,
        excerpt: post.excerpt,
        body: post.content,
    }
    .localize(translation);

    let (series_id, series_title, series_description, series_position, series_total) =
        match ctx.series(post.series_id.as_deref()) {
            Some(series) => {
                let (position, total) = ctx.series_position(&series.id, &post.id);
                (
                    series.id.clone(),
                    series.title.clone(),
                    series.description.clone().unwrap_or_default(),
                    position,
                    total,
                )
            }
            None => (String::new(), String::new(), String::new(), 0, 0),
        };

    BlogPostDto {
        title: text.title,
        excerpt: text.excerpt,
        content: text.body,
        status: post.status.as_str().to_string(),
        is_featured: post.is_featured,
        reading_time: post.reading_time,
        view_count: post.view_count,
        like_count: post.like_count,
        published_at: optional_datetime(post.published_at.as_ref()),
        created_at: format_datetime(&post.created_at),
        updated_at: format_datetime(&post.updated_at),
        author_name: ctx.author_name(&post.author_id),
        category_name: ctx.category_name(post.category_id.as_deref()),
        tags: ctx.tag_names(&post.id),
        series_id,
        series_title,
        series_description,
        series_position,
        series_total,
        language: language.code().to_string(),
        id: post.id,
        slug: post.slug,
    }
}

#[must_use]
pub fn project_to_dto(
    project: projects::Model,
    ctx: &RelationContext,
    locale: Locale,
) -> ProjectDto {
    let translation = ctx.translation(&project.id);
    let language = locale.served(translation);
    let text = LocalizedText {
        title: project.title,
        excerpt: project.description,
        body: project.content,
    }
    .localize(translation);

    ProjectDto {
        content_type: project.content_type,
        title: text.title,
        description: text.excerpt,
        content: text.body,
        status: project.status.as_str().to_string(),
        is_featured: project.is_featured,
        github_url: project.github_url.unwrap_or_default(),
        demo_url: project.demo_url.unwrap_or_default(),
        start_date: optional_date(project.start_date.as_ref()),
        end_date: optional_date(project.end_date.as_ref()),
        sort_order: project.sort_order,
        view_count: project.view_count,
        like_count: project.like_count,
        created_at: format_datetime(&project.created_at),
        updated_at: format_datetime(&project.updated_at),
        owner_name: ctx.author_name(&project.owner_id),
        category_name: ctx.category_name(project.category_id.as_deref()),
        tags: ctx.tag_names(&project.id),
        technologies: ctx.technologies(&project.id),
        language: language.code().to_string(),
        id: project.id,
        slug: project.slug,
    }
}

/// Ideas localize title, abstract and motivation; methodology stays in the
/// base language.
#[must_use]
pub fn idea_to_dto(idea: ideas::Model, ctx: &RelationContext, locale: Locale) -> IdeaDto {
    let translation = ctx.translation(&idea.id);
    let language = locale.served(translation);
    let text = LocalizedText {
        title: idea.title,
        excerpt: idea.abstract_text,
        body: idea.motivation,
    }
    .localize(translation);

    IdeaDto {
        title: text.title,
        abstract_text: text.excerpt,
        motivation: text.body,
        methodology: idea.methodology,
        status: idea.status.as_str().to_string(),
        collaboration_required: idea.collaboration_required,
        funding_status: idea.funding_status.unwrap_or_default(),
        difficulty: idea.difficulty.unwrap_or_default(),
        view_count: idea.view_count,
        like_count: idea.like_count,
        published_at: optional_datetime(idea.published_at.as_ref()),
        created_at: format_datetime(&idea.created_at),
        updated_at: format_datetime(&idea.updated_at),
        owner_name: ctx.author_name(&idea.owner_id),
        category_name: ctx.category_name(idea.category_id.as_deref()),
        tags: ctx.tag_names(&idea.id),
        language: language.code().to_string(),
        id: idea.id,
        slug: idea.slug,
    }
}

#[must_use]
pub fn language_to_dto(language: languages::Model) -> LanguageDto {
    LanguageDto {
        code: language.code,
        name: language.name,
        native_name: language.native_name,
    }
}
