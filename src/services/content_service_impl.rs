//! `SeaORM` implementation of the `ContentService` trait.

use crate::api::types::{BlogPostDto, IdeaDto, LanguageDto, ProjectDto};
use crate::catalog::{
    ContentFilter, FilterTarget, Language, Locale, LocaleResolver, PageDto, PageRequest,
};
use crate::db::{RelationKeys, Store};
use crate::domain::{ContentKind, ItemKey};
use crate::entities::sea_orm_active_enums::ItemKind;
use crate::entities::{blog_posts, ideas, projects};
use crate::services::content_service::{
    CatalogSettings, ContentError, ContentService, ListQuery, idea_to_dto, language_to_dto,
    post_to_dto, project_to_dto,
};
use async_trait::async_trait;
use tracing::debug;

/// Builds a resolver over the languages marked active.
///
/// An empty language table means no language was switched off, so every
/// supported language stays available.
pub(crate) async fn language_resolver(
    store: &Store,
    default: Language,
) -> anyhow::Result<LocaleResolver> {
    let active = store.list_languages(true).await?;
    if active.is_empty() {
        return Ok(LocaleResolver::new(default));
    }
    Ok(LocaleResolver::with_active(
        default,
        active.iter().filter_map(|l| Language::from_tag(&l.code)),
    ))
}

pub struct SeaOrmContentService {
    store: Store,
    settings: CatalogSettings,
}

impl SeaOrmContentService {
    #[must_use]
    pub const fn new(store: Store, settings: CatalogSettings) -> Self {
        Self { store, settings }
    }

    /// Base text is authored in the configured default language.
    async fn resolve_locale(&self, requested: Option<&str>) -> Result<Locale, ContentError> {
        let default = self.settings.default_language;
        let resolver = language_resolver(&self.store, default)
            .await
            .map_err(|e| ContentError::Database(e.to_string()))?;
        Ok(Locale::new(resolver.resolve(requested), default))
    }

    fn plan(&self, query: &ListQuery) -> Result<(ContentFilter, PageRequest), ContentError> {
        let filter = query.filter.parse()?;
        let page = PageRequest::from_raw(
            query.page.as_deref(),
            query.size.as_deref(),
            self.settings.default_page_size,
            self.settings.max_page_size,
        )?;
        Ok((filter, page))
    }

    async fn fetch<E>(
        &self,
        query: &ListQuery,
    ) -> Result<(Vec<E::Model>, u64, PageRequest, Locale), ContentError>
    where
        E: FilterTarget,
        E::Model: Sync + 'static,
    {
        let (filter, page) = self.plan(query)?;
        let locale = self.resolve_locale(query.lang.as_deref()).await?;

        let (items, total) = self
            .store
            .find_items::<E>(&filter, &page)
            .await
            .map_err(|e| ContentError::Database(e.to_string()))?;

        Ok((items, total, page, locale))
    }

    async fn lookup<E>(
        &self,
        kind: ContentKind,
        key: &ItemKey,
        lang: Option<&str>,
    ) -> Result<(E::Model, Locale), ContentError>
    where
        E: FilterTarget,
    {
        let locale = self.resolve_locale(lang).await?;
        let item = self
            .store
            .get_item::<E>(key)
            .await
            .map_err(|e| ContentError::Database(e.to_string()))?
            .ok_or_else(|| ContentError::not_found(kind, key))?;

        debug!(%kind, %key, language = locale.requested.code(), "Item resolved");
        Ok((item, locale))
    }

    async fn relations(
        &self,
        kind: ItemKind,
        keys: &RelationKeys,
        locale: Locale,
    ) -> Result<crate::catalog::RelationContext, ContentError> {
        self.store
            .load_relations(kind, keys, locale.requested)
            .await
            .map_err(|e| ContentError::Database(e.to_string()))
    }

    fn post_keys(posts: &[blog_posts::Model]) -> RelationKeys {
        RelationKeys::collect(posts)
            .with_series(posts.iter().filter_map(|p| p.series_id.as_deref()))
    }
}

#[async_trait]
impl ContentService for SeaOrmContentService {
    async fn list_posts(&self, query: &ListQuery) -> Result<PageDto<BlogPostDto>, ContentError> {
        let (posts, total, page, locale) = self.fetch::<blog_posts::Entity>(query).await?;
        let ctx = self
            .relations(ItemKind::BlogPost, &Self::post_keys(&posts), locale)
            .await?;

        let items = posts
            .into_iter()
            .map(|post| post_to_dto(post, &ctx, locale))
            .collect();
        Ok(PageDto::assemble(items, total, &page))
    }

    async fn get_post(
        &self,
        key: &ItemKey,
        lang: Option<&str>,
    ) -> Result<BlogPostDto, ContentError> {
        let (post, locale) = self
            .lookup::<blog_posts::Entity>(ContentKind::BlogPost, key, lang)
            .await?;
        let ctx = self
            .relations(
                ItemKind::BlogPost,
                &Self::post_keys(std::slice::from_ref(&post)),
                locale,
            )
            .await?;
        Ok(post_to_dto(post, &ctx, locale))
    }

    async fn list_projects(&self, query: &ListQuery) -> Result<PageDto<ProjectDto>, ContentError> {
        let (rows, total, page, locale) = self.fetch::<projects::Entity>(query).await?;
        let ctx = self
            .relations(ItemKind::Project, &RelationKeys::collect(&rows), locale)
            .await?;

        let items = rows
            .into_iter()
            .map(|project| project_to_dto(project, &ctx, locale))
            .collect();
        Ok(PageDto::assemble(items, total, &page))
    }

    async fn get_project(
        &self,
        key: &ItemKey,
        lang: Option<&str>,
    ) -> Result<ProjectDto, ContentError> {
        let (project, locale) = self
            .lookup::<projects::Entity>(ContentKind::Project, key, lang)
            .await?;
        let ctx = self
            .relations(
                ItemKind::Project,
                &RelationKeys::collect(std::slice::from_ref(&project)),
                locale,
            )
            .await?;
        Ok(project_to_dto(project, &ctx, locale))
    }

    async fn list_ideas(&self, query: &ListQuery) -> Result<PageDto<IdeaDto>, ContentError> {
        let (rows, total, page, locale) = self.fetch::<ideas::Entity>(query).await?;
        let ctx = self
            .relations(ItemKind::Idea, &RelationKeys::collect(&rows), locale)
            .await?;

        let items = rows
            .into_iter()
            .map(|idea| idea_to_dto(idea, &ctx, locale))
            .collect();
        Ok(PageDto::assemble(items, total, &page))
    }

    async fn get_idea(&self, key: &ItemKey, lang: Option<&str>) -> Result<IdeaDto, ContentError> {
        let (idea, locale) = self
            .lookup::<ideas::Entity>(ContentKind::Idea, key, lang)
            .await?;
        let ctx = self
            .relations(
                ItemKind::Idea,
                &RelationKeys::collect(std::slice::from_ref(&idea)),
                locale,
            )
            .await?;
        Ok(idea_to_dto(idea, &ctx, locale))
    }

    async fn list_languages(&self) -> Result<Vec<LanguageDto>, ContentError> {
        let languages = self
            .store
            .list_languages(true)
            .await
            .map_err(|e| ContentError::Database(e.to_string()))?;
        Ok(languages.into_iter().map(language_to_dto).collect())
    }
}
