//! `SeaORM` implementation of the `SeriesService` trait.

use crate::api::types::SeriesDto;
use crate::catalog::series::outline;
use crate::catalog::{CompletionPolicy, Language, ValidationError};
use crate::constants::limits::MAX_COMPLETED_IDS;
use crate::db::{RelationKeys, Store};
use crate::domain::ContentId;
use crate::entities::sea_orm_active_enums::ItemKind;
use crate::services::content_service_impl::language_resolver;
use crate::services::series_service::{SeriesError, SeriesQuery, SeriesService, series_to_dto};
use async_trait::async_trait;
use tracing::debug;

pub struct SeaOrmSeriesService {
    store: Store,
    default_language: Language,
}

impl SeaOrmSeriesService {
    #[must_use]
    pub const fn new(store: Store, default_language: Language) -> Self {
        Self {
            store,
            default_language,
        }
    }

    fn completion_policy(raw: Option<&str>) -> Result<CompletionPolicy, SeriesError> {
        let policy = CompletionPolicy::from_viewer_list(raw);
        if let CompletionPolicy::Viewer(ids) = &policy {
            if ids.len() > MAX_COMPLETED_IDS {
                return Err(ValidationError::new(
                    "completed",
                    format!("at most {MAX_COMPLETED_IDS} ids are accepted"),
                )
                .into());
            }
        }
        Ok(policy)
    }
}

#[async_trait]
impl SeriesService for SeaOrmSeriesService {
    async fn get_series(&self, id: &str, query: &SeriesQuery) -> Result<SeriesDto, SeriesError> {
        let id = ContentId::parse(id)?.as_key();
        let policy = Self::completion_policy(query.completed.as_deref())?;
        let current = query
            .current
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let language = language_resolver(&self.store, self.default_language)
            .await
            .map_err(|e| SeriesError::Database(e.to_string()))?
            .resolve(query.lang.as_deref());

        let series = self
            .store
            .get_series(&id)
            .await
            .map_err(|e| SeriesError::Database(e.to_string()))?
            .ok_or_else(|| SeriesError::NotFound(id.clone()))?;

        let members = self
            .store
            .series_members(&id)
            .await
            .map_err(|e| SeriesError::Database(e.to_string()))?;

        let ctx = self
            .store
            .load_relations(ItemKind::BlogPost, &RelationKeys::collect(&members), language)
            .await
            .map_err(|e| SeriesError::Database(e.to_string()))?;

        let outline = outline(&members, current, &policy);
        debug!(
            series_id = %id,
            episodes = outline.episodes.len(),
            completed = outline.completed_count,
            "Series outlined"
        );

        Ok(series_to_dto(series, &outline, &ctx, language))
    }
}
