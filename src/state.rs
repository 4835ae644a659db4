use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    ContentService, CounterService, ResumeService, ResumeSet, SeaOrmContentService,
    SeaOrmCounterService, SeaOrmSeriesService, SeriesService, StaticResumeService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub content_service: Arc<dyn ContentService + Send + Sync + 'static>,

    pub series_service: Arc<dyn SeriesService + Send + Sync + 'static>,

    pub counter_service: Arc<dyn CounterService + Send + Sync + 'static>,

    pub resume_service: Arc<dyn ResumeService + Send + Sync + 'static>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let resume = ResumeSet::load(Path::new(&config.content.resume_path)).await?;

        Ok(Self::with_store(config, store, resume))
    }

    /// Wires the services over an already connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store, resume: ResumeSet) -> Self {
        let settings = config.content.catalog_settings();
        let default_language = settings.default_language;

        let content_service = Arc::new(SeaOrmContentService::new(store.clone(), settings))
            as Arc<dyn ContentService + Send + Sync + 'static>;

        let series_service = Arc::new(SeaOrmSeriesService::new(store.clone(), default_language))
            as Arc<dyn SeriesService + Send + Sync + 'static>;

        let counter_service = Arc::new(SeaOrmCounterService::new(store.clone()))
            as Arc<dyn CounterService + Send + Sync + 'static>;

        let resume_service = Arc::new(StaticResumeService::new(resume))
            as Arc<dyn ResumeService + Send + Sync + 'static>;

        Self {
            config: Arc::new(config),
            store,
            content_service,
            series_service,
            counter_service,
            resume_service,
        }
    }
}
