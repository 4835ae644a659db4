use crate::catalog::{ContentFilter, FilterTarget, Language, PageRequest, RelationContext};
use crate::domain::{CounterField, ItemKey};
use crate::entities::sea_orm_active_enums::ItemKind;
use crate::entities::{blog_posts, categories, languages, owners, series, tags};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;
pub mod seed;

pub use repositories::catalog::Removed;
pub use repositories::relation::RelationKeys;
pub use seed::{Fixture, SeedReport};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url
            .trim_start_matches("sqlite:")
            .trim_start_matches("//")
            .split('?')
            .next()
            .unwrap_or_default();
        if !path_str.starts_with(":memory:") {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    fn relation_repo(&self) -> repositories::relation::RelationRepository {
        repositories::relation::RelationRepository::new(self.conn.clone())
    }

    fn counter_repo(&self) -> repositories::counter::CounterRepository {
        repositories::counter::CounterRepository::new(self.conn.clone())
    }

    fn series_repo(&self) -> repositories::series::SeriesRepository {
        repositories::series::SeriesRepository::new(self.conn.clone())
    }

    fn taxonomy_repo(&self) -> repositories::taxonomy::TaxonomyRepository {
        repositories::taxonomy::TaxonomyRepository::new(self.conn.clone())
    }

    // Catalog

    pub async fn find_items<E>(
        &self,
        filter: &ContentFilter,
        page: &PageRequest,
    ) -> Result<(Vec<E::Model>, u64)>
    where
        E: FilterTarget,
        E::Model: Sync + 'static,
    {
        self.catalog_repo().find::<E>(filter, page).await
    }

    pub async fn get_item<E: FilterTarget>(&self, key: &ItemKey) -> Result<Option<E::Model>> {
        self.catalog_repo().get::<E>(key).await
    }

    pub async fn item_exists(&self, kind: ItemKind, id: &str) -> Result<bool> {
        self.catalog_repo().exists(kind, id).await
    }

    /// Removes an item and keeps its series' post count in step.
    pub async fn remove_item(&self, kind: ItemKind, id: &str) -> Result<bool> {
        let Some(removed) = self.catalog_repo().remove(kind, id).await? else {
            return Ok(false);
        };
        if let Some(series_id) = removed.series_id {
            self.series_repo().refresh(&series_id).await?;
        }
        Ok(true)
    }

    pub async fn load_relations(
        &self,
        kind: ItemKind,
        keys: &RelationKeys,
        language: Language,
    ) -> Result<RelationContext> {
        self.relation_repo().load(kind, keys, language).await
    }

    // Counters

    pub async fn atomic_add(
        &self,
        kind: ItemKind,
        id: &str,
        field: CounterField,
        delta: i64,
    ) -> Result<Option<i64>> {
        self.counter_repo().atomic_add(kind, id, field, delta).await
    }

    // Series

    pub async fn get_series(&self, id: &str) -> Result<Option<series::Model>> {
        self.series_repo().get(id).await
    }

    pub async fn series_members(&self, series_id: &str) -> Result<Vec<blog_posts::Model>> {
        self.series_repo().members(series_id).await
    }

    // Taxonomy

    pub async fn list_languages(&self, active_only: bool) -> Result<Vec<languages::Model>> {
        self.taxonomy_repo().languages(active_only).await
    }

    pub async fn list_owners(&self) -> Result<Vec<owners::Model>> {
        self.taxonomy_repo().owners().await
    }

    pub async fn list_categories(&self) -> Result<Vec<categories::Model>> {
        self.taxonomy_repo().categories().await
    }

    pub async fn list_tags(&self) -> Result<Vec<tags::Model>> {
        self.taxonomy_repo().tags().await
    }

    // Seeding

    pub async fn seed(&self, fixture: &Fixture) -> Result<SeedReport> {
        seed::seed(&self.conn, fixture).await
    }
}
