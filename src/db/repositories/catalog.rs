use crate::catalog::filter::build_condition;
use crate::catalog::{ContentFilter, FilterTarget, PageRequest};
use crate::domain::ItemKey;
use crate::entities::sea_orm_active_enums::ItemKind;
use crate::entities::{
    blog_post_tags, blog_posts, idea_tags, ideas, project_tags, project_technologies, projects,
    translations,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};
use tracing::{debug, info};

/// Listing, lookup and removal shared by every catalog table.
pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// One page of filtered rows plus the total match count.
    pub async fn find<E>(
        &self,
        filter: &ContentFilter,
        page: &PageRequest,
    ) -> anyhow::Result<(Vec<E::Model>, u64)>
    where
        E: FilterTarget,
        E::Model: Sync + 'static,
    {
        let query = E::ordered(E::find().filter(build_condition::<E>(filter)));
        let paginator = query.paginate(&self.conn, page.size());

        let total = paginator.num_items().await?;
        let items = if total == 0 {
            Vec::new()
        } else {
            paginator.fetch_page(page.page() - 1).await?
        };

        debug!(
            table = E::default().table_name(),
            total,
            returned = items.len(),
            page = page.page(),
            "Catalog page fetched"
        );

        Ok((items, total))
    }

    pub async fn get<E>(&self, key: &ItemKey) -> anyhow::Result<Option<E::Model>>
    where
        E: FilterTarget,
    {
        let condition = match key {
            ItemKey::Id(id) => E::id_column().eq(id.as_key()),
            ItemKey::Slug(slug) => E::slug_column().eq(slug.as_str()),
        };
        Ok(E::find().filter(condition).one(&self.conn).await?)
    }

    pub async fn exists(&self, kind: ItemKind, id: &str) -> anyhow::Result<bool> {
        let count = match kind {
            ItemKind::BlogPost => blog_posts::Entity::find_by_id(id).count(&self.conn).await?,
            ItemKind::Project => projects::Entity::find_by_id(id).count(&self.conn).await?,
            ItemKind::Idea => ideas::Entity::find_by_id(id).count(&self.conn).await?,
        };
        Ok(count > 0)
    }

    /// Deletes an item together with its translations and junction rows.
    ///
    /// Returns the series the item belonged to, if any, so the caller can
    /// re-derive its post count.
    pub async fn remove(&self, kind: ItemKind, id: &str) -> anyhow::Result<Option<Removed>> {
        let txn = self.conn.begin().await?;

        translations::Entity::delete_many()
            .filter(translations::Column::ItemId.eq(id))
            .filter(translations::Column::ItemKind.eq(kind))
            .exec(&txn)
            .await?;

        let (rows, series_id) = match kind {
            ItemKind::BlogPost => {
                let series_id = blog_posts::Entity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .and_then(|post| post.series_id);
                blog_post_tags::Entity::delete_many()
                    .filter(blog_post_tags::Column::PostId.eq(id))
                    .exec(&txn)
                    .await?;
                let result = blog_posts::Entity::delete_by_id(id).exec(&txn).await?;
                (result.rows_affected, series_id)
            }
            ItemKind::Project => {
                project_tags::Entity::delete_many()
                    .filter(project_tags::Column::ProjectId.eq(id))
                    .exec(&txn)
                    .await?;
                project_technologies::Entity::delete_many()
                    .filter(project_technologies::Column::ProjectId.eq(id))
                    .exec(&txn)
                    .await?;
                let result = projects::Entity::delete_by_id(id).exec(&txn).await?;
                (result.rows_affected, None)
            }
            ItemKind::Idea => {
                idea_tags::Entity::delete_many()
                    .filter(idea_tags::Column::IdeaId.eq(id))
                    .exec(&txn)
                    .await?;
                let result = ideas::Entity::delete_by_id(id).exec(&txn).await?;
                (result.rows_affected, None)
            }
        };

        txn.commit().await?;

        if rows == 0 {
            return Ok(None);
        }
        info!(kind = ?kind, id, "Removed catalog item");
        Ok(Some(Removed { series_id }))
    }
}

/// Outcome of a successful removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub series_id: Option<String>,
}
