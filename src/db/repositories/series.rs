use crate::entities::{blog_posts, series};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};
use tracing::debug;

pub struct SeriesRepository {
    conn: DatabaseConnection,
}

impl SeriesRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: &str) -> Result<Option<series::Model>> {
        Ok(series::Entity::find_by_id(id).one(&self.conn).await?)
    }

    /// Every post in the series, unordered beyond id.
    pub async fn members(&self, series_id: &str) -> Result<Vec<blog_posts::Model>> {
        Ok(blog_posts::Entity::find()
            .filter(blog_posts::Column::SeriesId.eq(series_id))
            .order_by_asc(blog_posts::Column::Id)
            .all(&self.conn)
            .await?)
    }

    /// Re-derives `post_count` from current membership.
    pub async fn refresh_post_count<C>(conn: &C, series_id: &str) -> Result<u64>
    where
        C: sea_orm::ConnectionTrait,
    {
        let count = blog_posts::Entity::find()
            .filter(blog_posts::Column::SeriesId.eq(series_id))
            .count(conn)
            .await?;

        series::Entity::update_many()
            .col_expr(
                series::Column::PostCount,
                Expr::value(i32::try_from(count).unwrap_or(i32::MAX)),
            )
            .filter(series::Column::Id.eq(series_id))
            .exec(conn)
            .await?;

        debug!(series_id, count, "Refreshed series post count");
        Ok(count)
    }

    pub async fn refresh(&self, series_id: &str) -> Result<u64> {
        Self::refresh_post_count(&self.conn, series_id).await
    }
}
