use crate::entities::{categories, languages, owners, tags};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Languages, owners, categories and tags.
pub struct TaxonomyRepository {
    conn: DatabaseConnection,
}

impl TaxonomyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn languages(&self, active_only: bool) -> Result<Vec<languages::Model>> {
        let mut query = languages::Entity::find().order_by_asc(languages::Column::Code);
        if active_only {
            query = query.filter(languages::Column::IsActive.eq(true));
        }
        Ok(query.all(&self.conn).await?)
    }

    pub async fn owners(&self) -> Result<Vec<owners::Model>> {
        Ok(owners::Entity::find()
            .order_by_asc(owners::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    pub async fn categories(&self) -> Result<Vec<categories::Model>> {
        Ok(categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn tags(&self) -> Result<Vec<tags::Model>> {
        Ok(tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.conn)
            .await?)
    }
}
