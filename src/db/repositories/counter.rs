use crate::domain::CounterField;
use crate::entities::sea_orm_active_enums::ItemKind;
use crate::entities::{blog_posts, ideas, projects};
use anyhow::Result;
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{ConnectionTrait, DatabaseConnection, IdenStatic};

/// Engagement counters, mutated only through single atomic statements.
pub struct CounterRepository {
    conn: DatabaseConnection,
}

fn table_name(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::BlogPost => blog_posts::Entity.as_str(),
        ItemKind::Project => projects::Entity.as_str(),
        ItemKind::Idea => ideas::Entity.as_str(),
    }
}

fn column_name(field: CounterField) -> &'static str {
    // Every catalog table names its counters identically.
    match field {
        CounterField::Views => blog_posts::Column::ViewCount.as_str(),
        CounterField::Likes => blog_posts::Column::LikeCount.as_str(),
    }
}

impl CounterRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Adds `delta` to a counter and returns the new value, or `None` when
    /// the item does not exist.
    ///
    /// Negative deltas never take a counter below zero: when the guard
    /// rejects the update the current value is returned unchanged.
    pub async fn atomic_add(
        &self,
        kind: ItemKind,
        id: &str,
        field: CounterField,
        delta: i64,
    ) -> Result<Option<i64>> {
        let table = Alias::new(table_name(kind));
        let column = Alias::new(column_name(field));

        let mut update = Query::update();
        update
            .table(table.clone())
            .value(column.clone(), Expr::col(column.clone()).add(delta))
            .and_where(Expr::col(Alias::new("id")).eq(id))
            .returning(Query::returning().column(column.clone()));
        if delta < 0 {
            update.and_where(Expr::col(column.clone()).gte(-delta));
        }

        let backend = self.conn.get_database_backend();
        if let Some(row) = self.conn.query_one(backend.build(&update)).await? {
            return Ok(Some(row.try_get::<i64>("", column_name(field))?));
        }
        if delta >= 0 {
            return Ok(None);
        }

        // The guard rejected the decrement, or the row is missing.
        let select = Query::select()
            .column(column)
            .from(table)
            .and_where(Expr::col(Alias::new("id")).eq(id))
            .to_owned();
        let current = self.conn.query_one(backend.build(&select)).await?;
        Ok(match current {
            Some(row) => Some(row.try_get::<i64>("", column_name(field))?),
            None => None,
        })
    }
}
