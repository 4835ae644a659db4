use crate::catalog::{Language, RelationContext};
use crate::domain::CatalogItem;
use crate::entities::sea_orm_active_enums::ItemKind;
use crate::entities::{
    blog_post_tags, blog_posts, categories, idea_tags, owners, project_tags, project_technologies,
    series, tags, translations,
};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::collections::BTreeSet;
use tracing::warn;

/// Foreign keys gathered from one page of catalog rows.
#[derive(Debug, Clone, Default)]
pub struct RelationKeys {
    pub item_ids: Vec<String>,
    pub owner_ids: Vec<String>,
    pub category_ids: Vec<String>,
    pub series_ids: Vec<String>,
}

impl RelationKeys {
    pub fn collect<M: CatalogItem>(items: &[M]) -> Self {
        let owners: BTreeSet<&str> = items.iter().map(CatalogItem::owner_id).collect();
        let categories: BTreeSet<&str> =
            items.iter().filter_map(CatalogItem::category_id).collect();
        Self {
            item_ids: items.iter().map(|i| i.id().to_string()).collect(),
            owner_ids: owners.into_iter().map(str::to_string).collect(),
            category_ids: categories.into_iter().map(str::to_string).collect(),
            series_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_series<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        let unique: BTreeSet<&str> = ids.into_iter().collect();
        self.series_ids = unique.into_iter().map(str::to_string).collect();
        self
    }
}

/// Bulk loader for the relations of a page of items.
pub struct RelationRepository {
    conn: DatabaseConnection,
}

impl RelationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn load(
        &self,
        kind: ItemKind,
        keys: &RelationKeys,
        language: Language,
    ) -> Result<RelationContext> {
        let mut ctx = RelationContext::new();
        if keys.item_ids.is_empty() {
            return Ok(ctx);
        }

        if !keys.owner_ids.is_empty() {
            let rows = owners::Entity::find()
                .filter(owners::Column::Id.is_in(keys.owner_ids.clone()))
                .all(&self.conn)
                .await?;
            for owner in rows {
                ctx.add_author(owner);
            }
        }

        if !keys.category_ids.is_empty() {
            let rows = categories::Entity::find()
                .filter(categories::Column::Id.is_in(keys.category_ids.clone()))
                .all(&self.conn)
                .await?;
            for category in rows {
                ctx.add_category(category);
            }
        }

        if !keys.series_ids.is_empty() {
            let rows = series::Entity::find()
                .filter(series::Column::Id.is_in(keys.series_ids.clone()))
                .all(&self.conn)
                .await?;
            for row in rows {
                ctx.add_series(row);
            }

            let members = blog_posts::Entity::find()
                .filter(blog_posts::Column::SeriesId.is_in(keys.series_ids.clone()))
                .all(&self.conn)
                .await?;
            for post in members {
                ctx.add_series_member(post);
            }
        }

        self.load_tags(kind, &keys.item_ids, &mut ctx).await?;

        if kind == ItemKind::Project {
            let rows = project_technologies::Entity::find()
                .filter(project_technologies::Column::ProjectId.is_in(keys.item_ids.clone()))
                .order_by_asc(project_technologies::Column::ProjectId)
                .order_by_asc(project_technologies::Column::Position)
                .all(&self.conn)
                .await?;
            for tech in rows {
                ctx.push_technology(&tech.project_id, tech.name);
            }
        }

        let rows = translations::Entity::find()
            .filter(translations::Column::ItemKind.eq(kind))
            .filter(translations::Column::LanguageCode.eq(language.code()))
            .filter(translations::Column::ItemId.is_in(keys.item_ids.clone()))
            .all(&self.conn)
            .await?;
        for translation in rows {
            ctx.add_translation(translation);
        }

        Ok(ctx)
    }

    async fn load_tags(
        &self,
        kind: ItemKind,
        item_ids: &[String],
        ctx: &mut RelationContext,
    ) -> Result<()> {
        let links: Vec<(String, Option<tags::Model>)> = match kind {
            ItemKind::BlogPost => blog_post_tags::Entity::find()
                .filter(blog_post_tags::Column::PostId.is_in(item_ids.to_vec()))
                .order_by_asc(blog_post_tags::Column::PostId)
                .order_by_asc(blog_post_tags::Column::Position)
                .find_also_related(tags::Entity)
                .all(&self.conn)
                .await?
                .into_iter()
                .map(|(link, tag)| (link.post_id, tag))
                .collect(),
            ItemKind::Project => project_tags::Entity::find()
                .filter(project_tags::Column::ProjectId.is_in(item_ids.to_vec()))
                .order_by_asc(project_tags::Column::ProjectId)
                .order_by_asc(project_tags::Column::Position)
                .find_also_related(tags::Entity)
                .all(&self.conn)
                .await?
                .into_iter()
                .map(|(link, tag)| (link.project_id, tag))
                .collect(),
            ItemKind::Idea => idea_tags::Entity::find()
                .filter(idea_tags::Column::IdeaId.is_in(item_ids.to_vec()))
                .order_by_asc(idea_tags::Column::IdeaId)
                .order_by_asc(idea_tags::Column::Position)
                .find_also_related(tags::Entity)
                .all(&self.conn)
                .await?
                .into_iter()
                .map(|(link, tag)| (link.idea_id, tag))
                .collect(),
        };

        for (item_id, tag) in links {
            match tag {
                Some(tag) => ctx.push_tag(&item_id, tag.name),
                None => warn!(item_id, "Tag link references a missing tag"),
            }
        }
        Ok(())
    }
}
