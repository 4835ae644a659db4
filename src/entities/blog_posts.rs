use super::sea_orm_active_enums::ContentStatus;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub author_id: String,
    pub category_id: Option<String>,
    pub series_id: Option<String>,
    /// Position inside the series. Zero means unordered.
    pub series_order: i32,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub status: ContentStatus,
    pub is_featured: bool,
    pub reading_time: i32,
    pub view_count: i64,
    pub like_count: i64,
    pub published_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owners::Entity",
        from = "Column::AuthorId",
        to = "super::owners::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::series::Entity",
        from = "Column::SeriesId",
        to = "super::series::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Series,
    #[sea_orm(has_many = "super::blog_post_tags::Entity")]
    BlogPostTags,
}

impl Related<super::owners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Series.def()
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::blog_post_tags::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::blog_post_tags::Relation::BlogPost.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
