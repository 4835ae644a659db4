use super::sea_orm_active_enums::ContentStatus;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub owner_id: String,
    pub category_id: Option<String>,
    /// `software` for regular projects, `research` for research projects.
    pub content_type: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub status: ContentStatus,
    pub is_featured: bool,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub sort_order: i32,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owners::Entity",
        from = "Column::OwnerId",
        to = "super::owners::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(has_many = "super::project_tags::Entity")]
    ProjectTags,
    #[sea_orm(has_many = "super::project_technologies::Entity")]
    Technologies,
}

impl Related<super::owners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::project_technologies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Technologies.def()
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_tags::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::project_tags::Relation::Project.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
