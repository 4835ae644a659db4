use super::sea_orm_active_enums::ContentStatus;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ideas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub owner_id: String,
    pub category_id: Option<String>,
    pub title: String,
    pub abstract_text: String,
    pub motivation: String,
    pub methodology: String,
    pub status: ContentStatus,
    pub collaboration_required: bool,
    pub funding_status: Option<String>,
    pub difficulty: Option<String>,
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
    #[sea_orm(has_many = "super::idea_tags::Entity")]
    IdeaTags,
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

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::idea_tags::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::idea_tags::Relation::Idea.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
