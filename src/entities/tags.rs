use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::blog_post_tags::Entity")]
    BlogPostTags,
    #[sea_orm(has_many = "super::project_tags::Entity")]
    ProjectTags,
    #[sea_orm(has_many = "super::idea_tags::Entity")]
    IdeaTags,
}

impl Related<super::blog_posts::Entity> for Entity {
    fn to() -> RelationDef {
        super::blog_post_tags::Relation::BlogPost.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::blog_post_tags::Relation::Tag.def().rev())
    }
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_tags::Relation::Project.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::project_tags::Relation::Tag.def().rev())
    }
}

impl Related<super::ideas::Entity> for Entity {
    fn to() -> RelationDef {
        super::idea_tags::Relation::Idea.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::idea_tags::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
