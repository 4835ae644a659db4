use super::sea_orm_active_enums::ItemKind;
use sea_orm::entity::prelude::*;

/// Localized text for one catalog item in one language.
///
/// `item_id` is polymorphic over the catalog tables (see `item_kind`), so
/// there is no foreign key on it; repositories delete translations together
/// with their parent item.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "translations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub language_code: String,
    pub item_kind: ItemKind,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::languages::Entity",
        from = "Column::LanguageCode",
        to = "super::languages::Column::Code",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Language,
}

impl Related<super::languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Language.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
