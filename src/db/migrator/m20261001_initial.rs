use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Referenced tables first; sqlite enforces foreign keys on insert.
        create(manager, &schema, Owners).await?;
        create(manager, &schema, Languages).await?;
        create(manager, &schema, Categories).await?;
        create(manager, &schema, Tags).await?;
        create(manager, &schema, Series).await?;
        create(manager, &schema, BlogPosts).await?;
        create(manager, &schema, Projects).await?;
        create(manager, &schema, Ideas).await?;
        create(manager, &schema, BlogPostTags).await?;
        create(manager, &schema, ProjectTags).await?;
        create(manager, &schema, IdeaTags).await?;
        create(manager, &schema, ProjectTechnologies).await?;
        create(manager, &schema, Translations).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Translations).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectTechnologies).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IdeaTags).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectTags).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPostTags).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ideas).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPosts).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Series).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Languages).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Owners).to_owned())
            .await?;

        Ok(())
    }
}
