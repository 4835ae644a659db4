use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_published_at")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::PublishedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_series_id")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::SeriesId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_sort_order")
                    .table(Projects::Table)
                    .col(Projects::SortOrder)
                    .col(Projects::StartDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ideas_published_at")
                    .table(Ideas::Table)
                    .col(Ideas::PublishedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ideas_published_at")
                    .table(Ideas::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_projects_sort_order")
                    .table(Projects::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_blog_posts_series_id")
                    .table(BlogPosts::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_blog_posts_published_at")
                    .table(BlogPosts::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    PublishedAt,
    SeriesId,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    SortOrder,
    StartDate,
}

#[derive(DeriveIden)]
enum Ideas {
    Table,
    PublishedAt,
}
