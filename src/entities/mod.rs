pub mod prelude;

pub mod blog_post_tags;
pub mod blog_posts;
pub mod categories;
pub mod idea_tags;
pub mod ideas;
pub mod languages;
pub mod owners;
pub mod project_tags;
pub mod project_technologies;
pub mod projects;
pub mod sea_orm_active_enums;
pub mod series;
pub mod tags;
pub mod translations;
