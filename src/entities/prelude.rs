pub use super::blog_post_tags::Entity as BlogPostTags;
pub use super::blog_posts::Entity as BlogPosts;
pub use super::categories::Entity as Categories;
pub use super::idea_tags::Entity as IdeaTags;
pub use super::ideas::Entity as Ideas;
pub use super::languages::Entity as Languages;
pub use super::owners::Entity as Owners;
pub use super::project_tags::Entity as ProjectTags;
pub use super::project_technologies::Entity as ProjectTechnologies;
pub use super::projects::Entity as Projects;
pub use super::series::Entity as Series;
pub use super::tags::Entity as Tags;
pub use super::translations::Entity as Translations;
