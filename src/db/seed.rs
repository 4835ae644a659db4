//! Fixture loading for the `seed` command.
//!
//! A fixture is a single JSON document describing the whole catalog. Seeding
//! replaces existing content inside one transaction, so a failed seed leaves
//! the previous catalog untouched.

use super::repositories::series::SeriesRepository;
use crate::domain::ContentId;
use crate::entities::sea_orm_active_enums::{ContentStatus, ItemKind};
use crate::entities::{
    blog_post_tags, blog_posts, categories, idea_tags, ideas, languages, owners, project_tags,
    project_technologies, projects, series, tags, translations,
};
use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, Set, TransactionTrait,
};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub owner: OwnerFixture,
    #[serde(default)]
    pub languages: Vec<LanguageFixture>,
    #[serde(default)]
    pub categories: Vec<CategoryFixture>,
    #[serde(default)]
    pub tags: Vec<TagFixture>,
    #[serde(default)]
    pub series: Vec<SeriesFixture>,
    #[serde(default)]
    pub posts: Vec<PostFixture>,
    #[serde(default)]
    pub projects: Vec<ProjectFixture>,
    #[serde(default)]
    pub ideas: Vec<IdeaFixture>,
    #[serde(default)]
    pub translations: Vec<TranslationFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerFixture {
    #[serde(default = "new_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageFixture {
    pub code: String,
    pub name: String,
    pub native_name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryFixture {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagFixture {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesFixture {
    #[serde(default = "new_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostFixture {
    #[serde(default = "new_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "published")]
    pub status: ContentStatus,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub reading_time: i32,
    /// Category slug.
    pub category: Option<String>,
    /// Tag slugs, in display order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Series slug.
    pub series: Option<String>,
    #[serde(default)]
    pub series_order: i32,
    pub published_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub like_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFixture {
    #[serde(default = "new_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default = "software")]
    pub content_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "published")]
    pub status: ContentStatus,
    #[serde(default)]
    pub is_featured: bool,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub sort_order: i32,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub like_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdeaFixture {
    #[serde(default = "new_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub motivation: String,
    #[serde(default)]
    pub methodology: String,
    #[serde(default = "published")]
    pub status: ContentStatus,
    #[serde(default)]
    pub collaboration_required: bool,
    pub funding_status: Option<String>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub like_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationFixture {
    pub item_id: String,
    pub item_kind: ItemKind,
    pub language_code: String,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

const fn default_true() -> bool {
    true
}

const fn published() -> ContentStatus {
    ContentStatus::Published
}

fn software() -> String {
    "software".to_string()
}

impl Fixture {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))
    }

    /// Rewrites every id into its canonical form and every slug (and slug
    /// reference) into lowercase, since lookups and filters match on the
    /// lowercased slug.
    ///
    /// Rejects ids that are not UUIDs and two episodes claiming the same
    /// non-zero order within one series.
    pub fn normalized(mut self) -> Result<Self> {
        fn canonical(id: &mut String, owner: &str) -> Result<()> {
            *id = ContentId::parse(id.as_str())
                .with_context(|| format!("{owner} has a malformed id"))?
                .as_key();
            Ok(())
        }

        canonical(&mut self.owner.id, "Owner")?;
        for category in &mut self.categories {
            canonical(&mut category.id, &format!("Category '{}'", category.slug))?;
        }
        for tag in &mut self.tags {
            canonical(&mut tag.id, &format!("Tag '{}'", tag.slug))?;
        }
        for series in &mut self.series {
            canonical(&mut series.id, &format!("Series '{}'", series.slug))?;
        }
        for post in &mut self.posts {
            canonical(&mut post.id, &format!("Post '{}'", post.slug))?;
        }
        for project in &mut self.projects {
            canonical(&mut project.id, &format!("Project '{}'", project.slug))?;
        }
        for idea in &mut self.ideas {
            canonical(&mut idea.id, &format!("Idea '{}'", idea.slug))?;
        }
        for translation in &mut self.translations {
            canonical(&mut translation.item_id, "Translation")?;
        }

        self.lowercase_slugs();
        self.check_series_orders()?;
        Ok(self)
    }

    fn lowercase_slugs(&mut self) {
        fn lower(slug: &mut String) {
            *slug = slug.trim().to_ascii_lowercase();
        }
        fn lower_refs(category: Option<&mut String>, tags: &mut [String]) {
            category.into_iter().for_each(lower);
            tags.iter_mut().for_each(lower);
        }

        self.categories.iter_mut().for_each(|c| lower(&mut c.slug));
        self.tags.iter_mut().for_each(|t| lower(&mut t.slug));
        self.series.iter_mut().for_each(|s| lower(&mut s.slug));
        for post in &mut self.posts {
            lower(&mut post.slug);
            lower_refs(post.category.as_mut(), &mut post.tags);
            post.series.iter_mut().for_each(lower);
        }
        for project in &mut self.projects {
            lower(&mut project.slug);
            lower_refs(project.category.as_mut(), &mut project.tags);
        }
        for idea in &mut self.ideas {
            lower(&mut idea.slug);
            lower_refs(idea.category.as_mut(), &mut idea.tags);
        }
    }

    /// Zero means unordered and may repeat; any other order is a position.
    fn check_series_orders(&self) -> Result<()> {
        let mut taken: HashMap<(&str, i32), &str> = HashMap::new();
        for post in &self.posts {
            let Some(series) = post.series.as_deref() else {
                continue;
            };
            if post.series_order <= 0 {
                continue;
            }
            if let Some(first) = taken.insert((series, post.series_order), post.slug.as_str()) {
                bail!(
                    "Posts '{first}' and '{}' share order {} in series '{series}'",
                    post.slug,
                    post.series_order
                );
            }
        }
        Ok(())
    }
}

/// Row counts written by a seed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub languages: u64,
    pub categories: u64,
    pub tags: u64,
    pub series: u64,
    pub posts: u64,
    pub projects: u64,
    pub ideas: u64,
    pub translations: u64,
}

async fn insert_all<A>(txn: &DatabaseTransaction, models: Vec<A>) -> Result<u64>
where
    A: ActiveModelTrait + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    if models.is_empty() {
        return Ok(0);
    }
    let count = u64::try_from(models.len()).unwrap_or(u64::MAX);
    <A::Entity as EntityTrait>::insert_many(models)
        .exec_without_returning(txn)
        .await?;
    Ok(count)
}

async fn clear<C: ConnectionTrait>(conn: &C) -> Result<()> {
    translations::Entity::delete_many().exec(conn).await?;
    project_technologies::Entity::delete_many().exec(conn).await?;
    idea_tags::Entity::delete_many().exec(conn).await?;
    project_tags::Entity::delete_many().exec(conn).await?;
    blog_post_tags::Entity::delete_many().exec(conn).await?;
    ideas::Entity::delete_many().exec(conn).await?;
    projects::Entity::delete_many().exec(conn).await?;
    blog_posts::Entity::delete_many().exec(conn).await?;
    series::Entity::delete_many().exec(conn).await?;
    tags::Entity::delete_many().exec(conn).await?;
    categories::Entity::delete_many().exec(conn).await?;
    languages::Entity::delete_many().exec(conn).await?;
    owners::Entity::delete_many().exec(conn).await?;
    Ok(())
}

fn resolve(
    lookup: &HashMap<String, String>,
    what: &str,
    slug: Option<&String>,
    owner: &str,
) -> Result<Option<String>> {
    let Some(slug) = slug else {
        return Ok(None);
    };
    match lookup.get(slug) {
        Some(id) => Ok(Some(id.clone())),
        None => bail!("{owner} references unknown {what} '{slug}'"),
    }
}

fn resolve_tags(
    lookup: &HashMap<String, String>,
    slugs: &[String],
    owner: &str,
) -> Result<Vec<(String, i32)>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(slugs.len());
    for slug in slugs {
        let Some(id) = lookup.get(slug) else {
            bail!("{owner} references unknown tag '{slug}'");
        };
        if seen.insert(id.clone()) {
            let position = i32::try_from(out.len()).unwrap_or(i32::MAX);
            out.push((id.clone(), position));
        }
    }
    Ok(out)
}

/// Replaces the catalog with the fixture contents in a single transaction.
pub async fn seed(conn: &DatabaseConnection, fixture: &Fixture) -> Result<SeedReport> {
    let fixture = &fixture.clone().normalized()?;
    let now = Utc::now().naive_utc();
    let owner_id = fixture.owner.id.clone();

    let category_ids: HashMap<String, String> = fixture
        .categories
        .iter()
        .map(|c| (c.slug.clone(), c.id.clone()))
        .collect();
    let tag_ids: HashMap<String, String> = fixture
        .tags
        .iter()
        .map(|t| (t.slug.clone(), t.id.clone()))
        .collect();
    let series_ids: HashMap<String, String> = fixture
        .series
        .iter()
        .map(|s| (s.slug.clone(), s.id.clone()))
        .collect();

    let txn = conn.begin().await?;
    clear(&txn).await?;

    let mut report = SeedReport::default();

    owners::Entity::insert(owners::ActiveModel {
        id: Set(owner_id.clone()),
        first_name: Set(fixture.owner.first_name.clone()),
        last_name: Set(fixture.owner.last_name.clone()),
        email: Set(fixture.owner.email.clone()),
        headline: Set(fixture.owner.headline.clone()),
        bio: Set(fixture.owner.bio.clone()),
        avatar: Set(fixture.owner.avatar.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .exec_without_returning(&txn)
    .await?;

    report.languages = insert_all(
        &txn,
        fixture
            .languages
            .iter()
            .map(|l| languages::ActiveModel {
                code: Set(l.code.to_ascii_lowercase()),
                name: Set(l.name.clone()),
                native_name: Set(l.native_name.clone()),
                is_active: Set(l.is_active),
            })
            .collect(),
    )
    .await?;

    report.categories = insert_all(
        &txn,
        fixture
            .categories
            .iter()
            .map(|c| categories::ActiveModel {
                id: Set(c.id.clone()),
                name: Set(c.name.clone()),
                slug: Set(c.slug.clone()),
                description: Set(c.description.clone()),
            })
            .collect(),
    )
    .await?;

    report.tags = insert_all(
        &txn,
        fixture
            .tags
            .iter()
            .map(|t| tags::ActiveModel {
                id: Set(t.id.clone()),
                name: Set(t.name.clone()),
                slug: Set(t.slug.clone()),
            })
            .collect(),
    )
    .await?;

    report.series = insert_all(
        &txn,
        fixture
            .series
            .iter()
            .map(|s| series::ActiveModel {
                id: Set(s.id.clone()),
                owner_id: Set(owner_id.clone()),
                title: Set(s.title.clone()),
                slug: Set(s.slug.clone()),
                description: Set(s.description.clone()),
                post_count: Set(0),
                is_completed: Set(s.is_completed),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect(),
    )
    .await?;

    let mut post_rows = Vec::with_capacity(fixture.posts.len());
    let mut post_tags = Vec::new();
    for post in &fixture.posts {
        let label = format!("Post '{}'", post.slug);
        let category_id = resolve(&category_ids, "category", post.category.as_ref(), &label)?;
        let series_id = resolve(&series_ids, "series", post.series.as_ref(), &label)?;
        for (tag_id, position) in resolve_tags(&tag_ids, &post.tags, &label)? {
            post_tags.push(blog_post_tags::ActiveModel {
                post_id: Set(post.id.clone()),
                tag_id: Set(tag_id),
                position: Set(position),
            });
        }
        post_rows.push(blog_posts::ActiveModel {
            id: Set(post.id.clone()),
            slug: Set(post.slug.clone()),
            author_id: Set(owner_id.clone()),
            category_id: Set(category_id),
            series_id: Set(series_id),
            series_order: Set(post.series_order.max(0)),
            title: Set(post.title.clone()),
            excerpt: Set(post.excerpt.clone()),
            content: Set(post.content.clone()),
            status: Set(post.status),
            is_featured: Set(post.is_featured),
            reading_time: Set(post.reading_time.max(0)),
            view_count: Set(post.view_count.max(0)),
            like_count: Set(post.like_count.max(0)),
            published_at: Set(post.published_at),
            created_at: Set(post.published_at.unwrap_or(now)),
            updated_at: Set(now),
        });
    }
    report.posts = insert_all(&txn, post_rows).await?;
    insert_all(&txn, post_tags).await?;

    let mut project_rows = Vec::with_capacity(fixture.projects.len());
    let mut project_tags_rows = Vec::new();
    let mut technologies = Vec::new();
    for project in &fixture.projects {
        let label = format!("Project '{}'", project.slug);
        let category_id = resolve(&category_ids, "category", project.category.as_ref(), &label)?;
        for (tag_id, position) in resolve_tags(&tag_ids, &project.tags, &label)? {
            project_tags_rows.push(project_tags::ActiveModel {
                project_id: Set(project.id.clone()),
                tag_id: Set(tag_id),
                position: Set(position),
            });
        }
        let mut seen = HashSet::new();
        for name in &project.technologies {
            if seen.insert(name.clone()) {
                technologies.push(project_technologies::ActiveModel {
                    project_id: Set(project.id.clone()),
                    name: Set(name.clone()),
                    position: Set(i32::try_from(seen.len() - 1).unwrap_or(i32::MAX)),
                });
            }
        }
        project_rows.push(projects::ActiveModel {
            id: Set(project.id.clone()),
            slug: Set(project.slug.clone()),
            owner_id: Set(owner_id.clone()),
            category_id: Set(category_id),
            content_type: Set(project.content_type.to_ascii_lowercase()),
            title: Set(project.title.clone()),
            description: Set(project.description.clone()),
            content: Set(project.content.clone()),
            status: Set(project.status),
            is_featured: Set(project.is_featured),
            github_url: Set(project.github_url.clone()),
            demo_url: Set(project.demo_url.clone()),
            start_date: Set(project.start_date),
            end_date: Set(project.end_date),
            sort_order: Set(project.sort_order),
            view_count: Set(project.view_count.max(0)),
            like_count: Set(project.like_count.max(0)),
            created_at: Set(now),
            updated_at: Set(now),
        });
    }
    report.projects = insert_all(&txn, project_rows).await?;
    insert_all(&txn, project_tags_rows).await?;
    insert_all(&txn, technologies).await?;

    let mut idea_rows = Vec::with_capacity(fixture.ideas.len());
    let mut idea_tags_rows = Vec::new();
    for idea in &fixture.ideas {
        let label = format!("Idea '{}'", idea.slug);
        let category_id = resolve(&category_ids, "category", idea.category.as_ref(), &label)?;
        for (tag_id, position) in resolve_tags(&tag_ids, &idea.tags, &label)? {
            idea_tags_rows.push(idea_tags::ActiveModel {
                idea_id: Set(idea.id.clone()),
                tag_id: Set(tag_id),
                position: Set(position),
            });
        }
        idea_rows.push(ideas::ActiveModel {
            id: Set(idea.id.clone()),
            slug: Set(idea.slug.clone()),
            owner_id: Set(owner_id.clone()),
            category_id: Set(category_id),
            title: Set(idea.title.clone()),
            abstract_text: Set(idea.abstract_text.clone()),
            motivation: Set(idea.motivation.clone()),
            methodology: Set(idea.methodology.clone()),
            status: Set(idea.status),
            collaboration_required: Set(idea.collaboration_required),
            funding_status: Set(idea.funding_status.clone()),
            difficulty: Set(idea.difficulty.clone()),
            view_count: Set(idea.view_count.max(0)),
            like_count: Set(idea.like_count.max(0)),
            published_at: Set(idea.published_at),
            created_at: Set(idea.published_at.unwrap_or(now)),
            updated_at: Set(now),
        });
    }
    report.ideas = insert_all(&txn, idea_rows).await?;
    insert_all(&txn, idea_tags_rows).await?;

    let known: HashSet<(&str, ItemKind)> = fixture
        .posts
        .iter()
        .map(|p| (p.id.as_str(), ItemKind::BlogPost))
        .chain(
            fixture
                .projects
                .iter()
                .map(|p| (p.id.as_str(), ItemKind::Project)),
        )
        .chain(fixture.ideas.iter().map(|i| (i.id.as_str(), ItemKind::Idea)))
        .collect();
    let mut rows = Vec::with_capacity(fixture.translations.len());
    for t in &fixture.translations {
        if !known.contains(&(t.item_id.as_str(), t.item_kind)) {
            bail!(
                "Translation ({}, {}) references an unknown {:?}",
                t.item_id,
                t.language_code,
                t.item_kind
            );
        }
        rows.push(translations::ActiveModel {
            item_id: Set(t.item_id.clone()),
            language_code: Set(t.language_code.to_ascii_lowercase()),
            item_kind: Set(t.item_kind),
            title: Set(t.title.clone()),
            excerpt: Set(t.excerpt.clone()),
            body: Set(t.body.clone()),
            updated_at: Set(now),
        });
    }
    report.translations = insert_all(&txn, rows).await?;

    for s in &fixture.series {
        SeriesRepository::refresh_post_count(&txn, &s.id).await?;
    }

    txn.commit().await?;

    info!(
        posts = report.posts,
        projects = report.projects,
        ideas = report.ideas,
        translations = report.translations,
        "Catalog seeded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const OWNER: &str = "00000000-0000-0000-0000-000000000001";
    const SERIES: &str = "00000000-0000-0000-0000-000000000002";

    fn fixture(posts: serde_json::Value) -> Fixture {
        serde_json::from_value(json!({
            "owner": {
                "id": OWNER,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
            },
            "categories": [
                {"id": "00000000-0000-0000-0000-000000000003", "name": "AI", "slug": "AI"},
            ],
            "tags": [
                {"id": "00000000-0000-0000-0000-000000000004", "name": "Rust", "slug": "Rust"},
            ],
            "series": [{"id": SERIES, "title": "Deep Dive", "slug": "Deep-Dive"}],
            "posts": posts,
        }))
        .unwrap()
    }

    fn post(n: u32, slug: &str, order: i32) -> serde_json::Value {
        json!({
            "id": format!("00000000-0000-0000-0000-0000000001{n:02}"),
            "slug": slug,
            "title": slug,
            "category": "AI",
            "tags": ["RUST"],
            "series": "deep-DIVE",
            "series_order": order,
        })
    }

    #[test]
    fn slugs_and_references_are_lowercased() {
        let fixture = fixture(json!([post(1, "Hello-World", 1)])).normalized().unwrap();
        assert_eq!(fixture.categories[0].slug, "ai");
        assert_eq!(fixture.tags[0].slug, "rust");
        assert_eq!(fixture.series[0].slug, "deep-dive");

        let post = &fixture.posts[0];
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.category.as_deref(), Some("ai"));
        assert_eq!(post.tags, ["rust"]);
        assert_eq!(post.series.as_deref(), Some("deep-dive"));
    }

    #[test]
    fn duplicate_series_order_is_rejected() {
        let err = fixture(json!([post(1, "first", 1), post(2, "second", 1)]))
            .normalized()
            .unwrap_err();
        assert!(err.to_string().contains("share order 1"), "{err}");
    }

    #[test]
    fn unordered_episodes_may_repeat_zero() {
        let fixture = fixture(json!([
            post(1, "first", 0),
            post(2, "second", 0),
            post(3, "third", 2),
        ]));
        assert!(fixture.normalized().is_ok());
    }
}
