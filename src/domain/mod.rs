//! Domain primitives for the content catalog.
//!
//! Identifiers are opaque tokens: they are validated for format at the edge
//! and otherwise passed through untouched. Content kinds form a closed set
//! rather than a hierarchy; behaviour shared by every catalog table lives on
//! the [`CatalogItem`] trait.

pub mod resume;

pub use resume::Resume;

use crate::catalog::ValidationError;
use crate::entities::sea_orm_active_enums::ItemKind;
use crate::entities::{blog_posts, ideas, projects};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of any catalog row.
///
/// # Examples
///
/// ```rust
/// use folio::domain::ContentId;
///
/// let id = ContentId::parse("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
/// assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
/// assert!(ContentId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentId(Uuid);

impl ContentId {
    /// Parses a textual identifier, rejecting anything that is not a UUID.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| ValidationError::new("id", format!("'{raw}' is not a valid identifier")))
    }

    /// Canonical (lowercase, hyphenated) storage form.
    #[must_use]
    pub fn as_key(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Serialize for ContentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_key())
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// How a detail request addresses its item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKey {
    Id(ContentId),
    Slug(String),
}

impl ItemKey {
    pub fn id(raw: &str) -> Result<Self, ValidationError> {
        ContentId::parse(raw).map(Self::Id)
    }

    pub fn slug(raw: &str) -> Result<Self, ValidationError> {
        let slug = raw.trim();
        if slug.is_empty() {
            return Err(ValidationError::new("slug", "slug cannot be empty"));
        }
        if !slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::new(
                "slug",
                format!("'{slug}' is not a URL-safe slug"),
            ));
        }
        Ok(Self::Slug(slug.to_ascii_lowercase()))
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => write!(f, "'{slug}'"),
        }
    }
}

/// Every kind of content the portfolio knows about.
///
/// Blog posts, projects (including research projects) and ideas live in
/// catalog tables; the remaining kinds are sections of the resume aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    BlogPost,
    Idea,
    Project,
    ResearchProject,
    Publication,
    Award,
    Education,
    WorkExperience,
}

impl ContentKind {
    /// The table-level discriminator, for kinds stored in the catalog.
    #[must_use]
    pub const fn item_kind(&self) -> Option<ItemKind> {
        match self {
            Self::BlogPost => Some(ItemKind::BlogPost),
            Self::Project | Self::ResearchProject => Some(ItemKind::Project),
            Self::Idea => Some(ItemKind::Idea),
            Self::Publication | Self::Award | Self::Education | Self::WorkExperience => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BlogPost => "Blog post",
            Self::Idea => "Idea",
            Self::Project => "Project",
            Self::ResearchProject => "Research project",
            Self::Publication => "Publication",
            Self::Award => "Award",
            Self::Education => "Education entry",
            Self::WorkExperience => "Work experience",
        };
        f.write_str(label)
    }
}

impl From<ItemKind> for ContentKind {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::BlogPost => Self::BlogPost,
            ItemKind::Project => Self::Project,
            ItemKind::Idea => Self::Idea,
        }
    }
}

/// Engagement counter carried by every catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterField {
    Views,
    Likes,
}

impl CounterField {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Likes => "likes",
        }
    }
}

/// Direction of a counter mutation. Replaces a bare `increment: bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterDirection {
    Increment,
    Decrement,
}

impl CounterDirection {
    #[must_use]
    pub const fn from_increment(increment: bool) -> Self {
        if increment {
            Self::Increment
        } else {
            Self::Decrement
        }
    }

    #[must_use]
    pub const fn delta(&self) -> i64 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
        }
    }
}

/// The foreign keys every catalog row carries, whatever its table.
pub trait CatalogItem {
    fn id(&self) -> &str;

    /// The item's owner (author for posts).
    fn owner_id(&self) -> &str;

    fn category_id(&self) -> Option<&str>;
}

macro_rules! impl_catalog_item {
    ($model:ty, $owner:ident) => {
        impl CatalogItem for $model {
            fn id(&self) -> &str {
                &self.id
            }
            fn owner_id(&self) -> &str {
                &self.$owner
            }
            fn category_id(&self) -> Option<&str> {
                self.category_id.as_deref()
            }
        }
    };
}

impl_catalog_item!(blog_posts::Model, author_id);
impl_catalog_item!(projects::Model, owner_id);
impl_catalog_item!(ideas::Model, owner_id);
