//! Pure query-composition core.
//!
//! Nothing in here touches the database: predicates are built as
//! `sea_query` conditions, pages are planned as offset/limit pairs, and
//! locale, relation and series resolution operate on already-loaded rows.

pub mod filter;
pub mod locale;
pub mod pagination;
pub mod relations;
pub mod response;
pub mod series;

pub use filter::{ContentFilter, FilterParams, FilterTarget};
pub use locale::{Language, Locale, LocaleResolver, LocalizedText};
pub use pagination::PageRequest;
pub use relations::RelationContext;
pub use response::PageDto;
pub use series::{CompletionPolicy, EpisodeSource};

/// A malformed request value, reported against the field that carried it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
