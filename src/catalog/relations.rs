use super::series::position_of;
use crate::entities::{blog_posts, categories, owners, series, translations};
use std::collections::HashMap;
use tracing::warn;

/// Related rows loaded in bulk for one page of catalog items.
///
/// Lookups never fail: a missing optional relation projects to `""` or `[]`,
/// and a reference to a row that does not exist degrades the same way with a
/// warning.
#[derive(Debug, Clone, Default)]
pub struct RelationContext {
    authors: HashMap<String, owners::Model>,
    categories: HashMap<String, categories::Model>,
    series: HashMap<String, series::Model>,
    series_members: HashMap<String, Vec<blog_posts::Model>>,
    tags: HashMap<String, Vec<String>>,
    technologies: HashMap<String, Vec<String>>,
    translations: HashMap<String, translations::Model>,
}

impl RelationContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_author(&mut self, owner: owners::Model) {
        self.authors.insert(owner.id.clone(), owner);
    }

    pub fn add_category(&mut self, category: categories::Model) {
        self.categories.insert(category.id.clone(), category);
    }

    pub fn add_series(&mut self, series: series::Model) {
        self.series.insert(series.id.clone(), series);
    }

    pub fn add_series_member(&mut self, post: blog_posts::Model) {
        if let Some(series_id) = post.series_id.clone() {
            self.series_members.entry(series_id).or_default().push(post);
        }
    }

    /// Appends a tag name; callers add tags in position order.
    pub fn push_tag(&mut self, item_id: &str, name: String) {
        self.tags.entry(item_id.to_string()).or_default().push(name);
    }

    pub fn push_technology(&mut self, item_id: &str, name: String) {
        self.technologies
            .entry(item_id.to_string())
            .or_default()
            .push(name);
    }

    pub fn add_translation(&mut self, translation: translations::Model) {
        self.translations
            .insert(translation.item_id.clone(), translation);
    }

    /// "First Last", trimmed.
    #[must_use]
    pub fn author_name(&self, owner_id: &str) -> String {
        match self.authors.get(owner_id) {
            Some(owner) => full_name(owner),
            None => {
                warn!(owner_id, "Content references a missing owner");
                String::new()
            }
        }
    }

    #[must_use]
    pub fn category_name(&self, category_id: Option<&str>) -> String {
        let Some(id) = category_id else {
            return String::new();
        };
        match self.categories.get(id) {
            Some(category) => category.name.clone(),
            None => {
                warn!(category_id = id, "Content references a missing category");
                String::new()
            }
        }
    }

    #[must_use]
    pub fn series(&self, series_id: Option<&str>) -> Option<&series::Model> {
        let id = series_id?;
        let found = self.series.get(id);
        if found.is_none() {
            warn!(series_id = id, "Content references a missing series");
        }
        found
    }

    /// Effective 1-based position of an item in its series, and the series size.
    #[must_use]
    pub fn series_position(&self, series_id: &str, item_id: &str) -> (i32, i32) {
        let members = self
            .series_members
            .get(series_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let position = position_of(members, item_id).unwrap_or(0);
        let total = i32::try_from(members.len()).unwrap_or(i32::MAX);
        (position, total)
    }

    #[must_use]
    pub fn tag_names(&self, item_id: &str) -> Vec<String> {
        self.tags.get(item_id).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn technologies(&self, item_id: &str) -> Vec<String> {
        self.technologies.get(item_id).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn translation(&self, item_id: &str) -> Option<&translations::Model> {
        self.translations.get(item_id)
    }
}

#[must_use]
pub fn full_name(owner: &owners::Model) -> String {
    format!("{} {}", owner.first_name.trim(), owner.last_name.trim())
        .trim()
        .to_string()
}
