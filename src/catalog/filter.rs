use super::ValidationError;
use crate::entities::sea_orm_active_enums::ContentStatus;
use crate::entities::{
    blog_post_tags, blog_posts, categories, idea_tags, ideas, project_tags, projects, tags,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::sea_query::{Expr, Func, LikeExpr, Query, SelectStatement};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryOrder, Select};
use serde::Deserialize;

/// Raw filter values as they arrive on a list request.
///
/// Everything is kept as text so that malformed values can be reported
/// against the field that carried them instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub status: Option<String>,
    pub content_type: Option<String>,
    #[serde(alias = "search_text")]
    pub search: Option<String>,
    #[serde(alias = "is_featured")]
    pub featured: Option<String>,
    pub collaboration_required: Option<String>,
    pub funding_status: Option<String>,
    pub year: Option<String>,
}

/// Typed, validated filter. `None` means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub status: Option<ContentStatus>,
    pub content_type: Option<String>,
    pub search_text: Option<String>,
    pub is_featured: Option<bool>,
    pub collaboration_required: Option<bool>,
    pub funding_status: Option<String>,
    pub year: Option<i32>,
}

impl FilterParams {
    pub fn parse(&self) -> Result<ContentFilter, ValidationError> {
        let status = match non_empty(self.status.as_deref()) {
            Some(raw) => Some(ContentStatus::parse(raw).ok_or_else(|| {
                ValidationError::new(
                    "status",
                    format!("'{raw}' is not one of draft, published, archived"),
                )
            })?),
            None => None,
        };

        let year = match non_empty(self.year.as_deref()) {
            Some(raw) => Some(parse_year(raw)?),
            None => None,
        };

        Ok(ContentFilter {
            category: non_empty(self.category.as_deref()).map(str::to_ascii_lowercase),
            tag: non_empty(self.tag.as_deref()).map(str::to_ascii_lowercase),
            status,
            content_type: non_empty(self.content_type.as_deref()).map(str::to_ascii_lowercase),
            search_text: non_empty(self.search.as_deref()).map(str::to_string),
            is_featured: parse_flag("featured", self.featured.as_deref())?,
            collaboration_required: parse_flag(
                "collaboration_required",
                self.collaboration_required.as_deref(),
            )?,
            funding_status: non_empty(self.funding_status.as_deref()).map(str::to_string),
            year,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_flag(field: &str, value: Option<&str>) -> Result<Option<bool>, ValidationError> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(Some(true)),
        "false" | "0" | "no" => Ok(Some(false)),
        _ => Err(ValidationError::new(
            field,
            format!("'{raw}' is not a boolean"),
        )),
    }
}

fn parse_year(raw: &str) -> Result<i32, ValidationError> {
    let year: i32 = raw
        .parse()
        .map_err(|_| ValidationError::new("year", format!("'{raw}' is not an integer")))?;
    if !(1900..=9999).contains(&year) {
        return Err(ValidationError::new(
            "year",
            format!("{year} is outside 1900..=9999"),
        ));
    }
    Ok(year)
}

/// Closed range covering a calendar year, as dates.
fn year_dates(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// Closed range `[YYYY-01-01 00:00:00, YYYY-12-31 23:59:59]`.
fn year_datetimes(year: i32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (first, last) = year_dates(year)?;
    Some((
        first.and_time(NaiveTime::MIN),
        last.and_hms_opt(23, 59, 59)?,
    ))
}

/// The column a `year` filter applies to.
#[derive(Debug, Clone, Copy)]
pub enum DateColumn<C> {
    DateTime(C),
    Date(C),
}

/// Describes how a catalog table answers each filter key.
///
/// Keys a table does not support return `None` and are ignored.
pub trait FilterTarget: EntityTrait {
    fn id_column() -> Self::Column;
    fn slug_column() -> Self::Column;
    fn category_column() -> Self::Column;
    fn status_column() -> Self::Column;
    fn search_columns() -> Vec<Self::Column>;
    fn date_column() -> DateColumn<Self::Column>;

    /// Ids of rows tagged with the given tag slug.
    fn tagged_with(slug: &str) -> SelectStatement;

    fn featured_column() -> Option<Self::Column> {
        None
    }

    fn content_type_column() -> Option<Self::Column> {
        None
    }

    fn collaboration_column() -> Option<Self::Column> {
        None
    }

    fn funding_column() -> Option<Self::Column> {
        None
    }

    /// Primary order for listings, with `id` as the final tie-breaker.
    fn ordered(select: Select<Self>) -> Select<Self>;
}

fn tag_subquery<J>(parent: J::Column, tag: J::Column, slug: &str) -> SelectStatement
where
    J: EntityTrait,
{
    Query::select()
        .column((J::default(), parent))
        .from(J::default())
        .inner_join(
            tags::Entity,
            Expr::col((tags::Entity, tags::Column::Id)).equals((J::default(), tag)),
        )
        .and_where(Expr::col((tags::Entity, tags::Column::Slug)).eq(slug))
        .to_owned()
}

fn category_subquery(slug: &str) -> SelectStatement {
    Query::select()
        .column((categories::Entity, categories::Column::Id))
        .from(categories::Entity)
        .and_where(Expr::col((categories::Entity, categories::Column::Slug)).eq(slug))
        .to_owned()
}

/// Escapes LIKE wildcards so user text only ever matches literally.
///
/// Folds ASCII only, the same as SQLite's `lower()` on the column side.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars().map(|c| c.to_ascii_lowercase()) {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// ANDs one predicate per recognized, non-empty filter key.
pub fn build_condition<E: FilterTarget>(filter: &ContentFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(slug) = &filter.category {
        condition = condition.add(E::category_column().in_subquery(category_subquery(slug)));
    }

    if let Some(slug) = &filter.tag {
        condition = condition.add(E::id_column().in_subquery(E::tagged_with(slug)));
    }

    if let Some(status) = filter.status {
        condition = condition.add(E::status_column().eq(status));
    }

    if let (Some(content_type), Some(column)) = (&filter.content_type, E::content_type_column()) {
        condition = condition.add(column.eq(content_type.as_str()));
    }

    if let (Some(featured), Some(column)) = (filter.is_featured, E::featured_column()) {
        condition = condition.add(column.eq(featured));
    }

    if let (Some(required), Some(column)) =
        (filter.collaboration_required, E::collaboration_column())
    {
        condition = condition.add(column.eq(required));
    }

    if let (Some(funding), Some(column)) = (&filter.funding_status, E::funding_column()) {
        condition = condition.add(column.eq(funding.as_str()));
    }

    if let Some(term) = &filter.search_text {
        let pattern = like_pattern(term);
        let mut any = Condition::any();
        for column in E::search_columns() {
            any = any.add(
                Expr::expr(Func::lower(Expr::col((E::default(), column))))
                    .like(LikeExpr::new(pattern.clone()).escape('\\')),
            );
        }
        condition = condition.add(any);
    }

    if let Some(year) = filter.year {
        match E::date_column() {
            DateColumn::DateTime(column) => {
                if let Some((start, end)) = year_datetimes(year) {
                    condition = condition.add(column.between(start, end));
                }
            }
            DateColumn::Date(column) => {
                if let Some((start, end)) = year_dates(year) {
                    condition = condition.add(column.between(start, end));
                }
            }
        }
    }

    condition
}

impl FilterTarget for blog_posts::Entity {
    fn id_column() -> Self::Column {
        blog_posts::Column::Id
    }

    fn slug_column() -> Self::Column {
        blog_posts::Column::Slug
    }

    fn category_column() -> Self::Column {
        blog_posts::Column::CategoryId
    }

    fn status_column() -> Self::Column {
        blog_posts::Column::Status
    }

    fn search_columns() -> Vec<Self::Column> {
        vec![
            blog_posts::Column::Title,
            blog_posts::Column::Excerpt,
            blog_posts::Column::Content,
        ]
    }

    fn date_column() -> DateColumn<Self::Column> {
        DateColumn::DateTime(blog_posts::Column::PublishedAt)
    }

    fn tagged_with(slug: &str) -> SelectStatement {
        tag_subquery::<blog_post_tags::Entity>(
            blog_post_tags::Column::PostId,
            blog_post_tags::Column::TagId,
            slug,
        )
    }

    fn featured_column() -> Option<Self::Column> {
        Some(blog_posts::Column::IsFeatured)
    }

    fn ordered(select: Select<Self>) -> Select<Self> {
        select
            .order_by_desc(blog_posts::Column::PublishedAt)
            .order_by_asc(blog_posts::Column::Id)
    }
}

impl FilterTarget for projects::Entity {
    fn id_column() -> Self::Column {
        projects::Column::Id
    }

    fn slug_column() -> Self::Column {
        projects::Column::Slug
    }

    fn category_column() -> Self::Column {
        projects::Column::CategoryId
    }

    fn status_column() -> Self::Column {
        projects::Column::Status
    }

    fn search_columns() -> Vec<Self::Column> {
        vec![
            projects::Column::Title,
            projects::Column::Description,
            projects::Column::Content,
        ]
    }

    fn date_column() -> DateColumn<Self::Column> {
        DateColumn::Date(projects::Column::StartDate)
    }

    fn tagged_with(slug: &str) -> SelectStatement {
        tag_subquery::<project_tags::Entity>(
            project_tags::Column::ProjectId,
            project_tags::Column::TagId,
            slug,
        )
    }

    fn featured_column() -> Option<Self::Column> {
        Some(projects::Column::IsFeatured)
    }

    fn content_type_column() -> Option<Self::Column> {
        Some(projects::Column::ContentType)
    }

    fn ordered(select: Select<Self>) -> Select<Self> {
        select
            .order_by_asc(projects::Column::SortOrder)
            .order_by_desc(projects::Column::StartDate)
            .order_by_asc(projects::Column::Id)
    }
}

impl FilterTarget for ideas::Entity {
    fn id_column() -> Self::Column {
        ideas::Column::Id
    }

    fn slug_column() -> Self::Column {
        ideas::Column::Slug
    }

    fn category_column() -> Self::Column {
        ideas::Column::CategoryId
    }

    fn status_column() -> Self::Column {
        ideas::Column::Status
    }

    fn search_columns() -> Vec<Self::Column> {
        vec![
            ideas::Column::Title,
            ideas::Column::AbstractText,
            ideas::Column::Motivation,
            ideas::Column::Methodology,
        ]
    }

    fn date_column() -> DateColumn<Self::Column> {
        DateColumn::DateTime(ideas::Column::PublishedAt)
    }

    fn tagged_with(slug: &str) -> SelectStatement {
        tag_subquery::<idea_tags::Entity>(idea_tags::Column::IdeaId, idea_tags::Column::TagId, slug)
    }

    fn collaboration_column() -> Option<Self::Column> {
        Some(ideas::Column::CollaborationRequired)
    }

    fn funding_column() -> Option<Self::Column> {
        Some(ideas::Column::FundingStatus)
    }

    fn ordered(select: Select<Self>) -> Select<Self> {
        select
            .order_by_desc(ideas::Column::PublishedAt)
            .order_by_asc(ideas::Column::Id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryFilter, QueryTrait};

    fn params() -> FilterParams {
        FilterParams::default()
    }

    fn render<E: FilterTarget>(filter: &ContentFilter) -> String {
        E::find()
            .filter(build_condition::<E>(filter))
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn empty_values_mean_not_provided() {
        let raw = FilterParams {
            category: Some("  ".to_string()),
            year: Some(String::new()),
            featured: Some(String::new()),
            ..params()
        };
        assert_eq!(raw.parse().unwrap(), ContentFilter::default());
    }

    #[test]
    fn malformed_values_name_their_field() {
        let bad_year = FilterParams {
            year: Some("twenty".to_string()),
            ..params()
        };
        assert_eq!(bad_year.parse().unwrap_err().field, "year");

        let bad_flag = FilterParams {
            featured: Some("maybe".to_string()),
            ..params()
        };
        assert_eq!(bad_flag.parse().unwrap_err().field, "featured");

        let bad_status = FilterParams {
            status: Some("deleted".to_string()),
            ..params()
        };
        assert_eq!(bad_status.parse().unwrap_err().field, "status");
    }

    #[test]
    fn parses_typed_values() {
        let raw = FilterParams {
            status: Some("Published".to_string()),
            featured: Some("true".to_string()),
            collaboration_required: Some("0".to_string()),
            year: Some("2024".to_string()),
            category: Some("AI".to_string()),
            ..params()
        };
        let filter = raw.parse().unwrap();
        assert_eq!(filter.status, Some(ContentStatus::Published));
        assert_eq!(filter.is_featured, Some(true));
        assert_eq!(filter.collaboration_required, Some(false));
        assert_eq!(filter.year, Some(2024));
        assert_eq!(filter.category.as_deref(), Some("ai"));
    }

    #[test]
    fn no_filter_builds_no_where_clause() {
        let sql = render::<blog_posts::Entity>(&ContentFilter::default());
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[test]
    fn category_and_search_are_anded() {
        let filter = ContentFilter {
            category: Some("ai".to_string()),
            search_text: Some("Chatbot".to_string()),
            ..ContentFilter::default()
        };
        let sql = render::<projects::Entity>(&filter);
        assert!(sql.contains("IN (SELECT"), "{sql}");
        assert!(sql.contains("'ai'"), "{sql}");
        assert!(sql.contains("LIKE '%chatbot%'"), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
    }

    #[test]
    fn year_is_a_closed_range() {
        let filter = ContentFilter {
            year: Some(2024),
            ..ContentFilter::default()
        };
        let sql = render::<blog_posts::Entity>(&filter);
        assert!(sql.contains("BETWEEN"), "{sql}");
        assert!(sql.contains("2024-01-01"), "{sql}");
        assert!(sql.contains("2024-12-31 23:59:59"), "{sql}");

        let sql = render::<projects::Entity>(&filter);
        assert!(sql.contains("\"start_date\" BETWEEN"), "{sql}");
    }

    #[test]
    fn unsupported_keys_are_ignored() {
        let filter = ContentFilter {
            content_type: Some("research".to_string()),
            collaboration_required: Some(true),
            ..ContentFilter::default()
        };
        let sql = render::<blog_posts::Entity>(&filter);
        assert!(!sql.contains("content_type"), "{sql}");
        assert!(!sql.contains("collaboration_required"), "{sql}");
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("Rust"), "%rust%");
        assert_eq!(like_pattern("CAFÉ Élan"), "%cafÉ Élan%");
    }
}
