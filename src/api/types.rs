use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A blog post, denormalized and localized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogPostDto {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub status: String,
    pub is_featured: bool,
    pub reading_time: i32,
    pub view_count: i64,
    pub like_count: i64,
    pub published_at: String,
    pub created_at: String,
    pub updated_at: String,
    pub author_name: String,
    pub category_name: String,
    pub tags: Vec<String>,
    pub series_id: String,
    pub series_title: String,
    pub series_description: String,
    pub series_position: i32,
    pub series_total: i32,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDto {
    pub id: String,
    pub slug: String,
    pub content_type: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub status: String,
    pub is_featured: bool,
    pub github_url: String,
    pub demo_url: String,
    pub start_date: String,
    pub end_date: String,
    pub sort_order: i32,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub owner_name: String,
    pub category_name: String,
    pub tags: Vec<String>,
    pub technologies: Vec<String>,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdeaDto {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub motivation: String,
    pub methodology: String,
    pub status: String,
    pub collaboration_required: bool,
    pub funding_status: String,
    pub difficulty: String,
    pub view_count: i64,
    pub like_count: i64,
    pub published_at: String,
    pub created_at: String,
    pub updated_at: String,
    pub owner_name: String,
    pub category_name: String,
    pub tags: Vec<String>,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EpisodeDto {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub order: i32,
    /// Reading time as `"Xh Ym"`.
    pub duration: String,
    pub reading_time: i32,
    pub published_at: String,
    pub current: bool,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesDto {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub post_count: i32,
    pub is_completed: bool,
    pub total_duration: String,
    pub completed_count: usize,
    pub episodes: Vec<EpisodeDto>,
    pub created_at: String,
    pub updated_at: String,
    pub language: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CounterDto {
    pub new_count: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CounterRequest {
    #[serde(default = "default_increment")]
    pub increment: bool,
}

const fn default_increment() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguageDto {
    pub code: String,
    pub name: String,
    pub native_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: String,
    pub database: String,
    pub version: String,
    pub uptime: u64,
}

/// The resume in one language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResumeDto {
    pub language: String,
    #[serde(flatten)]
    pub resume: crate::domain::Resume,
}

/// Query string of a detail request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}
