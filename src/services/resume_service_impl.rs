use crate::api::types::ResumeDto;
use crate::catalog::{Language, LocaleResolver};
use crate::services::resume_service::{ResumeService, ResumeSet};
use async_trait::async_trait;

/// Serves the resume documents loaded at startup.
///
/// Unrecognized languages always get the English resume, whatever the
/// catalog default is.
pub struct StaticResumeService {
    documents: ResumeSet,
    resolver: LocaleResolver,
}

impl StaticResumeService {
    #[must_use]
    pub fn new(documents: ResumeSet) -> Self {
        Self {
            documents,
            resolver: LocaleResolver::new(Language::English),
        }
    }
}

#[async_trait]
impl ResumeService for StaticResumeService {
    async fn get_resume(&self, lang: Option<&str>) -> ResumeDto {
        let language = self.resolver.resolve(lang);
        ResumeDto {
            language: language.code().to_string(),
            resume: self.documents.get(language),
        }
    }
}
