use crate::api::types::ResumeDto;
use crate::catalog::Language;
use crate::constants::resume::FILE_PREFIX;
use crate::domain::Resume;
use crate::domain::resume::ShapeMismatch;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Failures while loading the resume documents. These surface at startup,
/// never on a request.
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Resume for '{missing}' is missing while other languages are present")]
    Incomplete { missing: Language },

    #[error("Resume '{language}' does not match '{reference}': {source}")]
    Shape {
        language: Language,
        reference: Language,
        #[source]
        source: ShapeMismatch,
    },
}

/// One resume document per supported language, all of the same shape.
#[derive(Debug, Clone, Default)]
pub struct ResumeSet {
    documents: HashMap<Language, Resume>,
}

impl ResumeSet {
    #[must_use]
    pub fn file_name(language: Language) -> String {
        format!("{FILE_PREFIX}.{}.json", language.code())
    }

    /// Builds a set from in-memory documents, checking their shapes against
    /// the first one.
    pub fn from_documents(
        documents: impl IntoIterator<Item = (Language, Resume)>,
    ) -> Result<Self, ResumeError> {
        let documents: HashMap<Language, Resume> = documents.into_iter().collect();
        for language in Language::ALL {
            if !documents.is_empty() && !documents.contains_key(&language) {
                return Err(ResumeError::Incomplete { missing: language });
            }
        }

        let reference = Language::ALL[0];
        if let Some(base) = documents.get(&reference) {
            for (language, document) in &documents {
                base.check_parity(document)
                    .map_err(|source| ResumeError::Shape {
                        language: *language,
                        reference,
                        source,
                    })?;
            }
        }

        Ok(Self { documents })
    }

    /// Reads `resume.<code>.json` for every supported language from `dir`.
    ///
    /// A directory without any resume file yields an empty resume.
    pub async fn load(dir: &Path) -> Result<Self, ResumeError> {
        let mut documents = Vec::new();

        for language in Language::ALL {
            let path = dir.join(Self::file_name(language));
            if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                continue;
            }
            let raw = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| ResumeError::Read {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            let resume: Resume =
                serde_json::from_str(&raw).map_err(|e| ResumeError::Parse {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            documents.push((language, resume));
        }

        if documents.is_empty() {
            warn!(dir = %dir.display(), "No resume documents found, serving an empty resume");
        }

        let set = Self::from_documents(documents)?;
        info!(languages = set.documents.len(), "Resume loaded");
        Ok(set)
    }

    #[must_use]
    pub fn get(&self, language: Language) -> Resume {
        self.documents.get(&language).cloned().unwrap_or_default()
    }
}

#[async_trait::async_trait]
pub trait ResumeService: Send + Sync {
    /// Returns the resume in the requested language, falling back to the
    /// default language. Never fails.
    async fn get_resume(&self, lang: Option<&str>) -> ResumeDto;
}
