use crate::entities::translations;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Languages the portfolio ships content in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::English, Self::Chinese];

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Chinese => "zh",
        }
    }

    /// Matches a language tag on its primary subtag, so `zh-CN` and `ZH_tw`
    /// both resolve to Chinese.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Self::English),
            "zh" => Some(Self::Chinese),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Picks the language a response is rendered in.
///
/// Resolution is total: anything unknown, unsupported or inactive falls back
/// to the configured default.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    default: Language,
    active: HashSet<Language>,
}

impl LocaleResolver {
    #[must_use]
    pub fn new(default: Language) -> Self {
        Self {
            default,
            active: Language::ALL.into_iter().collect(),
        }
    }

    /// Restricts resolution to the languages currently marked active.
    #[must_use]
    pub fn with_active(default: Language, active: impl IntoIterator<Item = Language>) -> Self {
        let mut active: HashSet<Language> = active.into_iter().collect();
        active.insert(default);
        Self { default, active }
    }

    #[must_use]
    pub const fn default_language(&self) -> Language {
        self.default
    }

    #[must_use]
    pub fn resolve(&self, requested: Option<&str>) -> Language {
        requested
            .and_then(Language::from_tag)
            .filter(|lang| self.active.contains(lang))
            .unwrap_or(self.default)
    }
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

/// A resolved request language next to the language base text is authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub requested: Language,
    pub base: Language,
}

impl Locale {
    #[must_use]
    pub const fn new(requested: Language, base: Language) -> Self {
        Self { requested, base }
    }

    /// The language an item is actually rendered in. Without a translation
    /// the item falls back to base text, so it reports the base language.
    #[must_use]
    pub fn served(&self, translation: Option<&translations::Model>) -> Language {
        if translation.is_some() {
            self.requested
        } else {
            self.base
        }
    }
}

/// The three localizable text fields of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalizedText {
    pub title: String,
    pub excerpt: String,
    pub body: String,
}

impl LocalizedText {
    /// Overlays a translation on the base text, field by field. Missing or
    /// blank translated fields keep the base value.
    #[must_use]
    pub fn localize(self, translation: Option<&translations::Model>) -> Self {
        let Some(translation) = translation else {
            return self;
        };
        Self {
            title: pick(translation.title.as_deref(), self.title),
            excerpt: pick(translation.excerpt.as_deref(), self.excerpt),
            body: pick(translation.body.as_deref(), self.body),
        }
    }
}

fn pick(translated: Option<&str>, base: String) -> String {
    match translated {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => base,
    }
}
