//! The resume aggregate.
//!
//! A resume is kept as one document per language. Documents for different
//! languages must have the same shape: every list has the same number of
//! entries, so section N in one language describes the same thing as
//! section N in another.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub profile: Profile,
    pub education: Vec<Education>,
    pub work_experience: Vec<WorkExperience>,
    pub publications: Vec<Publication>,
    pub awards: Vec<Award>,
    pub skills: Vec<SkillGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub summary: String,
    pub location: String,
    pub email: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub company: String,
    pub role: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub title: String,
    pub authors: Vec<String>,
    pub venue: String,
    pub year: Option<i32>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Award {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

/// Two resume documents whose list cardinalities differ.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("resume shape differs at {path}: {left} entries vs {right}")]
pub struct ShapeMismatch {
    pub path: String,
    pub left: usize,
    pub right: usize,
}

impl Resume {
    /// Cardinality of every list in the document, keyed by its path.
    ///
    /// Parents come before their children, so the first difference between
    /// two shapes is the outermost one.
    #[must_use]
    pub fn shape(&self) -> Vec<(String, usize)> {
        let mut shape = vec![("profile.links".to_string(), self.profile.links.len())];

        shape.push(("education".to_string(), self.education.len()));
        for (i, entry) in self.education.iter().enumerate() {
            shape.push((format!("education[{i}].highlights"), entry.highlights.len()));
        }

        shape.push(("work_experience".to_string(), self.work_experience.len()));
        for (i, entry) in self.work_experience.iter().enumerate() {
            shape.push((
                format!("work_experience[{i}].highlights"),
                entry.highlights.len(),
            ));
        }

        shape.push(("publications".to_string(), self.publications.len()));
        for (i, entry) in self.publications.iter().enumerate() {
            shape.push((format!("publications[{i}].authors"), entry.authors.len()));
        }

        shape.push(("awards".to_string(), self.awards.len()));

        shape.push(("skills".to_string(), self.skills.len()));
        for (i, group) in self.skills.iter().enumerate() {
            shape.push((format!("skills[{i}].items"), group.items.len()));
        }

        shape
    }

    /// Checks that `other` has exactly the same shape.
    pub fn check_parity(&self, other: &Self) -> Result<(), ShapeMismatch> {
        let mine = self.shape();
        let theirs = other.shape();
        for ((path, left), (_, right)) in mine.iter().zip(theirs.iter()) {
            if left != right {
                return Err(ShapeMismatch {
                    path: path.clone(),
                    left: *left,
                    right: *right,
                });
            }
        }
        Ok(())
    }
}
