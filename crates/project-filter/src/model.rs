//! Project data types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category id that matches every project.
pub const ALL_CATEGORY: &str = "all";

/// A published project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Projects without a category only count towards `all`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub live_url: String,
}

/// A project as submitted by the admin form, before it has an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub live_url: String,
}

impl ProjectDraft {
    /// Attach an id.
    pub fn into_project(self, id: u64) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
            tags: self.tags,
            category: self.category,
            github_url: self.github_url,
            live_url: self.live_url,
        }
    }
}

impl From<Project> for ProjectDraft {
    fn from(project: Project) -> Self {
        Self {
            title: project.title,
            description: project.description,
            image: project.image,
            tags: project.tags,
            category: project.category,
            github_url: project.github_url,
            live_url: project.live_url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown difficulty: {}", s))
    }
}

/// A planned project shown as "coming soon".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComingSoonProject {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub technologies: Vec<String>,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    pub features: Vec<String>,
}

/// A tab on the projects page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    /// CSS color (hex or a `hsl(var(--...))` reference)
    pub color: String,
}

/// Current filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Selected category id, or [`ALL_CATEGORY`]
    pub active_category: String,
    /// Raw search input; empty means no search
    pub search_query: String,
    /// Tags a project must match at least one of
    pub selected_tags: Vec<String>,
    /// Difficulties a coming-soon project must have one of
    pub difficulty: Vec<Difficulty>,
    /// Counted as an active filter but not applied to either list
    pub status: Vec<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_category: ALL_CATEGORY.to_string(),
            search_query: String::new(),
            selected_tags: Vec::new(),
            difficulty: Vec::new(),
            status: Vec::new(),
        }
    }
}

/// Partial replacement of [`FilterState`]; `None` fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub active_category: Option<String>,
    pub search_query: Option<String>,
    pub selected_tags: Option<Vec<String>>,
    pub difficulty: Option<Vec<Difficulty>>,
    pub status: Option<Vec<String>>,
}
