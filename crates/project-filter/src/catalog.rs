//! Embedded project catalog: category tabs and coming-soon projects.

use serde::Deserialize;
use std::sync::OnceLock;

use crate::model::{ComingSoonProject, ProjectCategory, ALL_CATEGORY};

const CATALOG_TOML: &str = include_str!("../data/catalog.toml");

static CATALOG: OnceLock<Catalog> = OnceLock::new();

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub categories: Vec<ProjectCategory>,
    #[serde(default)]
    pub coming_soon: Vec<ComingSoonProject>,
}

impl Catalog {
    /// Catalog with only the `all` tab.
    fn minimal() -> Self {
        Self {
            categories: vec![ProjectCategory {
                id: ALL_CATEGORY.to_string(),
                name: "All Projects".to_string(),
                icon: "🚀".to_string(),
                description: "View all projects".to_string(),
                color: "hsl(var(--primary))".to_string(),
            }],
            coming_soon: Vec::new(),
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> &'static Catalog {
        CATALOG.get_or_init(|| match Self::parse(CATALOG_TOML) {
            Ok(catalog) => catalog,
            Err(e) => {
                folio_logger::error(format!(
                    "Failed to parse project catalog: {}. Using empty catalog.",
                    e
                ));
                Self::minimal()
            }
        })
    }
}

/// Category tabs in display order; the first is `all`.
pub fn categories() -> &'static [ProjectCategory] {
    &Catalog::builtin().categories
}

pub fn coming_soon_projects() -> &'static [ComingSoonProject] {
    &Catalog::builtin().coming_soon
}

pub fn category_by_id(id: &str) -> Option<&'static ProjectCategory> {
    categories().iter().find(|c| c.id == id)
}

/// Coming-soon projects in `category_id`; `all` returns every one.
pub fn coming_soon_by_category(category_id: &str) -> Vec<&'static ComingSoonProject> {
    coming_soon_projects()
        .iter()
        .filter(|p| category_id == ALL_CATEGORY || p.category == category_id)
        .collect()
}
