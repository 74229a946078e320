//! Project catalog and filtering for folio.
//!
//! Published projects come from the admin API; coming-soon projects and
//! category tabs are embedded. [`ProjectFilter`] combines category, fuzzy
//! search, tag and difficulty filters over both lists.

mod catalog;
mod filter;
mod fuzzy;
mod history;
mod model;

pub use catalog::{
    categories, category_by_id, coming_soon_by_category, coming_soon_projects, Catalog,
};
pub use filter::ProjectFilter;
pub use fuzzy::fuzzy_search;
pub use history::{
    SearchHistory, DEFAULT_MAX_HISTORY, DEFAULT_RECENT_DISPLAY, SEARCH_HISTORY_KEY,
};
pub use model::{
    ComingSoonProject, Difficulty, FilterState, FilterUpdate, Project, ProjectCategory,
    ProjectDraft, ALL_CATEGORY,
};
