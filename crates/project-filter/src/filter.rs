//! Filtering of published and coming-soon projects.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::coming_soon_projects;
use crate::fuzzy::fuzzy_search;
use crate::history::SearchHistory;
use crate::model::{
    ComingSoonProject, Difficulty, FilterState, FilterUpdate, Project, ALL_CATEGORY,
};

/// Filter state over two project lists plus the search history.
pub struct ProjectFilter {
    projects: Vec<Project>,
    coming_soon: Vec<ComingSoonProject>,
    state: FilterState,
    history: SearchHistory,
}

fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) {
    match items.iter().position(|existing| *existing == item) {
        Some(index) => {
            items.remove(index);
        }
        None => items.push(item),
    }
}

impl ProjectFilter {
    pub fn new(
        projects: Vec<Project>,
        coming_soon: Vec<ComingSoonProject>,
        history: SearchHistory,
    ) -> Self {
        Self {
            projects,
            coming_soon,
            state: FilterState::default(),
            history,
        }
    }

    /// Use the embedded coming-soon catalog.
    pub fn with_catalog(projects: Vec<Project>, history: SearchHistory) -> Self {
        Self::new(projects, coming_soon_projects().to_vec(), history)
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn coming_soon(&self) -> &[ComingSoonProject] {
        &self.coming_soon
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
    }

    // === Search ===

    /// Set the query; non-blank queries are added to history.
    pub fn handle_search(&mut self, query: &str) {
        self.state.search_query = query.to_string();
        self.history.push(query);
    }

    /// Reset the query. History is kept.
    pub fn clear_search(&mut self) {
        self.state.search_query.clear();
    }

    pub fn handle_recent_search_click(&mut self, query: &str) {
        self.handle_search(query);
    }

    pub fn clear_search_history(&mut self) {
        self.history.clear();
    }

    pub fn recent_searches(&self) -> &[String] {
        self.history.recent()
    }

    // === Filters ===

    pub fn handle_category_change(&mut self, category_id: &str) {
        self.state.active_category = category_id.to_string();
    }

    pub fn handle_tag_toggle(&mut self, tag: &str) {
        toggle(&mut self.state.selected_tags, tag.to_string());
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) {
        toggle(&mut self.state.difficulty, difficulty);
    }

    pub fn toggle_status(&mut self, status: &str) {
        toggle(&mut self.state.status, status.to_string());
    }

    /// Replace the fields set in `update`.
    pub fn update_filter(&mut self, update: FilterUpdate) {
        if let Some(category) = update.active_category {
            self.state.active_category = category;
        }
        if let Some(query) = update.search_query {
            self.state.search_query = query;
        }
        if let Some(tags) = update.selected_tags {
            self.state.selected_tags = tags;
        }
        if let Some(difficulty) = update.difficulty {
            self.state.difficulty = difficulty;
        }
        if let Some(status) = update.status {
            self.state.status = status;
        }
    }

    pub fn clear_all_filters(&mut self) {
        self.state = FilterState::default();
    }

    // === Derived views ===

    fn in_category(&self, category: Option<&str>) -> bool {
        self.state.active_category == ALL_CATEGORY
            || category == Some(self.state.active_category.as_str())
    }

    fn matches_search<'a>(
        &self,
        title: &str,
        description: &str,
        mut terms: impl Iterator<Item = &'a String>,
    ) -> bool {
        let query = self.state.search_query.as_str();
        query.is_empty()
            || fuzzy_search(query, title)
            || fuzzy_search(query, description)
            || terms.any(|term| fuzzy_search(query, term))
    }

    /// Category, then search over title/description/tags, then selected
    /// tags (any selected tag contained in any project tag).
    pub fn filtered_projects(&self) -> Vec<&Project> {
        let selected: Vec<String> = self
            .state
            .selected_tags
            .iter()
            .map(|tag| tag.to_lowercase())
            .collect();

        self.projects
            .iter()
            .filter(|p| self.in_category(p.category.as_deref()))
            .filter(|p| self.matches_search(&p.title, &p.description, p.tags.iter()))
            .filter(|p| {
                selected.is_empty()
                    || selected.iter().any(|tag| {
                        p.tags
                            .iter()
                            .any(|project_tag| project_tag.to_lowercase().contains(tag.as_str()))
                    })
            })
            .collect()
    }

    /// Category, then search over title/description/technologies, then
    /// difficulty.
    pub fn filtered_coming_soon(&self) -> Vec<&ComingSoonProject> {
        self.coming_soon
            .iter()
            .filter(|p| self.in_category(Some(p.category.as_str())))
            .filter(|p| self.matches_search(&p.title, &p.description, p.technologies.iter()))
            .filter(|p| {
                self.state.difficulty.is_empty() || self.state.difficulty.contains(&p.difficulty)
            })
            .collect()
    }

    /// Per-category totals across both lists. `all` counts every project,
    /// including uncategorized ones.
    pub fn project_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        counts.insert(
            ALL_CATEGORY.to_string(),
            self.projects.len() + self.coming_soon.len(),
        );

        let categories = self
            .projects
            .iter()
            .filter_map(|p| p.category.as_deref())
            .chain(self.coming_soon.iter().map(|p| p.category.as_str()));
        for category in categories {
            *counts.entry(category.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Sorted, de-duplicated project tags and technologies.
    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .projects
            .iter()
            .flat_map(|p| p.tags.iter())
            .chain(self.coming_soon.iter().flat_map(|p| p.technologies.iter()))
            .map(String::as_str)
            .collect();
        tags.into_iter().map(str::to_string).collect()
    }

    /// Number of filter groups currently narrowing the view.
    pub fn active_filters_count(&self) -> usize {
        let state = &self.state;
        [
            state.active_category != ALL_CATEGORY,
            !state.search_query.is_empty(),
            !state.selected_tags.is_empty(),
            !state.difficulty.is_empty(),
            !state.status.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn project(id: u64, title: &str, tags: &[&str], category: Option<&str>) -> Project {
        Project {
            id,
            title: title.to_string(),
            description: format!("{} description", title),
            image: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: category.map(str::to_string),
            github_url: String::new(),
            live_url: String::new(),
        }
    }

    fn sample_projects() -> Vec<Project> {
        vec![
            project(1, "Portfolio Site", &["React", "Next.js"], Some("fullstack")),
            project(2, "Snake", &["Canvas", "TypeScript"], Some("games")),
            project(3, "Token Swap", &["Solidity", "React Native"], Some("blockchain")),
            project(4, "Dotfiles", &["Shell"], None),
        ]
    }

    fn filter() -> ProjectFilter {
        ProjectFilter::with_catalog(
            sample_projects(),
            SearchHistory::load(Arc::new(MemoryStore::new())),
        )
    }

    fn ids(projects: &[&Project]) -> Vec<u64> {
        projects.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_unfiltered_views() {
        let filter = filter();
        assert_eq!(filter.filtered_projects().len(), 4);
        assert_eq!(filter.filtered_coming_soon().len(), 17);
        assert_eq!(filter.active_filters_count(), 0);
    }

    #[test]
    fn test_search_react_narrows_both_lists() {
        let mut filter = filter();
        filter.handle_search("react");

        assert_eq!(ids(&filter.filtered_projects()), vec![1, 3]);
        let coming: Vec<_> = filter.filtered_coming_soon().iter().map(|p| p.id.as_str()).collect();
        assert!(coming.contains(&"defi-dashboard"));
        assert!(coming.contains(&"expense-tracker"));
        assert!(!coming.contains(&"productivity-hub"));
        assert_eq!(filter.recent_searches(), ["react"]);
        assert_eq!(filter.active_filters_count(), 1);
    }

    #[test]
    fn test_search_matches_tags() {
        let mut filter = ProjectFilter::new(
            vec![
                project(1, "One", &["react"], None),
                project(2, "Two", &["vue"], None),
                project(3, "Three", &["react", "ts"], None),
            ],
            Vec::new(),
            SearchHistory::load(Arc::new(MemoryStore::new())),
        );
        filter.handle_search("react");
        assert_eq!(ids(&filter.filtered_projects()), vec![1, 3]);
        assert_eq!(filter.project_counts()[ALL_CATEGORY], 3);
    }

    #[test]
    fn test_category_then_search_then_tags() {
        let mut filter = filter();
        filter.handle_category_change("fullstack");
        assert_eq!(ids(&filter.filtered_projects()), vec![1]);
        assert_eq!(filter.filtered_coming_soon().len(), 2);

        filter.handle_category_change("all");
        filter.handle_tag_toggle("react");
        assert_eq!(ids(&filter.filtered_projects()), vec![1, 3]);

        filter.handle_tag_toggle("canvas");
        assert_eq!(ids(&filter.filtered_projects()), vec![1, 2, 3]);

        filter.handle_search("snk");
        assert_eq!(ids(&filter.filtered_projects()), vec![2]);

        filter.handle_tag_toggle("react");
        filter.handle_tag_toggle("canvas");
        assert!(filter.state().selected_tags.is_empty());
    }

    #[test]
    fn test_uncategorized_project_only_in_all() {
        let mut filter = filter();
        filter.handle_category_change("games");
        assert_eq!(ids(&filter.filtered_projects()), vec![2]);

        let counts = filter.project_counts();
        assert_eq!(counts["all"], 4 + 17);
        assert_eq!(counts["games"], 1 + 1);
        assert_eq!(counts["blockchain"], 1 + 3);
        assert_eq!(counts["fullstack"], 1 + 2);
        assert_eq!(counts["security"], 1);
        let per_category: usize = counts.iter().filter(|(k, _)| *k != "all").map(|(_, v)| v).sum();
        assert_eq!(per_category, 3 + 17);
    }

    #[test]
    fn test_difficulty_filter_applies_to_coming_soon_only() {
        let mut filter = filter();
        filter.toggle_difficulty(Difficulty::Beginner);
        let coming = filter.filtered_coming_soon();
        assert_eq!(coming.len(), 1);
        assert_eq!(coming[0].id, "productivity-hub");
        assert_eq!(filter.filtered_projects().len(), 4);

        filter.toggle_difficulty(Difficulty::Intermediate);
        assert_eq!(filter.filtered_coming_soon().len(), 8);

        filter.toggle_difficulty(Difficulty::Beginner);
        filter.toggle_difficulty(Difficulty::Intermediate);
        assert_eq!(filter.filtered_coming_soon().len(), 17);
    }

    #[test]
    fn test_status_is_counted_but_not_applied() {
        let mut filter = filter();
        filter.toggle_status("in-progress");
        assert_eq!(filter.active_filters_count(), 1);
        assert_eq!(filter.filtered_projects().len(), 4);
        assert_eq!(filter.filtered_coming_soon().len(), 17);
    }

    #[test]
    fn test_update_and_clear_all() {
        let mut filter = filter();
        filter.update_filter(FilterUpdate {
            active_category: Some("blockchain".into()),
            search_query: Some("lazy".into()),
            selected_tags: Some(vec!["IPFS".into()]),
            difficulty: Some(vec![Difficulty::Advanced]),
            status: Some(vec!["planned".into()]),
        });
        assert_eq!(filter.active_filters_count(), 5);
        let coming = filter.filtered_coming_soon();
        assert_eq!(coming.len(), 1);
        assert_eq!(coming[0].id, "nft-marketplace");
        // update_filter does not touch history
        assert!(filter.recent_searches().is_empty());

        filter.clear_all_filters();
        assert_eq!(filter.state(), &FilterState::default());
        assert_eq!(filter.active_filters_count(), 0);
    }

    #[test]
    fn test_clear_search_keeps_history() {
        let mut filter = filter();
        filter.handle_search("web3");
        filter.handle_recent_search_click("rust");
        assert_eq!(filter.state().search_query, "rust");
        assert_eq!(filter.recent_searches(), ["rust", "web3"]);

        filter.clear_search();
        assert!(filter.state().search_query.is_empty());
        assert_eq!(filter.recent_searches().len(), 2);

        filter.clear_search_history();
        assert!(filter.recent_searches().is_empty());
    }

    #[test]
    fn test_blank_search_is_a_filter_but_not_history() {
        let mut filter = filter();
        filter.handle_search("   ");
        assert!(filter.recent_searches().is_empty());
        assert_eq!(filter.active_filters_count(), 1);
    }

    #[test]
    fn test_history_shared_through_store() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut first = ProjectFilter::new(Vec::new(), Vec::new(), SearchHistory::load(store.clone()));
        first.handle_search("langchain");

        let second = ProjectFilter::new(Vec::new(), Vec::new(), SearchHistory::load(store));
        assert_eq!(second.recent_searches(), ["langchain"]);
    }

    #[test]
    fn test_all_tags_sorted_and_unique() {
        let filter = filter();
        let tags = filter.all_tags();
        let mut sorted = tags.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(tags, sorted);
        assert!(tags.contains(&"Canvas".to_string()));
        assert!(tags.contains(&"Kubernetes API".to_string()));
        assert_eq!(tags.iter().filter(|t| *t == "React").count(), 1);
    }

    #[test]
    fn test_set_projects() {
        let mut filter = filter();
        filter.set_projects(vec![project(9, "Solo", &[], Some("games"))]);
        assert_eq!(filter.projects().len(), 1);
        assert_eq!(filter.project_counts()["games"], 2);
    }
}
