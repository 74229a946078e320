//! Projects repository behind `/api/projects`.

use std::fs;
use std::path::{Path, PathBuf};

use folio_project_filter::{Project, ProjectDraft};

use crate::error::{ApiError, Result};

/// CRUD over published projects.
pub trait ProjectsApi {
    fn list(&self) -> Result<Vec<Project>>;
    fn create(&mut self, draft: ProjectDraft) -> Result<Project>;
    /// Replace the project with `project.id`.
    fn update(&mut self, project: Project) -> Result<Project>;
    fn delete(&mut self, id: u64) -> Result<()>;
}

/// Reject drafts without a title or description.
pub fn validate_draft(draft: &ProjectDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(ApiError::Invalid("title is required".into()));
    }
    if draft.description.trim().is_empty() {
        return Err(ApiError::Invalid("description is required".into()));
    }
    Ok(())
}

/// In-memory projects list. New ids are one past the largest id in use.
#[derive(Debug, Clone, Default)]
pub struct MemoryProjects {
    projects: Vec<Project>,
}

impl MemoryProjects {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn into_inner(self) -> Vec<Project> {
        self.projects
    }

    fn next_id(&self) -> u64 {
        self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}

impl ProjectsApi for MemoryProjects {
    fn list(&self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    fn create(&mut self, draft: ProjectDraft) -> Result<Project> {
        validate_draft(&draft)?;
        let project = draft.into_project(self.next_id());
        self.projects.push(project.clone());
        Ok(project)
    }

    fn update(&mut self, project: Project) -> Result<Project> {
        validate_draft(&ProjectDraft::from(project.clone()))?;
        let slot = self
            .projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or(ApiError::NotFound(project.id))?;
        *slot = project.clone();
        Ok(project)
    }

    fn delete(&mut self, id: u64) -> Result<()> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return Err(ApiError::NotFound(id));
        }
        Ok(())
    }
}

/// Read a JSON array of projects.
pub fn load_projects(path: &Path) -> Result<Vec<Project>> {
    let content = fs::read_to_string(path)
        .map_err(|e| ApiError::Storage(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| ApiError::Storage(format!("{}: {}", path.display(), e)))
}

/// Projects kept in a JSON file, rewritten after every change.
#[derive(Debug)]
pub struct FileProjects {
    path: PathBuf,
    inner: MemoryProjects,
}

impl FileProjects {
    /// Open `path`; a missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let projects = if path.exists() {
            load_projects(&path)?
        } else {
            Vec::new()
        };
        Ok(Self {
            path,
            inner: MemoryProjects::new(projects),
        })
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.inner.projects)
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ApiError::Storage(e.to_string()))?;
        }
        fs::write(&self.path, json)
            .map_err(|e| ApiError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

impl ProjectsApi for FileProjects {
    fn list(&self) -> Result<Vec<Project>> {
        self.inner.list()
    }

    fn create(&mut self, draft: ProjectDraft) -> Result<Project> {
        let project = self.inner.create(draft)?;
        self.flush()?;
        folio_logger::info(format!("Created project {}: {}", project.id, project.title));
        Ok(project)
    }

    fn update(&mut self, project: Project) -> Result<Project> {
        let project = self.inner.update(project)?;
        self.flush()?;
        folio_logger::info(format!("Updated project {}", project.id));
        Ok(project)
    }

    fn delete(&mut self, id: u64) -> Result<()> {
        self.inner.delete(id)?;
        self.flush()?;
        folio_logger::info(format!("Deleted project {}", id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> ProjectDraft {
        ProjectDraft {
            title: title.to_string(),
            description: format!("About {}", title),
            tags: vec!["Rust".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_ids_are_max_plus_one() {
        let mut api = MemoryProjects::default();
        assert_eq!(api.create(draft("a")).unwrap().id, 1);
        assert_eq!(api.create(draft("b")).unwrap().id, 2);
        api.delete(1).unwrap();
        assert_eq!(api.create(draft("c")).unwrap().id, 3);

        api.delete(3).unwrap();
        assert_eq!(api.create(draft("d")).unwrap().id, 3);
    }

    #[test]
    fn test_validation() {
        let mut api = MemoryProjects::default();
        let err = api.create(draft("  ")).unwrap_err();
        assert_eq!(err, ApiError::Invalid("title is required".into()));
        assert_eq!(err.status_code(), 400);

        let mut no_description = draft("x");
        no_description.description.clear();
        assert!(api.create(no_description).is_err());
        assert!(api.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_and_delete_missing() {
        let mut api = MemoryProjects::default();
        let mut project = api.create(draft("a")).unwrap();
        project.title = "Renamed".into();
        assert_eq!(api.update(project.clone()).unwrap().title, "Renamed");
        assert_eq!(api.list().unwrap(), vec![project.clone()]);

        project.id = 42;
        assert_eq!(api.update(project).unwrap_err(), ApiError::NotFound(42));
        assert_eq!(api.delete(42).unwrap_err().status_code(), 404);
    }

    #[test]
    fn test_file_projects_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("projects.json");

        let mut api = FileProjects::open(&path).unwrap();
        api.create(draft("first")).unwrap();
        api.create(draft("second")).unwrap();
        api.delete(1).unwrap();

        let reopened = FileProjects::open(&path).unwrap();
        let projects = reopened.list().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, 2);
        assert_eq!(load_projects(&path).unwrap(), projects);
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(&path, "{").unwrap();
        let err = FileProjects::open(&path).unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
