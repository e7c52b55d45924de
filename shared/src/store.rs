// Project → color list mapping persisted as a single JSON document

use crate::error::{PersistenceError, ValidationError};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed relative filename of the project document
pub const DATA_FILE: &str = "projects.json";

/// Name of the fallback project
pub const DEFAULT_PROJECT: &str = "Default";

/// Project names in insertion order, each owning its colors in capture order.
pub type Projects = IndexMap<String, Vec<String>>;

/// The durable store. Every successful mutation is written to disk before it returns.
#[derive(Debug)]
pub struct ColorStore {
    path: PathBuf,
    projects: Projects,
}

/// State used when nothing usable is on disk
pub fn default_projects() -> Projects {
    let mut projects = Projects::new();
    projects.insert(DEFAULT_PROJECT.to_string(), Vec::new());
    projects
}

impl ColorStore {
    /// Load from `path`, falling back to a single empty "Default" project.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let projects = load(&path);
        Self { path, projects }
    }

    pub fn projects(&self) -> &Projects {
        &self.projects
    }

    pub fn contains(&self, name: &str) -> bool {
        self.projects.contains_key(name)
    }

    pub fn list_projects(&self) -> Vec<String> {
        self.projects.keys().cloned().collect()
    }

    /// Colors of `project`; empty if it does not exist.
    pub fn list_colors(&self, project: &str) -> &[String] {
        self.projects
            .get(project)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn add_project(&mut self, name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        if self.projects.contains_key(name) {
            return Err(ValidationError::DuplicateProject(name.to_string()));
        }
        self.projects.insert(name.to_string(), Vec::new());
        self.save();
        Ok(())
    }

    /// Remove a project and all of its colors.
    pub fn delete_project(&mut self, name: &str) -> Result<(), ValidationError> {
        if self.projects.shift_remove(name).is_none() {
            return Err(ValidationError::UnknownProject(name.to_string()));
        }
        self.save();
        Ok(())
    }

    /// Append a color. Duplicates are kept verbatim.
    pub fn add_color(&mut self, project: &str, hex: &str) -> Result<(), ValidationError> {
        let colors = self
            .projects
            .get_mut(project)
            .ok_or_else(|| ValidationError::UnknownProject(project.to_string()))?;
        colors.push(hex.to_string());
        self.save();
        Ok(())
    }

    /// Remove the color at `index`; later colors shift down by one.
    pub fn delete_color(&mut self, project: &str, index: usize) -> Result<(), ValidationError> {
        let colors = self
            .projects
            .get_mut(project)
            .ok_or_else(|| ValidationError::UnknownProject(project.to_string()))?;
        if index >= colors.len() {
            return Err(ValidationError::IndexOutOfRange {
                project: project.to_string(),
                index,
                len: colors.len(),
            });
        }
        colors.remove(index);
        self.save();
        Ok(())
    }

    /// Write the whole mapping. A failure is logged and the in-memory state kept.
    pub fn save(&self) {
        if let Err(e) = write(&self.path, &self.projects) {
            tracing::error!(error = %e, "projects not saved, changes are in memory only");
        }
    }
}

/// Read the project file, degrading to [`default_projects`] on any failure.
pub fn load(path: &Path) -> Projects {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no project file, starting with Default");
        return default_projects();
    }
    match read(path) {
        Ok(projects) => {
            tracing::debug!(path = %path.display(), count = projects.len(), "projects loaded");
            projects
        }
        Err(e) => {
            tracing::warn!(error = %e, "project file unusable, starting with Default");
            default_projects()
        }
    }
}

pub fn read(path: &Path) -> Result<Projects, PersistenceError> {
    let data = fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| PersistenceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write(path: &Path, projects: &Projects) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = serde_json::to_string_pretty(projects).map_err(PersistenceError::Serialize)?;
    fs::write(path, data).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}
