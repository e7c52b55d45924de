// UI-thread controller: owns the store and the active project selection
//
// Everything the window does to projects and colors goes through here,
// including the second half of a capture cycle.

use crate::color::Rgb;
use crate::error::ValidationError;
use crate::store::{ColorStore, DEFAULT_PROJECT};

/// Payload of the `on_color_captured` notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCaptured {
    pub project: String,
    pub hex: String,
    /// Position of the new color within the project
    pub index: usize,
    /// True when the fallback project had to be created for this capture
    pub created_fallback: bool,
}

type CaptureCallback = Box<dyn FnMut(&ColorCaptured)>;

pub struct Session {
    store: ColorStore,
    active: Option<String>,
    subscribers: Vec<CaptureCallback>,
}

impl Session {
    /// Wrap a loaded store and select its first project, if any.
    pub fn new(store: ColorStore) -> Self {
        let active = store.projects().keys().next().cloned();
        Self {
            store,
            active,
            subscribers: Vec::new(),
        }
    }

    pub fn store(&self) -> &ColorStore {
        &self.store
    }

    pub fn active_project(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn list_projects(&self) -> Vec<String> {
        self.store.list_projects()
    }

    pub fn list_colors(&self, project: &str) -> &[String] {
        self.store.list_colors(project)
    }

    /// Colors of the active project; empty when nothing is selected.
    pub fn active_colors(&self) -> &[String] {
        match &self.active {
            Some(project) => self.store.list_colors(project),
            None => &[],
        }
    }

    pub fn select_project(&mut self, name: &str) -> Result<(), ValidationError> {
        if !self.store.contains(name) {
            return Err(ValidationError::UnknownProject(name.to_string()));
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Create a project and make it the active one.
    pub fn add_project(&mut self, name: &str) -> Result<(), ValidationError> {
        self.store.add_project(name)?;
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Delete a project. If it was active, the first remaining project becomes active.
    pub fn delete_project(&mut self, name: &str) -> Result<(), ValidationError> {
        self.store.delete_project(name)?;
        if self.active.as_deref() == Some(name) {
            self.active = self.store.projects().keys().next().cloned();
        }
        Ok(())
    }

    pub fn delete_active_project(&mut self) -> Result<(), ValidationError> {
        let name = self.active.clone().ok_or(ValidationError::NoProjectSelected)?;
        self.delete_project(&name)
    }

    pub fn delete_color(&mut self, project: &str, index: usize) -> Result<(), ValidationError> {
        self.store.delete_color(project, index)
    }

    /// Register an `on_color_captured` listener.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&ColorCaptured) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Store a sampled color in the active project, falling back to "Default".
    pub fn handle_capture(&mut self, color: Rgb) -> Result<ColorCaptured, ValidationError> {
        let hex = color.to_hex();

        let mut created_fallback = false;
        let project = match self.active.clone() {
            Some(project) => project,
            None => {
                if !self.store.contains(DEFAULT_PROJECT) {
                    self.store.add_project(DEFAULT_PROJECT)?;
                    created_fallback = true;
                    tracing::info!("created fallback project {DEFAULT_PROJECT}");
                }
                self.active = Some(DEFAULT_PROJECT.to_string());
                DEFAULT_PROJECT.to_string()
            }
        };

        if let Err(e) = self.store.add_color(&project, &hex) {
            tracing::error!(error = %e, hex = %hex, "captured color not stored");
            return Err(e);
        }

        let captured = ColorCaptured {
            index: self.store.list_colors(&project).len() - 1,
            project,
            hex,
            created_fallback,
        };
        tracing::info!(project = %captured.project, hex = %captured.hex, "color captured");

        for subscriber in &mut self.subscribers {
            subscriber(&captured);
        }
        Ok(captured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DATA_FILE;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> Session {
        Session::new(ColorStore::open(dir.path().join(DATA_FILE)))
    }

    #[test]
    fn test_new_selects_first_project() {
        let dir = TempDir::new().expect("should create temp dir");
        let session = session_in(&dir);
        assert_eq!(session.active_project(), Some("Default"));
    }

    #[test]
    fn test_capture_goes_to_active_project() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        session.add_project("Branding").unwrap();

        let captured = session.handle_capture(Rgb::new(0, 0x55, 0xff)).unwrap();
        assert_eq!(captured.project, "Branding");
        assert_eq!(captured.hex, "#0055FF");
        assert_eq!(captured.index, 0);
        assert!(!captured.created_fallback);
        assert_eq!(session.list_colors("Branding"), ["#0055FF"]);
        assert!(session.list_colors("Default").is_empty());
    }

    #[test]
    fn test_capture_without_projects_creates_default() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        session.delete_project("Default").unwrap();
        assert_eq!(session.active_project(), None);
        assert!(session.list_projects().is_empty());

        let captured = session.handle_capture(Rgb::new(0xab, 0xcd, 0xef)).unwrap();
        assert!(captured.created_fallback);
        assert_eq!(session.active_project(), Some("Default"));
        assert_eq!(session.list_projects(), vec!["Default"]);
        assert_eq!(session.list_colors("Default"), ["#ABCDEF"]);
    }

    #[test]
    fn test_capture_without_selection_reuses_existing_default() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        session.active = None;

        let captured = session.handle_capture(Rgb::new(1, 2, 3)).unwrap();
        assert!(!captured.created_fallback);
        assert_eq!(session.active_project(), Some("Default"));
        assert_eq!(session.list_projects(), vec!["Default"]);
    }

    #[test]
    fn test_capture_into_vanished_project_fails() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        session.active = Some("Ghost".to_string());

        assert_eq!(
            session.handle_capture(Rgb::new(1, 2, 3)),
            Err(ValidationError::UnknownProject("Ghost".into()))
        );
        assert!(!session.store().contains("Ghost"));
    }

    #[test]
    fn test_subscribers_are_notified() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.subscribe(move |c: &ColorCaptured| {
            sink.borrow_mut().push((c.project.clone(), c.hex.clone()))
        });

        session.handle_capture(Rgb::new(255, 0, 170)).unwrap();
        session.handle_capture(Rgb::new(255, 0, 170)).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                ("Default".to_string(), "#FF00AA".to_string()),
                ("Default".to_string(), "#FF00AA".to_string()),
            ]
        );
        assert_eq!(session.list_colors("Default").len(), 2);
    }

    #[test]
    fn test_failed_capture_does_not_notify() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        session.active = Some("Ghost".to_string());
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        session.subscribe(move |_| *counter.borrow_mut() += 1);

        let _ = session.handle_capture(Rgb::new(0, 0, 0));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_add_project_selects_it() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        session.add_project("Web").unwrap();
        assert_eq!(session.active_project(), Some("Web"));

        assert!(session.add_project("Web").is_err());
        assert!(session.add_project("").is_err());
        assert_eq!(session.active_project(), Some("Web"));
    }

    #[test]
    fn test_select_unknown_project_keeps_selection() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        assert!(session.select_project("Nope").is_err());
        assert_eq!(session.active_project(), Some("Default"));
    }

    #[test]
    fn test_delete_active_project_selects_first_remaining() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        session.add_project("A").unwrap();
        session.add_project("B").unwrap();
        session.select_project("A").unwrap();

        session.delete_active_project().unwrap();
        assert_eq!(session.active_project(), Some("Default"));
        assert_eq!(session.list_projects(), vec!["Default", "B"]);
    }

    #[test]
    fn test_delete_other_project_keeps_selection() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        session.add_project("A").unwrap();
        session.delete_project("Default").unwrap();
        assert_eq!(session.active_project(), Some("A"));
    }

    #[test]
    fn test_delete_last_project_clears_selection() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        session.delete_active_project().unwrap();
        assert_eq!(session.active_project(), None);
        assert!(session.active_colors().is_empty());
        assert_eq!(
            session.delete_active_project(),
            Err(ValidationError::NoProjectSelected)
        );
    }

    #[test]
    fn test_delete_color_by_position() {
        let dir = TempDir::new().expect("should create temp dir");
        let mut session = session_in(&dir);
        for rgb in [Rgb::new(1, 1, 1), Rgb::new(2, 2, 2), Rgb::new(1, 1, 1)] {
            session.handle_capture(rgb).unwrap();
        }
        session.delete_color("Default", 2).unwrap();
        assert_eq!(session.active_colors(), ["#010101", "#020202"]);
        assert!(session.delete_color("Default", 2).is_err());
    }
}
