//! # Project Store
//!
//! Owns the one current project and the editor state around it.
//!
//! Readers take `&Project` snapshots through [`ProjectStore::project`];
//! writers go through [`ProjectStore::apply`] and the editor helpers. The
//! revision counter increases on every successful change, so consumers can
//! tell two snapshots apart without comparing content.

use crate::errors::StorageError;
use crate::file::ProjectFile;
use crate::mutations::{MutationError, ProjectMutation};
use crate::project::Project;
use crate::storage::ProjectStorage;
use serde::{Deserialize, Serialize};

/// Which files are open in the editor and which one has focus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub active_file_id: Option<String>,
    pub open_files: Vec<String>,
    pub sidebar_collapsed: bool,
    pub preview_visible: bool,
}

impl EditorState {
    fn for_project(project: &Project) -> Self {
        Self {
            active_file_id: project
                .active_file_id
                .clone()
                .or_else(|| project.files.first().map(|f| f.id.clone())),
            open_files: project
                .files
                .iter()
                .filter(|f| f.is_open)
                .map(|f| f.id.clone())
                .collect(),
            sidebar_collapsed: false,
            preview_visible: true,
        }
    }
}

pub struct ProjectStore<S: ProjectStorage> {
    project: Project,
    editor: EditorState,
    revision: u64,
    storage: S,
}

impl<S: ProjectStorage> ProjectStore<S> {
    /// Start with the seeded default project
    pub fn new(storage: S) -> Self {
        let project = Project::initial();
        Self {
            editor: EditorState::for_project(&project),
            project,
            revision: 0,
            storage,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace the current project with a freshly seeded one
    pub fn create_new_project(&mut self, name: &str) {
        self.set_current_project(Project::new(name));
    }

    /// Adopt a loaded, imported or server-returned project
    pub fn set_current_project(&mut self, project: Project) {
        tracing::debug!("Switching to project {} ({})", project.id, project.name);
        self.editor = EditorState::for_project(&project);
        self.project = project;
        self.revision += 1;
    }

    /// Apply a mutation and return the new revision.
    ///
    /// A failed mutation leaves project, editor state and revision untouched.
    pub fn apply(&mut self, mutation: ProjectMutation) -> Result<u64, MutationError> {
        mutation.apply(&mut self.project)?;
        self.project.touch();

        match &mutation {
            ProjectMutation::AddFile { file } => {
                self.push_open(&file.id);
                self.editor.active_file_id = Some(file.id.clone());
            }
            ProjectMutation::DeleteFile { file_id } => {
                self.editor.open_files.retain(|id| id != file_id);
                if self.editor.active_file_id.as_ref() == Some(file_id) {
                    self.editor.active_file_id = self.editor.open_files.first().cloned();
                }
            }
            ProjectMutation::SetActiveFile { file_id } => {
                self.editor.active_file_id = Some(file_id.clone());
            }
            _ => {}
        }

        self.revision += 1;
        Ok(self.revision)
    }

    /// Convenience for the sidebar's "new file" action
    pub fn add_file(&mut self, file: ProjectFile) -> Result<u64, MutationError> {
        self.apply(ProjectMutation::AddFile { file })
    }

    /// Open a file tab (if needed) and focus it
    pub fn open_file(&mut self, file_id: &str) {
        self.push_open(file_id);
        self.editor.active_file_id = Some(file_id.to_string());
    }

    /// Close a tab; closing the focused tab focuses the last remaining one
    pub fn close_file(&mut self, file_id: &str) {
        self.editor.open_files.retain(|id| id != file_id);
        if self.editor.active_file_id.as_deref() == Some(file_id) {
            self.editor.active_file_id = self.editor.open_files.last().cloned();
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.editor.sidebar_collapsed = !self.editor.sidebar_collapsed;
    }

    pub fn toggle_preview(&mut self) {
        self.editor.preview_visible = !self.editor.preview_visible;
    }

    pub fn save_to_storage(&mut self) -> Result<(), StorageError> {
        self.storage.save(&self.project)
    }

    /// Load the saved project if there is one. Returns whether it was found.
    pub fn load_from_storage(&mut self) -> Result<bool, StorageError> {
        match self.storage.load()? {
            Some(project) => {
                self.set_current_project(project);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop the saved copy and start over with a new seeded project
    pub fn clear_project(&mut self) -> Result<(), StorageError> {
        self.storage.clear()?;
        self.create_new_project(crate::defaults::DEFAULT_PROJECT_NAME);
        Ok(())
    }

    fn push_open(&mut self, file_id: &str) {
        if !self.editor.open_files.iter().any(|id| id == file_id) {
            self.editor.open_files.push(file_id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileKind;
    use crate::storage::MemoryStorage;

    fn store() -> ProjectStore<MemoryStorage> {
        ProjectStore::new(MemoryStorage::default())
    }

    #[test]
    fn test_store_starts_with_seed_project() {
        let store = store();
        assert_eq!(store.project().id, "default");
        assert_eq!(store.editor().active_file_id.as_deref(), Some("app-js"));
        assert_eq!(store.editor().open_files, vec!["app-js".to_string()]);
        assert!(store.editor().preview_visible);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_apply_bumps_revision_and_timestamp() {
        let mut store = store();
        let before = store.project().updated_at;

        let revision = store
            .apply(ProjectMutation::UpdateContent {
                file_id: "app-js".to_string(),
                content: "function App() { return null }".to_string(),
            })
            .unwrap();

        assert_eq!(revision, 1);
        assert!(store.project().updated_at >= before);
        assert_eq!(
            store.project().file("app-js").unwrap().content,
            "function App() { return null }"
        );
    }

    #[test]
    fn test_failed_mutation_keeps_revision() {
        let mut store = store();
        let result = store.apply(ProjectMutation::DeleteFile { file_id: "missing".to_string() });
        assert!(result.is_err());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_add_file_opens_and_focuses() {
        let mut store = store();
        let file = ProjectFile::scaffold("Header", FileKind::Component);
        let id = file.id.clone();
        store.add_file(file).unwrap();

        assert_eq!(store.editor().active_file_id.as_deref(), Some(id.as_str()));
        assert!(store.editor().open_files.contains(&id));
        assert_eq!(store.project().active_file_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_delete_focused_file_focuses_first_open() {
        let mut store = store();
        store.open_file("app-css");
        store.apply(ProjectMutation::DeleteFile { file_id: "app-css".to_string() }).unwrap();

        assert_eq!(store.editor().open_files, vec!["app-js".to_string()]);
        assert_eq!(store.editor().active_file_id.as_deref(), Some("app-js"));
    }

    #[test]
    fn test_close_file_focuses_last_open() {
        let mut store = store();
        store.open_file("app-css");
        store.close_file("app-css");
        assert_eq!(store.editor().active_file_id.as_deref(), Some("app-js"));

        store.close_file("app-js");
        assert!(store.editor().active_file_id.is_none());
        assert!(store.editor().open_files.is_empty());
    }

    #[test]
    fn test_open_file_twice_keeps_single_tab() {
        let mut store = store();
        store.open_file("app-css");
        store.open_file("app-css");
        assert_eq!(store.editor().open_files.len(), 2);
    }

    #[test]
    fn test_toggles() {
        let mut store = store();
        store.toggle_sidebar();
        store.toggle_preview();
        assert!(store.editor().sidebar_collapsed);
        assert!(!store.editor().preview_visible);
    }

    #[test]
    fn test_save_load_clear() {
        let mut store = store();
        store.apply(ProjectMutation::Rename { name: "Renamed".to_string() }).unwrap();
        store.save_to_storage().unwrap();
        let saved = store.project().clone();

        store.create_new_project("Other");
        assert_eq!(store.project().name, "Other");

        assert!(store.load_from_storage().unwrap());
        assert_eq!(store.project(), &saved);

        store.clear_project().unwrap();
        assert_eq!(store.project().name, "Untitled Project");
        assert!(!store.load_from_storage().unwrap());
    }
}
