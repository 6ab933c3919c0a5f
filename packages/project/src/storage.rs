//! Local persistence of the current project.

use crate::errors::StorageError;
use crate::io::{export_json, import_json};
use crate::project::Project;
use std::fs;
use std::path::PathBuf;

/// Single-slot store for the current project
pub trait ProjectStorage {
    fn save(&mut self, project: &Project) -> Result<(), StorageError>;

    /// `Ok(None)` when nothing has been saved
    fn load(&self) -> Result<Option<Project>, StorageError>;

    fn clear(&mut self) -> Result<(), StorageError>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ProjectStorage for FileStorage {
    fn save(&mut self, project: &Project) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, export_json(project)?)?;
        tracing::debug!("Saved project {} to {}", project.id, self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<Project>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(Some(import_json(&json)?))
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Keeps the serialized JSON in memory, so a load goes through the same
/// decode and validation path as a file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Option<String>,
}

impl MemoryStorage {
    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl ProjectStorage for MemoryStorage {
    fn save(&mut self, project: &Project) -> Result<(), StorageError> {
        self.slot = Some(export_json(project)?);
        Ok(())
    }

    fn load(&self) -> Result<Option<Project>, StorageError> {
        match &self.slot {
            Some(json) => Ok(Some(import_json(json)?)),
            None => Ok(None),
        }
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested").join("project.json"));

        assert!(storage.load().unwrap().is_none());

        let project = Project::new("Saved");
        storage.save(&project).unwrap();
        assert_eq!(storage.load().unwrap(), Some(project));

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
        // clearing twice is fine
        storage.clear().unwrap();
    }

    #[test]
    fn test_file_storage_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        fs::write(&path, "[]").unwrap();

        let storage = FileStorage::new(path);
        assert!(matches!(storage.load(), Err(StorageError::Invalid(_))));
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::default();
        let project = Project::initial();
        storage.save(&project).unwrap();
        assert!(storage.raw().unwrap().contains("\"activeFileId\""));
        assert_eq!(storage.load().unwrap(), Some(project));
    }
}
