//! Field checks shared by mutations, import and the remote service.
//!
//! Messages match what the persistence service reports for the same
//! problems, so a rejected edit reads the same locally and remotely.

use crate::file::ProjectFile;
use crate::project::Project;
use std::collections::HashSet;
use thiserror::Error;

pub const MAX_NAME_LEN: usize = 100;
pub const MIN_FONT_SIZE: u32 = 10;
pub const MAX_FONT_SIZE: u32 = 24;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Project name must be a non-empty string")]
    EmptyName,

    #[error("Project name must be less than 100 characters")]
    NameTooLong,

    #[error("Each file must have a valid id")]
    MissingFileId,

    #[error("Each file must have a valid name")]
    MissingFileName,

    #[error("Each file must have a valid path")]
    InvalidPath(String),

    #[error("Font size must be a number between 10 and 24")]
    FontSizeOutOfRange(u32),

    #[error("Duplicate file id: {0}")]
    DuplicateFileId(String),

    #[error("More than one active file")]
    MultipleActiveFiles,

    #[error("Active file does not exist: {0}")]
    DanglingActiveFile(String),
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }
    Ok(())
}

pub fn validate_font_size(size: u32) -> Result<(), ValidationError> {
    if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
        return Err(ValidationError::FontSizeOutOfRange(size));
    }
    Ok(())
}

pub fn validate_path(path: &str) -> Result<(), ValidationError> {
    if path.len() < 2 || !path.starts_with('/') {
        return Err(ValidationError::InvalidPath(path.to_string()));
    }
    Ok(())
}

pub fn validate_file(file: &ProjectFile) -> Result<(), ValidationError> {
    if file.id.trim().is_empty() {
        return Err(ValidationError::MissingFileId);
    }
    if file.name.trim().is_empty() {
        return Err(ValidationError::MissingFileName);
    }
    validate_path(&file.path)
}

/// Check every field and the cross-file invariants: unique ids, at most one
/// active file, and an active pointer that names an existing file.
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    validate_name(&project.name)?;
    validate_font_size(project.settings.font_size)?;

    let mut seen = HashSet::new();
    for file in &project.files {
        validate_file(file)?;
        if !seen.insert(file.id.as_str()) {
            return Err(ValidationError::DuplicateFileId(file.id.clone()));
        }
    }

    if project.files.iter().filter(|f| f.is_active).count() > 1 {
        return Err(ValidationError::MultipleActiveFiles);
    }

    if let Some(active) = &project.active_file_id {
        if !seen.contains(active.as_str()) {
            return Err(ValidationError::DanglingActiveFile(active.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileKind;

    #[test]
    fn test_name_rules() {
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
        assert_eq!(validate_name(&"x".repeat(101)), Err(ValidationError::NameTooLong));
        assert!(validate_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_font_size_bounds() {
        assert!(validate_font_size(10).is_ok());
        assert!(validate_font_size(24).is_ok());
        assert_eq!(validate_font_size(9), Err(ValidationError::FontSizeOutOfRange(9)));
        assert_eq!(validate_font_size(25), Err(ValidationError::FontSizeOutOfRange(25)));
    }

    #[test]
    fn test_seeded_project_is_valid() {
        assert!(validate_project(&Project::initial()).is_ok());
        assert!(validate_project(&Project::empty("p", "Empty")).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut project = Project::initial();
        project.files.push(ProjectFile::new("app-js", "Other.js", FileKind::Component, ""));
        assert_eq!(
            validate_project(&project),
            Err(ValidationError::DuplicateFileId("app-js".to_string()))
        );
    }

    #[test]
    fn test_two_active_files_rejected() {
        let mut project = Project::initial();
        project.files[1].is_active = true;
        assert_eq!(validate_project(&project), Err(ValidationError::MultipleActiveFiles));
    }

    #[test]
    fn test_dangling_active_pointer() {
        let mut project = Project::initial();
        project.active_file_id = Some("gone".to_string());
        assert_eq!(
            validate_project(&project),
            Err(ValidationError::DanglingActiveFile("gone".to_string()))
        );
    }

    #[test]
    fn test_path_must_be_rooted() {
        let mut file = ProjectFile::new("a", "App.js", FileKind::Component, "");
        file.path = "App.js".to_string();
        assert!(matches!(validate_file(&file), Err(ValidationError::InvalidPath(_))));
    }
}
