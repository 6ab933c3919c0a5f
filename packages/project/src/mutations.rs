//! # Project Mutations
//!
//! Typed edit operations on the current project.
//!
//! ## Mutation Semantics
//!
//! ### AddFile
//! - Fails on a duplicate id or an unrooted path
//! - The new file becomes the active file
//!
//! ### UpdateFile / UpdateContent
//! - Atomic replacement of the patched fields
//! - Last write wins
//!
//! ### DeleteFile
//! - Removes the file
//! - If it was active, the first remaining file becomes active (none when
//!   the project is now empty)
//!
//! ### UpdateSettings
//! - Merges the patch into the current settings; font size stays in 10..=24

use crate::file::{FileKind, ProjectFile};
use crate::project::{Project, Theme};
use crate::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectMutation {
    Rename {
        name: String,
    },

    AddFile {
        file: ProjectFile,
    },

    /// Patch any subset of a file's fields
    UpdateFile {
        file_id: String,
        patch: FilePatch,
    },

    /// Replace a file's content (the editor's keystroke path)
    UpdateContent {
        file_id: String,
        content: String,
    },

    DeleteFile {
        file_id: String,
    },

    SetActiveFile {
        file_id: String,
    },

    UpdateSettings {
        patch: SettingsPatch,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePatch {
    pub name: Option<String>,
    pub path: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<FileKind>,
    pub is_open: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub autosave: Option<bool>,
    pub font_size: Option<u32>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("File id already exists: {0}")]
    DuplicateFileId(String),

    #[error("Invalid value: {0}")]
    Invalid(#[from] ValidationError),
}

impl ProjectMutation {
    /// Apply mutation to the project with validation.
    ///
    /// Nothing is changed when validation fails. Timestamps are left to the
    /// caller.
    pub fn apply(&self, project: &mut Project) -> Result<(), MutationError> {
        self.validate(project)?;

        match self {
            ProjectMutation::Rename { name } => {
                project.name = name.clone();
            }

            ProjectMutation::AddFile { file } => {
                project.files.push(file.clone());
                project.activate(Some(file.id.as_str()));
            }

            ProjectMutation::UpdateFile { file_id, patch } => {
                let file = Self::file_mut(project, file_id)?;
                if let Some(name) = &patch.name {
                    file.name = name.clone();
                }
                if let Some(path) = &patch.path {
                    file.path = path.clone();
                }
                if let Some(content) = &patch.content {
                    file.content = content.clone();
                }
                if let Some(kind) = patch.kind {
                    file.kind = kind;
                }
                if let Some(is_open) = patch.is_open {
                    file.is_open = is_open;
                }
            }

            ProjectMutation::UpdateContent { file_id, content } => {
                Self::file_mut(project, file_id)?.content = content.clone();
            }

            ProjectMutation::DeleteFile { file_id } => {
                project.files.retain(|f| &f.id != file_id);
                if project.active_file_id.as_deref() == Some(file_id.as_str()) {
                    let next = project.files.first().map(|f| f.id.clone());
                    project.activate(next.as_deref());
                }
            }

            ProjectMutation::SetActiveFile { file_id } => {
                project.activate(Some(file_id.as_str()));
            }

            ProjectMutation::UpdateSettings { patch } => {
                if let Some(theme) = patch.theme {
                    project.settings.theme = theme;
                }
                if let Some(autosave) = patch.autosave {
                    project.settings.autosave = autosave;
                }
                if let Some(font_size) = patch.font_size {
                    project.settings.font_size = font_size;
                }
            }
        }

        Ok(())
    }

    fn validate(&self, project: &Project) -> Result<(), MutationError> {
        match self {
            ProjectMutation::Rename { name } => validation::validate_name(name)?,

            ProjectMutation::AddFile { file } => {
                validation::validate_file(file)?;
                if project.file(&file.id).is_some() {
                    return Err(MutationError::DuplicateFileId(file.id.clone()));
                }
            }

            ProjectMutation::UpdateFile { file_id, patch } => {
                Self::require(project, file_id)?;
                if let Some(name) = &patch.name {
                    if name.trim().is_empty() {
                        return Err(ValidationError::MissingFileName.into());
                    }
                }
                if let Some(path) = &patch.path {
                    validation::validate_path(path)?;
                }
            }

            ProjectMutation::UpdateContent { file_id, .. }
            | ProjectMutation::DeleteFile { file_id }
            | ProjectMutation::SetActiveFile { file_id } => Self::require(project, file_id)?,

            ProjectMutation::UpdateSettings { patch } => {
                if let Some(font_size) = patch.font_size {
                    validation::validate_font_size(font_size)?;
                }
            }
        }

        Ok(())
    }

    fn require(project: &Project, file_id: &str) -> Result<(), MutationError> {
        project
            .file(file_id)
            .map(|_| ())
            .ok_or_else(|| MutationError::FileNotFound(file_id.to_string()))
    }

    fn file_mut<'a>(project: &'a mut Project, file_id: &str) -> Result<&'a mut ProjectFile, MutationError> {
        project
            .file_mut(file_id)
            .ok_or_else(|| MutationError::FileNotFound(file_id.to_string()))
    }
}
