//! Error types for project handling

use crate::mutations::MutationError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored project is invalid: {0}")]
    Invalid(#[from] ImportError),
}

/// Reasons an exported project file is rejected on import
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid project file")]
    InvalidProject,

    #[error("Invalid project file - files malformed")]
    MalformedFiles,

    #[error("Invalid project file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid project file: {0}")]
    Validation(#[from] ValidationError),
}
