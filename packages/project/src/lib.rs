//! # CipherStudio Project
//!
//! In-memory project document and the state container that owns it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ ProjectStore: the one current Project       │
//! │  - typed mutations (ProjectMutation)        │
//! │  - editor state (open / active files)       │
//! │  - local save / load / clear                │
//! └─────────────────────────────────────────────┘
//!                     ↓ snapshot
//! ┌─────────────────────────────────────────────┐
//! │ compiler-preview: Project → HTML document   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! UI code never touches `Project` fields directly; every change goes
//! through [`ProjectStore::apply`], which validates the mutation, applies it,
//! refreshes `updated_at` and bumps the store revision.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cipherstudio_project::{MemoryStorage, ProjectMutation, ProjectStore};
//!
//! let mut store = ProjectStore::new(MemoryStorage::default());
//! store.apply(ProjectMutation::UpdateContent {
//!     file_id: "app-js".to_string(),
//!     content: "function App() { return null }".to_string(),
//! })?;
//! store.save_to_storage()?;
//! ```

pub mod defaults;
mod errors;
mod file;
pub mod io;
mod mutations;
mod project;
mod storage;
mod store;
pub mod validation;

pub use errors::{ImportError, ProjectError, StorageError};
pub use file::{FileKind, ProjectFile};
pub use io::{export_file_name, export_json, import_json};
pub use mutations::{FilePatch, MutationError, ProjectMutation, SettingsPatch};
pub use project::{Project, ProjectSettings, Theme};
pub use storage::{FileStorage, MemoryStorage, ProjectStorage};
pub use store::{EditorState, ProjectStore};
pub use validation::ValidationError;
