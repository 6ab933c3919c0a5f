//! # CipherStudio Client
//!
//! Talks to the project persistence and auth backend.
//!
//! [`ProjectService`] is the seam: [`HttpProjectService`] speaks the REST
//! API, [`MemoryProjectService`] keeps everything in process. The
//! [`save_project`] and [`load_project`] flows work against either and keep
//! a [`ProjectStore`](cipherstudio_project::ProjectStore) in step with the
//! server.

pub mod api;
mod errors;
mod http;
mod memory;
mod service;
mod sync;

pub use api::{
    AuthResponse, CreateProjectRequest, Pagination, ProjectList, ProjectPatch, ProjectResponse,
    ProjectSummary, User,
};
pub use errors::{ServiceError, SyncError};
pub use http::{HttpProjectService, DEFAULT_API_URL};
pub use memory::MemoryProjectService;
pub use service::ProjectService;
pub use sync::{load_project, save_project, SaveOutcome};
