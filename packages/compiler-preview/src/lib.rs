//! # Preview Compiler
//!
//! Turns a [`Project`](cipherstudio_project::Project) into one standalone
//! HTML document that mounts the project's entry component.
//!
//! ```text
//! Project ──► PreviewBuildInput ──► transform_source ──► build_document
//!              (path → content)      (script text)        (HTML + runtime)
//! ```
//!
//! Building never fails. Missing entry or stylesheet files fall back to the
//! built-in defaults and an empty component is replaced by a placeholder.

mod cache;
mod document;
mod input;
mod transform;

pub use cache::{project_fingerprint, CacheKey, DocumentCache};
pub use document::{
    build_document, escape_embedded, BuildOptions, PreviewDocument, RuntimeUrls,
    ERROR_OVERLAY_ID, STYLESHEET_ID,
};
pub use input::{PreviewBuildInput, SourceOrigin, ENTRY_PATH, STYLESHEET_PATH};
pub use transform::{transform_source, TransformOutput, DEFAULT_BINDING, PLACEHOLDER_COMPONENT};

#[cfg(test)]
mod tests;
