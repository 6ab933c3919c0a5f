pub mod build;
pub mod check;
pub mod init;
pub mod serve;
pub mod sync;

pub use build::{build, BuildArgs};
pub use check::{check, CheckArgs};
pub use init::{init, InitArgs};
pub use serve::{serve, ServeArgs};
pub use sync::{pull, push, PullArgs, PushArgs};

use anyhow::{Context, Result};
use cipherstudio_project::{import_json, Project};
use std::path::Path;

/// Read and validate a project JSON file
pub(crate) fn read_project(path: &Path) -> Result<Project> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read project file {}", path.display()))?;
    import_json(&content).with_context(|| format!("Invalid project file {}", path.display()))
}
