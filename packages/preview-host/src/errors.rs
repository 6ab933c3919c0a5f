use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Rendering surface is closed")]
    Closed,

    #[error("Failed to mount preview document: {0}")]
    Mount(String),
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Nothing to refresh: no project has been rendered")]
    NoProject,

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
