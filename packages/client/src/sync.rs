//! Save and load the current project against a [`ProjectService`].

use crate::api::{CreateProjectRequest, ProjectPatch};
use crate::errors::{ServiceError, SyncError};
use crate::service::ProjectService;
use cipherstudio_project::{ProjectStorage, ProjectStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The server already knew the project and now has the local copy
    Updated,

    /// The server did not know the project; the store switched to the
    /// server-assigned project with this id
    Created { project_id: String },
}

impl SaveOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SaveOutcome::Updated => "Project updated successfully!",
            SaveOutcome::Created { .. } => "Project created on backend and saved successfully!",
        }
    }
}

/// Push the current project to the server.
///
/// An existing project is updated in place. An unknown id creates a new
/// project and the store adopts whatever the server returns. Either way the
/// result is also written to local storage.
pub async fn save_project<P, S>(
    service: &P,
    store: &mut ProjectStore<S>,
) -> Result<SaveOutcome, SyncError>
where
    P: ProjectService + ?Sized,
    S: ProjectStorage,
{
    let id = store.project().id.clone();

    match service.get_project(&id).await {
        Ok(_) => {
            let response = service
                .update_project(&id, &ProjectPatch::full(store.project()))
                .await?;
            if !response.success {
                return Err(SyncError::Rejected(
                    "Failed to update project on backend".to_string(),
                ));
            }

            store.save_to_storage()?;
            tracing::info!("Updated project {} on backend", id);
            Ok(SaveOutcome::Updated)
        }
        Err(ServiceError::NotFound(_)) => {
            let response = service
                .create_project(&CreateProjectRequest::from_project(store.project()))
                .await?;

            let project = match (response.success, response.project, response.project_id) {
                (true, Some(project), _) => project,
                (true, None, Some(project_id)) => service
                    .get_project(&project_id)
                    .await?
                    .project
                    .ok_or_else(|| {
                        SyncError::Rejected("Project created but failed to fetch project data".to_string())
                    })?,
                _ => {
                    return Err(SyncError::Rejected(
                        "Failed to save project to backend".to_string(),
                    ))
                }
            };

            let project_id = project.id.clone();
            store.set_current_project(project);
            store.save_to_storage()?;
            tracing::info!("Created project {} on backend (was {})", project_id, id);
            Ok(SaveOutcome::Created { project_id })
        }
        Err(e) => Err(e.into()),
    }
}

/// Replace the current project with the server's copy of `id`
pub async fn load_project<P, S>(
    service: &P,
    store: &mut ProjectStore<S>,
    id: &str,
) -> Result<(), SyncError>
where
    P: ProjectService + ?Sized,
    S: ProjectStorage,
{
    let response = service.get_project(id).await?;
    match response.project {
        Some(project) if response.success => {
            tracing::info!("Loaded project {} from backend", project.id);
            store.set_current_project(project);
            Ok(())
        }
        _ => Err(SyncError::Rejected("Project not found".to_string())),
    }
}
