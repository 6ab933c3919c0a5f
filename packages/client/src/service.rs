use crate::api::{AuthResponse, CreateProjectRequest, ProjectList, ProjectPatch, ProjectResponse};
use crate::errors::ServiceError;
use async_trait::async_trait;

/// Remote project persistence and account endpoints.
///
/// Callers only distinguish "not found" from everything else; see
/// [`ServiceError::is_not_found`].
#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<ProjectResponse, ServiceError>;

    async fn get_project(&self, id: &str) -> Result<ProjectResponse, ServiceError>;

    async fn update_project(
        &self,
        id: &str,
        patch: &ProjectPatch,
    ) -> Result<ProjectResponse, ServiceError>;

    async fn delete_project(&self, id: &str) -> Result<(), ServiceError>;

    async fn list_projects(&self, limit: u32, offset: u32) -> Result<ProjectList, ServiceError>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ServiceError>;

    async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AuthResponse, ServiceError>;
}
