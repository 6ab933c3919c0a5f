use crate::api::{
    AuthResponse, CreateProjectRequest, Pagination, ProjectList, ProjectPatch, ProjectResponse,
    ProjectSummary, User,
};
use crate::errors::ServiceError;
use crate::service::ProjectService;
use async_trait::async_trait;
use chrono::Utc;
use cipherstudio_project::validation::{validate_file, validate_font_size, validate_name};
use cipherstudio_project::{Project, ProjectFile, ProjectSettings, ValidationError};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    projects: BTreeMap<String, Project>,
    users: BTreeMap<String, (User, String)>,
    next_id: u64,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// In-process [`ProjectService`] with the same status semantics as the
/// REST backend. Used offline and in tests.
#[derive(Debug, Default)]
pub struct MemoryProjectService {
    state: Mutex<State>,
}

impl MemoryProjectService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a project as-is, keeping its id
    pub async fn insert(&self, project: Project) {
        self.state
            .lock()
            .await
            .projects
            .insert(project.id.clone(), project);
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.projects.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn bad_request(message: impl Into<String>) -> ServiceError {
    ServiceError::Remote {
        status: 400,
        message: message.into(),
    }
}

fn project_not_found() -> ServiceError {
    ServiceError::NotFound("Project not found".to_string())
}

fn validate_body(
    name: Option<&str>,
    files: Option<&[ProjectFile]>,
    settings: Option<&ProjectSettings>,
) -> Result<(), ValidationError> {
    if let Some(name) = name {
        validate_name(name)?;
    }
    for file in files.unwrap_or_default() {
        validate_file(file)?;
    }
    if let Some(settings) = settings {
        validate_font_size(settings.font_size)?;
    }
    Ok(())
}

#[async_trait]
impl ProjectService for MemoryProjectService {
    async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<ProjectResponse, ServiceError> {
        validate_body(Some(&request.name), Some(&request.files), Some(&request.settings))
            .map_err(|e| bad_request(e.to_string()))?;

        let mut state = self.state.lock().await;
        let id = state.next_id("project");

        let mut project = if request.files.is_empty() {
            let mut seeded = Project::initial();
            seeded.id = id.clone();
            seeded
        } else {
            let mut project = Project::empty(id.clone(), request.name.clone());
            project.files = request.files.clone();
            project.active_file_id = project
                .files
                .iter()
                .find(|f| f.is_active)
                .or_else(|| project.files.first())
                .map(|f| f.id.clone());
            project
        };
        project.name = request.name.clone();
        project.settings = request.settings.clone();

        tracing::debug!("Created project {} in memory", id);
        state.projects.insert(id.clone(), project.clone());

        Ok(ProjectResponse {
            success: true,
            project: Some(project),
            project_id: Some(id),
            message: None,
        })
    }

    async fn get_project(&self, id: &str) -> Result<ProjectResponse, ServiceError> {
        let state = self.state.lock().await;
        let project = state.projects.get(id).cloned().ok_or_else(project_not_found)?;

        Ok(ProjectResponse {
            success: true,
            project: Some(project),
            ..ProjectResponse::default()
        })
    }

    async fn update_project(
        &self,
        id: &str,
        patch: &ProjectPatch,
    ) -> Result<ProjectResponse, ServiceError> {
        validate_body(
            patch.name.as_deref(),
            patch.files.as_deref(),
            patch.settings.as_ref(),
        )
        .map_err(|e| bad_request(e.to_string()))?;

        let mut state = self.state.lock().await;
        let project = state.projects.get_mut(id).ok_or_else(project_not_found)?;

        if let Some(name) = &patch.name {
            project.name = name.clone();
        }
        if let Some(files) = &patch.files {
            project.files = files.clone();
        }
        if let Some(settings) = &patch.settings {
            project.settings = settings.clone();
        }
        if let Some(active_file_id) = &patch.active_file_id {
            project.active_file_id = Some(active_file_id.clone());
        }
        project.updated_at = Utc::now();

        Ok(ProjectResponse {
            success: true,
            project: Some(project.clone()),
            ..ProjectResponse::default()
        })
    }

    async fn delete_project(&self, id: &str) -> Result<(), ServiceError> {
        let mut state = self.state.lock().await;
        state.projects.remove(id).ok_or_else(project_not_found)?;
        Ok(())
    }

    async fn list_projects(&self, limit: u32, offset: u32) -> Result<ProjectList, ServiceError> {
        let state = self.state.lock().await;

        let mut projects: Vec<&Project> = state.projects.values().collect();
        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let total = projects.len() as u64;
        let page = projects
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|p| ProjectSummary {
                id: p.id.clone(),
                name: p.name.clone(),
                created_at: Some(p.created_at),
                updated_at: Some(p.updated_at),
            })
            .collect();

        Ok(ProjectList {
            projects: page,
            pagination: Pagination {
                total,
                limit,
                offset,
                has_more: u64::from(offset) + u64::from(limit) < total,
            },
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ServiceError> {
        if email.is_empty() || password.is_empty() {
            return Err(bad_request("Missing fields"));
        }

        let state = self.state.lock().await;
        match state.users.get(email) {
            Some((user, stored)) if stored == password => Ok(AuthResponse {
                success: true,
                user: Some(user.clone()),
                ..AuthResponse::default()
            }),
            _ => Err(ServiceError::Remote {
                status: 401,
                message: "Invalid credentials".to_string(),
            }),
        }
    }

    async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AuthResponse, ServiceError> {
        if email.is_empty() || name.is_empty() || password.is_empty() {
            return Err(bad_request("Missing fields"));
        }

        let mut state = self.state.lock().await;
        if state.users.contains_key(email) {
            return Err(ServiceError::Remote {
                status: 409,
                message: "Email already registered".to_string(),
            });
        }

        let user = User {
            id: state.next_id("user"),
            name: name.to_string(),
            email: Some(email.to_string()),
        };
        state
            .users
            .insert(email.to_string(), (user.clone(), password.to_string()));

        Ok(AuthResponse {
            success: true,
            user: Some(user),
            ..AuthResponse::default()
        })
    }
}
