//! Request and response bodies of the project and auth endpoints.

use chrono::{DateTime, Utc};
use cipherstudio_project::{Project, ProjectFile, ProjectSettings};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub files: Vec<ProjectFile>,
    pub settings: ProjectSettings,
}

impl CreateProjectRequest {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            files: project.files.clone(),
            settings: project.settings.clone(),
        }
    }
}

/// Fields to replace on the server; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<ProjectFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProjectSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_file_id: Option<String>,
}

impl ProjectPatch {
    /// Everything the save action sends
    pub fn full(project: &Project) -> Self {
        Self {
            name: Some(project.name.clone()),
            files: Some(project.files.clone()),
            settings: Some(project.settings.clone()),
            active_file_id: project.active_file_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
    pub has_more: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<ProjectSummary>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_omits_absent_fields() {
        let patch = ProjectPatch {
            name: Some("Renamed".to_string()),
            ..ProjectPatch::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"name":"Renamed"}"#);
    }

    #[test]
    fn test_full_patch_uses_camel_case() {
        let value = serde_json::to_value(ProjectPatch::full(&Project::initial())).unwrap();
        assert_eq!(value["activeFileId"], "app-js");
        assert_eq!(value["files"][0]["type"], "component");
        assert_eq!(value["settings"]["fontSize"], 14);
    }

    #[test]
    fn test_server_project_with_extra_fields() {
        let body = r#"{
            "success": true,
            "projectId": "5f0c",
            "project": {
                "_id": "65a1", "__v": 0,
                "id": "5f0c", "name": "Remote",
                "files": [{"id": "a", "name": "App.js", "content": "", "type": "component", "path": "/App.js", "isOpen": true, "isActive": true}],
                "activeFileId": "a",
                "settings": {"theme": "dark", "autosave": true, "fontSize": 16},
                "createdAt": "2024-01-02T03:04:05.000Z",
                "updatedAt": "2024-01-02T03:04:05.000Z"
            }
        }"#;

        let response: ProjectResponse = serde_json::from_str(body).unwrap();
        let project = response.project.unwrap();
        assert_eq!(response.project_id.as_deref(), Some("5f0c"));
        assert_eq!(project.name, "Remote");
        assert_eq!(project.settings.font_size, 16);
    }

    #[test]
    fn test_list_response() {
        let body = r#"{"success": true, "projects": [{"id": "p", "name": "P"}],
            "pagination": {"total": 1, "limit": 10, "offset": 0, "hasMore": false}}"#;
        let list: ProjectList = serde_json::from_str(body).unwrap();
        assert_eq!(list.projects[0].id, "p");
        assert_eq!(list.pagination.total, 1);
        assert!(!list.pagination.has_more);
    }
}
