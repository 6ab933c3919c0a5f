use crate::api::{
    AuthResponse, CreateProjectRequest, LoginRequest, ProjectList, ProjectPatch, ProjectResponse,
    RegisterRequest,
};
use crate::errors::ServiceError;
use crate::service::ProjectService;
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// [`ProjectService`] over the REST API
#[derive(Debug, Clone)]
pub struct HttpProjectService {
    client: Client,
    base_url: String,
}

impl Default for HttpProjectService {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl HttpProjectService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, ServiceError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("{} {}", method, url);

        let mut builder = self.client.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        decode_response(status, &text)
    }
}

/// Turn a status and body into a typed value or a [`ServiceError`].
///
/// Bodies that are empty or not JSON are read as `null`.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    text: &str,
) -> Result<T, ServiceError> {
    let data: Value = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text).unwrap_or(Value::Null)
    };

    if !status.is_success() {
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

        if status == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(message));
        }
        return Err(ServiceError::Remote {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_value(data)?)
}

#[async_trait]
impl ProjectService for HttpProjectService {
    async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<ProjectResponse, ServiceError> {
        self.request(Method::POST, "/projects", Some(request)).await
    }

    async fn get_project(&self, id: &str) -> Result<ProjectResponse, ServiceError> {
        self.request::<_, ()>(Method::GET, &format!("/projects/{}", id), None)
            .await
    }

    async fn update_project(
        &self,
        id: &str,
        patch: &ProjectPatch,
    ) -> Result<ProjectResponse, ServiceError> {
        self.request(Method::PUT, &format!("/projects/{}", id), Some(patch))
            .await
    }

    async fn delete_project(&self, id: &str) -> Result<(), ServiceError> {
        let _: Value = self
            .request::<_, ()>(Method::DELETE, &format!("/projects/{}", id), None)
            .await?;
        Ok(())
    }

    async fn list_projects(&self, limit: u32, offset: u32) -> Result<ProjectList, ServiceError> {
        self.request::<_, ()>(
            Method::GET,
            &format!("/projects?limit={}&offset={}", limit, offset),
            None,
        )
        .await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ServiceError> {
        let body = LoginRequest { email, password };
        self.request(Method::POST, "/auth/login", Some(&body)).await
    }

    async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AuthResponse, ServiceError> {
        let body = RegisterRequest {
            email,
            name,
            password,
        };
        self.request(Method::POST, "/auth/register", Some(&body)).await
    }
}
