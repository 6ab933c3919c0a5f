use crate::defaults::{
    APP_CSS_ID, APP_JS_ID, DEFAULT_APP_CSS, DEFAULT_APP_JS, DEFAULT_PROJECT_NAME,
};
use crate::file::{FileKind, ProjectFile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Per-project editor settings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    pub theme: Theme,
    pub autosave: bool,
    /// Editor font size, 10 to 24 inclusive
    pub font_size: u32,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            autosave: true,
            font_size: 14,
        }
    }
}

/// A project: ordered files plus settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub files: Vec<ProjectFile>,

    /// `None` only when `files` is empty
    #[serde(default)]
    pub active_file_id: Option<String>,

    #[serde(default)]
    pub settings: ProjectSettings,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a project seeded with `App.js` and `App.css`
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self::seeded(format!("project-{}", now.timestamp_millis()), name, now)
    }

    /// The project shown when nothing has been created or loaded yet
    pub fn initial() -> Self {
        Self::seeded("default".to_string(), DEFAULT_PROJECT_NAME, Utc::now())
    }

    fn seeded(id: String, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        let mut app_js = ProjectFile::new(APP_JS_ID, "App.js", FileKind::Component, DEFAULT_APP_JS);
        app_js.is_open = true;
        app_js.is_active = true;

        let app_css = ProjectFile::new(APP_CSS_ID, "App.css", FileKind::Style, DEFAULT_APP_CSS);

        Self {
            id,
            name: name.into(),
            files: vec![app_js, app_css],
            active_file_id: Some(APP_JS_ID.to_string()),
            settings: ProjectSettings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Project with no files at all
    pub fn empty(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            files: Vec::new(),
            active_file_id: None,
            settings: ProjectSettings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn file(&self, file_id: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.id == file_id)
    }

    pub fn file_mut(&mut self, file_id: &str) -> Option<&mut ProjectFile> {
        self.files.iter_mut().find(|f| f.id == file_id)
    }

    pub fn file_by_name(&self, name: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn first_of_kind(&self, kind: FileKind) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.kind == kind)
    }

    pub fn active_file(&self) -> Option<&ProjectFile> {
        self.active_file_id.as_deref().and_then(|id| self.file(id))
    }

    /// Point the active pointer at `file_id` and sync every file's flag
    pub(crate) fn activate(&mut self, file_id: Option<&str>) {
        for file in &mut self.files {
            file.is_active = Some(file.id.as_str()) == file_id;
        }
        self.active_file_id = file_id.map(str::to_string);
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
