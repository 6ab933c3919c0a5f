//! Virtual file map handed to the document builder.

use cipherstudio_project::defaults::{DEFAULT_APP_CSS, DEFAULT_APP_JS};
use cipherstudio_project::{FileKind, Project, ProjectFile};
use std::collections::BTreeMap;

pub const ENTRY_PATH: &str = "/src/App.js";
pub const STYLESHEET_PATH: &str = "/src/App.css";

const ROOT_INDEX: &str = r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './src/App';
import './src/App.css';

const root = ReactDOM.createRoot(document.getElementById('root'));
root.render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);"#;

const SRC_INDEX: &str = r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';
import './App.css';

const root = ReactDOM.createRoot(document.getElementById('root'));
root.render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);"#;

/// Where a build input entry came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    File { id: String, name: String },
    BuiltIn,
}

impl SourceOrigin {
    fn of(file: &ProjectFile) -> Self {
        SourceOrigin::File {
            id: file.id.clone(),
            name: file.name.clone(),
        }
    }
}

/// Path → content map derived from a project for one rebuild.
///
/// Project files are placed under `/src/` by basename. The entry component
/// and stylesheet always exist at [`ENTRY_PATH`] and [`STYLESHEET_PATH`],
/// and the two bootstrap files `/index.js` and `/src/index.js` are always
/// injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBuildInput {
    pub files: BTreeMap<String, String>,
    pub entry: SourceOrigin,
    pub stylesheet: SourceOrigin,
}

impl PreviewBuildInput {
    pub fn from_project(project: &Project) -> Self {
        let mut files = BTreeMap::new();

        for file in &project.files {
            files.insert(format!("/src/{}", file.basename()), file.content.clone());
        }

        let entry = select(project, "App.js", FileKind::Component);
        let stylesheet = select(project, "App.css", FileKind::Style);

        files.insert(
            ENTRY_PATH.to_string(),
            entry.map_or(DEFAULT_APP_JS, |f| f.content.as_str()).to_string(),
        );
        files.insert(
            STYLESHEET_PATH.to_string(),
            stylesheet.map_or(DEFAULT_APP_CSS, |f| f.content.as_str()).to_string(),
        );

        files.insert("/index.js".to_string(), ROOT_INDEX.to_string());
        files.insert("/src/index.js".to_string(), SRC_INDEX.to_string());

        Self {
            files,
            entry: entry.map_or(SourceOrigin::BuiltIn, SourceOrigin::of),
            stylesheet: stylesheet.map_or(SourceOrigin::BuiltIn, SourceOrigin::of),
        }
    }

    pub fn entry_source(&self) -> &str {
        self.files.get(ENTRY_PATH).map(String::as_str).unwrap_or(DEFAULT_APP_JS)
    }

    pub fn stylesheet_source(&self) -> &str {
        self.files
            .get(STYLESHEET_PATH)
            .map(String::as_str)
            .unwrap_or(DEFAULT_APP_CSS)
    }
}

/// File named `name`, else the first file of `kind`
fn select<'a>(project: &'a Project, name: &str, kind: FileKind) -> Option<&'a ProjectFile> {
    project
        .file_by_name(name)
        .or_else(|| project.first_of_kind(kind))
}
