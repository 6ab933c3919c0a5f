//! JSON export and import of a whole project.
//!
//! Export is pretty-printed JSON of the project as-is. Import checks the
//! structural minimum first (so a random JSON file gets a clear message
//! rather than a serde path), then decodes and validates the invariants.

use crate::errors::ImportError;
use crate::project::Project;
use crate::validation::validate_project;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

pub fn export_json(project: &Project) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(project)
}

/// Download name for an exported project: whitespace runs become `_`
pub fn export_file_name(project: &Project) -> String {
    format!("{}.json", WHITESPACE.replace_all(&project.name, "_"))
}

pub fn import_json(json: &str) -> Result<Project, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    check_shape(&value)?;

    let project: Project = serde_json::from_value(value)?;
    validate_project(&project)?;

    tracing::debug!(
        "Imported project {} with {} files",
        project.id,
        project.files.len()
    );

    Ok(project)
}

fn check_shape(value: &Value) -> Result<(), ImportError> {
    let has_text = |v: &Value, key: &str| {
        v.get(key)
            .and_then(Value::as_str)
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    };

    if !has_text(value, "id") || !has_text(value, "name") {
        return Err(ImportError::InvalidProject);
    }

    let files = value
        .get("files")
        .and_then(Value::as_array)
        .ok_or(ImportError::InvalidProject)?;

    let well_formed = files.iter().all(|file| {
        has_text(file, "id")
            && has_text(file, "name")
            && has_text(file, "path")
            && file.get("content").map(Value::is_string).unwrap_or(false)
    });

    if !well_formed {
        return Err(ImportError::MalformedFiles);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name() {
        let mut project = Project::initial();
        project.name = "My  Cool\tProject".to_string();
        assert_eq!(export_file_name(&project), "My_Cool_Project.json");
    }

    #[test]
    fn test_export_file_name_keeps_edge_whitespace() {
        let mut project = Project::initial();
        project.name = " Demo App\n".to_string();
        assert_eq!(export_file_name(&project), "_Demo_App_.json");
    }

    #[test]
    fn test_import_rejects_missing_id() {
        let json = r#"{"name":"P","files":[]}"#;
        assert!(matches!(import_json(json), Err(ImportError::InvalidProject)));
    }

    #[test]
    fn test_import_rejects_non_array_files() {
        let json = r#"{"id":"p","name":"P","files":{}}"#;
        assert!(matches!(import_json(json), Err(ImportError::InvalidProject)));
    }

    #[test]
    fn test_import_rejects_file_without_content() {
        let json = r#"{"id":"p","name":"P","files":[{"id":"a","name":"App.js","path":"/App.js"}]}"#;
        assert!(matches!(import_json(json), Err(ImportError::MalformedFiles)));
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        assert!(matches!(import_json("{not json"), Err(ImportError::Json(_))));
    }

    #[test]
    fn test_import_runs_invariant_checks() {
        let json = r#"{"id":"p","name":"P","activeFileId":"x","files":[
            {"id":"a","name":"App.js","path":"/App.js","content":""}
        ]}"#;
        assert!(matches!(import_json(json), Err(ImportError::Validation(_))));
    }

    #[test]
    fn test_import_regenerates_missing_timestamps() {
        let json = r#"{"id":"p","name":"P","files":[
            {"id":"a","name":"App.js","path":"/App.js","content":"x","type":"component"}
        ]}"#;
        let project = import_json(json).unwrap();
        assert_eq!(project.files[0].content, "x");
        assert!((chrono::Utc::now() - project.created_at).num_seconds() < 5);
    }
}
