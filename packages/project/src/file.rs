//! Virtual project files.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Advisory file category. Drives the default extension and template of new
/// files, never preview behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[default]
    Component,
    Style,
    Config,
    Other,
}

impl FileKind {
    /// Extension appended to new file names that have none
    pub fn default_extension(&self) -> &'static str {
        match self {
            FileKind::Component => ".jsx",
            FileKind::Style => ".css",
            FileKind::Config => ".json",
            FileKind::Other => ".txt",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Component => "component",
            FileKind::Style => "style",
            FileKind::Config => "config",
            FileKind::Other => "other",
        }
    }
}

impl std::str::FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "component" => Ok(FileKind::Component),
            "style" => Ok(FileKind::Style),
            "config" => Ok(FileKind::Config),
            "other" => Ok(FileKind::Other),
            other => Err(format!(
                "File type must be one of: component, style, config, other (got {})",
                other
            )),
        }
    }
}

/// One file of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    /// Stable for the lifetime of the file, unique within a project
    pub id: String,

    /// Display name including extension, e.g. `App.js`
    pub name: String,

    /// Raw source text
    #[serde(default)]
    pub content: String,

    #[serde(rename = "type", default)]
    pub kind: FileKind,

    /// Virtual path, always starting with `/`
    pub path: String,

    #[serde(default)]
    pub is_open: bool,

    #[serde(default)]
    pub is_active: bool,
}

impl ProjectFile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: FileKind,
        content: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            path: format!("/{}", name),
            name,
            content: content.into(),
            kind,
            is_open: false,
            is_active: false,
        }
    }

    /// Create a new file with a kind-specific template.
    ///
    /// Names without an extension get the kind's default one appended. The
    /// file starts open and active.
    pub fn scaffold(name: &str, kind: FileKind) -> Self {
        let name = name.trim();
        let file_name = if name.contains('.') {
            name.to_string()
        } else {
            format!("{}{}", name, kind.default_extension())
        };
        let content = template_for(kind, &file_name);

        let mut file = Self::new(
            format!("file-{}", Utc::now().timestamp_millis()),
            file_name,
            kind,
            content,
        );
        file.is_open = true;
        file.is_active = true;
        file
    }

    /// File name without directories, used to place the file under `/src/`
    pub fn basename(&self) -> &str {
        self.path
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(&self.name)
    }
}

fn template_for(kind: FileKind, file_name: &str) -> String {
    let component_name = strip_script_extension(file_name);

    match kind {
        FileKind::Component => format!(
            r#"import React from 'react';

function {name}() {{
  return (
    <div>
      <h2>{name}</h2>
      <p>This is a new React component.</p>
    </div>
  );
}}

export default {name};"#,
            name = component_name
        ),
        FileKind::Style => format!(
            "/* {} styles */\n\n.{} {{\n  /* Add your styles here */\n}}",
            file_name,
            component_name.to_lowercase()
        ),
        FileKind::Config => format!(
            "{{\n  \"name\": \"{}\",\n  \"version\": \"1.0.0\"\n}}",
            component_name
        ),
        FileKind::Other => format!("// {}\n\n// Add your content here", file_name),
    }
}

fn strip_script_extension(file_name: &str) -> &str {
    for ext in [".jsx", ".js", ".tsx", ".ts"] {
        if let Some(stem) = file_name.strip_suffix(ext) {
            return stem;
        }
    }
    file_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_appends_extension() {
        let file = ProjectFile::scaffold("Header", FileKind::Component);
        assert_eq!(file.name, "Header.jsx");
        assert_eq!(file.path, "/Header.jsx");
        assert!(file.id.starts_with("file-"));
        assert!(file.is_open && file.is_active);
        assert!(file.content.contains("function Header()"));
        assert!(file.content.ends_with("export default Header;"));
    }

    #[test]
    fn test_scaffold_keeps_explicit_extension() {
        let file = ProjectFile::scaffold("theme.scss", FileKind::Style);
        assert_eq!(file.name, "theme.scss");
        assert!(file.content.starts_with("/* theme.scss styles */"));
    }

    #[test]
    fn test_scaffold_config_template() {
        let file = ProjectFile::scaffold("package", FileKind::Config);
        assert_eq!(file.name, "package.json");
        let value: serde_json::Value = serde_json::from_str(&file.content).unwrap();
        assert_eq!(value["name"], "package.json");
        assert_eq!(value["version"], "1.0.0");
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let file = ProjectFile::new("a", "App.css", FileKind::Style, ".App {}");
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "style");
        assert_eq!(json["isOpen"], false);
        assert_eq!(json["path"], "/App.css");
    }

    #[test]
    fn test_basename_from_nested_path() {
        let mut file = ProjectFile::new("a", "Button.js", FileKind::Component, "");
        file.path = "/components/Button.js".to_string();
        assert_eq!(file.basename(), "Button.js");

        file.path = "/".to_string();
        assert_eq!(file.basename(), "Button.js");
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("config".parse::<FileKind>(), Ok(FileKind::Config));
        assert!("script".parse::<FileKind>().is_err());
    }
}
