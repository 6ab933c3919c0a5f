//! # Source Transformer
//!
//! Makes a React component module runnable as a plain (non-module) script
//! in a page that already has `React` and `ReactDOM` as globals.
//!
//! This is deliberately regex-level text surgery, not a parser. Rules run in
//! order:
//!
//! 1. line-level `import …` statements are removed
//! 2. `export default function Name` / `export default class Name` lose the
//!    export; an anonymous default function or class is named `App`
//! 3. `export default Name;` statements are removed
//! 4. any other `export default <expression>` is assigned to
//!    [`DEFAULT_BINDING`]
//! 5. `export { … }` blocks and `export * from …` re-exports are removed
//! 6. `export` in front of a declaration is dropped
//!
//! Every removal keeps the line breaks it spanned, so line numbers in
//! runtime errors still point at the author's text. Malformed input is not
//! detected here; it fails later inside the rendering surface.

use regex::{Captures, NoExpand, Regex};
use std::sync::LazyLock;

/// Component rendered when there is no usable source at all
pub const PLACEHOLDER_COMPONENT: &str = "function App(){ return React.createElement('div',{style:{padding:20,color:'#fff'}}, 'No App source available to render') }";

static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*import\b(?:[^;{\n]*\{[^}]*\})?[^;\n]*;?").expect("import pattern")
});

static DEFAULT_ANONYMOUS_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport[ \t]+default[ \t]+(async[ \t]+)?function[ \t]*\(")
        .expect("anonymous default pattern")
});

static DEFAULT_ANONYMOUS_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport[ \t]+default[ \t]+class\b[ \t]*(extends\b|\{)")
        .expect("anonymous default class pattern")
});

static DEFAULT_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport[ \t]+default[ \t]+((?:async[ \t]+)?function|class)[ \t]+([A-Za-z_$][\w$]*)")
        .expect("default declaration pattern")
});

static DEFAULT_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\bexport[ \t]+default[ \t]+([A-Za-z_$][\w$]*)[ \t]*(?:;|(//[^\n]*)|\r?$)")
        .expect("default identifier pattern")
});

static DEFAULT_EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport[ \t]+default\b[ \t]*").expect("default expression pattern")
});

static NAMED_EXPORTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\bexport[ \t]*(?:\{[^}]*\}|\*(?:[ \t]+as[ \t]+[A-Za-z_$][\w$]*)?)(?:[ \t]*from[ \t]*['"][^'"\n]*['"])?[ \t]*;?"#,
    )
    .expect("named export pattern")
});

static EXPORTED_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)export[ \t]+((?:async[ \t]+)?(?:const|let|var|function|class)\b)")
        .expect("exported declaration pattern")
});

/// Global the value of `export default <expression>` is assigned to
pub const DEFAULT_BINDING: &str = "__previewDefault";

/// Result of transforming one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// Script text, never empty
    pub code: String,

    /// Component name taken from the default export, if one was found
    pub entry_name: Option<String>,

    /// Whether [`PLACEHOLDER_COMPONENT`] was substituted
    pub placeholder: bool,
}

/// Transform one component source file into script text
pub fn transform_source(source: &str) -> TransformOutput {
    let mut entry_name = None;

    let code = IMPORT.replace_all(source, keep_line_breaks);

    let code = DEFAULT_ANONYMOUS_FUNCTION.replace_all(&code, |caps: &Captures| {
        entry_name.get_or_insert_with(|| "App".to_string());
        format!("{}function App(", caps.get(1).map_or("", |m| m.as_str()))
    });

    let code = DEFAULT_ANONYMOUS_CLASS.replace_all(&code, |caps: &Captures| {
        entry_name.get_or_insert_with(|| "App".to_string());
        format!("class App {}", &caps[1])
    });

    let code = DEFAULT_DECLARATION.replace_all(&code, |caps: &Captures| {
        entry_name.get_or_insert_with(|| caps[2].to_string());
        format!("{} {}", &caps[1], &caps[2])
    });

    let code = DEFAULT_IDENTIFIER.replace_all(&code, |caps: &Captures| {
        entry_name.get_or_insert_with(|| caps[1].to_string());
        // Keep a trailing line comment
        caps.get(2).map_or("", |m| m.as_str()).to_string()
    });

    let assignment = format!("var {} = ", DEFAULT_BINDING);
    let code = DEFAULT_EXPRESSION.replace_all(&code, NoExpand(&assignment));

    let code = NAMED_EXPORTS.replace_all(&code, keep_line_breaks);
    let code = EXPORTED_DECLARATION.replace_all(&code, "${1}${2}");

    if code.trim().is_empty() {
        tracing::debug!("Source is empty after transform, using placeholder component");
        return TransformOutput {
            code: PLACEHOLDER_COMPONENT.to_string(),
            entry_name: Some("App".to_string()),
            placeholder: true,
        };
    }

    TransformOutput {
        code: code.into_owned(),
        entry_name,
        placeholder: false,
    }
}

fn keep_line_breaks(caps: &Captures) -> String {
    "\n".repeat(caps[0].matches('\n').count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_imports_keeping_lines() {
        let source = "import React from 'react';\nimport './App.css';\nconst x = 1;";
        let out = transform_source(source);
        assert_eq!(out.code, "\n\nconst x = 1;");
    }

    #[test]
    fn test_strips_multiline_import() {
        let source = "import {\n  useState,\n  useEffect\n} from 'react';\nconst y = 2;";
        let out = transform_source(source);
        assert_eq!(out.code, "\n\n\n\nconst y = 2;");
        assert_eq!(out.code.lines().count(), source.lines().count());
    }

    #[test]
    fn test_import_without_semicolon() {
        let out = transform_source("import React from 'react'\nfunction App() {}");
        assert_eq!(out.code, "\nfunction App() {}");
    }

    #[test]
    fn test_identifier_starting_with_import_survives() {
        let out = transform_source("important();\nimported = true;");
        assert_eq!(out.code, "important();\nimported = true;");
    }

    #[test]
    fn test_export_default_function() {
        let out = transform_source("export default function Counter() {\n  return null;\n}");
        assert_eq!(out.code, "function Counter() {\n  return null;\n}");
        assert_eq!(out.entry_name.as_deref(), Some("Counter"));
    }

    #[test]
    fn test_export_default_class() {
        let out = transform_source("export default class Board extends React.Component {}");
        assert_eq!(out.code, "class Board extends React.Component {}");
        assert_eq!(out.entry_name.as_deref(), Some("Board"));
    }

    #[test]
    fn test_anonymous_default_function_is_named_app() {
        let out = transform_source("export default function () { return null }");
        assert_eq!(out.code, "function App() { return null }");
        assert_eq!(out.entry_name.as_deref(), Some("App"));
    }

    #[test]
    fn test_export_default_identifier() {
        let out = transform_source("function Main() {}\n\nexport default Main;");
        assert_eq!(out.code, "function Main() {}\n\n");
        assert_eq!(out.entry_name.as_deref(), Some("Main"));
    }

    #[test]
    fn test_anonymous_default_class_is_named_app() {
        let out = transform_source("export default class extends React.Component { render(){ return null } }");
        assert_eq!(out.code, "class App extends React.Component { render(){ return null } }");
        assert_eq!(out.entry_name.as_deref(), Some("App"));

        let out = transform_source("export default class{}");
        assert_eq!(out.code, "class App {}");
    }

    #[test]
    fn test_export_default_identifier_with_trailing_code() {
        let out = transform_source("function App(){ return null }\nexport default App; // entry");
        assert_eq!(out.code, "function App(){ return null }\n // entry");
        assert_eq!(out.entry_name.as_deref(), Some("App"));

        let out = transform_source("export default Main; boot()");
        assert_eq!(out.code, " boot()");
        assert_eq!(out.entry_name.as_deref(), Some("Main"));
    }

    #[test]
    fn test_export_default_identifier_before_comment() {
        let out = transform_source("export default Main // entry\nconst x = 1;");
        assert_eq!(out.code, "// entry\nconst x = 1;");
        assert_eq!(out.entry_name.as_deref(), Some("Main"));
    }

    #[test]
    fn test_export_default_expression_is_bound() {
        let out = transform_source("function App(){ return null }\nexport default React.memo(App);");
        assert_eq!(
            out.code,
            "function App(){ return null }\nvar __previewDefault = React.memo(App);"
        );
        assert_eq!(out.entry_name, None);

        let out = transform_source("export default () => <p/>;");
        assert_eq!(out.code, "var __previewDefault = () => <p/>;");
    }

    #[test]
    fn test_named_export_block() {
        let out = transform_source("function A() {}\nexport {\n  A,\n  A as B\n};\nexport * from './x';");
        assert_eq!(out.code, "function A() {}\n\n\n\n\n");
    }

    #[test]
    fn test_exported_declarations_keep_declaration() {
        let out = transform_source("export const size = 3;\n  export async function load() {}");
        assert_eq!(out.code, "const size = 3;\n  async function load() {}");
    }

    #[test]
    fn test_empty_source_uses_placeholder() {
        let out = transform_source("import React from 'react';\n\n   ");
        assert!(out.placeholder);
        assert_eq!(out.code, PLACEHOLDER_COMPONENT);
        assert_eq!(out.entry_name.as_deref(), Some("App"));
    }

    #[test]
    fn test_default_seed_component() {
        let out = transform_source(cipherstudio_project::defaults::DEFAULT_APP_JS);
        assert!(!out.code.contains("import"));
        assert!(!out.code.contains("export"));
        assert!(out.code.contains("function App()"));
        assert_eq!(out.entry_name.as_deref(), Some("App"));
        assert_eq!(
            out.code.matches('\n').count(),
            cipherstudio_project::defaults::DEFAULT_APP_JS.matches('\n').count()
        );
    }
}
