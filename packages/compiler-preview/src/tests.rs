use crate::{
    build_document, transform_source, BuildOptions, RuntimeUrls, SourceOrigin,
    PLACEHOLDER_COMPONENT,
};
use cipherstudio_project::defaults::{DEFAULT_APP_CSS, DEFAULT_APP_JS};
use cipherstudio_project::{FileKind, Project, ProjectFile};

fn project_with(app_js: &str, app_css: &str) -> Project {
    let mut project = Project::empty("p-1", "Fixture");
    project
        .files
        .push(ProjectFile::new("js", "App.js", FileKind::Component, app_js));
    project
        .files
        .push(ProjectFile::new("css", "App.css", FileKind::Style, app_css));
    project
}

fn between<'a>(html: &'a str, start: &str, end: &str) -> &'a str {
    let from = html.find(start).expect("start marker") + start.len();
    let len = html[from..].find(end).expect("end marker");
    &html[from..from + len]
}

#[test]
fn test_document_structure() {
    let doc = build_document(&Project::initial(), 1, &BuildOptions::default());

    println!("Generated HTML:\n{}", doc.html);

    assert!(doc.html.starts_with("<!doctype html>\n<html>\n"));
    assert!(doc.html.contains(r#"<div id="root"></div>"#));
    assert!(doc.html.contains(r#"<div id="__preview_error""#));
    assert!(doc.html.contains("https://unpkg.com/react@18/umd/react.development.js"));
    assert!(doc.html.contains("https://unpkg.com/react-dom@18/umd/react-dom.development.js"));
    assert!(doc.html.contains("https://unpkg.com/@babel/standalone/babel.min.js"));
    assert!(doc.html.contains("window.addEventListener('unhandledrejection'"));
    assert!(doc.html.contains(r#"<script type="text/babel">"#));
    assert!(doc.html.trim_end().ends_with("</html>"));
}

#[test]
fn test_stylesheet_and_script_are_inlined_verbatim() {
    let app_js = "import React from 'react';\nexport default function App() {\n  return <h1>Hi</h1>;\n}";
    let app_css = "body { color: red; }";
    let doc = build_document(&project_with(app_js, app_css), 3, &BuildOptions::default());

    let style = between(&doc.html, "<style id=\"app-css\">\n", "\n    </style>");
    assert_eq!(style, app_css);

    let script = between(&doc.html, "<script type=\"text/babel\">\n", "\n\ntry {");
    assert_eq!(script, transform_source(app_js).code);
}

#[test]
fn test_base_style_precedes_user_stylesheet() {
    let doc = build_document(&project_with("function App(){}", "h1{}"), 1, &BuildOptions::default());
    let base = doc.html.find("html,body,#root{height:100%;margin:0}").unwrap();
    let user = doc.html.find("h1{}").unwrap();
    assert!(base < user);
}

#[test]
fn test_empty_project_uses_defaults() {
    let doc = build_document(&Project::empty("empty", "Empty"), 1, &BuildOptions::default());

    assert_eq!(doc.entry, SourceOrigin::BuiltIn);
    assert_eq!(doc.stylesheet, SourceOrigin::BuiltIn);
    assert_eq!(doc.transform, transform_source(DEFAULT_APP_JS));
    assert!(doc.html.contains(DEFAULT_APP_CSS.trim()));
    assert!(doc.html.contains("function App()"));
}

#[test]
fn test_blank_entry_mounts_placeholder() {
    let doc = build_document(&project_with("  \n", ""), 1, &BuildOptions::default());

    assert!(doc.transform.placeholder);
    assert!(doc.html.contains(PLACEHOLDER_COMPONENT));
    assert!(doc.html.contains("typeof App === 'function'"));
}

#[test]
fn test_every_document_has_mount_fallbacks() {
    let sources = [
        "",
        "const x = 1;",
        "export default React.memo(() => null);",
        "function App(){ return null }\nexport default App; // entry",
        "export default class extends React.Component {}",
        "class Widget extends React.Component {}",
        "this is not javascript {{{",
    ];

    for source in sources {
        let doc = build_document(&project_with(source, ""), 1, &BuildOptions::default());
        assert!(doc.html.contains("ReactDOM.createRoot(document.getElementById('root'))"));
        assert!(doc.html.contains("typeof App === 'function'"));
        assert!(doc.html.contains("typeof __previewDefault !== 'undefined'"));
        assert!(doc.html.contains("No renderable App found"));
        assert!(!doc.transform.code.contains("export"), "source: {:?}", source);
        assert!(!doc.html.contains("typeof extends"));
    }
}

#[test]
fn test_discovered_entry_name_is_tried_first() {
    let doc = build_document(
        &project_with("export default function Dashboard() { return null }", ""),
        1,
        &BuildOptions::default(),
    );

    let named = doc.html.find("if (typeof Dashboard === 'function')").unwrap();
    let app = doc.html.find("} else if (typeof App === 'function')").unwrap();
    assert!(named < app);
    assert!(doc.html.contains("React.createElement(Dashboard)"));
}

#[test]
fn test_messages_carry_rebuild_id() {
    let doc = build_document(&Project::initial(), 42, &BuildOptions::default());

    assert_eq!(doc.rebuild_id, 42);
    assert!(doc.html.contains("{ type: 'preview-ready', rebuildId: 42 }"));
    assert!(doc.html.contains("rebuildId: 42 }, '*')"));
    assert!(doc.html.contains("type: 'preview-error'"));
}

#[test]
fn test_user_text_cannot_close_enclosing_elements() {
    let app_js = "const s = '</script><script>alert(1)</script>';\nfunction App(){ return null }";
    let app_css = "/* </style><script>alert(2)</script> */";
    let doc = build_document(&project_with(app_js, app_css), 1, &BuildOptions::default());

    assert_eq!(doc.html.matches("</style>").count(), 2);
    assert_eq!(doc.html.matches("</script>").count(), 5);
    assert!(doc.html.contains(r"'<\/script><script>alert(1)<\/script>'"));
    assert!(doc.html.contains(r"/* <\/style><script>alert(2)<\/script> */"));
}

#[test]
fn test_build_is_deterministic() {
    let project = Project::initial();
    let options = BuildOptions::default();

    let first = build_document(&project, 7, &options);
    for _ in 0..5 {
        assert_eq!(build_document(&project, 7, &options), first);
    }
}

#[test]
fn test_custom_runtime_urls() {
    let options = BuildOptions {
        runtime: RuntimeUrls {
            react: "/vendor/react.js".to_string(),
            react_dom: "/vendor/react-dom.js".to_string(),
            babel: "/vendor/babel.js".to_string(),
        },
        ..BuildOptions::default()
    };
    let doc = build_document(&Project::initial(), 1, &options);

    assert!(doc.html.contains(r#"<script crossorigin src="/vendor/react.js"></script>"#));
    assert!(doc.html.contains(r#"<script src="/vendor/babel.js"></script>"#));
    assert!(!doc.html.contains("unpkg.com"));
}

#[test]
fn test_transform_is_idempotent() {
    let sources = [
        DEFAULT_APP_JS,
        "import { a,\n b } from './x';\nexport const a = 1;\nexport { a as b };\nexport default function () {}",
        "function Main() {}\nexport default Main;\r\n",
        "function App(){ return null }\nexport default App; // entry",
        "export default React.memo(App);",
        "export default class extends React.Component {}",
        "",
    ];

    for source in sources {
        let once = transform_source(source);
        let twice = transform_source(&once.code);
        assert_eq!(twice.code, once.code, "source: {:?}", source);
    }
}
