use crate::input::{PreviewBuildInput, SourceOrigin};
use crate::transform::{transform_source, TransformOutput, DEFAULT_BINDING};
use cipherstudio_project::Project;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const BASE_STYLE: &str = "html,body,#root{height:100%;margin:0} body{background:#0b1220;color:#e6eef8;font-family:Inter, ui-sans-serif, system-ui, -apple-system, 'Segoe UI', Roboto, 'Helvetica Neue', Arial;}";

const ERROR_OVERLAY_STYLE: &str = "display:none;position:fixed;inset:10px;padding:12px;border-radius:8px;background:#2b0f0f;color:#ffd2d2;z-index:99999;overflow:auto;max-height:calc(100% - 20px)";

/// Id of the element runtime errors are written into
pub const ERROR_OVERLAY_ID: &str = "__preview_error";

/// Id of the `<style>` element holding the project stylesheet
pub const STYLESHEET_ID: &str = "app-css";

static CLOSING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(script|style)").expect("closing tag pattern"));

/// Where the document loads its runtime libraries from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeUrls {
    pub react: String,
    pub react_dom: String,
    pub babel: String,
}

impl Default for RuntimeUrls {
    fn default() -> Self {
        Self {
            react: "https://unpkg.com/react@18/umd/react.development.js".to_string(),
            react_dom: "https://unpkg.com/react-dom@18/umd/react-dom.development.js".to_string(),
            babel: "https://unpkg.com/@babel/standalone/babel.min.js".to_string(),
        }
    }
}

/// Options for document building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub runtime: RuntimeUrls,
    /// Indentation string for the generated markup
    pub indent: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            runtime: RuntimeUrls::default(),
            indent: "  ".to_string(),
        }
    }
}

/// A complete, self-contained preview page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDocument {
    pub html: String,
    pub rebuild_id: u64,
    pub entry: SourceOrigin,
    pub stylesheet: SourceOrigin,
    pub transform: TransformOutput,
}

struct Context<'a> {
    options: &'a BuildOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a BuildOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        self.add_indent();
        self.add(text);
        self.add("\n");
    }

    /// Add a block of text as-is, starting at column 0
    fn add_block(&mut self, text: &str) {
        self.add(text);
        if !text.ends_with('\n') {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Build the preview page for `project`.
///
/// The result depends only on the project content, `rebuild_id` and the
/// options. Every project produces a document; missing entry or stylesheet
/// files fall back to the built-in defaults.
pub fn build_document(project: &Project, rebuild_id: u64, options: &BuildOptions) -> PreviewDocument {
    let input = PreviewBuildInput::from_project(project);
    let transform = transform_source(input.entry_source());

    tracing::debug!(
        "Building preview document for {} (rebuild {}, entry {:?})",
        project.id,
        rebuild_id,
        transform.entry_name
    );

    let mut ctx = Context::new(options);

    ctx.add_line("<!doctype html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(input.stylesheet_source(), &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line(r#"<div id="root"></div>"#);
    ctx.add_line(&format!(
        r#"<div id="{}" style="{}"></div>"#,
        ERROR_OVERLAY_ID, ERROR_OVERLAY_STYLE
    ));
    compile_runtime_scripts(&options.runtime, &mut ctx);
    compile_error_listener(&mut ctx);
    compile_bootstrap(&transform, rebuild_id, &mut ctx);
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    PreviewDocument {
        html: ctx.get_output(),
        rebuild_id,
        entry: input.entry,
        stylesheet: input.stylesheet,
        transform,
    }
}

/// Escape `</script` and `</style` so embedded text cannot close its element
pub fn escape_embedded(text: &str) -> String {
    CLOSING_TAG.replace_all(text, r"<\/$1").into_owned()
}

fn compile_head(stylesheet: &str, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line(r#"<meta charset="utf-8" />"#);
    ctx.add_line(r#"<meta name="viewport" content="width=device-width, initial-scale=1" />"#);
    ctx.add_line(&format!("<style>{}</style>", BASE_STYLE));
    ctx.add_line(&format!(r#"<style id="{}">"#, STYLESHEET_ID));
    ctx.add_block(&escape_embedded(stylesheet));
    ctx.add_line("</style>");
    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_runtime_scripts(runtime: &RuntimeUrls, ctx: &mut Context) {
    ctx.add_line(&format!(
        r#"<script crossorigin src="{}"></script>"#,
        attribute(&runtime.react)
    ));
    ctx.add_line(&format!(
        r#"<script crossorigin src="{}"></script>"#,
        attribute(&runtime.react_dom)
    ));
    ctx.add_line(&format!(r#"<script src="{}"></script>"#, attribute(&runtime.babel)));
}

fn compile_error_listener(ctx: &mut Context) {
    ctx.add_line("<script>");
    ctx.indent();
    ctx.add_line("function showPreviewError(msg){");
    ctx.indent();
    ctx.add_line("try{");
    ctx.indent();
    ctx.add_line(&format!("var el = document.getElementById('{}');", ERROR_OVERLAY_ID));
    ctx.add_line("el.style.display = 'block';");
    ctx.add_line("el.textContent = msg;");
    ctx.dedent();
    ctx.add_line("}catch(e){ console.error(e) }");
    ctx.dedent();
    ctx.add_line("}");
    ctx.add_line("window.addEventListener('error', function(e){");
    ctx.indent();
    ctx.add_line("console.error('Preview runtime error', e.error || e.message);");
    ctx.add_line("showPreviewError('Runtime error: ' + ((e.error && e.error.stack) || e.message || e.error));");
    ctx.dedent();
    ctx.add_line("});");
    ctx.add_line("window.addEventListener('unhandledrejection', function(e){");
    ctx.indent();
    ctx.add_line("console.error('Unhandled rejection', e.reason);");
    ctx.add_line("showPreviewError('Unhandled rejection: ' + ((e.reason && e.reason.stack) || e.reason));");
    ctx.dedent();
    ctx.add_line("});");
    ctx.dedent();
    ctx.add_line("</script>");
}

fn compile_bootstrap(transform: &TransformOutput, rebuild_id: u64, ctx: &mut Context) {
    ctx.add_line(r#"<script type="text/babel">"#);

    // Author code keeps column 0 so runtime line numbers stay meaningful
    ctx.add_block(&escape_embedded(&transform.code));
    ctx.add("\n");

    ctx.add_block("try {");
    ctx.add_block("  const __previewRoot = ReactDOM.createRoot(document.getElementById('root'));");

    let mut branch = "if";
    if let Some(name) = transform.entry_name.as_deref().filter(|name| *name != "App") {
        ctx.add_block(&format!("  {} (typeof {} === 'function') {{", branch, name));
        ctx.add_block(&format!("    __previewRoot.render(React.createElement({}));", name));
        branch = "} else if";
    }
    ctx.add_block(&format!("  {} (typeof App === 'function') {{", branch));
    ctx.add_block("    __previewRoot.render(React.createElement(App));");
    ctx.add_block(&format!(
        "  }} else if (typeof {0} !== 'undefined' && {0}) {{",
        DEFAULT_BINDING
    ));
    ctx.add_block(&format!("    __previewRoot.render(React.createElement({}));", DEFAULT_BINDING));
    ctx.add_block("  } else {");
    ctx.add_block("    __previewRoot.render(React.createElement('div', {style:{padding:20}}, 'No renderable App found'));");
    ctx.add_block("  }");
    ctx.add_block(&format!(
        "  try {{ window.parent.postMessage({{ type: 'preview-ready', rebuildId: {} }}, '*') }} catch(e){{}}",
        rebuild_id
    ));
    ctx.add_block("} catch (err) {");
    ctx.add_block("  console.error('Preview mount error:', err);");
    ctx.add_block(&format!(
        "  try {{ var el = document.getElementById('{}'); el.style.display = 'block'; el.textContent = 'Preview mount error: ' + (err.stack || err.message) }} catch(e){{}}",
        ERROR_OVERLAY_ID
    ));
    ctx.add_block(&format!(
        "  try {{ window.parent.postMessage({{ type: 'preview-error', error: (err && (err.stack || err.message)) || String(err), rebuildId: {} }}, '*') }} catch(e){{}}",
        rebuild_id
    ));
    ctx.add_block("}");

    ctx.add_line("</script>");
}

fn attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
