use super::read_project;
use crate::config::Config;
use crate::watcher::ProjectWatcher;
use anyhow::Result;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};
use cipherstudio_compiler_preview::{BuildOptions, PreviewDocument};
use cipherstudio_preview_host::{
    Device, HostOptions, MessagePort, MountRequest, PreviewHost, PreviewState, PreviewStatus,
    RenderSurface, SurfaceError,
};
use clap::Args;
use colored::Colorize;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Project JSON file (defaults to the configured storage path)
    pub project: Option<String>,

    /// HTTP port
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,
}

/// Surface backed by the browser iframe: mounting publishes the document
/// for `/preview` to serve.
struct ServedSurface {
    documents: watch::Sender<Option<Arc<PreviewDocument>>>,
}

impl RenderSurface for ServedSurface {
    fn mount(&mut self, request: MountRequest) -> Result<(), SurfaceError> {
        if self.documents.is_closed() {
            return Err(SurfaceError::Closed);
        }
        self.documents.send_replace(Some(request.document));
        Ok(())
    }
}

enum HostCommand {
    Reload,
    Refresh,
}

#[derive(Clone)]
struct HttpState {
    documents: watch::Receiver<Option<Arc<PreviewDocument>>>,
    states: watch::Receiver<PreviewState>,
    port: MessagePort,
    commands: mpsc::UnboundedSender<HostCommand>,
}

pub async fn serve(args: ServeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let project_path = config.project_path(cwd, args.project.as_deref());
    let project = read_project(&project_path)?;

    let (documents_tx, documents_rx) = watch::channel(None);
    let mut host = PreviewHost::with_options(
        ServedSurface {
            documents: documents_tx,
        },
        HostOptions {
            timeout: config.preview_timeout(),
            build: BuildOptions {
                runtime: config.runtime.clone(),
                ..BuildOptions::default()
            },
        },
    );
    host.render(&project)?;

    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let state = HttpState {
        documents: documents_rx,
        states: host.subscribe(),
        port: host.message_port(),
        commands: commands_tx.clone(),
    };

    let mut watcher = ProjectWatcher::new(&project_path)?;
    let reload = commands_tx.clone();
    tokio::spawn(async move {
        while watcher.changed().await.is_some() {
            if reload.send(HostCommand::Reload).is_err() {
                break;
            }
        }
    });

    let host_handle = tokio::spawn(run_host(host, project_path.clone(), commands_rx));

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/preview", get(preview_handler))
        .route("/api/state", get(state_handler))
        .route("/api/status", post(status_handler))
        .route("/api/refresh", post(refresh_handler))
        .with_state(state);

    let addr = format!("127.0.0.1:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "{} {} ({})",
        "🚀 Serving".bright_blue().bold(),
        project.name.bold(),
        project_path.display()
    );
    println!("   http://{}", addr);
    println!("{}", "👀 Watching for changes...".bright_blue());

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        result = host_handle => {
            if let Err(e) = result {
                tracing::error!("Preview host stopped: {}", e);
            }
        }
    }

    Ok(())
}

async fn run_host(
    mut host: PreviewHost<ServedSurface>,
    project_path: PathBuf,
    mut commands: mpsc::UnboundedReceiver<HostCommand>,
) {
    loop {
        tokio::select! {
            state = host.next_transition() => log_state(&state),
            command = commands.recv() => {
                let Some(command) = command else { break };
                let result = match command {
                    HostCommand::Reload => reload(&mut host, &project_path),
                    HostCommand::Refresh => host.refresh().map_err(anyhow::Error::from),
                };
                if let Err(e) = result {
                    tracing::warn!("Preview not rebuilt: {:#}", e);
                }
            }
        }
    }
}

fn reload(host: &mut PreviewHost<ServedSurface>, project_path: &Path) -> Result<u64> {
    let project = read_project(project_path)?;
    if host.current_project() == Some(&project) {
        tracing::debug!("Project file touched without changes");
        return Ok(host.rebuild_id());
    }
    tracing::info!("Project changed, rebuilding preview");
    Ok(host.render(&project)?)
}

fn log_state(state: &PreviewState) {
    match state.status {
        PreviewStatus::Ready => println!(
            "  {} preview ready (rebuild {})",
            "✓".green(),
            state.rebuild_id
        ),
        PreviewStatus::Error => eprintln!(
            "  {} {} (rebuild {})",
            "✗".red(),
            state.message.red(),
            state.rebuild_id
        ),
        PreviewStatus::Loading => {}
    }
}

#[derive(Debug, Deserialize)]
struct IndexQuery {
    device: Option<Device>,
}

async fn index_handler(Query(query): Query<IndexQuery>) -> Html<String> {
    let device = query.device.unwrap_or_default();
    Html(INDEX_HTML.replace("{{WIDTH}}", device.css_width()))
}

async fn preview_handler(State(state): State<HttpState>) -> Result<Html<String>, StatusCode> {
    let document = state.documents.borrow().clone();
    document
        .map(|doc| Html(doc.html.clone()))
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

async fn state_handler(State(state): State<HttpState>) -> Json<PreviewState> {
    Json(state.states.borrow().clone())
}

async fn status_handler(State(state): State<HttpState>, Json(message): Json<Value>) -> StatusCode {
    if state.port.post(message) {
        StatusCode::ACCEPTED
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn refresh_handler(State(state): State<HttpState>) -> StatusCode {
    match state.commands.send(HostCommand::Refresh) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

const INDEX_HTML: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>CipherStudio Preview</title>
    <style>
      body{margin:0;background:#0f172a;color:#e2e8f0;font-family:system-ui,sans-serif}
      header{display:flex;gap:12px;align-items:center;padding:8px 12px;border-bottom:1px solid #1e293b}
      main{display:flex;justify-content:center;height:calc(100vh - 49px)}
      iframe{width:{{WIDTH}};max-width:100%;height:100%;border:none;background:#fff}
      #status{font-size:13px;opacity:.8}
    </style>
  </head>
  <body>
    <header>
      <strong>Preview</strong>
      <a href="/?device=desktop">desktop</a>
      <a href="/?device=tablet">tablet</a>
      <a href="/?device=mobile">mobile</a>
      <button id="retry">Retry</button>
      <span id="status">Loading preview...</span>
    </header>
    <main>
      <iframe id="frame" title="project-preview" src="/preview" sandbox="allow-scripts allow-modals allow-forms allow-same-origin"></iframe>
    </main>
    <script>
      var frame = document.getElementById('frame');
      var label = document.getElementById('status');
      var shown = null;
      window.addEventListener('message', function(e){
        if (e.source !== frame.contentWindow) return;
        fetch('/api/status', {method:'POST', headers:{'Content-Type':'application/json'}, body: JSON.stringify(e.data)});
      });
      document.getElementById('retry').addEventListener('click', function(){
        fetch('/api/refresh', {method:'POST'});
      });
      function poll(){
        fetch('/api/state').then(function(r){ return r.json() }).then(function(s){
          if (shown !== null && s.rebuildId !== shown) frame.src = '/preview?rebuild=' + s.rebuildId;
          shown = s.rebuildId;
          label.textContent = s.status === 'ready' ? 'Ready' : s.message;
        }).catch(function(){}).finally(function(){ setTimeout(poll, 500) });
      }
      poll();
    </script>
  </body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use cipherstudio_project::{export_json, Project, ProjectMutation};
    use serde_json::json;

    fn served_host() -> (
        PreviewHost<ServedSurface>,
        watch::Receiver<Option<Arc<PreviewDocument>>>,
    ) {
        let (tx, rx) = watch::channel(None);
        (PreviewHost::new(ServedSurface { documents: tx }), rx)
    }

    #[tokio::test]
    async fn test_served_surface_publishes_document() {
        let (mut host, documents) = served_host();
        host.render(&Project::initial()).unwrap();

        let document = documents.borrow().clone().unwrap();
        assert_eq!(document.rebuild_id, 1);
        assert!(document.html.contains("rebuildId: 1"));
    }

    #[tokio::test]
    async fn test_status_from_browser_reaches_host() {
        let (mut host, documents) = served_host();
        host.render(&Project::initial()).unwrap();

        let state = HttpState {
            documents,
            states: host.subscribe(),
            port: host.message_port(),
            commands: mpsc::unbounded_channel().0,
        };
        let code = status_handler(
            State(state),
            Json(json!({"type": "preview-ready", "rebuildId": 1})),
        )
        .await;

        assert_eq!(code, StatusCode::ACCEPTED);
        assert_eq!(host.next_transition().await.status, PreviewStatus::Ready);
    }

    #[tokio::test]
    async fn test_reload_only_rebuilds_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        let mut project = Project::initial();
        std::fs::write(&path, export_json(&project).unwrap()).unwrap();

        let (mut host, _documents) = served_host();
        host.render(&read_project(&path).unwrap()).unwrap();
        assert_eq!(reload(&mut host, &path).unwrap(), 1);

        ProjectMutation::Rename {
            name: "Renamed".to_string(),
        }
        .apply(&mut project)
        .unwrap();
        std::fs::write(&path, export_json(&project).unwrap()).unwrap();

        assert_eq!(reload(&mut host, &path).unwrap(), 2);
        assert_eq!(host.current_project().unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn test_index_uses_device_width() {
        let Html(page) = index_handler(Query(IndexQuery {
            device: Some(Device::Mobile),
        }))
        .await;
        assert!(page.contains("iframe{width:412px;"));
    }
}
