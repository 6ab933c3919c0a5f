use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

/// Reports writes to one file.
///
/// The parent directory is watched rather than the file itself so editors
/// that save by renaming a temp file over the original are still seen.
pub struct ProjectWatcher {
    _watcher: RecommendedWatcher,
    receiver: UnboundedReceiver<()>,
}

impl ProjectWatcher {
    pub fn new(path: &Path) -> notify::Result<Self> {
        let (tx, rx) = unbounded_channel();
        let target: PathBuf = path.to_path_buf();
        let file_name = target.file_name().map(|n| n.to_os_string());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches(&event, file_name.as_deref()) => {
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("File watch error: {}", e),
            },
            Config::default(),
        )?;

        let dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Wait for the next change; bursts of events collapse into one
    pub async fn changed(&mut self) -> Option<()> {
        self.receiver.recv().await?;
        while self.receiver.try_recv().is_ok() {}
        Some(())
    }
}

fn touches(event: &Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == file_name)
}
