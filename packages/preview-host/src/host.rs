use crate::errors::HostError;
use crate::message::SurfaceMessage;
use crate::surface::{MessagePort, MountRequest, RenderSurface};
use cipherstudio_compiler_preview::{BuildOptions, DocumentCache, PreviewDocument};
use cipherstudio_project::Project;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

pub const LOADING_MESSAGE: &str = "Loading preview...";
pub const TIMEOUT_MESSAGE: &str =
    "Preview is taking longer than expected. Tap Retry or open DevTools console for details.";
pub const ERROR_PREFIX: &str = "Preview error: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewStatus {
    Loading,
    Ready,
    Error,
}

/// What the status badge shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewState {
    pub status: PreviewStatus,
    pub message: String,
    pub rebuild_id: u64,
}

impl PreviewState {
    fn loading(rebuild_id: u64) -> Self {
        Self {
            status: PreviewStatus::Loading,
            message: LOADING_MESSAGE.to_string(),
            rebuild_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HostOptions {
    /// How long a mounted document may stay silent before the status turns to error
    pub timeout: Duration,
    pub build: BuildOptions,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            build: BuildOptions::default(),
        }
    }
}

/// Drives one rendering surface through loading, ready and error.
///
/// Every `render` or `refresh` starts a new generation with a higher rebuild
/// id. Status messages from older generations are ignored. The timeout only
/// applies while the current generation is still loading, and a ready
/// message that arrives after the timeout still moves the status to ready.
pub struct PreviewHost<S: RenderSurface> {
    surface: S,
    timeout: Duration,
    cache: DocumentCache,
    rebuild_id: u64,
    project: Option<Project>,
    deadline: Option<Instant>,
    state: watch::Sender<PreviewState>,
    sender: mpsc::UnboundedSender<Value>,
    receiver: mpsc::UnboundedReceiver<Value>,
}

impl<S: RenderSurface> PreviewHost<S> {
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, HostOptions::default())
    }

    pub fn with_options(surface: S, options: HostOptions) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(PreviewState::loading(0));

        Self {
            surface,
            timeout: options.timeout,
            cache: DocumentCache::new(options.build),
            rebuild_id: 0,
            project: None,
            deadline: None,
            state,
            sender,
            receiver,
        }
    }

    /// Build and mount `project`, replacing the current surface content
    pub fn render(&mut self, project: &Project) -> Result<u64, HostError> {
        self.project = Some(project.clone());
        self.rebuild()
    }

    /// Rebuild the last rendered project under a new rebuild id
    pub fn refresh(&mut self) -> Result<u64, HostError> {
        if self.project.is_none() {
            return Err(HostError::NoProject);
        }
        self.rebuild()
    }

    fn rebuild(&mut self) -> Result<u64, HostError> {
        let project = self.project.as_ref().ok_or(HostError::NoProject)?;

        self.rebuild_id += 1;
        let rebuild_id = self.rebuild_id;
        let document = self.cache.get_or_build(project, rebuild_id);

        tracing::info!(
            "Mounting preview for {} (rebuild {}, {} bytes)",
            project.id,
            rebuild_id,
            document.html.len()
        );

        // Stale generations can no longer match, so only the status needs resetting
        self.set_state(PreviewState::loading(rebuild_id));
        self.deadline = Some(Instant::now() + self.timeout);

        let port = self.message_port();
        if let Err(e) = self.surface.mount(MountRequest {
            rebuild_id,
            document,
            port,
        }) {
            tracing::warn!("Mounting rebuild {} failed: {}", rebuild_id, e);
            self.deadline = None;
            self.set_state(PreviewState {
                status: PreviewStatus::Error,
                message: format!("{}{}", ERROR_PREFIX, e),
                rebuild_id,
            });
            return Err(e.into());
        }

        Ok(rebuild_id)
    }

    /// Apply a raw message from the surface.
    ///
    /// Returns whether the message was accepted. Unrelated shapes and
    /// messages from superseded generations are ignored.
    pub fn on_status_message(&mut self, value: &Value) -> bool {
        let Some(message) = SurfaceMessage::parse(value) else {
            return false;
        };

        if self.project.is_none() || message.rebuild_id() != self.rebuild_id {
            tracing::debug!(
                "Ignoring stale surface message for rebuild {} (current {})",
                message.rebuild_id(),
                self.rebuild_id
            );
            return false;
        }

        let state = match message {
            SurfaceMessage::PreviewReady { rebuild_id } => PreviewState {
                status: PreviewStatus::Ready,
                message: String::new(),
                rebuild_id,
            },
            SurfaceMessage::PreviewError { error, rebuild_id } => PreviewState {
                status: PreviewStatus::Error,
                message: format!(
                    "{}{}",
                    ERROR_PREFIX,
                    error.as_deref().filter(|e| !e.is_empty()).unwrap_or("unknown")
                ),
                rebuild_id,
            },
        };

        self.deadline = None;
        self.set_state(state);
        true
    }

    /// Wait for the next status change of the current generation.
    ///
    /// Resolves on an accepted surface message or on the loading timeout.
    /// Never resolves if nothing has been rendered and no message arrives.
    pub async fn next_transition(&mut self) -> PreviewState {
        loop {
            let deadline = self.deadline;

            tokio::select! {
                message = self.receiver.recv() => {
                    // The host keeps a sender, so the channel never closes
                    if let Some(value) = message {
                        if self.on_status_message(&value) {
                            return self.state();
                        }
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.deadline = None;
                    if self.status() == PreviewStatus::Loading {
                        tracing::warn!(
                            "Preview rebuild {} produced no status within {:?}",
                            self.rebuild_id,
                            self.timeout
                        );
                        self.set_state(PreviewState {
                            status: PreviewStatus::Error,
                            message: TIMEOUT_MESSAGE.to_string(),
                            rebuild_id: self.rebuild_id,
                        });
                        return self.state();
                    }
                }
            }
        }
    }

    /// Apply every message already waiting on the port without blocking
    pub fn drain_messages(&mut self) -> usize {
        let mut accepted = 0;
        while let Ok(value) = self.receiver.try_recv() {
            if self.on_status_message(&value) {
                accepted += 1;
            }
        }
        accepted
    }

    pub fn message_port(&self) -> MessagePort {
        MessagePort::new(self.sender.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> PreviewState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> PreviewStatus {
        self.state.borrow().status
    }

    pub fn rebuild_id(&self) -> u64 {
        self.rebuild_id
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Document of the current generation, if one has been built
    pub fn current_document(&mut self) -> Option<Arc<PreviewDocument>> {
        let project = self.project.as_ref()?;
        Some(self.cache.get_or_build(project, self.rebuild_id))
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn set_state(&self, state: PreviewState) {
        tracing::debug!("Preview status {:?} (rebuild {})", state.status, state.rebuild_id);
        self.state.send_replace(state);
    }
}
