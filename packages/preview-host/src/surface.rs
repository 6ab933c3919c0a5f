use crate::errors::SurfaceError;
use cipherstudio_compiler_preview::PreviewDocument;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Sending half of the surface → host channel
#[derive(Debug, Clone)]
pub struct MessagePort {
    sender: mpsc::UnboundedSender<Value>,
}

impl MessagePort {
    pub(crate) fn new(sender: mpsc::UnboundedSender<Value>) -> Self {
        Self { sender }
    }

    /// Deliver a message to the host. Returns false once the host is gone.
    pub fn post(&self, message: Value) -> bool {
        self.sender.send(message).is_ok()
    }

    /// Deliver a message given as JSON text; text that is not JSON is dropped
    pub fn post_raw(&self, text: &str) -> bool {
        match serde_json::from_str(text) {
            Ok(value) => self.post(value),
            Err(e) => {
                tracing::debug!("Dropping non-JSON surface message: {}", e);
                false
            }
        }
    }
}

/// Everything a surface needs to show one document generation
#[derive(Debug, Clone)]
pub struct MountRequest {
    pub rebuild_id: u64,
    pub document: Arc<PreviewDocument>,
    pub port: MessagePort,
}

impl MountRequest {
    pub fn html(&self) -> &str {
        &self.document.html
    }
}

/// An isolated context that runs preview documents.
///
/// Mounting replaces whatever the surface was showing; script state from
/// the previous document does not survive.
pub trait RenderSurface {
    fn mount(&mut self, request: MountRequest) -> Result<(), SurfaceError>;
}
