//! Messages the rendering surface posts back to the host.
//!
//! The surface shares its channel with whatever else the embedding context
//! receives, so anything that is not one of the two known shapes with a
//! numeric `rebuildId` is dropped rather than treated as an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SurfaceMessage {
    PreviewReady {
        #[serde(rename = "rebuildId")]
        rebuild_id: u64,
    },
    PreviewError {
        #[serde(default)]
        error: Option<String>,
        #[serde(rename = "rebuildId")]
        rebuild_id: u64,
    },
}

impl SurfaceMessage {
    /// Parse a raw message, returning `None` for unrelated shapes
    pub fn parse(value: &Value) -> Option<Self> {
        match SurfaceMessage::deserialize(value) {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::debug!("Ignoring unrecognized surface message: {}", e);
                None
            }
        }
    }

    pub fn rebuild_id(&self) -> u64 {
        match self {
            SurfaceMessage::PreviewReady { rebuild_id } => *rebuild_id,
            SurfaceMessage::PreviewError { rebuild_id, .. } => *rebuild_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ready() {
        let message = SurfaceMessage::parse(&json!({"type": "preview-ready", "rebuildId": 3}));
        assert_eq!(message, Some(SurfaceMessage::PreviewReady { rebuild_id: 3 }));
    }

    #[test]
    fn test_parse_error_with_and_without_text() {
        let message = SurfaceMessage::parse(&json!({
            "type": "preview-error",
            "error": "ReferenceError: x is not defined",
            "rebuildId": 1
        }));
        assert_eq!(
            message,
            Some(SurfaceMessage::PreviewError {
                error: Some("ReferenceError: x is not defined".to_string()),
                rebuild_id: 1
            })
        );

        let message = SurfaceMessage::parse(&json!({"type": "preview-error", "rebuildId": 2}));
        assert_eq!(message.map(|m| m.rebuild_id()), Some(2));
    }

    #[test]
    fn test_unrelated_shapes_are_ignored() {
        let shapes = [
            json!(null),
            json!("preview-ready"),
            json!(42),
            json!({}),
            json!({"type": "ready", "rebuildId": 1}),
            json!({"type": "preview-ready"}),
            json!({"type": "preview-ready", "rebuildId": "1"}),
            json!({"type": "preview-error", "error": 5, "rebuildId": 1}),
            json!({"source": "react-devtools-content-script", "payload": {}}),
        ];

        for shape in shapes {
            assert_eq!(SurfaceMessage::parse(&shape), None, "shape: {}", shape);
        }
    }
}
