//! Server -> client frames (JSON, tagged by `type`).

use serde::{Deserialize, Serialize};

use crate::error::{ChatterboxError, Result};

/// Sender label used for canned replies on the chat endpoint.
pub const AI_SENDER: &str = "AI";

/// Tagged server frame. Field names are part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundFrame {
    /// Sent once, immediately on connect.
    Identity { name: String },
    /// Sent once, right after `identity`.
    Welcome { message: String },
    /// A relayed (or echoed) chat line.
    Message { sender: String, content: String },
}

impl OutboundFrame {
    pub fn identity(name: impl Into<String>) -> Self {
        OutboundFrame::Identity { name: name.into() }
    }

    pub fn welcome(message: impl Into<String>) -> Self {
        OutboundFrame::Welcome {
            message: message.into(),
        }
    }

    pub fn message(sender: impl Into<String>, content: impl Into<String>) -> Self {
        OutboundFrame::Message {
            sender: sender.into(),
            content: content.into(),
        }
    }

    /// Serialize to the JSON text sent on the wire.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ChatterboxError::Internal(format!("frame encode failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::{json, Value};

    fn as_value(frame: &OutboundFrame) -> Value {
        serde_json::from_str(&frame.encode().unwrap()).unwrap()
    }

    #[test]
    fn identity_shape() {
        let v = as_value(&OutboundFrame::identity("BraveTiger482"));
        assert_eq!(v, json!({ "type": "identity", "name": "BraveTiger482" }));
    }

    #[test]
    fn welcome_shape() {
        let v = as_value(&OutboundFrame::welcome("hi"));
        assert_eq!(v, json!({ "type": "welcome", "message": "hi" }));
    }

    #[test]
    fn message_shape_keeps_raw_content() {
        let v = as_value(&OutboundFrame::message(AI_SENDER, "say \"hi\"\n"));
        assert_eq!(
            v,
            json!({ "type": "message", "sender": "AI", "content": "say \"hi\"\n" })
        );
    }
}
