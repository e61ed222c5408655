use axum::extract::ws::Message;

use chatterbox_core::protocol::OutboundFrame;
use chatterbox_core::Result;

/// Frame serialized once for fan-out (serialize once, send N times).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedMsg(String);

impl PreparedMsg {
    pub fn prepare(frame: &OutboundFrame) -> Result<Self> {
        frame.encode().map(PreparedMsg)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to an axum WS text message for transport.
    pub fn to_ws_message(&self) -> Message {
        Message::Text(self.0.clone())
    }
}
