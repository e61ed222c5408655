use async_trait::async_trait;

use chatterbox_core::error::Result;
use chatterbox_core::protocol::OutboundFrame;

use crate::dispatch::EndpointService;
use crate::realtime::RealtimeCtx;

/// Echo each message back to its sender only.
#[derive(Default)]
pub struct EchoService;

impl EchoService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EndpointService for EchoService {
    fn endpoint(&self) -> &'static str {
        "echo"
    }

    fn welcome(&self, name: &str) -> String {
        format!("Welcome to the WebSocket server, {name}!")
    }

    async fn on_message(&self, ctx: RealtimeCtx, text: String) -> Result<()> {
        ctx.reply(&OutboundFrame::message(ctx.name(), text))?;
        tracing::debug!("message echoed back to client");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::extract::ws::Message;
    use tokio::sync::mpsc;

    use crate::obs::GatewayMetrics;
    use crate::realtime::ConnectionRegistry;

    #[tokio::test]
    async fn echoes_to_sender_only() {
        let reg = Arc::new(ConnectionRegistry::new("echo"));
        let metrics = Arc::new(GatewayMetrics::new());
        let (tx_a, mut rx_a) = mpsc::channel(8);
        let (tx_b, mut rx_b) = mpsc::channel(8);
        let a = reg.admit(tx_a, |_| Ok(())).unwrap();
        reg.admit(tx_b, |_| Ok(())).unwrap();

        let ctx = RealtimeCtx::new(a.clone(), Arc::clone(&reg), Arc::clone(&metrics));
        EchoService::new().on_message(ctx, "ping".into()).await.unwrap();

        let Message::Text(got) = rx_a.try_recv().unwrap() else { panic!("expected text") };
        let expected = OutboundFrame::message(a.name(), "ping").encode().unwrap();
        assert_eq!(got, expected);
        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_err());
        assert_eq!(metrics.frames_delivered.get(&[("endpoint", "echo")]), 1);
    }
}
