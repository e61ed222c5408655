use std::time::Duration;

use async_trait::async_trait;

use chatterbox_core::error::Result;
use chatterbox_core::protocol::{frame::AI_SENDER, OutboundFrame};
use chatterbox_core::responder;

use crate::dispatch::EndpointService;
use crate::realtime::RealtimeCtx;

/// Literal, case-sensitive trigger for a canned reply.
pub const AI_PREFIX: &str = "@ai";

/// Broadcast each message to every chat connection, with a delayed canned
/// reply for messages starting with [`AI_PREFIX`].
pub struct ChatService {
    ai_delay: Duration,
}

impl ChatService {
    pub fn new(ai_delay: Duration) -> Self {
        Self { ai_delay }
    }

    pub fn ai_delay(&self) -> Duration {
        self.ai_delay
    }
}

/// The AI input carried by `text`, if it is an `@ai` message.
pub fn ai_prompt(text: &str) -> Option<&str> {
    text.trim().strip_prefix(AI_PREFIX).map(str::trim)
}

#[async_trait]
impl EndpointService for ChatService {
    fn endpoint(&self) -> &'static str {
        "chat"
    }

    fn welcome(&self, name: &str) -> String {
        format!("Welcome to the chat server, {name}!")
    }

    async fn on_message(&self, ctx: RealtimeCtx, text: String) -> Result<()> {
        let report = ctx.broadcast(&OutboundFrame::message(ctx.name(), text.as_str()))?;
        tracing::debug!(delivered = report.delivered, skipped = report.skipped, dropped = report.dropped, "message broadcast");

        let Some(prompt) = ai_prompt(&text) else {
            return Ok(());
        };

        // Membership is read when the reply fires, not now.
        let prompt = prompt.to_owned();
        let delay = self.ai_delay;
        ctx.metrics().ai_replies_scheduled.inc(&[("endpoint", ctx.endpoint())]);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = OutboundFrame::message(AI_SENDER, responder::canned_reply(&prompt));
            match ctx.broadcast(&reply) {
                Ok(report) => tracing::debug!(delivered = report.delivered, "ai reply broadcast"),
                Err(e) => tracing::warn!(error = %e, "ai reply broadcast failed"),
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::extract::ws::Message;
    use serde_json::Value;
    use tokio::sync::mpsc;

    use crate::obs::GatewayMetrics;
    use crate::realtime::{Connection, ConnectionRegistry};

    fn json_of(msg: Message) -> Value {
        match msg {
            Message::Text(s) => serde_json::from_str(&s).unwrap(),
            other => panic!("expected text, got {other:?}"),
        }
    }

    fn setup() -> (Arc<ConnectionRegistry>, Arc<GatewayMetrics>) {
        (Arc::new(ConnectionRegistry::new("chat")), Arc::new(GatewayMetrics::new()))
    }

    fn join(reg: &ConnectionRegistry) -> (Connection, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(16);
        (reg.admit(tx, |_| Ok(())).unwrap(), rx)
    }

    #[test]
    fn prompt_detection() {
        assert_eq!(ai_prompt("@ai hello"), Some("hello"));
        assert_eq!(ai_prompt("   @ai   what is 2+2  "), Some("what is 2+2"));
        assert_eq!(ai_prompt("@ai"), Some(""));
        assert_eq!(ai_prompt("@aiplain"), Some("plain"));
        assert_eq!(ai_prompt("hello @ai"), None);
        assert_eq!(ai_prompt("@AI hello"), None);
        assert_eq!(ai_prompt("@ a i"), None);
    }

    #[tokio::test]
    async fn plain_message_reaches_all_including_sender() {
        let (reg, metrics) = setup();
        let (a, mut rx_a) = join(&reg);
        let (_b, mut rx_b) = join(&reg);

        let svc = ChatService::new(Duration::from_millis(1000));
        let ctx = RealtimeCtx::new(a.clone(), Arc::clone(&reg), metrics);
        svc.on_message(ctx, "hello".into()).await.unwrap();

        for rx in [&mut rx_a, &mut rx_b] {
            let v = json_of(rx.try_recv().unwrap());
            assert_eq!(v["type"], "message");
            assert_eq!(v["sender"], a.name());
            assert_eq!(v["content"], "hello");
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ai_reply_fires_after_delay() {
        let (reg, metrics) = setup();
        let (a, mut rx_a) = join(&reg);
        let (_b, mut rx_b) = join(&reg);

        let svc = ChatService::new(Duration::from_millis(1000));
        let ctx = RealtimeCtx::new(a, Arc::clone(&reg), Arc::clone(&metrics));
        svc.on_message(ctx, "@ai what is 2+2".into()).await.unwrap();

        rx_a.try_recv().unwrap();
        rx_b.try_recv().unwrap();

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx_a.try_recv().is_err());

        for rx in [&mut rx_a, &mut rx_b] {
            let v = json_of(rx.recv().await.unwrap());
            assert_eq!(v["sender"], "AI");
            assert!(v["content"].as_str().unwrap().contains("what is 2+2"));
        }
        assert_eq!(metrics.ai_replies_scheduled.get(&[("endpoint", "chat")]), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ai_reply_uses_membership_at_fire_time() {
        let (reg, metrics) = setup();
        let (a, rx_a) = join(&reg);
        let (_b, mut rx_b) = join(&reg);

        let svc = ChatService::new(Duration::from_millis(1000));
        let ctx = RealtimeCtx::new(a.clone(), Arc::clone(&reg), metrics);
        svc.on_message(ctx, "@ai hi".into()).await.unwrap();
        rx_b.try_recv().unwrap();

        // Sender leaves, a latecomer joins before the reply fires.
        drop(rx_a);
        reg.remove(a.id());
        let (_c, mut rx_c) = join(&reg);

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert_eq!(json_of(rx_b.try_recv().unwrap())["sender"], "AI");
        assert_eq!(json_of(rx_c.try_recv().unwrap())["sender"], "AI");
    }

    #[tokio::test(start_paused = true)]
    async fn non_prefixed_mention_schedules_nothing() {
        let (reg, metrics) = setup();
        let (a, mut rx_a) = join(&reg);

        let svc = ChatService::new(Duration::from_millis(1000));
        let ctx = RealtimeCtx::new(a, Arc::clone(&reg), Arc::clone(&metrics));
        svc.on_message(ctx, "hello @ai".into()).await.unwrap();
        rx_a.try_recv().unwrap();

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(rx_a.try_recv().is_err());
        assert_eq!(metrics.ai_replies_scheduled.get(&[("endpoint", "chat")]), 0);
    }
}
