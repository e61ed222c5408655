use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use chatterbox_core::error::{ChatterboxError, Result};
use chatterbox_core::protocol::OutboundFrame;

use crate::realtime::{ConnectionRegistry, RealtimeCtx};

/// A WebSocket endpoint's behaviour. Each registered service gets its own
/// [`ConnectionRegistry`].
#[async_trait]
pub trait EndpointService: Send + Sync {
    /// Path segment under `/ws/`.
    fn endpoint(&self) -> &'static str;

    /// Text of the `welcome` frame sent after `identity`.
    fn welcome(&self, name: &str) -> String;

    /// Handle one inbound text message from `ctx`'s connection.
    async fn on_message(&self, ctx: RealtimeCtx, text: String) -> Result<()>;

    /// Frames sent to a new connection before it joins the registry.
    fn greeting(&self, name: &str) -> Vec<OutboundFrame> {
        vec![OutboundFrame::identity(name), OutboundFrame::welcome(self.welcome(name))]
    }
}

/// A service paired with the registry it owns.
#[derive(Clone)]
pub struct Endpoint {
    service: Arc<dyn EndpointService>,
    registry: Arc<ConnectionRegistry>,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        self.service.endpoint()
    }

    pub fn service(&self) -> Arc<dyn EndpointService> {
        Arc::clone(&self.service)
    }

    pub fn registry(&self) -> Arc<ConnectionRegistry> {
        Arc::clone(&self.registry)
    }
}

/// Endpoint name -> service + registry.
#[derive(Default)]
pub struct Dispatcher {
    endpoints: DashMap<&'static str, Endpoint>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            endpoints: DashMap::new(),
        }
    }

    /// Register a service under its endpoint name with a fresh registry.
    /// Re-registering a name replaces the previous endpoint.
    pub fn register(&self, service: Arc<dyn EndpointService>) {
        let name = service.endpoint();
        let registry = Arc::new(ConnectionRegistry::new(name));
        self.endpoints.insert(name, Endpoint { service, registry });
    }

    pub fn registered(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.endpoints.iter().map(|e| *e.key()).collect();
        names.sort_unstable();
        names
    }

    pub fn endpoint(&self, name: &str) -> Result<Endpoint> {
        self.endpoints
            .get(name)
            .map(|e| e.value().clone())
            .ok_or_else(|| ChatterboxError::NotFound(format!("unknown endpoint: {name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ChatService, EchoService};
    use std::time::Duration;

    #[test]
    fn endpoints_get_separate_registries() {
        let d = Dispatcher::new();
        d.register(Arc::new(EchoService::new()));
        d.register(Arc::new(ChatService::new(Duration::from_millis(10))));
        assert_eq!(d.registered(), vec!["chat", "echo"]);

        let echo = d.endpoint("echo").unwrap();
        let chat = d.endpoint("chat").unwrap();
        assert!(!Arc::ptr_eq(&echo.registry(), &chat.registry()));
        assert_eq!(echo.registry().endpoint(), "echo");
    }

    #[test]
    fn unknown_endpoint_is_not_found() {
        let d = Dispatcher::new();
        let err = d.endpoint("nope").err().unwrap();
        assert_eq!(err.client_code().as_str(), "NOT_FOUND");
    }

    #[test]
    fn default_greeting_is_identity_then_welcome() {
        let frames = EchoService::new().greeting("WiseFox1");
        assert_eq!(
            frames,
            vec![
                OutboundFrame::identity("WiseFox1"),
                OutboundFrame::welcome("Welcome to the WebSocket server, WiseFox1!"),
            ]
        );
    }
}
