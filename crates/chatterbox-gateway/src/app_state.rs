//! Shared application state for the chatterbox gateway.
//!
//! Wires the dispatcher with the built-in endpoint services (each with its own
//! connection registry) and the metrics sink.

use std::sync::Arc;
use std::time::Duration;

use chatterbox_core::error::Result;

use crate::config::GatewayConfig;
use crate::dispatch::Dispatcher;
use crate::obs::GatewayMetrics;
use crate::services::{ChatService, EchoService};

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<GatewayConfig>,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<GatewayMetrics>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        cfg.validate()?;

        let dispatcher = Dispatcher::new();
        dispatcher.register(Arc::new(EchoService::new()));
        dispatcher.register(Arc::new(ChatService::new(Duration::from_millis(
            cfg.chat.ai_reply_delay_ms,
        ))));

        tracing::debug!(endpoints = ?dispatcher.registered(), "endpoints registered");

        Ok(Self {
            cfg: Arc::new(cfg),
            dispatcher: Arc::new(dispatcher),
            metrics: Arc::new(GatewayMetrics::new()),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.cfg
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }

    pub fn metrics_arc(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Registry sizes as extra metric lines.
    pub fn metrics_extra(&self) -> Vec<(String, u64)> {
        self.dispatcher
            .registered()
            .into_iter()
            .filter_map(|name| self.dispatcher.endpoint(name).ok())
            .map(|ep| {
                (
                    format!("chatterbox_registry_connections{{endpoint=\"{}\"}}", ep.name()),
                    ep.registry().len() as u64,
                )
            })
            .collect()
    }
}
