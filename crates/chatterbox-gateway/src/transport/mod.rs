//! Transport layer (WebSocket).
//!
//! Exposes the WS upgrade handler, the per-connection session loop, and the
//! codec that turns transport messages into inbound events.

pub mod codec;
pub mod ws;
