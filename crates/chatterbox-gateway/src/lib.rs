//! Chatterbox gateway library entry.
//!
//! Wires the transport, dispatcher, realtime registries, and the echo/chat
//! services into an axum router. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod obs;
pub mod ops;
pub mod realtime;
pub mod router;
pub mod services;
pub mod transport;
