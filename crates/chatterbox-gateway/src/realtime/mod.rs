//! Realtime runtime (egress engine) for the chatterbox gateway.
//!
//! One [`ConnectionRegistry`] per endpoint plus the per-message
//! [`RealtimeCtx`] handed to services.

mod ctx;
mod registry;
pub mod types;

pub use ctx::RealtimeCtx;
pub use registry::{BroadcastReport, ConnId, Connection, ConnectionRegistry, Delivery};
pub use types::PreparedMsg;
