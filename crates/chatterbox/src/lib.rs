//! Top-level facade crate for chatterbox.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use chatterbox_core::*;
}

pub mod gateway {
    pub use chatterbox_gateway::*;
}
