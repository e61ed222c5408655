//! Chatterbox core: wire frames, error types, and the random generators
//! (display names, canned replies) shared by the gateway.
//!
//! This crate carries no transport or runtime dependencies so it can be reused
//! by tools and tests that never open a socket.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `ChatterboxError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod names;
pub mod protocol;
pub mod responder;

/// Shared result type.
pub use error::{ChatterboxError, Result};
