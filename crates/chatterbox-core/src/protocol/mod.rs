//! Wire protocol.
//!
//! Inbound client messages are raw text and need no decoding. Only
//! server-originated traffic is enveloped, as the tagged records in [`frame`].

pub mod frame;

pub use frame::OutboundFrame;
