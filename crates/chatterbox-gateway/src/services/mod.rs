//! Built-in endpoint services.

pub mod chat;
pub mod echo;

pub use chat::ChatService;
pub use echo::EchoService;
