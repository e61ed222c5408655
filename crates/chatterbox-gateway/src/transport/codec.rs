//! Inbound codec for the transport layer.
//!
//! Clients send raw text with no envelope. Binary frames are read as (lossy)
//! UTF-8 text; Ping/Pong are surfaced only so the session can ignore them.

use axum::extract::ws::Message;

#[derive(Debug, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    Control,
    Close,
}

pub fn decode(msg: Message) -> Inbound {
    match msg {
        Message::Text(s) => Inbound::Text(s),
        Message::Binary(b) => Inbound::Text(String::from_utf8_lossy(&b).into_owned()),
        Message::Ping(_) | Message::Pong(_) => Inbound::Control,
        Message::Close(_) => Inbound::Close,
    }
}
