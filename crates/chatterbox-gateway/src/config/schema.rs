use std::net::SocketAddr;

use serde::Deserialize;
use chatterbox_core::error::{ChatterboxError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub realtime: RealtimeSection,

    #[serde(default)]
    pub chat: ChatSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            realtime: RealtimeSection::default(),
            chat: ChatSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ChatterboxError::UnsupportedVersion);
        }
        self.server.listen_addr()?;
        self.realtime.validate()?;
        self.chat.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// HTML page served at `/`; the built-in page is used when unset or unreadable.
    #[serde(default)]
    pub index_html: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            index_html: None,
        }
    }
}

impl ServerSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            ChatterboxError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RealtimeSection {
    /// Per-connection outbound queue capacity; overflow is dropped.
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for RealtimeSection {
    fn default() -> Self {
        Self {
            outbound_queue: default_outbound_queue(),
        }
    }
}

impl RealtimeSection {
    pub fn validate(&self) -> Result<()> {
        // identity + welcome must fit before the session starts draining.
        if !(2..=65536).contains(&self.outbound_queue) {
            return Err(ChatterboxError::BadRequest(
                "realtime.outbound_queue must be between 2 and 65536".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatSection {
    #[serde(default = "default_ai_reply_delay_ms")]
    pub ai_reply_delay_ms: u64,
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            ai_reply_delay_ms: default_ai_reply_delay_ms(),
        }
    }
}

impl ChatSection {
    pub fn validate(&self) -> Result<()> {
        if self.ai_reply_delay_ms > 60000 {
            return Err(ChatterboxError::BadRequest(
                "chat.ai_reply_delay_ms must be at most 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}
fn default_outbound_queue() -> usize {
    1024
}
fn default_ai_reply_delay_ms() -> u64 {
    1000
}
