use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TrySendError};

use chatterbox_core::error::{ChatterboxError, Result};
use chatterbox_core::names;

use super::types::PreparedMsg;

/// Registry-assigned connection identity.
pub type ConnId = u64;

/// One live connection: its name and its outbound queue sender.
///
/// The queue's receiver is owned by the session task; once that task ends the
/// connection reports closed and is skipped by every delivery path.
#[derive(Clone, Debug)]
pub struct Connection {
    id: ConnId,
    name: Arc<str>,
    tx: mpsc::Sender<Message>,
}

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Connection already closed; nothing was attempted.
    Skipped,
    /// Queue full or closed mid-send; frame lost.
    Dropped,
}

impl Connection {
    pub fn id(&self) -> ConnId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Fire-and-forget delivery. Failures are logged, never returned.
    pub fn deliver(&self, msg: &PreparedMsg) -> Delivery {
        if !self.is_open() {
            return Delivery::Skipped;
        }
        match self.tx.try_send(msg.to_ws_message()) {
            Ok(()) => Delivery::Delivered,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(conn_id = self.id, name = %self.name, "outbound queue full, frame dropped");
                Delivery::Dropped
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(conn_id = self.id, name = %self.name, "connection closed mid-send, frame dropped");
                Delivery::Dropped
            }
        }
    }
}

/// Tally of one fan-out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub skipped: usize,
    pub dropped: usize,
}

impl BroadcastReport {
    fn record(&mut self, d: Delivery) {
        match d {
            Delivery::Delivered => self.delivered += 1,
            Delivery::Skipped => self.skipped += 1,
            Delivery::Dropped => self.dropped += 1,
        }
    }
}

/// Open connections of one endpoint, keyed by [`ConnId`].
pub struct ConnectionRegistry {
    endpoint: &'static str,
    conns: DashMap<ConnId, Connection>,
    seq: AtomicU64,
}

impl ConnectionRegistry {
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            conns: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    /// Assign a random name and register the connection.
    ///
    /// `greet` runs before the connection is visible to broadcasts, so frames
    /// it enqueues are the first ones the client sees. If it fails the
    /// connection is not registered.
    pub fn admit<F>(&self, tx: mpsc::Sender<Message>, greet: F) -> Result<Connection>
    where
        F: FnOnce(&Connection) -> Result<()>,
    {
        let conn = Connection {
            id: self.seq.fetch_add(1, Ordering::Relaxed),
            name: Arc::from(names::random_name()),
            tx,
        };
        greet(&conn)?;
        self.conns.insert(conn.id, conn.clone());
        tracing::debug!(endpoint = self.endpoint, conn_id = conn.id, size = self.conns.len(), "admitted");
        Ok(conn)
    }

    /// Idempotent. Returns `true` only for the call that removed the entry.
    pub fn remove(&self, id: ConnId) -> bool {
        self.conns.remove(&id).is_some()
    }

    pub fn contains(&self, id: ConnId) -> bool {
        self.conns.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.conns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conns.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.conns.iter().map(|e| e.value().name.to_string()).collect()
    }

    /// Deliver to one registered connection.
    pub fn send_to(&self, id: ConnId, msg: &PreparedMsg) -> Result<Delivery> {
        let conn = self
            .conns
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or(ChatterboxError::NotConnected(id))?;
        Ok(conn.deliver(msg))
    }

    /// Deliver to every open connection, optionally skipping `exclude`.
    ///
    /// Closed connections are skipped, not evicted; eviction only happens on
    /// the session's own close path.
    pub fn broadcast(&self, msg: &PreparedMsg, exclude: Option<ConnId>) -> BroadcastReport {
        // Snapshot first so no shard lock is held while sending.
        let targets: Vec<Connection> = self
            .conns
            .iter()
            .filter(|e| Some(*e.key()) != exclude)
            .map(|e| e.value().clone())
            .collect();

        let mut report = BroadcastReport::default();
        for conn in &targets {
            report.record(conn.deliver(msg));
        }
        report
    }
}
