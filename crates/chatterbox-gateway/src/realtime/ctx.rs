use std::sync::Arc;

use chatterbox_core::protocol::OutboundFrame;
use chatterbox_core::Result;

use crate::obs::GatewayMetrics;
use crate::realtime::{BroadcastReport, Connection, ConnectionRegistry, Delivery, PreparedMsg};

/// Per-connection context passed to services (borrow tools instead of owning).
#[derive(Clone)]
pub struct RealtimeCtx {
    conn: Connection,
    registry: Arc<ConnectionRegistry>,
    metrics: Arc<GatewayMetrics>,
}

impl RealtimeCtx {
    pub fn new(conn: Connection, registry: Arc<ConnectionRegistry>, metrics: Arc<GatewayMetrics>) -> Self {
        Self { conn, registry, metrics }
    }

    pub fn endpoint(&self) -> &'static str { self.registry.endpoint() }
    pub fn name(&self) -> &str { self.conn.name() }
    pub fn conn(&self) -> &Connection { &self.conn }
    pub fn registry(&self) -> &ConnectionRegistry { &self.registry }
    pub fn metrics(&self) -> &GatewayMetrics { &self.metrics }

    /// Send a frame back to this connection only.
    pub fn reply(&self, frame: &OutboundFrame) -> Result<Delivery> {
        let prepared = PreparedMsg::prepare(frame)?;
        let delivery = self.registry.send_to(self.conn.id(), &prepared)?;
        self.record(BroadcastReport {
            delivered: usize::from(delivery == Delivery::Delivered),
            skipped: 0,
            dropped: usize::from(delivery == Delivery::Dropped),
        });
        Ok(delivery)
    }

    /// Send a frame to every open connection of this endpoint, sender included.
    pub fn broadcast(&self, frame: &OutboundFrame) -> Result<BroadcastReport> {
        let prepared = PreparedMsg::prepare(frame)?;
        let report = self.registry.broadcast(&prepared, None);
        self.record(report);
        Ok(report)
    }

    fn record(&self, report: BroadcastReport) {
        let labels = [("endpoint", self.endpoint())];
        self.metrics.frames_delivered.add(&labels, report.delivered as u64);
        self.metrics.frames_dropped.add(&labels, report.dropped as u64);
    }
}
