//! Minimal metrics registry for the gateway.
//!
//! Counter and gauge types with dynamic labels backed by `DashMap`. Labels are
//! flattened into sorted key vectors to keep rendering deterministic.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn render_labels(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        if v == 0 {
            return;
        }
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let _ = writeln!(out, "{}{{{}}} {}", name, render_labels(r.key()), r.value().load(Ordering::Relaxed));
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    pub fn inc(&self, labels: &[(&str, &str)]) { self.add(labels, 1); }
    pub fn dec(&self, labels: &[(&str, &str)]) { self.add(labels, -1); }

    pub fn add(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self.map.entry(label_key(labels)).or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge", name);
        for r in self.map.iter() {
            let _ = writeln!(out, "{}{{{}}} {}", name, render_labels(r.key()), r.value().load(Ordering::Relaxed));
        }
    }
}

#[derive(Default)]
pub struct GatewayMetrics {
    pub ws_upgrades: CounterVec,
    pub sessions_active: GaugeVec,
    pub frames_delivered: CounterVec,
    pub frames_dropped: CounterVec,
    pub ai_replies_scheduled: CounterVec,
    pub transport_errors: CounterVec,
    pub handler_errors: CounterVec,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render all metrics plus any extra lines provided by callers.
    pub fn render(&self, extra: &[(String, u64)]) -> String {
        let mut out = String::new();
        self.ws_upgrades.render("chatterbox_ws_upgrades_total", &mut out);
        self.sessions_active.render("chatterbox_ws_sessions_active", &mut out);
        self.frames_delivered.render("chatterbox_frames_delivered_total", &mut out);
        self.frames_dropped.render("chatterbox_frames_dropped_total", &mut out);
        self.ai_replies_scheduled.render("chatterbox_ai_replies_scheduled_total", &mut out);
        self.transport_errors.render("chatterbox_transport_errors_total", &mut out);
        self.handler_errors.render("chatterbox_handler_errors_total", &mut out);
        for (k, v) in extra {
            let _ = writeln!(out, "{} {}", k, v);
        }
        out
    }
}
