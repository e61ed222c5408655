//! WebSocket handler.
//!
//! Responsibilities:
//! - Resolve `/ws/{endpoint}` to a registered service before upgrading
//! - Admit the connection (identity + welcome first), then run one session
//!   task that multiplexes the outbound queue and the inbound stream
//! - Evict from the endpoint's registry when the session ends

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, Path, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::Instrument;

use chatterbox_core::error::Result;

use crate::app_state::AppState;
use crate::dispatch::Endpoint;
use crate::error::GatewayError;
use crate::realtime::{PreparedMsg, RealtimeCtx};
use crate::transport::codec::{decode, Inbound};

// --------------------
// Entry
// --------------------
pub async fn ws_upgrade(
    State(app): State<AppState>,
    Path(endpoint): Path<String>,
    ws: WebSocketUpgrade,
) -> std::result::Result<Response, GatewayError> {
    let ep = app.dispatcher().endpoint(&endpoint)?;
    app.metrics().ws_upgrades.inc(&[("endpoint", ep.name())]);

    Ok(ws.on_upgrade(move |socket| async move {
        if let Err(e) = run_session(app, ep, socket).await {
            tracing::warn!(error = %e, "session ended with error");
        }
    }))
}

// --------------------
// Core session loop
// --------------------
async fn run_session(app: AppState, ep: Endpoint, socket: WebSocket) -> Result<()> {
    let (out_tx, out_rx) = mpsc::channel::<Message>(app.cfg().realtime.outbound_queue);

    let service = ep.service();
    let registry = ep.registry();
    let conn = registry.admit(out_tx, |conn| {
        for frame in service.greeting(conn.name()) {
            conn.deliver(&PreparedMsg::prepare(&frame)?);
        }
        Ok(())
    })?;

    let span = tracing::info_span!("session", endpoint = ep.name(), conn_id = conn.id(), name = %conn.name());
    let labels = [("endpoint", ep.name())];
    app.metrics().sessions_active.inc(&labels);

    let ctx = RealtimeCtx::new(conn.clone(), registry.clone(), app.metrics_arc());
    async {
        tracing::info!(clients = registry.len(), "new websocket connection established");
        session_loop(&ep, ctx, socket, out_rx).await;
        let removed = registry.remove(conn.id());
        tracing::info!(removed, clients = registry.len(), "websocket connection closed");
    }
    .instrument(span)
    .await;

    app.metrics().sessions_active.dec(&labels);
    Ok(())
}

async fn session_loop(ep: &Endpoint, ctx: RealtimeCtx, socket: WebSocket, mut out_rx: mpsc::Receiver<Message>) {
    let service = ep.service();
    let labels = [("endpoint", ep.name())];
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                let Some(m) = maybe_out else { break; };
                if let Err(e) = ws_tx.send(m).await {
                    tracing::debug!(error = %e, "socket write failed");
                    break;
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break; };
                let msg = match incoming {
                    Ok(msg) => msg,
                    Err(e) => {
                        // The transport decides whether this ends the stream.
                        tracing::error!(error = %e, "websocket error");
                        ctx.metrics().transport_errors.inc(&labels);
                        continue;
                    }
                };

                match decode(msg) {
                    Inbound::Text(text) => {
                        tracing::debug!(%text, "received message");
                        if let Err(e) = service.on_message(ctx.clone(), text).await {
                            tracing::warn!(error = %e, "message handling failed");
                            ctx.metrics().handler_errors.inc(&labels);
                        }
                    }
                    // tungstenite answers pings itself.
                    Inbound::Control => {}
                    Inbound::Close => break,
                }
            }
        }
    }

    // Closing an already-closed socket is fine; the error is ignored.
    let _ = ws_tx.close().await;
}
