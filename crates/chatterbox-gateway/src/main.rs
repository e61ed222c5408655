//! Chatterbox gateway binary.
//!
//! - `GET /`            demo page
//! - `GET /ws/echo`     echo endpoint
//! - `GET /ws/chat`     broadcast chat with `@ai` canned replies

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatterbox_gateway::{app_state::AppState, config, error::GatewayError, router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "chatterbox-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), GatewayError> {
    let path = std::env::var(config::CONFIG_ENV).unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.into());
    let cfg = config::load_or_default(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = AppState::new(cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!(%listen, "server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
