pub mod form;
pub mod http;
pub mod render;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::dispatcher::Dispatcher;
use crate::error::{Result, TourError};

/// Runs every enabled surface as its own task over the shared dispatcher and
/// returns once all of them have stopped (Ctrl-C) or one has failed.
pub async fn serve(dispatcher: Arc<Dispatcher>, config: &ServerConfig) -> Result<()> {
    let mut surfaces = JoinSet::new();

    if config.enable_form {
        let listener = bind(&config.host, config.form_port).await?;
        info!(addr = %listener.local_addr()?, "Form surface listening");
        surfaces.spawn(run_surface("form", listener, form::router(dispatcher.clone())));
    }

    if config.enable_http {
        let listener = bind(&config.host, config.http_port).await?;
        info!(addr = %listener.local_addr()?, "HTTP endpoint listening");
        surfaces.spawn(run_surface("http", listener, http::router(dispatcher.clone())));
    }

    if surfaces.is_empty() {
        return Err(TourError::Server(
            "both server.enable_form and server.enable_http are off".to_string(),
        ));
    }

    // Surfaces only return on shutdown or error.
    while let Some(joined) = surfaces.join_next().await {
        let (name, outcome) = joined.map_err(|e| TourError::Server(e.to_string()))?;
        outcome.map_err(|e| TourError::Server(format!("{name} surface failed: {e}")))?;
        info!(surface = name, "Surface stopped");
    }

    Ok(())
}

pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .map_err(|e| TourError::Server(format!("failed to bind {host}:{port}: {e}")))
}

async fn run_surface(
    name: &'static str,
    listener: TcpListener,
    app: Router,
) -> (&'static str, std::io::Result<()>) {
    let outcome = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    (name, outcome)
}

async fn shutdown_signal() {
    wait_for(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` fires. A signal that cannot be installed never
/// resolves, so the surfaces keep serving instead of stopping at once.
async fn wait_for<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!(error = %e, "Failed to install shutdown signal handler");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_for_resolves_on_signal() {
        let signal = async { Ok::<(), io::Error>(()) };
        let fired = tokio::time::timeout(Duration::from_millis(200), wait_for(signal)).await;
        assert!(fired.is_ok());
    }

    #[tokio::test]
    async fn test_wait_for_never_resolves_when_handler_fails() {
        let failed = async { Err::<(), _>(io::Error::other("no handler")) };
        let fired = tokio::time::timeout(Duration::from_millis(100), wait_for(failed)).await;
        assert!(fired.is_err());
    }
}
