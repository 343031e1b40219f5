use models::ServiceSettings;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::{repository::SalesRepository, router::create_router};

/// Run the API server until Ctrl+C or SIGTERM
pub async fn run_server(
    repo: Arc<dyn SalesRepository>,
    settings: &ServiceSettings,
) -> anyhow::Result<()> {
    let app = create_router(repo);

    let addr = format!("{}:{}", settings.host, settings.port).parse::<SocketAddr>()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::debug!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::debug!("Received SIGTERM, shutting down"),
    }
}
