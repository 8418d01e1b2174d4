use crate::config::Config;
use crate::plaid::PlaidClient;
use crate::state::AppState;
use crate::universities::UniversitiesApi;
use crate::utils::fmt_duration;
use crate::web::create_router;
use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Exit code used when connections fail to drain within the shutdown timeout.
const EXIT_SHUTDOWN_TIMEOUT: u8 = 2;

/// Main application struct containing all necessary components
pub struct App {
    config: Config,
    app_state: AppState,
}

impl App {
    /// Build upstream clients from configuration.
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let universities = UniversitiesApi::new(config.universities_url.clone())
            .context("Failed to create universities client")?;

        let plaid = match config.plaid_credentials() {
            Some((client_id, secret)) => {
                let client = PlaidClient::for_environment(config.plaid_env, client_id, secret)
                    .context("Failed to create Plaid client")?;
                info!(environment = config.plaid_env.as_str(), "Plaid client configured");
                Some(Arc::new(client))
            }
            None => {
                warn!("PLAID_CLIENT_ID / PLAID_SECRET not set; Plaid endpoints will return errors");
                None
            }
        };

        info!(
            universities_url = universities.search_url(),
            "universities client configured"
        );

        let app_state = AppState::new(Arc::new(universities), plaid);
        Ok(App { config, app_state })
    }

    pub fn router(&self) -> Router {
        create_router(self.app_state.clone())
    }

    /// Serve until a shutdown signal arrives, then drain within the configured timeout.
    pub async fn run(self) -> ExitCode {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(error = ?e, %addr, "failed to bind web server");
                return ExitCode::FAILURE;
            }
        };
        info!(%addr, "web server listening");

        let shutdown = CancellationToken::new();
        let server_shutdown = shutdown.clone();
        let server = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { server_shutdown.cancelled().await });
        let mut handle = tokio::spawn(async move { server.await });

        tokio::select! {
            result = &mut handle => {
                error!(result = ?result, "web server exited unexpectedly");
                return ExitCode::FAILURE;
            }
            signal = shutdown_signal() => {
                info!(signal, "shutdown requested, draining connections");
            }
        }

        shutdown.cancel();
        let timeout = self.config.shutdown_timeout;
        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(Ok(()))) => {
                info!("web server stopped");
                ExitCode::SUCCESS
            }
            Ok(Ok(Err(e))) => {
                error!(error = ?e, "web server failed during shutdown");
                ExitCode::FAILURE
            }
            Ok(Err(e)) => {
                error!(error = ?e, "web server task panicked");
                ExitCode::FAILURE
            }
            Err(_) => {
                warn!(
                    timeout = fmt_duration(timeout),
                    "graceful shutdown timed out, exiting"
                );
                ExitCode::from(EXIT_SHUTDOWN_TIMEOUT)
            }
        }
    }
}

/// Resolves with the name of the signal that was received.
async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = ?e, "failed to listen for ctrl-c");
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
                error!(error = ?e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}
