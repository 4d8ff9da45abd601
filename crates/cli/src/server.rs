//! # CLI Server
//!
//! Server startup and management for the Waypoint CLI.

use std::net::SocketAddr;

use anyhow::anyhow;
use error::Result;
use migration::{Migrator, MigratorTrait as _};
use server::{router::create_app_router, AppState};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tower_service::Service;
use tracing::info;

use crate::{
    commands::ServeArgs,
    config::parse_socket_addr,
    tls::{load_certs, load_private_key},
};

/// Starts the API server with optional TLS support.
///
/// Connects to the database, runs pending migrations, and serves the
/// application router until a shutdown signal arrives.
pub async fn serve(args: &ServeArgs) -> Result<()> {
    info!(target: "serve",
        host = %args.host,
        port = %args.port,
        tls = %args.tls,
        "Starting API server..."
    );

    let db = migration::db::connect_from_env().await?;

    // Run migrations automatically on startup
    info!(target: "serve", "Running database migrations...");
    Migrator::up(&db, None).await?;
    info!(target: "serve", "Database migrations completed successfully");

    let mut config = server::settings::load_config_from_env()
        .with_host(&args.host)
        .with_port(args.port);
    if let (Some(cert), Some(key)) = (&args.tls_cert, &args.tls_key) {
        config = config.with_tls(cert, key);
    }

    let state = AppState::new(db, config.clone());
    let app = create_app_router(state);

    let address = parse_socket_addr(&args.host, args.port)
        .map_err(|e| anyhow!("Invalid address {}:{}: {}", args.host, args.port, e))?;

    if args.tls {
        serve_https(&app, &address, &config).await
    }
    else {
        serve_http(&app, &address).await
    }
}

/// Serves the application over plain HTTP.
async fn serve_http(app: &axum::Router, address: &SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {}: {}", address, e))?;

    info!(target: "serve", %address, "Starting HTTP server...");

    Ok(axum::serve(
        listener,
        app.clone()
            .into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| anyhow!("HTTP server error: {}", e))?)
}

/// Serves the application over HTTPS with TLS.
async fn serve_https(app: &axum::Router, address: &SocketAddr, config: &server::ServerConfig) -> Result<()> {
    let tls_cert_path = config
        .tls_cert
        .as_ref()
        .ok_or_else(|| anyhow!("TLS certificate path is required when TLS is enabled"))?;
    let tls_key_path = config
        .tls_key
        .as_ref()
        .ok_or_else(|| anyhow!("TLS key path is required when TLS is enabled"))?;

    info!(
        target: "serve",
        cert = %tls_cert_path.display(),
        key = %tls_key_path.display(),
        "Initializing TLS..."
    );

    let certs = load_certs(tls_cert_path).map_err(|e| anyhow!("Failed to load TLS certificate: {}", e))?;
    let key = load_private_key(tls_key_path).map_err(|e| anyhow!("Failed to load TLS private key: {}", e))?;

    let tls_config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| anyhow!("Failed to configure TLS: {}", e))?;

    let tls_acceptor = TlsAcceptor::from(std::sync::Arc::new(tls_config));

    info!(target: "serve", %address, "Starting HTTPS server (TLS enabled)...");

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| anyhow!("Failed to bind address: {}", e))?;

    loop {
        tokio::select! {
            _ = shutdown_signal() => {
                info!(target: "serve", "Received shutdown signal, stopping HTTPS server...");
                break;
            }
            result = listener.accept() => {
                let (tcp_stream, peer_addr) = result
                    .map_err(|e| anyhow!("Failed to accept connection: {}", e))?;
                let tls_acceptor = tls_acceptor.clone();
                let app = app.clone();

                tokio::spawn(async move {
                    let tls_stream = match tls_acceptor.accept(tcp_stream).await {
                        Ok(stream) => stream,
                        Err(e) => {
                            tracing::warn!("TLS handshake failed: {}", e);
                            return;
                        },
                    };

                    let hyper_service =
                        hyper::service::service_fn(move |mut request: hyper::Request<hyper::body::Incoming>| {
                            request.extensions_mut().insert(axum::extract::ConnectInfo(peer_addr));
                            let mut app = app.clone();
                            async move { app.call(request).await }
                        });

                    if let Err(err) = hyper_util::server::conn::auto::Builder::new(
                        hyper_util::rt::TokioExecutor::new(),
                    )
                    .serve_connection(hyper_util::rt::TokioIo::new(tls_stream), hyper_service)
                    .await
                    {
                        tracing::warn!("Error serving connection: {}", err);
                    }
                });
            }
        }
    }

    Ok(())
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
