//! Body Bell Label API
//!
//! Catalog admin and session auth for the record label site.

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use bodybell_auth_core::AuthService;
use bodybell_db::{create_pool, run_migrations, seed_catalog, Repositories};
use label_api::{build_router, AppState, Config};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("label_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Body Bell Label API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        issuer = %config.auth.issuer_url,
        admins = config.auth.admin_emails.len(),
        production = config.production,
        "Configuration loaded"
    );

    // Initialize metrics
    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    // Catalog store
    let repos = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url)
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool).await?;
            tracing::info!("Database pool created");
            Repositories::postgres(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory catalog store");
            Repositories::in_memory()
        }
    };

    if config.seed_catalog {
        seed_catalog(&repos).await?;
    }

    // Auth service
    let auth = AuthService::new(config.auth.clone());
    if auth.policy().is_empty() {
        tracing::warn!("ADMIN_EMAILS is empty, every catalog request will be forbidden");
    }

    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));

    let state = AppState::new(auth, repos, config);
    let app = build_router(state, metrics_handle);

    run_http_server(app, http_addr).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn run_http_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Register metrics with descriptions
    metrics::describe_counter!(
        "label_catalog_mutations_total",
        "Catalog writes by entity and operation"
    );
    metrics::describe_counter!("label_auth_logins_total", "Completed provider logins");
    metrics::describe_counter!(
        "label_auth_cache_hits",
        "Session cache hits by cache (principal, admin)"
    );
    metrics::describe_counter!(
        "label_auth_cache_misses",
        "Session cache misses by cache (principal, admin)"
    );

    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
