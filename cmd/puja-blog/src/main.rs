//! # puja-blog
//!
//! Entry point: loads settings, picks post storage once, wires the services
//! into the axum router and serves until Ctrl-C / SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use api_adapters::rate_limit::RateLimitPolicy;
use api_adapters::{router, AppState, HttpOptions};
use auth_adapters::{Argon2Verifier, SharedSecretVerifier};
use configs::{AdminSettings, LogFormat, Settings, DEFAULT_ADMIN_PASSWORD};
use domains::CredentialVerifier;
use secrecy::ExposeSecret;
use services::{AdminGate, PostService};
use storage_adapters::{select_repository, StorageOptions};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = configs::load_dotenv();
    let settings = Settings::load().context("failed to load configuration")?;
    let addr = settings.bind_address();
    let Settings {
        environment,
        server,
        database,
        admin,
        cors,
        rate_limit,
        log_format,
    } = settings;

    init_tracing(log_format);
    dotenv.log();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        ?environment,
        "starting puja-blog"
    );

    // Decided once; a failed durable bootstrap lands on the in-memory store.
    let repo = select_repository(&StorageOptions {
        database_url: database.url,
        max_connections: database.max_connections,
        connect_timeout: database.connect_timeout,
        require_tls: database.require_tls,
    })
    .await;

    let verifier = credential_verifier(admin)?;

    let state = AppState::new(
        PostService::new(repo),
        AdminGate::new(verifier),
        RateLimitPolicy {
            max_requests: rate_limit.max_requests,
            window: rate_limit.window,
        },
    );
    state.limiter.spawn_sweeper();

    let app = router(
        state,
        &HttpOptions {
            allowed_origins: cors.allowed_origins,
            body_limit_bytes: server.body_limit_bytes,
        },
    );

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!("Server running on port {}", server.port);
    info!("Health check: http://localhost:{}/api/health", server.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,sqlx=warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn credential_verifier(admin: AdminSettings) -> Result<Arc<dyn CredentialVerifier>> {
    if let Some(phc) = admin.password_hash {
        info!("admin password checked against argon2 hash");
        let verifier = Argon2Verifier::new(admin.username, phc)
            .context("ADMIN_PASSWORD_HASH is invalid")?;
        return Ok(Arc::new(verifier));
    }

    if admin.password.expose_secret() == DEFAULT_ADMIN_PASSWORD {
        warn!("ADMIN_PASSWORD not set, using default (insecure for production)");
    }
    Ok(Arc::new(SharedSecretVerifier::new(
        admin.username,
        admin.password,
    )))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
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
                warn!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}
