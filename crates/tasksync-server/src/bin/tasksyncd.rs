//! `TaskSync` server daemon.
//!
//! Binds the TCP listener and serves the task board over the binary wire
//! protocol.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tasksync_auth::{IdentityProvider, JwtConfig, SessionVerifier};
use tasksync_fraud::{FraudChecker, VelocityChecker};
use tasksync_server::{RequestHandler, Server, ServerConfig};
use tasksync_sharing::{LinkIssuer, ShareLinkConfig};
use tasksync_store::{MemoryTaskStore, TaskStore};

/// `TaskSync` server daemon.
#[derive(Parser)]
#[command(name = "tasksyncd")]
#[command(about = "TaskSync server daemon", long_about = None)]
struct Cli {
    /// Address to bind to.
    #[arg(short, long, default_value = "127.0.0.1:7450")]
    bind: SocketAddr,

    /// JWT secret for session verification.
    #[arg(long, env = "TASKSYNC_JWT_SECRET")]
    jwt_secret: String,

    /// Public domain embedded in share links.
    #[arg(long, default_value = "tasksync.com")]
    share_domain: String,

    /// Share requests allowed per minute per identity before the fraud
    /// checker flags a velocity anomaly.
    #[arg(long, default_value = "5")]
    share_velocity_limit: usize,

    /// Per-connection request limit per minute (0 disables rate limiting).
    #[arg(long, default_value = "0")]
    rate_limit: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasksync_server=info".parse().expect("valid filter")),
        )
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    tracing::info!("Starting TaskSync server on {}", cli.bind);

    let store: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());
    let identity: Arc<dyn IdentityProvider> =
        Arc::new(SessionVerifier::new(JwtConfig::new(cli.jwt_secret)));
    let checker: Arc<dyn FraudChecker> =
        Arc::new(VelocityChecker::per_minute(cli.share_velocity_limit));
    let issuer = LinkIssuer::new(
        identity.clone(),
        checker,
        ShareLinkConfig::new(cli.share_domain),
    );

    let handler = RequestHandler::new(store, identity, issuer);

    let mut config = ServerConfig::new(cli.bind);
    if cli.rate_limit > 0 {
        config = config.with_rate_limit(cli.rate_limit, Duration::from_secs(60));
    }

    let mut server = Server::new(config, handler)
        .with_context(|| format!("Failed to bind to {}", cli.bind))?;

    server.run().context("server event loop exited")?;
    Ok(())
}
