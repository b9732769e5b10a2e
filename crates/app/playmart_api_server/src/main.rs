//! PlayMart API server binary.
//!
//! Serves registration, login, and profile endpoints over PostgreSQL, or over
//! an in-memory store when started with `--in-memory`.

use std::sync::Arc;

use clap::Parser;
use playmart_api::config::ApiConfig;
use playmart_core::auth::service::AuthService;
use playmart_core::store::UserStore;
use playmart_core::store::memory::InMemoryUserStore;
use playmart_core::store::postgres::PgUserStore;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "playmart_api_server", about = "PlayMart API server")]
struct Args {
    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 3100)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/playmart"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Access token lifetime in seconds (overrides `ACCESS_TOKEN_TTL_SECS`).
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    token_ttl_secs: Option<i64>,

    /// bcrypt cost factor for new password digests (overrides `BCRYPT_COST`).
    #[arg(long, value_parser = clap::value_parser!(u32).range(4..=31))]
    bcrypt_cost: Option<u32>,

    /// Keep accounts in process memory instead of PostgreSQL. Data is lost on exit.
    #[arg(long, default_value_t = false)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,playmart_api=debug,playmart_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    info!(port = args.port, in_memory = args.in_memory, "starting playmart_api_server");

    let mut config = ApiConfig::from_env();
    config.bind_addr = format!("127.0.0.1:{}", args.port);
    config.pg_connection_url = args.database_url;
    if let Some(ttl) = args.token_ttl_secs {
        config.auth.access_token_ttl_secs = ttl;
    }
    if let Some(cost) = args.bcrypt_cost {
        config.auth.bcrypt_cost = cost;
    }

    let (store, pool): (Arc<dyn UserStore>, _) = if args.in_memory {
        warn!("using in-memory account store; nothing will be persisted");
        (Arc::new(InMemoryUserStore::new()), None)
    } else {
        info!(
            database_url = %config.pg_connection_url,
            max_connections = args.max_connections,
            "configuring connection pool"
        );
        let pool = PgPoolOptions::new()
            .max_connections(args.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&config.pg_connection_url)
            .await?;

        info!("running database migrations");
        playmart_api::migrate(&pool).await?;

        (Arc::new(PgUserStore::new(pool.clone())), Some(pool))
    };

    let state = playmart_api::AppState {
        auth: Arc::new(AuthService::from_config(store, &config.auth)),
        pool,
    };

    let app = playmart_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
