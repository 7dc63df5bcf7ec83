#![forbid(unsafe_code)]

use opengames_server::{build_router, ApiConfig, AppState, Database};
use opengames_query::{create_search_index, init_schema, load_catalog, seed_catalog, StoreError};
use rusqlite::Connection;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn config_from_env() -> ApiConfig {
    let mut config = ApiConfig::default();
    if let Ok(addr) = env::var("OPENGAMES_ADDR") {
        config.bind_addr = addr;
    }
    config.db_path = env::var("OPENGAMES_DB").ok().map(PathBuf::from);
    config.admin_token = env::var("OPENGAMES_ADMIN_TOKEN")
        .ok()
        .filter(|v| !v.is_empty());
    config.enable_response_cache = env_bool("OPENGAMES_RESPONSE_CACHE", true);
    config.cache_max_entries = env_usize("OPENGAMES_CACHE_ENTRIES", 1024);
    config.ttl_short = Duration::from_secs(env_u64("OPENGAMES_TTL_SHORT_SECS", 60));
    config.ttl_medium = Duration::from_secs(env_u64("OPENGAMES_TTL_MEDIUM_SECS", 300));
    config.ttl_long = Duration::from_secs(env_u64("OPENGAMES_TTL_LONG_SECS", 3600));
    config.seed_empty_store = env_bool("OPENGAMES_SEED_EMPTY", true);
    config
}

fn open_database(config: &ApiConfig) -> Result<Option<Database>, StoreError> {
    let Some(path) = &config.db_path else {
        return Ok(None);
    };
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
    if count == 0 && config.seed_empty_store {
        let seed = seed_catalog();
        load_catalog(&conn, &seed)?;
        let indexed = create_search_index(&conn)?;
        info!(
            "seeded empty store at {} with {} games ({indexed} indexed)",
            path.display(),
            seed.len()
        );
    }
    Ok(Some(Database::new(conn)))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config_from_env();
    let db = match open_database(&config) {
        Ok(Some(db)) => {
            info!("serving from sqlite store");
            Some(Arc::new(db))
        }
        Ok(None) => {
            info!("no store configured; serving the in-memory fallback catalog");
            None
        }
        Err(err) => {
            error!("failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };
    if config.admin_token.is_none() {
        info!("no admin token configured; admin endpoints will deny all requests");
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {bind_addr}: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!("listening on {bind_addr}");
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
