#![forbid(unsafe_code)]

use rusqlite::Connection;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

pub mod cache;
pub mod config;
pub mod http;

pub use config::ApiConfig;
pub use http::build_router;

pub const CRATE_NAME: &str = "opengames-server";

/// Mutex-held SQLite handle. The service is read-mostly; a single shared
/// connection keeps the concurrency story to "externally synchronized
/// resource accessed via request/response calls".
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    #[must_use]
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().await
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Option<Arc<Database>>,
    pub config: Arc<ApiConfig>,
    pub response_cache: Arc<Mutex<cache::ResponseCache>>,
    pub coalescer: Arc<cache::RequestCoalescer>,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(db: Option<Arc<Database>>, config: ApiConfig) -> Self {
        let response_cache = if config.enable_response_cache {
            cache::ResponseCache::new(config.cache_max_entries)
        } else {
            cache::ResponseCache::disabled()
        };
        Self {
            db,
            config: Arc::new(config),
            response_cache: Arc::new(Mutex::new(response_cache)),
            coalescer: Arc::new(cache::RequestCoalescer::new()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}
