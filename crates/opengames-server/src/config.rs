use crate::cache;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub db_path: Option<PathBuf>,
    /// Bearer token for admin endpoints. `None` denies every admin request.
    pub admin_token: Option<String>,
    pub enable_response_cache: bool,
    pub cache_max_entries: usize,
    pub ttl_short: Duration,
    pub ttl_medium: Duration,
    pub ttl_long: Duration,
    /// Load the seed catalog into a freshly created, empty database.
    pub seed_empty_store: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            db_path: None,
            admin_token: None,
            enable_response_cache: true,
            cache_max_entries: 1024,
            ttl_short: cache::TTL_SHORT,
            ttl_medium: cache::TTL_MEDIUM,
            ttl_long: cache::TTL_LONG,
            seed_empty_store: true,
        }
    }
}
