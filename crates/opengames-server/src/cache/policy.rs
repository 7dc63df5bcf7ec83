// SPDX-License-Identifier: Apache-2.0

use crate::config::ApiConfig;
use opengames_model::sha256_hex;
use std::time::Duration;

pub const TTL_SHORT: Duration = Duration::from_secs(60);
pub const TTL_MEDIUM: Duration = Duration::from_secs(300);
pub const TTL_LONG: Duration = Duration::from_secs(3600);

/// Volatility tier assigned per response family: short for listing and
/// search results, medium for single-entity and stats lookups, long for
/// near-static category listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlTier {
    Short,
    Medium,
    Long,
}

impl TtlTier {
    #[must_use]
    pub fn duration(self, config: &ApiConfig) -> Duration {
        match self {
            Self::Short => config.ttl_short,
            Self::Medium => config.ttl_medium,
            Self::Long => config.ttl_long,
        }
    }
}

/// Deterministic cache key for a logical request: family prefix plus a hash
/// of the query pairs sorted by key then value, so identical logical
/// requests map to the same key regardless of parameter order.
#[must_use]
pub fn canonical_key(family: &str, pairs: &[(String, String)]) -> String {
    let mut kv: Vec<&(String, String)> = pairs.iter().collect();
    kv.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    let joined = kv
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{family}:{}", sha256_hex(joined.as_bytes()))
}

#[must_use]
pub fn slug_key(slug: &str, include_related: bool) -> String {
    format!("games:slug:{slug}:related={include_related}")
}
