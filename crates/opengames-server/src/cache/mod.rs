mod coalesce;
mod policy;
mod response;

pub use coalesce::RequestCoalescer;
pub use policy::{canonical_key, slug_key, TtlTier, TTL_LONG, TTL_MEDIUM, TTL_SHORT};
pub use response::{CachedResponse, ResponseCache};
