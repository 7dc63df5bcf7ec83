#![forbid(unsafe_code)]

use sha2::{Digest, Sha256};

pub const CRATE_NAME: &str = "opengames-model";

mod category;
mod game;
mod slug;

pub use category::{builtin_categories, Category, CategoryFilter, CategoryKind};
pub use game::{DevicePick, Game};
pub use slug::{Slug, ValidationError, SLUG_MAX_LEN};

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
