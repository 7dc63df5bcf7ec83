// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// The full-text index is absent or not yet provisioned. This is the
    /// only kind callers may recover from by switching to the substring
    /// fallback path.
    MissingIndex,
    Sql,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn missing_index() -> Self {
        Self::new(
            StoreErrorKind::MissingIndex,
            "full-text search index is not provisioned",
        )
    }

    #[must_use]
    pub fn sql(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Sql, message)
    }

    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Unavailable, message)
    }

    #[must_use]
    pub const fn is_missing_index(&self) -> bool {
        matches!(self.kind, StoreErrorKind::MissingIndex)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::sql(value.to_string())
    }
}
