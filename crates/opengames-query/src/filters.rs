use opengames_model::Game;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Request-scoped conjunction of optional predicates.
///
/// An unset field applies no constraint. Within `topics`, membership is OR
/// across the given values; `platforms` requires every given value to be
/// present. The asymmetry is intentional: topics are descriptive tags,
/// platforms are hard requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameFilter {
    pub languages: Option<Vec<String>>,
    pub genres: Option<Vec<String>>,
    pub min_stars: Option<u64>,
    pub max_stars: Option<u64>,
    pub multiplayer: Option<bool>,
    pub topics: Option<Vec<String>>,
    pub platforms: Option<Vec<String>>,
    pub has_release: Option<bool>,
}

impl GameFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum SortField {
    Stars,
    LastCommit,
    CreatedAt,
    Title,
    DownloadCount,
}

impl SortField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::LastCommit => "lastCommit",
            Self::CreatedAt => "createdAt",
            Self::Title => "title",
            Self::DownloadCount => "downloadCount",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "stars" => Some(Self::Stars),
            "lastCommit" => Some(Self::LastCommit),
            "createdAt" => Some(Self::CreatedAt),
            "title" => Some(Self::Title),
            "downloadCount" => Some(Self::DownloadCount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: SortField::Stars,
            order: SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    #[must_use]
    pub fn has_more(&self, total: u64) -> bool {
        self.page.saturating_mul(self.page_size) < total
    }
}

/// One page of results plus the full match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GamePage {
    pub items: Vec<Game>,
    pub total: u64,
}

/// Canonical lookup normalization: NFKC + Unicode lowercase.
#[must_use]
pub fn normalize_lookup(input: &str) -> String {
    input.nfkc().collect::<String>().to_lowercase()
}

#[must_use]
pub fn escape_like_prefix(prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        match c {
            '!' | '%' | '_' => {
                out.push('!');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
