use crate::slug::Slug;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Curated affiliate hardware recommendation attached to a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DevicePick {
    pub name: String,
    pub url: String,
}

/// One catalogued open-source game repository.
///
/// Star, fork, and download counts are unsigned by construction; the slug is
/// unique and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub slug: Slug,
    pub title: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub repository_url: String,
    pub language: Option<String>,
    pub genre: Option<String>,
    pub topics: Vec<String>,
    pub platforms: Vec<String>,
    pub stars: u64,
    pub forks: u64,
    pub downloads: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub last_commit: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_archived: bool,
    pub is_multiplayer: bool,
    pub latest_release: Option<String>,
    pub thumbnail: Option<String>,
    pub screenshots: Vec<String>,
    pub device_picks: Vec<DevicePick>,
}

impl Game {
    #[must_use]
    pub fn has_release(&self) -> bool {
        self.latest_release.is_some()
    }
}
