// SPDX-License-Identifier: Apache-2.0

use crate::slug::Slug;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum CategoryKind {
    Genre,
    Language,
    Engine,
    Platform,
    Alternative,
    Special,
}

impl CategoryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Language => "language",
            Self::Engine => "engine",
            Self::Platform => "platform",
            Self::Alternative => "alternative",
            Self::Special => "special",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "genre" => Some(Self::Genre),
            "language" => Some(Self::Language),
            "engine" => Some(Self::Engine),
            "platform" => Some(Self::Platform),
            "alternative" => Some(Self::Alternative),
            "special" => Some(Self::Special),
            _ => None,
        }
    }
}

/// Declarative filter predicate carried by a category preset.
///
/// Unset fields apply no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CategoryFilter {
    pub language: Option<String>,
    pub topic: Option<String>,
    pub min_stars: Option<u64>,
    pub platform: Option<String>,
    pub multiplayer: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: Slug,
    pub kind: CategoryKind,
    pub description: String,
    pub filter: CategoryFilter,
}

fn category(
    name: &str,
    slug: &str,
    kind: CategoryKind,
    description: &str,
    filter: CategoryFilter,
) -> Option<Category> {
    Some(Category {
        name: name.to_string(),
        slug: Slug::parse(slug).ok()?,
        kind,
        description: description.to_string(),
        filter,
    })
}

fn language_filter(language: &str) -> CategoryFilter {
    CategoryFilter {
        language: Some(language.to_string()),
        ..CategoryFilter::default()
    }
}

fn topic_filter(topic: &str) -> CategoryFilter {
    CategoryFilter {
        topic: Some(topic.to_string()),
        ..CategoryFilter::default()
    }
}

fn build_categories() -> Vec<Category> {
    let entries = [
        category(
            "Games written in Rust",
            "rust-games",
            CategoryKind::Language,
            "Open-source games implemented primarily in Rust.",
            language_filter("Rust"),
        ),
        category(
            "Games written in C++",
            "cpp-games",
            CategoryKind::Language,
            "Open-source games implemented primarily in C++.",
            language_filter("C++"),
        ),
        category(
            "Games written in C",
            "c-games",
            CategoryKind::Language,
            "Open-source games implemented primarily in C.",
            language_filter("C"),
        ),
        category(
            "Games written in JavaScript",
            "javascript-games",
            CategoryKind::Language,
            "Browser-friendly open-source games in JavaScript or TypeScript.",
            language_filter("JavaScript"),
        ),
        category(
            "Games written in Python",
            "python-games",
            CategoryKind::Language,
            "Open-source games implemented primarily in Python.",
            language_filter("Python"),
        ),
        category(
            "Strategy games",
            "strategy",
            CategoryKind::Genre,
            "Real-time and turn-based strategy titles.",
            topic_filter("strategy"),
        ),
        category(
            "Role-playing games",
            "rpg",
            CategoryKind::Genre,
            "RPGs, dungeon crawlers, and adventure hybrids.",
            topic_filter("rpg"),
        ),
        category(
            "Shooters",
            "shooter",
            CategoryKind::Genre,
            "First- and third-person shooters.",
            topic_filter("shooter"),
        ),
        category(
            "Roguelikes",
            "roguelike",
            CategoryKind::Genre,
            "Procedural permadeath classics and modern takes.",
            topic_filter("roguelike"),
        ),
        category(
            "Racing games",
            "racing",
            CategoryKind::Genre,
            "Karts, rally, and arcade racers.",
            topic_filter("racing"),
        ),
        category(
            "Sandbox and voxel games",
            "sandbox",
            CategoryKind::Genre,
            "Open-world building and voxel engines.",
            topic_filter("sandbox"),
        ),
        category(
            "Godot engine games",
            "godot-games",
            CategoryKind::Engine,
            "Games built on the Godot engine.",
            topic_filter("godot"),
        ),
        category(
            "Linux-native games",
            "linux-games",
            CategoryKind::Platform,
            "Games with first-class Linux support.",
            CategoryFilter {
                platform: Some("Linux".to_string()),
                ..CategoryFilter::default()
            },
        ),
        category(
            "Multiplayer games",
            "multiplayer",
            CategoryKind::Special,
            "Games with online or local multiplayer.",
            CategoryFilter {
                multiplayer: Some(true),
                ..CategoryFilter::default()
            },
        ),
        category(
            "Hall of fame",
            "hall-of-fame",
            CategoryKind::Special,
            "The most-starred open-source games of all time.",
            CategoryFilter {
                min_stars: Some(10_000),
                ..CategoryFilter::default()
            },
        ),
    ];
    entries.into_iter().flatten().collect()
}

/// Built-in category presets. Computed once; read-only afterwards.
#[must_use]
pub fn builtin_categories() -> &'static [Category] {
    static CATEGORIES: OnceLock<Vec<Category>> = OnceLock::new();
    CATEGORIES.get_or_init(build_categories)
}
