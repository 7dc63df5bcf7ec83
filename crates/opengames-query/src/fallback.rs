//! Static in-memory game list served when no relational store is
//! configured. Built once per process behind a single-flight guard;
//! concurrent first requests await the same initialization.

use chrono::{DateTime, Utc};
use opengames_model::{DevicePick, Game, Slug};
use std::sync::Arc;
use tokio::sync::OnceCell;

static FALLBACK: OnceCell<Arc<Vec<Game>>> = OnceCell::const_new();

/// Process-wide memoized fallback catalog.
pub async fn fallback_catalog() -> Arc<Vec<Game>> {
    FALLBACK
        .get_or_init(|| async { Arc::new(seed_catalog()) })
        .await
        .clone()
}

fn ts(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

#[allow(clippy::too_many_arguments)]
fn game(
    id: i64,
    slug: &str,
    title: &str,
    description: &str,
    repository_url: &str,
    language: &str,
    genre: &str,
    topics: &[&str],
    platforms: &[&str],
    stars: u64,
    forks: u64,
    downloads: u64,
    created_at: &str,
    last_commit: &str,
    is_multiplayer: bool,
    latest_release: Option<&str>,
) -> Option<Game> {
    Some(Game {
        id,
        slug: Slug::parse(slug).ok()?,
        title: title.to_string(),
        description: Some(description.to_string()),
        homepage: None,
        repository_url: repository_url.to_string(),
        language: Some(language.to_string()),
        genre: Some(genre.to_string()),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        platforms: platforms.iter().map(|p| p.to_string()).collect(),
        stars,
        forks,
        downloads,
        created_at: ts(created_at),
        last_commit: ts(last_commit),
        updated_at: ts(last_commit),
        is_archived: false,
        is_multiplayer,
        latest_release: latest_release.map(str::to_string),
        thumbnail: None,
        screenshots: Vec::new(),
        device_picks: Vec::new(),
    })
}

/// The seed corpus behind [`fallback_catalog`]. Pure; also used as the SQL
/// fixture in tests so both paths are exercised over identical rows.
#[must_use]
pub fn seed_catalog() -> Vec<Game> {
    let mut games: Vec<Game> = [
        game(
            1,
            "0ad",
            "0 A.D.",
            "Real-time strategy game of ancient warfare with historically accurate civilizations.",
            "https://github.com/0ad/0ad",
            "C++",
            "strategy",
            &["strategy", "rts", "history"],
            &["Windows", "Linux", "macOS"],
            10_400,
            1_450,
            2_500_000,
            "2011-03-14T12:00:00Z",
            "2025-06-20T09:30:00Z",
            true,
            Some("a27"),
        ),
        game(
            2,
            "supertuxkart",
            "SuperTuxKart",
            "Free kart racing game starring Tux and friends, with online multiplayer.",
            "https://github.com/supertuxkart/stk-code",
            "C++",
            "racing",
            &["racing", "kart", "arcade"],
            &["Windows", "Linux", "macOS", "Android"],
            4_900,
            1_100,
            8_000_000,
            "2011-05-02T08:00:00Z",
            "2025-05-11T17:45:00Z",
            true,
            Some("1.4"),
        ),
        game(
            3,
            "battle-for-wesnoth",
            "The Battle for Wesnoth",
            "Turn-based tactical strategy in a high-fantasy world of elves and orcs.",
            "https://github.com/wesnoth/wesnoth",
            "C++",
            "strategy",
            &["strategy", "turn-based", "fantasy"],
            &["Windows", "Linux", "macOS"],
            5_800,
            1_050,
            3_200_000,
            "2010-09-20T10:00:00Z",
            "2025-07-01T14:20:00Z",
            true,
            Some("1.18.2"),
        ),
        game(
            4,
            "veloren",
            "Veloren",
            "Multiplayer voxel RPG written in Rust, inspired by Cube World and Breath of the Wild.",
            "https://gitlab.com/veloren/veloren",
            "Rust",
            "rpg",
            &["rpg", "voxel", "sandbox"],
            &["Windows", "Linux", "macOS"],
            6_300,
            520,
            900_000,
            "2018-05-16T19:00:00Z",
            "2025-07-18T21:05:00Z",
            true,
            Some("0.17.0"),
        ),
        game(
            5,
            "mindustry",
            "Mindustry",
            "Automation tower defense: build conveyor factories and defend them in real time.",
            "https://github.com/Anuken/Mindustry",
            "Java",
            "strategy",
            &["strategy", "tower-defense", "sandbox"],
            &["Windows", "Linux", "macOS", "Android", "iOS"],
            23_000,
            3_100,
            12_000_000,
            "2017-04-30T16:00:00Z",
            "2025-07-10T11:00:00Z",
            true,
            Some("v146"),
        ),
        game(
            6,
            "openra",
            "OpenRA",
            "Modernized engine for classic Westwood real-time strategy titles.",
            "https://github.com/OpenRA/OpenRA",
            "C#",
            "strategy",
            &["strategy", "rts", "retro"],
            &["Windows", "Linux", "macOS"],
            15_200,
            2_700,
            4_100_000,
            "2010-01-07T13:00:00Z",
            "2025-06-05T08:40:00Z",
            true,
            Some("release-20250303"),
        ),
        game(
            7,
            "xonotic",
            "Xonotic",
            "Fast-paced arena first-person shooter, successor to Nexuiz.",
            "https://gitlab.com/xonotic/xonotic",
            "C",
            "shooter",
            &["shooter", "arena", "fps"],
            &["Windows", "Linux", "macOS"],
            2_300,
            380,
            1_700_000,
            "2010-03-28T09:00:00Z",
            "2025-04-22T18:15:00Z",
            true,
            Some("0.8.6"),
        ),
        game(
            8,
            "endless-sky",
            "Endless Sky",
            "Space exploration and trading sandbox in the spirit of Escape Velocity.",
            "https://github.com/endless-sky/endless-sky",
            "C++",
            "rpg",
            &["space", "sandbox", "exploration"],
            &["Windows", "Linux", "macOS"],
            6_000,
            1_300,
            2_000_000,
            "2014-07-09T07:30:00Z",
            "2025-07-15T12:10:00Z",
            false,
            Some("v0.10.8"),
        ),
        game(
            9,
            "cataclysm-dda",
            "Cataclysm: Dark Days Ahead",
            "Turn-based survival roguelike set in a post-apocalyptic world.",
            "https://github.com/CleverRaven/Cataclysm-DDA",
            "C++",
            "roguelike",
            &["roguelike", "survival", "turn-based"],
            &["Windows", "Linux", "macOS", "Android"],
            11_200,
            4_300,
            5_300_000,
            "2013-01-20T15:00:00Z",
            "2025-07-19T23:55:00Z",
            false,
            Some("0.H"),
        ),
        game(
            10,
            "shattered-pixel-dungeon",
            "Shattered Pixel Dungeon",
            "Traditional roguelike dungeon crawler with pixel art and deep item interactions.",
            "https://github.com/00-Evan/shattered-pixel-dungeon",
            "Java",
            "roguelike",
            &["roguelike", "dungeon-crawler", "pixel-art"],
            &["Windows", "Linux", "macOS", "Android", "iOS"],
            5_700,
            1_000,
            9_500_000,
            "2014-08-01T11:00:00Z",
            "2025-07-08T10:25:00Z",
            false,
            Some("v3.0.2"),
        ),
        game(
            11,
            "luanti",
            "Luanti",
            "Open voxel game engine with a thriving modding community, formerly Minetest.",
            "https://github.com/luanti-org/luanti",
            "C++",
            "sandbox",
            &["sandbox", "voxel", "engine"],
            &["Windows", "Linux", "macOS", "Android"],
            11_000,
            2_100,
            7_800_000,
            "2010-11-27T14:00:00Z",
            "2025-07-21T16:30:00Z",
            true,
            Some("5.11.0"),
        ),
        game(
            12,
            "teeworlds",
            "Teeworlds",
            "Retro multiplayer 2D shooter with grappling hooks and cartoon physics.",
            "https://github.com/teeworlds/teeworlds",
            "C++",
            "shooter",
            &["shooter", "retro", "2d"],
            &["Windows", "Linux", "macOS"],
            2_200,
            560,
            2_900_000,
            "2010-08-25T20:00:00Z",
            "",
            true,
            None,
        ),
        game(
            13,
            "supertux",
            "SuperTux",
            "Classic side-scrolling platformer starring Tux, inspired by Super Mario Bros.",
            "https://github.com/SuperTux/supertux",
            "C++",
            "platformer",
            &["platformer", "retro", "2d"],
            &["Windows", "Linux", "macOS"],
            2_800,
            670,
            3_600_000,
            "",
            "2025-06-28T13:50:00Z",
            false,
            Some("v0.6.3"),
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    for g in &mut games {
        match g.slug.as_str() {
            "0ad" => g.homepage = Some("https://play0ad.com".to_string()),
            "veloren" => g.homepage = Some("https://veloren.net".to_string()),
            "luanti" => g.homepage = Some("https://www.luanti.org".to_string()),
            "teeworlds" => g.is_archived = true,
            "mindustry" => {
                g.device_picks = vec![DevicePick {
                    name: "Steam Deck".to_string(),
                    url: "https://store.steampowered.com/steamdeck".to_string(),
                }];
            }
            _ => {}
        }
    }
    games
}
