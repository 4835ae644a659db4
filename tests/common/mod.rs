//! Shared fixture for the integration tests.
#![allow(dead_code)]

use folio::db::{Fixture, Store};
use serde_json::{Value, json};
use uuid::Uuid;

pub const OWNER: u128 = 1;
pub const CATEGORY_AI: u128 = 2;
pub const CATEGORY_WEB: u128 = 3;
pub const TAG_RUST: u128 = 4;
pub const TAG_ML: u128 = 5;

pub const SERIES: u128 = 10;
/// Series members: orders [0, 2, 0, 1], published on consecutive days.
pub const EPISODE_A: u128 = 11;
pub const EPISODE_B: u128 = 12;
pub const EPISODE_C: u128 = 13;
pub const EPISODE_D: u128 = 14;

pub const PROJECT_CHATBOT: u128 = 21;
pub const PROJECT_WIDGET: u128 = 22;
pub const PROJECT_VISION: u128 = 23;
pub const PROJECT_SITE: u128 = 24;
pub const PROJECT_COMPILER: u128 = 25;

pub const IDEA_OPEN: u128 = 31;
pub const IDEA_SOLO: u128 = 32;

/// Posts outside the series.
pub const FILLER_POSTS: u128 = 21;
pub const TOTAL_POSTS: u64 = 25;

pub fn id(n: u128) -> String {
    Uuid::from_u128(n).to_string()
}

pub fn temp_database_url() -> String {
    let path = std::env::temp_dir().join(format!("folio-test-{}.db", Uuid::new_v4()));
    format!("sqlite:{}", path.display())
}

pub async fn seeded_store() -> Store {
    let store = Store::new(&temp_database_url())
        .await
        .expect("Failed to open test database");
    store
        .seed(&fixture())
        .await
        .expect("Failed to seed test database");
    store
}

fn episode(n: u128, slug: &str, order: i32, day: u32, minutes: i32) -> Value {
    json!({
        "id": id(n),
        "slug": slug,
        "title": format!("Episode {slug}"),
        "excerpt": format!("About {slug}"),
        "content": "Body",
        "reading_time": minutes,
        "series": "rust-from-scratch",
        "series_order": order,
        "published_at": format!("2024-01-{day:02}T08:00:00"),
    })
}

/// The shared catalog as raw JSON, for tests that tweak it before seeding.
pub fn fixture_json() -> Value {
    let mut posts = vec![
        {
            let mut first = episode(EPISODE_A, "ownership", 0, 1, 20);
            first["category"] = json!("ai");
            first["tags"] = json!(["rust", "ml"]);
            first
        },
        episode(EPISODE_B, "borrowing", 2, 2, 15),
        episode(EPISODE_C, "lifetimes", 0, 3, 30),
        episode(EPISODE_D, "setup", 1, 4, 10),
    ];
    for i in 0..FILLER_POSTS {
        let day = u32::try_from(i).unwrap() + 1;
        let category = if i % 2 == 0 { "web" } else { "ai" };
        let featured = i == 0;
        posts.push(json!({
            "id": id(1000 + i),
            "slug": format!("note-{day}"),
            "title": format!("Note {day}"),
            "excerpt": "A short note",
            "content": "Notes",
            "reading_time": 3,
            "is_featured": featured,
            "category": category,
            "published_at": format!("2024-02-{day:02}T09:00:00"),
        }));
    }

    json!({
        "owner": {
            "id": id(OWNER),
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
        },
        "languages": [
            { "code": "en", "name": "English", "native_name": "English" },
            { "code": "zh", "name": "Chinese", "native_name": "中文" },
        ],
        "categories": [
            { "id": id(CATEGORY_AI), "name": "Artificial Intelligence", "slug": "ai" },
            { "id": id(CATEGORY_WEB), "name": "Web", "slug": "web" },
        ],
        "tags": [
            { "id": id(TAG_RUST), "name": "Rust", "slug": "rust" },
            { "id": id(TAG_ML), "name": "Machine Learning", "slug": "ml" },
        ],
        "series": [
            {
                "id": id(SERIES),
                "title": "Rust from scratch",
                "slug": "rust-from-scratch",
                "description": "Learning Rust one concept at a time",
            },
        ],
        "posts": posts,
        "projects": [
            {
                "id": id(PROJECT_CHATBOT),
                "slug": "support-bot",
                "title": "Support ChatBot",
                "description": "Answers support tickets",
                "category": "ai",
                "tags": ["ml", "rust"],
                "technologies": ["Rust", "Axum", "SQLite"],
                "sort_order": 1,
                "start_date": "2024-03-01",
            },
            {
                "id": id(PROJECT_WIDGET),
                "slug": "chat-widget",
                "title": "Chatbot widget",
                "description": "Embeddable chat front end",
                "category": "web",
                "sort_order": 2,
            },
            {
                "id": id(PROJECT_VISION),
                "slug": "vision",
                "title": "Vision models",
                "description": "Image classification experiments",
                "content_type": "research",
                "category": "ai",
                "sort_order": 3,
                "start_date": "2023-05-01",
            },
            {
                "id": id(PROJECT_SITE),
                "slug": "portfolio-site",
                "title": "Portfolio site",
                "category": "web",
                "sort_order": 4,
                "start_date": "2022-01-01",
            },
            {
                "id": id(PROJECT_COMPILER),
                "slug": "toy-compiler",
                "title": "Toy compiler",
                "description": "A small compiler",
                "sort_order": 5,
            },
        ],
        "ideas": [
            {
                "id": id(IDEA_OPEN),
                "slug": "federated-notes",
                "title": "Federated notes",
                "abstract": "Notes that sync across servers",
                "motivation": "Own your data",
                "methodology": "Prototype, then measure",
                "collaboration_required": true,
                "funding_status": "seeking",
                "published_at": "2024-03-01T10:00:00",
            },
            {
                "id": id(IDEA_SOLO),
                "slug": "type-level-units",
                "title": "Type-level units",
                "abstract": "Units of measure in the type system",
                "published_at": "2023-06-01T10:00:00",
            },
        ],
        "translations": [
            {
                "item_id": id(EPISODE_A),
                "item_kind": "blog_post",
                "language_code": "zh",
                "title": "所有权",
                "excerpt": "",
            },
            {
                "item_id": id(IDEA_OPEN),
                "item_kind": "idea",
                "language_code": "zh",
                "body": "拥有你的数据",
            },
        ],
    })
}

pub fn fixture() -> Fixture {
    serde_json::from_value(fixture_json()).expect("Fixture does not deserialize")
}
