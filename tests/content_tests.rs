//! Integration tests for catalog listing, localization, series and counters.

mod common;

use common::*;
use folio::catalog::{FilterParams, Language};
use folio::domain::{ContentKind, CounterDirection, CounterField, ItemKey};
use folio::entities::sea_orm_active_enums::ItemKind;
use folio::services::{
    CatalogSettings, ContentError, ContentService, CounterError, CounterService, ListQuery,
    SeaOrmContentService, SeaOrmCounterService, SeaOrmSeriesService, SeriesError, SeriesQuery,
    SeriesService,
};
use futures::future::join_all;
use std::sync::Arc;

async fn content() -> (folio::db::Store, SeaOrmContentService) {
    let store = seeded_store().await;
    let service = SeaOrmContentService::new(store.clone(), CatalogSettings::default());
    (store, service)
}

fn page(page: &str, size: &str) -> ListQuery {
    ListQuery {
        page: Some(page.to_string()),
        size: Some(size.to_string()),
        ..ListQuery::default()
    }
}

fn filtered(filter: FilterParams) -> ListQuery {
    ListQuery {
        filter,
        ..ListQuery::default()
    }
}

#[tokio::test]
async fn test_pagination_law_on_posts() {
    let (_, service) = content().await;

    let first = service.list_posts(&page("1", "10")).await.unwrap();
    assert_eq!(first.total, TOTAL_POSTS);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.items.len(), 10);

    let last = service.list_posts(&page("3", "10")).await.unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.page, 3);
    assert_eq!(last.size, 10);

    let beyond = service.list_posts(&page("4", "10")).await.unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, TOTAL_POSTS);
}

#[tokio::test]
async fn test_posts_are_newest_first_and_stable() {
    let (_, service) = content().await;

    let all = service.list_posts(&page("1", "100")).await.unwrap();
    let dates: Vec<&str> = all.items.iter().map(|p| p.published_at.as_str()).collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
    assert_eq!(all.items[0].slug, "note-21");
    assert_eq!(all.items.last().unwrap().slug, "ownership");

    let again = service.list_posts(&page("1", "100")).await.unwrap();
    assert_eq!(all, again);
}

#[tokio::test]
async fn test_empty_result_has_zero_pages() {
    let (_, service) = content().await;

    let query = filtered(FilterParams {
        search: Some("no such text anywhere".to_string()),
        ..FilterParams::default()
    });
    let result = service.list_posts(&query).await.unwrap();
    assert_eq!(result.total, 0);
    assert_eq!(result.total_pages, 0);
    assert!(result.items.is_empty());
}

#[tokio::test]
async fn test_post_relations_are_denormalized() {
    let (_, service) = content().await;

    let post = service
        .get_post(&ItemKey::id(&id(EPISODE_A)).unwrap(), None)
        .await
        .unwrap();
    assert_eq!(post.author_name, "Ada Lovelace");
    assert_eq!(post.category_name, "Artificial Intelligence");
    assert_eq!(post.tags, ["Rust", "Machine Learning"]);
    assert_eq!(post.series_id, id(SERIES));
    assert_eq!(post.series_title, "Rust from scratch");
    assert_eq!(post.series_position, 3);
    assert_eq!(post.series_total, 4);
    assert_eq!(post.published_at, "2024-01-01 08:00:00");

    let filler = service
        .get_post(&ItemKey::slug("note-2").unwrap(), None)
        .await
        .unwrap();
    assert!(filler.tags.is_empty());
    assert_eq!(filler.series_id, "");
    assert_eq!(filler.series_position, 0);
}

#[tokio::test]
async fn test_missing_translation_falls_back_to_base_text() {
    let (_, service) = content().await;

    let untranslated = service
        .get_post(&ItemKey::id(&id(EPISODE_B)).unwrap(), Some("zh"))
        .await
        .unwrap();
    assert_eq!(untranslated.title, "Episode borrowing");
    assert_eq!(untranslated.language, "en");

    let base = service
        .get_post(&ItemKey::id(&id(EPISODE_B)).unwrap(), Some("en"))
        .await
        .unwrap();
    assert_eq!(untranslated, base);

    let translated = service
        .get_post(&ItemKey::id(&id(EPISODE_A)).unwrap(), Some("zh-CN"))
        .await
        .unwrap();
    assert_eq!(translated.title, "所有权");
    assert_eq!(translated.excerpt, "About ownership");

    let unsupported = service
        .get_post(&ItemKey::id(&id(EPISODE_A)).unwrap(), Some("fr"))
        .await
        .unwrap();
    assert_eq!(unsupported.title, "Episode ownership");
    assert_eq!(unsupported.language, "en");
}

#[tokio::test]
async fn test_idea_translation_covers_motivation() {
    let (_, service) = content().await;

    let idea = service
        .get_idea(&ItemKey::slug("federated-notes").unwrap(), Some("zh"))
        .await
        .unwrap();
    assert_eq!(idea.motivation, "拥有你的数据");
    assert_eq!(idea.title, "Federated notes");
    assert_eq!(idea.methodology, "Prototype, then measure");
}

#[tokio::test]
async fn test_slug_and_id_lookups_agree() {
    let (_, service) = content().await;

    let by_id = service
        .get_project(&ItemKey::id(&id(PROJECT_CHATBOT)).unwrap(), None)
        .await
        .unwrap();
    let by_slug = service
        .get_project(&ItemKey::slug("Support-Bot").unwrap(), None)
        .await
        .unwrap();
    assert_eq!(by_id, by_slug);
    assert_eq!(by_id.technologies, ["Rust", "Axum", "SQLite"]);
    assert_eq!(by_id.tags, ["Machine Learning", "Rust"]);
    assert_eq!(by_id.start_date, "2024-03-01");
    assert_eq!(by_id.github_url, "");
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let (_, service) = content().await;

    let err = service
        .get_post(&ItemKey::id(&id(999_999)).unwrap(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ContentError::NotFound {
            kind: ContentKind::BlogPost,
            ..
        }
    ));

    let err = service
        .get_idea(&ItemKey::slug("nothing-here").unwrap(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ContentError::NotFound { .. }));
}

#[tokio::test]
async fn test_malformed_requests_name_the_field() {
    let (_, service) = content().await;

    let field = |err: ContentError| match err {
        ContentError::Validation(e) => e.field,
        other => panic!("expected a validation error, got {other:?}"),
    };

    let err = service.list_posts(&page("0", "10")).await.unwrap_err();
    assert_eq!(field(err), "page");

    let err = service.list_posts(&page("1", "101")).await.unwrap_err();
    assert_eq!(field(err), "size");

    let query = filtered(FilterParams {
        year: Some("twenty".to_string()),
        ..FilterParams::default()
    });
    assert_eq!(field(service.list_posts(&query).await.unwrap_err()), "year");

    let query = filtered(FilterParams {
        featured: Some("maybe".to_string()),
        ..FilterParams::default()
    });
    assert_eq!(
        field(service.list_posts(&query).await.unwrap_err()),
        "featured"
    );

    let query = filtered(FilterParams {
        status: Some("hidden".to_string()),
        ..FilterParams::default()
    });
    assert_eq!(
        field(service.list_ideas(&query).await.unwrap_err()),
        "status"
    );
}

#[tokio::test]
async fn test_category_and_search_intersect() {
    let (_, service) = content().await;

    let query = filtered(FilterParams {
        category: Some("ai".to_string()),
        search: Some("chatbot".to_string()),
        ..FilterParams::default()
    });
    let result = service.list_projects(&query).await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].id, id(PROJECT_CHATBOT));
}

#[tokio::test]
async fn test_project_filters_and_order() {
    let (_, service) = content().await;

    let all = service.list_projects(&ListQuery::default()).await.unwrap();
    let slugs: Vec<&str> = all.items.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(
        slugs,
        [
            "support-bot",
            "chat-widget",
            "vision",
            "portfolio-site",
            "toy-compiler"
        ]
    );

    let research = service
        .list_projects(&filtered(FilterParams {
            content_type: Some("Research".to_string()),
            ..FilterParams::default()
        }))
        .await
        .unwrap();
    assert_eq!(research.total, 1);
    assert_eq!(research.items[0].content_type, "research");

    let in_2023 = service
        .list_projects(&filtered(FilterParams {
            year: Some("2023".to_string()),
            ..FilterParams::default()
        }))
        .await
        .unwrap();
    assert_eq!(in_2023.total, 1);
    assert_eq!(in_2023.items[0].slug, "vision");

    let tagged = service
        .list_projects(&filtered(FilterParams {
            tag: Some("rust".to_string()),
            ..FilterParams::default()
        }))
        .await
        .unwrap();
    assert_eq!(tagged.total, 1);
}

#[tokio::test]
async fn test_post_filters() {
    let (_, service) = content().await;

    let featured = service
        .list_posts(&filtered(FilterParams {
            featured: Some("true".to_string()),
            ..FilterParams::default()
        }))
        .await
        .unwrap();
    assert_eq!(featured.total, 1);
    assert_eq!(featured.items[0].slug, "note-1");

    let tagged = service
        .list_posts(&filtered(FilterParams {
            tag: Some("ML".to_string()),
            ..FilterParams::default()
        }))
        .await
        .unwrap();
    assert_eq!(tagged.total, 1);
    assert_eq!(tagged.items[0].slug, "ownership");

    let none_in_2023 = service
        .list_posts(&filtered(FilterParams {
            year: Some("2023".to_string()),
            ..FilterParams::default()
        }))
        .await
        .unwrap();
    assert_eq!(none_in_2023.total, 0);

    // Unsupported keys are ignored.
    let ignored = service
        .list_posts(&filtered(FilterParams {
            funding_status: Some("seeking".to_string()),
            ..FilterParams::default()
        }))
        .await
        .unwrap();
    assert_eq!(ignored.total, TOTAL_POSTS);
}

#[tokio::test]
async fn test_idea_filters() {
    let (_, service) = content().await;

    let open = service
        .list_ideas(&filtered(FilterParams {
            collaboration_required: Some("yes".to_string()),
            ..FilterParams::default()
        }))
        .await
        .unwrap();
    assert_eq!(open.total, 1);
    assert_eq!(open.items[0].id, id(IDEA_OPEN));

    let seeking = service
        .list_ideas(&filtered(FilterParams {
            funding_status: Some("seeking".to_string()),
            ..FilterParams::default()
        }))
        .await
        .unwrap();
    assert_eq!(seeking.total, 1);

    let all = service.list_ideas(&ListQuery::default()).await.unwrap();
    assert_eq!(all.items[0].slug, "federated-notes");
    assert_eq!(all.items[1].slug, "type-level-units");
}

#[tokio::test]
async fn test_languages_are_listed() {
    let (_, service) = content().await;

    let languages = service.list_languages().await.unwrap();
    let codes: Vec<&str> = languages.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, ["en", "zh"]);
}

#[tokio::test]
async fn test_series_uses_editorial_order() {
    let store = seeded_store().await;
    let service = SeaOrmSeriesService::new(store, Language::English);

    let series = service
        .get_series(&id(SERIES), &SeriesQuery::default())
        .await
        .unwrap();
    let ids: Vec<String> = series.episodes.iter().map(|e| e.id.clone()).collect();
    assert_eq!(
        ids,
        [id(EPISODE_D), id(EPISODE_B), id(EPISODE_A), id(EPISODE_C)]
    );
    let orders: Vec<i32> = series.episodes.iter().map(|e| e.order).collect();
    assert_eq!(orders, [1, 2, 3, 4]);
    assert_eq!(series.post_count, 4);
    assert_eq!(series.total_duration, "1h 15m");
    assert_eq!(series.completed_count, 0);
    assert!(series.episodes.iter().all(|e| !e.completed));
}

#[tokio::test]
async fn test_series_viewer_progress() {
    let store = seeded_store().await;
    let service = SeaOrmSeriesService::new(store, Language::English);

    let query = SeriesQuery {
        lang: Some("zh".to_string()),
        current: Some(id(EPISODE_A)),
        completed: Some(format!("{}, {}", id(EPISODE_D), id(EPISODE_B).to_uppercase())),
    };
    let series = service.get_series(&id(SERIES), &query).await.unwrap();

    assert_eq!(series.completed_count, 2);
    assert!(series.episodes[0].completed);
    assert!(series.episodes[1].completed);
    assert!(series.episodes[2].current);
    assert_eq!(series.episodes[2].title, "所有权");
    assert_eq!(series.language, "zh");
}

#[tokio::test]
async fn test_series_errors() {
    let store = seeded_store().await;
    let service = SeaOrmSeriesService::new(store, Language::English);

    let err = service
        .get_series("not-a-uuid", &SeriesQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SeriesError::Validation(_)));

    let err = service
        .get_series(&id(4242), &SeriesQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SeriesError::NotFound(_)));
}

#[tokio::test]
async fn test_decrement_never_goes_negative() {
    let store = seeded_store().await;
    let service = SeaOrmCounterService::new(store);
    let post = id(EPISODE_C);

    let result = service
        .mutate(
            ContentKind::BlogPost,
            &post,
            CounterField::Likes,
            CounterDirection::Decrement,
        )
        .await
        .unwrap();
    assert_eq!(result.new_count, 0);

    let up = service
        .mutate(
            ContentKind::BlogPost,
            &post,
            CounterField::Likes,
            CounterDirection::Increment,
        )
        .await
        .unwrap();
    assert_eq!(up.new_count, 1);

    let down = service
        .mutate(
            ContentKind::BlogPost,
            &post,
            CounterField::Likes,
            CounterDirection::Decrement,
        )
        .await
        .unwrap();
    assert_eq!(down.new_count, 0);
}

#[tokio::test]
async fn test_concurrent_increments_all_land() {
    let store = seeded_store().await;
    let service = Arc::new(SeaOrmCounterService::new(store));
    let project = id(PROJECT_VISION);

    let tasks = (0..50).map(|_| {
        let service = Arc::clone(&service);
        let project = project.clone();
        tokio::spawn(async move {
            service
                .mutate(
                    ContentKind::ResearchProject,
                    &project,
                    CounterField::Views,
                    CounterDirection::Increment,
                )
                .await
        })
    });
    for result in join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let last = service
        .mutate(
            ContentKind::Project,
            &project,
            CounterField::Views,
            CounterDirection::Decrement,
        )
        .await
        .unwrap();
    assert_eq!(last.new_count, 49);
}

#[tokio::test]
async fn test_counter_errors() {
    let store = seeded_store().await;
    let service = SeaOrmCounterService::new(store);

    let err = service
        .mutate(
            ContentKind::Idea,
            "12",
            CounterField::Views,
            CounterDirection::Increment,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CounterError::Validation(_)));

    for direction in [CounterDirection::Increment, CounterDirection::Decrement] {
        let err = service
            .mutate(ContentKind::Idea, &id(777), CounterField::Likes, direction)
            .await
            .unwrap_err();
        assert!(matches!(err, CounterError::NotFound { .. }));
    }

    let err = service
        .mutate(
            ContentKind::Award,
            &id(IDEA_OPEN),
            CounterField::Likes,
            CounterDirection::Increment,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CounterError::Validation(_)));
}

#[tokio::test]
async fn test_removing_a_member_refreshes_series_count() {
    let store = seeded_store().await;

    assert!(store.remove_item(ItemKind::BlogPost, &id(EPISODE_B)).await.unwrap());
    assert!(!store.remove_item(ItemKind::BlogPost, &id(EPISODE_B)).await.unwrap());

    let series = store.get_series(&id(SERIES)).await.unwrap().unwrap();
    assert_eq!(series.post_count, 3);
    assert_eq!(store.series_members(&id(SERIES)).await.unwrap().len(), 3);
    assert!(!store.item_exists(ItemKind::BlogPost, &id(EPISODE_B)).await.unwrap());
}

#[tokio::test]
async fn test_reseeding_replaces_content() {
    let store = seeded_store().await;
    let report = store.seed(&fixture()).await.unwrap();
    assert_eq!(report.posts, TOTAL_POSTS);
    assert_eq!(report.projects, 5);
    assert_eq!(report.translations, 2);

    let series = store.get_series(&id(SERIES)).await.unwrap().unwrap();
    assert_eq!(series.post_count, 4);
}

fn mixed_case_fixture() -> folio::db::Fixture {
    let mut value = fixture_json();
    value["categories"][0]["slug"] = serde_json::json!("AI");
    value["posts"][0]["slug"] = serde_json::json!("Hello-World");
    value["posts"][0]["category"] = serde_json::json!("AI");
    value["posts"][0]["title"] = serde_json::json!("Café Élan");
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_mixed_case_slugs_are_reachable() {
    let store = seeded_store().await;
    store.seed(&mixed_case_fixture()).await.unwrap();
    let service = SeaOrmContentService::new(store, CatalogSettings::default());

    let post = service
        .get_post(&ItemKey::slug("Hello-World").unwrap(), None)
        .await
        .unwrap();
    assert_eq!(post.id, id(EPISODE_A));
    assert_eq!(post.slug, "hello-world");

    let query = filtered(FilterParams {
        category: Some("AI".to_string()),
        ..FilterParams::default()
    });
    let result = service.list_posts(&query).await.unwrap();
    assert!(result.items.iter().any(|p| p.id == id(EPISODE_A)));
    assert!(result.total > 1);
}

#[tokio::test]
async fn test_search_matches_non_ascii_text() {
    let store = seeded_store().await;
    store.seed(&mixed_case_fixture()).await.unwrap();
    let service = SeaOrmContentService::new(store, CatalogSettings::default());

    for term in ["Élan", "café", "CAFé"] {
        let query = filtered(FilterParams {
            search: Some(term.to_string()),
            ..FilterParams::default()
        });
        let result = service.list_posts(&query).await.unwrap();
        let ids: Vec<&str> = result.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, [id(EPISODE_A)], "{term}");
    }
}

#[tokio::test]
async fn test_duplicate_series_order_is_rejected() {
    let store = seeded_store().await;
    let mut value = fixture_json();
    value["posts"][2]["series_order"] = serde_json::json!(2);
    let duplicate: folio::db::Fixture = serde_json::from_value(value).unwrap();

    let err = store.seed(&duplicate).await.unwrap_err();
    assert!(err.to_string().contains("share order 2"), "{err}");

    let series = store.get_series(&id(SERIES)).await.unwrap().unwrap();
    assert_eq!(series.post_count, 4);
}
