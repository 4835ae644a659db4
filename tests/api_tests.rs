mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::*;
use folio::config::Config;
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::PathBuf;
use tower::ServiceExt;
use uuid::Uuid;

fn resume_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("folio-resume-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("resume.en.json"),
        r#"{"profile": {"name": "Ada Lovelace", "headline": "Engineer"},
            "awards": [{"title": "Best paper"}]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("resume.zh.json"),
        r#"{"profile": {"name": "阿达", "headline": "工程师"},
            "awards": [{"title": "最佳论文"}]}"#,
    )
    .unwrap();
    dir
}

async fn spawn_app() -> Router {
    spawn_app_with(Config::default()).await
}

async fn spawn_app_with(mut config: Config) -> Router {
    config.general.database_path = temp_database_url();
    config.content.resume_path = resume_dir().display().to_string();

    let state = folio::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    state
        .store()
        .seed(&fixture())
        .await
        .expect("Failed to seed");
    folio::api::router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_list_posts_envelope() {
    let app = spawn_app().await;

    let (status, json) = get(&app, "/api/blog?page=3&size=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["total"], TOTAL_POSTS);
    assert_eq!(json["data"]["total_pages"], 3);
    assert_eq!(json["data"]["page"], 3);
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 5);

    let (status, json) = get(&app, "/api/blog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["size"], 10);
    assert_eq!(json["data"]["page"], 1);
}

#[tokio::test]
async fn test_list_filters_from_query_string() {
    let app = spawn_app().await;

    let (status, json) = get(&app, "/api/projects?category=ai&search=chatbot").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["id"], id(PROJECT_CHATBOT));
    assert_eq!(json["data"]["items"][0]["github_url"], "");

    let (_, json) = get(&app, "/api/ideas?collaboration_required=true").await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(
        json["data"]["items"][0]["abstract"],
        "Notes that sync across servers"
    );
}

#[tokio::test]
async fn test_malformed_query_is_bad_request() {
    let app = spawn_app().await;

    for uri in [
        "/api/blog?page=0",
        "/api/blog?size=abc",
        "/api/blog?year=abc",
        "/api/projects?featured=maybe",
        "/api/ideas?status=hidden",
    ] {
        let (status, json) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["success"], false, "{uri}");
        assert!(json["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_detail_lookups() {
    let app = spawn_app().await;

    let (status, json) = get(&app, &format!("/api/blog/{}?lang=zh", id(EPISODE_A))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "所有权");
    assert_eq!(json["data"]["language"], "zh");
    assert_eq!(json["data"]["series_position"], 3);
    assert_eq!(json["data"]["series_total"], 4);

    let (status, json) = get(&app, "/api/blog/slug/ownership").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "Episode ownership");

    let (status, json) = get(&app, "/api/ideas/slug/federated-notes?lang=zh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["motivation"], "拥有你的数据");

    let (status, json) = get(&app, &format!("/api/projects/{}", id(424_242))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);

    let (status, _) = get(&app, "/api/projects/slug/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = get(&app, "/api/blog/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_counter_endpoints() {
    let app = spawn_app().await;
    let post_id = id(EPISODE_B);

    let (status, json) = post(&app, &format!("/api/blog/{post_id}/views"), "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["new_count"], 1);

    let (status, json) = post(
        &app,
        &format!("/api/blog/{post_id}/likes"),
        r#"{"increment": false}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["new_count"], 0);

    let (status, json) = post(
        &app,
        &format!("/api/ideas/{}/likes", id(IDEA_SOLO)),
        r#"{"increment": true}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["new_count"], 1);

    let (_, json) = get(&app, &format!("/api/ideas/{}", id(IDEA_SOLO))).await;
    assert_eq!(json["data"]["like_count"], 1);
}

#[tokio::test]
async fn test_counter_errors() {
    let app = spawn_app().await;
    let project = id(PROJECT_SITE);

    let (status, json) = post(&app, &format!("/api/projects/{project}/shares"), "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (status, _) = post(&app, &format!("/api/projects/{project}/likes"), "{oops").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, &format!("/api/projects/{}/likes", id(9)), "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(&app, "/api/projects/42/likes", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_series_endpoint() {
    let app = spawn_app().await;

    let uri = format!(
        "/api/series/{}?current={}&completed={},{}",
        id(SERIES),
        id(EPISODE_A),
        id(EPISODE_D),
        id(EPISODE_B)
    );
    let (status, json) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);

    let series = &json["data"];
    assert_eq!(series["post_count"], 4);
    assert_eq!(series["total_duration"], "1h 15m");
    assert_eq!(series["completed_count"], 2);

    let episodes = series["episodes"].as_array().unwrap();
    let ids: Vec<&str> = episodes.iter().map(|e| e["id"].as_str().unwrap()).collect();
    assert_eq!(
        ids,
        [id(EPISODE_D), id(EPISODE_B), id(EPISODE_A), id(EPISODE_C)]
    );
    assert_eq!(episodes[2]["current"], true);
    assert_eq!(episodes[0]["completed"], true);
    assert_eq!(episodes[3]["completed"], false);
    for episode in episodes {
        assert!(episode["duration"].as_str().unwrap().ends_with('m'));
        assert!(episode["order"].is_i64());
        assert!(episode["title"].is_string());
    }
    assert!(series["created_at"].as_str().is_some_and(|v| !v.is_empty()));
    assert!(series["updated_at"].as_str().is_some_and(|v| !v.is_empty()));
    assert!(series["description"].is_string());

    let (status, _) = get(&app, &format!("/api/series/{}", id(11_111))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resume_and_languages() {
    let app = spawn_app().await;

    let (status, json) = get(&app, "/api/resume?lang=zh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["language"], "zh");
    assert_eq!(json["data"]["profile"]["name"], "阿达");

    let (_, json) = get(&app, "/api/resume?lang=fr").await;
    assert_eq!(json["data"]["language"], "en");
    assert_eq!(json["data"]["awards"][0]["title"], "Best paper");

    let (status, json) = get(&app, "/api/languages").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"][1]["native_name"], "中文");
}

#[tokio::test]
async fn test_resume_falls_back_to_english_under_any_default() {
    let mut config = Config::default();
    config.content.default_language = "zh".to_string();
    let app = spawn_app_with(config).await;

    let (status, json) = get(&app, "/api/resume?lang=fr").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["language"], "en");
    assert_eq!(json["data"]["profile"]["name"], "Ada Lovelace");

    let (_, json) = get(&app, "/api/resume").await;
    assert_eq!(json["data"]["language"], "en");
}

#[tokio::test]
async fn test_untranslated_item_reports_served_language() {
    let app = spawn_app().await;

    let (status, json) = get(&app, &format!("/api/blog/{}?lang=zh", id(EPISODE_B))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "Episode borrowing");
    assert_eq!(json["data"]["language"], "en");
}

#[tokio::test]
async fn test_health_and_metrics() {
    let app = spawn_app().await;

    let (status, json) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["database"], "connected");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .header("x-request-id", "trace-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "trace-42");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = spawn_app().await;

    let (status, _) = get(&app, "/api/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
