#![cfg(test)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use panorama_api::{CommentNode, Error as ApiError};
use panorama_mock_store::{comment, placeholder, story, MockStore};
use tower::ServiceExt;

use crate::{app, AppState, FeedConfig, ItemLookup};

/// Feed config whose upstream endpoints point nowhere; routes under test
/// must answer before ever dialing out.
fn offline_config() -> FeedConfig {
    FeedConfig {
        hn_base: String::from("http://127.0.0.1:9/hn"),
        news_base: String::from("http://127.0.0.1:9/news"),
        weather_base: String::from("http://127.0.0.1:9/weather"),
        sports_base: String::from("http://127.0.0.1:9/sports"),
        youtube_base: String::from("http://127.0.0.1:9/youtube"),
        news_key: None,
        weather_key: None,
        sports_key: None,
        youtube_key: None,
    }
}

fn test_app(store: MockStore, feeds: FeedConfig) -> axum::Router {
    app(AppState {
        client: reqwest::Client::new(),
        store: ItemLookup(Arc::new(store)),
        feeds,
    })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("building request"),
        )
        .await
        .expect("infallible router call");
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body())
        .await
        .expect("reading response body");
    (status, body.to_vec())
}

#[tokio::test]
async fn comments_route_serves_the_pruned_forest() {
    let mut store = MockStore::new();
    store.insert(story(1, vec![2, 3]));
    store.insert(comment(2, vec![4]));
    let mut gone = comment(3, vec![]);
    gone.deleted = true;
    store.insert(gone);
    store.insert(placeholder(4, vec![]));

    let (status, body) = get(
        test_app(store, offline_config()),
        "/api/hackernews/comments?id=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let forest: Vec<CommentNode> = serde_json::from_slice(&body).expect("parsing forest");
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].id, 2);
    assert_eq!(forest[0].kids, vec![]);
}

#[tokio::test]
async fn comments_route_requires_an_id() {
    let (status, body) = get(
        test_app(MockStore::new(), offline_config()),
        "/api/hackernews/comments",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        ApiError::parse(&body).expect("parsing error body"),
        ApiError::MissingParameter(String::from("id"))
    );
}

#[tokio::test]
async fn missing_story_is_not_an_empty_forest() {
    let (status, body) = get(
        test_app(MockStore::new(), offline_config()),
        "/api/hackernews/comments?id=7",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        ApiError::parse(&body).expect("parsing error body"),
        ApiError::RootLookupFailed(7)
    );
}

#[tokio::test]
async fn story_without_comments_answers_an_empty_list() {
    let mut store = MockStore::new();
    store.insert(story(1, vec![]));

    let (status, body) = get(
        test_app(store, offline_config()),
        "/api/hackernews/comments?id=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let forest: Vec<CommentNode> = serde_json::from_slice(&body).expect("parsing forest");
    assert_eq!(forest, vec![]);
}

#[tokio::test]
async fn reply_cycle_is_reported_not_followed() {
    let mut store = MockStore::new();
    store.insert(story(1, vec![2]));
    store.insert(comment(2, vec![3]));
    store.insert(comment(3, vec![2]));

    let (status, body) = get(
        test_app(store, offline_config()),
        "/api/hackernews/comments?id=1",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        ApiError::parse(&body).expect("parsing error body"),
        ApiError::CycleDetected(2)
    );
}

#[tokio::test]
async fn news_without_a_key_is_a_configuration_error() {
    let (status, body) = get(
        test_app(MockStore::new(), offline_config()),
        "/api/news?country=us",
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        ApiError::parse(&body).expect("parsing error body"),
        ApiError::ApiKeyNotConfigured(String::from("news"))
    );
}

#[tokio::test]
async fn news_needs_a_country_or_a_topic() {
    let mut feeds = offline_config();
    feeds.news_key = Some(String::from("test-key"));
    let (status, body) = get(test_app(MockStore::new(), feeds), "/api/news").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        ApiError::parse(&body).expect("parsing error body"),
        ApiError::MissingParameter(String::from("country or topic"))
    );
}

#[tokio::test]
async fn weather_needs_a_city() {
    let (status, body) = get(test_app(MockStore::new(), offline_config()), "/api/weather").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        ApiError::parse(&body).expect("parsing error body"),
        ApiError::MissingParameter(String::from("city"))
    );
}

#[tokio::test]
async fn team_search_needs_a_query() {
    let mut feeds = offline_config();
    feeds.sports_key = Some(String::from("test-key"));
    let (status, body) = get(test_app(MockStore::new(), feeds), "/api/sports/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        ApiError::parse(&body).expect("parsing error body"),
        ApiError::MissingParameter(String::from("q"))
    );
}

#[tokio::test]
async fn sports_without_a_key_is_a_configuration_error() {
    let (status, body) = get(
        test_app(MockStore::new(), offline_config()),
        "/api/sports?teams=133604",
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        ApiError::parse(&body).expect("parsing error body"),
        ApiError::ApiKeyNotConfigured(String::from("sports"))
    );
}

#[tokio::test]
async fn youtube_needs_channels() {
    let mut feeds = offline_config();
    feeds.youtube_key = Some(String::from("test-key"));
    let (status, body) = get(test_app(MockStore::new(), feeds), "/api/youtube?channels=,,").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        ApiError::parse(&body).expect("parsing error body"),
        ApiError::MissingParameter(String::from("channels"))
    );
}
