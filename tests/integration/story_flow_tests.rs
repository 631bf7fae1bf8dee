//! Story creation and listing over HTTP.
use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::json;
use travelog_backend::storage::{NewStory, StoryStore};

use crate::test_utils::{file_app, memory_app, send, signup, story_body};

#[tokio::test]
async fn add_story_without_token_is_rejected_and_not_persisted() {
    let (app, state, store) = memory_app();
    let token = signup(&app, "Ann Lee", "ann@example.com", "Abcdef1@").await;
    let user_id = state.tokens.verify(&token).unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/add-travel-story",
        None,
        Some(story_body("Coast")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_001");

    assert!(store.stories_for_owner(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn add_story_returns_persisted_record() {
    let (app, state, _) = memory_app();
    let token = signup(&app, "Ann Lee", "ann@example.com", "Abcdef1@").await;
    let user_id = state.tokens.verify(&token).unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/add-travel-story",
        Some(&token),
        Some(story_body("Coast")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let story = &body["travelStory"];
    assert_eq!(story["title"], "Coast");
    assert_eq!(story["isFavourite"], false);
    assert_eq!(story["userId"], user_id.to_string());
    assert_eq!(story["visitedLocation"], json!(["Porto", "Lisbon"]));
    assert!(story["createdOn"].is_string());
    assert!(story["id"].is_string());
}

#[tokio::test]
async fn add_story_with_missing_fields_is_invalid() {
    let (app, _, _) = memory_app();
    let token = signup(&app, "Ann Lee", "ann@example.com", "Abcdef1@").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/add-travel-story",
        Some(&token),
        Some(json!({"title": "Only a title"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn listing_is_isolated_between_users() {
    let (app, _, _) = memory_app();
    let ann = signup(&app, "Ann Lee", "ann@example.com", "Abcdef1@").await;
    let bob = signup(&app, "Bob Ray", "bob@example.com", "Abcdef1@").await;

    for title in ["ann-1", "ann-2"] {
        send(&app, Method::POST, "/add-travel-story", Some(&ann), Some(story_body(title))).await;
    }
    send(&app, Method::POST, "/add-travel-story", Some(&bob), Some(story_body("bob-1"))).await;

    let (status, body) = send(&app, Method::GET, "/get-all-story", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    let stories = body["stories"].as_array().unwrap();
    assert_eq!(stories.len(), 1);
    assert_eq!(stories[0]["title"], "bob-1");

    let (_, body) = send(&app, Method::GET, "/get-all-story", Some(&ann), None).await;
    let titles: Vec<&str> = body["stories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["ann-1", "ann-2"]);
}

#[tokio::test]
async fn listing_puts_favourites_first() {
    let (app, state, store) = memory_app();
    let token = signup(&app, "Ann Lee", "ann@example.com", "Abcdef1@").await;
    let user_id = state.tokens.verify(&token).unwrap();

    send(&app, Method::POST, "/add-travel-story", Some(&token), Some(story_body("plain"))).await;
    store
        .insert_story(NewStory {
            user_id,
            title: "favourite".to_string(),
            story: "The best trip".to_string(),
            visited_location: Vec::new(),
            visited_date: Utc::now(),
            image_url: "http://img/fav.png".to_string(),
            is_favourite: true,
        })
        .await
        .unwrap();

    let (_, body) = send(&app, Method::GET, "/get-all-story", Some(&token), None).await;
    let stories = body["stories"].as_array().unwrap();
    assert_eq!(stories[0]["title"], "favourite");
    assert_eq!(stories[0]["isFavourite"], true);
    assert_eq!(stories[1]["title"], "plain");
}

#[tokio::test]
async fn flat_file_store_end_to_end() {
    let (app, _, temp_dir) = file_app();
    let token = signup(&app, "Ann Lee", "ann@example.com", "Abcdef1@").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/add-travel-story",
        Some(&token),
        Some(story_body("On disk")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/get-all-story", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stories"][0]["title"], "On disk");

    let (status, _) = send(
        &app,
        Method::POST,
        "/create-account",
        None,
        Some(json!({"fullName": "Ann Again", "email": "ann@example.com", "password": "Abcdef1@"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(temp_dir.path().join("stories").read_dir().unwrap().count() == 1);
}
