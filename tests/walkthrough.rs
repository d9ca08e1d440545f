use futures::prelude::*;

use pinbot::client::{Client, Config};
use pinbot::pinner::FollowingType;

use serde_json::{json, Value as JsonValue};

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::from_config(&Config {
        base_url: server.uri(),
        user_agent: String::from("pinbot/integration_test"),
        request_cooldown: Duration::ZERO,
        ..Config::default()
    })
    .unwrap()
}

fn ids(items: &[JsonValue]) -> Vec<u64> {
    items.iter().filter_map(|item| item["id"].as_u64()).collect()
}

#[tokio::test]
async fn searching_for_dogs_yields_both_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource/BaseSearchResource/get/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "module": { "tree": { "data": { "results": [{ "id": 1 }, { "id": 2 }] } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let results: Vec<_> = client.pins().search("dogs", None).collect().await;

    assert_eq!(ids(&results), vec![1, 2]);
}

#[tokio::test]
async fn a_bot_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource/UserFollowingResource/get/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource_response": { "data": [{ "id": 10 }, { "id": 11 }, { "id": 12 }] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/resource/UserFollowResource/delete/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource_response": { "data": "success" }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let following = client
        .pinners()
        .following("me", FollowingType::People, None)
        .unwrap()
        .take(2);
    futures::pin_mut!(following);

    let mut unfollowed = 0;
    while let Some(user) = following.next().await {
        let id = user["id"].as_u64().unwrap();
        if client.pinners().unfollow(id).await {
            unfollowed += 1;
        }
    }

    assert_eq!(unfollowed, 2);
}

#[tokio::test]
async fn unreachable_service_fails_quietly() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    assert!(!client.pins().like(1).await);
    assert_eq!(client.pins().info(1).await, None);
    assert!(client.boards().for_user("me").await.is_empty());

    let feed: Vec<_> = client.pins().user_feed(None).collect().await;
    assert!(feed.is_empty());
}
