use crate::client::{Client, Config};

use serde_json::{json, Value as JsonValue};

use std::time::Duration;

use wiremock::{Match, MockServer, Request};

/// A client talking to `server`, without any cool down between requests.
pub fn test_client(server: &MockServer) -> Client {
    Client::from_config(&Config {
        base_url: server.uri(),
        user_agent: String::from("pinbot/unit_test"),
        request_cooldown: Duration::ZERO,
        ..Config::default()
    })
    .unwrap()
}

/// The options a request was sent with, from either its query string or its form body.
fn sent_options(request: &Request) -> Option<JsonValue> {
    let data = request
        .url
        .query_pairs()
        .chain(url::form_urlencoded::parse(&request.body))
        .find(|(k, _)| k == "data")
        .map(|(_, v)| v.into_owned())?;

    let mut data: JsonValue = serde_json::from_str(&data).ok()?;
    Some(data["options"].take())
}

/// Matches requests whose options are exactly `expected`.
pub struct DataIs(JsonValue);

pub fn data_is(expected: JsonValue) -> DataIs {
    DataIs(expected)
}

impl Match for DataIs {
    fn matches(&self, request: &Request) -> bool {
        sent_options(request).map_or(false, |options| options == self.0)
    }
}

/// Matches requests resuming a listing at the given bookmark, or starting it when `None`.
pub struct BookmarkIs(Option<String>);

pub fn bookmark_is(bookmark: Option<&str>) -> BookmarkIs {
    BookmarkIs(bookmark.map(String::from))
}

impl Match for BookmarkIs {
    fn matches(&self, request: &Request) -> bool {
        let options = match sent_options(request) {
            Some(options) => options,
            None => return false,
        };

        match &self.0 {
            Some(bookmark) => options["bookmarks"] == json!([bookmark]),
            None => options["bookmarks"].is_null(),
        }
    }
}

/// A listing page as the service sends it.
pub fn listing(ids: &[u64], bookmark: Option<&str>) -> JsonValue {
    let data: Vec<_> = ids.iter().map(|id| json!({ "id": id })).collect();

    match bookmark {
        Some(bookmark) => json!({
            "resource_response": { "data": data, "bookmarks": [bookmark] }
        }),
        None => json!({ "resource_response": { "data": data } }),
    }
}

pub fn success() -> JsonValue {
    json!({ "resource_response": { "data": "success" } })
}

pub fn failure() -> JsonValue {
    json!({
        "resource_response": {
            "error": { "message": "Something went wrong", "code": 1 }
        }
    })
}

pub fn ids(items: &[JsonValue]) -> Vec<u64> {
    items.iter().filter_map(|item| item["id"].as_u64()).collect()
}
