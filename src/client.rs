use super::error::{Error, Result};
use super::resource::{Resource, Verb};
use super::response::Envelope;

use derivative::Derivative;

use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    multipart::{Form, Part},
};

use serde::Deserialize;
use serde_json::{json, Map, Value as JsonValue};
use serde_with::{serde_as, DurationMilliSeconds};

use std::path::Path;
use std::time::Duration;

use url::Url;

#[cfg(feature = "rate-limit")]
mod rate_limit;

#[cfg(not(feature = "rate-limit"))]
#[path = "client/dummy_rate_limit.rs"]
mod rate_limit;

use rate_limit::RateLimit;

/// Where requests go unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "https://www.pinterest.com";

/// Cool down applied between two requests. The service starts refusing actions well before this
/// pace becomes a problem for a bot.
pub const DEFAULT_REQUEST_COOLDOWN: Duration = Duration::from_millis(600);

/// Web application version announced with every request.
pub const DEFAULT_APP_VERSION: &str = "c643827";

/// Client configuration.
///
/// Every field has a default except the user agent, which must be set before building a
/// [`Client`]. The struct can be deserialized from any serde format:
///
/// ```
/// # use pinbot::client::Config;
/// let config: Config = serde_json::from_str(
///     r#"{ "user_agent": "MyBot/1.0", "request_cooldown_ms": 1500 }"#,
/// ).unwrap();
///
/// assert_eq!(config.base_url, "https://www.pinterest.com");
/// assert_eq!(config.request_cooldown.as_millis(), 1500);
/// ```
#[serde_as]
#[derive(Derivative, Deserialize, Clone, PartialEq, Eq)]
#[derivative(Debug, Default)]
#[serde(default)]
pub struct Config {
    #[derivative(Default(value = "String::from(DEFAULT_BASE_URL)"))]
    pub base_url: String,

    pub user_agent: String,

    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "request_cooldown_ms")]
    #[derivative(Default(value = "DEFAULT_REQUEST_COOLDOWN"))]
    pub request_cooldown: Duration,

    #[derivative(Default(value = "String::from(DEFAULT_APP_VERSION)"))]
    pub app_version: String,
}

/// A request for a named remote [`Resource`].
///
/// Options end up in the `data` parameter as `{"options": {...}, "context": {}}`; it travels in
/// the query string of read resources and in the form body of action resources.
///
/// ```
/// # use pinbot::client::Request;
/// # use pinbot::resource::Resource;
/// let request = Request::new(Resource::UserFollowers)
///     .option("username", "pinbot")
///     .source_url("/pinbot/followers/");
///
/// let data: serde_json::Value = serde_json::from_str(&request.data()).unwrap();
/// assert_eq!(data["options"]["username"], "pinbot");
/// assert_eq!(data["context"], serde_json::json!({}));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    resource: Resource,
    options: Map<String, JsonValue>,
    source_url: String,
}

impl Request {
    /// A request for `resource` without any option.
    pub fn new(resource: Resource) -> Self {
        Request {
            resource,
            options: Map::new(),
            source_url: String::from("/"),
        }
    }

    /// Set an option of the request, replacing any previous value for `key`.
    pub fn option<K: Into<String>, V: Into<JsonValue>>(mut self, key: K, value: V) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Set the page the request pretends to be made from.
    pub fn source_url<T: Into<String>>(mut self, source_url: T) -> Self {
        self.source_url = source_url.into();
        self
    }

    /// A copy of this request resuming a listing at `bookmark`.
    pub fn with_bookmark(&self, bookmark: &str) -> Self {
        self.clone().option("bookmarks", json!([bookmark]))
    }

    /// The resource this request is for.
    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Options set so far.
    pub fn options(&self) -> &Map<String, JsonValue> {
        &self.options
    }

    /// The JSON encoded `data` parameter.
    pub fn data(&self) -> String {
        json!({
            "options": self.options,
            "context": {},
        })
        .to_string()
    }
}

/// Client struct.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    client: reqwest::Client,
    rate_limit: RateLimit,
}

impl Client {
    /// Create a new client for the service at `base_url`, with the specified value for the
    /// User-Agent header. The User-Agent mustn't be empty.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        Self::from_config(&Config {
            base_url: String::from(base_url),
            user_agent: String::from(user_agent),
            ..Config::default()
        })
    }

    /// Create a new client from a [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.user_agent.is_empty() {
            return Err(Error::CannotCreateClient(String::from(
                "User Agent mustn't be empty",
            )));
        }

        let base_url = Url::parse(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&config.user_agent)?,
        );
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(
            HeaderName::from_static("x-app-version"),
            HeaderValue::from_str(&config.app_version)?,
        );

        match reqwest::Client::builder().default_headers(headers).build() {
            Ok(client) => Ok(Client {
                base_url,
                client,
                rate_limit: RateLimit::new(config.request_cooldown),
            }),
            Err(e) => Err(Error::CannotCreateClient(format!("{:?}", e))),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, resource: Resource) -> Result<Url> {
        Ok(self.base_url.join(resource.path())?)
    }

    /// Send a request and return the raw response body.
    ///
    /// Fails on network errors and non-2xx responses. Most users want the provider methods
    /// ([`Client::pins`], [`Client::pinners`], [`Client::boards`]) instead, which never fail
    /// because of the transport.
    ///
    /// _Note: This function performs a request; it will be subject to a short sleep time to ensure
    /// that requests aren't sent too fast._
    pub async fn request(&self, request: &Request) -> Result<String> {
        let url = self.url(request.resource)?;
        let data = request.data();
        let params = [
            ("source_url", request.source_url.as_str()),
            ("data", data.as_str()),
        ];

        tracing::debug!(resource = %request.resource, "sending request");

        let builder = match request.resource.verb() {
            Verb::Get => self.client.get(url).query(&params),
            Verb::Post => self.client.post(url).form(&params),
        };

        self.rate_limit.check(read_body(builder)).await
    }

    /// Upload a local file to `resource` as a multipart form, returning the raw response body.
    ///
    /// _Note: This function performs a request; it will be subject to a short sleep time to ensure
    /// that requests aren't sent too fast._
    pub async fn upload(&self, path: impl AsRef<Path>, resource: Resource) -> Result<String> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("image"));

        let form = Form::new().part("img", Part::bytes(bytes).file_name(file_name));

        tracing::debug!(%resource, path = %path.display(), "uploading file");

        let builder = self.client.post(self.url(resource)?).multipart(form);

        self.rate_limit.check(read_body(builder)).await
    }

    /// Send a request and interpret its response. Transport failures are logged and give the
    /// empty envelope.
    pub async fn execute(&self, request: &Request) -> Envelope {
        match self.request(request).await {
            Ok(body) => Envelope::parse(&body),
            Err(e) => {
                tracing::warn!(resource = %request.resource, "request failed: {}", e);
                Envelope::empty()
            }
        }
    }

    /// Send an action request, `true` when the service confirms it.
    pub(crate) async fn perform(&self, request: &Request) -> bool {
        self.execute(request).await.is_ok()
    }

    /// Send a request and return its `resource_response.data` payload.
    pub(crate) async fn fetch(&self, request: &Request) -> Option<JsonValue> {
        self.execute(request).await.payload().cloned()
    }
}

async fn read_body(builder: reqwest::RequestBuilder) -> Result<String> {
    let res = builder.send().await?;
    let status = res.status();
    let body = res.text().await?;

    if status.is_success() {
        Ok(body)
    } else {
        let reason = Envelope::parse(&body).raw()["resource_response"]["error"]["message"]
            .as_str()
            .map(String::from);

        Err(Error::Http(status.as_u16(), reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{data_is, test_client};
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn client_new() {
        Client::new(DEFAULT_BASE_URL, "pinbot/unit_test").unwrap();
    }

    #[test]
    #[should_panic]
    fn client_new_requires_non_empty_user_agent() {
        Client::new(DEFAULT_BASE_URL, "").unwrap();
    }

    #[test]
    fn client_new_rejects_bad_base_url() {
        assert!(matches!(
            Client::new("not a url", "pinbot/unit_test"),
            Err(Error::UrlParse(_))
        ));
    }

    #[test]
    fn config_defaults() {
        let config = Config::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agent, "");
        assert_eq!(config.request_cooldown, DEFAULT_REQUEST_COOLDOWN);
        assert_eq!(config.app_version, DEFAULT_APP_VERSION);
    }

    #[test]
    fn request_bookmark_replaces_previous_one() {
        let request = Request::new(Resource::UserFollowers)
            .option("username", "foo")
            .with_bookmark("a")
            .with_bookmark("b");

        assert_eq!(request.options()["bookmarks"], json!(["b"]));
        assert_eq!(request.options()["username"], json!("foo"));
    }

    #[tokio::test]
    async fn get_resources_send_data_in_the_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resource/UserResource/get/"))
            .and(query_param("source_url", "/foo/"))
            .and(data_is(json!({ "username": "foo" })))
            .and(header("x-requested-with", "XMLHttpRequest"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = Request::new(Resource::UserInfo)
            .option("username", "foo")
            .source_url("/foo/");

        assert_eq!(client.request(&request).await, Ok(String::from("{}")));
    }

    #[tokio::test]
    async fn action_resources_send_a_form() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/resource/UserFollowResource/create/"))
            .and(body_string_contains("source_url="))
            .and(data_is(json!({ "user_id": "1" })))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = Request::new(Resource::FollowUser).option("user_id", "1");

        assert_eq!(client.request(&request).await, Ok(String::from("{}")));
    }

    #[tokio::test]
    async fn http_errors_carry_the_service_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "resource_response": { "error": { "message": "login required" } }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = Request::new(Resource::PinLike).option("pin_id", "1");

        assert_eq!(
            client.request(&request).await,
            Err(Error::Http(401, Some(String::from("login required"))))
        );
        assert_eq!(client.execute(&request).await, Envelope::empty());
    }

    #[tokio::test]
    async fn upload_missing_file() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        assert!(matches!(
            client
                .upload("/definitely/not/here.jpg", Resource::ImageUpload)
                .await,
            Err(Error::Io(_))
        ));
    }
}
