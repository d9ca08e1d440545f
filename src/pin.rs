use crate::client::{Client, Request};
use crate::resource::{Resource, SearchScope};
use crate::response::Envelope;
use crate::utils::{image_source, json_id, source_url};

use either::Either;

use futures::Stream;

use serde_json::Value as JsonValue;

use std::path::Path;

/// Actions on pins. Obtained with [`Client::pins`].
#[derive(Debug, Clone, Copy)]
pub struct Pins<'a> {
    client: &'a Client,
}

impl Client {
    /// Actions on pins.
    pub fn pins(&self) -> Pins<'_> {
        Pins { client: self }
    }
}

impl<'a> Pins<'a> {
    /// Like a pin. Returns whether the service confirmed it.
    pub async fn like(&self, pin_id: u64) -> bool {
        let request = Request::new(Resource::PinLike).option("pin_id", pin_id.to_string());

        self.client.perform(&request).await
    }

    /// Remove a like from a pin. Returns whether the service confirmed it.
    pub async fn unlike(&self, pin_id: u64) -> bool {
        let request = Request::new(Resource::PinUnlike).option("pin_id", pin_id.to_string());

        self.client.perform(&request).await
    }

    /// Write a comment on a pin. Returns the created comment.
    pub async fn comment(&self, pin_id: u64, text: &str) -> Option<JsonValue> {
        let request = Request::new(Resource::PinComment)
            .option("pin_id", pin_id.to_string())
            .option("text", text);

        self.client.fetch(&request).await
    }

    /// Delete a comment from a pin. Returns whether the service confirmed it.
    pub async fn delete_comment(&self, pin_id: u64, comment_id: u64) -> bool {
        let request = Request::new(Resource::PinCommentDelete)
            .option("pin_id", pin_id.to_string())
            .option("comment_id", comment_id.to_string());

        self.client.perform(&request).await
    }

    /// Create a pin on a board and return it.
    ///
    /// `image` is either the URL of a remote image or the path of a local file, which gets
    /// uploaded first. `link` defaults to the image URL when missing or empty.
    ///
    /// ```no_run
    /// # use pinbot::client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> pinbot::error::Result<()> {
    /// let client = Client::new("https://www.pinterest.com", "MyBot/1.0")?;
    ///
    /// let remote = client
    ///     .pins()
    ///     .create("https://example.com/cat.jpg", 42, "A cat", None)
    ///     .await;
    /// let local = client
    ///     .pins()
    ///     .create("photos/dog.jpg", 42, "A dog", Some("https://example.com"))
    ///     .await;
    /// # Ok(()) }
    /// ```
    pub async fn create(
        &self,
        image: &str,
        board_id: u64,
        description: &str,
        link: Option<&str>,
    ) -> Option<JsonValue> {
        let (image_url, method) = match image_source(image) {
            Either::Left(url) => (String::from(url), "scraped"),
            Either::Right(path) => (self.upload(path).await?, "uploaded"),
        };

        let request = Request::new(Resource::PinCreate)
            .option("method", method)
            .option("board_id", board_id.to_string())
            .option("description", description)
            .option("link", link.filter(|l| !l.is_empty()).unwrap_or(&image_url))
            .option("image_url", image_url.as_str())
            .source_url(format!("/pin/find/?url={}", urlencoding::encode(&image_url)));

        self.client.fetch(&request).await
    }

    async fn upload(&self, path: &Path) -> Option<String> {
        let body = match self.client.upload(path, Resource::ImageUpload).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(path = %path.display(), "image upload failed: {}", e);
                return None;
            }
        };

        let envelope = Envelope::parse(&body);
        if !envelope.is_ok() {
            return None;
        }

        envelope.raw()["image_url"].as_str().map(String::from)
    }

    /// Save an existing pin to one of your boards. Returns the new pin.
    pub async fn repin(&self, repin_id: u64, board_id: u64, description: &str) -> Option<JsonValue> {
        let request = Request::new(Resource::Repin)
            .option("pin_id", repin_id.to_string())
            .option("board_id", board_id.to_string())
            .option("description", description)
            .option("link", "")
            .option("is_video", JsonValue::Null)
            .source_url(source_url(&["pin", &repin_id.to_string()]));

        self.client.fetch(&request).await
    }

    /// Change the description and link of a pin, and optionally move it to another board.
    /// Returns whether the service confirmed it.
    pub async fn edit<B: Into<Option<u64>>>(
        &self,
        pin_id: u64,
        description: &str,
        link: &str,
        board_id: B,
    ) -> bool {
        let mut request = Request::new(Resource::PinUpdate)
            .option("id", pin_id.to_string())
            .option("description", description)
            .option("link", link);

        if let Some(board_id) = board_id.into() {
            request = request.option("board_id", board_id.to_string());
        }

        self.client.perform(&request).await
    }

    /// Move a pin to another board. Returns whether the service confirmed it.
    pub async fn move_to_board(&self, pin_id: u64, board_id: u64) -> bool {
        let request = Request::new(Resource::PinUpdate)
            .option("id", pin_id.to_string())
            .option("board_id", board_id.to_string());

        self.client.perform(&request).await
    }

    /// Delete a pin. Returns whether the service confirmed it.
    pub async fn delete(&self, pin_id: u64) -> bool {
        let request = Request::new(Resource::PinDelete).option("id", pin_id.to_string());

        self.client.perform(&request).await
    }

    /// Details of a pin, `None` if they couldn't be fetched.
    pub async fn info(&self, pin_id: u64) -> Option<JsonValue> {
        let request = Request::new(Resource::PinInfo)
            .option("id", pin_id.to_string())
            .option("field_set_key", "detailed");

        self.client.fetch(&request).await
    }

    /// Returns a Stream over the pins matching `query`.
    pub fn search<T: Into<Option<usize>>>(
        &self,
        query: &str,
        page_limit: T,
    ) -> impl Stream<Item = JsonValue> + Send + 'a {
        self.client
            .search(SearchScope::Pins, query, page_limit.into())
    }

    /// Returns a Stream over the pins saved from a website, e.g. `flickr.com`.
    pub fn from_source<T: Into<Option<usize>>>(
        &self,
        domain: &str,
        page_limit: T,
    ) -> impl Stream<Item = JsonValue> + Send + 'a {
        let request = Request::new(Resource::DomainFeed)
            .option("domain", domain)
            .source_url(source_url(&["source", domain]));

        self.client.paginate(request, page_limit.into())
    }

    /// Returns a Stream over the activity (repins, likes, comments) of a pin.
    ///
    /// Takes one request to find the pin's activity feed, and returns `None` if the pin has none.
    pub async fn activity<T: Into<Option<usize>>>(
        self,
        pin_id: u64,
        page_limit: T,
    ) -> Option<impl Stream<Item = JsonValue> + Send + 'a> {
        let info = self.info(pin_id).await?;
        let aggregated_id = json_id(&info["aggregated_pin_data"]["id"])?;

        let request = Request::new(Resource::ActivityFeed)
            .option("aggregated_pin_data_id", aggregated_id)
            .source_url(source_url(&["pin", &pin_id.to_string()]));

        Some(self.client.paginate(request, page_limit.into()))
    }

    /// Returns a Stream over the home feed of the logged in user.
    pub fn user_feed<T: Into<Option<usize>>>(
        &self,
        page_limit: T,
    ) -> impl Stream<Item = JsonValue> + Send + 'a {
        self.client
            .paginate(Request::new(Resource::UserFeed), page_limit.into())
    }
}
