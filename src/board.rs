use crate::client::{Client, Request};
use crate::resource::{Resource, SearchScope};
use crate::utils::source_url;

use futures::Stream;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use std::fmt;

/// Who can see a board.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoardPrivacy {
    #[default]
    Public,
    Secret,
}

impl BoardPrivacy {
    pub fn as_str(self) -> &'static str {
        match self {
            BoardPrivacy::Public => "public",
            BoardPrivacy::Secret => "secret",
        }
    }
}

impl fmt::Display for BoardPrivacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions on boards. Obtained with [`Client::boards`].
#[derive(Debug, Clone, Copy)]
pub struct Boards<'a> {
    client: &'a Client,
}

impl Client {
    /// Actions on boards.
    pub fn boards(&self) -> Boards<'_> {
        Boards { client: self }
    }
}

impl<'a> Boards<'a> {
    /// Details of the board `board` of the user, `None` if they couldn't be fetched.
    pub async fn info(&self, username: &str, board: &str) -> Option<JsonValue> {
        let request = Request::new(Resource::BoardInfo)
            .option("username", username)
            .option("slug", board)
            .option("field_set_key", "detailed")
            .source_url(source_url(&[username, board]));

        self.client.fetch(&request).await
    }

    /// All the boards of a user. Empty if they couldn't be fetched.
    pub async fn for_user(&self, username: &str) -> Vec<JsonValue> {
        let request = Request::new(Resource::UserBoards)
            .option("username", username)
            .option("field_set_key", "detailed")
            .source_url(source_url(&[username]));

        self.client
            .execute(&request)
            .await
            .data(Resource::UserBoards.shape())
    }

    /// Returns a Stream over the pins of a board.
    pub fn pins<T: Into<Option<usize>>>(
        &self,
        board_id: u64,
        page_limit: T,
    ) -> impl Stream<Item = JsonValue> + Send + 'a {
        let request =
            Request::new(Resource::BoardFeed).option("board_id", board_id.to_string());

        self.client.paginate(request, page_limit.into())
    }

    /// Follow a board. Returns whether the service confirmed it.
    pub async fn follow(&self, board_id: u64) -> bool {
        let request =
            Request::new(Resource::FollowBoard).option("board_id", board_id.to_string());

        self.client.perform(&request).await
    }

    /// Stop following a board. Returns whether the service confirmed it.
    pub async fn unfollow(&self, board_id: u64) -> bool {
        let request =
            Request::new(Resource::UnfollowBoard).option("board_id", board_id.to_string());

        self.client.perform(&request).await
    }

    /// Create a board and return it.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        privacy: BoardPrivacy,
    ) -> Option<JsonValue> {
        let request = Request::new(Resource::BoardCreate)
            .option("name", name)
            .option("description", description)
            .option("privacy", privacy.as_str());

        self.client.fetch(&request).await
    }

    /// Delete a board. Returns whether the service confirmed it.
    pub async fn delete(&self, board_id: u64) -> bool {
        let request =
            Request::new(Resource::BoardDelete).option("board_id", board_id.to_string());

        self.client.perform(&request).await
    }

    /// Returns a Stream over the boards matching `query`.
    pub fn search<T: Into<Option<usize>>>(
        &self,
        query: &str,
        page_limit: T,
    ) -> impl Stream<Item = JsonValue> + Send + 'a {
        self.client
            .search(SearchScope::Boards, query, page_limit.into())
    }
}
