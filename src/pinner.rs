use crate::client::{Client, Request};
use crate::error::{Error, Result as PinbotResult};
use crate::resource::{Resource, SearchScope};
use crate::utils::source_url;

use futures::Stream;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use std::{fmt, str::FromStr};

/// What kind of followed entities [`Pinners::following`] lists.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum FollowingType {
    #[default]
    People,
    Boards,
    Interests,
}

impl FollowingType {
    pub fn as_str(self) -> &'static str {
        match self {
            FollowingType::People => "people",
            FollowingType::Boards => "boards",
            FollowingType::Interests => "interests",
        }
    }

    fn resource(self) -> Resource {
        match self {
            FollowingType::People => Resource::FollowingPeople,
            FollowingType::Boards => Resource::FollowingBoards,
            FollowingType::Interests => Resource::FollowingInterests,
        }
    }
}

impl FromStr for FollowingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "people" => Ok(FollowingType::People),
            "boards" => Ok(FollowingType::Boards),
            "interests" => Ok(FollowingType::Interests),
            _ => Err(Error::WrongFollowingType(String::from(s))),
        }
    }
}

impl TryFrom<&str> for FollowingType {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for FollowingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions on other users of the service. Obtained with [`Client::pinners`].
#[derive(Debug, Clone, Copy)]
pub struct Pinners<'a> {
    client: &'a Client,
}

impl Client {
    /// Actions on other users.
    pub fn pinners(&self) -> Pinners<'_> {
        Pinners { client: self }
    }
}

impl<'a> Pinners<'a> {
    /// Follow the user with the given ID. Returns whether the service confirmed it.
    pub async fn follow(&self, user_id: u64) -> bool {
        let request = Request::new(Resource::FollowUser).option("user_id", user_id.to_string());

        self.client.perform(&request).await
    }

    /// Stop following the user with the given ID. Returns whether the service confirmed it.
    pub async fn unfollow(&self, user_id: u64) -> bool {
        let request =
            Request::new(Resource::UnfollowUser).option("user_id", user_id.to_string());

        self.client.perform(&request).await
    }

    /// Profile of the user, `None` if it couldn't be fetched.
    pub async fn info(&self, username: &str) -> Option<JsonValue> {
        let request = Request::new(Resource::UserInfo)
            .option("username", username)
            .option("field_set_key", "profile")
            .source_url(source_url(&[username]));

        self.client.fetch(&request).await
    }

    /// Returns a Stream over the followers of the user.
    pub fn followers<T: Into<Option<usize>>>(
        &self,
        username: &str,
        page_limit: T,
    ) -> impl Stream<Item = JsonValue> + Send + 'a {
        let request = Request::new(Resource::UserFollowers)
            .option("username", username)
            .source_url(source_url(&[username, "followers"]));

        self.client.paginate(request, page_limit.into())
    }

    /// Returns a Stream over the people, boards or interests the user follows.
    ///
    /// `kind` is either a [`FollowingType`] or its name. An unknown name is reported right away,
    /// before any request is sent.
    ///
    /// ```no_run
    /// # use pinbot::client::Client;
    /// # use pinbot::pinner::FollowingType;
    /// # fn main() -> pinbot::error::Result<()> {
    /// let client = Client::new("https://www.pinterest.com", "MyBot/1.0")?;
    ///
    /// let boards = client.pinners().following("pinterest", FollowingType::Boards, None)?;
    /// let interests = client.pinners().following("pinterest", "interests", 2)?;
    ///
    /// assert!(client.pinners().following("pinterest", "spaceships", None).is_err());
    /// # Ok(()) }
    /// ```
    pub fn following<K, T>(
        &self,
        username: &str,
        kind: K,
        page_limit: T,
    ) -> PinbotResult<impl Stream<Item = JsonValue> + Send + 'a>
    where
        K: TryInto<FollowingType>,
        Error: From<K::Error>,
        T: Into<Option<usize>>,
    {
        let kind = kind.try_into()?;

        let request = Request::new(kind.resource())
            .option("username", username)
            .source_url(source_url(&[username, "following", kind.as_str()]));

        Ok(self.client.paginate(request, page_limit.into()))
    }

    /// Returns a Stream over the pins of the user.
    pub fn pins<T: Into<Option<usize>>>(
        &self,
        username: &str,
        page_limit: T,
    ) -> impl Stream<Item = JsonValue> + Send + 'a {
        let request = Request::new(Resource::UserPins)
            .option("username", username)
            .source_url(source_url(&[username, "pins"]));

        self.client.paginate(request, page_limit.into())
    }

    /// Returns a Stream over the users matching `query`.
    pub fn search<T: Into<Option<usize>>>(
        &self,
        query: &str,
        page_limit: T,
    ) -> impl Stream<Item = JsonValue> + Send + 'a {
        self.client
            .search(SearchScope::People, query, page_limit.into())
    }
}
