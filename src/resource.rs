use serde::{Deserialize, Serialize};

use std::fmt;

/// How the service lays out the payload of a resource's response.
///
/// Each [`Resource`] is bound to exactly one shape, so data and bookmark extraction is chosen once
/// per request rather than by sniffing the response.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ResponseShape {
    /// `{ resource_response: { data: [...], bookmarks: [...] } }`
    Listing,

    /// `{ resource: { options: { bookmarks: [...] } }, resource_response: { data: [...] } }`,
    /// used by listings scoped to a user or a board.
    Scoped,

    /// `{ module: { tree: { data: { results: [...] } } } }`
    Search,
}

/// HTTP verb a resource is reached with.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Verb {
    /// Reads, options travel in the query string.
    Get,
    /// Actions, options travel in an urlencoded form body.
    Post,
}

/// Remote endpoints known to the client.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[non_exhaustive]
pub enum Resource {
    // pinners
    FollowUser,
    UnfollowUser,
    UserInfo,
    UserFollowers,
    FollowingPeople,
    FollowingBoards,
    FollowingInterests,
    UserPins,

    // pins
    PinLike,
    PinUnlike,
    PinComment,
    PinCommentDelete,
    PinCreate,
    PinUpdate,
    PinDelete,
    PinInfo,
    Repin,
    DomainFeed,
    ActivityFeed,
    UserFeed,

    // boards
    BoardInfo,
    UserBoards,
    BoardFeed,
    FollowBoard,
    UnfollowBoard,
    BoardCreate,
    BoardDelete,

    Search,
    ImageUpload,
}

impl Resource {
    /// Path of the resource, relative to the client's base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::FollowUser => "/resource/UserFollowResource/create/",
            Resource::UnfollowUser => "/resource/UserFollowResource/delete/",
            Resource::UserInfo => "/resource/UserResource/get/",
            Resource::UserFollowers => "/resource/UserFollowersResource/get/",
            Resource::FollowingPeople => "/resource/UserFollowingResource/get/",
            Resource::FollowingBoards => "/resource/BoardFollowingResource/get/",
            Resource::FollowingInterests => "/resource/InterestFollowingResource/get/",
            Resource::UserPins => "/resource/UserPinsResource/get/",

            Resource::PinLike => "/resource/PinLikeResource2/create/",
            Resource::PinUnlike => "/resource/PinLikeResource2/delete/",
            Resource::PinComment => "/resource/PinCommentResource/create/",
            Resource::PinCommentDelete => "/resource/PinCommentResource/delete/",
            Resource::PinCreate => "/resource/PinResource/create/",
            Resource::PinUpdate => "/resource/PinResource/update/",
            Resource::PinDelete => "/resource/PinResource/delete/",
            Resource::PinInfo => "/resource/PinResource/get/",
            Resource::Repin => "/resource/RepinResource/create/",
            Resource::DomainFeed => "/resource/DomainFeedResource/get/",
            Resource::ActivityFeed => "/resource/AggregatedActivityFeedResource/get/",
            Resource::UserFeed => "/resource/UserHomefeedResource/get/",

            Resource::BoardInfo => "/resource/BoardResource/get/",
            Resource::UserBoards => "/resource/BoardsResource/get/",
            Resource::BoardFeed => "/resource/BoardFeedResource/get/",
            Resource::FollowBoard => "/resource/BoardFollowResource/create/",
            Resource::UnfollowBoard => "/resource/BoardFollowResource/delete/",
            Resource::BoardCreate => "/resource/BoardResource/create/",
            Resource::BoardDelete => "/resource/BoardResource/delete/",

            Resource::Search => "/resource/BaseSearchResource/get/",
            Resource::ImageUpload => "/upload-image/",
        }
    }

    /// Whether the resource is read with `GET` or acted upon with `POST`.
    pub fn verb(self) -> Verb {
        if self.path().ends_with("/get/") {
            Verb::Get
        } else {
            Verb::Post
        }
    }

    /// Layout of the resource's responses.
    pub fn shape(self) -> ResponseShape {
        match self {
            Resource::Search => ResponseShape::Search,
            Resource::UserPins | Resource::BoardFeed => ResponseShape::Scoped,
            _ => ResponseShape::Listing,
        }
    }
}

/// What a search looks for.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    Pins,
    People,
    Boards,
}

impl SearchScope {
    /// Name of the scope in search requests and page URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchScope::Pins => "pins",
            SearchScope::People => "people",
            SearchScope::Boards => "boards",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_follow_the_path() {
        assert_eq!(Resource::UserFollowers.verb(), Verb::Get);
        assert_eq!(Resource::Search.verb(), Verb::Get);
        assert_eq!(Resource::FollowUser.verb(), Verb::Post);
        assert_eq!(Resource::PinUpdate.verb(), Verb::Post);
        assert_eq!(Resource::ImageUpload.verb(), Verb::Post);
    }

    #[test]
    fn shapes() {
        assert_eq!(Resource::Search.shape(), ResponseShape::Search);
        assert_eq!(Resource::UserPins.shape(), ResponseShape::Scoped);
        assert_eq!(Resource::BoardFeed.shape(), ResponseShape::Scoped);
        assert_eq!(Resource::UserFollowers.shape(), ResponseShape::Listing);
    }

    #[test]
    fn search_scope_serializes_like_the_query_parameter() {
        for scope in [SearchScope::Pins, SearchScope::People, SearchScope::Boards] {
            assert_eq!(
                serde_json::to_value(scope).unwrap(),
                serde_json::Value::from(scope.as_str())
            );
        }
    }
}
