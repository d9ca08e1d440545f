//! Lazy walks over paginated listings.
//!
//! A listing is fetched one page at a time: every response carries a bookmark, which is sent back
//! with the next request until the service runs out of results. Pages are only requested when the
//! stream is polled past the items already fetched, so dropping the stream (or `take`-ing a few
//! items off it) stops the walk without any further request.

use crate::client::{Client, Request};
use crate::resource::{Resource, SearchScope};
use crate::utils::source_url;

use futures::stream::unfold;
use futures::{Stream, StreamExt};

use serde_json::Value as JsonValue;

use std::collections::HashSet;

/// Position of a walk over a listing.
#[derive(Debug)]
struct Cursor {
    request: Request,
    page_limit: Option<usize>,

    bookmark: Option<String>,
    // Bookmarks already sent, a listing handing one back again would otherwise never end.
    seen: HashSet<String>,
    pages: usize,
}

impl Client {
    /// Returns a Stream over every item of a paginated listing.
    ///
    /// `page_limit` caps how many pages (that is, requests) are fetched; `None` walks the listing
    /// until the service reports its end. The walk also ends on the first failed request or
    /// unsuccessful response, without reporting an error.
    ///
    /// ```no_run
    /// # use pinbot::client::{Client, Request};
    /// # use pinbot::resource::Resource;
    /// use futures::prelude::*;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> pinbot::error::Result<()> {
    /// let client = Client::new("https://www.pinterest.com", "MyBot/1.0")?;
    ///
    /// let followers = client
    ///     .paginate(
    ///         Request::new(Resource::UserFollowers).option("username", "pinterest"),
    ///         None,
    ///     )
    ///     .take(10);
    /// futures::pin_mut!(followers);
    ///
    /// while let Some(follower) = followers.next().await {
    ///     println!("{}", follower["username"]);
    /// }
    /// # Ok(()) }
    /// ```
    pub fn paginate(
        &self,
        request: Request,
        page_limit: Option<usize>,
    ) -> impl Stream<Item = JsonValue> + Send + '_ {
        let cursor = Cursor {
            request,
            page_limit,

            bookmark: None,
            seen: HashSet::new(),
            pages: 0,
        };

        unfold(Some(cursor), move |cursor| self.next_page(cursor))
            .map(futures::stream::iter)
            .flatten()
    }

    async fn next_page(&self, cursor: Option<Cursor>) -> Option<(Vec<JsonValue>, Option<Cursor>)> {
        // `cursor` will be `None` if the previous page was the last one. If that is the case, this
        // run of `next_page` will return `None` to end the stream.
        let mut cursor = cursor?;

        if cursor.page_limit.is_some_and(|limit| cursor.pages >= limit) {
            return None;
        }

        let request = match &cursor.bookmark {
            Some(bookmark) => cursor.request.with_bookmark(bookmark),
            None => cursor.request.clone(),
        };
        let shape = request.resource().shape();

        let envelope = self.execute(&request).await;
        cursor.pages += 1;

        let items = envelope.data(shape);
        if items.is_empty() {
            return None;
        }

        match envelope.next_bookmark(shape) {
            Some(bookmark) if !cursor.seen.contains(&bookmark) => {
                cursor.seen.insert(bookmark.clone());
                cursor.bookmark = Some(bookmark);
                Some((items, Some(cursor)))
            }
            Some(bookmark) => {
                tracing::warn!(
                    resource = %request.resource(),
                    "bookmark {} came back twice, ending the listing",
                    bookmark
                );
                Some((items, None))
            }
            None => Some((items, None)),
        }
    }

    /// Returns a Stream over the results of a search in the given scope.
    pub fn search(
        &self,
        scope: SearchScope,
        query: &str,
        page_limit: Option<usize>,
    ) -> impl Stream<Item = JsonValue> + Send + '_ {
        let request = Request::new(Resource::Search)
            .option("scope", scope.as_str())
            .option("query", query)
            .source_url(format!(
                "{}?q={}",
                source_url(&["search", scope.as_str()]),
                urlencoding::encode(query)
            ));

        self.paginate(request, page_limit)
    }
}
