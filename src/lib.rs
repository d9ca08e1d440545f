//! Automation crate for the [Pinterest](https://www.pinterest.com) web service.
//!
//! ## Usage
//!
//! First, create a [`Client`]. You have to provide the User-Agent your requests will be sent with.
//!
//! ```no_run
//! # use pinbot::client::Client;
//! # fn main() -> Result<(), pinbot::error::Error> {
//! let client = Client::new("https://www.pinterest.com", "MyBot/1.0")?;
//! # Ok(()) }
//! ```
//!
//! Actions are grouped by what they act upon: [`Client::pins`], [`Client::pinners`] and
//! [`Client::boards`]. Each of them is a single request, and reports whether the service accepted
//! it:
//!
//! ```no_run
//! # use pinbot::client::Client;
//! # #[tokio::main]
//! # async fn main() -> Result<(), pinbot::error::Error> {
//! # let client = Client::new("https://www.pinterest.com", "MyBot/1.0")?;
//! if client.pins().like(8595).await {
//!     println!("liked!");
//! }
//! # Ok(()) }
//! ```
//!
//! Listings (followers, search results, feeds...) are returned as lazy [`Stream`]s that fetch
//! pages as you consume them:
//!
//! ```no_run
//! # use pinbot::client::Client;
//! use futures::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), pinbot::error::Error> {
//! # let client = Client::new("https://www.pinterest.com", "MyBot/1.0")?;
//! let results = client.pins().search("fluffy cats", None).take(20);
//! futures::pin_mut!(results);
//!
//! while let Some(pin) = results.next().await {
//!     println!("#{}", pin["id"]);
//! }
//! # Ok(()) }
//! ```
//!
//! ## Failures
//!
//! Network failures, HTTP errors and responses the client can't make sense of are never reported
//! as errors by the actions: they return `false`/`None`, and streams simply end. They are logged
//! with [`tracing`](https://docs.rs/tracing) though. Only misuse, like asking for an unknown
//! following type, gives an [`Error`][error::Error].
//!
//! ## Rate Limiting
//!
//! With the `rate-limit` feature (enabled by default), `pinbot` waits a short cool down time after
//! every request before sending the next one through the same [`Client`]. Clones of a client
//! share the same cool down.
//!
//! [`Client`]: client/struct.Client.html
//! [`Stream`]: futures::Stream

mod utils;

#[cfg(test)]
mod test_utils;

/// Client related structures.
pub mod client;

/// Error management.
pub mod error;

/// Remote resources.
pub mod resource;

/// Response interpretation.
pub mod response;

/// Paginated listings.
pub mod pagination;

/// Pin management.
pub mod pin;

/// Actions on other users.
pub mod pinner;

/// Board management.
pub mod board;
