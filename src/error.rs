use reqwest::header::InvalidHeaderValue;

use std::convert::Infallible;

use thiserror::Error;

/// Result type for `pinbot`, using [`pinbot::error::Error`].
///
/// [`pinbot::error::Error`]: enum.Error.html
pub type Result<T> = ::std::result::Result<T, Error>;

/// Enum for `pinbot` errors.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// An HTTP error has occurred. The first value is the status code, the second is the reason of
    /// the failure given by the service, if available.
    #[error("HTTP error {}{}", .0, http_reason(.0, .1))]
    Http(u16, Option<String>),

    /// Serialization error. Contains a description of the error.
    #[error("Serialization error: {0}")]
    Serial(String),

    /// The request couldn't be sent. Contains a description of the error.
    #[error("Couldn't send request: {0}")]
    CannotSendRequest(String),

    /// The client couldn't be created. Contains a description of the error.
    #[error("Couldn't create client: {0}")]
    CannotCreateClient(String),

    /// A URL couldn't be built from the configured base URL.
    #[error("Invalid URL: {0}")]
    UrlParse(String),

    /// A local file couldn't be read, e.g. an image to upload.
    #[error("I/O error: {0}")]
    Io(String),

    /// The given following type isn't one of `people`, `boards` or `interests`.
    #[error("Unknown following type \"{0}\"")]
    WrongFollowingType(String),
}

fn http_reason(code: &u16, reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {}", reason),
        // Give em a generic reason
        None => match *code {
            400 => String::from(" Bad Request: The request parameters were rejected"),
            401 => String::from(" Unauthorized: The action requires a logged in session"),
            403 => String::from(" Forbidden: Access denied"),
            404 => String::from(" Not Found"),
            429 => String::from(" Too Many Requests: Slow down your rate of requests"),
            500 => String::from(" Internal Server Error"),
            502 => String::from(" Bad Gateway"),
            503 => String::from(" Service Unavailable: Try again later"),
            _ => String::new(),
        },
    }
}

impl From<InvalidHeaderValue> for Error {
    fn from(e: InvalidHeaderValue) -> Error {
        Error::CannotCreateClient(format!("Invalid header value: {}", e))
    }
}

// Lets functions accept either an already valid value or something to parse into one.
impl From<Infallible> for Error {
    fn from(e: Infallible) -> Error {
        match e {}
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serial(format!("{}", e))
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::UrlParse(format!("{}", e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(format!("{}", e))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        match e.status() {
            Some(status) => Error::Http(status.as_u16(), None),
            None => Error::CannotSendRequest(format!("{}", e)),
        }
    }
}
