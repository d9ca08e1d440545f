use crate::resource::ResponseShape;

use serde_json::Value as JsonValue;

/// Bookmark the service sends back once a listing has no further pages.
pub const END_BOOKMARK: &str = "-end-";

static NULL: JsonValue = JsonValue::Null;

/// The outer JSON structure wrapping the payload of a response.
///
/// The service doesn't send an explicit status, so whether a call succeeded is inferred from the
/// envelope's layout (see [`Envelope::is_ok`]). Treat that as a heuristic rather than a contract.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Envelope {
    body: JsonValue,
}

impl Envelope {
    /// Parses a raw response body. Malformed JSON gives the empty envelope, which is handled the
    /// same way as a response without results.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(body) => Envelope { body },
            Err(e) => {
                tracing::debug!("discarding malformed response body: {}", e);
                Envelope::empty()
            }
        }
    }

    /// The envelope of a failed or missing response.
    pub fn empty() -> Self {
        Envelope {
            body: JsonValue::Null,
        }
    }

    /// The parsed body, `Null` for the empty envelope.
    pub fn raw(&self) -> &JsonValue {
        &self.body
    }

    /// Whether the envelope carries a recognizable payload and no error indicator.
    pub fn is_ok(&self) -> bool {
        let body = &self.body;

        let has_payload = ["resource_response", "module", "data", "success"]
            .iter()
            .any(|k| !body[*k].is_null());

        let has_error = !body["resource_response"]["error"].is_null()
            || !body["error"].is_null()
            || body["success"] == JsonValue::Bool(false);

        has_payload && !has_error
    }

    /// The `resource_response.data` payload of an action or single-item resource.
    pub fn payload(&self) -> Option<&JsonValue> {
        if !self.is_ok() {
            return None;
        }

        match &self.body["resource_response"]["data"] {
            JsonValue::Null => None,
            data => Some(data),
        }
    }

    /// Items of a listing. Empty when the envelope is unsuccessful or the data node isn't an
    /// array.
    pub fn data(&self, shape: ResponseShape) -> Vec<JsonValue> {
        if !self.is_ok() {
            return Vec::new();
        }

        let node = match shape {
            ResponseShape::Listing | ResponseShape::Scoped => {
                &self.body["resource_response"]["data"]
            }
            ResponseShape::Search => first_present(&[
                &self.body["module"]["tree"]["data"]["results"],
                &self.body["resource_response"]["data"]["results"],
            ]),
        };

        node.as_array().cloned().unwrap_or_default()
    }

    /// Bookmarks returned alongside a listing, empty when absent.
    pub fn bookmarks(&self, shape: ResponseShape) -> Vec<String> {
        let body = &self.body;

        let node = match shape {
            ResponseShape::Listing => first_present(&[
                &body["resource_response"]["bookmarks"],
                &body["resource"]["options"]["bookmarks"],
            ]),
            ResponseShape::Scoped => first_present(&[
                &body["resource"]["options"]["bookmarks"],
                &body["resource_response"]["bookmarks"],
            ]),
            ResponseShape::Search => first_present(&[
                &body["module"]["tree"]["resource"]["options"]["bookmarks"],
                &body["resource"]["options"]["bookmarks"],
            ]),
        };

        match node {
            JsonValue::Array(tokens) => tokens
                .iter()
                .filter_map(JsonValue::as_str)
                .map(String::from)
                .collect(),
            JsonValue::String(token) => vec![token.clone()],
            _ => Vec::new(),
        }
    }

    /// The bookmark to request the next page with, if there is a next page.
    pub fn next_bookmark(&self, shape: ResponseShape) -> Option<String> {
        self.bookmarks(shape)
            .into_iter()
            .next()
            .filter(|b| !b.is_empty() && b != END_BOOKMARK)
    }
}

fn first_present<'a>(candidates: &[&'a JsonValue]) -> &'a JsonValue {
    candidates
        .iter()
        .copied()
        .find(|v| !v.is_null())
        .unwrap_or(&NULL)
}
