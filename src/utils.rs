use either::Either;

use serde_json::Value as JsonValue;

use std::path::Path;

/// Builds a site-relative page URL such as `/username/pins/`, percent-encoding every segment.
pub fn source_url(segments: &[&str]) -> String {
    segments.iter().fold(String::from("/"), |mut url, segment| {
        url.push_str(&urlencoding::encode(segment));
        url.push('/');
        url
    })
}

/// Remote images are referenced by URL, anything else is a local file to upload first.
pub fn image_source(image: &str) -> Either<&str, &Path> {
    if image.starts_with("http://") || image.starts_with("https://") {
        Either::Left(image)
    } else {
        Either::Right(Path::new(image))
    }
}

/// Identifiers come back either as strings or as numbers depending on the resource.
pub fn json_id(v: &JsonValue) -> Option<String> {
    match v {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_url_encodes_segments() {
        assert_eq!(source_url(&[]), "/");
        assert_eq!(source_url(&["foo", "pins"]), "/foo/pins/");
        assert_eq!(source_url(&["a b", "c/d"]), "/a%20b/c%2Fd/");
    }

    #[test]
    fn image_sources() {
        assert_eq!(
            image_source("https://example.com/image.jpg"),
            Either::Left("https://example.com/image.jpg")
        );
        assert_eq!(
            image_source("image.jpg"),
            Either::Right(Path::new("image.jpg"))
        );
    }

    #[test]
    fn json_ids() {
        assert_eq!(json_id(&json!("42")), Some(String::from("42")));
        assert_eq!(json_id(&json!(42)), Some(String::from("42")));
        assert_eq!(json_id(&json!("")), None);
        assert_eq!(json_id(&json!(null)), None);
    }
}
