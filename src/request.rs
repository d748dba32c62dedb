//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;

/// An incoming HTTP request with its body fully buffered and its path
/// parameters resolved by the router.
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        parts: http::request::Parts,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            headers: parts.headers,
            body,
            params,
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Non-UTF-8 values are treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/posts/{id}`, `req.param("id")` on `/posts/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &'static str) -> Request {
        let (parts, ()) = http::Request::builder()
            .method(Method::POST)
            .uri("/posts?draft=1")
            .header("Content-Type", "application/json")
            .body(())
            .unwrap()
            .into_parts();
        let params = HashMap::from([("id".to_owned(), "abc".to_owned())]);
        Request::new(parts, Bytes::from_static(body.as_bytes()), params)
    }

    #[test]
    fn exposes_parts_without_query() {
        let req = request("{}");
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.path(), "/posts");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.param("id"), Some("abc"));
        assert_eq!(req.param("missing"), None);
    }

    #[test]
    fn decodes_json_body() {
        let req = request(r#"{"title":"hello"}"#);
        let value: serde_json::Value = req.json().unwrap();
        assert_eq!(value["title"], "hello");
        assert!(request("not json").json::<serde_json::Value>().is_err());
    }
}
