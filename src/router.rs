//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. Register a path, get a
//! handler.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;
use serde_json::json;
use tracing::debug;

use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve),
/// or drive it in-process with [`Router::handle`]. Each [`Router::on`] call
/// returns `self` so registrations chain.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax and are read with `req.param("name")`:
    ///
    /// ```rust,no_run
    /// # use http::Method;
    /// # use quill::{Request, Response, Router};
    /// # async fn get_post(_: Request) -> Response { Response::text("") }
    /// # async fn delete_post(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::GET,    "/posts/{id}", get_post)
    ///     .on(Method::DELETE, "/posts/{id}", delete_post);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not valid matchit syntax or conflicts with a route
    /// already registered for `method`. Routes are fixed at startup, so this
    /// is a programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Routes one fully-buffered request and produces its response.
    ///
    /// Unknown paths get `404`; a path registered only under other methods
    /// gets `405` with an `allow` header.
    pub async fn handle(&self, req: http::Request<Bytes>) -> Response {
        let started = Instant::now();
        let (parts, body) = req.into_parts();
        let method = parts.method.clone();
        let path = parts.uri.path().to_owned();

        let response = match self.lookup(&method, &path) {
            Some((handler, params)) => handler.call(Request::new(parts, body, params)).await,
            None => self.unrouted(&path),
        };

        debug!(
            %method,
            path = %path,
            status = response.code().as_u16(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "request handled"
        );
        response
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    fn unrouted(&self, path: &str) -> Response {
        let mut allowed: Vec<&str> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(method, _)| method.as_str())
            .collect();

        if allowed.is_empty() {
            return Response::builder()
                .status(StatusCode::NOT_FOUND)
                .json(&json!({ "message": "Not Found" }));
        }

        allowed.sort_unstable();
        Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header("allow", &allowed.join(", "))
            .json(&json!({ "message": "Method Not Allowed" }))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(path: &str) -> http::Request<Bytes> {
        http::Request::get(path).body(Bytes::new()).unwrap()
    }

    async fn echo_id(req: Request) -> Response {
        Response::text(req.param("id").unwrap_or("none").to_owned())
    }

    #[tokio::test]
    async fn resolves_params() {
        let app = Router::new().on(Method::GET, "/posts/{id}", echo_id);
        let res = app.handle(get("/posts/abc")).await;
        assert_eq!(res.code(), StatusCode::OK);
        assert_eq!(res.body(), b"abc");
    }

    #[tokio::test]
    async fn static_segment_wins_over_param() {
        let app = Router::new()
            .on(Method::GET, "/posts", |_req: Request| async { Response::text("list") })
            .on(Method::GET, "/{id}", echo_id);
        assert_eq!(app.handle(get("/posts")).await.body(), b"list");
        assert_eq!(app.handle(get("/other")).await.body(), b"other");
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let app = Router::new().on(Method::GET, "/posts", echo_id);
        let res = app.handle(get("/nope")).await;
        assert_eq!(res.code(), StatusCode::NOT_FOUND);
        assert_eq!(res.body(), br#"{"message":"Not Found"}"#);
    }

    #[tokio::test]
    async fn wrong_method_is_405_with_allow() {
        let app = Router::new()
            .on(Method::GET, "/posts/{id}", echo_id)
            .on(Method::DELETE, "/posts/{id}", echo_id);
        let req = http::Request::put("/posts/1").body(Bytes::new()).unwrap();
        let res = app.handle(req).await;
        assert_eq!(res.code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.header("allow"), Some("DELETE, GET"));
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = Router::new()
            .on(Method::GET, "/posts/{id}", echo_id)
            .on(Method::GET, "/posts/{slug}", echo_id);
    }
}
