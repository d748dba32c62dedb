//! The `/posts` resource.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `/posts` | 200 `{ "posts": [...] }` | 500 |
//! | GET | `/posts/{id}` | 200 post | 400 malformed id, 404, 500 |
//! | POST | `/posts` | 201 post + `location` | 400 naming the field, 500 |
//! | DELETE | `/posts/{id}`, `/{id}` | 204, present or not | 400 malformed id, 500 |
//!
//! Input is validated before the store is touched. Every store call runs
//! under the configured timeout.

mod error;
mod validate;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use http::{Method, StatusCode};
use tracing::info;

use crate::handler::Handler;
use crate::health;
use crate::model::{BlogPost, PostId, PostList};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::store::{SharedStore, StoreError, StoreResult};

pub use error::ApiError;
pub use validate::{AuthorInput, CreatePost, Field};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

type ApiResult = Result<Response, ApiError>;

/// Request handlers for the posts resource, bound to one store.
pub struct PostsApi {
    store: SharedStore,
    timeout: Duration,
}

impl PostsApi {
    pub fn new(store: SharedStore) -> Self {
        Self { store, timeout: DEFAULT_TIMEOUT }
    }

    /// Bounds every store call made while handling a request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// All routes of the service, health probes included.
    pub fn router(self) -> Router {
        let api = Arc::new(self);
        Router::new()
            .on(Method::GET,    "/posts",      route(api.clone(), Self::list))
            .on(Method::POST,   "/posts",      route(api.clone(), Self::create))
            .on(Method::GET,    "/posts/{id}", route(api.clone(), Self::get))
            .on(Method::DELETE, "/posts/{id}", route(api.clone(), Self::delete))
            .on(Method::DELETE, "/{id}",       route(api.clone(), Self::delete))
            .on(Method::GET,    "/healthz",    health::liveness)
            .on(Method::GET,    "/readyz",     route(api.clone(), Self::ready))
    }

    async fn list(self: Arc<Self>, _req: Request) -> ApiResult {
        let posts = self.timed("find_all", self.store.find_all()).await?;
        Ok(Response::json(&PostList { posts: posts.iter().map(BlogPost::view).collect() }))
    }

    async fn get(self: Arc<Self>, req: Request) -> ApiResult {
        let id = path_id(&req)?;
        match self.timed("find_by_id", self.store.find_by_id(&id)).await? {
            Some(post) => Ok(Response::json(&post.view())),
            None => Err(ApiError::NotFound(id)),
        }
    }

    async fn create(self: Arc<Self>, req: Request) -> ApiResult {
        let body: CreatePost = req.json()?;
        let post = body.validate().map_err(ApiError::Validation)?;
        let post = self.timed("insert", self.store.insert(post)).await?;

        info!(id = %post.id, title = %post.title, "post created");
        Ok(Response::builder()
            .status(StatusCode::CREATED)
            .header("location", &format!("/posts/{}", post.id))
            .json(&post.view()))
    }

    async fn delete(self: Arc<Self>, req: Request) -> ApiResult {
        let id = path_id(&req)?;
        let existed = self.timed("delete_by_id", self.store.delete_by_id(&id)).await?;

        info!(%id, existed, "post deleted");
        Ok(Response::status(StatusCode::NO_CONTENT))
    }

    async fn ready(self: Arc<Self>, _req: Request) -> Response {
        health::readiness(self.store.as_ref(), self.timeout).await
    }

    async fn timed<T>(
        &self,
        op: &'static str,
        call: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or(Err(StoreError::Timeout { op, after: self.timeout }))
    }
}

fn path_id(req: &Request) -> Result<PostId, ApiError> {
    Ok(req.param("id").unwrap_or_default().parse::<PostId>()?)
}

/// Adapts a `PostsApi` method into a router handler sharing `api`.
fn route<F, Fut, R>(api: Arc<PostsApi>, method: F) -> impl Handler
where
    F: Fn(Arc<PostsApi>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: crate::IntoResponse + Send + 'static,
{
    move |req| method(Arc::clone(&api), req)
}
