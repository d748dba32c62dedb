//! # quill
//!
//! A small JSON service for blog posts: list, read, create, delete.
//!
//! ## Layers
//!
//! - [`model`]: the stored post and the view callers receive, where the
//!   author's first and last name become one `author` string.
//! - [`store`]: the [`PostStore`](store::PostStore) capability and its
//!   in-memory implementation. The API gets a store handle at construction.
//! - [`api`]: routes, request validation and the status-code mapping.
//! - Plumbing: radix-tree [`Router`] via [`matchit`], hyper-backed [`Server`]
//!   with graceful shutdown (SIGTERM / Ctrl-C drains in-flight requests).
//!
//! TLS, rate limiting and body-size limits belong to the reverse proxy in
//! front of the service.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use quill::{Config, PostsApi, Server, store};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quill::Error> {
//!     let config = Config::load()?;
//!     let store = store::connect(&config.database_url).await?;
//!
//!     let app = PostsApi::new(store.clone())
//!         .with_timeout(config.request_timeout())
//!         .router();
//!     Server::bind(config.bind_addr).serve(app).await?;
//!
//!     store.close().await?;
//!     Ok(())
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod api;
pub mod config;
pub mod health;
pub mod model;
pub mod store;

pub use api::PostsApi;
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
