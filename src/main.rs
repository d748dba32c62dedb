//! `quill`: serve the blog post API.
//!
//! Run with:
//!   RUST_LOG=debug cargo run
//!
//! Try:
//!   curl http://localhost:8080/posts
//!   curl -X POST http://localhost:8080/posts \
//!        -H 'content-type: application/json' \
//!        -d '{"author":{"firstName":"Ada","lastName":"Lovelace"},"title":"Notes","content":"Hello"}'
//!   curl -X DELETE http://localhost:8080/posts/<id>

use quill::{Config, PostsApi, Server, store};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), quill::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    let store = store::connect(&config.database_url).await?;

    let app = PostsApi::new(store.clone())
        .with_timeout(config.request_timeout())
        .router();
    let served = Server::bind(config.bind_addr).serve(app).await;

    store.close().await?;
    served
}
