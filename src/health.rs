//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the post store serve traffic? Failure → pulled from the load balancer. |
//!
//! Both are mounted by [`PostsApi::router`](crate::api::PostsApi::router).

use std::time::Duration;

use http::StatusCode;
use tracing::warn;

use crate::store::PostStore;
use crate::{Request, Response};

/// Always `200 ok`. Deliberately independent of the store.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 ready` while the store answers a ping within `timeout`, `503`
/// otherwise.
pub async fn readiness(store: &dyn PostStore, timeout: Duration) -> Response {
    match tokio::time::timeout(timeout, store.ping()).await {
        Ok(Ok(())) => Response::text("ready"),
        Ok(Err(e)) => {
            warn!(error = %e, "readiness check failed");
            Response::status(StatusCode::SERVICE_UNAVAILABLE)
        }
        Err(_) => {
            warn!(?timeout, "readiness check timed out");
            Response::status(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
