//! Unified error type.

use crate::config::ConfigError;
use crate::store::StoreError;

/// The error type returned by quill's fallible infrastructure operations.
///
/// Request-level failures (400, 404, ...) are expressed as HTTP
/// [`Response`](crate::Response) values through [`ApiError`](crate::api::ApiError),
/// not as `Error`s. This type surfaces startup and shutdown failures: loading
/// configuration, opening the store, binding a port.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),
}
