//! Unified error type for storefront front-ends.
//!
//! View-state managers degrade on backend failures and never return these;
//! `AppError` covers what a front-end can still fail on: configuration,
//! local storage, rendering, and commands that name something unknown.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Backend request failed where no fallback exists.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for storefront operations.
pub type Result<T> = std::result::Result<T, AppError>;
