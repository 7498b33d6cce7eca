//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the CLI
//! uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level error enum
//! - Module-specific errors ([`ResolutionError`], [`InvalidUrlError`],
//!   [`StoreError`]) for detailed handling
//!
//! # Example
//!
//! ```ignore
//! use smartlink::error::{Result, ResultExt};
//!
//! fn save(store: &SmartlinkStore, form: SmartlinkFormData) -> Result<Smartlink> {
//!     store.create(form).with_context("while saving the magic link")
//! }
//! ```

use crate::config::ConfigError;
use crate::resolver::{InvalidUrlError, ResolutionError};
use crate::store::StoreError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The link isn't one we can resolve
    #[error(transparent)]
    InvalidUrl(#[from] InvalidUrlError),

    /// Resolution service failure
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// Record store failure (including not found)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether the failed operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Resolution(e) => e.is_transient(),
            Self::WithContext { source, .. } => source.is_transient(),
            _ => false,
        }
    }

    /// Whether this is a missing-record error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Store(StoreError::NotFound(_)) => true,
            Self::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(ctx))
    }
}
