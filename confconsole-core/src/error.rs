//! Unified error type definition

use std::error::Error as StdError;
use std::fmt::Write as _;

use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// A dialog key could not be resolved to a handler
    #[error("dialog not supported: {0}")]
    Dispatch(String),

    /// Plugin discovery failed (duplicate or malformed unit)
    #[error("plugin registry error: {0}")]
    Registry(String),

    /// An external provider (network, lifecycle, plugin) failed
    #[error("{0}")]
    Collaborator(String),

    /// Configuration file could not be read or written
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The session cannot continue (usage-only mode without a usable network)
    #[error("{0}")]
    Fatal(String),

    /// Operator confirmed the quit prompt after pressing escape
    #[error("quit requested")]
    QuitRequested,
}

impl CoreError {
    /// Expected failures (operator input, missing data) are logged at `warn`.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Collaborator(_) | Self::QuitRequested)
    }

    /// Render the error together with its source chain, one cause per line.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        let mut text = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let _ = write!(text, "\n  caused by: {cause}");
            source = cause.source();
        }
        text
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
