//! Shared error types for the services crate.

use thiserror::Error;

use mathblast_core::generator::GeneratorError;

/// Errors emitted by game sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no question is in flight")]
    NoQuestion,

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}
