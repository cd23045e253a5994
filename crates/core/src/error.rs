use thiserror::Error;

use crate::generator::GeneratorError;
use crate::model::{QuestionError, SettingsError};

/// Top-level error for the core crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
