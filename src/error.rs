use std::io::Error as IoError;

use figment::Error as FigmentError;
use log4rs::config::runtime::ConfigErrors;
use serde_json::Error as JsonError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the shell around the lottery: loading snapshots, config and logging.
/// The lottery, duplicate detector and ranking are total and never produce these.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("Invalid snapshot: {0}")]
    Json(#[from] JsonError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] Box<FigmentError>),
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<FigmentError> for Error {
    fn from(err: FigmentError) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<ConfigErrors> for Error {
    fn from(err: ConfigErrors) -> Self {
        Self::Logging(err.to_string())
    }
}
