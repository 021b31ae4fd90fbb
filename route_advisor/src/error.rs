use std::io;

use config::ConfigError;
use ptfs_feed::FeedError;
use thiserror::Error;

pub(crate) type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub(crate) enum ApplicationError {
    #[error("Error regarding config: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("System input/output error: {0}")]
    IoError(#[from] io::Error),
    #[error("Error with reqwest: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Feed error: {0}")]
    FeedError(#[from] FeedError),
    #[error("Could not determine the user config folder")]
    NoConfigFolder,
}
