use std::io;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

pub type FeedResult<T> = Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to decode stream message: {0}")]
    DecodeError(#[from] serde_json::Error),
    #[error("WebSocket error: {0}")]
    WebSocketError(#[from] tungstenite::Error),
    #[error("System input/output error: {0}")]
    IoError(#[from] io::Error),
    #[error("Not a valid airport code: {0:?}")]
    InvalidAirport(String),
    #[error("Not a valid runway designator: {0:?}")]
    InvalidRunway(String),
}
