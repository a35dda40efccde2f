//! Error types for networking
//!
//! One enum per collaborator: the HTTP legality oracle and the WebSocket sync
//! channel. Neither is fatal to the engine; callers log and carry on.

use crate::networking::transport::ChannelState;
use shared::protocol::ProtocolError;
use thiserror::Error;

/// Errors talking to the legality oracle
#[derive(Error, Debug)]
pub enum OracleError {
    /// Request could not be sent or the body could not be decoded
    #[error("Oracle request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Oracle answered with a non-success status
    #[error("Oracle returned {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    /// Endpoint URL could not be built
    #[error("Invalid oracle URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias for oracle operations
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors on the game sync channel
#[derive(Error, Debug)]
pub enum SyncError {
    /// Game server URL could not be built
    #[error("Invalid game server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// URL was rejected by the WebSocket client
    #[error("Invalid WebSocket URI {uri}: {message}")]
    InvalidUri { uri: String, message: String },

    /// Handshake or socket failure
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] websocket::Error),

    /// Send attempted while the channel is connecting or closed
    #[error("Channel is not open ({state:?})")]
    NotOpen { state: ChannelState },

    /// Outbound message could not be encoded
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Result type alias for sync channel operations
pub type SyncResult<T> = Result<T, SyncError>;
