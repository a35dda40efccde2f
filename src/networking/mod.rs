//! Networking - legality oracle over HTTP and the game sync channel over WebSocket

pub mod client;
pub mod error;
pub mod oracle;
pub mod transport;

pub use client::{game_socket_url, SyncChannel};
pub use error::{OracleError, OracleResult, SyncError, SyncResult};
pub use oracle::{HttpLegalityOracle, LegalityOracle, MoveInfo};
pub use transport::{ChannelState, MoveTransport, OfflineTransport};
