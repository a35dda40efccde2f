//! Outbound side of the sync channel as seen by the engine

use crate::networking::error::{SyncError, SyncResult};
use shared::protocol::OutboundMove;

/// Lifecycle of the game channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    #[default]
    Connecting,
    Open,
    Closed,
}

/// Where the engine hands finished moves
///
/// Sends never block and never queue: a move handed to a channel that is not
/// open is gone.
pub trait MoveTransport {
    fn state(&self) -> ChannelState;

    fn is_open(&self) -> bool {
        self.state() == ChannelState::Open
    }

    fn send(&self, message: &OutboundMove) -> SyncResult<()>;
}

/// Transport for local pass-and-play; permanently closed
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

impl MoveTransport for OfflineTransport {
    fn state(&self) -> ChannelState {
        ChannelState::Closed
    }

    fn send(&self, _message: &OutboundMove) -> SyncResult<()> {
        Err(SyncError::NotOpen {
            state: ChannelState::Closed,
        })
    }
}

impl<T: MoveTransport + ?Sized> MoveTransport for std::sync::Arc<T> {
    fn state(&self) -> ChannelState {
        (**self).state()
    }

    fn send(&self, message: &OutboundMove) -> SyncResult<()> {
        (**self).send(message)
    }
}
