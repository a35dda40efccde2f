//! Game sync channel
//!
//! One WebSocket per game session. A reader task decodes server frames and
//! forwards them to the host; a writer task drains outbound moves. Neither task
//! touches engine state.

use crate::networking::error::{SyncError, SyncResult};
use crate::networking::transport::{ChannelState, MoveTransport};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use shared::protocol::{parse_inbound, InboundMessage, OutboundMove};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;
use websocket::{ClientBuilder, Message};

/// Path of the game socket below the server base URL
const GAME_SOCKET_PATH: &str = "ws/game-server/";

/// Build `{base}ws/game-server/?token=…&gameId=…`
pub fn game_socket_url(base: &Url, access_token: &str, game_id: &str) -> SyncResult<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let mut url = base.join(GAME_SOCKET_PATH)?;
    url.query_pairs_mut()
        .append_pair("token", access_token)
        .append_pair("gameId", game_id);
    Ok(url)
}

#[derive(Debug, Default)]
struct ChannelShared {
    state: ChannelState,
    outbound: Option<mpsc::UnboundedSender<String>>,
    reader: Option<JoinHandle<()>>,
}

/// Persistent push channel to the game server
#[derive(Debug, Clone)]
pub struct SyncChannel {
    url: Url,
    shared: Arc<Mutex<ChannelShared>>,
}

impl SyncChannel {
    /// Channel in the `Connecting` state; nothing is sent until [`Self::open`]
    pub fn new(url: Url) -> Self {
        Self {
            url,
            shared: Arc::new(Mutex::new(ChannelShared::default())),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Connect and start the reader and writer tasks
    ///
    /// Decoded server messages arrive on the returned receiver, which ends when
    /// the socket closes.
    pub async fn open(&self) -> SyncResult<mpsc::UnboundedReceiver<InboundMessage>> {
        info!("[NETWORK] Connecting to {}", redact(&self.url));
        self.shared.lock().state = ChannelState::Connecting;

        let connected = async {
            ClientBuilder::new()
                .uri(self.url.as_str())
                .map_err(|e| SyncError::InvalidUri {
                    uri: redact(&self.url),
                    message: e.to_string(),
                })?
                .connect()
                .await
                .map_err(SyncError::from)
        }
        .await;

        let (stream, _response) = match connected {
            Ok(pair) => pair,
            Err(e) => {
                self.shared.lock().state = ChannelState::Closed;
                return Err(e);
            }
        };

        let (mut sink, mut frames) = stream.split();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();

        let reader_shared = Arc::clone(&self.shared);
        let reader = tokio::spawn(async move {
            while let Some(frame) = frames.next().await {
                let message = match frame {
                    Ok(message) => message,
                    Err(e) => {
                        warn!("[NETWORK] Socket error: {}", e);
                        break;
                    }
                };
                if message.is_close() {
                    info!("[NETWORK] Server closed the game channel");
                    break;
                }
                let Some(text) = message.as_text() else {
                    continue;
                };
                match parse_inbound(text) {
                    Ok(InboundMessage::Unknown) => {
                        debug!("[NETWORK] Ignoring unknown message type");
                    }
                    Ok(inbound) => {
                        if inbound_tx.send(inbound).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("[NETWORK] Skipping malformed frame: {}", e),
                }
            }
            let mut shared = reader_shared.lock();
            shared.state = ChannelState::Closed;
            shared.outbound = None;
        });

        tokio::spawn(async move {
            while let Some(text) = outbound_rx.recv().await {
                if let Err(e) = sink.send(Message::text(text)).await {
                    warn!("[NETWORK] Failed to send frame: {}", e);
                    break;
                }
            }
            if let Err(e) = sink.close().await {
                debug!("[NETWORK] Close handshake failed: {}", e);
            }
        });

        let mut shared = self.shared.lock();
        shared.state = ChannelState::Open;
        shared.outbound = Some(outbound_tx);
        shared.reader = Some(reader);
        info!("[NETWORK] Game channel open");
        Ok(inbound_rx)
    }

    /// Tear the channel down. Safe to call more than once.
    pub fn close(&self) {
        let mut shared = self.shared.lock();
        if shared.state == ChannelState::Closed && shared.reader.is_none() {
            return;
        }
        shared.state = ChannelState::Closed;
        // Dropping the sender lets the writer finish its close handshake
        shared.outbound = None;
        if let Some(reader) = shared.reader.take() {
            reader.abort();
        }
        info!("[NETWORK] Game channel closed");
    }
}

impl MoveTransport for SyncChannel {
    fn state(&self) -> ChannelState {
        self.shared.lock().state
    }

    fn send(&self, message: &OutboundMove) -> SyncResult<()> {
        let shared = self.shared.lock();
        let state = shared.state;
        let Some(outbound) = shared.outbound.as_ref().filter(|_| state == ChannelState::Open)
        else {
            return Err(SyncError::NotOpen { state });
        };
        let text = message.to_json()?;
        outbound
            .send(text)
            .map_err(|_| SyncError::NotOpen { state: ChannelState::Closed })
    }
}

/// URL for logs, without the access token
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
