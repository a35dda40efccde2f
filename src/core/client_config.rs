//! Command-line configuration
//!
//! Every option can also come from the environment, and a `.env` file in the
//! working directory is read first.

use crate::core::error::{CoreError, CoreResult};
use crate::core::settings_persistence::settings_path;
use crate::game::types::Orientation;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

/// Terminal client for XFChess games
#[derive(Parser, Debug, Clone)]
#[command(name = "xfchess-client", version, about)]
pub struct ClientConfig {
    /// Base URL of the game server WebSocket endpoint
    #[arg(long, env = "XFCHESS_SERVER_URL", default_value = "ws://localhost:8000/")]
    pub server_url: Url,

    /// Base URL of the REST API (legality oracle, FEN parsing)
    #[arg(long, env = "XFCHESS_API_URL", default_value = "http://localhost:8000/")]
    pub api_url: Url,

    /// Access token of the logged-in player
    #[arg(long, env = "XFCHESS_ACCESS_TOKEN")]
    pub access_token: Option<String>,

    /// Game to join
    #[arg(long, env = "XFCHESS_GAME_ID")]
    pub game_id: Option<String>,

    /// Side of the board facing the player
    #[arg(long, default_value = "white")]
    pub orientation: Orientation,

    /// Start from this FEN instead of the standard position
    #[arg(long)]
    pub fen: Option<String>,

    /// Pass-and-play on one terminal, no game channel
    #[arg(long)]
    pub offline: bool,

    /// Settings file (defaults to the user config directory)
    #[arg(long, env = "XFCHESS_SETTINGS")]
    pub settings: Option<PathBuf>,
}

/// How the client talks to the game server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    Online { access_token: String, game_id: String },
    Offline,
}

impl ClientConfig {
    /// Read `.env`, then the command line
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!("[CONFIG] Loaded environment from {:?}", path),
            Err(e) => debug!("[CONFIG] No .env loaded: {}", e),
        }
        Self::parse()
    }

    pub fn session_mode(&self) -> CoreResult<SessionMode> {
        if self.offline {
            return Ok(SessionMode::Offline);
        }
        match (&self.access_token, &self.game_id) {
            (Some(access_token), Some(game_id)) => Ok(SessionMode::Online {
                access_token: access_token.clone(),
                game_id: game_id.clone(),
            }),
            _ => Err(CoreError::Config {
                message: "online play needs --access-token and --game-id (or --offline)"
                    .to_string(),
            }),
        }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.settings.clone().unwrap_or_else(settings_path)
    }
}
