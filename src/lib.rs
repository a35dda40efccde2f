//! XFChess client board
//!
//! Interactive chessboard that speculatively applies the player's moves and
//! keeps them in sync with an authoritative game server.
//!
//! - [`game`] - board engine: input, speculative moves, promotion, merges
//! - [`networking`] - legality oracle (HTTP) and game channel (WebSocket)
//! - [`core`] - settings, configuration, logging
//! - [`rendering`] - terminal drawing
//! - [`cli`] - terminal commands

pub mod cli;
pub mod core;
pub mod game;
pub mod networking;
pub mod rendering;
