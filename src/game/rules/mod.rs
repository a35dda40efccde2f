//! Chess rules known to the client
//!
//! Legality lives on the server. Only castling geometry is needed locally, to
//! move the rook along with the king.

pub mod castling;
