//! # Relay Connection
//!
//! One websocket channel per run. The socket lives on a tokio task; the main
//! loop only sees `ChannelEvent`s and calls `send`/`close`.
//!
//! ```text
//!            ┌──────────────────────┐  Outbound  ┌─────────────┐
//!  main ────▶│  ConnectionManager   │──────────▶│ socket task │◀──▶ relay
//!  loop ◀────│  (state, guards)     │◀──────────│             │
//!            └──────────────────────┘ ChannelEvent└─────────────┘
//! ```

mod manager;

use std::fmt;

use tokio_tungstenite::tungstenite;

pub use manager::ConnectionManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    Closed,
}

/// Lifecycle and inbound traffic, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Opened,
    /// One inbound payload, verbatim.
    Message(String),
    /// Emitted exactly once per channel, however it ended.
    Closed,
}

#[derive(Debug)]
pub enum ConnectionError {
    /// The handshake failed (bad URL, refused, DNS, TLS).
    Connect(tungstenite::Error),
    /// Read or write failed after the channel opened.
    Socket(tungstenite::Error),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::Connect(e) => write!(f, "connect failed: {e}"),
            ConnectionError::Socket(e) => write!(f, "socket error: {e}"),
        }
    }
}

impl std::error::Error for ConnectionError {}
