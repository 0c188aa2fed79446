//! # Chat Session
//!
//! Identity, connection phase, and the message log.
//!
//! ```text
//!  AwaitingName ──submit_name──▶ Connected ──on_close──▶ Disconnected
//!                (channel open)                          (terminal)
//! ```
//!
//! Inbound lines are recorded in every phase. Nothing is ever removed from
//! the log.

use log::debug;

pub const CONNECTED_NOTICE: &str = "Connected to server...";
pub const DISCONNECTED_NOTICE: &str = "Disconnected from server...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingName,
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Synthesized locally (connect/disconnect notices).
    System,
    /// A line from the relay, or a local echo of one we sent.
    Relayed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::System,
            text: text.into(),
        }
    }

    pub fn relayed(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Relayed,
            text: text.into(),
        }
    }
}

/// Append-only, arrival-ordered list of displayed messages.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.entries.push(message);
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub display_name: Option<String>,
    pub phase: Phase,
    pub log: MessageLog,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            display_name: None,
            phase: Phase::AwaitingName,
            log: MessageLog::new(),
        }
    }

    /// Accept a display name. Returns the payload to send, or `None` if the
    /// name is blank, the channel isn't open, or we're past the login step.
    pub fn submit_name(&mut self, name: &str, channel_open: bool) -> Option<String> {
        let name = name.trim();
        if name.is_empty() || !channel_open || self.phase != Phase::AwaitingName {
            debug!(
                "Rejected name (blank={}, channel_open={}, phase={:?})",
                name.is_empty(),
                channel_open,
                self.phase
            );
            return None;
        }

        self.display_name = Some(name.to_string());
        self.phase = Phase::Connected;
        self.log.push(Message::system(CONNECTED_NOTICE));
        Some(name.to_string())
    }

    /// Returns the trimmed line to send, or `None` if blank or not connected.
    pub fn submit_message(&mut self, text: &str, local_echo: bool) -> Option<String> {
        if self.phase != Phase::Connected {
            return None;
        }
        let line = text.trim();
        if line.is_empty() {
            return None;
        }
        if local_echo {
            self.log.push(Message::relayed(line));
        }
        Some(line.to_string())
    }

    pub fn on_message(&mut self, text: String) {
        self.log.push(Message::relayed(text));
    }

    /// Only the first close after connecting is announced.
    pub fn on_close(&mut self) {
        if self.phase == Phase::Connected {
            self.phase = Phase::Disconnected;
            self.log.push(Message::system(DISCONNECTED_NOTICE));
        }
    }
}
