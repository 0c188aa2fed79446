use std::sync::mpsc;

use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use super::{ChannelEvent, ChannelState, ConnectionError};

enum Outbound {
    Text(String),
    Close,
}

/// Owns the single relay channel for the lifetime of the view.
///
/// Dropping the manager closes the channel.
pub struct ConnectionManager {
    url: String,
    state: ChannelState,
    outbound: UnboundedSender<Outbound>,
}

impl ConnectionManager {
    /// Spawn the socket task. Must be called from within a tokio runtime.
    ///
    /// Failure to connect is reported only as `ChannelEvent::Closed`.
    pub fn connect(url: impl Into<String>, events: mpsc::Sender<ChannelEvent>) -> Self {
        let url = url.into();
        let (outbound, outbound_rx) = unbounded_channel();
        info!("Connecting to {}", url);
        tokio::spawn(run_channel(url.clone(), outbound_rx, events));
        Self {
            url,
            state: ChannelState::Connecting,
            outbound,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Track lifecycle events emitted by the socket task.
    pub fn handle_event(&mut self, event: &ChannelEvent) {
        match event {
            ChannelEvent::Opened if self.state == ChannelState::Connecting => {
                self.state = ChannelState::Open;
            }
            ChannelEvent::Closed => self.state = ChannelState::Closed,
            _ => {}
        }
    }

    /// Queue one text payload. No-op unless the channel is open.
    pub fn send(&self, text: impl Into<String>) -> bool {
        if self.state != ChannelState::Open {
            debug!("Dropping send while channel is {:?}", self.state);
            return false;
        }
        if self.outbound.send(Outbound::Text(text.into())).is_err() {
            warn!("Failed to queue outbound payload: socket task gone");
            return false;
        }
        true
    }

    pub fn close(&mut self) {
        if self.state == ChannelState::Closed {
            return;
        }
        info!("Closing channel to {}", self.url);
        // The task may already be gone if the remote closed first.
        let _ = self.outbound.send(Outbound::Close);
        self.state = ChannelState::Closed;
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run_channel(
    url: String,
    mut outbound: UnboundedReceiver<Outbound>,
    events: mpsc::Sender<ChannelEvent>,
) {
    match drive(&url, &mut outbound, &events).await {
        Ok(()) => info!("Channel to {} closed", url),
        Err(e) => warn!("Channel to {} closed: {}", url, e),
    }
    emit(&events, ChannelEvent::Closed);
}

async fn drive(
    url: &str,
    outbound: &mut UnboundedReceiver<Outbound>,
    events: &mpsc::Sender<ChannelEvent>,
) -> Result<(), ConnectionError> {
    let ws = tokio::select! {
        result = connect_async(url) => result.map_err(ConnectionError::Connect)?.0,
        _ = close_requested(outbound) => {
            debug!("Close requested before the handshake finished");
            return Ok(());
        }
    };

    info!("Connected to {}", url);
    emit(events, ChannelEvent::Opened);
    let (mut ws_tx, mut ws_rx) = ws.split();

    loop {
        tokio::select! {
            command = outbound.recv() => match command {
                Some(Outbound::Text(text)) => {
                    debug!("Sending {} bytes", text.len());
                    ws_tx
                        .send(WsMessage::Text(text))
                        .await
                        .map_err(ConnectionError::Socket)?;
                }
                Some(Outbound::Close) | None => {
                    if let Err(e) = ws_tx.send(WsMessage::Close(None)).await {
                        debug!("Close frame not sent: {}", e);
                    }
                    let _ = ws_tx.close().await;
                    return Ok(());
                }
            },
            frame = ws_rx.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => emit(events, ChannelEvent::Message(text)),
                Some(Ok(WsMessage::Binary(bytes))) => emit(
                    events,
                    ChannelEvent::Message(String::from_utf8_lossy(&bytes).into_owned()),
                ),
                Some(Ok(WsMessage::Close(frame))) => {
                    debug!("Remote closed: {:?}", frame);
                    return Ok(());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(ConnectionError::Socket(e)),
                None => return Ok(()),
            },
        }
    }
}

/// Resolves once the manager asks to close or is dropped.
async fn close_requested(outbound: &mut UnboundedReceiver<Outbound>) {
    while let Some(command) = outbound.recv().await {
        if matches!(command, Outbound::Close) {
            return;
        }
    }
}

fn emit(events: &mpsc::Sender<ChannelEvent>, event: ChannelEvent) {
    if events.send(event).is_err() {
        debug!("Channel event dropped: receiver gone");
    }
}
