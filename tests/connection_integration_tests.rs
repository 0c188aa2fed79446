use std::sync::mpsc;
use std::time::Duration;

use chatterm::connection::{ChannelEvent, ChannelState, ConnectionManager};
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{WebSocketStream, accept_async};
use tokio_test::assert_ok;

// ============================================================================
// Helper Functions
// ============================================================================

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Binds a local relay on an ephemeral port and returns it with its URL.
async fn start_relay() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    (listener, url)
}

async fn accept(listener: &TcpListener) -> WebSocketStream<TcpStream> {
    let (stream, _) = listener.accept().await.unwrap();
    accept_async(stream).await.unwrap()
}

/// Waits for the next channel event without blocking the runtime.
async fn next_event(rx: &mpsc::Receiver<ChannelEvent>) -> Option<ChannelEvent> {
    let deadline = tokio::time::Instant::now() + EVENT_TIMEOUT;
    loop {
        match rx.try_recv() {
            Ok(event) => return Some(event),
            Err(mpsc::TryRecvError::Disconnected) => return None,
            Err(mpsc::TryRecvError::Empty) => {
                if tokio::time::Instant::now() >= deadline {
                    return None;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        }
    }
}

/// Collects events until the sender side is gone (task finished).
async fn drain(rx: &mpsc::Receiver<ChannelEvent>) -> Vec<ChannelEvent> {
    let mut events = Vec::new();
    while let Some(event) = next_event(rx).await {
        events.push(event);
    }
    events
}

async fn open(
    listener: &TcpListener,
    url: &str,
) -> (
    ConnectionManager,
    mpsc::Receiver<ChannelEvent>,
    WebSocketStream<TcpStream>,
) {
    let (tx, rx) = mpsc::channel();
    let mut manager = ConnectionManager::connect(url, tx);
    let server = accept(listener).await;

    let event = next_event(&rx).await.unwrap();
    assert_eq!(event, ChannelEvent::Opened);
    manager.handle_event(&event);
    assert_eq!(manager.state(), ChannelState::Open);

    (manager, rx, server)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_inbound_lines_arrive_in_order() {
    let (listener, url) = start_relay().await;
    let (_manager, rx, mut server) = open(&listener, &url).await;

    for line in ["alpha", "beta", "alpha", ""] {
        assert_ok!(server.send(WsMessage::Text(line.to_string())).await);
    }

    let mut received = Vec::new();
    for _ in 0..4 {
        received.push(next_event(&rx).await.unwrap());
    }
    assert_eq!(
        received,
        vec![
            ChannelEvent::Message("alpha".to_string()),
            ChannelEvent::Message("beta".to_string()),
            ChannelEvent::Message("alpha".to_string()),
            ChannelEvent::Message(String::new()),
        ]
    );
}

#[tokio::test]
async fn test_name_is_first_outbound_payload() {
    let (listener, url) = start_relay().await;
    let (manager, _rx, mut server) = open(&listener, &url).await;

    assert!(manager.send("neo"));
    assert!(manager.send("hello, world"));

    let first = server.next().await.unwrap().unwrap();
    let second = server.next().await.unwrap().unwrap();
    assert_eq!(first, WsMessage::Text("neo".to_string()));
    assert_eq!(second, WsMessage::Text("hello, world".to_string()));
}

#[tokio::test]
async fn test_remote_close_emits_closed_once() {
    let (listener, url) = start_relay().await;
    let (mut manager, rx, mut server) = open(&listener, &url).await;

    assert_ok!(server.close(None).await);

    let events = drain(&rx).await;
    assert_eq!(events, vec![ChannelEvent::Closed]);

    manager.handle_event(&ChannelEvent::Closed);
    assert_eq!(manager.state(), ChannelState::Closed);
    assert!(!manager.send("anyone there?"));
}

#[tokio::test]
async fn test_local_close_emits_closed_once() {
    let (listener, url) = start_relay().await;
    let (mut manager, rx, mut server) = open(&listener, &url).await;

    manager.close();
    manager.close();

    let frame = server.next().await;
    assert!(matches!(frame, Some(Ok(WsMessage::Close(_))) | None));

    let events = drain(&rx).await;
    assert_eq!(events, vec![ChannelEvent::Closed]);
}

#[tokio::test]
async fn test_drop_closes_socket() {
    let (listener, url) = start_relay().await;
    let (manager, rx, mut server) = open(&listener, &url).await;

    drop(manager);

    let frame = server.next().await;
    assert!(matches!(frame, Some(Ok(WsMessage::Close(_))) | None));
    assert_eq!(drain(&rx).await, vec![ChannelEvent::Closed]);
}

#[tokio::test]
async fn test_unreachable_relay_only_closes() {
    // Grab a free port, then stop listening on it.
    let (listener, url) = start_relay().await;
    drop(listener);

    let (tx, rx) = mpsc::channel();
    let _manager = ConnectionManager::connect(url, tx);

    assert_eq!(drain(&rx).await, vec![ChannelEvent::Closed]);
}

#[tokio::test]
async fn test_malformed_url_only_closes() {
    let (tx, rx) = mpsc::channel();
    let _manager = ConnectionManager::connect("not a websocket url", tx);

    assert_eq!(drain(&rx).await, vec![ChannelEvent::Closed]);
}

#[tokio::test]
async fn test_binary_frames_are_text() {
    let (listener, url) = start_relay().await;
    let (_manager, rx, mut server) = open(&listener, &url).await;

    assert_ok!(server.send(WsMessage::Binary(b"raw bytes".to_vec())).await);
    assert_eq!(
        next_event(&rx).await,
        Some(ChannelEvent::Message("raw bytes".to_string()))
    );
}
