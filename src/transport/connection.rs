//! WebSocket connection and read loop.
//!
//! This module opens the client connection and relays server-pushed text
//! frames to the caller's handler.
//!
//! # Read Loop
//!
//! The connection spawns a tokio task that handles:
//!
//! - Incoming text frames (relayed to the handler verbatim)
//! - Close frames and transport errors (both end the loop)
//!
//! There is no outgoing traffic after the handshake; the channel is
//! push-only from the server's point of view.

// ============================================================================
// Imports
// ============================================================================

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, info};

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

// ============================================================================
// Types
// ============================================================================

/// Message handler callback type.
///
/// Called once per text frame received, with the payload unmodified.
/// Registered at connect time and read-only afterwards.
pub type MessageHandler = Box<dyn Fn(&str) + Send + Sync>;

/// Client-side WebSocket stream type.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ============================================================================
// ConnectionState
// ============================================================================

/// Lifecycle state of a [`Connection`].
///
/// `Closed` is terminal: there is no reconnection transition, and no
/// message handler runs once it is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake in progress.
    Connecting,
    /// Handshake complete; text frames may arrive.
    Open,
    /// Socket terminated by the remote end, the network, or a transport
    /// error. Normal shutdown and failure are not distinguished.
    Closed,
}

// ============================================================================
// Connection
// ============================================================================

/// A single WebSocket connection to the server's push endpoint.
///
/// Created with [`Connection::open`], which completes the handshake and
/// spawns the read loop. The connection lives until the remote end or the
/// network closes the socket; no local close path is exposed.
#[derive(Debug)]
pub struct Connection {
    /// Observed lifecycle state, written by the read loop.
    state_rx: watch::Receiver<ConnectionState>,
}

impl Connection {
    /// Opens a WebSocket connection to the endpoint.
    ///
    /// Completes the HTTP upgrade handshake, then spawns the read loop task
    /// that invokes `handler` once per incoming text frame. When this method
    /// returns `Ok`, the connection is [`ConnectionState::Open`] and no
    /// handler invocation has happened yet.
    ///
    /// # Errors
    ///
    /// - [`Error::Url`] if the endpoint's host does not form a valid URL
    /// - [`Error::Connection`] if the handshake fails
    pub async fn open(endpoint: &Endpoint, handler: MessageHandler) -> Result<Self> {
        let url = endpoint.url()?;

        debug!(url = %url, "Opening WebSocket connection");

        let (ws_stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| Error::connection(format!("WebSocket handshake failed: {e}")))?;

        debug!(host = endpoint.host(), port = endpoint.port(), "WebSocket connection established");

        let (state_tx, state_rx) = watch::channel(ConnectionState::Open);

        tokio::spawn(Self::run_read_loop(ws_stream, handler, state_tx));

        Ok(Self { state_rx })
    }

    /// Returns the current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Returns `true` once the connection has terminated.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state() == ConnectionState::Closed
    }

    /// Waits until the connection reaches [`ConnectionState::Closed`].
    ///
    /// Resolves immediately if the connection is already closed. After this
    /// resolves, no further handler invocations occur.
    pub async fn closed(&self) {
        let mut state_rx = self.state_rx.clone();

        while *state_rx.borrow_and_update() != ConnectionState::Closed {
            if state_rx.changed().await.is_err() {
                break;
            }
        }
    }

    /// Read loop that relays incoming text frames to the handler.
    ///
    /// Ends on a close frame, stream end, or transport error; all three
    /// collapse into the single close event.
    async fn run_read_loop(
        mut ws_stream: WsStream,
        handler: MessageHandler,
        state_tx: watch::Sender<ConnectionState>,
    ) {
        while let Some(message) = ws_stream.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    handler(text.as_str());
                }

                Ok(Message::Close(_)) => {
                    debug!("Close frame received");
                    break;
                }

                Err(e) => {
                    error!(error = %e, "WebSocket error");
                    break;
                }

                // Ignore Binary, Ping, Pong
                _ => {}
            }
        }

        let _ = state_tx.send(ConnectionState::Closed);

        info!("WS closed");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures_util::SinkExt;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio_tungstenite::tungstenite::handshake::server::{Request, Response};
    use tokio_tungstenite::{accept_async, accept_hdr_async};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    async fn bind_server() -> (TcpListener, u16) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind should succeed");
        let port = listener.local_addr().expect("local addr").port();
        (listener, port)
    }

    #[tokio::test]
    async fn test_text_frames_reach_handler_in_order() {
        init_tracing();
        let (listener, port) = bind_server().await;

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = accept_async(stream).await.expect("upgrade");
            ws.send(Message::Text("42".into())).await.expect("send");
            ws.send(Message::Text("hello".into())).await.expect("send");
            let _ = ws.close(None).await;
        });

        let received = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let connection = Connection::open(
            &Endpoint::new("127.0.0.1", port),
            Box::new(move |message| sink.lock().expect("lock").push(message.to_owned())),
        )
        .await
        .expect("connect should succeed");

        connection.closed().await;

        assert_eq!(
            *received.lock().expect("lock"),
            vec!["42".to_owned(), "hello".to_owned()]
        );
        assert_eq!(connection.state(), ConnectionState::Closed);
    }

    #[tokio::test]
    async fn test_upgrade_request_targets_ws_path_with_id() {
        init_tracing();
        let (listener, port) = bind_server().await;
        let (uri_tx, uri_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let callback = move |request: &Request, response: Response| {
                let _ = uri_tx.send(request.uri().to_string());
                Ok(response)
            };
            let mut ws = accept_hdr_async(stream, callback).await.expect("upgrade");
            let _ = ws.close(None).await;
        });

        let connection = Connection::open(&Endpoint::new("127.0.0.1", port), Box::new(|_| {}))
            .await
            .expect("connect should succeed");

        assert_eq!(uri_rx.await.expect("handshake ran"), "/ws?id=foobar");
        connection.closed().await;
    }

    #[tokio::test]
    async fn test_close_without_message_never_invokes_handler() {
        init_tracing();
        let (listener, port) = bind_server().await;

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = accept_async(stream).await.expect("upgrade");
            let _ = ws.close(None).await;
        });

        let invocations = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&invocations);
        let connection = Connection::open(
            &Endpoint::new("127.0.0.1", port),
            Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .await
        .expect("connect should succeed");

        connection.closed().await;

        assert_eq!(invocations.load(Ordering::SeqCst), 0);
        assert!(connection.is_closed());
    }

    #[tokio::test]
    async fn test_state_open_until_remote_closes() {
        init_tracing();
        let (listener, port) = bind_server().await;
        let (hold_tx, hold_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = accept_async(stream).await.expect("upgrade");
            let _ = hold_rx.await;
            let _ = ws.close(None).await;
        });

        let connection = Connection::open(&Endpoint::new("127.0.0.1", port), Box::new(|_| {}))
            .await
            .expect("connect should succeed");

        assert_eq!(connection.state(), ConnectionState::Open);
        assert!(!connection.is_closed());

        hold_tx.send(()).expect("server task alive");
        connection.closed().await;

        assert_eq!(connection.state(), ConnectionState::Closed);
    }

    #[tokio::test]
    async fn test_binary_frames_are_ignored() {
        init_tracing();
        let (listener, port) = bind_server().await;

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = accept_async(stream).await.expect("upgrade");
            ws.send(Message::Binary(vec![0xde, 0xad].into()))
                .await
                .expect("send");
            ws.send(Message::Text("after-binary".into()))
                .await
                .expect("send");
            let _ = ws.close(None).await;
        });

        let received = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let connection = Connection::open(
            &Endpoint::new("127.0.0.1", port),
            Box::new(move |message| sink.lock().expect("lock").push(message.to_owned())),
        )
        .await
        .expect("connect should succeed");

        connection.closed().await;

        assert_eq!(*received.lock().expect("lock"), vec!["after-binary".to_owned()]);
    }

    #[tokio::test]
    async fn test_handshake_failure_is_connection_error() {
        init_tracing();
        // Grab a free port, then close the listener so nothing answers.
        let (listener, port) = bind_server().await;
        drop(listener);

        let result = Connection::open(&Endpoint::new("127.0.0.1", port), Box::new(|_| {})).await;

        let err = result.expect_err("connect should fail");
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_invalid_host_fails_before_connect() {
        let endpoint = Endpoint::new("not a host", 8080);

        let result = Connection::open(&endpoint, Box::new(|_| {})).await;

        assert!(matches!(result, Err(Error::Url(_))));
    }
}
