//! Pushsocket - Minimal WebSocket push-message client.
//!
//! This library opens a single WebSocket connection to a server's `/ws`
//! endpoint and relays every incoming text frame, verbatim, to a
//! caller-supplied callback. There is no protocol on top of WebSocket
//! framing: no parsing, no reconnection, no outgoing traffic after the
//! handshake.
//!
//! # Architecture
//!
//! - [`Endpoint`] names the target: host, port, and the `id` query
//!   parameter (default `foobar`). The path is always `/ws`.
//! - [`Connection::open`] completes the handshake and spawns a read loop
//!   task; the handler runs once per text frame, in arrival order.
//! - The connection ends when the remote end or the network closes the
//!   socket. Termination is observable via [`Connection::closed`]; no
//!   reason code is surfaced.
//!
//! # Quick Start
//!
//! ```no_run
//! use pushsocket::{Connection, Endpoint, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let endpoint = Endpoint::new("localhost", 8080);
//!
//!     let connection = Connection::open(
//!         &endpoint,
//!         Box::new(|message| println!("received: {message}")),
//!     )
//!     .await?;
//!
//!     // Runs until the server closes the connection.
//!     connection.closed().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`endpoint`] | Connection target: host, port, client id |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`transport`] | WebSocket connection and read loop |

// ============================================================================
// Modules
// ============================================================================

/// Connection endpoint configuration.
///
/// The server address is injected explicitly; use [`Endpoint::new`] with the
/// host and port of the page's origin.
pub mod endpoint;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// WebSocket transport layer.
///
/// Connection handshake and the text-frame read loop.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Endpoint types
pub use endpoint::{DEFAULT_CLIENT_ID, Endpoint, WS_PATH};

// Error types
pub use error::{Error, Result};

// Transport types
pub use transport::{Connection, ConnectionState, MessageHandler};
