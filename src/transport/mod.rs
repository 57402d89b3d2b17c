//! WebSocket transport layer.
//!
//! This module handles the client side of the push channel: connecting to
//! the server's `/ws` endpoint and relaying incoming text frames.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Caller (Rust)  │                              │  Server         │
//! │                 │         WebSocket            │                 │
//! │  Connection ────│◄─────────────────────────────│  /ws endpoint   │
//! │  → handler      │      <host>:<port>           │  (push only)    │
//! │                 │                              │                 │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `Connection::open` - Handshake with `ws://<host>:<port>/ws?id=<id>`
//! 2. Read loop task relays each text frame to the handler
//! 3. Remote close, stream end, or transport error terminates the loop
//! 4. `Connection::closed` resolves; state is `Closed` (terminal)

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and read loop.
pub mod connection;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Connection, ConnectionState, MessageHandler};
