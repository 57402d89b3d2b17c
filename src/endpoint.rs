//! Connection endpoint configuration.
//!
//! The server's address is injected explicitly rather than read from ambient
//! process state, so the target of a connection is always visible at the call
//! site and trivially swappable in tests.
//!
//! # Example
//!
//! ```
//! use pushsocket::Endpoint;
//!
//! let endpoint = Endpoint::new("localhost", 8080);
//! assert_eq!(endpoint.ws_url(), "ws://localhost:8080/ws?id=foobar");
//! ```

// ============================================================================
// Imports
// ============================================================================

use url::Url;

use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Fixed path of the server's WebSocket endpoint.
pub const WS_PATH: &str = "/ws";

/// Default client identifier sent in the `id` query parameter.
///
/// The server keys its client registry on this value. Historically a
/// placeholder, kept verbatim for compatibility; override it with
/// [`Endpoint::with_client_id`] when clients must be distinguishable.
pub const DEFAULT_CLIENT_ID: &str = "foobar";

// ============================================================================
// Endpoint
// ============================================================================

/// Target of a single WebSocket connection.
///
/// Holds the server's host and port plus the client identifier passed in the
/// query string. The endpoint path is always [`WS_PATH`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Server hostname or IP address.
    host: String,
    /// Server TCP port.
    port: u16,
    /// Value of the `id` query parameter.
    client_id: String,
}

// ============================================================================
// Constructors
// ============================================================================

impl Endpoint {
    /// Creates an endpoint for the given host and port.
    ///
    /// The client identifier defaults to [`DEFAULT_CLIENT_ID`].
    #[inline]
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            client_id: DEFAULT_CLIENT_ID.to_owned(),
        }
    }

    /// Overrides the client identifier sent in the `id` query parameter.
    #[inline]
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Endpoint {
    /// Returns the server hostname.
    #[inline]
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the server port.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the client identifier.
    #[inline]
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the WebSocket URL for this endpoint.
    ///
    /// Format: `ws://<host>:<port>/ws?id=<client_id>`
    #[inline]
    #[must_use]
    pub fn ws_url(&self) -> String {
        format!(
            "ws://{}:{}{WS_PATH}?id={}",
            self.host, self.port, self.client_id
        )
    }

    /// Returns the WebSocket URL parsed and validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`](crate::Error::Url) if the configured host does
    /// not form a valid URL.
    pub fn url(&self) -> Result<Url> {
        Ok(Url::parse(&self.ws_url())?)
    }
}

// ============================================================================
// Tests
// ============================================================================
