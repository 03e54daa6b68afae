use thiserror::Error;

/// Top-level error type for the `dnac-api` crate.
///
/// Four families of failure: a missing token (checked before any request),
/// transport problems, protocol rejections (non-2xx), and data problems
/// (missing fields, unknown device). The CLI maps these into diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Precondition ────────────────────────────────────────────────
    /// An authenticated call was attempted before a token was obtained.
    #[error("No auth token yet -- authenticate first")]
    NotAuthenticated,

    // ── Authentication ──────────────────────────────────────────────
    /// Token request rejected, or the token was refused by an endpoint.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Protocol ────────────────────────────────────────────────────
    /// Non-2xx response from an intent endpoint.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The response parsed but lacked a required field.
    #[error("Response is missing the '{field}' field")]
    MissingField { field: &'static str },

    /// No device in the inventory has the requested management IP.
    #[error("Device {ip} not found")]
    DeviceNotFound { ip: String },
}

impl Error {
    /// Returns `true` if the controller rejected the credentials or token.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::DeviceNotFound { .. } => true,
            Self::Api { status, .. } => *status == 404,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if the request timed out at the transport level.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
