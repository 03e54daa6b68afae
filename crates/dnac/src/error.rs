//! CLI error types with miette diagnostics.
//!
//! Maps `dnac_api::Error` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use std::fmt::Write as _;

use miette::Diagnostic;
use thiserror::Error;

use dnac_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller")]
    #[diagnostic(
        code(dnac::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Self-signed certificate? Configure ca_cert, or use --insecure (-k) for lab gear."
        )
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(dnac::tls_error),
        help("Check the ca_cert path in your profile or the --ca-cert flag.")
    )]
    TlsError { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("No auth token yet")]
    #[diagnostic(
        code(dnac::not_authenticated),
        help("Authenticate first (menu option 1, or `dnac auth`).")
    )]
    NotAuthenticated,

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(dnac::auth_failed),
        help(
            "Verify the username and password for this controller.\n\
             Run: dnac config set-password --profile <name>"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(dnac::no_credentials),
        help(
            "Configure credentials with: dnac config init\n\
             Or set DNAC_USERNAME and DNAC_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(dnac::not_found),
        help("Run: dnac devices to see management IPs")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(dnac::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected controller response: {message}")]
    #[diagnostic(
        code(dnac::bad_response),
        help("Re-run with -vv to log the request URLs.")
    )]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(dnac::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(dnac::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: dnac config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No controller configured")]
    #[diagnostic(
        code(dnac::no_config),
        help(
            "Create a profile with: dnac config init\n\
             Expected at: {path}\n\
             Or pass --host / set DNAC_HOST."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(dnac::config))]
    Config(Box<figment::Error>),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out")]
    #[diagnostic(
        code(dnac::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::NotAuthenticated | Self::AuthFailed { .. } | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// The message followed by every underlying cause, `: `-separated.
    pub fn message_with_causes(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let _ = write!(message, ": {cause}");
            source = cause.source();
        }
        message
    }
}

// ── dnac_api::Error → CliError mapping ───────────────────────────────

impl From<dnac_api::Error> for CliError {
    fn from(err: dnac_api::Error) -> Self {
        use dnac_api::Error as ApiError;

        if err.is_timeout() {
            return Self::Timeout;
        }

        match err {
            ApiError::NotAuthenticated => Self::NotAuthenticated,
            ApiError::Authentication { message } => Self::AuthFailed { message },
            ApiError::Transport(e) => Self::ConnectionFailed {
                source: Box::new(e),
            },
            ApiError::InvalidUrl(e) => Self::Validation {
                field: "host".into(),
                reason: e.to_string(),
            },
            ApiError::Tls(message) => Self::TlsError { message },
            ApiError::Api { status, message } => Self::ApiError { status, message },
            ApiError::Deserialization { message, .. } => Self::BadResponse { message },
            ApiError::MissingField { field } => Self::BadResponse {
                message: format!("missing '{field}' field"),
            },
            ApiError::DeviceNotFound { ip } => Self::NotFound {
                resource_type: "Device".into(),
                identifier: ip,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Keyring(e) => Self::Validation {
                field: "keyring".into(),
                reason: e.to_string(),
            },
            ConfigError::Serialization(e) => Self::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            ConfigError::Figment(e) => Self::Config(e),
            ConfigError::Io(e) => Self::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_exit_codes() {
        let cases = [
            (dnac_api::Error::NotAuthenticated, exit_code::AUTH),
            (
                dnac_api::Error::Authentication {
                    message: "HTTP 401".into(),
                },
                exit_code::AUTH,
            ),
            (
                dnac_api::Error::DeviceNotFound {
                    ip: "10.0.0.9".into(),
                },
                exit_code::NOT_FOUND,
            ),
            (
                dnac_api::Error::Api {
                    status: 500,
                    message: String::new(),
                },
                exit_code::GENERAL,
            ),
            (
                dnac_api::Error::Tls("bad pem".into()),
                exit_code::CONNECTION,
            ),
        ];

        for (err, code) in cases {
            let desc = err.to_string();
            assert_eq!(CliError::from(err).exit_code(), code, "{desc}");
        }
    }

    #[test]
    fn causes_follow_the_message() {
        let err = CliError::ConnectionFailed {
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        };
        assert_eq!(
            err.message_with_causes(),
            "Could not connect to controller: connection refused"
        );
        assert_eq!(CliError::NotAuthenticated.message_with_causes(), "No auth token yet");
    }

    #[test]
    fn device_not_found_names_the_ip() {
        let err = CliError::from(dnac_api::Error::DeviceNotFound {
            ip: "10.0.0.9".into(),
        });
        assert_eq!(err.to_string(), "Device '10.0.0.9' not found");
    }
}
