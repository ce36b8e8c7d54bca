// ── Core error types ──
//
// User-facing errors from getaway-core. Consumers never see GraphQL
// envelopes or HTTP status codes directly; the `From<getaway_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach storefront at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Storefront rejected the access token: {message}")]
    AuthenticationFailed { message: String },

    #[error("Storefront request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Storefront is throttling requests -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Cart update rejected: {message}")]
    Rejected { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Storefront API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<getaway_api::Error> for CoreError {
    fn from(err: getaway_api::Error) -> Self {
        use getaway_api::Error as Api;

        match err {
            Api::InvalidToken { status } => CoreError::AuthenticationFailed {
                message: format!("HTTP {status}"),
            },
            Api::MalformedToken { message } => CoreError::AuthenticationFailed { message },
            Api::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid storefront URL: {e}"),
            },
            Api::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            Api::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            Api::RateLimited { retry_after_secs } => CoreError::RateLimited { retry_after_secs },
            Api::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            Api::GraphQl { messages } => CoreError::Api {
                message: messages.join("; "),
                status: None,
            },
            err @ Api::UserErrors { .. } => CoreError::Rejected {
                message: err.to_string(),
            },
            Api::EmptyPayload { operation } => {
                CoreError::Internal(format!("{operation} returned no cart"))
            }
            Api::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
