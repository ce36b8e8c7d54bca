use thiserror::Error;

/// Top-level error type for the `getaway-api` crate.
///
/// Covers every failure mode of the storefront endpoint: transport,
/// HTTP status, the GraphQL `errors[]` array, and mutation `userErrors`.
/// `getaway-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Storefront access token rejected (HTTP 401/403).
    #[error("Invalid storefront access token (HTTP {status})")]
    InvalidToken { status: u16 },

    /// Token could not be turned into a header value.
    #[error("Invalid storefront access token: {message}")]
    MalformedToken { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Throttled by the storefront. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Non-success HTTP status that isn't covered above.
    #[error("Storefront API error (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    // ── GraphQL ─────────────────────────────────────────────────────
    /// Top-level `errors[]` returned alongside (or instead of) `data`.
    #[error("GraphQL error: {}", messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// Mutation answered with a non-empty `userErrors` list.
    #[error("{operation} rejected: {}", .errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join("; "))]
    UserErrors {
        operation: &'static str,
        errors: Vec<crate::storefront::types::UserError>,
    },

    /// Mutation payload carried neither a cart nor user errors.
    #[error("{operation} returned no cart")]
    EmptyPayload { operation: &'static str },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::RateLimited { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    ///
    /// The storefront reports an unknown cart as a `userErrors` entry
    /// pointing at the `cartId` argument rather than as an HTTP 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            Self::UserErrors { errors, .. } => errors.iter().any(|e| {
                e.field
                    .as_deref()
                    .and_then(<[String]>::last)
                    .is_some_and(|f| f == "cartId")
            }),
            _ => false,
        }
    }

    /// Returns `true` if the token was rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::InvalidToken { .. } | Self::MalformedToken { .. })
    }
}
