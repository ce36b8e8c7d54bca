// getaway-api: Async Rust client for the hosted storefront GraphQL API

pub mod error;
pub mod storefront;
pub mod transport;

pub use error::Error;
pub use storefront::types;
pub use storefront::{InContext, StorefrontClient, TOKEN_HEADER};
pub use transport::{TlsMode, TransportConfig};
