// Storefront GraphQL API surface.

mod cart;
mod catalog;
pub mod client;
pub mod queries;
pub mod types;

pub use client::{InContext, StorefrontClient, TOKEN_HEADER};
