//! Booking logic between `getaway-api` and its consumers (CLI, web handlers).
//!
//! This crate owns the domain model and every rule the storefront layers on
//! top of a generic retail cart:
//!
//! - **[`Storefront`]**: central facade holding the GraphQL client and the
//!   session's cart id. Cart boundary calls ([`add_line`](Storefront::add_line),
//!   [`remove_lines`](Storefront::remove_lines)), catalog reads, and the form
//!   submission surface ([`submit`](Storefront::submit)).
//!
//! - **[`codec`]**: the only module that knows the cart line attribute keys.
//!   Encodes an [`Offer`] plus [`TravelerForm`] into flat attributes, and
//!   decodes them back with per-key defaults.
//!
//! - **[`DateRangeSelector`]**: check-in / check-out picker state and its
//!   Monday-first [`MonthGrid`].
//!
//! - **[`Countdown`]** / **[`CountdownTicker`]**: remaining hold time, and a
//!   cancellable once-a-second publisher on a `watch` channel.
//!
//! - **[`catalog`]**: tag-based tabs over the landing collection.
//!
//! - **[`CartSummary`]**: pure composition of a fetched cart into the cart
//!   page's view.

pub mod catalog;
pub mod codec;
pub mod config;
pub mod convert;
pub mod countdown;
pub mod date_range;
pub mod error;
pub mod form;
pub mod model;
pub mod storefront;
pub mod summary;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::{CatalogTabs, Category};
pub use config::{StorefrontConfig, TlsVerification};
pub use countdown::{Clock, Countdown, CountdownState, CountdownTicker, Remaining, SystemClock};
pub use date_range::{DateRange, DateRangeSelector, DayCell, DayMarker, MonthGrid};
pub use error::CoreError;
pub use form::{CartAction, Redirect};
pub use storefront::Storefront;
pub use summary::{BonusLine, CartSummary, EmptyState, SummaryLine};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Attributes, Cart, CartLine, Image, Money, Offer, OfferText, Product, TravelerForm,
};
