// ── Domain model ──
//
// Canonical types shared by every consumer of the core crate. Raw wire
// types from `getaway_api` are converted in `crate::convert`.

pub mod cart;
pub mod offer;
pub mod product;

pub use cart::{Attributes, Cart, CartLine};
pub use offer::{Offer, OfferText, TravelerForm};
pub use product::{Image, Money, Product};
