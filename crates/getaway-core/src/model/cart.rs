// ── Cart domain types ──
//
// The cart belongs to the platform; these are read-only snapshots of it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::product::Money;

/// Flat, insertion-ordered attribute map carried by a cart line.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    /// Purchasable variant behind the line.
    pub merchandise_id: String,
    /// Title of the product owning the variant, when the platform sent it.
    pub product_title: Option<String>,
    pub quantity: u32,
    pub attributes: Attributes,
    pub line_total: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// `None` until the first line has been added.
    pub id: Option<String>,
    pub checkout_url: Option<String>,
    pub total_quantity: u32,
    pub subtotal: Option<Money>,
    pub total: Option<Money>,
    /// Platform insertion order.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Stand-in for "no cart yet".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every line id, in cart order.
    pub fn line_ids(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.id.clone()).collect()
    }
}
