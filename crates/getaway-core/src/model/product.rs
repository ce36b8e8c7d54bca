// ── Catalog domain types ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag marking a product as an exclusive deal.
pub const EXCLUSIVE_TAG: &str = "Exclusive";

/// Tag marking a zero-price bonus add-on.
pub const BONUS_TAG: &str = "choice";

/// Decimal amount plus ISO currency code. The amount is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

impl Money {
    /// `true` when the amount parses to zero.
    pub fn is_zero(&self) -> bool {
        self.amount
            .trim()
            .parse::<f64>()
            .is_ok_and(|v| v.abs() < f64::EPSILON)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A storefront product as the catalog shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub image: Option<Image>,
    pub min_price: Money,
    pub max_price: Money,
    pub tags: Vec<String>,
    /// First variant, the one a card submits to the cart.
    pub variant_id: Option<String>,
}

impl Product {
    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_exclusive(&self) -> bool {
        self.has_tag(EXCLUSIVE_TAG)
    }

    pub fn is_bonus_choice(&self) -> bool {
        self.has_tag(BONUS_TAG)
    }
}
