// ── Offer domain type ──
//
// An offer never exists on its own on the platform: it is rebuilt from the
// attributes of a cart line, or built from a catalog product right before
// it is added.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::product::Product;
use crate::catalog::location_from_tags;
use crate::date_range::DateRange;

/// Nights assumed for every catalog package.
pub const DEFAULT_NIGHTS: u32 = 3;
/// Days assumed for every catalog package.
pub const DEFAULT_DAYS: u32 = 4;

/// Display and booking metadata of a vacation package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub title: String,
    pub location: String,
    /// Absolute URL or site-relative path.
    pub image: String,
    /// Decimal string, kept verbatim.
    pub price: String,
    pub nights: u32,
    pub days: u32,
    /// Newline-delimited bullet lines.
    pub description: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// The fallback offer shown whenever a cart line lacks a field.
impl Default for Offer {
    fn default() -> Self {
        Self {
            title: "Magical Orlando Getaway".into(),
            location: "Orlando, FL".into(),
            image: "/assets/orlando.jpg".into(),
            price: "49".into(),
            nights: DEFAULT_NIGHTS,
            days: DEFAULT_DAYS,
            description: String::new(),
            expires_at: None,
        }
    }
}

impl Offer {
    /// The offer a catalog card submits for `product`.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            location: location_from_tags(&product.tags).to_owned(),
            image: product
                .image
                .as_ref()
                .map(|i| i.url.clone())
                .unwrap_or_default(),
            price: product.min_price.amount.clone(),
            nights: DEFAULT_NIGHTS,
            days: DEFAULT_DAYS,
            description: product.description.clone(),
            expires_at: None,
        }
    }

    /// Description split into non-blank bullet lines.
    ///
    /// Merchants type the two characters `/n` as a line break, so those
    /// count as newlines too.
    pub fn bullets(&self) -> Vec<String> {
        self.description
            .replace("/n", "\n")
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// `"4 Days / 3 Nights"`.
    pub fn duration_label(&self) -> String {
        format!("{} Days / {} Nights", self.days, self.nights)
    }
}

/// Offer fields exactly as a booking form posted them.
///
/// Missing fields stay empty here; defaults only apply when a stored line
/// is decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferText {
    pub title: String,
    pub location: String,
    pub image: String,
    pub price: String,
    pub nights: String,
    pub days: String,
    pub description: String,
}

impl From<&Offer> for OfferText {
    fn from(offer: &Offer) -> Self {
        Self {
            title: offer.title.clone(),
            location: offer.location.clone(),
            image: offer.image.clone(),
            price: offer.price.clone(),
            nights: offer.nights.to_string(),
            days: offer.days.to_string(),
            description: offer.description.clone(),
        }
    }
}

/// Traveler details typed into the booking form. Nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub adults: String,
    pub kids: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl TravelerForm {
    /// Copy the selector's dates into the form.
    pub fn with_dates(mut self, range: DateRange) -> Self {
        self.check_in = range.check_in;
        self.check_out = range.check_out;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}
