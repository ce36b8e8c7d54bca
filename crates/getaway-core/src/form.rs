// ── Cart form submission surface ──
//
// Turns the booking form's POST body into a typed cart action. Field
// names are the form's own; attribute keys stay inside `codec`.

use serde::Serialize;

use crate::codec::parse_date;
use crate::model::{OfferText, TravelerForm};

/// Where every submission lands.
pub const CART_PATH: &str = "/cart";

/// A decoded form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CartAction {
    /// Add one line for `variant_id` carrying the offer and traveler details
    /// as submitted.
    Add {
        variant_id: String,
        traveler: TravelerForm,
        offer: OfferText,
    },
    /// Remove every listed line in one call.
    Remove { line_ids: Vec<String> },
}

/// Answer to a submission: always back to the cart view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    pub fn to_cart() -> Self {
        Self {
            location: CART_PATH.to_owned(),
        }
    }
}

impl CartAction {
    /// Decode `application/x-www-form-urlencoded` bytes.
    pub fn from_urlencoded(body: &str) -> Option<Self> {
        Self::from_form(url::form_urlencoded::parse(body.as_bytes()))
    }

    /// Decode form pairs. Repeated names are kept in order.
    ///
    /// `action=remove` wins; otherwise a non-empty `variantId` makes an
    /// add; anything else is nothing to do.
    pub fn from_form<I, K, V>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
            .collect();
        let form = Form(&pairs);

        if form.get("action") == Some("remove") {
            let line_ids = form
                .all("lineIds")
                .into_iter()
                .filter(|id| !id.is_empty())
                .map(str::to_owned)
                .collect();
            return Some(Self::Remove { line_ids });
        }

        let variant_id = form.non_empty("variantId")?.to_owned();
        Some(Self::Add {
            variant_id,
            traveler: form.traveler(),
            offer: form.offer(),
        })
    }
}

struct Form<'a>(&'a [(String, String)]);

impl<'a> Form<'a> {
    fn get(&self, name: &str) -> Option<&'a str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn all(&self, name: &str) -> Vec<&'a str> {
        self.0
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    fn non_empty(&self, name: &str) -> Option<&'a str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    fn raw(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_owned()
    }

    fn traveler(&self) -> TravelerForm {
        TravelerForm {
            first_name: self.raw("firstName"),
            last_name: self.raw("lastName"),
            email: self.raw("email"),
            phone: self.raw("phone"),
            adults: self.raw("adults"),
            kids: self.raw("kids"),
            check_in: self.get("checkIn").and_then(parse_date),
            check_out: self.get("checkOut").and_then(parse_date),
        }
    }

    fn offer(&self) -> OfferText {
        OfferText {
            title: self.raw("offerTitle"),
            location: self.raw("offerLocation"),
            image: self.raw("offerImage"),
            price: self.raw("offerPrice"),
            nights: self.raw("offerNights"),
            days: self.raw("offerDays"),
            description: self.raw("offerDescription"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::codec;

    #[test]
    fn remove_collects_repeated_line_ids() {
        let action = CartAction::from_urlencoded("action=remove&lineIds=l1&lineIds=l2&lineIds=");
        assert_eq!(
            action,
            Some(CartAction::Remove {
                line_ids: vec!["l1".into(), "l2".into()]
            })
        );
    }

    #[test]
    fn remove_wins_over_variant() {
        let action = CartAction::from_form([("variantId", "v1"), ("action", "remove")]);
        assert_eq!(action, Some(CartAction::Remove { line_ids: vec![] }));
    }

    #[test]
    fn add_reads_traveler_and_offer() {
        let body = "variantId=gid%3A%2F%2Fshopify%2FProductVariant%2F1\
                    &firstName=Ana&lastName=Ruiz&email=ana%40example.com&phone=555-0100\
                    &adults=2&kids=1&checkIn=2026-01-08&checkOut=2026-01-11T00%3A00%3A00.000Z\
                    &offerTitle=Miami+Beach+Escape&offerLocation=Miami%2C+FL\
                    &offerImage=https%3A%2F%2Fcdn.example.com%2Fm.jpg&offerPrice=79.0\
                    &offerNights=4&offerDays=5&offerDescription=Ocean+view";

        let Some(CartAction::Add {
            variant_id,
            traveler,
            offer,
        }) = CartAction::from_urlencoded(body)
        else {
            panic!("expected an add action");
        };

        assert_eq!(variant_id, "gid://shopify/ProductVariant/1");
        assert_eq!(traveler.first_name, "Ana");
        assert_eq!(traveler.email, "ana@example.com");
        assert_eq!(traveler.check_in, NaiveDate::from_ymd_opt(2026, 1, 8));
        assert_eq!(traveler.check_out, NaiveDate::from_ymd_opt(2026, 1, 11));
        assert_eq!(offer.title, "Miami Beach Escape");
        assert_eq!(offer.location, "Miami, FL");
        assert_eq!(offer.price, "79.0");
        assert_eq!((offer.nights.as_str(), offer.days.as_str()), ("4", "5"));
        assert_eq!(offer.description, "Ocean view");
    }

    #[test]
    fn add_with_bare_variant_stores_empty_offer_fields() {
        let Some(CartAction::Add { traveler, offer, .. }) =
            CartAction::from_urlencoded("variantId=v1")
        else {
            panic!("expected an add action");
        };
        assert_eq!(traveler, TravelerForm::default());
        assert_eq!(offer, OfferText::default());

        let attrs = codec::encode_text(&offer, &traveler);
        assert_eq!(attrs["Offer Title"], "");
        assert_eq!(attrs["Offer Location"], "");
        assert_eq!(attrs["Offer Price"], "");
        assert_eq!(attrs["offerNights"], "");
        assert_eq!(codec::offer_title(&attrs), Some(""));

        // Defaults only show up when the line is read back.
        let decoded = codec::decode_attributes(&attrs);
        assert_eq!(decoded.title, "Magical Orlando Getaway");
        assert_eq!(decoded.nights, 3);
    }

    #[test]
    fn unparseable_values_are_kept_verbatim() {
        let Some(CartAction::Add { traveler, offer, .. }) =
            CartAction::from_form([("variantId", "v1"), ("offerNights", "x"), ("checkIn", "soon")])
        else {
            panic!("expected an add action");
        };

        assert_eq!(traveler.check_in, None);
        assert_eq!(offer.nights, "x");
        let attrs = codec::encode_text(&offer, &traveler);
        assert_eq!(attrs["Check In"], "");
        assert_eq!(codec::decode_attributes(&attrs).nights, 3);
    }

    #[test]
    fn nothing_to_do_without_variant() {
        assert_eq!(CartAction::from_urlencoded(""), None);
        assert_eq!(CartAction::from_urlencoded("variantId=&firstName=Ana"), None);
        assert_eq!(CartAction::from_urlencoded("action=update"), None);
    }

    #[test]
    fn redirect_goes_to_cart() {
        assert_eq!(Redirect::to_cart().location, "/cart");
    }
}
