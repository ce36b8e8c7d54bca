// ── Offer attribute codec ──
//
// Vacation-booking metadata travels through a generic retail cart as flat
// line attributes. This module is the only place that knows the attribute
// key strings; everything else goes through `Offer` and `TravelerForm`.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeDelta, Utc};

use crate::model::{Attributes, Cart, CartLine, Offer, OfferText, TravelerForm};

/// Time between adding a line and its displayed expiry.
///
/// Nothing enforces it: the platform keeps the line either way.
pub const HOLD_WINDOW: TimeDelta = TimeDelta::minutes(30);

const DATE_FORMAT: &str = "%Y-%m-%d";

// ── Attribute keys ───────────────────────────────────────────────────

const FIRST_NAME: &str = "First Name";
const LAST_NAME: &str = "Last Name";
const EMAIL: &str = "Email";
const PHONE: &str = "Phone";
const ADULTS: &str = "Adults";
const KIDS: &str = "Kids";
const CHECK_IN: &str = "Check In";
const CHECK_OUT: &str = "Check Out";
const OFFER_TITLE: &str = "Offer Title";
const OFFER_LOCATION: &str = "Offer Location";
const OFFER_IMAGE: &str = "Offer Image";
const OFFER_PRICE: &str = "Offer Price";
const OFFER_NIGHTS: &str = "offerNights";
const OFFER_DAYS: &str = "offerDays";
const OFFER_DESCRIPTION: &str = "offerDescription";
const OFFER_EXPIRES_AT: &str = "Offer Expires At";

// ── Encode ───────────────────────────────────────────────────────────

/// Encode an offer and traveler details, stamping the expiry from the
/// system clock.
pub fn encode(offer: &Offer, traveler: &TravelerForm) -> Attributes {
    encode_at(offer, traveler, Utc::now())
}

/// Encode with an explicit `now`.
///
/// Every key is always written; unset dates become `""`. Any `expires_at`
/// already on `offer` is ignored in favour of `now + HOLD_WINDOW`.
pub fn encode_at(offer: &Offer, traveler: &TravelerForm, now: DateTime<Utc>) -> Attributes {
    encode_text_at(&OfferText::from(offer), traveler, now)
}

/// Encode submitted offer text verbatim: empty fields are stored empty.
pub fn encode_text(offer: &OfferText, traveler: &TravelerForm) -> Attributes {
    encode_text_at(offer, traveler, Utc::now())
}

/// [`encode_text`] with an explicit `now`.
pub fn encode_text_at(offer: &OfferText, traveler: &TravelerForm, now: DateTime<Utc>) -> Attributes {
    let expires_at = (now + HOLD_WINDOW).to_rfc3339_opts(SecondsFormat::Millis, true);

    [
        (FIRST_NAME, traveler.first_name.clone()),
        (LAST_NAME, traveler.last_name.clone()),
        (EMAIL, traveler.email.clone()),
        (PHONE, traveler.phone.clone()),
        (ADULTS, traveler.adults.clone()),
        (KIDS, traveler.kids.clone()),
        (CHECK_IN, format_date(traveler.check_in)),
        (CHECK_OUT, format_date(traveler.check_out)),
        (OFFER_TITLE, offer.title.clone()),
        (OFFER_LOCATION, offer.location.clone()),
        (OFFER_IMAGE, offer.image.clone()),
        (OFFER_PRICE, offer.price.clone()),
        (OFFER_NIGHTS, offer.nights.clone()),
        (OFFER_DAYS, offer.days.clone()),
        (OFFER_DESCRIPTION, offer.description.clone()),
        (OFFER_EXPIRES_AT, expires_at),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v))
    .collect()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

// ── Decode ───────────────────────────────────────────────────────────

/// Rebuild the offer carried by a cart line.
pub fn decode(line: &CartLine) -> Offer {
    decode_attributes(&line.attributes)
}

/// Rebuild an offer from raw attributes.
///
/// Each key is resolved on its own: a missing, empty or unparseable value
/// takes that field's default from [`Offer::default`].
pub fn decode_attributes(attrs: &Attributes) -> Offer {
    let defaults = Offer::default();

    Offer {
        title: text(attrs, OFFER_TITLE).map_or(defaults.title, str::to_owned),
        location: text(attrs, OFFER_LOCATION).map_or(defaults.location, str::to_owned),
        image: text(attrs, OFFER_IMAGE).map_or(defaults.image, str::to_owned),
        price: text(attrs, OFFER_PRICE).map_or(defaults.price, str::to_owned),
        nights: count(attrs, OFFER_NIGHTS).unwrap_or(defaults.nights),
        days: count(attrs, OFFER_DAYS).unwrap_or(defaults.days),
        description: text(attrs, OFFER_DESCRIPTION).map_or(defaults.description, str::to_owned),
        expires_at: text(attrs, OFFER_EXPIRES_AT).and_then(parse_timestamp),
    }
}

/// Traveler fields of a line. Missing keys read as empty / unset.
pub fn decode_traveler(attrs: &Attributes) -> TravelerForm {
    let raw = |key: &str| text(attrs, key).unwrap_or_default().to_owned();

    TravelerForm {
        first_name: raw(FIRST_NAME),
        last_name: raw(LAST_NAME),
        email: raw(EMAIL),
        phone: raw(PHONE),
        adults: raw(ADULTS),
        kids: raw(KIDS),
        check_in: text(attrs, CHECK_IN).and_then(parse_date),
        check_out: text(attrs, CHECK_OUT).and_then(parse_date),
    }
}

/// The stored offer title, without defaulting.
pub fn offer_title(attrs: &Attributes) -> Option<&str> {
    attrs.get(OFFER_TITLE).map(String::as_str)
}

/// The line whose offer drives the summary: the last one in platform order.
pub fn active_line(cart: &Cart) -> Option<&CartLine> {
    cart.lines.last()
}

/// Parse `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn text<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a str> {
    attrs.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn count(attrs: &Attributes, key: &str) -> Option<u32> {
    text(attrs, key).and_then(|v| v.trim().parse().ok())
}
