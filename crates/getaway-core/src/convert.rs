// ── API-to-domain type conversions ──
//
// Bridges raw `getaway_api` wire types into the canonical `model` types.
// Attribute values the platform sends as `null` become empty strings, which
// the codec then treats like missing keys.

use getaway_api::types as wire;

use crate::model::{Attributes, Cart, CartLine, Image, Money, Product};

impl From<wire::Money> for Money {
    fn from(m: wire::Money) -> Self {
        Self {
            amount: m.amount,
            currency_code: m.currency_code,
        }
    }
}

impl From<wire::Image> for Image {
    fn from(i: wire::Image) -> Self {
        Self {
            url: i.url,
            alt_text: i.alt_text,
            width: i.width,
            height: i.height,
        }
    }
}

impl From<wire::Product> for Product {
    fn from(p: wire::Product) -> Self {
        Self {
            id: p.id,
            handle: p.handle,
            title: p.title,
            description: p.description,
            image: p.featured_image.map(Image::from),
            min_price: p.price_range.min_variant_price.into(),
            max_price: p.price_range.max_variant_price.into(),
            tags: p.tags,
            variant_id: p.variants.nodes.into_iter().next().map(|v| v.id),
        }
    }
}

impl From<wire::CartLine> for CartLine {
    fn from(l: wire::CartLine) -> Self {
        // Later duplicates overwrite earlier values but keep the first position.
        let attributes: Attributes = l
            .attributes
            .into_iter()
            .map(|a| (a.key, a.value.unwrap_or_default()))
            .collect();

        Self {
            id: l.id,
            merchandise_id: l.merchandise.id,
            product_title: l.merchandise.product.map(|p| p.title),
            quantity: l.quantity,
            attributes,
            line_total: l.cost.map(|c| c.total_amount.into()),
        }
    }
}

impl From<wire::Cart> for Cart {
    fn from(c: wire::Cart) -> Self {
        let (subtotal, total) = c
            .cost
            .map(|cost| {
                (
                    cost.subtotal_amount.map(Money::from),
                    cost.total_amount.map(Money::from),
                )
            })
            .unwrap_or_default();

        Self {
            id: Some(c.id),
            checkout_url: c.checkout_url,
            total_quantity: c.total_quantity,
            subtotal,
            total,
            lines: c.lines.nodes.into_iter().map(CartLine::from).collect(),
        }
    }
}

/// Attributes as mutation input, in map order.
pub(crate) fn attribute_inputs(attributes: Attributes) -> Vec<wire::AttributeInput> {
    attributes
        .into_iter()
        .map(|(key, value)| wire::AttributeInput { key, value })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn cart_line_attributes_keep_order_and_blank_nulls() {
        let line: wire::CartLine = serde_json::from_value(json!({
            "id": "l1",
            "quantity": 1,
            "merchandise": { "id": "v1", "product": { "title": "Orlando", "handle": "orlando" } },
            "attributes": [
                { "key": "Offer Title", "value": "Orlando" },
                { "key": "Check In", "value": null },
                { "key": "Adults", "value": "2" }
            ]
        }))
        .unwrap();

        let line = CartLine::from(line);
        let keys: Vec<&str> = line.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Offer Title", "Check In", "Adults"]);
        assert_eq!(line.attributes["Check In"], "");
        assert_eq!(line.product_title.as_deref(), Some("Orlando"));
        assert_eq!(line.line_total, None);
    }

    #[test]
    fn product_takes_first_variant() {
        let product: wire::Product = serde_json::from_value(json!({
            "id": "p1",
            "handle": "cruise",
            "title": "Cruise",
            "priceRange": {
                "minVariantPrice": { "amount": "99.0", "currencyCode": "USD" },
                "maxVariantPrice": { "amount": "149.0", "currencyCode": "USD" }
            },
            "tags": ["Cruise"],
            "variants": { "nodes": [{ "id": "v1" }, { "id": "v2" }] }
        }))
        .unwrap();

        let product = Product::from(product);
        assert_eq!(product.variant_id.as_deref(), Some("v1"));
        assert_eq!(product.min_price.to_string(), "99.0 USD");
        assert!(product.image.is_none());
        assert_eq!(product.description, "");
    }

    #[test]
    fn attribute_inputs_follow_map_order() {
        let mut attrs = Attributes::new();
        attrs.insert("b".into(), "2".into());
        attrs.insert("a".into(), "1".into());
        let keys: Vec<String> = attribute_inputs(attrs).into_iter().map(|a| a.key).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
