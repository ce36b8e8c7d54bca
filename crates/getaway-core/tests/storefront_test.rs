#![allow(clippy::unwrap_used)]
// Integration tests for the `Storefront` facade against a mocked storefront.

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use getaway_core::{
    CartAction, CartSummary, CoreError, CountdownState, Offer, Storefront, StorefrontConfig,
    TravelerForm, catalog, codec,
};

const GRAPHQL_PATH: &str = "/api/2025-01/graphql.json";
const ORLANDO_VARIANT: &str = "gid://shopify/ProductVariant/101";
const CART_ID: &str = "gid://shopify/Cart/c1";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Storefront) {
    let server = MockServer::start().await;
    let config = StorefrontConfig::new(
        Url::parse(&server.uri()).unwrap(),
        "test-token".to_string().into(),
    );
    let storefront = Storefront::new(config).unwrap();
    (server, storefront)
}

fn product_json(id: u32, title: &str, price: &str, tags: &[&str]) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{id}"),
        "handle": title.to_lowercase().replace(' ', "-"),
        "title": title,
        "description": "Three nights at a resort/nTheme park tickets",
        "featuredImage": { "url": format!("https://cdn.example.com/{id}.jpg") },
        "priceRange": {
            "minVariantPrice": { "amount": price, "currencyCode": "USD" },
            "maxVariantPrice": { "amount": price, "currencyCode": "USD" }
        },
        "tags": tags,
        "variants": { "nodes": [{ "id": format!("gid://shopify/ProductVariant/{id}") }] }
    })
}

fn orlando_line(expires_at: &str) -> Value {
    json!({
        "id": "gid://shopify/CartLine/l1",
        "quantity": 1,
        "attributes": [
            { "key": "First Name", "value": "" },
            { "key": "Check In", "value": "" },
            { "key": "Offer Title", "value": "Magical Orlando Getaway" },
            { "key": "Offer Location", "value": "Orlando, FL" },
            { "key": "Offer Price", "value": "49.0" },
            { "key": "offerNights", "value": "3" },
            { "key": "offerDays", "value": "4" },
            { "key": "Offer Expires At", "value": expires_at }
        ],
        "cost": { "totalAmount": { "amount": "49.0", "currencyCode": "USD" } },
        "merchandise": {
            "id": ORLANDO_VARIANT,
            "product": { "title": "Magical Orlando Getaway", "handle": "magical-orlando-getaway" }
        }
    })
}

fn cart_json(lines: &[Value]) -> Value {
    json!({
        "id": CART_ID,
        "checkoutUrl": "https://shop.example.com/cart/c/c1",
        "totalQuantity": lines.len(),
        "cost": {
            "subtotalAmount": { "amount": "49.0", "currencyCode": "USD" },
            "totalAmount": { "amount": "49.0", "currencyCode": "USD" }
        },
        "lines": { "nodes": lines }
    })
}

fn data(value: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": value }))
}

async fn mount(server: &MockServer, marker: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(marker))
        .respond_with(response)
        .mount(server)
        .await;
}

// ── Cart scenario ───────────────────────────────────────────────────

#[tokio::test]
async fn test_orlando_add_then_clear() {
    let (server, storefront) = setup().await;
    let expires_at = (Utc::now() + Duration::minutes(30))
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    mount(
        &server,
        "CollectionProducts",
        data(json!({ "collection": { "products": { "nodes": [
            product_json(101, "Magical Orlando Getaway", "49.0", &["Popular", "Orlando, FL"]),
            product_json(102, "Bahamas Cruise", "99.0", &["Cruise"])
        ] } } })),
    )
    .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("cartCreate"))
        .and(body_partial_json(json!({
            "variables": { "lines": [{ "merchandiseId": ORLANDO_VARIANT, "quantity": 1 }] }
        })))
        .respond_with(data(json!({ "cartCreate": {
            "cart": cart_json(&[orlando_line(&expires_at)]),
            "userErrors": []
        } })))
        .expect(1)
        .mount(&server)
        .await;

    mount(
        &server,
        "query Cart(",
        data(json!({ "cart": cart_json(&[orlando_line(&expires_at)]) })),
    )
    .await;
    mount(
        &server,
        "ProductsByQuery",
        data(json!({ "products": { "nodes": [] } })),
    )
    .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("cartLinesRemove"))
        .and(body_partial_json(json!({
            "variables": { "cartId": CART_ID, "lineIds": ["gid://shopify/CartLine/l1"] }
        })))
        .respond_with(data(json!({ "cartLinesRemove": {
            "cart": cart_json(&[]),
            "userErrors": []
        } })))
        .expect(1)
        .mount(&server)
        .await;

    // Pick the Popular offer and add it.
    let products = storefront.catalog().await.unwrap();
    let popular = catalog::filter(&products, getaway_core::Category::Popular);
    assert_eq!(popular.len(), 1);
    let product = popular[0];
    let offer = Offer::from_product(product);
    assert_eq!(offer.location, "Orlando, FL");

    let cart = storefront
        .add_offer(
            product.variant_id.as_deref().unwrap(),
            &offer,
            &TravelerForm::default(),
        )
        .await
        .unwrap();
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(storefront.cart_id().await.as_deref(), Some(CART_ID));

    // The summary shows the offer and a running countdown.
    let summary = storefront.cart_view().await.unwrap();
    let active = summary.active_offer.clone().unwrap();
    assert_eq!(active.title, "Magical Orlando Getaway");
    assert_eq!(active.price, "49.0");
    assert_eq!(active.image, "/assets/orlando.jpg");
    assert!(matches!(
        summary.countdown.state_at(Utc::now()),
        CountdownState::Running(r) if r.minutes >= 29
    ));
    assert_eq!(summary.line_ids, vec!["gid://shopify/CartLine/l1"]);

    // Clearing removes every line in one call.
    let cleared = storefront.clear_cart().await.unwrap();
    assert!(cleared.is_empty());
    let summary = CartSummary::compose(&cleared, &[]);
    assert_eq!(summary.empty_state().unwrap().action, "Find Destination");
}

#[tokio::test]
async fn test_second_add_extends_existing_cart() {
    let (server, storefront) = setup().await;
    storefront.set_cart_id(Some(CART_ID.into())).await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("cartLinesAdd"))
        .and(body_partial_json(json!({ "variables": { "cartId": CART_ID } })))
        .respond_with(data(json!({ "cartLinesAdd": {
            "cart": cart_json(&[orlando_line(""), orlando_line("")]),
            "userErrors": []
        } })))
        .expect(1)
        .mount(&server)
        .await;

    let cart = storefront
        .add_line(ORLANDO_VARIANT, codec::encode(&Offer::default(), &TravelerForm::default()))
        .await
        .unwrap();
    assert_eq!(cart.lines.len(), 2);
}

#[tokio::test]
async fn test_stale_cart_is_recreated_on_add() {
    let (server, storefront) = setup().await;
    storefront
        .set_cart_id(Some("gid://shopify/Cart/gone".into()))
        .await;

    mount(
        &server,
        "cartLinesAdd",
        data(json!({ "cartLinesAdd": {
            "cart": null,
            "userErrors": [{
                "field": ["cartId"],
                "message": "The specified cart does not exist.",
                "code": "INVALID"
            }]
        } })),
    )
    .await;
    mount(
        &server,
        "cartCreate",
        data(json!({ "cartCreate": {
            "cart": cart_json(&[orlando_line("")]),
            "userErrors": []
        } })),
    )
    .await;

    storefront
        .add_line(ORLANDO_VARIANT, codec::encode(&Offer::default(), &TravelerForm::default()))
        .await
        .unwrap();
    assert_eq!(storefront.cart_id().await.as_deref(), Some(CART_ID));
}

#[tokio::test]
async fn test_unknown_cart_reads_empty_and_is_forgotten() {
    let (server, storefront) = setup().await;
    storefront
        .set_cart_id(Some("gid://shopify/Cart/gone".into()))
        .await;

    mount(&server, "query Cart(", data(json!({ "cart": null }))).await;

    let cart = storefront.cart().await.unwrap();
    assert!(cart.is_empty());
    assert_eq!(storefront.cart_id().await, None);
}

#[tokio::test]
async fn test_remove_without_ids_makes_no_mutation() {
    let (server, storefront) = setup().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let cart = storefront.remove_lines(&[]).await.unwrap();
    assert!(cart.is_empty());
    let cart = storefront.remove_lines(&["l1".into()]).await.unwrap();
    assert!(cart.is_empty());
}

// ── Catalog failure semantics ───────────────────────────────────────

#[tokio::test]
async fn test_catalog_failure_propagates() {
    let (server, storefront) = setup().await;
    mount(&server, "CollectionProducts", ResponseTemplate::new(500)).await;

    let err = storefront.catalog().await.unwrap_err();
    assert!(
        matches!(err, CoreError::Api { status: Some(500), .. }),
        "expected Api error, got: {err:?}"
    );
}

#[tokio::test]
async fn test_missing_collection_reads_empty() {
    let (server, storefront) = setup().await;
    mount(&server, "CollectionProducts", data(json!({ "collection": null }))).await;

    assert!(storefront.catalog().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deferred_reads_swallow_failures() {
    let (server, storefront) = setup().await;
    mount(&server, "ProductsByQuery", ResponseTemplate::new(502)).await;
    mount(&server, "RecommendedProducts", ResponseTemplate::new(401)).await;

    assert!(storefront.bonus_choices().await.is_empty());
    assert!(storefront.recommended_products().await.is_empty());

    // The cart view still renders without bonus choices.
    let summary = storefront.cart_view().await.unwrap();
    assert!(summary.is_empty);
    assert!(summary.bonus_lines.is_empty());
}

#[tokio::test]
async fn test_bonus_lines_in_cart_view() {
    let (server, storefront) = setup().await;
    storefront.set_cart_id(Some(CART_ID.into())).await;

    let mut bonus_line = orlando_line("");
    bonus_line["id"] = json!("gid://shopify/CartLine/l2");
    bonus_line["attributes"] = json!([{ "key": "Offer Title", "value": "Theme Park Tickets" }]);

    mount(
        &server,
        "query Cart(",
        data(json!({ "cart": cart_json(&[orlando_line(""), bonus_line]) })),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "query": "tag:choice", "first": 6 } })))
        .respond_with(data(json!({ "products": { "nodes": [
            product_json(900, "Theme Park Tickets", "0.0", &["choice"])
        ] } })))
        .mount(&server)
        .await;

    let summary = storefront.cart_view().await.unwrap();
    assert_eq!(summary.bonus_lines.len(), 1);
    assert_eq!(summary.bonus_lines[0].label, "Choice A");
    assert_eq!(summary.bonus_lines[0].line_id, "gid://shopify/CartLine/l2");
    // The last line is the bonus, so it drives the summary panel.
    assert_eq!(
        summary.active_offer.unwrap().title,
        "Theme Park Tickets"
    );
}

// ── Form surface ────────────────────────────────────────────────────

#[tokio::test]
async fn test_submit_always_redirects_to_cart() {
    let (server, storefront) = setup().await;
    mount(&server, "cartCreate", ResponseTemplate::new(500)).await;

    let action = CartAction::from_urlencoded(&format!(
        "variantId={}&offerTitle=Magical+Orlando+Getaway",
        url::form_urlencoded::byte_serialize(ORLANDO_VARIANT.as_bytes()).collect::<String>()
    ));
    assert!(matches!(action, Some(CartAction::Add { .. })));

    let redirect = storefront.submit(action).await;
    assert_eq!(redirect.location, "/cart");
    assert_eq!(storefront.cart_id().await, None);

    let redirect = storefront.submit(None).await;
    assert_eq!(redirect.location, "/cart");
}

#[tokio::test]
async fn test_submit_stores_missing_offer_fields_empty() {
    let (server, storefront) = setup().await;
    let expires_at = (Utc::now() + Duration::minutes(30))
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("cartCreate"))
        .and(body_string_contains(r#"{"key":"Offer Title","value":""}"#))
        .and(body_string_contains(r#"{"key":"offerNights","value":""}"#))
        .respond_with(data(json!({ "cartCreate": {
            "cart": cart_json(&[orlando_line(&expires_at)]),
            "userErrors": []
        } })))
        .expect(1)
        .mount(&server)
        .await;

    let redirect = storefront
        .submit(CartAction::from_urlencoded("variantId=v1&firstName=Ana"))
        .await;
    assert_eq!(redirect.location, "/cart");
    assert_eq!(storefront.cart_id().await.as_deref(), Some(CART_ID));
}
