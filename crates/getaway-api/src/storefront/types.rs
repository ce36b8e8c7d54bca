// Wire types for the subset of the Storefront GraphQL schema we query.
//
// Field names follow the schema via `rename_all = "camelCase"`. Everything
// the storefront may legitimately omit is `Option` or `#[serde(default)]`.

use serde::{Deserialize, Serialize};

// ── Envelope ─────────────────────────────────────────────────────────

/// `{ data, errors }` response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One entry of the top-level `errors[]` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Request body posted to `graphql.json`.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

/// Generic `{ nodes: [...] }` connection.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

// ── Shared scalars ───────────────────────────────────────────────────

/// `MoneyV2`. The amount stays a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

// ── Catalog ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured_image: Option<Image>,
    pub price_range: PriceRange,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variants: Connection<VariantRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: Money,
    pub max_variant_price: Money,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionData {
    pub collection: Option<CollectionNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionNode {
    #[serde(default)]
    pub products: Connection<Product>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsData {
    #[serde(default)]
    pub products: Connection<Product>,
}

// ── Cart ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub total_quantity: u32,
    #[serde(default)]
    pub cost: Option<CartCost>,
    #[serde(default)]
    pub lines: Connection<CartLine>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    #[serde(default)]
    pub subtotal_amount: Option<Money>,
    #[serde(default)]
    pub total_amount: Option<Money>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartLine {
    pub id: String,
    pub quantity: u32,
    pub merchandise: Merchandise,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub cost: Option<CartLineCost>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCost {
    pub total_amount: Money,
}

/// `ProductVariant` as seen from a cart line.
#[derive(Debug, Clone, Deserialize)]
pub struct Merchandise {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub product: Option<MerchandiseProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MerchandiseProduct {
    pub title: String,
    pub handle: String,
}

/// Cart line attribute. The storefront returns `value: null` for keys
/// written with an empty string on some API versions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attribute {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub merchandise_id: String,
    pub quantity: u32,
    pub attributes: Vec<AttributeInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeInput {
    pub key: String,
    pub value: String,
}

/// Entry of a mutation's `userErrors` list.
#[derive(Debug, Clone, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CartData {
    pub cart: Option<Cart>,
}

/// Shared `{ cart, userErrors }` payload of every cart mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartPayload {
    pub cart: Option<Cart>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartCreateData {
    pub cart_create: CartPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLinesAddData {
    pub cart_lines_add: CartPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLinesRemoveData {
    pub cart_lines_remove: CartPayload,
}
