// Cart query and mutations.
//
// The storefront answers a mutation with `{ cart, userErrors }`; a
// non-empty `userErrors` list is surfaced as `Error::UserErrors` even when
// a cart object is also present.

use serde_json::json;
use tracing::debug;

use super::client::StorefrontClient;
use super::queries;
use super::types::{
    Cart, CartCreateData, CartData, CartLineInput, CartLinesAddData, CartLinesRemoveData,
    CartPayload,
};
use crate::Error;

impl StorefrontClient {
    /// Fetch a cart by id. `None` means the storefront no longer knows it.
    pub async fn cart(&self, cart_id: &str) -> Result<Option<Cart>, Error> {
        let data: CartData = self
            .execute("cart", queries::CART, json!({ "id": cart_id }))
            .await?;
        Ok(data.cart)
    }

    /// Create a new cart seeded with `lines`.
    pub async fn cart_create(&self, lines: &[CartLineInput]) -> Result<Cart, Error> {
        debug!(lines = lines.len(), "creating cart");
        let data: CartCreateData = self
            .execute("cartCreate", queries::CART_CREATE, json!({ "lines": lines }))
            .await?;
        unwrap_payload("cartCreate", data.cart_create)
    }

    /// Append `lines` to an existing cart.
    pub async fn cart_lines_add(
        &self,
        cart_id: &str,
        lines: &[CartLineInput],
    ) -> Result<Cart, Error> {
        let data: CartLinesAddData = self
            .execute(
                "cartLinesAdd",
                queries::CART_LINES_ADD,
                json!({ "cartId": cart_id, "lines": lines }),
            )
            .await?;
        unwrap_payload("cartLinesAdd", data.cart_lines_add)
    }

    /// Remove lines by id in one round-trip.
    pub async fn cart_lines_remove(
        &self,
        cart_id: &str,
        line_ids: &[String],
    ) -> Result<Cart, Error> {
        let data: CartLinesRemoveData = self
            .execute(
                "cartLinesRemove",
                queries::CART_LINES_REMOVE,
                json!({ "cartId": cart_id, "lineIds": line_ids }),
            )
            .await?;
        unwrap_payload("cartLinesRemove", data.cart_lines_remove)
    }
}

fn unwrap_payload(operation: &'static str, payload: CartPayload) -> Result<Cart, Error> {
    if !payload.user_errors.is_empty() {
        return Err(Error::UserErrors {
            operation,
            errors: payload.user_errors,
        });
    }
    payload.cart.ok_or(Error::EmptyPayload { operation })
}
