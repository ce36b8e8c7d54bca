// ── Storefront facade ──
//
// Single entry point for consumers: owns the GraphQL client and the current
// cart id, and exposes the cart boundary calls, catalog reads and the form
// submission surface in domain types.

use std::slice;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use getaway_api::transport::{TlsMode, TransportConfig};
use getaway_api::types::CartLineInput;
use getaway_api::{InContext, StorefrontClient};

use crate::codec;
use crate::config::{
    BONUS_CHOICE_COUNT, CATALOG_SIZE, RECOMMENDED_COUNT, StorefrontConfig, TlsVerification,
};
use crate::convert::attribute_inputs;
use crate::error::CoreError;
use crate::form::{CartAction, Redirect};
use crate::model::{Attributes, Cart, Offer, Product, TravelerForm};
use crate::summary::CartSummary;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<StorefrontInner>`. Remembers the cart id of
/// the session: the first added line creates the cart, later ones extend
/// it.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    client: StorefrontClient,
    cart_id: Mutex<Option<String>>,
}

impl Storefront {
    /// Build the HTTP client for `config`. No request is made yet.
    pub fn new(config: StorefrontConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = StorefrontClient::from_token(
            config.shop_url.as_str(),
            &config.api_version,
            &config.token,
            &transport,
        )?
        .with_context(InContext {
            country: config.country.clone(),
            language: config.language.clone(),
        });
        debug!(endpoint = %client.endpoint(), "storefront client ready");

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                client,
                cart_id: Mutex::new(None),
            }),
        })
    }

    /// Build a storefront that resumes an earlier session's cart.
    pub async fn resume(
        config: StorefrontConfig,
        cart_id: Option<String>,
    ) -> Result<Self, CoreError> {
        let storefront = Self::new(config)?;
        storefront.set_cart_id(cart_id).await;
        Ok(storefront)
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    // ── Cart session ─────────────────────────────────────────────────

    /// Id of the current cart, if one has been created or resumed.
    pub async fn cart_id(&self) -> Option<String> {
        self.inner.cart_id.lock().await.clone()
    }

    /// Resume (or forget) a cart.
    pub async fn set_cart_id(&self, cart_id: Option<String>) {
        *self.inner.cart_id.lock().await = cart_id;
    }

    /// Fetch the current cart. No cart yet, or one the platform no longer
    /// knows, reads as [`Cart::empty`]; the unknown id is forgotten.
    pub async fn cart(&self) -> Result<Cart, CoreError> {
        let Some(id) = self.cart_id().await else {
            return Ok(Cart::empty());
        };

        if let Some(cart) = self.inner.client.cart(&id).await? {
            Ok(cart.into())
        } else {
            info!(cart_id = %id, "cart no longer exists, starting fresh");
            self.forget_cart(&id).await;
            Ok(Cart::empty())
        }
    }

    // ── Cart mutations ───────────────────────────────────────────────

    /// Add one line (quantity 1) carrying `attributes`.
    ///
    /// Creates the cart on first use. A stale cart id is replaced by a
    /// freshly created cart.
    pub async fn add_line(
        &self,
        merchandise_id: &str,
        attributes: Attributes,
    ) -> Result<Cart, CoreError> {
        let line = CartLineInput {
            merchandise_id: merchandise_id.to_owned(),
            quantity: 1,
            attributes: attribute_inputs(attributes),
        };
        let client = &self.inner.client;

        // Held across the mutation so two adds never create two carts.
        let mut cart_id = self.inner.cart_id.lock().await;
        let cart = match cart_id.as_deref() {
            None => client.cart_create(slice::from_ref(&line)).await?,
            Some(id) => match client.cart_lines_add(id, slice::from_ref(&line)).await {
                Ok(cart) => cart,
                Err(e) if e.is_not_found() => {
                    warn!(cart_id = %id, "cart no longer exists, creating a new one");
                    client.cart_create(slice::from_ref(&line)).await?
                }
                Err(e) => return Err(e.into()),
            },
        };
        *cart_id = Some(cart.id.clone());

        info!(cart_id = %cart.id, merchandise_id, "line added");
        Ok(cart.into())
    }

    /// Remove lines in one call.
    ///
    /// No ids, or no cart, is a no-op that returns the current cart.
    pub async fn remove_lines(&self, line_ids: &[String]) -> Result<Cart, CoreError> {
        if line_ids.is_empty() {
            debug!("no lines to remove");
            return self.cart().await;
        }
        let Some(id) = self.cart_id().await else {
            debug!("no cart, nothing to remove");
            return Ok(Cart::empty());
        };

        match self.inner.client.cart_lines_remove(&id, line_ids).await {
            Ok(cart) => {
                info!(cart_id = %id, removed = line_ids.len(), "lines removed");
                Ok(cart.into())
            }
            Err(e) if e.is_not_found() => {
                info!(cart_id = %id, "cart no longer exists, starting fresh");
                self.forget_cart(&id).await;
                Ok(Cart::empty())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove every line of the current cart.
    pub async fn clear_cart(&self) -> Result<Cart, CoreError> {
        let cart = self.cart().await?;
        self.remove_lines(&cart.line_ids()).await
    }

    /// Encode `offer` and `traveler` and add them as one line.
    pub async fn add_offer(
        &self,
        merchandise_id: &str,
        offer: &Offer,
        traveler: &TravelerForm,
    ) -> Result<Cart, CoreError> {
        self.add_line(merchandise_id, codec::encode(offer, traveler))
            .await
    }

    async fn forget_cart(&self, id: &str) {
        let mut cart_id = self.inner.cart_id.lock().await;
        if cart_id.as_deref() == Some(id) {
            *cart_id = None;
        }
    }

    // ── Catalog ──────────────────────────────────────────────────────

    /// Landing collection. Failures propagate; a missing collection is
    /// logged and reads as empty.
    pub async fn catalog(&self) -> Result<Vec<Product>, CoreError> {
        let handle = &self.inner.config.collection;
        match self
            .inner
            .client
            .collection_products(handle, CATALOG_SIZE)
            .await?
        {
            Some(products) => Ok(products.into_iter().map(Product::from).collect()),
            None => {
                error!(handle = %handle, "catalog collection not found");
                Ok(Vec::new())
            }
        }
    }

    /// Bonus add-ons. Failures are logged and read as empty.
    pub async fn bonus_choices(&self) -> Vec<Product> {
        let query = self.inner.config.bonus_query();
        deferred(
            "bonus choices",
            self.inner
                .client
                .products_by_query(&query, BONUS_CHOICE_COUNT)
                .await,
        )
    }

    /// Recently updated products. Failures are logged and read as empty.
    pub async fn recommended_products(&self) -> Vec<Product> {
        deferred(
            "recommended products",
            self.inner
                .client
                .recommended_products(RECOMMENDED_COUNT)
                .await,
        )
    }

    /// Cart and bonus choices, fetched concurrently and composed.
    pub async fn cart_view(&self) -> Result<CartSummary, CoreError> {
        let (cart, bonus) = tokio::join!(self.cart(), self.bonus_choices());
        Ok(CartSummary::compose(&cart?, &bonus))
    }

    // ── Form surface ─────────────────────────────────────────────────

    /// Apply a form submission. Failures are logged, never returned: the
    /// answer is always the redirect to the cart view.
    pub async fn submit(&self, action: Option<CartAction>) -> Redirect {
        match action {
            Some(CartAction::Add {
                variant_id,
                traveler,
                offer,
            }) => {
                let attributes = codec::encode_text(&offer, &traveler);
                if let Err(e) = self.add_line(&variant_id, attributes).await {
                    warn!(error = %e, variant_id = %variant_id, "add to cart failed");
                }
            }
            Some(CartAction::Remove { line_ids }) => {
                if let Err(e) = self.remove_lines(&line_ids).await {
                    warn!(error = %e, "remove from cart failed");
                }
            }
            None => debug!("form submission carried no action"),
        }
        Redirect::to_cart()
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Build a [`TransportConfig`] from the storefront configuration.
fn build_transport(config: &StorefrontConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
    }
}

/// Downgrade a deferred read to an empty list on failure.
fn deferred<S, D>(what: &str, result: Result<Vec<S>, getaway_api::Error>) -> Vec<D>
where
    D: From<S>,
{
    match result {
        Ok(items) => items.into_iter().map(D::from).collect(),
        Err(e) => {
            warn!("{what}: {e}, showing none");
            Vec::new()
        }
    }
}
