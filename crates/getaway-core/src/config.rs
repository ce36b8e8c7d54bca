// ── Runtime storefront configuration ──
//
// Describes *which* storefront to talk to and how. Carries the access
// token and connection tuning but never touches disk: the CLI builds a
// `StorefrontConfig` from its profile and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

pub const DEFAULT_API_VERSION: &str = "2025-01";
pub const DEFAULT_COLLECTION: &str = "vacation-package";
pub const DEFAULT_BONUS_TAG: &str = "choice";

/// Products shown on the landing page.
pub const CATALOG_SIZE: u32 = 12;
/// Bonus choices offered on the cart page.
pub const BONUS_CHOICE_COUNT: u32 = 6;
/// Recently updated products shown as recommendations.
pub const RECOMMENDED_COUNT: u32 = 4;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (local dev proxies only).
    DangerAcceptInvalid,
}

/// Configuration for a single storefront.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shop URL (e.g., `https://getaway.myshopify.com`).
    pub shop_url: Url,
    /// Storefront API version segment.
    pub api_version: String,
    /// Public storefront access token.
    pub token: SecretString,
    /// Handle of the landing collection.
    pub collection: String,
    /// Tag identifying bonus add-on products.
    pub bonus_tag: String,
    /// Buyer country for `@inContext`.
    pub country: Option<String>,
    /// Buyer language for `@inContext`.
    pub language: Option<String>,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Config with every optional knob at its default.
    pub fn new(shop_url: Url, token: SecretString) -> Self {
        Self {
            shop_url,
            api_version: DEFAULT_API_VERSION.into(),
            token,
            collection: DEFAULT_COLLECTION.into(),
            bonus_tag: DEFAULT_BONUS_TAG.into(),
            country: None,
            language: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Search query selecting bonus products.
    pub fn bonus_query(&self) -> String {
        format!("tag:{}", self.bonus_tag)
    }
}
