//! CLI configuration -- thin wrapper around `getaway_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--shop, --token, etc.).

use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use getaway_config::session::{self, Session};
use getaway_core::{Storefront, StorefrontConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use getaway_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names, or `(none)`.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Build the storefront config for this invocation, with the profile name
/// it was resolved for.
///
/// Flags override profile values. Without a matching profile, `--shop`
/// and `--token` alone are enough.
pub fn build_storefront_config(
    global: &GlobalOpts,
) -> Result<(String, StorefrontConfig), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None => {
            let shop = global.shop.clone().ok_or_else(|| {
                if global.profile.is_some() {
                    CliError::ProfileNotFound {
                        name: profile_name.clone(),
                        available: available_profiles(&cfg),
                    }
                } else {
                    CliError::NoConfig {
                        path: config_path().display().to_string(),
                    }
                }
            })?;
            Profile {
                timeout: Some(cfg.defaults.timeout),
                insecure: Some(cfg.defaults.insecure),
                ..Profile::for_shop(shop)
            }
        }
    };

    // 1. Shop URL (flag > env > profile)
    if let Some(ref shop) = global.shop {
        profile.shop.clone_from(shop);
    }

    // 2. Token (flag > env > profile chain)
    let token = match global.token {
        Some(ref token) => SecretString::from(token.clone()),
        None => getaway_config::resolve_token(&profile, &profile_name)?,
    };

    let mut config = getaway_config::profile_with_token(&profile, token)?;

    // 3. Buyer context
    if global.country.is_some() {
        config.country.clone_from(&global.country);
    }
    if global.language.is_some() {
        config.language.clone_from(&global.language);
    }

    // 4. TLS and timeout
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        config.timeout = Duration::from_secs(secs);
    }

    debug!(profile = %profile_name, shop = %config.shop_url, "storefront config resolved");
    Ok((profile_name, config))
}

// ── Cart session ────────────────────────────────────────────────────

/// Cart id remembered for this profile and shop.
pub fn resume_cart(profile_name: &str, config: &StorefrontConfig) -> Option<String> {
    session::load_session(profile_name)?
        .cart_for(config.shop_url.as_str())
        .map(str::to_owned)
}

/// Persist the storefront's current cart id, or drop this shop's session
/// when the cart was forgotten.
pub async fn remember_cart(profile_name: &str, storefront: &Storefront) -> Result<(), CliError> {
    let shop = storefront.config().shop_url.as_str();
    match storefront.cart_id().await {
        Some(id) => session::save_session(profile_name, &Session::new(shop, Some(id)))?,
        None => session::forget_cart(profile_name, shop)?,
    }
    Ok(())
}
