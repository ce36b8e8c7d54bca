//! Shared configuration for getaway tools.
//!
//! TOML profiles, storefront token resolution (env + keyring + plaintext),
//! per-profile cart sessions, and translation to
//! `getaway_core::StorefrontConfig`. The CLI adds flag-aware wrappers on
//! top.

pub mod session;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use getaway_core::StorefrontConfig;
use getaway_core::TlsVerification;
use getaway_core::config::{DEFAULT_API_VERSION, DEFAULT_BONUS_TAG, DEFAULT_COLLECTION};

pub use session::Session;

/// Keyring service all getaway secrets are filed under.
pub const KEYRING_SERVICE: &str = "getaway";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no storefront token configured for profile '{profile}'")]
    NoToken { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named storefront profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named storefront profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Shop base URL (e.g., "https://getaway.myshopify.com").
    pub shop: String,

    /// Storefront API version, `2025-01` when unset.
    pub api_version: Option<String>,

    /// Storefront access token (plaintext, prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the token.
    pub token_env: Option<String>,

    /// Landing collection handle.
    pub collection: Option<String>,

    /// Tag marking bonus add-on products.
    pub bonus_tag: Option<String>,

    /// Buyer country code (ISO 3166-1 alpha-2).
    pub country: Option<String>,

    /// Buyer language code.
    pub language: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

impl Profile {
    pub fn for_shop(shop: impl Into<String>) -> Self {
        Self {
            shop: shop.into(),
            ..Self::default()
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "getaway", "getaway")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Directory for state written at runtime (cart sessions).
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".local/share"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

fn dirs_fallback(base: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(base);
    p.push("getaway");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. Defaults, then the file, then
/// `GETAWAY_`-prefixed env vars (`__` separates nested keys).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("GETAWAY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token resolution (without CLI flags) ────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/storefront-token"))
}

/// Resolve the storefront token from the credential chain (no CLI flag
/// step): the profile's `token_env`, the system keyring, then the
/// plaintext `token`.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoToken {
        profile: profile_name.into(),
    })
}

/// File `token` in the system keyring for `profile_name`.
pub fn store_token(profile_name: &str, token: &SecretString) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(token.expose_secret())?;
    Ok(())
}

/// Parse and validate a profile's shop URL.
pub fn shop_url(profile: &Profile) -> Result<url::Url, ConfigError> {
    let url: url::Url = profile.shop.parse().map_err(|_| ConfigError::Validation {
        field: "shop".into(),
        reason: format!("invalid URL: {}", profile.shop),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "shop".into(),
            reason: format!("expected an http(s) URL, got '{}'", profile.shop),
        });
    }
    Ok(url)
}

/// Build a `StorefrontConfig` from a profile and an already resolved
/// token. Unset knobs take the storefront defaults.
pub fn profile_with_token(
    profile: &Profile,
    token: SecretString,
) -> Result<StorefrontConfig, ConfigError> {
    let url = shop_url(profile)?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut config = StorefrontConfig::new(url, token);
    config.api_version = profile
        .api_version
        .clone()
        .unwrap_or_else(|| DEFAULT_API_VERSION.into());
    config.collection = profile
        .collection
        .clone()
        .unwrap_or_else(|| DEFAULT_COLLECTION.into());
    config.bonus_tag = profile
        .bonus_tag
        .clone()
        .unwrap_or_else(|| DEFAULT_BONUS_TAG.into());
    config.country.clone_from(&profile.country);
    config.language.clone_from(&profile.language);
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout));
    Ok(config)
}

/// Build a `StorefrontConfig` from a profile with no CLI flag overrides.
pub fn profile_to_storefront_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<StorefrontConfig, ConfigError> {
    let token = resolve_token(profile, profile_name)?;
    profile_with_token(profile, token)
}
