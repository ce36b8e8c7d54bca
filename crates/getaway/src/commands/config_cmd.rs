//! Config subcommand handlers.

use dialoguer::{Input, Select};
use secrecy::SecretString;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the token.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "shop = \"{}\"", p.shop);
        let optional = [
            ("api_version", &p.api_version),
            ("token_env", &p.token_env),
            ("collection", &p.collection),
            ("bonus_tag", &p.bonus_tag),
            ("country", &p.country),
            ("language", &p.language),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                let _ = writeln!(out, "{key} = \"{value}\"");
            }
        }
        if p.token.is_some() {
            let _ = writeln!(out, "token = \"****\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

/// Apply `key = value` to a profile.
fn set_profile_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "shop" => {
            let candidate = Profile::for_shop(value.clone());
            getaway_config::shop_url(&candidate)?;
            profile.shop = value;
        }
        "api_version" | "api-version" => profile.api_version = Some(value),
        "token" => profile.token = Some(value),
        "token_env" | "token-env" => profile.token_env = Some(value),
        "collection" => profile.collection = Some(value),
        "bonus_tag" | "bonus-tag" => profile.bonus_tag = Some(value),
        "country" => profile.country = Some(value.to_ascii_uppercase()),
        "language" => profile.language = Some(value.to_ascii_uppercase()),
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: "insecure".into(),
                reason: "must be 'true' or 'false'".into(),
            })?);
        }
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number (seconds)".into(),
            })?);
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: shop, api_version, token, \
                     token_env, collection, bonus_tag, country, language, insecure, timeout, \
                     ca_cert"
                ),
            });
        }
    }
    Ok(())
}

fn prompt_token() -> Result<SecretString, CliError> {
    let token = rpassword::prompt_password("Storefront access token: ").map_err(prompt_err)?;
    if token.is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "token cannot be empty".into(),
        });
    }
    Ok(SecretString::from(token))
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("✨ getaway configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let shop: String = Input::new()
                .with_prompt("Shop URL")
                .default("https://getaway.myshopify.com".into())
                .interact_text()
                .map_err(prompt_err)?;
            let mut profile = Profile::for_shop(shop);
            getaway_config::shop_url(&profile)?;

            let token = prompt_token()?;
            let choices = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
            ];
            let selection = Select::new()
                .with_prompt("Where to store the token?")
                .items(choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;
            if selection == 0 {
                getaway_config::store_token(&profile_name, &token)?;
                eprintln!("   ✓ Token stored in system keyring");
            } else {
                use secrecy::ExposeSecret;
                profile.token = Some(token.expose_secret().to_owned());
            }

            let collection: String = Input::new()
                .with_prompt("Landing collection handle")
                .default(getaway_core::config::DEFAULT_COLLECTION.into())
                .interact_text()
                .map_err(prompt_err)?;
            if collection != getaway_core::config::DEFAULT_COLLECTION {
                profile.collection = Some(collection);
            }

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: getaway offers list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            for profile in cfg.profiles.values_mut() {
                if profile.token.is_some() {
                    profile.token = Some("****".into());
                }
            }
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_profile_key(profile, &key, value)?;

            config::save_config(&cfg)?;
            output::status(&format!("✓ Set {key} on profile '{profile_name}'"), global.quiet);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: getaway config init");
            } else {
                for (name, profile) in &cfg.profiles {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}\t{}", profile.shop);
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::status(&format!("✓ Default profile set to '{name}'"), global.quiet);
            Ok(())
        }

        // ── SetToken ────────────────────────────────────────────────
        ConfigCommand::SetToken { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let token = prompt_token()?;
            getaway_config::store_token(&profile_name, &token)?;
            output::status(
                &format!("✓ Token stored in system keyring for profile '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_known_keys() {
        let mut profile = Profile::default();
        set_profile_key(&mut profile, "shop", "https://shop.example.com".into()).unwrap();
        set_profile_key(&mut profile, "bonus-tag", "bonus".into()).unwrap();
        set_profile_key(&mut profile, "country", "us".into()).unwrap();
        set_profile_key(&mut profile, "timeout", "12".into()).unwrap();
        assert_eq!(profile.shop, "https://shop.example.com");
        assert_eq!(profile.bonus_tag.as_deref(), Some("bonus"));
        assert_eq!(profile.country.as_deref(), Some("US"));
        assert_eq!(profile.timeout, Some(12));
    }

    #[test]
    fn bad_values_are_rejected() {
        let mut profile = Profile::default();
        assert!(set_profile_key(&mut profile, "shop", "not a url".into()).is_err());
        assert!(set_profile_key(&mut profile, "timeout", "soon".into()).is_err());
        assert!(set_profile_key(&mut profile, "controller", "x".into()).is_err());
        assert_eq!(profile.shop, "");
    }

    #[test]
    fn redacted_view_masks_token() {
        let mut cfg = Config::default();
        let mut profile = Profile::for_shop("https://shop.example.com");
        profile.token = Some("secret-token".into());
        profile.collection = Some("summer".into());
        cfg.profiles.insert("live".into(), profile);

        let text = format_config_redacted(&cfg);
        assert!(text.contains("[profiles.live]"));
        assert!(text.contains("token = \"****\""));
        assert!(text.contains("collection = \"summer\""));
        assert!(!text.contains("secret-token"));
    }
}
