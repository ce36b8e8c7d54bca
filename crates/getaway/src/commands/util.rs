//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use getaway_core::{Category, Product};

use crate::cli::Tab;
use crate::error::CliError;

/// Run `fut` behind a stderr spinner. No spinner when quiet or when
/// stderr is not a terminal.
pub async fn with_spinner<F, T>(message: &str, quiet: bool, fut: F) -> T
where
    F: Future<Output = T>,
{
    if quiet || !std::io::stderr().is_terminal() {
        return fut.await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = fut.await;
    spinner.finish_and_clear();
    result
}

/// Find a catalog product by id, handle, variant id or (case-insensitive)
/// title.
pub fn find_offer<'a>(products: &'a [Product], identifier: &str) -> Result<&'a Product, CliError> {
    products
        .iter()
        .find(|p| {
            p.id == identifier
                || p.handle == identifier
                || p.variant_id.as_deref() == Some(identifier)
                || p.title.eq_ignore_ascii_case(identifier)
        })
        .ok_or_else(|| CliError::NotFound {
            resource_type: "offer".into(),
            identifier: identifier.into(),
            list_command: "offers list --all".into(),
        })
}

/// The purchasable variant of `product`.
pub fn variant_of(product: &Product) -> Result<&str, CliError> {
    product
        .variant_id
        .as_deref()
        .ok_or_else(|| CliError::Validation {
            field: "offer".into(),
            reason: format!("'{}' has no purchasable variant", product.title),
        })
}

pub fn category(tab: Tab) -> Category {
    match tab {
        Tab::Popular => Category::Popular,
        Tab::Hotels => Category::Hotels,
        Tab::Cruise => Category::Cruise,
        Tab::Exclusive => Category::ExclusiveDeals,
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
