//! Offer catalog handlers.

use serde::Serialize;
use tabled::Tabled;

use getaway_core::{CatalogTabs, Offer, Product, Storefront};

use crate::cli::{GlobalOpts, OffersArgs, OffersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OfferRow {
    #[tabled(rename = "Offer")]
    title: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "From")]
    price: String,
    #[tabled(rename = "Stay")]
    stay: String,
    #[tabled(rename = "Handle")]
    handle: String,
    #[tabled(rename = "")]
    badge: String,
}

impl From<&&Product> for OfferRow {
    fn from(p: &&Product) -> Self {
        let offer = Offer::from_product(p);
        Self {
            title: p.title.clone(),
            location: offer.location.clone(),
            price: p.min_price.to_string(),
            stay: offer.duration_label(),
            handle: p.handle.clone(),
            badge: if p.is_exclusive() {
                "Exclusive".into()
            } else {
                String::new()
            },
        }
    }
}

/// Offer with the identifiers needed to book it.
#[derive(Serialize)]
struct OfferDetail<'a> {
    handle: &'a str,
    variant_id: Option<&'a str>,
    #[serde(flatten)]
    offer: Offer,
    bullets: Vec<String>,
}

fn detail(d: &OfferDetail<'_>, color: bool) -> String {
    use std::fmt::Write;
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading(&d.offer.title, color));
    if !d.offer.location.is_empty() {
        let _ = writeln!(out, "{}", d.offer.location);
    }
    let _ = writeln!(
        out,
        "{} from {}",
        d.offer.duration_label(),
        output::accent(&d.offer.price, color)
    );
    for bullet in &d.bullets {
        let _ = writeln!(out, "  • {bullet}");
    }
    let _ = write!(
        out,
        "{}",
        output::muted(&format!("Book it: getaway cart add {}", d.handle), color)
    );
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    storefront: &Storefront,
    args: OffersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        OffersCommand::List { tab, all } => {
            let products =
                util::with_spinner("Loading offers", global.quiet, storefront.catalog()).await?;

            let mut tabs = CatalogTabs::default();
            if let Some(tab) = tab {
                tabs.select(util::category(tab));
            }
            let listing: Vec<&Product> = if all {
                products.iter().collect()
            } else {
                tabs.listing(&products)
            };

            if listing.is_empty() {
                output::status(
                    &format!("No offers in the {} tab.", tabs.active().label()),
                    global.quiet,
                );
                return Ok(());
            }

            let out = output::render_list(&global.output, &listing, |p| OfferRow::from(p), |p| {
                p.handle.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OffersCommand::Get { offer } => {
            let products =
                util::with_spinner("Loading offers", global.quiet, storefront.catalog()).await?;
            let product = util::find_offer(&products, &offer)?;
            let offer = Offer::from_product(product);
            let data = OfferDetail {
                handle: &product.handle,
                variant_id: product.variant_id.as_deref(),
                bullets: offer.bullets(),
                offer,
            };
            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                &data,
                |d| detail(d, color),
                |d| d.handle.to_owned(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OffersCommand::Recommended => {
            let products = util::with_spinner(
                "Loading recommendations",
                global.quiet,
                storefront.recommended_products(),
            )
            .await;
            let listing: Vec<&Product> = products.iter().collect();
            let out = output::render_list(&global.output, &listing, |p| OfferRow::from(p), |p| {
                p.handle.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
