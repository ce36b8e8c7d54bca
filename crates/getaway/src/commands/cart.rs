//! Cart handlers: view, book, remove, clear, countdown watch and the
//! form-submission surface.

use std::io::Read;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;
use tracing::debug;

use getaway_core::{
    CartAction, CartSummary, CountdownState, CountdownTicker, DateRange, Offer, Storefront,
    SummaryLine, SystemClock, TravelerForm,
};

use crate::cli::{CartArgs, CartCommand, GlobalOpts, TravelerArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Line")]
    id: String,
    #[tabled(rename = "Offer")]
    title: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stay")]
    stay: String,
}

impl From<&SummaryLine> for LineRow {
    fn from(l: &SummaryLine) -> Self {
        Self {
            id: l.line_id.clone(),
            title: l.offer.title.clone(),
            location: l.offer.location.clone(),
            price: l.offer.price.clone(),
            stay: l.offer.duration_label(),
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────

/// Cart page as text: active offer with its hold countdown, every line,
/// bonus picks and checkout link.
fn summary_detail(summary: &CartSummary, color: bool) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(empty) = summary.empty_state() {
        let _ = writeln!(out, "{}", empty.message);
        let _ = write!(
            out,
            "{}",
            output::muted(
                &format!("{}: getaway offers list", empty.action),
                color
            )
        );
        return out;
    }

    if let Some(ref offer) = summary.active_offer {
        let _ = writeln!(out, "{}", output::heading(&offer.title, color));
        let _ = writeln!(out, "{} · {}", offer.location, offer.duration_label());
        let _ = writeln!(out, "Price: {}", output::accent(&offer.price, color));
        let state = summary.countdown.state_at(Utc::now());
        let _ = writeln!(
            out,
            "Offer expires in: {}",
            output::accent(&state.to_string(), color)
        );
        for bullet in offer.bullets() {
            let _ = writeln!(out, "  • {bullet}");
        }
        let _ = writeln!(out);
    }

    let rows: Vec<LineRow> = summary.lines.iter().map(LineRow::from).collect();
    let _ = writeln!(out, "{}", output::render_table(&rows));

    if !summary.bonus_lines.is_empty() {
        let _ = writeln!(out, "{}", output::heading("Bonus choices", color));
        for bonus in &summary.bonus_lines {
            let _ = writeln!(
                out,
                "  {}: {} {}",
                bonus.label,
                bonus.title,
                output::muted(&format!("({})", bonus.line_id), color)
            );
        }
    }

    if let Some(ref subtotal) = summary.subtotal {
        let _ = writeln!(out, "Subtotal: {subtotal}");
    }
    if let Some(ref url) = summary.checkout_url {
        let _ = write!(out, "Checkout: {url}");
    }
    out.trim_end().to_owned()
}

pub(crate) fn print_summary(summary: &CartSummary, global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        summary,
        |s| summary_detail(s, color),
        |s| s.line_ids.join("\n"),
    );
    output::print_output(&out, global.quiet);
}

// ── Traveler form ───────────────────────────────────────────────────

/// Traveler details from flags. Dates go through the picker's transition
/// rule, so a check-out on or before check-in restarts the range there.
fn traveler(args: TravelerArgs) -> TravelerForm {
    let range = [args.check_in, args.check_out]
        .into_iter()
        .flatten()
        .fold(DateRange::default(), DateRange::select);

    TravelerForm {
        first_name: args.first_name.unwrap_or_default(),
        last_name: args.last_name.unwrap_or_default(),
        email: args.email.unwrap_or_default(),
        phone: args.phone.unwrap_or_default(),
        adults: args.adults.unwrap_or_default(),
        kids: args.kids.unwrap_or_default(),
        ..TravelerForm::default()
    }
    .with_dates(range)
}

fn read_form_body(body: Option<String>) -> Result<String, CliError> {
    if let Some(body) = body {
        return Ok(body);
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim().to_owned())
}

// ── Watch ───────────────────────────────────────────────────────────

async fn watch(storefront: &Storefront, global: &GlobalOpts) -> Result<(), CliError> {
    let summary =
        util::with_spinner("Loading cart", global.quiet, storefront.cart_view()).await?;
    let Some(offer) = summary.active_offer else {
        output::status("Your cart is empty.", global.quiet);
        return Ok(());
    };

    let ticker = CountdownTicker::spawn(summary.countdown, SystemClock);
    let mut rx = ticker.subscribe();
    let mut state = *rx.borrow_and_update();

    let bar = if global.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(format!("{}: offer expires in {state}", offer.title));

    while !state.is_terminal() {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                state = *rx.borrow_and_update();
                bar.set_message(format!("{}: offer expires in {state}", offer.title));
                bar.tick();
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("watch interrupted");
                ticker.stop();
                break;
            }
        }
    }
    bar.finish_and_clear();

    let message = match state {
        CountdownState::Expired => format!("{}: the offer hold has expired", offer.title),
        CountdownState::NoDeadline => format!("{}: no hold on this offer", offer.title),
        CountdownState::Running(remaining) => {
            format!("{}: offer expires in {remaining}", offer.title)
        }
    };
    output::print_output(&message, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    storefront: &Storefront,
    args: CartArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CartCommand::Show => {
            let summary =
                util::with_spinner("Loading cart", global.quiet, storefront.cart_view()).await?;
            print_summary(&summary, global);
            Ok(())
        }

        CartCommand::Add { offer, traveler: t } => {
            let products =
                util::with_spinner("Loading offers", global.quiet, storefront.catalog()).await?;
            let product = util::find_offer(&products, &offer)?;
            let variant_id = util::variant_of(product)?;
            let offer = Offer::from_product(product);

            let cart = util::with_spinner(
                "Adding to cart",
                global.quiet,
                storefront.add_offer(variant_id, &offer, &traveler(t)),
            )
            .await?;
            output::status(&format!("✓ Added {} to the cart", offer.title), global.quiet);
            print_summary(&CartSummary::compose(&cart, &[]), global);
            Ok(())
        }

        CartCommand::Remove { line_ids } => {
            let cart = util::with_spinner(
                "Removing lines",
                global.quiet,
                storefront.remove_lines(&line_ids),
            )
            .await?;
            output::status(
                &format!("✓ Removed {} line(s)", line_ids.len()),
                global.quiet,
            );
            print_summary(&CartSummary::compose(&cart, &[]), global);
            Ok(())
        }

        CartCommand::Clear => {
            if !util::confirm("Remove every line from the cart?", "cart clear", global.yes)? {
                return Ok(());
            }
            let cart =
                util::with_spinner("Clearing cart", global.quiet, storefront.clear_cart()).await?;
            output::status("✓ Cart cleared", global.quiet);
            print_summary(&CartSummary::compose(&cart, &[]), global);
            Ok(())
        }

        CartCommand::Watch => watch(storefront, global).await,

        CartCommand::Submit { body } => {
            let body = read_form_body(body)?;
            let action = CartAction::from_urlencoded(&body);
            debug!(?action, "form submission");
            let redirect = storefront.submit(action).await;
            output::print_output(&format!("Location: {}", redirect.location), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap_or_default()
    }

    #[test]
    fn traveler_keeps_ordered_dates() {
        let form = traveler(TravelerArgs {
            first_name: Some("Ada".into()),
            check_in: Some(day(10)),
            check_out: Some(day(14)),
            ..TravelerArgs::default()
        });
        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.check_in, Some(day(10)));
        assert_eq!(form.check_out, Some(day(14)));
        assert_eq!(form.kids, "");
    }

    #[test]
    fn early_check_out_restarts_range() {
        let form = traveler(TravelerArgs {
            check_in: Some(day(10)),
            check_out: Some(day(8)),
            ..TravelerArgs::default()
        });
        assert_eq!(form.check_in, Some(day(8)));
        assert_eq!(form.check_out, None);
    }

    #[test]
    fn empty_cart_points_at_offers() {
        let summary = CartSummary::compose(&getaway_core::Cart::empty(), &[]);
        let text = summary_detail(&summary, false);
        assert!(text.contains("Your cart is empty"));
        assert!(text.contains("Find Destination: getaway offers list"));
    }
}
