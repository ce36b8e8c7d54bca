//! Bonus add-on handlers.

use serde::Serialize;
use tabled::Tabled;

use getaway_core::{CartSummary, Offer, Product, Storefront, TravelerForm, catalog};

use crate::cli::{BonusArgs, BonusCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct Choice<'a> {
    label: String,
    in_cart: bool,
    #[serde(flatten)]
    product: &'a Product,
}

#[derive(Tabled)]
struct ChoiceRow {
    #[tabled(rename = "Choice")]
    label: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "In cart")]
    in_cart: String,
}

impl From<&Choice<'_>> for ChoiceRow {
    fn from(c: &Choice<'_>) -> Self {
        Self {
            label: c.label.clone(),
            title: c.product.title.clone(),
            price: if c.product.min_price.is_zero() {
                "Free".into()
            } else {
                c.product.min_price.to_string()
            },
            in_cart: if c.in_cart { "✓".into() } else { String::new() },
        }
    }
}

/// Resolve `"A"`, `"choice b"`, `"2"` or a product title to a position in
/// `choices`.
fn choice_index(choices: &[Product], choice: &str) -> Option<usize> {
    let choice = choice.trim();
    let letter = choice
        .strip_prefix("Choice ")
        .or_else(|| choice.strip_prefix("choice "))
        .unwrap_or(choice);

    if let [c] = letter.as_bytes() {
        if c.is_ascii_alphabetic() {
            let index = usize::from(c.to_ascii_uppercase() - b'A');
            return (index < choices.len()).then_some(index);
        }
    }
    if let Ok(n) = letter.parse::<usize>() {
        return (1..=choices.len()).contains(&n).then(|| n - 1);
    }
    choices
        .iter()
        .position(|p| p.title.eq_ignore_ascii_case(choice))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    storefront: &Storefront,
    args: BonusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BonusCommand::List => {
            let (cart, bonus) = util::with_spinner("Loading bonus choices", global.quiet, async {
                tokio::join!(storefront.cart(), storefront.bonus_choices())
            })
            .await;
            let summary = CartSummary::compose(&cart?, &bonus);

            let choices: Vec<Choice<'_>> = bonus
                .iter()
                .enumerate()
                .map(|(i, product)| Choice {
                    label: catalog::bonus_label(i),
                    in_cart: summary.bonus_lines.iter().any(|b| b.title == product.title),
                    product,
                })
                .collect();

            if choices.is_empty() {
                output::status("No bonus choices available.", global.quiet);
                return Ok(());
            }
            let out = output::render_list(&global.output, &choices, |c| ChoiceRow::from(c), |c| {
                c.product.handle.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BonusCommand::Select { choice } => {
            let bonus = util::with_spinner(
                "Loading bonus choices",
                global.quiet,
                storefront.bonus_choices(),
            )
            .await;
            let product = choice_index(&bonus, &choice)
                .and_then(|i| bonus.get(i))
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "bonus choice".into(),
                    identifier: choice.clone(),
                    list_command: "bonus list".into(),
                })?;
            let variant_id = util::variant_of(product)?;
            let offer = Offer::from_product(product);

            let cart = util::with_spinner(
                "Adding to cart",
                global.quiet,
                storefront.add_offer(variant_id, &offer, &TravelerForm::default()),
            )
            .await?;
            output::status(&format!("✓ Added {} to the cart", offer.title), global.quiet);
            super::cart::print_summary(&CartSummary::compose(&cart, &bonus), global);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use getaway_core::Money;

    use super::*;

    fn choice(title: &str) -> Product {
        Product {
            id: format!("gid://shopify/Product/{title}"),
            handle: title.to_lowercase(),
            title: title.into(),
            description: String::new(),
            image: None,
            min_price: Money {
                amount: "0.0".into(),
                currency_code: "USD".into(),
            },
            max_price: Money {
                amount: "0.0".into(),
                currency_code: "USD".into(),
            },
            tags: vec!["choice".into()],
            variant_id: Some(format!("v-{title}")),
        }
    }

    #[test]
    fn choices_resolve_by_letter_label_number_or_title() {
        let choices = vec![choice("Theme Park Tickets"), choice("Dinner Cruise")];
        assert_eq!(choice_index(&choices, "A"), Some(0));
        assert_eq!(choice_index(&choices, "b"), Some(1));
        assert_eq!(choice_index(&choices, "Choice B"), Some(1));
        assert_eq!(choice_index(&choices, "2"), Some(1));
        assert_eq!(choice_index(&choices, "dinner cruise"), Some(1));
        assert_eq!(choice_index(&choices, "C"), None);
        assert_eq!(choice_index(&choices, "0"), None);
        assert_eq!(choice_index(&choices, "Spa Day"), None);
    }

    #[test]
    fn free_choices_show_as_free() {
        let product = choice("Theme Park Tickets");
        let row = ChoiceRow::from(&Choice {
            label: "Choice A".into(),
            in_cart: true,
            product: &product,
        });
        assert_eq!(row.price, "Free");
        assert_eq!(row.in_cart, "✓");
    }
}
